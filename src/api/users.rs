use crate::{auth::auth::AuthUser, model::user::User, service::PresenceService};
use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

/// The account behind the bearer token
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized or account no longer exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn me(
    auth: AuthUser,
    service: web::Data<PresenceService>,
) -> actix_web::Result<impl Responder> {
    let user = service.get_current_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// All registered users (managers only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Every registered user", body = Vec<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Manager role required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(name = "api_list_users", skip_all, fields(actor_id = auth.user_id, role = %auth.role))]
pub async fn list_users(
    auth: AuthUser,
    service: web::Data<PresenceService>,
) -> actix_web::Result<impl Responder> {
    let users = service.list_users(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(users))
}
