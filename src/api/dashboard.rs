use crate::{
    auth::auth::AuthUser,
    models::DashboardQuery,
    service::{DashboardData, PresenceService},
};
use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

/// Week calendar: visible users and their entries for seven days
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Users and entries for the week", body = DashboardData),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(name = "api_get_dashboard", skip_all, fields(actor_id = auth.user_id, role = %auth.role))]
pub async fn get_dashboard(
    auth: AuthUser,
    service: web::Data<PresenceService>,
    query: web::Query<DashboardQuery>,
) -> actix_web::Result<impl Responder> {
    let data = service.get_dashboard(auth.user_id, query.week_start).await?;
    Ok(HttpResponse::Ok().json(data))
}
