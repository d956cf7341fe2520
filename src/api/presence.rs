use crate::{
    auth::auth::AuthUser,
    model::presence::{PresenceEntry, PresencePatch},
    models::{CreatePresenceEntry, DeleteResponse, PresenceQuery},
    service::PresenceService,
};
use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

/// Presence entries in a date window
#[utoipa::path(
    get,
    path = "/api/presence",
    params(PresenceQuery),
    responses(
        (status = 200, description = "Entries in the window", body = Vec<PresenceEntry>),
        (status = 400, description = "start_date after end_date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Team members can only view their own entries")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Presence"
)]
#[instrument(name = "api_list_entries", skip_all, fields(actor_id = auth.user_id, role = %auth.role))]
pub async fn list_entries(
    auth: AuthUser,
    service: web::Data<PresenceService>,
    query: web::Query<PresenceQuery>,
) -> actix_web::Result<impl Responder> {
    let entries = service
        .list_presence_entries(auth.user_id, query.start_date, query.end_date, query.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(entries))
}

/// Record where a user works on a given day
#[utoipa::path(
    post,
    path = "/api/presence",
    request_body = CreatePresenceEntry,
    responses(
        (status = 201, description = "Entry created", body = PresenceEntry),
        (status = 400, description = "Date outside the two-week window", body = Object, example = json!({
            "error": "DATE_OUT_OF_RANGE",
            "message": "Date must be between today and two weeks from today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only managers can create entries for other users"),
        (status = 404, description = "Target user not found"),
        (status = 409, description = "Entry already exists for this user and date")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Presence"
)]
#[instrument(name = "api_create_entry", skip_all, fields(actor_id = auth.user_id, role = %auth.role))]
pub async fn create_entry(
    auth: AuthUser,
    service: web::Data<PresenceService>,
    payload: web::Json<CreatePresenceEntry>,
) -> actix_web::Result<impl Responder> {
    let entry = service
        .create_presence_entry(auth.user_id, payload.user_id, payload.status, payload.date)
        .await?;

    Ok(HttpResponse::Created().json(entry))
}

/// Change the status and/or date of an entry
#[utoipa::path(
    put,
    path = "/api/presence/{id}",
    params(
        ("id" = u64, Path, description = "Presence entry id")
    ),
    request_body = PresencePatch,
    responses(
        (status = 200, description = "Entry updated", body = PresenceEntry),
        (status = 400, description = "Date outside the two-week window"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner, creator or a manager"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Another entry already occupies that day")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Presence"
)]
#[instrument(name = "api_update_entry", skip_all, fields(actor_id = auth.user_id, role = %auth.role))]
pub async fn update_entry(
    auth: AuthUser,
    service: web::Data<PresenceService>,
    path: web::Path<u64>,
    payload: web::Json<PresencePatch>,
) -> actix_web::Result<impl Responder> {
    let entry = service
        .update_presence_entry(auth.user_id, path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(entry))
}

/// Remove an entry
#[utoipa::path(
    delete,
    path = "/api/presence/{id}",
    params(
        ("id" = u64, Path, description = "Presence entry id")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner, creator or a manager"),
        (status = 404, description = "Entry not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Presence"
)]
#[instrument(name = "api_delete_entry", skip_all, fields(actor_id = auth.user_id, role = %auth.role))]
pub async fn delete_entry(
    auth: AuthUser,
    service: web::Data<PresenceService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    service
        .delete_presence_entry(auth.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}
