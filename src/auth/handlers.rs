use crate::{
    auth::jwt::generate_access_token,
    config::Config,
    error::AppError,
    model::user::User,
    models::{LoginReqDto, LoginResponse, RegisterReq},
    service::PresenceService,
};
use actix_web::{HttpResponse, Responder, web};
use tracing::{error, info, instrument};

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid email, empty name or short password"),
        (status = 409, description = "Email already registered", body = Object, example = json!({
            "error": "EMAIL_TAKEN",
            "message": "Email already registered"
        }))
    ),
    tag = "Auth"
)]
pub async fn register(
    payload: web::Json<RegisterReq>,
    service: web::Data<PresenceService>,
) -> actix_web::Result<impl Responder> {
    let user = service
        .register(&payload.email, &payload.name, &payload.password, payload.role)
        .await?;

    Ok(HttpResponse::Created().json(user))
}

/// Log in and receive an access token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "error": "INVALID_CREDENTIALS",
            "message": "Invalid email or password"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(payload, service, config))]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    service: web::Data<PresenceService>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    info!("Login request received");

    let user = service.login(&payload.email, &payload.password).await?;

    let access_token = generate_access_token(&user, &config.jwt_secret, config.access_token_ttl)
        .map_err(|e| {
            error!(error = %e, user_id = user.id, "Failed to sign access token");
            AppError::Internal(e.to_string())
        })?;

    info!(user_id = user.id, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse { user, access_token }))
}
