use crate::store::StoreError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Every failure a caller can observe. Each kind maps to its own status and
/// machine-readable code; the message is safe to show to end users.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Current user not found")]
    ActorNotFound,

    #[display(fmt = "User not found")]
    UserNotFound,

    #[display(fmt = "Presence entry not found")]
    EntryNotFound,

    #[display(fmt = "Email already registered")]
    EmailTaken,

    #[display(fmt = "Invalid email or password")]
    InvalidCredentials,

    #[display(fmt = "{}", _0)]
    PermissionDenied(String),

    #[display(fmt = "Date must be between today and two weeks from today")]
    DateOutOfRange,

    #[display(fmt = "Presence entry already exists for this user and date")]
    DuplicateEntry,

    #[display(fmt = "{}", _0)]
    InvalidInput(String),

    #[display(fmt = "{}", _0)]
    Unauthorized(String),

    // detail is logged, never sent
    #[display(fmt = "Internal server error")]
    Internal(String),
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn denied(message: impl Into<String>) -> Self {
        AppError::PermissionDenied(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ActorNotFound => "ACTOR_NOT_FOUND",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::EntryNotFound => "ENTRY_NOT_FOUND",
            AppError::EmailTaken => "EMAIL_TAKEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::PermissionDenied(_) => "PERMISSION_DENIED",
            AppError::DateOutOfRange => "DATE_OUT_OF_RANGE",
            AppError::DuplicateEntry => "DUPLICATE_ENTRY",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::DateOutOfRange => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::InvalidCredentials | AppError::ActorNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::EntryNotFound => StatusCode::NOT_FOUND,
            AppError::EmailTaken | AppError::DuplicateEntry => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!(error = %detail, "Request failed");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }))
    }
}
