use crate::model::{presence::PresenceStatus, role::Role, user::User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct RegisterReq {
    #[schema(example = "jane.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "secret123")]
    pub password: String,
    pub role: Role,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "jane.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreatePresenceEntry {
    /// user the entry belongs to; managers may name anyone
    #[schema(example = 2)]
    pub user_id: u64,
    pub status: PresenceStatus,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PresenceQuery {
    /// first day of the window (inclusive)
    #[param(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    /// last day of the window (inclusive)
    #[param(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    /// restrict to one user
    pub user_id: Option<u64>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// first day of the week to display
    #[param(value_type = String, format = "date")]
    pub week_start: NaiveDate,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String, // email
    pub role: Role,
    pub exp: usize,
    pub jti: String,
}
