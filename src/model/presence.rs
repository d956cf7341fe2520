use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
pub enum PresenceStatus {
    #[serde(rename = "In office")]
    #[strum(serialize = "In office")]
    InOffice,
    #[serde(rename = "Working from home")]
    #[strum(serialize = "Working from home")]
    WorkingFromHome,
    #[serde(rename = "On vacation")]
    #[strum(serialize = "On vacation")]
    OnVacation,
}

/// One user's work location for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "user_id": 2,
        "status": "In office",
        "date": "2026-01-05",
        "created_by": 1,
        "created_at": "2026-01-01T09:00:00Z",
        "updated_at": "2026-01-01T09:00:00Z"
    })
)]
pub struct PresenceEntry {
    pub id: u64,
    /// owner of the entry
    pub user_id: u64,
    pub status: PresenceStatus,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    /// user who performed the write; differs from `user_id` for manager overrides
    pub created_by: u64,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPresenceEntry {
    pub user_id: u64,
    pub status: PresenceStatus,
    pub date: NaiveDate,
    pub created_by: u64,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PresencePatch {
    pub status: Option<PresenceStatus>,
    #[schema(example = "2026-01-05", format = "date", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
}

/// Inclusive date window, optionally narrowed to one user.
#[derive(Debug, Clone, Copy)]
pub struct EntryFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub user_id: Option<u64>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &PresenceEntry) -> bool {
        entry.date >= self.start
            && entry.date <= self.end
            && self.user_id.is_none_or(|id| id == entry.user_id)
    }
}
