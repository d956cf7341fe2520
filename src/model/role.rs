use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
pub enum Role {
    #[serde(rename = "Manager")]
    #[strum(serialize = "Manager")]
    Manager,
    #[serde(rename = "Team Member")]
    #[strum(serialize = "Team Member")]
    TeamMember,
}

impl Role {
    pub fn is_manager(&self) -> bool {
        *self == Role::Manager
    }
}
