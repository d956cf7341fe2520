use super::{PresenceService, validation::week_end};
use crate::{
    auth::policy,
    error::AppError,
    model::{
        presence::{EntryFilter, PresenceEntry},
        user::User,
    },
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

/// One week of the team calendar as seen by the requesting user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardData {
    pub users: Vec<User>,
    pub presence_entries: Vec<PresenceEntry>,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub week_start: NaiveDate,
    #[schema(example = "2026-01-11", format = "date", value_type = String)]
    pub week_end: NaiveDate,
}

impl PresenceService {
    #[instrument(name = "dashboard", skip(self))]
    pub async fn get_dashboard(
        &self,
        actor_id: u64,
        week_start: NaiveDate,
    ) -> Result<DashboardData, AppError> {
        let actor = self.actor(actor_id).await?;
        let week_end = week_end(week_start)?;
        let scope = policy::dashboard_scope(&actor);

        let users = match scope {
            None => self.store.list_users().await?,
            Some(_) => vec![actor],
        };
        let presence_entries = self
            .store
            .list_entries(EntryFilter {
                start: week_start,
                end: week_end,
                user_id: scope,
            })
            .await?;

        Ok(DashboardData {
            users,
            presence_entries,
            week_start,
            week_end,
        })
    }
}
