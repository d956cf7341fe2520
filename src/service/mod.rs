//! Presence operations.
//!
//! Each operation takes the acting user's id explicitly, resolves it against
//! the store, applies [`crate::auth::policy`] and [`validation`], and then
//! performs a single store call.

mod accounts;
mod dashboard;
mod entries;
pub mod validation;

pub use dashboard::DashboardData;

use crate::{
    auth::password::PasswordService,
    error::AppError,
    model::user::User,
    store::Store,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

pub struct PresenceService {
    store: Arc<dyn Store>,
    passwords: PasswordService,
    today: fn() -> NaiveDate,
}

impl PresenceService {
    pub fn new(store: Arc<dyn Store>, passwords: PasswordService) -> Self {
        Self {
            store,
            passwords,
            today: utc_today,
        }
    }

    /// Replaces the source of "today" used by the booking window.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn today(&self) -> NaiveDate {
        (self.today)()
    }

    async fn actor(&self, actor_id: u64) -> Result<User, AppError> {
        self.store
            .find_user(actor_id)
            .await?
            .ok_or(AppError::ActorNotFound)
    }
}
