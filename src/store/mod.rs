//! Persistence contracts.
//!
//! Both stores report uniqueness violations as [`StoreError::Conflict`]:
//! `users.email` and `presence_entries (user_id, date)` are unique keys, and
//! the service relies on the store for that guarantee instead of a separate
//! check-then-insert.

pub mod memory;
pub mod mysql;

use crate::model::{
    presence::{EntryFilter, NewPresenceEntry, PresenceEntry, PresencePatch},
    user::{NewUser, User, UserAccount},
};
use async_trait::async_trait;
use derive_more::Display;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "unique constraint violated")]
    Conflict,

    #[display(fmt = "corrupt row: {}", _0)]
    Corrupt(String),

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return StoreError::Conflict;
            }
        }
        StoreError::Database(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: u64) -> StoreResult<Option<User>>;

    /// `email` must already be normalized (trimmed, lowercase).
    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>>;

    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;
}

#[async_trait]
pub trait PresenceStore: Send + Sync {
    async fn find_entry(&self, id: u64) -> StoreResult<Option<PresenceEntry>>;

    async fn insert_entry(&self, entry: NewPresenceEntry) -> StoreResult<PresenceEntry>;

    /// Returns `None` when no entry has this id.
    async fn update_entry(
        &self,
        id: u64,
        patch: &PresencePatch,
    ) -> StoreResult<Option<PresenceEntry>>;

    /// Returns whether a row was removed.
    async fn delete_entry(&self, id: u64) -> StoreResult<bool>;

    /// Entries matching the filter, ordered by date then user.
    async fn list_entries(&self, filter: EntryFilter) -> StoreResult<Vec<PresenceEntry>>;
}

pub trait Store: UserStore + PresenceStore {}

impl<T: UserStore + PresenceStore> Store for T {}
