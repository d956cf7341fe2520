use super::{PresenceStore, StoreError, StoreResult, UserStore};
use crate::model::{
    presence::{EntryFilter, NewPresenceEntry, PresenceEntry, PresencePatch, PresenceStatus},
    role::Role,
    user::{NewUser, User, UserAccount},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

const USER_COLUMNS: &str = "id, email, name, password_hash, role, created_at, updated_at";
const ENTRY_COLUMNS: &str = "id, user_id, status, date, created_by, created_at, updated_at";

#[derive(FromRow)]
struct UserSql {
    id: u64, // BIGINT UNSIGNED
    email: String,
    name: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserSql> for UserAccount {
    type Error = StoreError;

    fn try_from(row: UserSql) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .map_err(|_| StoreError::Corrupt(format!("user {} has role '{}'", row.id, row.role)))?;

        Ok(UserAccount {
            user: User {
                id: row.id,
                email: row.email,
                name: row.name,
                role,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            password_hash: row.password_hash,
        })
    }
}

#[derive(FromRow)]
struct PresenceEntrySql {
    id: u64,
    user_id: u64,
    status: String,
    date: NaiveDate,
    created_by: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PresenceEntrySql> for PresenceEntry {
    type Error = StoreError;

    fn try_from(row: PresenceEntrySql) -> Result<Self, Self::Error> {
        let status = PresenceStatus::from_str(&row.status).map_err(|_| {
            StoreError::Corrupt(format!("entry {} has status '{}'", row.id, row.status))
        })?;

        Ok(PresenceEntry {
            id: row.id,
            user_id: row.user_id,
            status,
            date: row.date,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Store backed by the MySQL schema in `migrations/`.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_account(
        &self,
        column: &str,
        value: UserKey<'_>,
    ) -> StoreResult<Option<UserAccount>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?");
        let query = sqlx::query_as::<_, UserSql>(&sql);
        let query = match value {
            UserKey::Id(id) => query.bind(id),
            UserKey::Email(email) => query.bind(email),
        };

        query
            .fetch_optional(&self.pool)
            .await?
            .map(UserAccount::try_from)
            .transpose()
    }
}

// Typed binding for the two user lookup keys
enum UserKey<'a> {
    Id(u64),
    Email(&'a str),
}

#[async_trait]
impl UserStore for MySqlStore {
    async fn find_user(&self, id: u64) -> StoreResult<Option<User>> {
        Ok(self
            .fetch_account("id", UserKey::Id(id))
            .await?
            .map(|account| account.user))
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        self.fetch_account("email", UserKey::Email(email)).await
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, name, password_hash, role)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role.to_string())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        self.find_user(id)
            .await?
            .ok_or_else(|| StoreError::Corrupt(format!("user {id} missing after insert")))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY name, id");
        let rows = sqlx::query_as::<_, UserSql>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| UserAccount::try_from(row).map(|account| account.user))
            .collect()
    }
}

#[async_trait]
impl PresenceStore for MySqlStore {
    async fn find_entry(&self, id: u64) -> StoreResult<Option<PresenceEntry>> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM presence_entries WHERE id = ?");
        sqlx::query_as::<_, PresenceEntrySql>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(PresenceEntry::try_from)
            .transpose()
    }

    async fn insert_entry(&self, entry: NewPresenceEntry) -> StoreResult<PresenceEntry> {
        // uq_presence_user_date turns a second entry for the same day into Conflict
        let result = sqlx::query(
            r#"
            INSERT INTO presence_entries (user_id, status, date, created_by)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.status.to_string())
        .bind(entry.date)
        .bind(entry.created_by)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        self.find_entry(id)
            .await?
            .ok_or_else(|| StoreError::Corrupt(format!("entry {id} missing after insert")))
    }

    async fn update_entry(
        &self,
        id: u64,
        patch: &PresencePatch,
    ) -> StoreResult<Option<PresenceEntry>> {
        sqlx::query(
            r#"
            UPDATE presence_entries
            SET status = COALESCE(?, status),
                date = COALESCE(?, date),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(patch.status.map(|s| s.to_string()))
        .bind(patch.date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // rows_affected() is 0 for unchanged rows, so re-read instead
        self.find_entry(id).await
    }

    async fn delete_entry(&self, id: u64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM presence_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_entries(&self, filter: EntryFilter) -> StoreResult<Vec<PresenceEntry>> {
        let mut where_sql = String::from(" WHERE date >= ? AND date <= ?");
        if filter.user_id.is_some() {
            where_sql.push_str(" AND user_id = ?");
        }

        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM presence_entries{where_sql} ORDER BY date, user_id"
        );

        let mut query = sqlx::query_as::<_, PresenceEntrySql>(&sql)
            .bind(filter.start)
            .bind(filter.end);
        if let Some(user_id) = filter.user_id {
            query = query.bind(user_id);
        }

        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(PresenceEntry::try_from)
            .collect()
    }
}
