use super::{PresenceStore, StoreError, StoreResult, UserStore};
use crate::model::{
    presence::{EntryFilter, NewPresenceEntry, PresenceEntry, PresencePatch},
    user::{NewUser, User, UserAccount},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    users: BTreeMap<u64, UserAccount>,
    entries: BTreeMap<u64, PresenceEntry>,
    last_user_id: u64,
    last_entry_id: u64,
}

impl Tables {
    fn day_taken(&self, user_id: u64, date: chrono::NaiveDate, except: Option<u64>) -> bool {
        self.entries
            .values()
            .any(|e| e.user_id == user_id && e.date == date && Some(e.id) != except)
    }
}

/// Process-local store with the same uniqueness rules as the MySQL schema.
/// Each call holds the lock for its whole check-and-write.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Corrupt("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: u64) -> StoreResult<Option<User>> {
        Ok(self.tables()?.users.get(&id).map(|a| a.user.clone()))
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|a| a.user.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|a| a.user.email == user.email) {
            return Err(StoreError::Conflict);
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let account = UserAccount {
            user: User {
                id: tables.last_user_id,
                email: user.email,
                name: user.name,
                role: user.role,
                created_at: now,
                updated_at: now,
            },
            password_hash: user.password_hash,
        };
        let created = account.user.clone();
        tables.users.insert(created.id, account);
        Ok(created)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self
            .tables()?
            .users
            .values()
            .map(|a| a.user.clone())
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }
}

#[async_trait]
impl PresenceStore for MemoryStore {
    async fn find_entry(&self, id: u64) -> StoreResult<Option<PresenceEntry>> {
        Ok(self.tables()?.entries.get(&id).cloned())
    }

    async fn insert_entry(&self, entry: NewPresenceEntry) -> StoreResult<PresenceEntry> {
        let mut tables = self.tables()?;
        if tables.day_taken(entry.user_id, entry.date, None) {
            return Err(StoreError::Conflict);
        }

        tables.last_entry_id += 1;
        let now = Utc::now();
        let created = PresenceEntry {
            id: tables.last_entry_id,
            user_id: entry.user_id,
            status: entry.status,
            date: entry.date,
            created_by: entry.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.entries.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_entry(
        &self,
        id: u64,
        patch: &PresencePatch,
    ) -> StoreResult<Option<PresenceEntry>> {
        let mut tables = self.tables()?;
        let Some(current) = tables.entries.get(&id) else {
            return Ok(None);
        };

        if let Some(date) = patch.date {
            if tables.day_taken(current.user_id, date, Some(id)) {
                return Err(StoreError::Conflict);
            }
        }

        let Some(entry) = tables.entries.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(date) = patch.date {
            entry.date = date;
        }
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete_entry(&self, id: u64) -> StoreResult<bool> {
        Ok(self.tables()?.entries.remove(&id).is_some())
    }

    async fn list_entries(&self, filter: EntryFilter) -> StoreResult<Vec<PresenceEntry>> {
        let mut entries: Vec<PresenceEntry> = self
            .tables()?
            .entries
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.user_id.cmp(&b.user_id)));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{presence::PresenceStatus, role::Role};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Someone".to_string(),
            role: Role::TeamMember,
            password_hash: "hash".to_string(),
        }
    }

    fn new_entry(user_id: u64, date: NaiveDate) -> NewPresenceEntry {
        NewPresenceEntry {
            user_id,
            status: PresenceStatus::InOffice,
            date,
            created_by: user_id,
        }
    }

    #[actix_web::test]
    async fn email_is_unique() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a@x.io")).await.unwrap();
        let err = store.insert_user(new_user("a@x.io")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[actix_web::test]
    async fn one_entry_per_user_and_day() {
        let store = MemoryStore::new();
        store.insert_entry(new_entry(1, day(2))).await.unwrap();
        store.insert_entry(new_entry(2, day(2))).await.unwrap();

        let err = store.insert_entry(new_entry(1, day(2))).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[actix_web::test]
    async fn update_keeps_unique_day() {
        let store = MemoryStore::new();
        let first = store.insert_entry(new_entry(1, day(2))).await.unwrap();
        store.insert_entry(new_entry(1, day(3))).await.unwrap();

        // same day as itself is fine
        let same = PresencePatch {
            status: None,
            date: Some(day(2)),
        };
        assert!(store.update_entry(first.id, &same).await.unwrap().is_some());

        let taken = PresencePatch {
            status: None,
            date: Some(day(3)),
        };
        let err = store.update_entry(first.id, &taken).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[actix_web::test]
    async fn list_filters_by_window_and_user() {
        let store = MemoryStore::new();
        for (user, d) in [(1, 1), (1, 2), (2, 2), (1, 9)] {
            store.insert_entry(new_entry(user, day(d))).await.unwrap();
        }

        let all = store
            .list_entries(EntryFilter { start: day(2), end: day(8), user_id: None })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let mine = store
            .list_entries(EntryFilter { start: day(1), end: day(9), user_id: Some(1) })
            .await
            .unwrap();
        assert_eq!(mine.iter().map(|e| e.date).collect::<Vec<_>>(), vec![day(1), day(2), day(9)]);
    }
}
