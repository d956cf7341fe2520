use super::{
    PresenceService,
    validation::{check_date_range, check_entry_date},
};
use crate::{
    auth::policy,
    error::AppError,
    model::presence::{EntryFilter, NewPresenceEntry, PresenceEntry, PresencePatch, PresenceStatus},
    store::StoreError,
};
use chrono::NaiveDate;
use tracing::{info, instrument};

// (user_id, date) is a unique key in every store
fn day_conflict(e: StoreError) -> AppError {
    match e {
        StoreError::Conflict => AppError::DuplicateEntry,
        other => other.into(),
    }
}

impl PresenceService {
    #[instrument(name = "presence_create", skip(self))]
    pub async fn create_presence_entry(
        &self,
        actor_id: u64,
        user_id: u64,
        status: PresenceStatus,
        date: NaiveDate,
    ) -> Result<PresenceEntry, AppError> {
        let actor = self.actor(actor_id).await?;

        if self.store.find_user(user_id).await?.is_none() {
            return Err(AppError::UserNotFound);
        }

        if let Err(e) = policy::authorize_create(&actor, user_id) {
            info!("Create denied");
            return Err(e);
        }
        check_entry_date(date, self.today())?;

        let entry = self
            .store
            .insert_entry(NewPresenceEntry {
                user_id,
                status,
                date,
                created_by: actor.id,
            })
            .await
            .map_err(day_conflict)?;

        info!(entry_id = entry.id, "Presence entry created");
        Ok(entry)
    }

    /// Applies only the fields present in `patch`. There is no duplicate
    /// pre-check here; moving onto an occupied day fails at the store.
    #[instrument(name = "presence_update", skip(self))]
    pub async fn update_presence_entry(
        &self,
        actor_id: u64,
        entry_id: u64,
        patch: PresencePatch,
    ) -> Result<PresenceEntry, AppError> {
        let actor = self.actor(actor_id).await?;
        let entry = self
            .store
            .find_entry(entry_id)
            .await?
            .ok_or(AppError::EntryNotFound)?;

        if let Err(e) = policy::authorize_modify(&actor, &entry) {
            info!(owner = entry.user_id, "Update denied");
            return Err(e);
        }
        if let Some(date) = patch.date {
            check_entry_date(date, self.today())?;
        }

        let updated = self
            .store
            .update_entry(entry_id, &patch)
            .await
            .map_err(day_conflict)?
            .ok_or(AppError::EntryNotFound)?;

        info!("Presence entry updated");
        Ok(updated)
    }

    #[instrument(name = "presence_delete", skip(self))]
    pub async fn delete_presence_entry(
        &self,
        actor_id: u64,
        entry_id: u64,
    ) -> Result<(), AppError> {
        let actor = self.actor(actor_id).await?;
        let entry = self
            .store
            .find_entry(entry_id)
            .await?
            .ok_or(AppError::EntryNotFound)?;

        if let Err(e) = policy::authorize_modify(&actor, &entry) {
            info!(owner = entry.user_id, "Delete denied");
            return Err(e);
        }

        if !self.store.delete_entry(entry_id).await? {
            return Err(AppError::EntryNotFound);
        }

        info!("Presence entry deleted");
        Ok(())
    }

    /// Entries with `start_date <= date <= end_date`. Team members without an
    /// explicit `user_id` only see their own.
    #[instrument(name = "presence_list", skip(self))]
    pub async fn list_presence_entries(
        &self,
        actor_id: u64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        user_id: Option<u64>,
    ) -> Result<Vec<PresenceEntry>, AppError> {
        let actor = self.actor(actor_id).await?;
        check_date_range(start_date, end_date)?;
        let user_id = policy::entry_list_scope(&actor, user_id)?;

        Ok(self
            .store
            .list_entries(EntryFilter {
                start: start_date,
                end: end_date,
                user_id,
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::AppError,
        model::{
            presence::{PresencePatch, PresenceStatus},
            role::Role,
        },
        service::testing::{days_from_today, fixed_today, register, service},
    };

    #[actix_web::test]
    async fn members_book_their_own_days() {
        let service = service();
        let jane = register(&service, "Jane", Role::TeamMember).await;

        let entry = service
            .create_presence_entry(jane.id, jane.id, PresenceStatus::WorkingFromHome, fixed_today())
            .await
            .unwrap();

        assert_eq!(entry.user_id, jane.id);
        assert_eq!(entry.created_by, jane.id);
        assert_eq!(entry.status, PresenceStatus::WorkingFromHome);
        assert_eq!(entry.date, fixed_today());
    }

    #[actix_web::test]
    async fn booking_window_boundary() {
        let service = service();
        let jane = register(&service, "Jane", Role::TeamMember).await;

        let last_day = service
            .create_presence_entry(jane.id, jane.id, PresenceStatus::InOffice, days_from_today(14))
            .await;
        assert!(last_day.is_ok());

        let too_far = service
            .create_presence_entry(jane.id, jane.id, PresenceStatus::InOffice, days_from_today(15))
            .await;
        assert!(matches!(too_far, Err(AppError::DateOutOfRange)));

        let past = service
            .create_presence_entry(jane.id, jane.id, PresenceStatus::InOffice, days_from_today(-1))
            .await;
        assert!(matches!(past, Err(AppError::DateOutOfRange)));
    }

    #[actix_web::test]
    async fn second_entry_for_same_day_is_duplicate() {
        let service = service();
        let boss = register(&service, "Boss", Role::Manager).await;
        let jane = register(&service, "Jane", Role::TeamMember).await;
        let day = days_from_today(3);

        service
            .create_presence_entry(jane.id, jane.id, PresenceStatus::InOffice, day)
            .await
            .unwrap();

        let again = service
            .create_presence_entry(boss.id, jane.id, PresenceStatus::OnVacation, day)
            .await;
        assert!(matches!(again, Err(AppError::DuplicateEntry)));
    }

    #[actix_web::test]
    async fn create_checks_existence_before_permission() {
        let service = service();
        let jane = register(&service, "Jane", Role::TeamMember).await;
        let today = fixed_today();

        assert!(matches!(
            service
                .create_presence_entry(999, jane.id, PresenceStatus::InOffice, today)
                .await,
            Err(AppError::ActorNotFound)
        ));
        assert!(matches!(
            service
                .create_presence_entry(jane.id, 999, PresenceStatus::InOffice, today)
                .await,
            Err(AppError::UserNotFound)
        ));
    }

    #[actix_web::test]
    async fn members_cannot_touch_other_members_entries() {
        let service = service();
        let boss = register(&service, "Boss", Role::Manager).await;
        let ann = register(&service, "Ann", Role::TeamMember).await;
        let bob = register(&service, "Bob", Role::TeamMember).await;
        let day = days_from_today(1);

        let create = service
            .create_presence_entry(ann.id, bob.id, PresenceStatus::InOffice, day)
            .await;
        assert!(matches!(create, Err(AppError::PermissionDenied(_))));

        let bobs = service
            .create_presence_entry(bob.id, bob.id, PresenceStatus::InOffice, day)
            .await
            .unwrap();

        let patch = PresencePatch {
            status: Some(PresenceStatus::OnVacation),
            date: None,
        };
        assert!(matches!(
            service.update_presence_entry(ann.id, bobs.id, patch.clone()).await,
            Err(AppError::PermissionDenied(_))
        ));
        assert!(matches!(
            service.delete_presence_entry(ann.id, bobs.id).await,
            Err(AppError::PermissionDenied(_))
        ));

        let updated = service
            .update_presence_entry(boss.id, bobs.id, patch)
            .await
            .unwrap();
        assert_eq!(updated.status, PresenceStatus::OnVacation);
        service.delete_presence_entry(boss.id, bobs.id).await.unwrap();
    }

    #[actix_web::test]
    async fn manager_override_then_owner_delete() {
        let service = service();
        let boss = register(&service, "Boss", Role::Manager).await;
        let tom = register(&service, "Tom", Role::TeamMember).await;

        let entry = service
            .create_presence_entry(boss.id, tom.id, PresenceStatus::InOffice, fixed_today())
            .await
            .unwrap();
        assert_eq!(entry.created_by, boss.id);
        assert_eq!(entry.user_id, tom.id);

        service.delete_presence_entry(tom.id, entry.id).await.unwrap();
        assert!(matches!(
            service.delete_presence_entry(tom.id, entry.id).await,
            Err(AppError::EntryNotFound)
        ));
    }

    #[actix_web::test]
    async fn owner_moves_entry_to_another_day() {
        let service = service();
        let ann = register(&service, "Ann", Role::TeamMember).await;
        let entry = service
            .create_presence_entry(ann.id, ann.id, PresenceStatus::InOffice, fixed_today())
            .await
            .unwrap();

        let patch = PresencePatch {
            status: None,
            date: Some(days_from_today(2)),
        };
        let moved = service
            .update_presence_entry(ann.id, entry.id, patch)
            .await
            .unwrap();
        assert_eq!(moved.date, days_from_today(2));
        assert_eq!(moved.status, PresenceStatus::InOffice);
    }

    #[actix_web::test]
    async fn update_validates_only_present_fields() {
        let service = service();
        let ann = register(&service, "Ann", Role::TeamMember).await;
        let entry = service
            .create_presence_entry(ann.id, ann.id, PresenceStatus::InOffice, days_from_today(13))
            .await
            .unwrap();

        let last_day = PresencePatch {
            status: None,
            date: Some(days_from_today(14)),
        };
        let moved = service
            .update_presence_entry(ann.id, entry.id, last_day)
            .await
            .unwrap();
        assert_eq!(moved.date, days_from_today(14));

        let too_far = PresencePatch {
            status: None,
            date: Some(days_from_today(15)),
        };
        assert!(matches!(
            service.update_presence_entry(ann.id, entry.id, too_far).await,
            Err(AppError::DateOutOfRange)
        ));

        let yesterday = PresencePatch {
            status: None,
            date: Some(days_from_today(-1)),
        };
        assert!(matches!(
            service.update_presence_entry(ann.id, entry.id, yesterday).await,
            Err(AppError::DateOutOfRange)
        ));

        let status_only = PresencePatch {
            status: Some(PresenceStatus::OnVacation),
            date: None,
        };
        let updated = service
            .update_presence_entry(ann.id, entry.id, status_only)
            .await
            .unwrap();
        assert_eq!(updated.date, days_from_today(14));
        assert_eq!(updated.status, PresenceStatus::OnVacation);

        assert!(matches!(
            service.update_presence_entry(ann.id, 999, PresencePatch::default()).await,
            Err(AppError::EntryNotFound)
        ));
    }

    #[actix_web::test]
    async fn update_onto_occupied_day_hits_unique_key() {
        let service = service();
        let ann = register(&service, "Ann", Role::TeamMember).await;
        let first = service
            .create_presence_entry(ann.id, ann.id, PresenceStatus::InOffice, days_from_today(1))
            .await
            .unwrap();
        service
            .create_presence_entry(ann.id, ann.id, PresenceStatus::InOffice, days_from_today(2))
            .await
            .unwrap();

        let patch = PresencePatch {
            status: None,
            date: Some(days_from_today(2)),
        };
        assert!(matches!(
            service.update_presence_entry(ann.id, first.id, patch).await,
            Err(AppError::DuplicateEntry)
        ));
    }

    #[actix_web::test]
    async fn listing_narrows_or_denies_team_members() {
        let service = service();
        let boss = register(&service, "Boss", Role::Manager).await;
        let ann = register(&service, "Ann", Role::TeamMember).await;
        let bob = register(&service, "Bob", Role::TeamMember).await;
        let (start, end) = (fixed_today(), days_from_today(6));

        for user in [&ann, &bob] {
            service
                .create_presence_entry(
                    user.id,
                    user.id,
                    PresenceStatus::InOffice,
                    days_from_today(1),
                )
                .await
                .unwrap();
        }
        service
            .create_presence_entry(ann.id, ann.id, PresenceStatus::InOffice, days_from_today(9))
            .await
            .unwrap();

        let own = service.list_presence_entries(ann.id, start, end, None).await.unwrap();
        assert_eq!(own.len(), 1);
        assert!(own.iter().all(|e| e.user_id == ann.id));

        assert!(matches!(
            service.list_presence_entries(ann.id, start, end, Some(bob.id)).await,
            Err(AppError::PermissionDenied(_))
        ));

        let everyone = service.list_presence_entries(boss.id, start, end, None).await.unwrap();
        assert_eq!(everyone.len(), 2);
        let just_bob = service
            .list_presence_entries(boss.id, start, end, Some(bob.id))
            .await
            .unwrap();
        assert_eq!(just_bob.len(), 1);

        assert!(matches!(
            service.list_presence_entries(boss.id, end, start, None).await,
            Err(AppError::InvalidInput(_))
        ));
    }
}
