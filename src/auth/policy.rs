//! Authorization rules for presence data.
//!
//! Every function takes records that were already fetched; none of them
//! touch the store. Denials come back as [`AppError::PermissionDenied`].

use crate::{
    error::AppError,
    model::{presence::PresenceEntry, user::User},
};

/// Users write their own days; managers may write anyone's.
pub fn authorize_create(actor: &User, target_user_id: u64) -> Result<(), AppError> {
    if actor.id == target_user_id || actor.role.is_manager() {
        Ok(())
    } else {
        Err(AppError::denied(
            "Only managers can create presence entries for other users",
        ))
    }
}

/// Owner, original creator, or any manager.
pub fn authorize_modify(actor: &User, entry: &PresenceEntry) -> Result<(), AppError> {
    if actor.id == entry.user_id || actor.id == entry.created_by || actor.role.is_manager() {
        Ok(())
    } else {
        Err(AppError::denied(
            "Insufficient permissions to modify this presence entry",
        ))
    }
}

/// Resolves the user filter for an entry listing.
///
/// `None` in the result means "all users". Team members asking for nobody in
/// particular are narrowed to themselves; naming someone else is an error.
pub fn entry_list_scope(actor: &User, requested: Option<u64>) -> Result<Option<u64>, AppError> {
    match requested {
        Some(user_id) if user_id != actor.id && !actor.role.is_manager() => Err(AppError::denied(
            "Team members can only view their own presence entries",
        )),
        Some(user_id) => Ok(Some(user_id)),
        None if actor.role.is_manager() => Ok(None),
        None => Ok(Some(actor.id)),
    }
}

pub fn authorize_list_users(actor: &User) -> Result<(), AppError> {
    if actor.role.is_manager() {
        Ok(())
    } else {
        Err(AppError::denied("Manager role required"))
    }
}

/// Which users a dashboard shows: everyone for managers, self otherwise.
pub fn dashboard_scope(actor: &User) -> Option<u64> {
    if actor.role.is_manager() {
        None
    } else {
        Some(actor.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{presence::PresenceStatus, role::Role};
    use chrono::{NaiveDate, Utc};

    fn user(id: u64, role: Role) -> User {
        User {
            id,
            email: format!("u{id}@team.io"),
            name: format!("User {id}"),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn entry(user_id: u64, created_by: u64) -> PresenceEntry {
        PresenceEntry {
            id: 1,
            user_id,
            status: PresenceStatus::InOffice,
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            created_by,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn create_for_self_or_as_manager() {
        let member = user(2, Role::TeamMember);
        let manager = user(1, Role::Manager);

        assert!(authorize_create(&member, 2).is_ok());
        assert!(matches!(
            authorize_create(&member, 3),
            Err(AppError::PermissionDenied(_))
        ));
        assert!(authorize_create(&manager, 3).is_ok());
    }

    #[test]
    fn modify_allows_owner_creator_and_manager() {
        let owner = user(2, Role::TeamMember);
        let creator = user(4, Role::TeamMember);
        let stranger = user(3, Role::TeamMember);
        let manager = user(1, Role::Manager);
        let e = entry(2, 4);

        assert!(authorize_modify(&owner, &e).is_ok());
        assert!(authorize_modify(&creator, &e).is_ok());
        assert!(authorize_modify(&manager, &e).is_ok());
        assert!(matches!(
            authorize_modify(&stranger, &e),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn list_scope_narrows_team_members() {
        let member = user(2, Role::TeamMember);
        let manager = user(1, Role::Manager);

        assert_eq!(entry_list_scope(&member, None).unwrap(), Some(2));
        assert_eq!(entry_list_scope(&member, Some(2)).unwrap(), Some(2));
        assert!(matches!(
            entry_list_scope(&member, Some(3)),
            Err(AppError::PermissionDenied(_))
        ));

        assert_eq!(entry_list_scope(&manager, None).unwrap(), None);
        assert_eq!(entry_list_scope(&manager, Some(3)).unwrap(), Some(3));
    }

    #[test]
    fn only_managers_list_users() {
        assert!(authorize_list_users(&user(1, Role::Manager)).is_ok());
        assert!(authorize_list_users(&user(2, Role::TeamMember)).is_err());
        assert_eq!(dashboard_scope(&user(2, Role::TeamMember)), Some(2));
        assert_eq!(dashboard_scope(&user(1, Role::Manager)), None);
    }
}
