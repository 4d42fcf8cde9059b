//! Personal notifications.

use crate::domain::notification::Notification;
use crate::domain::role::Section;
use crate::domain::types::NotificationId;
use crate::forms::notifications::{NotificationForm, NotificationPatch};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{NotificationReader, NotificationWriter};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section};

pub fn list_notifications<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Notification>>
where
    R: NotificationReader + ?Sized,
{
    ensure_section(user, Section::Notifications)?;
    Ok(repo.list_notifications(caller_id(user)?)?)
}

pub fn get_notification<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<Notification>
where
    R: NotificationReader + ?Sized,
{
    ensure_section(user, Section::Notifications)?;
    let caller = caller_id(user)?;
    repo.get_notification_by_id(NotificationId::new(id)?)?
        .filter(|notification| notification.user_id == caller)
        .ok_or(ServiceError::NotFound)
}

/// Creates a notification for the named user, or for the caller when the form
/// names nobody.
pub fn create_notification<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: NotificationForm,
) -> ServiceResult<Notification>
where
    R: NotificationWriter + ?Sized,
{
    ensure_section(user, Section::Notifications)?;

    let new_notification = form.into_domain(caller_id(user)?)?;
    repo.create_notification(&new_notification).map_err(|err| {
        log::error!("Failed to create notification: {err}");
        ServiceError::from(err)
    })
}

/// Sets the read flag, the only mutable field of a notification.
pub fn set_read<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: NotificationPatch,
) -> ServiceResult<Notification>
where
    R: NotificationReader + NotificationWriter + ?Sized,
{
    let notification = get_notification(repo, user, id)?;
    repo.set_notification_read(notification.id, patch.is_read)
        .map_err(|err| {
            log::error!("Failed to update notification {id}: {err}");
            ServiceError::from(err)
        })
}

/// Marks every notification of the caller as read and returns how many changed.
pub fn mark_all_read<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<usize>
where
    R: NotificationWriter + ?Sized,
{
    ensure_section(user, Section::Notifications)?;

    let caller = caller_id(user)?;
    repo.mark_all_notifications_read(caller).map_err(|err| {
        log::error!("Failed to mark notifications of {caller} as read: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_notification<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: NotificationReader + NotificationWriter + ?Sized,
{
    let notification = get_notification(repo, user, id)?;
    repo.delete_notification(notification.id).map_err(|err| {
        log::error!("Failed to delete notification {id}: {err}");
        ServiceError::from(err)
    })
}

/// Unread notifications among an already-loaded list.
pub fn count_unread(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::domain::types::{Title, UserId};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{timestamp, user};

    fn notification(owner: i32, is_read: bool) -> Notification {
        Notification {
            id: NotificationId::new(5).unwrap(),
            user_id: UserId::new(owner).unwrap(),
            title: Title::new("お知らせ").unwrap(),
            body: None,
            link: None,
            is_read,
            created_at: timestamp(),
        }
    }

    #[test]
    fn read_flag_is_set_on_own_notification() {
        let mut repo = MockRepository::new();
        repo.expect_get_notification_by_id()
            .returning(|_| Ok(Some(notification(3, false))));
        repo.expect_set_notification_read()
            .withf(|_, is_read| *is_read)
            .times(1)
            .returning(|_, _| Ok(notification(3, true)));

        let updated =
            set_read(&repo, &user(3, Role::Client), 5, NotificationPatch { is_read: true }).unwrap();
        assert!(updated.is_read);
    }

    #[test]
    fn foreign_notification_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_notification_by_id()
            .returning(|_| Ok(Some(notification(4, false))));
        repo.expect_set_notification_read().never();

        let result = set_read(&repo, &user(3, Role::Admin), 5, NotificationPatch { is_read: true });
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn mark_all_targets_the_caller() {
        let mut repo = MockRepository::new();
        repo.expect_mark_all_notifications_read()
            .withf(|user_id| user_id.get() == 3)
            .times(1)
            .returning(|_| Ok(2));

        assert_eq!(mark_all_read(&repo, &user(3, Role::Staff)).unwrap(), 2);
    }

    #[test]
    fn unread_count_ignores_read_items() {
        let list = vec![notification(3, false), notification(3, true), notification(3, false)];
        assert_eq!(count_unread(&list), 2);
    }
}
