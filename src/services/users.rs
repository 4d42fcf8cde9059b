//! User administration (admin and CEO only).

use serde_json::Value;

use crate::domain::role::Section;
use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::forms::users::UserForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{UserReader, UserWriter};
use crate::services::{
    ServiceError, ServiceResult, caller_id, ensure_section, merge_patch,
};

pub fn list_users<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    ensure_section(user, Section::Users)?;
    Ok(repo.list_users()?)
}

pub fn get_user<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    ensure_section(user, Section::Users)?;
    repo.get_user_by_id(UserId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

fn ensure_email_free<R>(repo: &R, new_user: &NewUser, except: Option<UserId>) -> ServiceResult<()>
where
    R: UserReader + ?Sized,
{
    match repo.get_user_by_email(&new_user.email)? {
        Some(existing) if Some(existing.id) != except => Err(ServiceError::Form(format!(
            "{} は既に登録されています",
            new_user.email
        ))),
        _ => Ok(()),
    }
}

pub fn create_user<R>(repo: &R, user: &AuthenticatedUser, form: UserForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_section(user, Section::Users)?;

    let new_user = NewUser::try_from(form)?;
    ensure_email_free(repo, &new_user, None)?;

    repo.create_user(&new_user).map_err(|err| {
        log::error!("Failed to create user: {err}");
        ServiceError::from(err)
    })
}

pub fn update_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_section(user, Section::Users)?;

    let id = UserId::new(id)?;
    let updates = NewUser::try_from(form)?;
    ensure_email_free(repo, &updates, Some(id))?;

    repo.update_user(id, &updates).map_err(|err| {
        log::error!("Failed to update user {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let current = get_user(repo, user, id)?;
    let form: UserForm = merge_patch(&current, patch)?;
    update_user(repo, user, id, form)
}

pub fn delete_user<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_section(user, Section::Users)?;

    let id = UserId::new(id)?;
    if caller_id(user)? == id {
        return Err(ServiceError::Form(
            "自分自身のアカウントは削除できません".to_string(),
        ));
    }

    repo.delete_user(id).map_err(|err| {
        log::error!("Failed to delete user {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::role::Role;
    use crate::domain::types::{Email, PersonName};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{timestamp, user};

    fn stored(id: i32, email: &str) -> User {
        User {
            id: UserId::new(id).unwrap(),
            name: PersonName::new("高橋").unwrap(),
            email: Email::new(email).unwrap(),
            role: Role::Staff,
            department: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn form(email: &str) -> UserForm {
        UserForm {
            name: "高橋".into(),
            email: email.into(),
            role: "staff".into(),
            department: None,
        }
    }

    #[test]
    fn managers_cannot_list_users() {
        let repo = MockRepository::new();
        let result = list_users(&repo, &user(1, Role::Manager));
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn duplicate_email_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored(2, "taken@example.jp"))));
        repo.expect_create_user().never();

        let result = create_user(&repo, &user(1, Role::Admin), form("taken@example.jp"));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn updating_keeps_own_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored(2, "self@example.jp"))));
        repo.expect_update_user()
            .times(1)
            .returning(|_, _| Ok(stored(2, "self@example.jp")));

        let result = update_user(&repo, &user(1, Role::Ceo), 2, form("self@example.jp"));
        assert!(result.is_ok());
    }

    #[test]
    fn patch_changes_only_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|_| Ok(Some(stored(2, "b@example.jp"))));
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored(2, "b@example.jp"))));
        repo.expect_update_user()
            .withf(|_, updates| {
                updates.role == Role::Manager && updates.email.as_str() == "b@example.jp"
            })
            .times(1)
            .returning(|_, _| Ok(stored(2, "b@example.jp")));

        let result = patch_user(&repo, &user(1, Role::Admin), 2, json!({ "role": "manager" }));
        assert!(result.is_ok());
    }

    #[test]
    fn admin_cannot_delete_self() {
        let mut repo = MockRepository::new();
        repo.expect_delete_user().never();
        let result = delete_user(&repo, &user(1, Role::Admin), 1);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
