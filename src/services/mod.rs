//! Business services.
//!
//! Every service takes the repository as a generic `R: Trait + ?Sized`, the
//! authenticated caller and raw form input. It checks the caller's section,
//! validates the input, applies ownership rules and returns domain entities or
//! page data. Routes only translate the outcome into HTTP.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::domain::role::Section;
use crate::domain::types::{TypeConstraintError, UserId};
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod agency;
pub mod ai;
pub mod businesses;
pub mod chat;
pub mod clients;
pub mod customers;
pub mod dashboard;
pub mod employees;
pub mod leads;
pub mod memos;
pub mod notifications;
pub mod seo_articles;
pub mod tasks;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller's role does not grant the required section or record.
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(RepositoryError),

    /// The AI backend failed or answered with an unusable payload.
    #[error("{0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless the caller's role shows
/// the section.
pub fn ensure_section(user: &AuthenticatedUser, section: Section) -> ServiceResult<()> {
    if user.role.can_access(section) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Identifier of the caller's `users` row.
pub fn caller_id(user: &AuthenticatedUser) -> ServiceResult<UserId> {
    user.user_id().map_err(|err| {
        log::error!("Token subject {} is not a user id: {err}", user.sub);
        ServiceError::Unauthorized
    })
}

/// Overlays the fields of a JSON object onto the stored record and reads the
/// result back as the full edit form.
pub fn merge_patch<T, F>(current: &T, patch: Value) -> ServiceResult<F>
where
    T: Serialize,
    F: DeserializeOwned,
{
    let Value::Object(changes) = patch else {
        return Err(ServiceError::Form(
            "変更内容はJSONオブジェクトで指定してください".to_string(),
        ));
    };

    let mut merged =
        serde_json::to_value(current).map_err(|err| ServiceError::Internal(err.to_string()))?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(changes);
    }

    serde_json::from_value(merged).map_err(|err| ServiceError::Form(err.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::role::Role;
    use crate::models::auth::AuthenticatedUser;

    pub fn user(id: i32, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: id.to_string(),
            email: format!("user{id}@example.jp"),
            name: format!("ユーザー{id}"),
            role,
            exp: 0,
        }
    }

    pub fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 1)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("valid timestamp")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::test_support::user;
    use super::*;
    use crate::domain::role::Role;

    #[derive(Serialize)]
    struct Stored {
        id: i32,
        title: String,
        status: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Edit {
        title: String,
        status: String,
    }

    fn stored() -> Stored {
        Stored {
            id: 7,
            title: "見積書".into(),
            status: "todo".into(),
        }
    }

    #[test]
    fn patch_overwrites_only_named_fields() {
        let edit: Edit = merge_patch(&stored(), json!({ "status": "done" })).unwrap();
        assert_eq!(
            edit,
            Edit {
                title: "見積書".into(),
                status: "done".into()
            }
        );
    }

    #[test]
    fn patch_must_be_an_object() {
        let result: ServiceResult<Edit> = merge_patch(&stored(), json!(["done"]));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn patch_with_wrong_type_is_a_form_error() {
        let result: ServiceResult<Edit> = merge_patch(&stored(), json!({ "title": 5 }));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn section_check_follows_role_menu() {
        assert!(ensure_section(&user(1, Role::Manager), Section::Customers).is_ok());
        assert!(matches!(
            ensure_section(&user(1, Role::Staff), Section::Customers),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn repository_not_found_becomes_service_not_found() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
    }

    #[test]
    fn caller_id_rejects_non_numeric_subject() {
        let mut caller = user(1, Role::Admin);
        caller.sub = "abc".into();
        assert!(matches!(caller_id(&caller), Err(ServiceError::Unauthorized)));
    }
}
