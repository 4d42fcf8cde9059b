use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, PersonName};
use crate::domain::user::NewUser;
use crate::forms::{FormError, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
/// Create or edit an application user.
pub struct UserForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    /// Role key such as `manager` or `client`.
    #[serde(default)]
    pub role: String,
    pub department: Option<String>,
}

impl TryFrom<UserForm> for NewUser {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        Ok(NewUser::new(
            PersonName::new(form.name)?,
            Email::new(form.email)?,
            form.role.parse()?,
            form.department,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;

    fn form(role: &str) -> UserForm {
        UserForm {
            name: "山田 太郎".into(),
            email: "Yamada@Example.JP".into(),
            role: role.into(),
            department: Some(" ".into()),
        }
    }

    #[test]
    fn valid_form_builds_user() {
        let user = NewUser::try_from(form("staff")).unwrap();
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.email.as_str(), "yamada@example.jp");
        assert_eq!(user.department, None);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(NewUser::try_from(form("owner")).is_err());
    }
}
