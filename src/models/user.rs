//! Diesel models for application users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{Email, PersonName, TypeConstraintError, UserId};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub department: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub department: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(user.id)?,
            name: PersonName::new(user.name)?,
            email: Email::new(user.email)?,
            role: user.role.parse()?,
            department: user.department,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            role: user.role.as_str(),
            department: user.department.as_deref(),
        }
    }
}

impl<'a> UpdateUser<'a> {
    pub fn new(user: &'a DomainNewUser, now: NaiveDateTime) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            role: user.role.as_str(),
            department: user.department.as_deref(),
            updated_at: now,
        }
    }
}
