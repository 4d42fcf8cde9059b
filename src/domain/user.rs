//! Application users and their roles.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::domain::types::{Email, PersonName, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: Email,
    pub role: Role,
    pub department: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to register or fully update a user.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub name: PersonName,
    pub email: Email,
    pub role: Role,
    pub department: Option<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(name: PersonName, email: Email, role: Role, department: Option<String>) -> Self {
        Self {
            name,
            email,
            role,
            department: crate::domain::types::non_blank(department),
        }
    }
}

pub type UpdateUser = NewUser;
