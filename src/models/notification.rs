//! Diesel models for in-app notifications.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::notification::{
    NewNotification as DomainNewNotification, Notification as DomainNotification,
};
use crate::domain::types::{Link, NotificationId, Title, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub body: Option<String>,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub body: Option<&'a str>,
    pub link: Option<&'a str>,
}

impl TryFrom<Notification> for DomainNotification {
    type Error = TypeConstraintError;

    fn try_from(row: Notification) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NotificationId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            title: Title::new(row.title)?,
            body: row.body,
            link: row.link.map(Link::new).transpose()?,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewNotification> for NewNotification<'a> {
    fn from(notification: &'a DomainNewNotification) -> Self {
        Self {
            user_id: notification.user_id.get(),
            title: notification.title.as_str(),
            body: notification.body.as_deref(),
            link: notification.link.as_ref().map(Link::as_str),
        }
    }
}
