//! Per-user notifications.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Link, NotificationId, Title, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: Title,
    pub body: Option<String>,
    pub link: Option<Link>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub title: Title,
    pub body: Option<String>,
    pub link: Option<Link>,
}
