use serde::Deserialize;
use validator::Validate;

use crate::domain::notification::NewNotification;
use crate::domain::types::{Link, Title, UserId, non_blank};
use crate::forms::{FormError, optional_id, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NotificationForm {
    /// Recipient; the caller when omitted.
    pub user_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub body: Option<String>,
    pub link: Option<String>,
}

impl NotificationForm {
    pub fn into_domain(self, caller: UserId) -> Result<NewNotification, FormError> {
        let form = validated(self)?;
        Ok(NewNotification {
            user_id: optional_id(form.user_id)?.unwrap_or(caller),
            title: Title::new(form.title)?,
            body: non_blank(form.body),
            link: non_blank(form.link).map(Link::new).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
/// The only change a notification accepts after creation.
pub struct NotificationPatch {
    pub is_read: bool,
}
