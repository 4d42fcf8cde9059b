use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use validator::Validate;

use crate::domain::chat::{Conversation, NewChatGroup, NewMessage};
use crate::domain::types::{ChatGroupId, RichText, Title, UserId, non_blank};
use crate::forms::{FormError, optional_id, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
/// JSON message body. Exactly one of `recipient_id` and `group_id` is set.
pub struct MessageForm {
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub body: String,
    pub recipient_id: Option<i32>,
    pub group_id: Option<i32>,
    pub attachment_name: Option<String>,
}

impl MessageForm {
    pub fn into_domain(self, sender_id: UserId) -> Result<NewMessage, FormError> {
        let form = validated(self)?;
        let conversation =
            Conversation::from_parts(optional_id(form.recipient_id)?, optional_id(form.group_id)?)?;
        let attachment_name = non_blank(form.attachment_name);
        let body = match (non_blank(Some(form.body)), &attachment_name) {
            (Some(body), _) => body,
            (None, Some(name)) => name.clone(),
            (None, None) => {
                return Err(FormError::Invalid(
                    "メッセージを入力してください".to_string(),
                ));
            }
        };
        Ok(NewMessage::try_new(
            sender_id,
            conversation,
            RichText::new(body)?,
            attachment_name,
        )?)
    }
}

#[derive(MultipartForm)]
/// Multipart variant used when a file is attached. Only the file name is kept.
pub struct MessageUploadForm {
    pub body: Option<Text<String>>,
    pub recipient_id: Option<Text<i32>>,
    pub group_id: Option<Text<i32>>,
    #[multipart(limit = "25MB")]
    pub file: Option<TempFile>,
}

impl From<MessageUploadForm> for MessageForm {
    fn from(form: MessageUploadForm) -> Self {
        Self {
            body: form.body.map(Text::into_inner).unwrap_or_default(),
            recipient_id: form.recipient_id.map(Text::into_inner),
            group_id: form.group_id.map(Text::into_inner),
            attachment_name: form.file.and_then(|file| file.file_name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
/// `?with=<user_id>` or `?group=<group_id>`.
pub struct ConversationQuery {
    pub with: Option<i32>,
    pub group: Option<i32>,
}

impl TryFrom<ConversationQuery> for Conversation {
    type Error = FormError;

    fn try_from(query: ConversationQuery) -> Result<Self, Self::Error> {
        Ok(Conversation::from_parts(
            optional_id::<UserId>(query.with)?,
            optional_id::<ChatGroupId>(query.group)?,
        )?)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatGroupForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<i32>,
}

impl ChatGroupForm {
    pub fn into_domain(self, created_by: UserId) -> Result<NewChatGroup, FormError> {
        let form = validated(self)?;
        let members = form
            .member_ids
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewChatGroup::new(Title::new(form.name)?, created_by, members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(id: i32) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn message_needs_one_target() {
        let form = MessageForm {
            body: "こんにちは".into(),
            recipient_id: Some(2),
            group_id: Some(1),
            attachment_name: None,
        };
        assert!(form.into_domain(uid(1)).is_err());
    }

    #[test]
    fn attachment_only_message_uses_file_name() {
        let form = MessageForm {
            body: "  ".into(),
            recipient_id: Some(2),
            group_id: None,
            attachment_name: Some("見積書.pdf".into()),
        };
        let message = form.into_domain(uid(1)).unwrap();
        assert_eq!(message.body.as_str(), "見積書.pdf");
        assert_eq!(message.attachment_name.as_deref(), Some("見積書.pdf"));
    }

    #[test]
    fn empty_message_is_rejected() {
        let form = MessageForm {
            body: String::new(),
            recipient_id: Some(2),
            group_id: None,
            attachment_name: None,
        };
        assert!(form.into_domain(uid(1)).is_err());
    }

    #[test]
    fn query_selects_conversation() {
        let query = ConversationQuery {
            with: None,
            group: Some(4),
        };
        assert_eq!(
            Conversation::try_from(query).unwrap(),
            Conversation::Group(ChatGroupId::new(4).unwrap())
        );
    }
}
