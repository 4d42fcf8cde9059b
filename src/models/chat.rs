//! Diesel models for chat messages and groups.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::chat::{
    ChatGroup as DomainChatGroup, Conversation, Message as DomainMessage,
    NewMessage as DomainNewMessage,
};
use crate::domain::types::{ChatGroupId, MessageId, RichText, Title, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::messages)]
pub struct Message {
    pub id: i32,
    pub sender_id: i32,
    pub recipient_id: Option<i32>,
    pub group_id: Option<i32>,
    pub body: String,
    pub attachment_name: Option<String>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::messages)]
pub struct NewMessage<'a> {
    pub sender_id: i32,
    pub recipient_id: Option<i32>,
    pub group_id: Option<i32>,
    pub body: &'a str,
    pub attachment_name: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::chat_groups)]
pub struct ChatGroup {
    pub id: i32,
    pub name: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chat_groups)]
pub struct NewChatGroup<'a> {
    pub name: &'a str,
    pub created_by: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::chat_group_members)]
pub struct ChatGroupMember {
    pub group_id: i32,
    pub user_id: i32,
}

impl TryFrom<Message> for DomainMessage {
    type Error = TypeConstraintError;

    fn try_from(row: Message) -> Result<Self, Self::Error> {
        let conversation = Conversation::from_parts(
            row.recipient_id.map(UserId::new).transpose()?,
            row.group_id.map(ChatGroupId::new).transpose()?,
        )?;
        Ok(Self {
            id: MessageId::new(row.id)?,
            sender_id: UserId::new(row.sender_id)?,
            conversation,
            body: RichText::new(row.body)?,
            attachment_name: row.attachment_name,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewMessage> for NewMessage<'a> {
    fn from(message: &'a DomainNewMessage) -> Self {
        Self {
            sender_id: message.sender_id.get(),
            recipient_id: message.conversation.recipient_id().map(UserId::get),
            group_id: message.conversation.group_id().map(ChatGroupId::get),
            body: message.body.as_str(),
            attachment_name: message.attachment_name.as_deref(),
        }
    }
}

impl ChatGroup {
    /// Combine a group row with its member list.
    pub fn into_domain(self, members: Vec<i32>) -> Result<DomainChatGroup, TypeConstraintError> {
        let mut member_ids = members
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()?;
        member_ids.sort_unstable();
        Ok(DomainChatGroup {
            id: ChatGroupId::new(self.id)?,
            name: Title::new(self.name)?,
            created_by: UserId::new(self.created_by)?,
            member_ids,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn group_message_row_maps_to_group_conversation() {
        let row = Message {
            id: 1,
            sender_id: 2,
            recipient_id: None,
            group_id: Some(7),
            body: "こんにちは".into(),
            attachment_name: Some("議事録.pdf".into()),
            is_read: false,
            created_at: Utc::now().naive_utc(),
        };
        let message = DomainMessage::try_from(row).expect("valid message");
        assert_eq!(
            message.conversation,
            Conversation::Group(ChatGroupId::new(7).unwrap())
        );
    }

    #[test]
    fn message_row_without_target_is_rejected() {
        let row = Message {
            id: 1,
            sender_id: 2,
            recipient_id: None,
            group_id: None,
            body: "x".into(),
            attachment_name: None,
            is_read: false,
            created_at: Utc::now().naive_utc(),
        };
        assert!(DomainMessage::try_from(row).is_err());
    }

    #[test]
    fn group_members_are_sorted() {
        let group = ChatGroup {
            id: 1,
            name: "営業".into(),
            created_by: 3,
            created_at: Utc::now().naive_utc(),
        };
        let domain = group.into_domain(vec![5, 3, 1]).unwrap();
        let ids: Vec<i32> = domain.member_ids.iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
