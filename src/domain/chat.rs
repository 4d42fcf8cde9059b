//! Internal chat: direct messages, groups and unread counters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ChatGroupId, MessageId, PersonName, RichText, Title, TypeConstraintError, UserId,
};
use crate::domain::user::User;

/// Where a message is delivered.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Conversation {
    Direct(UserId),
    Group(ChatGroupId),
}

impl Conversation {
    /// Builds the target from the two optional ids of a request; exactly one
    /// must be present.
    pub fn from_parts(
        recipient_id: Option<UserId>,
        group_id: Option<ChatGroupId>,
    ) -> Result<Self, TypeConstraintError> {
        match (recipient_id, group_id) {
            (Some(user), None) => Ok(Conversation::Direct(user)),
            (None, Some(group)) => Ok(Conversation::Group(group)),
            _ => Err(TypeConstraintError::InvalidValue(
                "message needs exactly one of recipient or group".to_string(),
            )),
        }
    }

    pub fn recipient_id(self) -> Option<UserId> {
        match self {
            Conversation::Direct(user) => Some(user),
            Conversation::Group(_) => None,
        }
    }

    pub fn group_id(self) -> Option<ChatGroupId> {
        match self {
            Conversation::Direct(_) => None,
            Conversation::Group(group) => Some(group),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub conversation: Conversation,
    pub body: RichText,
    pub attachment_name: Option<String>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub conversation: Conversation,
    pub body: RichText,
    pub attachment_name: Option<String>,
}

impl NewMessage {
    /// Rejects messages the sender addresses to themselves.
    pub fn try_new(
        sender_id: UserId,
        conversation: Conversation,
        body: RichText,
        attachment_name: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        if conversation == Conversation::Direct(sender_id) {
            return Err(TypeConstraintError::InvalidValue(
                "cannot message yourself".to_string(),
            ));
        }
        Ok(Self {
            sender_id,
            conversation,
            body,
            attachment_name: crate::domain::types::non_blank(attachment_name),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatGroup {
    pub id: ChatGroupId,
    pub name: Title,
    pub created_by: UserId,
    pub member_ids: Vec<UserId>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewChatGroup {
    pub name: Title,
    pub created_by: UserId,
    pub member_ids: Vec<UserId>,
}

impl NewChatGroup {
    /// The creator is always a member; duplicates are removed.
    #[must_use]
    pub fn new(name: Title, created_by: UserId, members: Vec<UserId>) -> Self {
        let mut member_ids = members;
        member_ids.push(created_by);
        member_ids.sort_unstable();
        member_ids.dedup();
        Self {
            name,
            created_by,
            member_ids,
        }
    }
}

/// A chat partner as listed in the sidebar of the chat page.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatUser {
    pub id: UserId,
    pub name: PersonName,
    pub role: crate::domain::role::Role,
    pub unread: usize,
}

impl ChatUser {
    pub fn new(user: &User, unread: usize) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
            unread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(id: i32) -> UserId {
        UserId::new(id).expect("valid id")
    }

    #[test]
    fn conversation_requires_exactly_one_target() {
        let group = ChatGroupId::new(3).unwrap();
        assert!(Conversation::from_parts(None, None).is_err());
        assert!(Conversation::from_parts(Some(uid(1)), Some(group)).is_err());
        assert_eq!(
            Conversation::from_parts(None, Some(group)).unwrap(),
            Conversation::Group(group)
        );
    }

    #[test]
    fn cannot_message_self() {
        let body = RichText::new("hi").unwrap();
        assert!(NewMessage::try_new(uid(1), Conversation::Direct(uid(1)), body.clone(), None).is_err());
        assert!(NewMessage::try_new(uid(1), Conversation::Direct(uid(2)), body, None).is_ok());
    }

    #[test]
    fn group_always_includes_creator() {
        let group = NewChatGroup::new(Title::new("営業").unwrap(), uid(5), vec![uid(2), uid(2)]);
        assert_eq!(group.member_ids, vec![uid(2), uid(5)]);
    }
}
