//! Direct and group chat.

use std::collections::HashMap;

use crate::domain::chat::{ChatGroup, ChatUser, Conversation, Message};
use crate::domain::role::Section;
use crate::domain::types::{ChatGroupId, UserId};
use crate::forms::chat::{ChatGroupForm, ConversationQuery, MessageForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ChatReader, ChatWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section};

/// Loads the group and checks the caller belongs to it. Groups the caller is
/// not a member of are reported as missing.
fn member_group<R>(repo: &R, group_id: ChatGroupId, caller: UserId) -> ServiceResult<ChatGroup>
where
    R: ChatReader + ?Sized,
{
    repo.get_chat_group_by_id(group_id)?
        .filter(|group| group.member_ids.contains(&caller))
        .ok_or(ServiceError::NotFound)
}

/// Checks the other side of a conversation exists and the caller may use it.
fn ensure_conversation<R>(repo: &R, conversation: Conversation, caller: UserId) -> ServiceResult<()>
where
    R: ChatReader + UserReader + ?Sized,
{
    match conversation {
        Conversation::Direct(user_id) => {
            repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)?;
        }
        Conversation::Group(group_id) => {
            member_group(repo, group_id, caller)?;
        }
    }
    Ok(())
}

/// Every other user with the number of unread messages they sent the caller.
pub fn list_chat_users<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<ChatUser>>
where
    R: ChatReader + UserReader + ?Sized,
{
    ensure_section(user, Section::Chat)?;

    let caller = caller_id(user)?;
    let unread: HashMap<UserId, usize> = repo.count_unread_by_sender(caller)?.into_iter().collect();
    Ok(repo
        .list_users()?
        .iter()
        .filter(|other| other.id != caller)
        .map(|other| ChatUser::new(other, unread.get(&other.id).copied().unwrap_or(0)))
        .collect())
}

/// Returns the conversation oldest first and marks the direct messages the
/// caller received in it as read.
pub fn list_messages<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ConversationQuery,
) -> ServiceResult<Vec<Message>>
where
    R: ChatReader + ChatWriter + UserReader + ?Sized,
{
    ensure_section(user, Section::Chat)?;

    let caller = caller_id(user)?;
    let conversation = Conversation::try_from(query)?;
    ensure_conversation(repo, conversation, caller)?;

    let messages = repo.list_messages(caller, conversation)?;
    if let Conversation::Direct(other) = conversation {
        let unread = messages
            .iter()
            .any(|message| message.sender_id == other && !message.is_read);
        if unread {
            repo.mark_direct_messages_read(caller, other).map_err(|err| {
                log::error!("Failed to mark messages from {other} as read: {err}");
                ServiceError::from(err)
            })?;
        }
    }
    Ok(messages)
}

pub fn send_message<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: MessageForm,
) -> ServiceResult<Message>
where
    R: ChatReader + ChatWriter + UserReader + ?Sized,
{
    ensure_section(user, Section::Chat)?;

    let caller = caller_id(user)?;
    let new_message = form.into_domain(caller)?;
    ensure_conversation(repo, new_message.conversation, caller)?;

    repo.create_message(&new_message).map_err(|err| {
        log::error!("Failed to send message: {err}");
        ServiceError::from(err)
    })
}

/// Total unread direct messages addressed to the caller.
pub fn unread_total<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<usize>
where
    R: ChatReader + ?Sized,
{
    ensure_section(user, Section::Chat)?;
    let caller = caller_id(user)?;
    Ok(repo
        .count_unread_by_sender(caller)?
        .into_iter()
        .map(|(_, count)| count)
        .sum())
}

pub fn list_groups<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<ChatGroup>>
where
    R: ChatReader + ?Sized,
{
    ensure_section(user, Section::Chat)?;
    Ok(repo.list_chat_groups_for_user(caller_id(user)?)?)
}

pub fn create_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ChatGroupForm,
) -> ServiceResult<ChatGroup>
where
    R: ChatWriter + ?Sized,
{
    ensure_section(user, Section::Chat)?;

    let new_group = form.into_domain(caller_id(user)?)?;
    repo.create_chat_group(&new_group).map_err(|err| {
        log::error!("Failed to create chat group: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::role::Role;
    use crate::domain::types::{Email, MessageId, PersonName, RichText, Title};
    use crate::domain::user::User;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{timestamp, user};

    fn uid(id: i32) -> UserId {
        UserId::new(id).unwrap()
    }

    fn stored_user(id: i32) -> User {
        User {
            id: uid(id),
            name: PersonName::new(format!("ユーザー{id}")).unwrap(),
            email: Email::new(format!("user{id}@example.jp")).unwrap(),
            role: Role::Staff,
            department: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn group(members: &[i32]) -> ChatGroup {
        ChatGroup {
            id: ChatGroupId::new(1).unwrap(),
            name: Title::new("営業チーム").unwrap(),
            created_by: uid(members[0]),
            member_ids: members.iter().copied().map(uid).collect(),
            created_at: timestamp(),
        }
    }

    fn message(sender: i32, conversation: Conversation, is_read: bool) -> Message {
        Message {
            id: MessageId::new(1).unwrap(),
            sender_id: uid(sender),
            conversation,
            body: RichText::new("こんにちは").unwrap(),
            attachment_name: None,
            is_read,
            created_at: timestamp(),
        }
    }

    #[test]
    fn chat_users_exclude_caller_and_carry_unread_counts() {
        let mut repo = MockRepository::new();
        repo.expect_count_unread_by_sender()
            .returning(|_| Ok(vec![(UserId::new(2).unwrap(), 3)]));
        repo.expect_list_users()
            .returning(|| Ok(vec![stored_user(1), stored_user(2), stored_user(3)]));

        let users = list_chat_users(&repo, &user(1, Role::Staff)).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].unread, 3);
        assert_eq!(users[1].unread, 0);
    }

    #[test]
    fn reading_direct_conversation_marks_it_read() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(stored_user(id.get()))));
        repo.expect_list_messages()
            .returning(|_, conversation| Ok(vec![message(2, conversation, false)]));
        repo.expect_mark_direct_messages_read()
            .withf(|reader, sender| reader.get() == 1 && sender.get() == 2)
            .times(1)
            .returning(|_, _| Ok(1));

        let query = ConversationQuery {
            with: Some(2),
            group: None,
        };
        let messages = list_messages(&repo, &user(1, Role::Staff), query).unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn posting_to_foreign_group_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_chat_group_by_id()
            .returning(|_| Ok(Some(group(&[2, 3]))));
        repo.expect_create_message().never();

        let form: MessageForm =
            serde_json::from_value(json!({ "body": "失礼します", "group_id": 1 })).unwrap();
        let result = send_message(&repo, &user(1, Role::Staff), form);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn message_needs_exactly_one_target() {
        let mut repo = MockRepository::new();
        repo.expect_create_message().never();

        let form: MessageForm = serde_json::from_value(json!({
            "body": "両方",
            "recipient_id": 2,
            "group_id": 1
        }))
        .unwrap();
        let result = send_message(&repo, &user(1, Role::Staff), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn unread_total_sums_all_senders() {
        let mut repo = MockRepository::new();
        repo.expect_count_unread_by_sender()
            .returning(|_| Ok(vec![(UserId::new(2).unwrap(), 3), (UserId::new(4).unwrap(), 2)]));

        assert_eq!(unread_total(&repo, &user(1, Role::Client)).unwrap(), 5);
    }

    #[test]
    fn new_group_includes_creator() {
        let mut repo = MockRepository::new();
        repo.expect_create_chat_group()
            .withf(|group| group.member_ids.contains(&UserId::new(1).unwrap()))
            .times(1)
            .returning(|_| Ok(group(&[1, 2])));

        let form: ChatGroupForm =
            serde_json::from_value(json!({ "name": "営業チーム", "member_ids": [2] })).unwrap();
        create_group(&repo, &user(1, Role::Manager), form).unwrap();
    }
}
