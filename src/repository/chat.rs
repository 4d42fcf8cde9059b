//! Repository implementation for chat messages and groups.

use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::chat::{ChatGroup, Conversation, Message, NewChatGroup, NewMessage};
use crate::domain::types::{ChatGroupId, UserId};
use crate::models::chat::{
    ChatGroup as DbChatGroup, ChatGroupMember as DbChatGroupMember, Message as DbMessage,
    NewChatGroup as DbNewChatGroup, NewMessage as DbNewMessage,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ChatReader, ChatWriter, DieselRepository, into_domain};

fn attach_members(
    groups: Vec<DbChatGroup>,
    members: Vec<DbChatGroupMember>,
) -> RepositoryResult<Vec<ChatGroup>> {
    let mut by_group: HashMap<i32, Vec<i32>> = HashMap::new();
    for member in members {
        by_group
            .entry(member.group_id)
            .or_default()
            .push(member.user_id);
    }

    groups
        .into_iter()
        .map(|group| {
            let member_ids = by_group.remove(&group.id).unwrap_or_default();
            group.into_domain(member_ids)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(RepositoryError::from)
}

impl ChatReader for DieselRepository {
    fn list_messages(
        &self,
        viewer: UserId,
        conversation: Conversation,
    ) -> RepositoryResult<Vec<Message>> {
        use crate::schema::messages;

        let mut conn = self.conn()?;
        let mut items = messages::table.into_boxed();

        items = match conversation {
            Conversation::Direct(other) => items.filter(
                messages::sender_id
                    .eq(viewer.get())
                    .and(messages::recipient_id.eq(other.get()))
                    .or(messages::sender_id
                        .eq(other.get())
                        .and(messages::recipient_id.eq(viewer.get()))),
            ),
            Conversation::Group(group_id) => {
                items.filter(messages::group_id.eq(group_id.get()))
            }
        };

        let rows = items
            .order((messages::created_at.asc(), messages::id.asc()))
            .load::<DbMessage>(&mut conn)?;

        into_domain(rows)
    }

    fn count_unread_by_sender(&self, user_id: UserId) -> RepositoryResult<Vec<(UserId, usize)>> {
        use crate::schema::messages;
        use diesel::dsl::count_star;

        let mut conn = self.conn()?;
        let rows = messages::table
            .filter(messages::recipient_id.eq(user_id.get()))
            .filter(messages::is_read.eq(false))
            .group_by(messages::sender_id)
            .select((messages::sender_id, count_star()))
            .load::<(i32, i64)>(&mut conn)?;

        rows.into_iter()
            .map(|(sender, count)| -> RepositoryResult<(UserId, usize)> {
                Ok((UserId::new(sender)?, count as usize))
            })
            .collect()
    }

    fn get_chat_group_by_id(&self, id: ChatGroupId) -> RepositoryResult<Option<ChatGroup>> {
        use crate::schema::{chat_group_members, chat_groups};

        let mut conn = self.conn()?;
        let Some(group) = chat_groups::table
            .find(id.get())
            .first::<DbChatGroup>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        let members = chat_group_members::table
            .filter(chat_group_members::group_id.eq(group.id))
            .select(chat_group_members::user_id)
            .load::<i32>(&mut conn)?;

        group
            .into_domain(members)
            .map(Some)
            .map_err(RepositoryError::from)
    }

    fn list_chat_groups_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<ChatGroup>> {
        use crate::schema::{chat_group_members, chat_groups};

        let mut conn = self.conn()?;
        let groups = chat_groups::table
            .inner_join(chat_group_members::table)
            .filter(chat_group_members::user_id.eq(user_id.get()))
            .select(DbChatGroup::as_select())
            .order(chat_groups::name.asc())
            .load::<DbChatGroup>(&mut conn)?;

        let group_ids = groups.iter().map(|group| group.id).collect::<Vec<_>>();
        let members = chat_group_members::table
            .filter(chat_group_members::group_id.eq_any(group_ids))
            .load::<DbChatGroupMember>(&mut conn)?;

        attach_members(groups, members)
    }
}

impl ChatWriter for DieselRepository {
    fn create_message(&self, new_message: &NewMessage) -> RepositoryResult<Message> {
        use crate::schema::messages;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(messages::table)
            .values(DbNewMessage::from(new_message))
            .get_result::<DbMessage>(&mut conn)?;

        Message::try_from(row).map_err(RepositoryError::from)
    }

    fn mark_direct_messages_read(
        &self,
        reader: UserId,
        sender: UserId,
    ) -> RepositoryResult<usize> {
        use crate::schema::messages;

        let mut conn = self.conn()?;
        let affected = diesel::update(
            messages::table
                .filter(messages::recipient_id.eq(reader.get()))
                .filter(messages::sender_id.eq(sender.get()))
                .filter(messages::is_read.eq(false)),
        )
        .set(messages::is_read.eq(true))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn create_chat_group(&self, new_group: &NewChatGroup) -> RepositoryResult<ChatGroup> {
        use crate::schema::{chat_group_members, chat_groups};

        let mut conn = self.conn()?;
        let (group, members) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let group = diesel::insert_into(chat_groups::table)
                .values(DbNewChatGroup {
                    name: new_group.name.as_str(),
                    created_by: new_group.created_by.get(),
                })
                .get_result::<DbChatGroup>(conn)?;

            let mut members = Vec::with_capacity(new_group.member_ids.len());
            for user_id in &new_group.member_ids {
                diesel::insert_into(chat_group_members::table)
                    .values(DbChatGroupMember {
                        group_id: group.id,
                        user_id: user_id.get(),
                    })
                    .execute(conn)?;
                members.push(user_id.get());
            }

            Ok((group, members))
        })?;

        group.into_domain(members).map_err(RepositoryError::from)
    }
}
