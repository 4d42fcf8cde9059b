//! Diesel models for calendar memos.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::memo::{Memo as DomainMemo, NewMemo as DomainNewMemo, UpdateMemo as DomainUpdateMemo};
use crate::domain::types::{MemoId, RichText, Title, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::memos)]
pub struct Memo {
    pub id: i32,
    pub user_id: i32,
    pub memo_date: NaiveDate,
    pub title: String,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::memos)]
pub struct NewMemo<'a> {
    pub user_id: i32,
    pub memo_date: NaiveDate,
    pub title: &'a str,
    pub content: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::memos)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateMemo<'a> {
    pub memo_date: NaiveDate,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Memo> for DomainMemo {
    type Error = TypeConstraintError;

    fn try_from(row: Memo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemoId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            memo_date: row.memo_date,
            title: Title::new(row.title)?,
            content: row.content.map(RichText::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewMemo> for NewMemo<'a> {
    fn from(memo: &'a DomainNewMemo) -> Self {
        Self {
            user_id: memo.user_id.get(),
            memo_date: memo.memo_date,
            title: memo.title.as_str(),
            content: memo.content.as_ref().map(RichText::as_str),
        }
    }
}

impl<'a> UpdateMemo<'a> {
    pub fn new(memo: &'a DomainUpdateMemo, now: NaiveDateTime) -> Self {
        Self {
            memo_date: memo.memo_date,
            title: memo.title.as_str(),
            content: memo.content.as_ref().map(RichText::as_str),
            updated_at: now,
        }
    }
}
