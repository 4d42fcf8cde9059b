//! Calendar memos owned by a single user.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{MemoId, RichText, Title, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Memo {
    pub id: MemoId,
    pub user_id: UserId,
    pub memo_date: NaiveDate,
    pub title: Title,
    pub content: Option<RichText>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMemo {
    pub user_id: UserId,
    pub memo_date: NaiveDate,
    pub title: Title,
    pub content: Option<RichText>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateMemo {
    pub memo_date: NaiveDate,
    pub title: Title,
    pub content: Option<RichText>,
}
