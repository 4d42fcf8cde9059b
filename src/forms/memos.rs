use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::memo::{NewMemo, UpdateMemo};
use crate::domain::types::{RichText, Title, UserId, non_blank};
use crate::forms::{FormError, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MemoForm {
    pub memo_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: Option<String>,
}

impl TryFrom<MemoForm> for UpdateMemo {
    type Error = FormError;

    fn try_from(form: MemoForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        let memo_date = form
            .memo_date
            .ok_or_else(|| FormError::Invalid("日付を入力してください".to_string()))?;
        Ok(UpdateMemo {
            memo_date,
            title: Title::new(form.title)?,
            content: non_blank(form.content).map(RichText::new).transpose()?,
        })
    }
}

impl MemoForm {
    pub fn into_new_memo(self, user_id: UserId) -> Result<NewMemo, FormError> {
        let memo = UpdateMemo::try_from(self)?;
        Ok(NewMemo {
            user_id,
            memo_date: memo.memo_date,
            title: memo.title,
            content: memo.content,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Calendar range filter.
pub struct MemoRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
