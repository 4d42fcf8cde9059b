//! Repository implementation for calendar memos.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::memo::{Memo, NewMemo, UpdateMemo};
use crate::domain::types::MemoId;
use crate::models::memo::{Memo as DbMemo, NewMemo as DbNewMemo, UpdateMemo as DbUpdateMemo};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, MemoListQuery, MemoReader, MemoWriter, expect_affected, into_domain,
};

impl MemoReader for DieselRepository {
    fn get_memo_by_id(&self, id: MemoId) -> RepositoryResult<Option<Memo>> {
        use crate::schema::memos;

        let mut conn = self.conn()?;
        let row = memos::table
            .find(id.get())
            .first::<DbMemo>(&mut conn)
            .optional()?;

        row.map(Memo::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_memos(&self, query: MemoListQuery) -> RepositoryResult<Vec<Memo>> {
        use crate::schema::memos;

        let mut conn = self.conn()?;
        let mut items = memos::table
            .filter(memos::user_id.eq(query.user_id.get()))
            .into_boxed();
        if let Some(from) = query.from {
            items = items.filter(memos::memo_date.ge(from));
        }
        if let Some(to) = query.to {
            items = items.filter(memos::memo_date.le(to));
        }
        let rows = items
            .order((memos::memo_date.asc(), memos::id.asc()))
            .load::<DbMemo>(&mut conn)?;

        into_domain(rows)
    }
}

impl MemoWriter for DieselRepository {
    fn create_memo(&self, new_memo: &NewMemo) -> RepositoryResult<Memo> {
        use crate::schema::memos;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(memos::table)
            .values(DbNewMemo::from(new_memo))
            .get_result::<DbMemo>(&mut conn)?;

        Memo::try_from(row).map_err(RepositoryError::from)
    }

    fn update_memo(&self, id: MemoId, updates: &UpdateMemo) -> RepositoryResult<Memo> {
        use crate::schema::memos;

        let mut conn = self.conn()?;
        let changeset = DbUpdateMemo::new(updates, Utc::now().naive_utc());
        let row = diesel::update(memos::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbMemo>(&mut conn)?;

        Memo::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_memo(&self, id: MemoId) -> RepositoryResult<()> {
        use crate::schema::memos;

        let mut conn = self.conn()?;
        let affected = diesel::delete(memos::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
