//! Personal calendar memos. Every memo belongs to its author only.

use serde_json::Value;

use crate::domain::memo::{Memo, UpdateMemo};
use crate::domain::role::Section;
use crate::domain::types::MemoId;
use crate::forms::memos::{MemoForm, MemoRangeQuery};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{MemoListQuery, MemoReader, MemoWriter};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section, merge_patch};

pub fn list_memos<R>(
    repo: &R,
    user: &AuthenticatedUser,
    range: MemoRangeQuery,
) -> ServiceResult<Vec<Memo>>
where
    R: MemoReader + ?Sized,
{
    ensure_section(user, Section::Calendar)?;

    if range.from.zip(range.to).is_some_and(|(from, to)| to < from) {
        return Err(ServiceError::Form(
            "期間の終了日は開始日以降にしてください".to_string(),
        ));
    }
    let query = MemoListQuery::new(caller_id(user)?).between(range.from, range.to);
    Ok(repo.list_memos(query)?)
}

pub fn get_memo<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Memo>
where
    R: MemoReader + ?Sized,
{
    ensure_section(user, Section::Calendar)?;
    let caller = caller_id(user)?;
    repo.get_memo_by_id(MemoId::new(id)?)?
        .filter(|memo| memo.user_id == caller)
        .ok_or(ServiceError::NotFound)
}

pub fn create_memo<R>(repo: &R, user: &AuthenticatedUser, form: MemoForm) -> ServiceResult<Memo>
where
    R: MemoWriter + ?Sized,
{
    ensure_section(user, Section::Calendar)?;

    let new_memo = form.into_new_memo(caller_id(user)?)?;
    repo.create_memo(&new_memo).map_err(|err| {
        log::error!("Failed to create memo: {err}");
        ServiceError::from(err)
    })
}

pub fn update_memo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: MemoForm,
) -> ServiceResult<Memo>
where
    R: MemoReader + MemoWriter + ?Sized,
{
    let current = get_memo(repo, user, id)?;
    let updates = UpdateMemo::try_from(form)?;
    repo.update_memo(current.id, &updates).map_err(|err| {
        log::error!("Failed to update memo {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_memo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<Memo>
where
    R: MemoReader + MemoWriter + ?Sized,
{
    let current = get_memo(repo, user, id)?;
    let form: MemoForm = merge_patch(&current, patch)?;
    update_memo(repo, user, id, form)
}

pub fn delete_memo<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: MemoReader + MemoWriter + ?Sized,
{
    let memo = get_memo(repo, user, id)?;
    repo.delete_memo(memo.id).map_err(|err| {
        log::error!("Failed to delete memo {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::role::Role;
    use crate::domain::types::{Title, UserId};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{timestamp, user};

    fn memo(owner: i32) -> Memo {
        Memo {
            id: MemoId::new(1).unwrap(),
            user_id: UserId::new(owner).unwrap(),
            memo_date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            title: Title::new("面談").unwrap(),
            content: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn memos_are_listed_for_caller_only() {
        let mut repo = MockRepository::new();
        repo.expect_list_memos()
            .withf(|query| query.user_id == UserId::new(4).unwrap())
            .times(1)
            .returning(|_| Ok(vec![memo(4)]));

        let memos = list_memos(&repo, &user(4, Role::Staff), MemoRangeQuery::default()).unwrap();
        assert_eq!(memos.len(), 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let repo = MockRepository::new();
        let range = MemoRangeQuery {
            from: NaiveDate::from_ymd_opt(2026, 5, 1),
            to: NaiveDate::from_ymd_opt(2026, 4, 1),
        };
        let result = list_memos(&repo, &user(4, Role::Staff), range);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn foreign_memo_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_memo_by_id().returning(|_| Ok(Some(memo(2))));
        repo.expect_delete_memo().never();

        let result = delete_memo(&repo, &user(4, Role::Admin), 1);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn patching_date_keeps_title() {
        let mut repo = MockRepository::new();
        repo.expect_get_memo_by_id().returning(|_| Ok(Some(memo(4))));
        repo.expect_update_memo()
            .withf(|_, updates| {
                &*updates.title == "面談"
                    && updates.memo_date == NaiveDate::from_ymd_opt(2026, 4, 12).unwrap()
            })
            .times(1)
            .returning(|_, _| Ok(memo(4)));

        patch_memo(&repo, &user(4, Role::Staff), 1, json!({ "memo_date": "2026-04-12" })).unwrap();
    }
}
