//! Tasks and their assignment notifications.

use serde_json::Value;

use crate::domain::notification::NewNotification;
use crate::domain::role::{Role, Section};
use crate::domain::task::{Task, UpdateTask};
use crate::domain::types::{Link, TaskId, Title, UserId};
use crate::forms::tasks::{TaskForm, TaskListParams};
use crate::forms::{optional_id, parse_optional};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{NotificationWriter, TaskListQuery, TaskReader, TaskWriter};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section, merge_patch};

const ASSIGNED_TITLE: &str = "タスクが割り当てられました";
const TASKS_LINK: &str = "/tasks";

/// Managers and executives see every task; others only their own.
fn sees_all_tasks(user: &AuthenticatedUser) -> bool {
    user.role.is_executive() || user.role == Role::Manager
}

fn visible_to(task: &Task, user: &AuthenticatedUser, caller: UserId) -> bool {
    sees_all_tasks(user) || task.created_by == caller || task.assignee_id == Some(caller)
}

/// Notifies the assignee when the task is handed to someone other than the
/// caller. A failed notification is logged and does not undo the task.
fn notify_assignee<R>(repo: &R, task: &Task, previous: Option<UserId>, caller: UserId)
where
    R: NotificationWriter + ?Sized,
{
    let Some(assignee) = task.assignee_id else {
        return;
    };
    if assignee == caller || previous == Some(assignee) {
        return;
    }

    let notification = match (Title::new(ASSIGNED_TITLE), Link::new(TASKS_LINK)) {
        (Ok(title), Ok(link)) => NewNotification {
            user_id: assignee,
            title,
            body: Some(task.title.to_string()),
            link: Some(link),
        },
        _ => return,
    };
    if let Err(err) = repo.create_notification(&notification) {
        log::error!("Failed to notify user {assignee} about task {}: {err}", task.id);
    }
}

pub fn list_tasks<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: TaskListParams,
) -> ServiceResult<Vec<Task>>
where
    R: TaskReader + ?Sized,
{
    ensure_section(user, Section::Tasks)?;

    let mut query = TaskListQuery {
        business_id: optional_id(params.business_id)?,
        ..TaskListQuery::default()
    };
    if let Some(status) = parse_optional(params.status)? {
        query = query.status(status);
    }
    if !sees_all_tasks(user) {
        query = query.involving(caller_id(user)?);
    }
    Ok(repo.list_tasks(query)?)
}

pub fn get_task<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Task>
where
    R: TaskReader + ?Sized,
{
    ensure_section(user, Section::Tasks)?;
    let caller = caller_id(user)?;
    repo.get_task_by_id(TaskId::new(id)?)?
        .filter(|task| visible_to(task, user, caller))
        .ok_or(ServiceError::NotFound)
}

pub fn create_task<R>(repo: &R, user: &AuthenticatedUser, form: TaskForm) -> ServiceResult<Task>
where
    R: TaskWriter + NotificationWriter + ?Sized,
{
    ensure_section(user, Section::Tasks)?;

    let caller = caller_id(user)?;
    let new_task = form.into_new_task(caller)?;
    let task = repo.create_task(&new_task).map_err(|err| {
        log::error!("Failed to create task: {err}");
        ServiceError::from(err)
    })?;
    notify_assignee(repo, &task, None, caller);
    Ok(task)
}

pub fn update_task<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: TaskForm,
) -> ServiceResult<Task>
where
    R: TaskReader + TaskWriter + NotificationWriter + ?Sized,
{
    let current = get_task(repo, user, id)?;
    let updates = UpdateTask::try_from(form)?;
    let task = repo.update_task(current.id, &updates).map_err(|err| {
        log::error!("Failed to update task {id}: {err}");
        ServiceError::from(err)
    })?;
    notify_assignee(repo, &task, current.assignee_id, caller_id(user)?);
    Ok(task)
}

pub fn patch_task<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<Task>
where
    R: TaskReader + TaskWriter + NotificationWriter + ?Sized,
{
    let current = get_task(repo, user, id)?;
    let form: TaskForm = merge_patch(&current, patch)?;
    update_task(repo, user, id, form)
}

pub fn delete_task<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: TaskReader + TaskWriter + ?Sized,
{
    let task = get_task(repo, user, id)?;
    repo.delete_task(task.id).map_err(|err| {
        log::error!("Failed to delete task {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::notification::Notification;
    use crate::domain::task::{NewTask, TaskPriority, TaskStatus};
    use crate::domain::types::NotificationId;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{timestamp, user};

    fn uid(id: i32) -> UserId {
        UserId::new(id).unwrap()
    }

    fn task(created_by: i32, assignee: Option<i32>) -> Task {
        Task {
            id: TaskId::new(3).unwrap(),
            title: Title::new("見積書作成").unwrap(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignee_id: assignee.map(uid),
            business_id: None,
            due_date: None,
            created_by: uid(created_by),
            ai_generated: false,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn stored(new: &NewTask) -> Task {
        Task {
            title: new.title.clone(),
            assignee_id: new.assignee_id,
            created_by: new.created_by,
            status: new.status,
            ..task(new.created_by.get(), None)
        }
    }

    fn notification(new: &NewNotification) -> Notification {
        Notification {
            id: NotificationId::new(1).unwrap(),
            user_id: new.user_id,
            title: new.title.clone(),
            body: new.body.clone(),
            link: new.link.clone(),
            is_read: false,
            created_at: timestamp(),
        }
    }

    #[test]
    fn staff_list_is_limited_to_own_tasks() {
        let mut repo = MockRepository::new();
        repo.expect_list_tasks()
            .withf(|query| query.involving == Some(UserId::new(5).unwrap()))
            .times(1)
            .returning(|_| Ok(vec![]));

        list_tasks(&repo, &user(5, Role::Staff), TaskListParams::default()).unwrap();
    }

    #[test]
    fn manager_list_is_unfiltered() {
        let mut repo = MockRepository::new();
        repo.expect_list_tasks()
            .withf(|query| query.involving.is_none())
            .times(1)
            .returning(|_| Ok(vec![]));

        list_tasks(&repo, &user(1, Role::Manager), TaskListParams::default()).unwrap();
    }

    #[test]
    fn foreign_task_is_hidden_from_staff() {
        let mut repo = MockRepository::new();
        repo.expect_get_task_by_id()
            .returning(|_| Ok(Some(task(1, Some(2)))));

        let result = get_task(&repo, &user(5, Role::Staff), 3);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn assigning_to_someone_else_notifies_them() {
        let mut repo = MockRepository::new();
        repo.expect_create_task()
            .returning(|new| Ok(stored(new)));
        repo.expect_create_notification()
            .withf(|n| {
                n.user_id == UserId::new(2).unwrap()
                    && n.link.as_ref().map(Link::as_str) == Some("/tasks")
            })
            .times(1)
            .returning(|new| Ok(notification(new)));

        let form: TaskForm =
            serde_json::from_value(json!({ "title": "見積書作成", "assignee_id": 2 })).unwrap();
        create_task(&repo, &user(1, Role::Manager), form).unwrap();
    }

    #[test]
    fn self_assignment_sends_no_notification() {
        let mut repo = MockRepository::new();
        repo.expect_create_task()
            .returning(|new| Ok(stored(new)));
        repo.expect_create_notification().never();

        let form: TaskForm =
            serde_json::from_value(json!({ "title": "日報", "assignee_id": 5 })).unwrap();
        create_task(&repo, &user(5, Role::Staff), form).unwrap();
    }

    #[test]
    fn missing_title_stores_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_create_task().never();

        let form: TaskForm = serde_json::from_value(json!({ "priority": "high" })).unwrap();
        let result = create_task(&repo, &user(1, Role::Manager), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn patching_status_keeps_assignee_without_new_notification() {
        let mut repo = MockRepository::new();
        repo.expect_get_task_by_id()
            .returning(|_| Ok(Some(task(1, Some(2)))));
        repo.expect_update_task()
            .withf(|_, updates| {
                updates.status == TaskStatus::Done && updates.assignee_id == Some(UserId::new(2).unwrap())
            })
            .times(1)
            .returning(|_, updates| {
                Ok(Task {
                    status: updates.status,
                    ..task(1, Some(2))
                })
            });
        repo.expect_create_notification().never();

        let patched =
            patch_task(&repo, &user(1, Role::Manager), 3, json!({ "status": "done" })).unwrap();
        assert_eq!(patched.status, TaskStatus::Done);
    }
}
