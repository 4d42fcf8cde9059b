//! Diesel models for tasks.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::task::{NewTask as DomainNewTask, Task as DomainTask, UpdateTask as DomainUpdateTask};
use crate::domain::types::{BusinessId, TaskId, Title, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<i32>,
    pub business_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub created_by: i32,
    pub ai_generated: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub priority: &'a str,
    pub assignee_id: Option<i32>,
    pub business_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub created_by: i32,
    pub ai_generated: bool,
}

/// Full replacement of the editable task columns. Author and AI flag are fixed at creation.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub priority: &'a str,
    pub assignee_id: Option<i32>,
    pub business_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Task> for DomainTask {
    type Error = TypeConstraintError;

    fn try_from(row: Task) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TaskId::new(row.id)?,
            title: Title::new(row.title)?,
            description: row.description,
            status: row.status.parse()?,
            priority: row.priority.parse()?,
            assignee_id: row.assignee_id.map(UserId::new).transpose()?,
            business_id: row.business_id.map(BusinessId::new).transpose()?,
            due_date: row.due_date,
            created_by: UserId::new(row.created_by)?,
            ai_generated: row.ai_generated,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTask> for NewTask<'a> {
    fn from(task: &'a DomainNewTask) -> Self {
        Self {
            title: task.title.as_str(),
            description: task.description.as_deref(),
            status: task.status.as_str(),
            priority: task.priority.as_str(),
            assignee_id: task.assignee_id.map(UserId::get),
            business_id: task.business_id.map(BusinessId::get),
            due_date: task.due_date,
            created_by: task.created_by.get(),
            ai_generated: task.ai_generated,
        }
    }
}

impl<'a> UpdateTask<'a> {
    pub fn new(task: &'a DomainUpdateTask, now: NaiveDateTime) -> Self {
        Self {
            title: task.title.as_str(),
            description: task.description.as_deref(),
            status: task.status.as_str(),
            priority: task.priority.as_str(),
            assignee_id: task.assignee_id.map(UserId::get),
            business_id: task.business_id.map(BusinessId::get),
            due_date: task.due_date,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::task::{TaskPriority, TaskStatus};

    #[test]
    fn unknown_status_fails_conversion() {
        let now = Utc::now().naive_utc();
        let row = Task {
            id: 1,
            title: "見積作成".into(),
            description: None,
            status: "blocked".into(),
            priority: "high".into(),
            assignee_id: None,
            business_id: None,
            due_date: None,
            created_by: 1,
            ai_generated: false,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainTask::try_from(row).is_err());
    }

    #[test]
    fn new_task_row_keeps_ai_flag() {
        let mut task = DomainNewTask::new(
            Title::new("市場調査").unwrap(),
            TaskPriority::Medium,
            UserId::new(3).unwrap(),
        );
        task.ai_generated = true;
        let row = NewTask::from(&task);
        assert!(row.ai_generated);
        assert_eq!(row.status, TaskStatus::Todo.as_str());
        assert_eq!(row.created_by, 3);
    }
}
