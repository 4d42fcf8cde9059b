use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::task::{NewTask, TaskPriority, TaskStatus, UpdateTask};
use crate::domain::types::{Title, UserId, non_blank};
use crate::forms::{FormError, optional_id, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee_id: Option<i32>,
    pub business_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
}

impl TaskForm {
    pub fn into_new_task(self, created_by: UserId) -> Result<NewTask, FormError> {
        let update = UpdateTask::try_from(self)?;
        let mut task = NewTask::new(update.title, update.priority, created_by);
        task.description = update.description;
        task.status = update.status;
        task.assignee_id = update.assignee_id;
        task.business_id = update.business_id;
        task.due_date = update.due_date;
        Ok(task)
    }
}

impl TryFrom<TaskForm> for UpdateTask {
    type Error = FormError;

    fn try_from(form: TaskForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        Ok(UpdateTask {
            title: Title::new(form.title)?,
            description: non_blank(form.description),
            status: parse_or(form.status, TaskStatus::Todo)?,
            priority: parse_or(form.priority, TaskPriority::Medium)?,
            assignee_id: optional_id(form.assignee_id)?,
            business_id: optional_id(form.business_id)?,
            due_date: form.due_date,
        })
    }
}

/// Query string of the task list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    pub status: Option<String>,
    pub business_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TaskForm {
        TaskForm {
            title: "請求書を送付".into(),
            description: Some("".into()),
            status: None,
            priority: Some("high".into()),
            assignee_id: Some(2),
            business_id: None,
            due_date: None,
        }
    }

    #[test]
    fn new_task_takes_creator_and_defaults() {
        let task = form().into_new_task(UserId::new(1).unwrap()).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.description, None);
        assert_eq!(task.assignee_id, Some(UserId::new(2).unwrap()));
        assert!(!task.ai_generated);
    }

    #[test]
    fn title_is_required() {
        let mut form = form();
        form.title.clear();
        assert!(UpdateTask::try_from(form).is_err());
    }
}
