//! Tasks shown on the board, including AI-generated suggestions.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{BusinessId, TaskId, Title, UserId, non_blank, string_enum};

string_enum!(TaskStatus, "task status", {
    Todo => "todo",
    InProgress => "in_progress",
    Review => "review",
    Done => "done",
});

string_enum!(TaskPriority, "task priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl TaskStatus {
    pub fn is_open(self) -> bool {
        !matches!(self, TaskStatus::Done)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: Title,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<UserId>,
    pub business_id: Option<BusinessId>,
    pub due_date: Option<NaiveDate>,
    pub created_by: UserId,
    pub ai_generated: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub title: Title,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<UserId>,
    pub business_id: Option<BusinessId>,
    pub due_date: Option<NaiveDate>,
    pub created_by: UserId,
    pub ai_generated: bool,
}

impl NewTask {
    #[must_use]
    pub fn new(title: Title, priority: TaskPriority, created_by: UserId) -> Self {
        Self {
            title,
            description: None,
            status: TaskStatus::Todo,
            priority,
            assignee_id: None,
            business_id: None,
            due_date: None,
            created_by,
            ai_generated: false,
        }
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }
}

/// Fields replaced by the task edit modal. The author and AI flag never change.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateTask {
    pub title: Title,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<UserId>,
    pub business_id: Option<BusinessId>,
    pub due_date: Option<NaiveDate>,
}
