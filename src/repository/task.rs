//! Repository implementation for tasks.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::task::{NewTask, Task, UpdateTask};
use crate::domain::types::TaskId;
use crate::models::task::{NewTask as DbNewTask, Task as DbTask, UpdateTask as DbUpdateTask};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, TaskListQuery, TaskReader, TaskWriter, expect_affected, into_domain,
};

impl TaskReader for DieselRepository {
    fn get_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let row = tasks::table
            .find(id.get())
            .first::<DbTask>(&mut conn)
            .optional()?;

        row.map(Task::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<Vec<Task>> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let mut items = tasks::table.into_boxed();

        if let Some(status) = query.status {
            items = items.filter(tasks::status.eq(status.as_str()));
        }
        if let Some(business_id) = query.business_id {
            items = items.filter(tasks::business_id.eq(business_id.get()));
        }
        if let Some(user_id) = query.involving {
            items = items.filter(
                tasks::assignee_id
                    .eq(user_id.get())
                    .or(tasks::created_by.eq(user_id.get())),
            );
        }

        let rows = items
            .order((tasks::due_date.is_null(), tasks::due_date.asc(), tasks::id.desc()))
            .load::<DbTask>(&mut conn)?;

        into_domain(rows)
    }
}

impl TaskWriter for DieselRepository {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(tasks::table)
            .values(DbNewTask::from(new_task))
            .get_result::<DbTask>(&mut conn)?;

        Task::try_from(row).map_err(RepositoryError::from)
    }

    fn create_tasks(&self, new_tasks: &[NewTask]) -> RepositoryResult<Vec<Task>> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let insertables = new_tasks.iter().map(DbNewTask::from).collect::<Vec<_>>();

        let rows = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            insertables
                .iter()
                .map(|task| {
                    diesel::insert_into(tasks::table)
                        .values(task)
                        .get_result::<DbTask>(conn)
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        into_domain(rows)
    }

    fn update_task(&self, id: TaskId, updates: &UpdateTask) -> RepositoryResult<Task> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let changeset = DbUpdateTask::new(updates, Utc::now().naive_utc());
        let row = diesel::update(tasks::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbTask>(&mut conn)?;

        Task::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_task(&self, id: TaskId) -> RepositoryResult<()> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let affected = diesel::delete(tasks::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
