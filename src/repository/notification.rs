//! Repository implementation for notifications.

use diesel::prelude::*;

use crate::domain::notification::{NewNotification, Notification};
use crate::domain::types::{NotificationId, UserId};
use crate::models::notification::{
    NewNotification as DbNewNotification, Notification as DbNotification,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, NotificationReader, NotificationWriter, expect_affected, into_domain,
};

impl NotificationReader for DieselRepository {
    fn get_notification_by_id(
        &self,
        id: NotificationId,
    ) -> RepositoryResult<Option<Notification>> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let row = notifications::table
            .find(id.get())
            .first::<DbNotification>(&mut conn)
            .optional()?;

        row.map(Notification::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_notifications(&self, user_id: UserId) -> RepositoryResult<Vec<Notification>> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let rows = notifications::table
            .filter(notifications::user_id.eq(user_id.get()))
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .load::<DbNotification>(&mut conn)?;

        into_domain(rows)
    }
}

impl NotificationWriter for DieselRepository {
    fn create_notification(
        &self,
        new_notification: &NewNotification,
    ) -> RepositoryResult<Notification> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(notifications::table)
            .values(DbNewNotification::from(new_notification))
            .get_result::<DbNotification>(&mut conn)?;

        Notification::try_from(row).map_err(RepositoryError::from)
    }

    fn set_notification_read(
        &self,
        id: NotificationId,
        is_read: bool,
    ) -> RepositoryResult<Notification> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let row = diesel::update(notifications::table.find(id.get()))
            .set(notifications::is_read.eq(is_read))
            .get_result::<DbNotification>(&mut conn)?;

        Notification::try_from(row).map_err(RepositoryError::from)
    }

    fn mark_all_notifications_read(&self, user_id: UserId) -> RepositoryResult<usize> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let affected = diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id.get()))
                .filter(notifications::is_read.eq(false)),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_notification(&self, id: NotificationId) -> RepositoryResult<()> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let affected = diesel::delete(notifications::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
