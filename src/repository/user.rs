//! Repository implementation for application users.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::types::{Email, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::models::user::{
    NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter, expect_affected, into_domain};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let row = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        row.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        row.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_users(&self) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let rows = users::table
            .order(users::name.asc())
            .load::<DbUser>(&mut conn)?;

        into_domain(rows)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(users::table)
            .values(DbNewUser::from(new_user))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(row).map_err(RepositoryError::from)
    }

    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let changeset = DbUpdateUser::new(updates, Utc::now().naive_utc());
        let row = diesel::update(users::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let affected = diesel::delete(users::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
