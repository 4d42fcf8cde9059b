#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use sinjapan_manager::db::{DbPool, establish_connection_pool};
use sinjapan_manager::domain::role::Role;
use sinjapan_manager::domain::types::{Email, PersonName};
use sinjapan_manager::domain::user::{NewUser, User};
use sinjapan_manager::repository::{DieselRepository, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// SQLite file in a private temporary directory, migrated to the latest schema.
/// The directory and the database are removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("build pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn create_user(repo: &DieselRepository, name: &str, email: &str, role: Role) -> User {
    let new_user = NewUser::new(
        PersonName::new(name).unwrap(),
        Email::new(email).unwrap(),
        role,
        None,
    );
    repo.create_user(&new_user).unwrap()
}
