//! SQLite user repository implementation.

use chrono::Utc;
use parley_core::repository::user::UserRepository;
use parley_types::error::StoreError;
use parley_types::id::UserId;

use super::pool::DatabasePool;
use super::{format_datetime, internal, is_unique_violation, stored_id};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, username: &str) -> Result<UserId, StoreError> {
        // The UNIQUE constraint on users.username is the only uniqueness guard.
        let result = sqlx::query("INSERT INTO users (username, created_at) VALUES (?, ?)")
            .bind(username)
            .bind(format_datetime(&Utc::now()))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::UserExists
                } else {
                    internal(e)
                }
            })?;

        stored_id(result.last_insert_rowid(), "user")
    }
}
