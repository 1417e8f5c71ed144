//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `parley-core`. Chat creation runs the chat
//! insert and the bulk membership insert in one writer transaction. The chat
//! listing aggregates membership into a JSON array in SQL and re-hydrates it
//! into `User` values here.

use chrono::Utc;
use parley_core::repository::chat::ChatRepository;
use parley_types::chat::Chat;
use parley_types::error::StoreError;
use parley_types::id::{ChatId, UserId};
use parley_types::user::User;
use serde::Deserialize;
use sqlx::{QueryBuilder, Row, Sqlite, Transaction};

use super::pool::DatabasePool;
use super::{
    finish, format_datetime, internal, is_foreign_key_violation, is_unique_violation,
    parse_datetime, stored_id,
};

/// Chats of one user, ordered by the timestamp of their latest message.
///
/// The inner join on `messages` drops chats that never received a message.
/// Ties on the latest timestamp fall back to chat id ascending.
const CHATS_BY_USER_SQL: &str = r#"
WITH user_chats AS (
    SELECT chats.id,
           chats.name,
           chats.created_at,
           MAX(messages.created_at) AS last_message_at
      FROM chats
      JOIN chat_users
        ON chat_users.chat_id = chats.id
       AND chat_users.user_id = ?
      JOIN messages
        ON messages.chat_id = chats.id
     GROUP BY chats.id, chats.name, chats.created_at
),
users_per_chat AS (
    SELECT chat_users.chat_id,
           json_group_array(
               json_object('id', users.id, 'username', users.username, 'created_at', users.created_at)
           ) AS users
      FROM chat_users
      JOIN users
        ON users.id = chat_users.user_id
     WHERE chat_users.chat_id IN (SELECT id FROM user_chats)
     GROUP BY chat_users.chat_id
)
SELECT user_chats.id,
       user_chats.name,
       user_chats.created_at,
       users_per_chat.users
  FROM user_chats
  JOIN users_per_chat
    ON users_per_chat.chat_id = user_chats.id
 ORDER BY user_chats.last_message_at DESC, user_chats.id ASC
"#;

/// Rows per membership INSERT. Two binds per row keeps each statement well
/// under SQLite's bound-parameter limit.
const MEMBERSHIP_CHUNK_ROWS: usize = 1000;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatRow {
    id: i64,
    name: String,
    created_at: String,
    users: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            users: row.try_get("users")?,
        })
    }

    fn into_chat(self) -> Result<Chat, StoreError> {
        let members: Vec<MemberRow> = serde_json::from_str(&self.users)
            .map_err(|e| StoreError::Internal(format!("invalid chat members: {e}")))?;

        let mut users = members
            .into_iter()
            .map(MemberRow::into_user)
            .collect::<Result<Vec<_>, _>>()?;
        users.sort_by_key(|u| u.id);

        Ok(Chat {
            id: stored_id(self.id, "chat")?,
            name: self.name,
            users,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

/// One element of the `json_group_array` member aggregate.
#[derive(Deserialize)]
struct MemberRow {
    id: i64,
    username: String,
    created_at: String,
}

impl MemberRow {
    fn into_user(self) -> Result<User, StoreError> {
        Ok(User {
            id: stored_id(self.id, "user")?,
            username: self.username,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

async fn insert_chat(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
    members: &[UserId],
) -> Result<ChatId, StoreError> {
    if members.is_empty() {
        return Err(StoreError::ChatBadUsers);
    }

    let result = sqlx::query("INSERT INTO chats (name, created_at) VALUES (?, ?)")
        .bind(name)
        .bind(format_datetime(&Utc::now()))
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::ChatExists
            } else {
                internal(e)
            }
        })?;
    let chat_id = result.last_insert_rowid();

    for chunk in members.chunks(MEMBERSHIP_CHUNK_ROWS) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO chat_users (chat_id, user_id) ");
        builder.push_values(chunk, |mut row, user| {
            row.push_bind(chat_id).push_bind(user.get());
        });
        builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    StoreError::ChatBadUsers
                } else {
                    internal(e)
                }
            })?;
    }

    stored_id(chat_id, "chat")
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_chat(&self, name: &str, members: &[UserId]) -> Result<ChatId, StoreError> {
        let mut tx = self.pool.writer.begin().await.map_err(internal)?;
        let result = insert_chat(&mut tx, name, members).await;
        finish(tx, result).await
    }

    async fn chats_by_user(&self, user: UserId) -> Result<Vec<Chat>, StoreError> {
        let exists = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(user.get())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(internal)?;
        if exists.is_none() {
            return Err(StoreError::UserNotExist);
        }

        let rows = sqlx::query(CHATS_BY_USER_SQL)
            .bind(user.get())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(internal)?;

        let mut chats = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row = ChatRow::from_row(row).map_err(internal)?;
            chats.push(chat_row.into_chat()?);
        }

        Ok(chats)
    }
}
