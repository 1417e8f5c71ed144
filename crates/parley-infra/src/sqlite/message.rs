//! SQLite message repository implementation.
//!
//! Message creation checks the chat, the author and the membership inside one
//! writer transaction before inserting, so the three failure kinds stay
//! distinguishable and nothing is written on failure.

use chrono::Utc;
use parley_core::repository::message::MessageRepository;
use parley_types::error::StoreError;
use parley_types::id::{ChatId, MessageId, UserId};
use parley_types::message::Message;
use sqlx::{Row, Sqlite, Transaction};

use super::pool::DatabasePool;
use super::{finish, format_datetime, internal, is_foreign_key_violation, parse_datetime, stored_id};

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct MessageRow {
    id: i64,
    chat_id: i64,
    author_id: i64,
    text: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            author_id: row.try_get("author_id")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, StoreError> {
        Ok(Message {
            id: stored_id(self.id, "message")?,
            chat: stored_id(self.chat_id, "chat")?,
            author: stored_id(self.author_id, "user")?,
            text: self.text,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

async fn insert_message(
    tx: &mut Transaction<'_, Sqlite>,
    chat: ChatId,
    author: UserId,
    text: &str,
) -> Result<MessageId, StoreError> {
    let chat_exists = sqlx::query("SELECT 1 FROM chats WHERE id = ?")
        .bind(chat.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(internal)?;
    if chat_exists.is_none() {
        return Err(StoreError::ChatNotExist);
    }

    let author_exists = sqlx::query("SELECT 1 FROM users WHERE id = ?")
        .bind(author.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(internal)?;
    if author_exists.is_none() {
        return Err(StoreError::UserNotExist);
    }

    let is_member = sqlx::query("SELECT 1 FROM chat_users WHERE chat_id = ? AND user_id = ?")
        .bind(chat.get())
        .bind(author.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(internal)?;
    if is_member.is_none() {
        return Err(StoreError::UserNotChatMember);
    }

    // The composite foreign key on (chat_id, author_id) backs the membership check.
    let result = sqlx::query(
        "INSERT INTO messages (chat_id, author_id, text, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(chat.get())
    .bind(author.get())
    .bind(text)
    .bind(format_datetime(&Utc::now()))
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            StoreError::UserNotChatMember
        } else {
            internal(e)
        }
    })?;

    stored_id(result.last_insert_rowid(), "message")
}

impl MessageRepository for SqliteMessageRepository {
    async fn create_message(
        &self,
        chat: ChatId,
        author: UserId,
        text: &str,
    ) -> Result<MessageId, StoreError> {
        let mut tx = self.pool.writer.begin().await.map_err(internal)?;
        let result = insert_message(&mut tx, chat, author, text).await;
        finish(tx, result).await
    }

    async fn messages_by_chat(&self, chat: ChatId) -> Result<Vec<Message>, StoreError> {
        let exists = sqlx::query("SELECT 1 FROM chats WHERE id = ?")
            .bind(chat.get())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(internal)?;
        if exists.is_none() {
            return Err(StoreError::ChatNotExist);
        }

        let rows = sqlx::query(
            r#"SELECT id, chat_id, author_id, text, created_at
                 FROM messages
                WHERE chat_id = ?
                ORDER BY created_at ASC, id ASC"#,
        )
        .bind(chat.get())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(internal)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = MessageRow::from_row(row).map_err(internal)?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }
}
