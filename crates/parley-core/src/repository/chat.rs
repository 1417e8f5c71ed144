//! ChatRepository trait definition.
//!
//! Covers chat creation together with its membership, and the recency-ordered
//! chat listing for a user.

use parley_types::chat::Chat;
use parley_types::error::StoreError;
use parley_types::id::{ChatId, UserId};

/// Repository trait for chats and chat membership.
pub trait ChatRepository: Send + Sync {
    /// Atomically create a chat and one membership row per member.
    ///
    /// - `StoreError::ChatExists` if `name` is already used (nothing persisted).
    /// - `StoreError::ChatBadUsers` if any member does not exist (nothing persisted).
    fn create_chat(
        &self,
        name: &str,
        members: &[UserId],
    ) -> impl std::future::Future<Output = Result<ChatId, StoreError>> + Send;

    /// List the chats of a user, most recently active first.
    ///
    /// Only chats with at least one message are returned. Each chat embeds
    /// its full member list. Fails with `StoreError::UserNotExist` for an
    /// unknown user.
    fn chats_by_user(
        &self,
        user: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, StoreError>> + Send;
}
