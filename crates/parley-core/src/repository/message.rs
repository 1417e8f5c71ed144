//! MessageRepository trait definition.

use parley_types::error::StoreError;
use parley_types::id::{ChatId, MessageId, UserId};
use parley_types::message::Message;

/// Repository trait for message persistence.
pub trait MessageRepository: Send + Sync {
    /// Append a message to a chat.
    ///
    /// Checks, in order: the chat exists (`ChatNotExist`), the author exists
    /// (`UserNotExist`), the author is a member (`UserNotChatMember`). No
    /// message is persisted on failure.
    fn create_message(
        &self,
        chat: ChatId,
        author: UserId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<MessageId, StoreError>> + Send;

    /// Get all messages of a chat ordered by created_at ASC.
    fn messages_by_chat(
        &self,
        chat: ChatId,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;
}
