//! Messenger service.
//!
//! Orchestrates the three write operations (create user, chat, message) and
//! the two read operations (chats of a user, messages of a chat) on top of the
//! repository ports. Requests arrive already decoded and validated, so every
//! identifier handed to a repository is positive.

use std::collections::BTreeSet;

use parley_types::chat::Chat;
use parley_types::error::StoreError;
use parley_types::id::{ChatId, MessageId, UserId};
use parley_types::message::Message;

use crate::repository::chat::ChatRepository;
use crate::repository::message::MessageRepository;
use crate::repository::user::UserRepository;
use crate::request::{
    ChatsByUserRequest, CreateChatRequest, CreateMessageRequest, CreateUserRequest,
    MessagesByChatRequest,
};

/// Service exposing every Parley operation.
pub struct MessengerService<U: UserRepository, C: ChatRepository, M: MessageRepository> {
    user_repo: U,
    chat_repo: C,
    message_repo: M,
}

impl<U: UserRepository, C: ChatRepository, M: MessageRepository> MessengerService<U, C, M> {
    pub fn new(user_repo: U, chat_repo: C, message_repo: M) -> Self {
        Self {
            user_repo,
            chat_repo,
            message_repo,
        }
    }

    /// Create a user and return its id.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserId, StoreError> {
        tracing::debug!(username = %request.username, "creating user");

        let id = self.user_repo.create_user(&request.username).await?;

        tracing::debug!(username = %request.username, %id, "created user");
        Ok(id)
    }

    /// Create a chat with its members and return its id.
    ///
    /// Repeated member ids collapse into a single membership.
    pub async fn create_chat(&self, request: CreateChatRequest) -> Result<ChatId, StoreError> {
        let members: Vec<UserId> = request
            .users
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        tracing::debug!(name = %request.name, ?members, "creating chat");

        let id = self.chat_repo.create_chat(&request.name, &members).await?;

        tracing::debug!(name = %request.name, %id, "created chat");
        Ok(id)
    }

    /// Post a message to a chat and return its id.
    pub async fn create_message(
        &self,
        request: CreateMessageRequest,
    ) -> Result<MessageId, StoreError> {
        tracing::debug!(chat = %request.chat, author = %request.author, "creating message");

        let id = self
            .message_repo
            .create_message(request.chat, request.author, &request.text)
            .await?;

        tracing::debug!(chat = %request.chat, %id, "created message");
        Ok(id)
    }

    /// Chats of a user, most recently active first.
    pub async fn chats_by_user(&self, request: ChatsByUserRequest) -> Result<Vec<Chat>, StoreError> {
        tracing::debug!(user = %request.user, "retrieving chats");

        let chats = self.chat_repo.chats_by_user(request.user).await?;

        tracing::debug!(user = %request.user, count = chats.len(), "retrieved chats");
        Ok(chats)
    }

    /// Messages of a chat, oldest first.
    pub async fn messages_by_chat(
        &self,
        request: MessagesByChatRequest,
    ) -> Result<Vec<Message>, StoreError> {
        tracing::debug!(chat = %request.chat, "retrieving messages");

        let messages = self.message_repo.messages_by_chat(request.chat).await?;

        tracing::debug!(chat = %request.chat, count = messages.len(), "retrieved messages");
        Ok(messages)
    }
}
