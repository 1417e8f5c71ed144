//! Chat handlers.

use axum::Json;
use axum::extract::State;

use parley_core::request::{ChatsByUserRequest, CreateChatRequest, DecodeRequest};
use parley_types::chat::Chat;

use crate::http::error::{AppError, Operation};
use crate::http::extractors::json_body::JsonBody;
use crate::http::response::Created;
use crate::state::AppState;

/// POST /chats/add - Create a chat with its members.
pub async fn create_chat(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Created, AppError> {
    let request = CreateChatRequest::decode(&body)?;

    let id = state
        .messenger
        .create_chat(request)
        .await
        .map_err(AppError::store(Operation::CreateChat))?;

    Ok(Created::new(id))
}

/// POST /chats/get - List a user's chats, most recently active first.
pub async fn chats_by_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Vec<Chat>>, AppError> {
    let request = ChatsByUserRequest::decode(&body)?;

    let chats = state
        .messenger
        .chats_by_user(request)
        .await
        .map_err(AppError::store(Operation::ChatsByUser))?;

    Ok(Json(chats))
}
