//! Message handlers.

use axum::Json;
use axum::extract::State;

use parley_core::request::{CreateMessageRequest, DecodeRequest, MessagesByChatRequest};
use parley_types::message::Message;

use crate::http::error::{AppError, Operation};
use crate::http::extractors::json_body::JsonBody;
use crate::http::response::Created;
use crate::state::AppState;

/// POST /messages/add - Post a message to a chat.
pub async fn create_message(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Created, AppError> {
    let request = CreateMessageRequest::decode(&body)?;

    let id = state
        .messenger
        .create_message(request)
        .await
        .map_err(AppError::store(Operation::CreateMessage))?;

    Ok(Created::new(id))
}

/// POST /messages/get - List a chat's messages, oldest first.
pub async fn messages_by_chat(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Vec<Message>>, AppError> {
    let request = MessagesByChatRequest::decode(&body)?;

    let messages = state
        .messenger
        .messages_by_chat(request)
        .await
        .map_err(AppError::store(Operation::MessagesByChat))?;

    Ok(Json(messages))
}
