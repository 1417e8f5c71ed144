//! User handlers.

use axum::extract::State;

use parley_core::request::{CreateUserRequest, DecodeRequest};

use crate::http::error::{AppError, Operation};
use crate::http::extractors::json_body::JsonBody;
use crate::http::response::Created;
use crate::state::AppState;

/// POST /users/add - Create a user.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Created, AppError> {
    let request = CreateUserRequest::decode(&body)?;

    let id = state
        .messenger
        .create_user(request)
        .await
        .map_err(AppError::store(Operation::CreateUser))?;

    Ok(Created::new(id))
}
