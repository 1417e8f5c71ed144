//! Application error type mapping to HTTP status codes and JSON bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::{ErrorClass, StoreError, ValidationError};

/// The operation a store error was raised by.
///
/// The same store outcome reads differently depending on the request: an
/// unknown user is an unknown *author* when posting a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateUser,
    CreateChat,
    CreateMessage,
    ChatsByUser,
    MessagesByChat,
}

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed field validation.
    Validation(ValidationError),
    /// A store operation failed.
    Store(Operation, StoreError),
    /// The request could not be read as JSON at all.
    Payload(StatusCode, String),
}

impl AppError {
    /// Adapter for `map_err` that tags a store error with its operation.
    pub fn store(operation: Operation) -> impl FnOnce(StoreError) -> AppError {
        move |err| AppError::Store(operation, err)
    }

    pub fn payload(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Payload(status, message.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

/// Client-facing message for a store error raised by `operation`.
fn store_message(operation: Operation, err: &StoreError) -> &'static str {
    match (operation, err) {
        (_, StoreError::UserExists) => "User already exists",
        (_, StoreError::ChatExists) => "Chat already exists",
        (_, StoreError::ChatBadUsers) => "Bad user list",
        (Operation::CreateMessage, StoreError::ChatNotExist) => {
            "Chat with provided id does not exist"
        }
        (_, StoreError::ChatNotExist) => "Chat does not exist",
        (Operation::CreateMessage, StoreError::UserNotExist) => {
            "Author with provided id does not exist"
        }
        (_, StoreError::UserNotExist) => "User does not exist",
        (_, StoreError::UserNotChatMember) => "Author is not chat member",
        (_, StoreError::Internal(_)) => "Internal Server Error",
    }
}

fn class_status(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::Validation | ErrorClass::Conflict | ErrorClass::NotFound => {
            StatusCode::BAD_REQUEST
        }
        ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(e) => (class_status(ErrorClass::Validation), e.to_string()),
            AppError::Store(operation, e) => {
                let class = e.class();
                if class == ErrorClass::Internal {
                    tracing::error!(?operation, error = %e, "store operation failed");
                }
                (class_status(class), store_message(*operation, e).to_string())
            }
            AppError::Payload(status, message) => (*status, message.clone()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
