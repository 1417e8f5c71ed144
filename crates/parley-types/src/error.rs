use thiserror::Error;

/// Broad failure class used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed, missing or out-of-range input.
    Validation,
    /// A uniqueness constraint was violated.
    Conflict,
    /// A referenced entity is absent or a membership rule was violated.
    NotFound,
    /// Storage or infrastructure failure.
    Internal,
}

/// Field-level errors produced while decoding a request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing field \"{0}\"")]
    MissingField(&'static str),

    #[error("Field \"{0}\" must be a string")]
    NotAString(&'static str),

    #[error("Field \"{0}\" must have non-zero length")]
    Blank(&'static str),

    #[error("Field \"{0}\" must be a 64-bit integer value")]
    NotAnInteger(&'static str),

    #[error("Field \"{0}\" must be a valid id greater than zero")]
    NonPositiveId(&'static str),

    #[error("Field \"{0}\" must be an array")]
    NotAnArray(&'static str),

    #[error("Field \"{0}\" must contain at least one user id")]
    EmptyList(&'static str),

    #[error("Each item in \"{0}\" array must be a 64-bit integer value")]
    ItemNotAnInteger(&'static str),

    #[error("Each item in \"{0}\" array must be a valid user id greater than zero")]
    ItemNonPositiveId(&'static str),
}

/// Classified outcomes of store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user already exists")]
    UserExists,

    #[error("user does not exist")]
    UserNotExist,

    #[error("chat already exists")]
    ChatExists,

    #[error("bad users list")]
    ChatBadUsers,

    #[error("chat does not exist")]
    ChatNotExist,

    #[error("user is not a chat member")]
    UserNotChatMember,

    #[error("storage error: {0}")]
    Internal(String),
}

impl StoreError {
    /// The failure class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            StoreError::UserExists | StoreError::ChatExists => ErrorClass::Conflict,
            StoreError::UserNotExist
            | StoreError::ChatBadUsers
            | StoreError::ChatNotExist
            | StoreError::UserNotChatMember => ErrorClass::NotFound,
            StoreError::Internal(_) => ErrorClass::Internal,
        }
    }
}
