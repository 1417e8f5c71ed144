//! Request decoding.
//!
//! Each endpoint body is decoded from an already-parsed `serde_json::Value`
//! into a typed request, or rejected with a field-level `ValidationError`.
//! Decoding never coerces: integers must be JSON integers that fit in `i64`,
//! strings must be JSON strings. Identifiers are checked to be positive here,
//! so a bad id never reaches storage.

use parley_types::error::ValidationError;
use parley_types::id::{ChatId, UserId};
use serde_json::{Map, Value};

/// A request type that can be decoded from a JSON body.
pub trait DecodeRequest: Sized {
    fn decode(body: &Value) -> Result<Self, ValidationError>;
}

/// Body of `POST /users/add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: String,
}

/// Body of `POST /chats/add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateChatRequest {
    pub name: String,
    pub users: Vec<UserId>,
}

/// Body of `POST /messages/add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMessageRequest {
    pub chat: ChatId,
    pub author: UserId,
    pub text: String,
}

/// Body of `POST /chats/get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatsByUserRequest {
    pub user: UserId,
}

/// Body of `POST /messages/get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagesByChatRequest {
    pub chat: ChatId,
}

impl DecodeRequest for CreateUserRequest {
    fn decode(body: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(body)?;
        Ok(Self {
            username: fields.non_empty_string("username")?,
        })
    }
}

impl DecodeRequest for CreateChatRequest {
    fn decode(body: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(body)?;
        Ok(Self {
            name: fields.non_empty_string("name")?,
            users: fields.user_ids("users")?,
        })
    }
}

impl DecodeRequest for CreateMessageRequest {
    fn decode(body: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(body)?;
        Ok(Self {
            chat: fields.id("chat")?,
            author: fields.id("author")?,
            text: fields.non_empty_string("text")?,
        })
    }
}

impl DecodeRequest for ChatsByUserRequest {
    fn decode(body: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(body)?;
        Ok(Self {
            user: fields.id("user")?,
        })
    }
}

impl DecodeRequest for MessagesByChatRequest {
    fn decode(body: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(body)?;
        Ok(Self {
            chat: fields.id("chat")?,
        })
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or(ValidationError::NotAnObject)
}

trait GetField {
    fn field(&self, name: &'static str) -> Result<&Value, ValidationError>;
    fn non_empty_string(&self, name: &'static str) -> Result<String, ValidationError>;
    fn id<T: TryFrom<i64>>(&self, name: &'static str) -> Result<T, ValidationError>;
    fn user_ids(&self, name: &'static str) -> Result<Vec<UserId>, ValidationError>;
}

impl GetField for Map<String, Value> {
    fn field(&self, name: &'static str) -> Result<&Value, ValidationError> {
        self.get(name).ok_or(ValidationError::MissingField(name))
    }

    fn non_empty_string(&self, name: &'static str) -> Result<String, ValidationError> {
        let value = self
            .field(name)?
            .as_str()
            .ok_or(ValidationError::NotAString(name))?;
        if value.is_empty() {
            return Err(ValidationError::Blank(name));
        }
        Ok(value.to_owned())
    }

    fn id<T: TryFrom<i64>>(&self, name: &'static str) -> Result<T, ValidationError> {
        let raw = self
            .field(name)?
            .as_i64()
            .ok_or(ValidationError::NotAnInteger(name))?;
        T::try_from(raw).map_err(|_| ValidationError::NonPositiveId(name))
    }

    fn user_ids(&self, name: &'static str) -> Result<Vec<UserId>, ValidationError> {
        let items = self
            .field(name)?
            .as_array()
            .ok_or(ValidationError::NotAnArray(name))?;
        if items.is_empty() {
            return Err(ValidationError::EmptyList(name));
        }

        items
            .iter()
            .map(|item| {
                let raw = item
                    .as_i64()
                    .ok_or(ValidationError::ItemNotAnInteger(name))?;
                UserId::try_from(raw).map_err(|_| ValidationError::ItemNonPositiveId(name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_create_user() {
        let req = CreateUserRequest::decode(&json!({"username": "alice"})).unwrap();
        assert_eq!(req.username, "alice");
    }

    #[test]
    fn test_create_user_field_errors() {
        assert_eq!(
            CreateUserRequest::decode(&json!({})),
            Err(ValidationError::MissingField("username"))
        );
        assert_eq!(
            CreateUserRequest::decode(&json!({"username": ""})),
            Err(ValidationError::Blank("username"))
        );
        assert_eq!(
            CreateUserRequest::decode(&json!({"username": null})),
            Err(ValidationError::NotAString("username"))
        );
        assert_eq!(
            CreateUserRequest::decode(&json!({"username": 12})),
            Err(ValidationError::NotAString("username"))
        );
        assert_eq!(
            CreateUserRequest::decode(&json!(["alice"])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn test_decode_create_chat() {
        let req = CreateChatRequest::decode(&json!({"name": "general", "users": [1, 2]})).unwrap();
        assert_eq!(req.name, "general");
        assert_eq!(
            req.users,
            vec![UserId::try_from(1).unwrap(), UserId::try_from(2).unwrap()]
        );
    }

    #[test]
    fn test_create_chat_field_errors() {
        assert_eq!(
            CreateChatRequest::decode(&json!({"users": [1]})),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            CreateChatRequest::decode(&json!({"name": 5, "users": [1]})),
            Err(ValidationError::NotAString("name"))
        );
        assert_eq!(
            CreateChatRequest::decode(&json!({"name": "x"})),
            Err(ValidationError::MissingField("users"))
        );
        assert_eq!(
            CreateChatRequest::decode(&json!({"name": "x", "users": 1})),
            Err(ValidationError::NotAnArray("users"))
        );
        assert_eq!(
            CreateChatRequest::decode(&json!({"name": "x", "users": []})),
            Err(ValidationError::EmptyList("users"))
        );
        assert_eq!(
            CreateChatRequest::decode(&json!({"name": "x", "users": [1, "2"]})),
            Err(ValidationError::ItemNotAnInteger("users"))
        );
        assert_eq!(
            CreateChatRequest::decode(&json!({"name": "x", "users": [1, 2.5]})),
            Err(ValidationError::ItemNotAnInteger("users"))
        );
        assert_eq!(
            CreateChatRequest::decode(&json!({"name": "x", "users": [1, 0]})),
            Err(ValidationError::ItemNonPositiveId("users"))
        );
    }

    #[test]
    fn test_decode_create_message() {
        let req =
            CreateMessageRequest::decode(&json!({"chat": 4, "author": 2, "text": "hi"})).unwrap();
        assert_eq!(req.chat.get(), 4);
        assert_eq!(req.author.get(), 2);
        assert_eq!(req.text, "hi");
    }

    #[test]
    fn test_create_message_field_errors() {
        assert_eq!(
            CreateMessageRequest::decode(&json!({"author": 1, "text": "hi"})),
            Err(ValidationError::MissingField("chat"))
        );
        assert_eq!(
            CreateMessageRequest::decode(&json!({"chat": "1", "author": 1, "text": "hi"})),
            Err(ValidationError::NotAnInteger("chat"))
        );
        assert_eq!(
            CreateMessageRequest::decode(&json!({"chat": 1, "author": -3, "text": "hi"})),
            Err(ValidationError::NonPositiveId("author"))
        );
        assert_eq!(
            CreateMessageRequest::decode(&json!({"chat": 1, "author": 1})),
            Err(ValidationError::MissingField("text"))
        );
        assert_eq!(
            CreateMessageRequest::decode(&json!({"chat": 1, "author": 1, "text": ""})),
            Err(ValidationError::Blank("text"))
        );
    }

    #[test]
    fn test_zero_and_negative_ids_rejected() {
        assert_eq!(
            ChatsByUserRequest::decode(&json!({"user": 0})),
            Err(ValidationError::NonPositiveId("user"))
        );
        assert_eq!(
            MessagesByChatRequest::decode(&json!({"chat": -1})),
            Err(ValidationError::NonPositiveId("chat"))
        );
        // Out of i64 range is not silently truncated.
        assert_eq!(
            MessagesByChatRequest::decode(&json!({"chat": 18446744073709551615u64})),
            Err(ValidationError::NotAnInteger("chat"))
        );
    }
}
