//! Typed identifiers for users, chats and messages.
//!
//! Identifiers are assigned by the store and are always positive. Building one
//! from untrusted input goes through `TryFrom<i64>`, which rejects zero and
//! negative values before anything touches storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a raw integer cannot be used as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identifier must be greater than zero, got {0}")]
pub struct NonPositiveId(pub i64);

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// The raw integer value as stored in the database.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = NonPositiveId;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(NonPositiveId(raw))
                }
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`crate::user::User`].
    UserId
);
define_id!(
    /// Identifier of a [`crate::chat::Chat`].
    ChatId
);
define_id!(
    /// Identifier of a [`crate::message::Message`].
    MessageId
);
