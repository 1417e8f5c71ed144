//! Message type for Parley.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ChatId, MessageId, UserId};

/// A single message posted to a chat.
///
/// Messages are append-only. Their ids increase monotonically and double as a
/// creation-order tie-break when timestamps collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub chat: ChatId,
    pub author: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
