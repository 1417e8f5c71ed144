//! Chat type for Parley.
//!
//! A chat is a named conversation whose membership is fixed at creation time.
//! When listed for a user, each chat carries the full set of its members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ChatId;
use crate::user::User;

/// A chat together with all of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    /// Unique across all chats.
    pub name: String,
    /// Every member of the chat, ordered by user id.
    pub users: Vec<User>,
    pub created_at: DateTime<Utc>,
}
