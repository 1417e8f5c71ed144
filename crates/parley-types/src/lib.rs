//! Shared domain types for Parley.
//!
//! Users, chats, messages, their typed identifiers, the error taxonomy and
//! configuration types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod id;
pub mod message;
pub mod user;
