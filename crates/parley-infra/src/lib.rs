//! Infrastructure layer for Parley.
//!
//! Contains implementations of the repository traits defined in `parley-core`
//! (SQLite storage with split reader/writer pools) and the configuration
//! file loader.

pub mod config;
pub mod sqlite;
