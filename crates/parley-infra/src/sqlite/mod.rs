//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod chat;
pub mod message;
pub mod pool;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};
use parley_types::error::StoreError;
use sqlx::{Sqlite, Transaction};

// ---------------------------------------------------------------------------
// Helpers shared by the repositories
// ---------------------------------------------------------------------------

/// Fixed-width RFC 3339 (microseconds, `Z` suffix) so that lexical order of
/// the stored text matches chronological order.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Internal(format!("invalid datetime: {e}")))
}

/// Convert a stored integer key into a typed id.
pub(crate) fn stored_id<T: TryFrom<i64>>(raw: i64, what: &str) -> Result<T, StoreError> {
    T::try_from(raw).map_err(|_| StoreError::Internal(format!("invalid {what} id: {raw}")))
}

pub(crate) fn internal(e: sqlx::Error) -> StoreError {
    StoreError::Internal(e.to_string())
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}

/// Commit `tx` if `result` is Ok, otherwise roll it back and return the error.
///
/// Rollback is attempted on every error path, including validation failures
/// found mid-transaction. A failed rollback is logged; the original error wins.
pub(crate) async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(internal)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
