//! UserRepository trait definition.

use parley_types::error::StoreError;
use parley_types::id::UserId;

/// Repository trait for user persistence.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its id.
    ///
    /// Fails with `StoreError::UserExists` when the username is taken. The
    /// check must be enforced by the storage engine, not by a prior lookup.
    fn create_user(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<UserId, StoreError>> + Send;
}
