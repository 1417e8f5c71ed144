//! Application state wiring the messenger service to SQLite.

use std::sync::Arc;

use parley_core::service::messenger::MessengerService;
use parley_infra::sqlite::chat::SqliteChatRepository;
use parley_infra::sqlite::message::SqliteMessageRepository;
use parley_infra::sqlite::pool::{DatabasePool, ensure_database_dir};
use parley_infra::sqlite::user::SqliteUserRepository;
use parley_types::config::StorageConfig;

/// The messenger service pinned to the SQLite repositories.
pub type ConcreteMessengerService =
    MessengerService<SqliteUserRepository, SqliteChatRepository, SqliteMessageRepository>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub messenger: Arc<ConcreteMessengerService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Wire the service onto an already-open pool.
    pub fn new(db_pool: DatabasePool) -> Self {
        let messenger = MessengerService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SqliteChatRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
        );

        Self {
            messenger: Arc::new(messenger),
            db_pool,
        }
    }

    /// Open (and migrate) the database at `database_url`, then wire the service.
    pub async fn init(database_url: &str, storage: &StorageConfig) -> anyhow::Result<Self> {
        ensure_database_dir(database_url).await?;
        let db_pool = DatabasePool::with_config(database_url, storage).await?;
        Ok(Self::new(db_pool))
    }
}
