use std::sync::Arc;

use thiserror::Error;

pub use api::RankingQueries as Database;
pub use api::*;
#[cfg(test)]
pub use mock::MockDatabase;
pub use sqlite::SqliteStore;

use crate::config::Config;

mod api;
#[cfg(test)]
mod mock;
mod sqlite;

/// Possible errors when using the ranking store.
///
/// Any of them means that the store cannot be used for the current action.
/// There is no retry.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The database file cannot be opened, read or written.
    #[error("storage unavailable: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The blocking task that ran the statement did not complete.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The store has been switched off, which only happens in tests.
    #[error("storage unavailable")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Open the SQLite ranking store at the configured location, and make sure
/// its table exists.
///
/// The database file is created if it does not exist.
pub async fn db_connect(config: &Config) -> Result<Arc<dyn Database>> {
    let store = SqliteStore::new(&config.database_path);
    store.migrate().await?;
    log::info!("using database at {}", store.path().display());
    Ok(Arc::new(store) as Arc<dyn Database>)
}
