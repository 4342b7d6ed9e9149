//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! StoreConfig (connection string, database, collection)
//!     → connect() picks a backend by scheme
//!         memory://      → memory.rs   (process-local collection)
//!         file://<dir>   → document.rs (JSON-lines document file)
//!     → Arc<dyn RecordStore> shared by every request handler
//!     → close() once, from the lifecycle subsystem
//! ```
//!
//! # Design Decisions
//! - Connected before the listener is bound; no request sees an unready store
//! - Handlers share the handle read-only; backends do their own locking
//! - Every operation after `close` fails with `StorageError::Closed`

pub mod document;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::domain::Record;

pub use document::DocumentStore;
pub use memory::MemoryStore;

/// Failures reading from or writing to the record collection.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The connection has been closed.
    #[error("store connection is closed")]
    Closed,

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded or decoded.
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("invalid connection string '{0}'")]
    InvalidConnectionString(String),

    #[error("unsupported store scheme '{0}'")]
    UnsupportedScheme(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StorageError>;

/// Insert and list access to the persistent record collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a record to the collection.
    async fn insert_one(&self, record: &Record) -> StoreResult<()>;

    /// Every stored record, materialized in one call.
    async fn list_all(&self) -> StoreResult<Vec<Record>>;

    /// Release the underlying connection. Only the first call can succeed.
    async fn close(&self) -> StoreResult<()>;
}

/// Open the store described by `config`.
pub async fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    let conn = config.connection_string.trim();

    let store: Arc<dyn RecordStore> = match conn.split_once("://") {
        Some(("memory", _)) => Arc::new(MemoryStore::new()),
        Some(("file", path)) => {
            if path.is_empty() {
                return Err(StorageError::InvalidConnectionString(conn.to_string()));
            }
            let root = PathBuf::from(path);
            Arc::new(DocumentStore::open(&root, &config.database, &config.collection).await?)
        }
        Some((scheme, _)) => return Err(StorageError::UnsupportedScheme(scheme.to_string())),
        None if conn.is_empty() => {
            return Err(StorageError::InvalidConnectionString(conn.to_string()))
        }
        None => {
            let root = PathBuf::from(conn);
            Arc::new(DocumentStore::open(&root, &config.database, &config.collection).await?)
        }
    };

    tracing::info!(
        database = %config.database,
        collection = %config.collection,
        "Record store connected"
    );
    Ok(store)
}
