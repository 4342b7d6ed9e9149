//! Process-local record collection.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Record;
use crate::store::{RecordStore, StorageError, StoreResult};

/// A record collection held in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_one(&self, record: &Record) -> StoreResult<()> {
        self.ensure_open()?;
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Record>> {
        self.ensure_open()?;
        Ok(self.records.read().await.clone())
    }

    async fn close(&self) -> StoreResult<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}
