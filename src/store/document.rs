//! JSON-lines document store.
//!
//! Each collection is one file at `<root>/<database>/<collection>.jsonl`
//! holding one JSON document per line. The open file handle plays the role
//! of the connection: it is opened on connect and synced and dropped on close.
//!
//! Appends are serialized by the handle lock. Readers never take it: they
//! read up to the committed length, which only advances after a whole line
//! has been written.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::Record;
use crate::store::{RecordStore, StorageError, StoreResult};

/// A collection persisted as a JSON-lines file.
pub struct DocumentStore {
    path: PathBuf,
    handle: Mutex<Option<File>>,
    committed: AtomicU64,
    closed: AtomicBool,
}

impl DocumentStore {
    /// Open (creating if needed) the collection file.
    pub async fn open(root: &Path, database: &str, collection: &str) -> StoreResult<Self> {
        let dir = root.join(database);
        fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{}.jsonl", collection));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        let committed = file.metadata().await?.len();

        tracing::debug!(path = %path.display(), bytes = committed, "Opened document collection");
        Ok(Self {
            path,
            handle: Mutex::new(Some(file)),
            committed: AtomicU64::new(committed),
            closed: AtomicBool::new(false),
        })
    }

    /// Location of the collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for DocumentStore {
    async fn insert_one(&self, record: &Record) -> StoreResult<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut guard = self.handle.lock().await;
        let file = guard.as_mut().ok_or(StorageError::Closed)?;
        file.write_all(&line).await?;
        file.flush().await?;
        self.committed.fetch_add(line.len() as u64, Ordering::Release);
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Record>> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        let committed = self.committed.load(Ordering::Acquire);

        let mut bytes = fs::read(&self.path).await?;
        bytes.truncate(usize::try_from(committed).unwrap_or(usize::MAX));
        let content = String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StorageError::from))
            .collect()
    }

    async fn close(&self) -> StoreResult<()> {
        let mut file = self.handle.lock().await.take().ok_or(StorageError::Closed)?;
        self.closed.store(true, Ordering::Release);
        file.flush().await?;
        file.sync_all().await?;
        tracing::debug!(path = %self.path.display(), "Closed document collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::task::JoinSet;

    fn record(name: &str, level: i64) -> Record {
        Record {
            name: name.into(),
            category: "Fire".into(),
            level,
            date_added: "6/1/2025".into(),
        }
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();
        store.insert_one(&record("charmander", 5)).await.unwrap();
        store.insert_one(&record("vulpix", 9)).await.unwrap();
        store.close().await.unwrap();

        let reopened = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();
        let all = reopened.list_all().await.unwrap();
        assert_eq!(all, vec![record("charmander", 5), record("vulpix", 9)]);
        assert!(reopened.path().ends_with("dex/entries.jsonl"));
    }

    #[tokio::test]
    async fn test_documents_use_stored_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();
        store.insert_one(&record("growlithe", 20)).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(raw.trim()).unwrap();
        assert_eq!(doc["type"], "Fire");
        assert_eq!(doc["dateAdded"], "6/1/2025");
    }

    #[tokio::test]
    async fn test_corrupt_line_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dex")).unwrap();
        std::fs::write(dir.path().join("dex/entries.jsonl"), "{not json}\n").unwrap();
        let store = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();

        assert!(matches!(store.list_all().await, Err(StorageError::Codec(_))));
    }

    #[tokio::test]
    async fn test_list_does_not_wait_for_writer() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();
        store.insert_one(&record("magby", 12)).await.unwrap();

        let _writer = store.handle.lock().await;
        let listed = tokio::time::timeout(Duration::from_secs(2), store.list_all())
            .await
            .expect("list must not queue behind the append lock");
        assert_eq!(listed.unwrap(), vec![record("magby", 12)]);
    }

    #[tokio::test]
    async fn test_list_skips_uncommitted_tail() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();
        store.insert_one(&record("slugma", 7)).await.unwrap();

        // Bytes of an append still in flight.
        let mut raw = std::fs::OpenOptions::new().append(true).open(store.path()).unwrap();
        std::io::Write::write_all(&mut raw, b"{\"name\":\"mag").unwrap();

        assert_eq!(store.list_all().await.unwrap(), vec![record("slugma", 7)]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DocumentStore::open(dir.path(), "dex", "entries").await.unwrap());

        let mut tasks = JoinSet::new();
        for level in 1..=20 {
            let store = store.clone();
            tasks.spawn(async move {
                store.insert_one(&record("torkoal", level)).await.unwrap();
                let seen = store.list_all().await.unwrap();
                assert!(!seen.is_empty());
            });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap();
        }

        let stored = store.list_all().await.unwrap();
        let mut levels: Vec<i64> = stored.iter().map(|r| r.level).collect();
        levels.sort_unstable();
        assert_eq!(levels, (1..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_list_after_close_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();
        store.close().await.unwrap();
        assert!(matches!(store.list_all().await, Err(StorageError::Closed)));
    }

    #[tokio::test]
    async fn test_close_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "dex", "entries").await.unwrap();

        store.close().await.unwrap();
        assert!(matches!(store.close().await, Err(StorageError::Closed)));
        assert!(matches!(
            store.insert_one(&record("ponyta", 1)).await,
            Err(StorageError::Closed)
        ));
    }
}
