//! Shutdown coordination.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::lifecycle::state::LifecycleState;
use crate::store::{RecordStore, StorageError};

/// Closing the record store failed during shutdown.
#[derive(Debug, Error)]
#[error("failed to close record store: {0}")]
pub struct ShutdownError(#[from] pub StorageError);

/// Result of a completed shutdown.
#[derive(Debug)]
pub enum ShutdownOutcome {
    Clean,
    CloseFailed(ShutdownError),
}

impl ShutdownOutcome {
    /// Process exit code reporting the outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            ShutdownOutcome::Clean => 0,
            ShutdownOutcome::CloseFailed(_) => 1,
        }
    }
}

/// Owner of the lifecycle state and the store's final close.
///
/// Long-running tasks subscribe to the shutdown broadcast; the HTTP server
/// uses it to stop accepting connections.
pub struct Lifecycle {
    state: AtomicU8,
    tx: broadcast::Sender<()>,
    store: Arc<dyn RecordStore>,
}

impl Lifecycle {
    /// Create a coordinator in the `Starting` state.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            state: AtomicU8::new(LifecycleState::Starting as u8),
            tx,
            store,
        }
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn transition(&self, from: LifecycleState, to: LifecycleState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Record that the listener is bound. Returns false if not `Starting`.
    pub fn mark_listening(&self) -> bool {
        self.transition(LifecycleState::Starting, LifecycleState::Listening)
    }

    /// Subscribe to the shutdown broadcast.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop serving and close the store.
    ///
    /// Returns `None` without side effects unless the process is `Listening`;
    /// only the first caller performs the close.
    pub async fn shutdown(&self) -> Option<ShutdownOutcome> {
        if !self.transition(LifecycleState::Listening, LifecycleState::ShuttingDown) {
            tracing::debug!(state = ?self.state(), "Shutdown ignored");
            return None;
        }

        tracing::info!("Initiating shutdown...");
        let _ = self.tx.send(());

        let outcome = match self.store.close().await {
            Ok(()) => {
                tracing::info!("Record store closed");
                ShutdownOutcome::Clean
            }
            Err(e) => {
                tracing::error!(error = %e, "Record store close failed");
                ShutdownOutcome::CloseFailed(e.into())
            }
        };

        self.state
            .store(LifecycleState::Terminated as u8, Ordering::Release);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_state_progression() {
        let lifecycle = Lifecycle::new(Arc::new(MemoryStore::new()));
        assert_eq!(lifecycle.state(), LifecycleState::Starting);

        assert!(lifecycle.shutdown().await.is_none());
        assert_eq!(lifecycle.state(), LifecycleState::Starting);

        assert!(lifecycle.mark_listening());
        assert!(!lifecycle.mark_listening());

        let mut rx = lifecycle.subscribe();
        let outcome = lifecycle.shutdown().await.unwrap();
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(lifecycle.state(), LifecycleState::Terminated);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_second_shutdown_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = Lifecycle::new(store.clone());
        lifecycle.mark_listening();

        assert!(lifecycle.shutdown().await.is_some());
        assert!(lifecycle.shutdown().await.is_none());
    }

    #[tokio::test]
    async fn test_close_failure_exits_one() {
        let store = Arc::new(MemoryStore::new());
        // Already closed, so the lifecycle's close fails.
        store.close().await.unwrap();

        let lifecycle = Lifecycle::new(store);
        lifecycle.mark_listening();

        let outcome = lifecycle.shutdown().await.unwrap();
        assert!(matches!(outcome, ShutdownOutcome::CloseFailed(_)));
        assert_eq!(outcome.exit_code(), 1);
    }
}
