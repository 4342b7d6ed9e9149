//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pokedex_server::catalog::CatalogClient;
use pokedex_server::config::{AppConfig, CatalogConfig};
use pokedex_server::domain::Record;
use pokedex_server::http::{AppState, HttpServer};
use pokedex_server::lifecycle::Lifecycle;
use pokedex_server::store::{MemoryStore, RecordStore, StorageError, StoreResult};
use tokio::net::TcpListener;

/// Cause attached to every `FailingStore` error; must never reach a client.
#[allow(dead_code)]
pub const SECRET_CAUSE: &str = "connection reset by cluster0.internal:27017";

/// Undo the `/` entity encoding applied by the page templates' HTML escaping.
#[allow(dead_code)]
pub fn decode_slashes(body: &str) -> String {
    body.replace("&#x2f;", "/").replace("&#47;", "/")
}

/// A running server bound to an ephemeral port.
#[allow(dead_code)]
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub lifecycle: Arc<Lifecycle>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn add(&self, name: &str, category: &str, level: &str) -> reqwest::Response {
        self.client
            .post(self.url("/processAdd"))
            .form(&[("name", name), ("type", category), ("level", level)])
            .send()
            .await
            .expect("server unreachable")
    }

    pub async fn retrieve(&self) -> reqwest::Response {
        self.client
            .post(self.url("/processRetrieve"))
            .send()
            .await
            .expect("server unreachable")
    }

    pub async fn lookup(&self, name: &str) -> reqwest::Response {
        self.client
            .post(self.url("/processApi"))
            .form(&[("name", name)])
            .send()
            .await
            .expect("server unreachable")
    }
}

/// Start the server with default config on 127.0.0.1:0.
#[allow(dead_code)]
pub async fn spawn_app(store: Arc<dyn RecordStore>, catalog_base_url: &str) -> TestApp {
    spawn_app_with(AppConfig::default(), store, catalog_base_url).await
}

/// Start the server with the given config on 127.0.0.1:0.
pub async fn spawn_app_with(
    mut config: AppConfig,
    store: Arc<dyn RecordStore>,
    catalog_base_url: &str,
) -> TestApp {
    config.catalog = CatalogConfig {
        base_url: catalog_base_url.to_string(),
        ..CatalogConfig::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let catalog = CatalogClient::new(&config.catalog).unwrap();
    let lifecycle = Arc::new(Lifecycle::new(store.clone()));
    let state = AppState::new(store, catalog, &format!("http://{}", addr));
    let server = HttpServer::new(&config, state);

    let shutdown = lifecycle.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown).await;
    });
    lifecycle.mark_listening();

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        lifecycle,
    }
}

/// A store whose every operation fails as if the connection dropped.
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn insert_one(&self, _record: &Record) -> StoreResult<()> {
        Err(StorageError::Io(std::io::Error::other(SECRET_CAUSE)))
    }

    async fn list_all(&self) -> StoreResult<Vec<Record>> {
        Err(StorageError::Io(std::io::Error::other(SECRET_CAUSE)))
    }

    async fn close(&self) -> StoreResult<()> {
        Err(StorageError::Io(std::io::Error::other(SECRET_CAUSE)))
    }
}

/// An in-memory store that counts close calls and can be told to fail them.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    pub closes: AtomicUsize,
    pub fail_close: bool,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn failing_close() -> Self {
        Self {
            fail_close: true,
            ..Self::default()
        }
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn insert_one(&self, record: &Record) -> StoreResult<()> {
        self.inner.insert_one(record).await
    }

    async fn list_all(&self) -> StoreResult<Vec<Record>> {
        self.inner.list_all().await
    }

    async fn close(&self) -> StoreResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(StorageError::Io(std::io::Error::other("close rejected")));
        }
        self.inner.close().await
    }
}
