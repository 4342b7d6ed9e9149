//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the pokedex server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (host, port, public URL).
    pub listener: ListenerConfig,

    /// Record store connection settings.
    pub store: StoreConfig,

    /// Remote catalog lookup settings.
    pub catalog: CatalogConfig,

    /// HTTP surface settings.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Apply the environment overrides the deployment provides.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("STORE_CONNECTION_STRING") {
            self.store.connection_string = value;
        }
        if let Some(value) = lookup("STORE_DB_NAME") {
            self.store.database = value;
        }
        if let Some(value) = lookup("STORE_COLLECTION") {
            self.store.collection = value;
        }
        if let Some(value) = lookup("CATALOG_BASE_URL") {
            self.catalog.base_url = value;
        }
        if let Some(value) = lookup("PORT") {
            self.listener.port = value
                .trim()
                .parse()
                .map_err(|_| format!("PORT must be a port number, got '{}'", value))?;
        }
        Ok(())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to bind. `0` asks the OS for an ephemeral port.
    pub port: u16,

    /// Base URL handed to views for links and form actions.
    pub public_url: Option<String>,
}

impl ListenerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL used in rendered pages.
    pub fn base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_url: None,
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Connection string (`memory://`, `file://<dir>` or a bare directory path).
    pub connection_string: String,

    /// Database name.
    pub database: String,

    /// Collection holding the records.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection_string: "memory://".to_string(),
            database: "pokedex".to_string(),
            collection: "entries".to_string(),
        }
    }
}

/// Remote catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Endpoint the entry name is appended to.
    pub base_url: String,

    /// User agent sent with lookups.
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2/pokemon".to_string(),
            user_agent: concat!("pokedex-server/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Directory of public assets served at the root path.
    pub static_dir: Option<String>,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            static_dir: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
