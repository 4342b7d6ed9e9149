//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (.env / process env)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to store, catalog and http subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults so the server runs without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{
    AppConfig, CatalogConfig, HttpConfig, ListenerConfig, ObservabilityConfig, StoreConfig,
};
pub use validation::{validate_config, ValidationError};
