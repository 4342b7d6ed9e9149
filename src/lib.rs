//! Pokédex record server library.
//!
//! Accepts submitted records, persists them to a document store, lists them
//! back as a table, and looks up sprite images in a remote catalog.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::AppConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Lifecycle;
