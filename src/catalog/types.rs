//! Catalog lookup types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display data for a named entry, built per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Front-facing sprite image, when the catalog has one.
    pub sprite_url: Option<String>,
    /// The normalized name that was queried.
    pub name: String,
}

/// Errors returned by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no such entry, or could not be reached.
    #[error("No matching entry found")]
    NotFound,

    #[error("Invalid catalog base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to build catalog HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// The subset of the remote entry document the lookup reads.
#[derive(Debug, Deserialize)]
pub(crate) struct RemoteEntry {
    pub sprites: SpriteSet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpriteSet {
    pub front_default: Option<String>,
}
