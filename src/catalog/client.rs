//! HTTP client for the remote catalog.
//!
//! # Responsibilities
//! - Build the lookup URL for a normalized name
//! - Issue a single GET and decode the sprite reference
//! - Collapse every failure into `CatalogError::NotFound`

use reqwest::Client;
use url::Url;

use crate::catalog::types::{CatalogEntry, CatalogError, CatalogResult, RemoteEntry};
use crate::config::CatalogConfig;
use crate::observability::metrics;

/// Read-only client for the remote catalog.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| CatalogError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self { http, base_url })
    }

    /// URL of the catalog document for `name`.
    ///
    /// `None` for dot segments, which the URL serializer would drop or
    /// resolve against the collection path.
    fn entry_url(&self, name: &str) -> Option<Url> {
        if matches!(name, "." | "..") {
            return None;
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut().ok()?.pop_if_empty().push(name);
        Some(url)
    }

    /// Look up display data for an already-normalized name.
    pub async fn lookup(&self, name: &str) -> CatalogResult<CatalogEntry> {
        let result = self.fetch(name).await;
        metrics::record_catalog_lookup(result.is_ok());
        result
    }

    async fn fetch(&self, name: &str) -> CatalogResult<CatalogEntry> {
        if name.is_empty() {
            tracing::warn!("Catalog lookup skipped: empty name");
            return Err(CatalogError::NotFound);
        }

        let url = self.entry_url(name).ok_or_else(|| {
            tracing::warn!(name = %name, "Catalog lookup skipped: not an entry name");
            CatalogError::NotFound
        })?;

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::warn!(name = %name, error = %e, "Catalog request failed");
            CatalogError::NotFound
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(name = %name, status = %status, "Catalog returned non-success status");
            return Err(CatalogError::NotFound);
        }

        let entry: RemoteEntry = response.json().await.map_err(|e| {
            tracing::warn!(name = %name, error = %e, "Catalog response could not be decoded");
            CatalogError::NotFound
        })?;

        Ok(CatalogEntry {
            sprite_url: entry.sprites.front_default,
            name: name.to_string(),
        })
    }
}
