//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check store naming (database/collection usable as storage keys)
//! - Check the catalog endpoint is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must not contain path separators (got '{value}')")]
    PathSeparator { field: &'static str, value: String },

    #[error("catalog.base_url '{0}' is not an absolute http(s) URL")]
    CatalogUrl(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.store.connection_string.trim().is_empty() {
        errors.push(ValidationError::Empty("store.connection_string"));
    }

    for (field, value) in [
        ("store.database", &config.store.database),
        ("store.collection", &config.store.collection),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty(field));
        } else if value.contains(['/', '\\']) || value == ".." {
            errors.push(ValidationError::PathSeparator {
                field,
                value: value.clone(),
            });
        }
    }

    let catalog_ok = Url::parse(&config.catalog.base_url)
        .map(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
        .unwrap_or(false);
    if !catalog_ok {
        errors.push(ValidationError::CatalogUrl(config.catalog.base_url.clone()));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
