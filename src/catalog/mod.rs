//! Remote catalog lookup subsystem.
//!
//! # Data Flow
//! ```text
//! normalized name
//!     → client.rs (GET {base_url}/{name})
//!     → types.rs (decode sprite reference)
//!     → CatalogEntry { sprite_url, name }   or   CatalogError::NotFound
//! ```
//!
//! # Design Decisions
//! - One request per lookup: no retries, no caching
//! - Transport defaults only; no timeout override
//! - "absent" and "unreachable" are indistinguishable to callers; causes are logged

pub mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{CatalogEntry, CatalogError, CatalogResult};
