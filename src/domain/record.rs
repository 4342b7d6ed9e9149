//! The persisted record type.

use serde::{Deserialize, Serialize};

/// A stored entry: name, category, level and the date it was added.
///
/// Field names on the wire match the stored document layout
/// (`name`, `type`, `level`, `dateAdded`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Lower-cased, trimmed, non-empty.
    pub name: String,

    /// Free-form category, stored as submitted.
    #[serde(rename = "type")]
    pub category: String,

    pub level: i64,

    /// Server-assigned date stamp, `M/D/YYYY`.
    #[serde(rename = "dateAdded")]
    pub date_added: String,
}
