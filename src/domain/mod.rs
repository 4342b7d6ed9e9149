//! Record domain types and input normalization.
//!
//! # Data Flow
//! ```text
//! form fields (untyped text)
//!     → normalize.rs (trim / lower-case / integer parse)
//!     → Record (typed, immutable once stored)
//!     → store subsystem
//! ```

pub mod normalize;
pub mod record;

pub use normalize::{
    format_date_added, normalize_name, normalize_record_input, parse_level, LookupForm,
    RecordForm, ValidationError,
};
pub use record::Record;
