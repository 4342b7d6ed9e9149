//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routes)
//!     → request.rs (x-request-id assigned and echoed)
//!     → handlers.rs (normalize → one store/catalog call)
//!     → table.rs / views.rs (view-model → HTML)
//!     → error.rs (failure → status code + body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;
pub mod table;
pub mod views;

pub use error::{AppError, StoreOp};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
pub use table::{render_table, NO_ENTRIES_PLACEHOLDER};
pub use views::{render, View};
