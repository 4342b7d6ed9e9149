//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! STARTING   store connected, listener bound     → mark_listening()
//! LISTENING  console.rs reads operator lines     → "stop" (or Ctrl+C, signals.rs)
//! SHUTTING_DOWN  shutdown.rs broadcasts to the HTTP server, closes the store
//! TERMINATED exit code 0 (closed) or 1 (close failed)
//! ```
//!
//! # Design Decisions
//! - The LISTENING → SHUTTING_DOWN compare-and-swap is the only gate on close,
//!   so the store is closed at most once however many triggers race
//! - No drain period: requests still in flight may fail once the store closes
//! - End of operator input is not a shutdown command

pub mod console;
pub mod shutdown;
pub mod signals;
pub mod state;

pub use console::{is_stop_command, OperatorConsole, STOP_COMMAND};
pub use shutdown::{Lifecycle, ShutdownError, ShutdownOutcome};
pub use state::LifecycleState;
