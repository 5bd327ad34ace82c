//! Unified error type for blipkit.
//!
//! Decoding failures are scoped to a single Data stream element and are
//! recovered by the scanner; only persistence and configuration failures
//! reach the caller. See [`Error::is_recoverable`].

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
