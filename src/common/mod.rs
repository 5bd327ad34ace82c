//! Common types and utilities shared by the record decoders.

// Submodule declarations
pub mod binary;
pub mod error;

// Re-exports for convenience
pub use binary::ByteCursor;
pub use error::{Error, Result};
