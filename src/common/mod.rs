//! Common types, traits, and utilities shared by the record engine and the
//! attribute decoders.

// Submodule declarations
pub mod binary;
pub mod encoding;
pub mod error;
pub mod style;

// Re-exports for convenience
pub use error::{Diagnostic, Diagnostics, Error, Result};
pub use style::{Length, StarColor};
