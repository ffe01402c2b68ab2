//! Unified error types for stardoc.
//!
//! [`Error`] covers the fatal cases (no input, unreadable stream header);
//! [`Diagnostic`] covers everything the decoder recovers from locally.

// Submodule declarations
pub mod conversions;
pub mod diagnostic;
pub mod types;

// Re-exports
pub use diagnostic::{Diagnostic, Diagnostics};
pub use types::{Error, Result};
