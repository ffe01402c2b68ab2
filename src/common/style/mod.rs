//! Common style value types.
//!
//! Colours and lengths as they appear in decoded attributes and in the
//! properties projected onto style state.

// Submodule declarations
pub mod color;
pub mod len;

// Re-exports
pub use color::StarColor;
pub use len::Length;
