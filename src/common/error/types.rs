//! Unified error types for stardoc.
//!
//! Only conditions that make a whole stream unusable are errors. Everything
//! the record engine can recover from is reported as a
//! [`Diagnostic`](super::Diagnostic) instead.
use thiserror::Error;

/// Main error type for stardoc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No backing store for the input
    #[error("No input data")]
    NoInput,

    /// Missing or invalid top-level stream header
    #[error("Invalid stream header: {0}")]
    InvalidHeader(String),

    /// Header found but written by a format revision we cannot read
    #[error("Unsupported format version 0x{0:04x}")]
    UnsupportedVersion(u16),

    /// Corrupted or malformed stream
    #[error("Corrupted stream: {0}")]
    Corrupted(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for stardoc operations.
pub type Result<T> = std::result::Result<T, Error>;
