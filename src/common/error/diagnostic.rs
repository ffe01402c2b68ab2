//! Recoverable decoding findings.
//!
//! Legacy StarOffice streams have no authoritative description and many
//! files in the wild are slightly damaged, so almost nothing the record
//! engine meets is fatal. Every local problem becomes a [`Diagnostic`]: it
//! is logged when recorded, kept for inspection, and the decoder carries on
//! from the nearest enclosing record boundary.

use log::{debug, trace, warn};
use thiserror::Error;

use crate::attribute::AttributeKey;
use crate::zone::RecordFamily;

/// A locally recovered decoding problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A speculative record probe did not match; the caller may try another kind.
    #[error("{family} record probe failed at offset {offset}")]
    TagMismatch { family: RecordFamily, offset: u64 },

    /// A record declared an end beyond its parent or beyond the input.
    #[error("{family} record '{tag}' at {start} declares end {declared}, healed to {healed}")]
    TruncatedRecord {
        family: RecordFamily,
        tag: String,
        start: u64,
        declared: u64,
        healed: u64,
    },

    /// Bytes left unread when a record was closed.
    #[error("{family} record '{label}': skipped {count} unread byte(s){}", slop_suffix(.tolerated))]
    UnreadBytes {
        family: RecordFamily,
        label: String,
        count: u64,
        tolerated: bool,
    },

    /// The cursor went past the record end before the record was closed.
    #[error("{family} record '{label}': read {count} byte(s) past its end")]
    Overrun {
        family: RecordFamily,
        label: String,
        count: u64,
    },

    /// A close did not match the innermost open record.
    #[error("closing '{expected}' but innermost open record is '{found}'")]
    UnbalancedClose { expected: String, found: String },

    /// The which-id has no registered prototype.
    #[error("unknown attribute {key}")]
    UnknownAttribute { key: AttributeKey },

    /// A style or item set refers back to itself.
    #[error("cycle detected at {what}")]
    CycleDetected { what: String },

    /// A version-gated layout could not be read consistently.
    #[error("cannot read {name} ({key}) at item version {version}")]
    VersionMismatch {
        key: AttributeKey,
        name: &'static str,
        version: u16,
    },

    /// An enumerated raw value outside the known range.
    #[error("{name}: unknown value {value}")]
    UnknownEnumValue { name: &'static str, value: i64 },

    /// Nesting went deeper than the configured cap.
    #[error("nesting depth {depth} exceeds the limit")]
    DepthExceeded { depth: usize },

    /// A compressed integer used an invalid lead byte or was truncated.
    #[error("malformed compressed integer at offset {offset}")]
    MalformedCompressedInt { offset: u64 },

    /// A named style was referenced but is not in the pool.
    #[error("style '{name}' not found")]
    MissingStyle { name: String },

    /// A surrogate index did not resolve to a pooled item.
    #[error("surrogate {index} of {key} not found")]
    UnknownSurrogate { key: AttributeKey, index: u16 },
}

fn slop_suffix(tolerated: &bool) -> &'static str {
    if *tolerated { " (within slop)" } else { "" }
}

impl Diagnostic {
    fn log(&self) {
        match self {
            Diagnostic::TagMismatch { .. } => trace!("{}", self),
            Diagnostic::UnreadBytes {
                tolerated: true, ..
            } => debug!("{}", self),
            _ => warn!("{}", self),
        }
    }
}

/// Collector for diagnostics found during one decode or apply pass.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.entries.push(diagnostic);
    }

    /// All diagnostics recorded so far.
    #[inline]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any recorded diagnostic matches `pred`.
    pub fn any(&self, pred: impl Fn(&Diagnostic) -> bool) -> bool {
        self.entries.iter().any(pred)
    }

    /// Move every entry of `other` into this collector without logging again.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Drop all entries, returning them.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}
