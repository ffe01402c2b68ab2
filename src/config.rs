//! Decoder configuration.
//!
//! Controls the recursion cap applied to nested records and item sets, the
//! per-family tolerance for short reads at record close, and the charset
//! assumed when a stream does not declare one.
//!
//! # Examples
//!
//! ```rust
//! use stardoc::config::{DecoderConfig, SlopTolerance};
//!
//! let config = DecoderConfig::new()
//!     .with_max_depth(32)
//!     .with_slop(SlopTolerance::strict());
//! assert_eq!(config.max_depth, 32);
//! ```
use serde::{Deserialize, Serialize};

use crate::zone::RecordFamily;

/// Per-family number of unread bytes accepted silently when a record closes.
///
/// Legacy writers pad some records by a few bytes that no reader consumes.
/// Closing such a record always seeks to its declared end; the tolerance
/// only decides whether the skip is reported as routine slop (debug log)
/// or as unread data (warning).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopTolerance {
    pub sw: u64,
    pub sc: u64,
    pub sdr: u64,
    pub plain: u64,
    pub compat: u64,
    pub sfx: u64,
    pub multi: u64,
    pub flag: u64,
}

impl Default for SlopTolerance {
    fn default() -> Self {
        Self {
            sw: 0,
            sc: 2,
            sdr: 4,
            plain: 0,
            compat: 0,
            sfx: 0,
            multi: 0,
            // sub-fields a caller skips are routine; the nibble caps them at 15
            flag: 15,
        }
    }
}

impl SlopTolerance {
    /// No tolerance for any family: every skipped byte is reported as unread.
    pub fn strict() -> Self {
        Self {
            sw: 0,
            sc: 0,
            sdr: 0,
            plain: 0,
            compat: 0,
            sfx: 0,
            multi: 0,
            flag: 0,
        }
    }

    /// Tolerance for one record family.
    pub fn for_family(&self, family: RecordFamily) -> u64 {
        match family {
            RecordFamily::Sw => self.sw,
            RecordFamily::Sc => self.sc,
            RecordFamily::Sdr => self.sdr,
            RecordFamily::Plain => self.plain,
            RecordFamily::VersionCompat => self.compat,
            RecordFamily::Sfx => self.sfx,
            RecordFamily::Multi | RecordFamily::MultiEntry => self.multi,
            RecordFamily::Flag => self.flag,
        }
    }

    /// Set the tolerance for one record family.
    pub fn set(&mut self, family: RecordFamily, bytes: u64) {
        let slot = match family {
            RecordFamily::Sw => &mut self.sw,
            RecordFamily::Sc => &mut self.sc,
            RecordFamily::Sdr => &mut self.sdr,
            RecordFamily::Plain => &mut self.plain,
            RecordFamily::VersionCompat => &mut self.compat,
            RecordFamily::Sfx => &mut self.sfx,
            RecordFamily::Multi | RecordFamily::MultiEntry => &mut self.multi,
            RecordFamily::Flag => &mut self.flag,
        };
        *slot = bytes;
    }
}

/// Configuration options for stream decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Maximum nesting of records and item sets
    pub max_depth: usize,
    /// Close tolerance per record family
    pub slop: SlopTolerance,
    /// Charset id assumed until a header or string pool declares one
    pub default_charset: u8,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            slop: SlopTolerance::default(),
            default_charset: 1,
        }
    }
}

impl DecoderConfig {
    /// Create a new `DecoderConfig` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting cap for records and item sets.
    #[inline]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Replace the close tolerance table.
    #[inline]
    pub fn with_slop(mut self, slop: SlopTolerance) -> Self {
        self.slop = slop;
        self
    }

    /// Set the charset assumed before the stream declares one.
    #[inline]
    pub fn with_default_charset(mut self, charset: u8) -> Self {
        self.default_charset = charset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.slop.for_family(RecordFamily::Sdr), 4);
        assert_eq!(config.slop.for_family(RecordFamily::Sw), 0);
        assert_eq!(config.slop.for_family(RecordFamily::Flag), 15);
        assert_eq!(SlopTolerance::strict().for_family(RecordFamily::Flag), 0);
        assert_eq!(config.default_charset, 1);
    }

    #[test]
    fn test_set_family() {
        let mut slop = SlopTolerance::strict();
        slop.set(RecordFamily::MultiEntry, 8);
        assert_eq!(slop.for_family(RecordFamily::Multi), 8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DecoderConfig =
            serde_json::from_str(r#"{"max_depth": 16, "slop": {"sw": 2}}"#).unwrap();
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.slop.sw, 2);
        assert_eq!(config.slop.sdr, 4);
        assert_eq!(config.default_charset, 1);
    }
}
