//! Record families, probes and open-record frames.
//!
//! StarOffice frames every structure in a stream with a small header giving
//! a tag and the record's extent. Different components of the suite grew
//! different header shapes; each is a [`RecordFamily`]:
//!
//! | family | header | end |
//! |---|---|---|
//! | `Sw` | u32: low byte printable tag, high 24 bits size incl. header | start + size |
//! | `Sc` | u16 signature `0x42xx` + u32 data size | start + 6 + size |
//! | `Sdr` | 4 ASCII magic bytes + u16 version + u32 size incl. header | start + size |
//! | `Plain` | u32 size incl. header | start + size |
//! | `VersionCompat` | u16 version + u32 size | start + 6 + size |
//! | `Sfx` | u32: low byte pre-tag, high 24 bits size after header | start + 4 + size |
//! | `Flag` | u8: high nibble flags, low nibble byte count | start + 1 + count |

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Header shape of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordFamily {
    /// Writer records, tagged with one printable character
    Sw,
    /// Calc records, tagged with a 16-bit signature word
    Sc,
    /// Drawing-layer headers, tagged with a 4-byte magic and a version
    Sdr,
    /// Untagged records with a 32-bit length
    Plain,
    /// Version compatibility records (u16 version + u32 length)
    VersionCompat,
    /// Sfx mini/single records
    Sfx,
    /// Calc multi-records framed by a trailing size table
    Multi,
    /// One entry of a Calc multi-record
    MultiEntry,
    /// Flag sub-zone
    Flag,
}

impl fmt::Display for RecordFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordFamily::Sw => "Sw",
            RecordFamily::Sc => "Sc",
            RecordFamily::Sdr => "Sdr",
            RecordFamily::Plain => "Plain",
            RecordFamily::VersionCompat => "VersionCompat",
            RecordFamily::Sfx => "Sfx",
            RecordFamily::Multi => "Multi",
            RecordFamily::MultiEntry => "MultiEntry",
            RecordFamily::Flag => "Flag",
        };
        f.write_str(name)
    }
}

/// First and last valid Calc record signatures.
pub const SC_ID_FIRST: u16 = 0x4200;
pub const SC_ID_LAST: u16 = 0x42FF;

/// Sfx pre-tag marking the end of a record list.
pub const SFX_PRETAG_EOR: u8 = 0xFF;
/// Sfx pre-tag announcing an extended header.
pub const SFX_PRETAG_EXT: u8 = 0x00;

/// What an `open_record` call expects to find at the cursor.
///
/// `None` expectations accept any well-formed tag of the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordProbe {
    Sw(Option<u8>),
    Sc(Option<u16>),
    Sdr(Option<[u8; 4]>),
    Plain,
    VersionCompat,
    /// Expected extended tag; `Some` rejects records without an extended header
    Sfx(Option<u16>),
}

impl RecordProbe {
    pub fn family(&self) -> RecordFamily {
        match self {
            RecordProbe::Sw(_) => RecordFamily::Sw,
            RecordProbe::Sc(_) => RecordFamily::Sc,
            RecordProbe::Sdr(_) => RecordFamily::Sdr,
            RecordProbe::Plain => RecordFamily::Plain,
            RecordProbe::VersionCompat => RecordFamily::VersionCompat,
            RecordProbe::Sfx(_) => RecordFamily::Sfx,
        }
    }
}

/// Tag value found in a record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordTag {
    /// Single printable character (Sw)
    Char(u8),
    /// 16-bit signature or extended tag (Sc, Sfx, Multi)
    Id(u16),
    /// Four-byte ASCII magic (Sdr)
    Magic([u8; 4]),
    /// Untagged (Plain, VersionCompat, Sfx without extension, entries)
    Anonymous,
    /// Flag zone; carries the flag bits
    Flags(u8),
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordTag::Char(c) => write!(f, "{}", char::from(*c)),
            RecordTag::Id(id) => write!(f, "0x{:04x}", id),
            RecordTag::Magic(m) => write!(f, "{}", String::from_utf8_lossy(m)),
            RecordTag::Anonymous => f.write_str("@"),
            RecordTag::Flags(bits) => write!(f, "flags:{:02x}", bits),
        }
    }
}

/// Extended Sfx header (pre-tag 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfxExtension {
    pub record_type: u8,
    pub version: u8,
    pub tag: u16,
}

/// Decoded header of an open record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub family: RecordFamily,
    pub tag: RecordTag,
    /// Offset of the first header byte
    pub start: u64,
    /// Declared end after healing against the parent and the stream
    pub end: u64,
    /// Header version for families that carry one (Sdr, VersionCompat)
    pub version: Option<u16>,
    pub sfx: Option<SfxExtension>,
}

impl RecordHeader {
    /// Record length from its first header byte to its end.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a record close reconciled the cursor with the record end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseStatus {
    /// The body was read exactly
    Exact,
    /// Unread bytes within the family's slop tolerance were skipped
    Tolerated(u64),
    /// Unread bytes beyond the tolerance were skipped
    Skipped(u64),
    /// The body over-read; the cursor was moved back
    Overrun(u64),
    /// There was no matching open record
    Unbalanced,
}

/// Size table state of an open multi-record.
#[derive(Debug, Clone, Default)]
pub(crate) struct MultiState {
    pub sizes: VecDeque<u32>,
    pub data_start: u64,
    pub data_end: u64,
}

/// One entry of the open-record stack.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub header: RecordHeader,
    pub multi: Option<MultiState>,
}

#[inline]
pub(crate) fn is_printable_tag(byte: u8) -> bool {
    byte.is_ascii_graphic()
}
