//! Stream header, string pool and record-size table.

use bitflags::bitflags;
use log::debug;

use super::version::SWG_POOLIDS;
use super::{RecordProbe, StarZone};
use crate::common::binary::decode_utf16;
use crate::common::encoding::decode_bytes;
use crate::common::{Error, Result};

/// Magic strings of the Writer stream header, by format generation.
const SW_MAGICS: [(&[u8; 7], u8); 3] = [(b"SW3HDR\0", 3), (b"SW4HDR\0", 4), (b"SW5HDR\0", 5)];

/// Pool id meaning "no name".
pub const POOL_ID_NONE: u16 = 0xFFFF;
/// Pool id meaning "empty name".
pub const POOL_ID_EMPTY: u16 = 0xFFF0;

bitflags! {
    /// File flags of the Writer stream header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SwFileFlags: u16 {
        const BLOCK_NAME = 0x0002;
        const HAS_PASSWORD = 0x0008;
        const PORT_GRAPHICS = 0x0010;
        const HAS_PAGE_NUMBERS = 0x0100;
        const NO_FRAMES = 0x4000;
        const BAD_FILE = 0x8000;
    }
}

/// Decoded Writer stream header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwHeader {
    /// Format generation (3, 4 or 5)
    pub generation: u8,
    pub version: u16,
    pub file_flags: SwFileFlags,
    pub doc_flags: i32,
    /// Position of the record-size table, 0 when absent
    pub record_size_table: u32,
    pub redline_mode: Option<u8>,
    pub compat_version: Option<u8>,
    pub password: [u8; 16],
    pub charset: u8,
    pub gui: u8,
}

/// One entry of the string pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolName {
    /// Predefined-style id (0 for user names or old streams)
    pub pool_id: u16,
    pub name: String,
}

impl StarZone {
    /// Read the Writer stream header at the cursor.
    ///
    /// This is the only fatal read of the engine: without a recognisable
    /// header nothing else in the stream can be located.
    pub fn read_sw_header(&mut self) -> Result<SwHeader> {
        let magic = self
            .input
            .read_bytes(7)
            .ok_or_else(|| Error::InvalidHeader("stream too short".to_string()))?;
        let generation = SW_MAGICS
            .iter()
            .find(|(m, _)| m.as_slice() == &magic[..])
            .map(|&(_, generation)| generation)
            .ok_or_else(|| {
                Error::InvalidHeader(format!("unknown magic {:?}", String::from_utf8_lossy(&magic)))
            })?;

        let truncated = || Error::InvalidHeader("header truncated".to_string());
        let header_len = self.input.read_u8().ok_or_else(truncated)?;
        let header_end = self.input.tell() + u64::from(header_len);
        if !self.input.check_position(header_end) {
            return Err(truncated());
        }

        let version = self.input.read_u16().ok_or_else(truncated)?;
        let file_flags = SwFileFlags::from_bits_retain(self.input.read_u16().ok_or_else(truncated)?);
        let doc_flags = self.input.read_i32().ok_or_else(truncated)?;
        let record_size_table = self.input.read_u32().ok_or_else(truncated)?;
        // reserved
        self.input.read_u32().ok_or_else(truncated)?;
        let (redline_mode, compat_version) = if version > 0x0201 {
            (
                Some(self.input.read_u8().ok_or_else(truncated)?),
                Some(self.input.read_u8().ok_or_else(truncated)?),
            )
        } else {
            (None, None)
        };
        let digest = self.input.read_bytes(16).ok_or_else(truncated)?;
        let mut password = [0u8; 16];
        password.copy_from_slice(&digest);
        let charset = self.input.read_u8().ok_or_else(truncated)?;
        let gui = self.input.read_u8().ok_or_else(truncated)?;
        if self.input.tell() > header_end {
            return Err(truncated());
        }
        self.input.seek(header_end);

        self.version = version;
        self.charset = charset;
        debug!(
            "{}: SW{}HDR version {:#06x}, charset {}",
            self.name, generation, version, charset
        );
        Ok(SwHeader {
            generation,
            version,
            file_flags,
            doc_flags,
            record_size_table,
            redline_mode,
            compat_version,
            password,
            charset,
            gui,
        })
    }

    /// Load the record-size table (a `'%'` record of position/size pairs) found at `pos`.
    ///
    /// The cursor is restored afterwards. Returns `false` when no table
    /// record is found there.
    pub fn read_record_size_table(&mut self, pos: u64) -> bool {
        let saved = self.input.tell();
        if !self.input.seek(pos) {
            self.input.seek(saved);
            return false;
        }
        let found = match self.scope(RecordProbe::Sw(Some(b'%')), "RecordSizes") {
            Some(mut record) => {
                let end = record.end();
                while record.tell() + 8 <= end {
                    let (Some(at), Some(size)) =
                        (record.input.read_u32(), record.input.read_u32())
                    else {
                        break;
                    };
                    record.record_sizes.insert(u64::from(at), u64::from(size));
                }
                true
            },
            None => false,
        };
        self.input.seek(saved);
        found
    }

    /// Read the string pool (a `'!'` record) at the cursor.
    ///
    /// From `SWG_POOLIDS` on the record starts with the pool charset and
    /// every name carries its predefined-style id.
    pub fn read_string_pool(&mut self) -> bool {
        let Some(mut record) = self.scope(RecordProbe::Sw(Some(b'!')), "StringPool") else {
            return false;
        };
        let with_ids = record.is_compatible_with(SWG_POOLIDS);
        if with_ids {
            match record.input.read_u8() {
                Some(charset) => record.charset = charset,
                None => return false,
            }
        }
        let Some(count) = record.input.read_u16() else {
            return false;
        };
        let mut names = Vec::with_capacity(usize::from(count).min(1024));
        for _ in 0..count {
            let pool_id = if with_ids {
                match record.input.read_u16() {
                    Some(id) => id,
                    None => break,
                }
            } else {
                0
            };
            let Some(name) = record.read_byte_string() else {
                break;
            };
            names.push(PoolName { pool_id, name });
        }
        let complete = names.len() == usize::from(count);
        record.pool_names = names;
        complete
    }

    /// Resolve a string-pool id to a name.
    ///
    /// `0xFFFF` means no name; `0xFFF0` is the empty name.
    pub fn get_pool_name(&self, id: u16) -> Option<&str> {
        match id {
            POOL_ID_NONE => None,
            POOL_ID_EMPTY => Some(""),
            _ => self
                .pool_names
                .get(usize::from(id))
                .map(|entry| entry.name.as_str()),
        }
    }

    /// Entries of the string pool.
    #[inline]
    pub fn pool_names(&self) -> &[PoolName] {
        &self.pool_names
    }

    /// Replace the string pool (for streams whose pool lives elsewhere).
    pub fn set_pool_names(&mut self, names: Vec<PoolName>) {
        self.pool_names = names;
    }

    /// Read a u16-length byte string in the stream charset.
    pub fn read_byte_string(&mut self) -> Option<String> {
        let start = self.input.tell();
        let len = self.input.read_u16()?;
        match self.input.read_bytes(usize::from(len)) {
            Some(bytes) => Some(decode_bytes(&bytes, self.charset)),
            None => {
                self.input.seek(start);
                None
            },
        }
    }

    /// Read a u16-count UTF-16 string.
    pub fn read_unicode_string(&mut self) -> Option<String> {
        let start = self.input.tell();
        let count = self.input.read_u16()?;
        let mut units = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            match self.input.read_u16() {
                Some(unit) => units.push(unit),
                None => {
                    self.input.seek(start);
                    return None;
                },
            }
        }
        Some(decode_utf16(&units))
    }
}
