//! Binary data parsing utilities.
//!
//! Fixed-width integer and float reads from byte slices in either byte
//! order. StarOffice streams are little-endian by default but the stream
//! header may switch a whole stream to big-endian (files written on
//! 68k/PowerPC Macs and SPARC), so every reader takes a [`ByteOrder`].

use thiserror::Error;
use zerocopy::{BE, F64, FromBytes, I16, I32, LE, U16, U32};

/// Failure of a fixed-width read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// The slice ends before the value does
    #[error("{width}-byte read at offset {offset} past the end of {available} byte(s)")]
    ShortRead {
        offset: usize,
        width: usize,
        available: usize,
    },
    /// The bytes do not form a value of the requested type
    #[error("cannot read {kind} at offset {offset}")]
    Layout { kind: &'static str, offset: usize },
}

pub type BinaryResult<T> = Result<T, BinaryError>;

/// Byte order of multi-byte values in a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

#[inline]
fn window(data: &[u8], offset: usize, width: usize) -> BinaryResult<&[u8]> {
    let short = BinaryError::ShortRead {
        offset,
        width,
        available: data.len(),
    };
    match offset.checked_add(width) {
        Some(end) if end <= data.len() => Ok(&data[offset..end]),
        _ => Err(short),
    }
}

/// Read a u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use stardoc::common::binary::{read_u16, ByteOrder};
/// let data = [0x34, 0x12];
/// assert_eq!(read_u16(&data, 0, ByteOrder::Little).unwrap(), 0x1234);
/// assert_eq!(read_u16(&data, 0, ByteOrder::Big).unwrap(), 0x3412);
/// ```
#[inline]
pub fn read_u16(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<u16> {
    let bytes = window(data, offset, 2)?;
    let value = match order {
        ByteOrder::Little => U16::<LE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
        ByteOrder::Big => U16::<BE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
    };
    value.map_err(|_| BinaryError::Layout { kind: "u16", offset })
}

/// Read an i16 from a byte slice at the given offset.
#[inline]
pub fn read_i16(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<i16> {
    let bytes = window(data, offset, 2)?;
    let value = match order {
        ByteOrder::Little => I16::<LE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
        ByteOrder::Big => I16::<BE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
    };
    value.map_err(|_| BinaryError::Layout { kind: "i16", offset })
}

/// Read a u32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use stardoc::common::binary::{read_u32, ByteOrder};
/// let data = [0x78, 0x56, 0x34, 0x12];
/// assert_eq!(read_u32(&data, 0, ByteOrder::Little).unwrap(), 0x12345678);
/// ```
#[inline]
pub fn read_u32(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<u32> {
    let bytes = window(data, offset, 4)?;
    let value = match order {
        ByteOrder::Little => U32::<LE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
        ByteOrder::Big => U32::<BE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
    };
    value.map_err(|_| BinaryError::Layout { kind: "u32", offset })
}

/// Read an i32 from a byte slice at the given offset.
#[inline]
pub fn read_i32(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<i32> {
    let bytes = window(data, offset, 4)?;
    let value = match order {
        ByteOrder::Little => I32::<LE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
        ByteOrder::Big => I32::<BE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
    };
    value.map_err(|_| BinaryError::Layout { kind: "i32", offset })
}

/// Read a 24-bit unsigned value (used by record headers).
#[inline]
pub fn read_u24(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<u32> {
    let b = window(data, offset, 3)?;
    Ok(match order {
        ByteOrder::Little => u32::from(b[0]) | (u32::from(b[1]) << 8) | (u32::from(b[2]) << 16),
        ByteOrder::Big => (u32::from(b[0]) << 16) | (u32::from(b[1]) << 8) | u32::from(b[2]),
    })
}

/// Read an f64 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use stardoc::common::binary::{read_f64, ByteOrder};
/// let data = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F];
/// assert!((read_f64(&data, 0, ByteOrder::Little).unwrap() - 1.0).abs() < f64::EPSILON);
/// ```
#[inline]
pub fn read_f64(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<f64> {
    let bytes = window(data, offset, 8)?;
    let value = match order {
        ByteOrder::Little => F64::<LE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
        ByteOrder::Big => F64::<BE>::read_from_bytes(bytes).map(|v| v.get()).map_err(drop),
    };
    value.map_err(|_| BinaryError::Layout { kind: "f64", offset })
}

/// Decode UTF-16 code units, stopping at the first NUL.
///
/// Unpaired surrogates are replaced with U+FFFD.
pub fn decode_utf16(units: &[u16]) -> String {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    char::decode_utf16(units[..end].iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_reads_fail() {
        let data = [0x01, 0x02, 0x03];
        assert!(read_u32(&data, 0, ByteOrder::Little).is_err());
        assert!(read_u16(&data, 2, ByteOrder::Little).is_err());
        assert!(read_u16(&data, usize::MAX, ByteOrder::Little).is_err());
    }

    #[test]
    fn test_signed_reads() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(read_i16(&data, 0, ByteOrder::Little).unwrap(), -1);
        assert_eq!(read_i32(&data, 0, ByteOrder::Big).unwrap(), -1);
    }

    #[test]
    fn test_u24_both_orders() {
        let data = [0x01, 0x02, 0x03];
        assert_eq!(read_u24(&data, 0, ByteOrder::Little).unwrap(), 0x030201);
        assert_eq!(read_u24(&data, 0, ByteOrder::Big).unwrap(), 0x010203);
    }

    #[test]
    fn test_decode_utf16_stops_at_nul() {
        let units = [0x48, 0x69, 0x00, 0x41];
        assert_eq!(decode_utf16(&units), "Hi");
        assert_eq!(decode_utf16(&[0xD800, 0x41]), "\u{FFFD}A");
    }
}
