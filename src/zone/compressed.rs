//! Compressed integer codec.
//!
//! Counts and ids in newer streams are written in 1 to 5 bytes. The lead
//! byte's high bits select the width and its low bits hold the most
//! significant part of the value; continuation bytes follow big-endian:
//!
//! | lead byte | total bytes | value bits |
//! |---|---|---|
//! | `0xxxxxxx` | 1 | 7 |
//! | `10xxxxxx` | 2 | 14 |
//! | `110xxxxx` | 3 | 21 |
//! | `1110xxxx` | 4 | 28 |
//! | `11110000` | 5 | 32 |

use smallvec::{SmallVec, smallvec};

use super::StarZone;
use crate::common::Diagnostic;
use crate::input::StarInput;

impl StarZone {
    /// Read a compressed unsigned integer.
    ///
    /// A lead byte outside the table above, or a value cut short by the end
    /// of data, yields `None`, a `MalformedCompressedInt` diagnostic, and an
    /// unmoved cursor.
    pub fn read_compressed_ulong(&mut self) -> Option<u32> {
        let start = self.input.tell();
        let value = decode(&mut self.input);
        if value.is_none() {
            self.input.seek(start);
            self.diagnostics
                .push(Diagnostic::MalformedCompressedInt { offset: start });
        }
        value
    }

    /// Read a compressed signed integer (two's complement of the unsigned form).
    pub fn read_compressed_long(&mut self) -> Option<i32> {
        self.read_compressed_ulong().map(|value| value as i32)
    }
}

fn decode(input: &mut StarInput) -> Option<u32> {
    let lead = input.read_u8()?;
    let (extra, mask) = match lead {
        0x00..=0x7F => return Some(u32::from(lead)),
        0x80..=0xBF => (1, 0x3F),
        0xC0..=0xDF => (2, 0x1F),
        0xE0..=0xEF => (3, 0x0F),
        0xF0 => (4, 0x00),
        _ => return None,
    };
    let mut value = u32::from(lead & mask);
    for _ in 0..extra {
        value = (value << 8) | u32::from(input.read_u8()?);
    }
    Some(value)
}

/// Encode `value` in the shortest compressed form.
pub fn encode_compressed_ulong(value: u32) -> SmallVec<[u8; 5]> {
    let [b0, b1, b2, b3] = value.to_be_bytes();
    if value < 0x80 {
        smallvec![b3]
    } else if value < 0x4000 {
        smallvec![0x80 | b2, b3]
    } else if value < 0x20_0000 {
        smallvec![0xC0 | b1, b2, b3]
    } else if value < 0x1000_0000 {
        smallvec![0xE0 | b0, b1, b2, b3]
    } else {
        smallvec![0xF0, b0, b1, b2, b3]
    }
}

/// Encode a signed value through its two's complement bits.
pub fn encode_compressed_long(value: i32) -> SmallVec<[u8; 5]> {
    encode_compressed_ulong(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecoderConfig;
    use proptest::prelude::*;
    use rstest::rstest;

    fn zone(bytes: &[u8]) -> StarZone {
        let mut data = bytes.to_vec();
        // keep the stream non-empty for the zero-length cases
        data.push(0xAA);
        StarZone::new(StarInput::new(data), "test", DecoderConfig::new()).unwrap()
    }

    #[rstest]
    #[case(&[0x05], 5)]
    #[case(&[0x7F], 0x7F)]
    #[case(&[0x81, 0x00], 0x100)]
    #[case(&[0xBF, 0xFF], 0x3FFF)]
    #[case(&[0xC1, 0x02, 0x03], 0x01_0203)]
    #[case(&[0xEF, 0xFF, 0xFF, 0xFF], 0x0FFF_FFFF)]
    #[case(&[0xF0, 0x12, 0x34, 0x56, 0x78], 0x1234_5678)]
    fn test_decode_table(#[case] bytes: &[u8], #[case] expected: u32) {
        let mut zone = zone(bytes);
        assert_eq!(zone.read_compressed_ulong(), Some(expected));
        assert_eq!(zone.tell(), bytes.len() as u64);
    }

    #[rstest]
    #[case(&[0xF1, 0, 0, 0, 0])]
    #[case(&[0xFF])]
    fn test_invalid_lead_restores_cursor(#[case] bytes: &[u8]) {
        let mut zone = zone(bytes);
        assert_eq!(zone.read_compressed_ulong(), None);
        assert_eq!(zone.tell(), 0);
        assert!(zone.diagnostics().any(|d| matches!(
            d,
            Diagnostic::MalformedCompressedInt { offset: 0 }
        )));
    }

    #[test]
    fn test_truncated_value() {
        let mut zone = StarZone::new(
            StarInput::new(vec![0x01, 0xE0, 0x01]),
            "test",
            DecoderConfig::new(),
        )
        .unwrap();
        assert_eq!(zone.read_compressed_ulong(), Some(1));
        assert_eq!(zone.read_compressed_ulong(), None);
        assert_eq!(zone.tell(), 1);
    }

    #[test]
    fn test_signed_reinterpretation() {
        let mut zone = zone(&encode_compressed_long(-2));
        assert_eq!(zone.read_compressed_long(), Some(-2));
    }

    #[test]
    fn test_encode_widths() {
        assert_eq!(encode_compressed_ulong(0x7F).len(), 1);
        assert_eq!(encode_compressed_ulong(0x80).len(), 2);
        assert_eq!(encode_compressed_ulong(0x4000).len(), 3);
        assert_eq!(encode_compressed_ulong(0x20_0000).len(), 4);
        assert_eq!(encode_compressed_ulong(0x1000_0000).len(), 5);
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(value in any::<u32>()) {
            let encoded = encode_compressed_ulong(value);
            let mut zone = zone(&encoded);
            prop_assert_eq!(zone.read_compressed_ulong(), Some(value));
            prop_assert_eq!(zone.tell(), encoded.len() as u64);
        }
    }
}
