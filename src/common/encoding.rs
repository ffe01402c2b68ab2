//! Character encoding utilities for StarOffice byte strings.
//!
//! StarOffice stores most strings as 8-bit byte strings in the charset the
//! stream header (or a string pool) declares, identified by a one-byte
//! text-encoding id. This module maps those ids to `encoding_rs` encodings
//! and decodes byte strings to UTF-8.

use encoding_rs::Encoding;

/// Charset id used for symbol fonts; bytes are mapped to the U+F000 private area.
pub const CHARSET_SYMBOL: u8 = 10;

/// Charset id for UTF-8 byte strings.
pub const CHARSET_UTF8: u8 = 76;

/// Map a StarOffice text-encoding id to an `encoding_rs` encoding.
///
/// Returns `None` for ids that have no `encoding_rs` counterpart (including
/// the symbol charset, which needs special handling).
///
/// # Examples
/// ```
/// use stardoc::common::encoding::charset_to_encoding;
///
/// let encoding = charset_to_encoding(1).unwrap();
/// assert_eq!(encoding.name(), "windows-1252");
/// ```
#[inline]
pub fn charset_to_encoding(charset: u8) -> Option<&'static Encoding> {
    match charset {
        // 0 = "don't know": assume the Western default
        0 | 1 => Some(encoding_rs::WINDOWS_1252),
        2 => Some(encoding_rs::MACINTOSH),
        // DOS codepages (approximations)
        3..=8 => Some(encoding_rs::IBM866),
        11 | 12 => Some(encoding_rs::WINDOWS_1252),
        13 => Some(encoding_rs::ISO_8859_2),
        14 => Some(encoding_rs::ISO_8859_3),
        15 => Some(encoding_rs::ISO_8859_4),
        16 => Some(encoding_rs::ISO_8859_5),
        17 => Some(encoding_rs::ISO_8859_6),
        18 => Some(encoding_rs::ISO_8859_7),
        19 => Some(encoding_rs::ISO_8859_8),
        20 => Some(encoding_rs::WINDOWS_1254),
        21 => Some(encoding_rs::ISO_8859_14),
        22 => Some(encoding_rs::ISO_8859_15),
        30 => Some(encoding_rs::IBM866),
        32 => Some(encoding_rs::WINDOWS_874),
        33 => Some(encoding_rs::WINDOWS_1250),
        34 => Some(encoding_rs::WINDOWS_1251),
        35 => Some(encoding_rs::WINDOWS_1253),
        36 => Some(encoding_rs::WINDOWS_1254),
        37 => Some(encoding_rs::WINDOWS_1255),
        38 => Some(encoding_rs::WINDOWS_1256),
        39 => Some(encoding_rs::WINDOWS_1257),
        40 => Some(encoding_rs::WINDOWS_1258),
        // East Asian
        60 | 64 => Some(encoding_rs::SHIFT_JIS),
        61 | 67 => Some(encoding_rs::GBK),
        62 | 79 => Some(encoding_rs::EUC_KR),
        63 | 68 => Some(encoding_rs::BIG5),
        69 => Some(encoding_rs::EUC_JP),
        74 => Some(encoding_rs::KOI8_R),
        CHARSET_UTF8 => Some(encoding_rs::UTF_8),
        77 => Some(encoding_rs::ISO_8859_10),
        78 => Some(encoding_rs::ISO_8859_13),
        _ => None,
    }
}

/// Decode a byte string written in the given charset.
///
/// Symbol-charset bytes are mapped into the U+F000 private-use block, the
/// way StarSymbol/OpenSymbol fonts address their glyphs. Unknown charsets
/// fall back to Windows-1252.
///
/// # Examples
/// ```
/// use stardoc::common::encoding::decode_bytes;
///
/// assert_eq!(decode_bytes(b"caf\xe9", 1), "café");
/// assert_eq!(decode_bytes(&[0x41], 10), "\u{F041}");
/// ```
pub fn decode_bytes(data: &[u8], charset: u8) -> String {
    if charset == CHARSET_SYMBOL {
        return data
            .iter()
            .filter_map(|&b| char::from_u32(0xF000 + u32::from(b)))
            .collect();
    }
    let encoding = charset_to_encoding(charset).unwrap_or(encoding_rs::WINDOWS_1252);
    let (text, _, _) = encoding.decode(data);
    text.into_owned()
}
