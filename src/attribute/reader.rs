use bytes::Bytes;

use crate::common::StarColor;
use crate::common::encoding::decode_bytes;
use crate::zone::StarZone;

/// High bit of a stream colour name: three explicit components follow.
const COLOR_NAME_USER: u16 = 0x8000;

/// Bounded reader over one attribute payload.
///
/// Every read checks the payload end first; a read that would cross it
/// fails without moving the cursor, so a decoder can never consume bytes
/// that belong to the next item.
pub struct ItemReader<'z> {
    zone: &'z mut StarZone,
    end: u64,
}

impl<'z> ItemReader<'z> {
    /// Reader up to `end`, capped by the innermost open record.
    pub fn new(zone: &'z mut StarZone, end: u64) -> Self {
        let end = end.min(zone.current_end());
        Self { zone, end }
    }

    #[inline]
    pub fn zone(&mut self) -> &mut StarZone {
        self.zone
    }

    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn tell(&self) -> u64 {
        self.zone.tell()
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.zone.tell())
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    fn fits(&self, count: u64) -> bool {
        self.zone.tell().saturating_add(count) <= self.end
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        if !self.fits(1) {
            return None;
        }
        self.zone.input_mut().read_u8()
    }

    pub fn read_i8(&mut self) -> Option<i8> {
        self.read_u8().map(|b| b as i8)
    }

    pub fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|b| b != 0)
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        if !self.fits(2) {
            return None;
        }
        self.zone.input_mut().read_u16()
    }

    pub fn read_i16(&mut self) -> Option<i16> {
        if !self.fits(2) {
            return None;
        }
        self.zone.input_mut().read_i16()
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        if !self.fits(4) {
            return None;
        }
        self.zone.input_mut().read_u32()
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        if !self.fits(4) {
            return None;
        }
        self.zone.input_mut().read_i32()
    }

    pub fn read_f64(&mut self) -> Option<f64> {
        if !self.fits(8) {
            return None;
        }
        self.zone.input_mut().read_f64()
    }

    /// Colour as four raw bytes: red, green, blue, transparency.
    pub fn read_color(&mut self) -> Option<StarColor> {
        if !self.fits(4) {
            return None;
        }
        let bytes = self.zone.input_mut().read_bytes(4)?;
        Some(StarColor::from_rgba_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Colour in the stream encoding: a 16-bit colour name, either an index
    /// into the predefined palette or a user-colour marker followed by
    /// three 16-bit components of which the high byte counts.
    pub fn read_stream_color(&mut self) -> Option<StarColor> {
        let start = self.tell();
        let name = self.read_u16()?;
        if name & COLOR_NAME_USER == 0 {
            return Some(StarColor::from_palette(name).unwrap_or_default());
        }
        match self.read_rgb16() {
            Some(color) => Some(color),
            None => {
                self.zone.seek(start);
                None
            },
        }
    }

    /// Three 16-bit colour components, high byte significant.
    pub fn read_rgb16(&mut self) -> Option<StarColor> {
        if !self.fits(6) {
            return None;
        }
        let input = self.zone.input_mut();
        let r = input.read_u16()?;
        let g = input.read_u16()?;
        let b = input.read_u16()?;
        Some(StarColor::new((r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8))
    }

    /// Byte string in the stream charset.
    pub fn read_byte_string(&mut self) -> Option<String> {
        let start = self.tell();
        let value = self.zone.read_byte_string()?;
        if self.tell() > self.end {
            self.zone.seek(start);
            return None;
        }
        Some(value)
    }

    pub fn read_compressed(&mut self) -> Option<u32> {
        let start = self.tell();
        let value = self.zone.read_compressed_ulong()?;
        if self.tell() > self.end {
            self.zone.seek(start);
            return None;
        }
        Some(value)
    }

    /// String-pool id resolved to its name; unknown ids give an empty name.
    pub fn read_pool_name(&mut self) -> Option<String> {
        let id = self.read_u16()?;
        Some(self.zone.get_pool_name(id).unwrap_or_default().to_string())
    }

    /// One byte in the stream charset as a character.
    pub fn read_char(&mut self) -> Option<char> {
        let byte = self.read_u8()?;
        let charset = self.zone.charset();
        decode_bytes(&[byte], charset).chars().next()
    }

    /// Everything up to the end of the payload.
    pub fn read_rest(&mut self) -> Option<Bytes> {
        let count = usize::try_from(self.remaining()).ok()?;
        self.zone.input_mut().read_bytes(count)
    }

    /// Move the cursor to the end of the payload.
    pub fn skip_to_end(&mut self) {
        if self.tell() < self.end {
            self.zone.seek(self.end);
        }
    }
}
