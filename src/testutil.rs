//! Byte-stream builder for unit tests.

use crate::config::DecoderConfig;
use crate::input::StarInput;
use crate::zone::{StarZone, encode_compressed_ulong};

/// Little-endian stream writer with record framing helpers.
#[derive(Debug, Default, Clone)]
pub struct StreamBuilder {
    buf: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.u8(u8::from(value))
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn i16(&mut self, value: i16) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn f64(&mut self, value: f64) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    pub fn zeros(&mut self, count: usize) -> &mut Self {
        self.buf.resize(self.buf.len() + count, 0);
        self
    }

    /// u16 length + Latin-1 bytes.
    pub fn byte_string(&mut self, text: &str) -> &mut Self {
        let bytes: Vec<u8> = text.chars().map(|c| c as u8).collect();
        self.u16(bytes.len() as u16).bytes(&bytes)
    }

    pub fn compressed(&mut self, value: u32) -> &mut Self {
        let encoded = encode_compressed_ulong(value);
        self.bytes(&encoded)
    }

    fn patch_u32(&mut self, at: usize, value: u32) {
        self.buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Sw record: `(size << 8) | tag`, size including the header.
    pub fn sw(&mut self, tag: u8, body: impl FnOnce(&mut Self)) -> &mut Self {
        let start = self.buf.len();
        self.u32(0);
        body(self);
        let size = (self.buf.len() - start) as u32;
        self.patch_u32(start, (size << 8) | u32::from(tag));
        self
    }

    /// Sc record: id + data size.
    pub fn sc(&mut self, id: u16, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.u16(id);
        let at = self.buf.len();
        self.u32(0);
        body(self);
        let size = (self.buf.len() - at - 4) as u32;
        self.patch_u32(at, size);
        self
    }

    /// Sdr header: magic + version + size including the header.
    pub fn sdr(&mut self, magic: &[u8; 4], version: u16, body: impl FnOnce(&mut Self)) -> &mut Self {
        let start = self.buf.len();
        self.bytes(magic).u16(version);
        let at = self.buf.len();
        self.u32(0);
        body(self);
        let size = (self.buf.len() - start) as u32;
        self.patch_u32(at, size);
        self
    }

    /// Version-compat record: version + size of the body.
    pub fn compat(&mut self, version: u16, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.u16(version);
        let at = self.buf.len();
        self.u32(0);
        body(self);
        let size = (self.buf.len() - at - 4) as u32;
        self.patch_u32(at, size);
        self
    }

    /// Plain record: size including the header.
    pub fn plain(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        let start = self.buf.len();
        self.u32(0);
        body(self);
        let size = (self.buf.len() - start) as u32;
        self.patch_u32(start, size);
        self
    }

    /// Extended Sfx record.
    pub fn sfx(&mut self, tag: u16, version: u8, body: impl FnOnce(&mut Self)) -> &mut Self {
        let start = self.buf.len();
        self.u32(0).u8(0x01).u8(version).u16(tag);
        body(self);
        let size = (self.buf.len() - start - 4) as u32;
        self.patch_u32(start, size << 8);
        self
    }

    /// Flag zone with `width` bytes of sub-fields.
    pub fn flag_zone(&mut self, flags: u8, width: u8, fields: &[u8]) -> &mut Self {
        self.u8((flags & 0xF0) | (width & 0x0F)).bytes(fields)
    }

    /// Multi-record made of the given entries.
    pub fn multi(&mut self, entries: &[&[u8]]) -> &mut Self {
        let data_len: usize = entries.iter().map(|entry| entry.len()).sum();
        self.u32(data_len as u32);
        for entry in entries {
            self.bytes(entry);
        }
        self.u16(0x4200).u32((entries.len() * 4) as u32);
        for entry in entries {
            self.u32(entry.len() as u32);
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.buf.clone()
    }

    pub fn input(&self) -> StarInput {
        StarInput::new(self.build())
    }

    pub fn zone(&self) -> StarZone {
        self.zone_with(DecoderConfig::new())
    }

    pub fn zone_with(&self, config: DecoderConfig) -> StarZone {
        let mut data = self.build();
        if data.is_empty() {
            data.push(0);
        }
        StarZone::new(StarInput::new(data), "test", config).expect("non-empty test stream")
    }
}
