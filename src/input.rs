//! Seekable byte cursor over an in-memory stream.
//!
//! Every StarOffice stream (the `StarWriterDocument`, `StarCalcDocument`,
//! `SfxStyleSheets`, ... streams of the compound file, or a stream embedded
//! in another one) is read through a [`StarInput`]. Reads never panic: a
//! read that would cross the end of the data returns `None` and leaves the
//! cursor where it was.

use std::collections::HashMap;

use bytes::Bytes;

use crate::common::binary::{self, ByteOrder};

/// Cursor over a stream's bytes.
#[derive(Debug, Clone)]
pub struct StarInput {
    data: Bytes,
    pos: usize,
    order: ByteOrder,
}

impl StarInput {
    /// Wrap a byte buffer; the cursor starts at offset 0, little-endian.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            order: ByteOrder::Little,
        }
    }

    /// Total stream length.
    #[inline]
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    #[inline]
    pub fn tell(&self) -> u64 {
        self.pos as u64
    }

    /// Whether the cursor is at or past the end of data.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Whether `pos` lies inside the stream (the end offset itself included).
    #[inline]
    pub fn check_position(&self, pos: u64) -> bool {
        pos <= self.len()
    }

    /// Move the cursor. Targets past the end are clamped to the end; the
    /// return value tells whether the requested position was reachable.
    pub fn seek(&mut self, pos: u64) -> bool {
        if pos > self.len() {
            self.pos = self.data.len();
            return false;
        }
        self.pos = pos as usize;
        true
    }

    /// Advance the cursor by `count` bytes (clamped to the end).
    pub fn skip(&mut self, count: u64) -> bool {
        self.seek(self.tell().saturating_add(count))
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Switch the byte order of subsequent multi-byte reads.
    #[inline]
    pub fn set_big_endian(&mut self, big_endian: bool) {
        self.order = if big_endian {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        };
    }

    /// Look at the next byte without consuming it.
    #[inline]
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Read one byte.
    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        let value = self.peek_u8()?;
        self.pos += 1;
        Some(value)
    }

    #[inline]
    pub fn read_i8(&mut self) -> Option<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a boolean stored as one byte (any non-zero value is true).
    #[inline]
    pub fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|b| b != 0)
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        let value = binary::read_u16(&self.data, self.pos, self.order).ok()?;
        self.pos += 2;
        Some(value)
    }

    pub fn read_i16(&mut self) -> Option<i16> {
        let value = binary::read_i16(&self.data, self.pos, self.order).ok()?;
        self.pos += 2;
        Some(value)
    }

    pub fn read_u24(&mut self) -> Option<u32> {
        let value = binary::read_u24(&self.data, self.pos, self.order).ok()?;
        self.pos += 3;
        Some(value)
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        let value = binary::read_u32(&self.data, self.pos, self.order).ok()?;
        self.pos += 4;
        Some(value)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        let value = binary::read_i32(&self.data, self.pos, self.order).ok()?;
        self.pos += 4;
        Some(value)
    }

    pub fn read_f64(&mut self) -> Option<f64> {
        let value = binary::read_f64(&self.data, self.pos, self.order).ok()?;
        self.pos += 8;
        Some(value)
    }

    /// Read `count` bytes as a zero-copy slice of the backing buffer.
    pub fn read_bytes(&mut self, count: usize) -> Option<Bytes> {
        let end = self.pos.checked_add(count)?;
        if end > self.data.len() {
            return None;
        }
        let slice = self.data.slice(self.pos..end);
        self.pos = end;
        Some(slice)
    }

    /// A new cursor over `len` bytes starting at `start`, sharing the buffer.
    pub fn sub_stream(&self, start: u64, len: u64) -> Option<StarInput> {
        let start = usize::try_from(start).ok()?;
        let end = start.checked_add(usize::try_from(len).ok()?)?;
        if end > self.data.len() {
            return None;
        }
        Some(StarInput {
            data: self.data.slice(start..end),
            pos: 0,
            order: self.order,
        })
    }
}

/// Named sub-stream access for compound-file-backed documents.
///
/// Compound-file traversal lives outside this crate; anything able to hand
/// out a stream's bytes by name can feed the record engine.
pub trait StorageSource {
    /// Open the named stream, if present.
    fn stream(&self, name: &str) -> Option<StarInput>;
}

impl StorageSource for HashMap<String, Bytes> {
    fn stream(&self, name: &str) -> Option<StarInput> {
        self.get(name).cloned().map(StarInput::new)
    }
}
