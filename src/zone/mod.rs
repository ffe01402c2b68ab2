//! Record zone engine.
//!
//! A [`StarZone`] frames a flat StarOffice stream into nested, tagged,
//! length-bounded records. Opening a record pushes a frame holding the
//! record's declared end; closing it pops the frame and moves the cursor to
//! that end whatever the body actually consumed. This is what keeps a
//! decoder aligned when it meets a layout it reads slightly wrong: the
//! nearest enclosing close re-synchronizes the stream.
//!
//! Record probes are speculative. A probe that does not find the expected
//! tag leaves the cursor untouched so the caller can try another kind of
//! record at the same offset.
//!
//! # Examples
//!
//! ```rust
//! use stardoc::config::DecoderConfig;
//! use stardoc::input::StarInput;
//! use stardoc::zone::{RecordProbe, StarZone};
//!
//! // 'A' record: u32 header (size 10 << 8 | 'A'), one bool, 5 padding bytes
//! let mut bytes = ((10u32 << 8) | u32::from(b'A')).to_le_bytes().to_vec();
//! bytes.extend_from_slice(&[1, 0, 0, 0, 0, 0]);
//!
//! let mut zone = StarZone::new(StarInput::new(bytes), "StarWriterDocument", DecoderConfig::new())?;
//! let mut record = zone.scope(RecordProbe::Sw(Some(b'A')), "Attr").unwrap();
//! assert_eq!(record.input_mut().read_bool(), Some(true));
//! record.finish();
//! assert_eq!(zone.tell(), 10);
//! # Ok::<(), stardoc::common::Error>(())
//! ```

mod compressed;
mod header;
mod multi;
mod record;
mod scope;
pub mod version;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fmt::Write as _;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::common::{Diagnostic, Diagnostics, Error, Result};
use crate::config::DecoderConfig;
use crate::input::{StarInput, StorageSource};

pub use compressed::{encode_compressed_long, encode_compressed_ulong};
pub use header::{PoolName, SwFileFlags, SwHeader};
pub use record::{
    CloseStatus, RecordFamily, RecordHeader, RecordProbe, RecordTag, SC_ID_FIRST, SC_ID_LAST,
    SFX_PRETAG_EOR, SFX_PRETAG_EXT, SfxExtension,
};
pub use scope::RecordScope;

use record::{Frame, MultiState, is_printable_tag};

/// Size value of a Sw header whose real size lives in the record-size table.
pub const SW_SIZE_OVERFLOW: u64 = 0x00FF_FFFF;

/// Decoding window over one stream.
#[derive(Debug)]
pub struct StarZone {
    input: StarInput,
    name: String,
    config: DecoderConfig,
    frames: SmallVec<[Frame; 16]>,
    /// Nesting contributed by structures other than records (item sets)
    nesting: usize,
    version: u16,
    charset: u8,
    pool_names: Vec<PoolName>,
    record_sizes: HashMap<u64, u64>,
    /// Failed record probes; counted, not stored
    tag_mismatches: u64,
    diagnostics: Diagnostics,
}

impl StarZone {
    /// Create a zone over a stream. An empty stream has nothing to frame and
    /// is the one input condition reported as an error.
    pub fn new(input: StarInput, name: impl Into<String>, config: DecoderConfig) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::NoInput);
        }
        let charset = config.default_charset;
        Ok(Self {
            input,
            name: name.into(),
            config,
            frames: SmallVec::new(),
            nesting: 0,
            version: 0,
            charset,
            pool_names: Vec::new(),
            record_sizes: HashMap::new(),
            tag_mismatches: 0,
            diagnostics: Diagnostics::new(),
        })
    }

    /// Open the named stream of a storage.
    pub fn from_storage(
        storage: &dyn StorageSource,
        name: &str,
        config: DecoderConfig,
    ) -> Result<Self> {
        let input = storage.stream(name).ok_or(Error::NoInput)?;
        Self::new(input, name, config)
    }

    /// Stream name, used in log messages.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    #[inline]
    pub fn input(&self) -> &StarInput {
        &self.input
    }

    /// Direct access to the cursor for reading record bodies.
    #[inline]
    pub fn input_mut(&mut self) -> &mut StarInput {
        &mut self.input
    }

    #[inline]
    pub fn tell(&self) -> u64 {
        self.input.tell()
    }

    #[inline]
    pub fn seek(&mut self, pos: u64) -> bool {
        self.input.seek(pos)
    }

    /// Findings recorded so far on this stream.
    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[inline]
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Log and record a finding.
    #[inline]
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Number of record probes that did not find their tag.
    ///
    /// Probing is routine control flow, so misses are only counted and
    /// traced, never added to [`diagnostics`](Self::diagnostics).
    #[inline]
    pub fn tag_mismatches(&self) -> u64 {
        self.tag_mismatches
    }

    fn note_mismatch(&mut self, family: RecordFamily, offset: u64) {
        self.tag_mismatches += 1;
        trace!("{}", Diagnostic::TagMismatch { family, offset });
    }

    /// Number of open records.
    #[inline]
    pub fn level(&self) -> usize {
        self.frames.len()
    }

    fn depth(&self) -> usize {
        self.frames.len() + self.nesting
    }

    fn check_depth(&mut self) -> bool {
        let depth = self.depth();
        if depth >= self.config.max_depth {
            self.diagnostics
                .push(Diagnostic::DepthExceeded { depth: depth + 1 });
            return false;
        }
        true
    }

    /// Count one level of non-record nesting against the depth cap.
    ///
    /// Returns `false` (and records `DepthExceeded`) when the cap is reached;
    /// in that case the caller must not call [`leave_nested`](Self::leave_nested).
    pub fn enter_nested(&mut self) -> bool {
        if !self.check_depth() {
            return false;
        }
        self.nesting += 1;
        true
    }

    pub fn leave_nested(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// End of the innermost readable region: the body end of the innermost
    /// open record, or the stream end.
    pub fn current_end(&self) -> u64 {
        let stream_end = self.input.len();
        match self.frames.last() {
            Some(Frame {
                multi: Some(multi), ..
            }) => multi.data_end.min(stream_end),
            Some(frame) => frame.header.end.min(stream_end),
            None => stream_end,
        }
    }

    /// Header of the innermost open record.
    pub fn current_record(&self) -> Option<&RecordHeader> {
        self.frames.last().map(|frame| &frame.header)
    }

    /// Compatibility version of the stream.
    #[inline]
    pub fn version(&self) -> u16 {
        self.version
    }

    #[inline]
    pub fn set_version(&mut self, version: u16) {
        self.version = version;
    }

    /// Whether the stream was written by format revision `min` or later.
    #[inline]
    pub fn is_compatible_with(&self, min: u16) -> bool {
        self.version >= min
    }

    /// Whether the stream version lies in `min..max`.
    #[inline]
    pub fn is_compatible_with_range(&self, min: u16, max: u16) -> bool {
        (min..max).contains(&self.version)
    }

    /// Charset of the stream's byte strings.
    #[inline]
    pub fn charset(&self) -> u8 {
        self.charset
    }

    #[inline]
    pub fn set_charset(&mut self, charset: u8) {
        self.charset = charset;
    }

    /// Probe for a record at the cursor and open it.
    ///
    /// On a tag mismatch the cursor is restored and `None` is returned. On
    /// success the returned header carries the end offset, healed to the
    /// enclosing record and the stream end.
    pub fn open_record(&mut self, probe: RecordProbe) -> Option<RecordHeader> {
        let start = self.input.tell();
        if !self.check_depth() {
            return None;
        }
        let parsed = match probe {
            RecordProbe::Sw(expected) => self.probe_sw(start, expected),
            RecordProbe::Sc(expected) => self.probe_sc(start, expected),
            RecordProbe::Sdr(expected) => self.probe_sdr(start, expected),
            RecordProbe::Plain => self.probe_plain(start),
            RecordProbe::VersionCompat => self.probe_compat(start),
            RecordProbe::Sfx(expected) => self.probe_sfx(start, expected),
        };
        match parsed {
            Some(header) if self.input.tell() <= self.current_end() => {
                Some(self.push_frame(header, None))
            },
            _ => {
                self.input.seek(start);
                self.note_mismatch(probe.family(), start);
                None
            },
        }
    }

    /// Open a drawing-layer header, optionally checking its magic.
    #[inline]
    pub fn open_sdr_header(&mut self, magic: Option<&[u8; 4]>) -> Option<RecordHeader> {
        self.open_record(RecordProbe::Sdr(magic.copied()))
    }

    fn probe_sw(&mut self, start: u64, expected: Option<u8>) -> Option<RecordHeader> {
        let raw = self.input.read_u32()?;
        let tag = (raw & 0xFF) as u8;
        if !is_printable_tag(tag) || expected.is_some_and(|e| e != tag) {
            return None;
        }
        let mut size = u64::from(raw >> 8);
        if size == SW_SIZE_OVERFLOW {
            if let Some(&real) = self.record_sizes.get(&start) {
                size = real;
            }
        }
        if size < 4 {
            return None;
        }
        Some(RecordHeader {
            family: RecordFamily::Sw,
            tag: RecordTag::Char(tag),
            start,
            end: start + size,
            version: None,
            sfx: None,
        })
    }

    fn probe_sc(&mut self, start: u64, expected: Option<u16>) -> Option<RecordHeader> {
        let id = self.input.read_u16()?;
        if !(SC_ID_FIRST..=SC_ID_LAST).contains(&id) || expected.is_some_and(|e| e != id) {
            return None;
        }
        let size = u64::from(self.input.read_u32()?);
        Some(RecordHeader {
            family: RecordFamily::Sc,
            tag: RecordTag::Id(id),
            start,
            end: start + 6 + size,
            version: None,
            sfx: None,
        })
    }

    fn probe_sdr(&mut self, start: u64, expected: Option<[u8; 4]>) -> Option<RecordHeader> {
        let raw = self.input.read_bytes(4)?;
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&raw);
        if !magic.iter().all(u8::is_ascii_alphanumeric) || expected.is_some_and(|e| e != magic) {
            return None;
        }
        let version = self.input.read_u16()?;
        let size = u64::from(self.input.read_u32()?);
        if size < 10 {
            return None;
        }
        Some(RecordHeader {
            family: RecordFamily::Sdr,
            tag: RecordTag::Magic(magic),
            start,
            end: start + size,
            version: Some(version),
            sfx: None,
        })
    }

    fn probe_plain(&mut self, start: u64) -> Option<RecordHeader> {
        let size = u64::from(self.input.read_u32()?);
        if size < 4 {
            return None;
        }
        Some(RecordHeader {
            family: RecordFamily::Plain,
            tag: RecordTag::Anonymous,
            start,
            end: start + size,
            version: None,
            sfx: None,
        })
    }

    fn probe_compat(&mut self, start: u64) -> Option<RecordHeader> {
        let version = self.input.read_u16()?;
        let size = u64::from(self.input.read_u32()?);
        Some(RecordHeader {
            family: RecordFamily::VersionCompat,
            tag: RecordTag::Anonymous,
            start,
            end: start + 6 + size,
            version: Some(version),
            sfx: None,
        })
    }

    fn probe_sfx(&mut self, start: u64, expected: Option<u16>) -> Option<RecordHeader> {
        let raw = self.input.read_u32()?;
        let pre_tag = (raw & 0xFF) as u8;
        if pre_tag == SFX_PRETAG_EOR {
            return None;
        }
        let size = u64::from(raw >> 8);
        let sfx = if pre_tag == SFX_PRETAG_EXT {
            if size < 4 {
                return None;
            }
            let record_type = self.input.read_u8()?;
            let version = self.input.read_u8()?;
            let tag = self.input.read_u16()?;
            Some(SfxExtension {
                record_type,
                version,
                tag,
            })
        } else {
            None
        };
        if let Some(wanted) = expected {
            if sfx.is_none_or(|ext| ext.tag != wanted) {
                return None;
            }
        }
        Some(RecordHeader {
            family: RecordFamily::Sfx,
            tag: sfx.map_or(RecordTag::Anonymous, |ext| RecordTag::Id(ext.tag)),
            start,
            end: start + 4 + size,
            version: sfx.map(|ext| u16::from(ext.version)),
            sfx,
        })
    }

    /// Heal the header against the enclosing region and push its frame.
    fn push_frame(&mut self, mut header: RecordHeader, multi: Option<MultiState>) -> RecordHeader {
        let limit = self.current_end();
        if header.end > limit {
            self.diagnostics.push(Diagnostic::TruncatedRecord {
                family: header.family,
                tag: header.tag.to_string(),
                start: header.start,
                declared: header.end,
                healed: limit,
            });
            header.end = limit;
        }
        debug!(
            "{}: open {} record '{}' [{}..{}] at level {}",
            self.name,
            header.family,
            header.tag,
            header.start,
            header.end,
            self.frames.len() + 1
        );
        self.frames.push(Frame {
            header: header.clone(),
            multi,
        });
        header
    }

    /// Close an open record and move the cursor to its end.
    ///
    /// Records opened after `header` and still open are closed first, each
    /// reported as `UnbalancedClose`. Closing a record that is not open
    /// reports `UnbalancedClose` and leaves the cursor alone.
    pub fn close_record(&mut self, header: &RecordHeader, label: &str) -> CloseStatus {
        let Some(index) = self
            .frames
            .iter()
            .rposition(|frame| frame.header.start == header.start && frame.header.family == header.family)
        else {
            let found = self
                .frames
                .last()
                .map_or_else(|| "<none>".to_string(), |frame| describe(&frame.header));
            self.diagnostics.push(Diagnostic::UnbalancedClose {
                expected: describe(header),
                found,
            });
            return CloseStatus::Unbalanced;
        };
        while self.frames.len() > index + 1 {
            let Some(inner) = self.frames.pop() else {
                break;
            };
            self.diagnostics.push(Diagnostic::UnbalancedClose {
                expected: describe(header),
                found: describe(&inner.header),
            });
            self.reconcile(inner, "<unclosed>");
        }
        match self.frames.pop() {
            Some(frame) => self.reconcile(frame, label),
            None => CloseStatus::Unbalanced,
        }
    }

    fn reconcile(&mut self, frame: Frame, label: &str) -> CloseStatus {
        let family = frame.header.family;
        let end = frame.header.end;
        let body_end = frame.multi.as_ref().map_or(end, |multi| multi.data_end);
        let pos = self.input.tell();
        let status = if pos < body_end {
            let count = body_end - pos;
            let tolerated = count <= self.config.slop.for_family(family);
            self.diagnostics.push(Diagnostic::UnreadBytes {
                family,
                label: label.to_string(),
                count,
                tolerated,
            });
            if tolerated {
                CloseStatus::Tolerated(count)
            } else {
                CloseStatus::Skipped(count)
            }
        } else if pos > body_end {
            let count = pos - body_end;
            self.diagnostics.push(Diagnostic::Overrun {
                family,
                label: label.to_string(),
                count,
            });
            CloseStatus::Overrun(count)
        } else {
            CloseStatus::Exact
        };
        self.input.seek(end);
        debug!(
            "{}: close {} record '{}' at {} ({:?}), level {}",
            self.name,
            family,
            label,
            end,
            status,
            self.frames.len()
        );
        status
    }

    /// Open a flag zone: one byte whose high nibble holds flag bits and whose
    /// low nibble counts the bytes of sub-fields that follow.
    ///
    /// Returns the flag bits.
    pub fn open_flag_zone(&mut self) -> Option<u8> {
        let start = self.input.tell();
        if !self.check_depth() {
            return None;
        }
        let raw = self.input.read_u8()?;
        let flags = raw & 0xF0;
        let header = RecordHeader {
            family: RecordFamily::Flag,
            tag: RecordTag::Flags(flags),
            start,
            end: start + 1 + u64::from(raw & 0x0F),
            version: None,
            sfx: None,
        };
        self.push_frame(header, None);
        Some(flags)
    }

    /// Close the innermost flag zone, skipping sub-fields the caller did
    /// not read.
    pub fn close_flag_zone(&mut self, label: &str) -> CloseStatus {
        match self.frames.last() {
            Some(frame) if frame.header.family == RecordFamily::Flag => {
                let header = frame.header.clone();
                self.close_record(&header, label)
            },
            other => {
                let found = other.map_or_else(|| "<none>".to_string(), |f| describe(&f.header));
                self.diagnostics.push(Diagnostic::UnbalancedClose {
                    expected: "flag zone".to_string(),
                    found,
                });
                CloseStatus::Unbalanced
            },
        }
    }

    /// Open a record and wrap it in a guard that closes it on drop.
    pub fn scope(&mut self, probe: RecordProbe, label: &'static str) -> Option<RecordScope<'_>> {
        let header = self.open_record(probe)?;
        Some(RecordScope::new(self, header, label))
    }

    /// Open a flag zone wrapped in a closing guard.
    pub fn flag_scope(&mut self, label: &'static str) -> Option<RecordScope<'_>> {
        self.open_flag_zone()?;
        let header = self.current_record()?.clone();
        Some(RecordScope::new(self, header, label))
    }

    /// Render the open-record stack, innermost last, for trace output.
    pub fn stack_trace(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = write!(out, "/{}", describe(&frame.header));
        }
        out
    }
}

fn describe(header: &RecordHeader) -> String {
    format!("{}:{}@{}", header.family, header.tag, header.start)
}
