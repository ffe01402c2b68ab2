//! Calc multi-records.
//!
//! A multi-record stores its entries back to back and puts their sizes in
//! a table after the data:
//!
//! ```text
//! u32 data size | entry 0 | entry 1 | ... | u16 0x4200 | u32 table length | u32 size * n
//! ```
//!
//! Opening one reads the table and rewinds to the first entry; every entry
//! is then framed by the next size from the table, and closing the
//! multi-record lands after the table.

use super::record::{Frame, MultiState};
use super::{RecordFamily, RecordHeader, RecordScope, RecordTag, SC_ID_FIRST, StarZone};
use crate::common::Diagnostic;
use crate::common::binary;

impl StarZone {
    /// Open a multi-record at the cursor.
    pub fn open_multi_record(&mut self) -> Option<RecordHeader> {
        let start = self.input.tell();
        if !self.check_depth() {
            return None;
        }
        match self.probe_multi(start) {
            Some((header, state)) => {
                self.input.seek(state.data_start);
                Some(self.push_frame(header, Some(state)))
            },
            None => {
                self.input.seek(start);
                self.note_mismatch(RecordFamily::Multi, start);
                None
            },
        }
    }

    fn probe_multi(&mut self, start: u64) -> Option<(RecordHeader, MultiState)> {
        let size = u64::from(self.input.read_u32()?);
        let data_start = self.input.tell();
        let data_end = data_start.checked_add(size)?;
        let limit = self.current_end();
        if data_end > limit {
            return None;
        }
        self.input.seek(data_end);
        if self.input.read_u16()? != SC_ID_FIRST {
            return None;
        }
        let table_len = self.input.read_u32()?;
        let table = self.input.read_bytes(usize::try_from(table_len).ok()?)?;
        let table_end = self.input.tell();
        if table_end > limit {
            return None;
        }
        let order = self.input.byte_order();
        let sizes = (0..table.len() / 4)
            .filter_map(|i| binary::read_u32(&table, i * 4, order).ok())
            .collect();
        let header = RecordHeader {
            family: RecordFamily::Multi,
            tag: RecordTag::Id(SC_ID_FIRST),
            start,
            end: table_end,
            version: None,
            sfx: None,
        };
        Some((
            header,
            MultiState {
                sizes,
                data_start,
                data_end,
            },
        ))
    }

    /// Open the next entry of the innermost multi-record.
    ///
    /// Returns `None` when the innermost record is not a multi-record or
    /// its size table is exhausted.
    pub fn open_multi_entry(&mut self) -> Option<RecordHeader> {
        let start = self.input.tell();
        if !self.check_depth() {
            return None;
        }
        let size = match self.frames.last_mut() {
            Some(Frame {
                multi: Some(multi),
                ..
            }) => multi.sizes.pop_front(),
            _ => None,
        };
        let Some(size) = size else {
            self.note_mismatch(RecordFamily::MultiEntry, start);
            return None;
        };
        let header = RecordHeader {
            family: RecordFamily::MultiEntry,
            tag: RecordTag::Anonymous,
            start,
            end: start + u64::from(size),
            version: None,
            sfx: None,
        };
        Some(self.push_frame(header, None))
    }

    /// Number of entries of the innermost multi-record not opened yet.
    pub fn multi_entries_left(&self) -> usize {
        match self.frames.last() {
            Some(Frame {
                multi: Some(multi),
                ..
            }) => multi.sizes.len(),
            _ => 0,
        }
    }

    /// Close the innermost multi-record and move after its size table.
    pub fn close_multi_record(&mut self, label: &str) -> super::CloseStatus {
        let header = self
            .frames
            .iter()
            .rev()
            .find(|frame| frame.header.family == RecordFamily::Multi)
            .map(|frame| frame.header.clone());
        match header {
            Some(header) => self.close_record(&header, label),
            None => {
                self.diagnostics.push(Diagnostic::UnbalancedClose {
                    expected: "multi-record".to_string(),
                    found: self.stack_trace(),
                });
                super::CloseStatus::Unbalanced
            },
        }
    }

    /// Open a multi-record wrapped in a closing guard.
    pub fn multi_scope(&mut self, label: &'static str) -> Option<RecordScope<'_>> {
        let header = self.open_multi_record()?;
        Some(RecordScope::new(self, header, label))
    }

    /// Open the next multi-record entry wrapped in a closing guard.
    pub fn entry_scope(&mut self, label: &'static str) -> Option<RecordScope<'_>> {
        let header = self.open_multi_entry()?;
        Some(RecordScope::new(self, header, label))
    }
}
