use std::ops::{Deref, DerefMut};

use super::{CloseStatus, RecordHeader, RecordTag, StarZone};

/// An open record that closes itself when dropped.
///
/// The guard dereferences to the zone, so a record body is read through it
/// like through the zone itself. Every exit path, early `return` and `?`
/// included, runs the close and leaves the cursor at the record end.
pub struct RecordScope<'z> {
    zone: &'z mut StarZone,
    header: RecordHeader,
    label: &'static str,
    open: bool,
}

impl<'z> RecordScope<'z> {
    pub(super) fn new(zone: &'z mut StarZone, header: RecordHeader, label: &'static str) -> Self {
        Self {
            zone,
            header,
            label,
            open: true,
        }
    }

    #[inline]
    pub fn header(&self) -> &RecordHeader {
        &self.header
    }

    /// Record end offset.
    #[inline]
    pub fn end(&self) -> u64 {
        self.header.end
    }

    /// Bytes left between the cursor and the record end.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.header.end.saturating_sub(self.zone.tell())
    }

    /// Whether the cursor reached the record end.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.zone.tell() >= self.header.end
    }

    /// Flag bits of a flag zone, 0 for other records.
    pub fn flags(&self) -> u8 {
        match self.header.tag {
            RecordTag::Flags(bits) => bits,
            _ => 0,
        }
    }

    /// Close the record now and report how the cursor was reconciled.
    pub fn finish(mut self) -> CloseStatus {
        self.open = false;
        self.zone.close_record(&self.header, self.label)
    }
}

impl Deref for RecordScope<'_> {
    type Target = StarZone;

    fn deref(&self) -> &StarZone {
        self.zone
    }
}

impl DerefMut for RecordScope<'_> {
    fn deref_mut(&mut self) -> &mut StarZone {
        self.zone
    }
}

impl Drop for RecordScope<'_> {
    fn drop(&mut self) {
        if self.open {
            self.zone.close_record(&self.header, self.label);
        }
    }
}
