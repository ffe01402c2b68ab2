//! Content sink for attributes that carry content of their own.
//!
//! Document readers implement [`ContentListener`] to receive footnotes,
//! fields, hyperlinks, anchored frames and embedded sections while they
//! walk the text. Only `insert_text` is required; the other events default
//! to no-ops so a reader can pick the ones it renders.

use crate::attribute::{
    ContentValue, FieldValue, FlyValue, FootnoteValue, InetFormatValue, RefMarkValue,
};
use crate::state::StyleState;

pub trait ContentListener {
    fn insert_text(&mut self, text: &str);

    fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf));
    }

    fn insert_eol(&mut self) {}

    /// A text field, with the style state of the run it sits in.
    fn insert_field(&mut self, _field: &FieldValue, _state: &StyleState) {}

    fn open_link(&mut self, _link: &InetFormatValue) {}

    fn close_link(&mut self) {}

    fn open_footnote(&mut self, _note: &FootnoteValue) {}

    fn close_footnote(&mut self) {}

    fn insert_frame_anchor(&mut self, _fly: &FlyValue) {}

    fn insert_reference_mark(&mut self, _mark: &RefMarkValue) {}

    fn insert_content(&mut self, _content: &ContentValue) {}
}

/// Listener that records every event as a line of text.
#[derive(Debug, Default, Clone)]
pub struct TraceListener {
    pub events: Vec<String>,
}

impl TraceListener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentListener for TraceListener {
    fn insert_text(&mut self, text: &str) {
        self.events.push(format!("text({})", text));
    }

    fn insert_eol(&mut self) {
        self.events.push("eol".to_string());
    }

    fn insert_field(&mut self, field: &FieldValue, _state: &StyleState) {
        self.events.push(format!("field({})", field.field_type.name()));
    }

    fn open_link(&mut self, link: &InetFormatValue) {
        self.events.push(format!("link({})", link.url));
    }

    fn close_link(&mut self) {
        self.events.push("/link".to_string());
    }

    fn open_footnote(&mut self, note: &FootnoteValue) {
        let kind = if note.endnote { "endnote" } else { "footnote" };
        self.events.push(format!("{}({})", kind, note.number));
    }

    fn close_footnote(&mut self) {
        self.events.push("/footnote".to_string());
    }

    fn insert_frame_anchor(&mut self, fly: &FlyValue) {
        self.events.push(format!("frame({})", fly.format));
    }

    fn insert_reference_mark(&mut self, mark: &RefMarkValue) {
        self.events.push(format!("mark({})", mark.name));
    }

    fn insert_content(&mut self, content: &ContentValue) {
        self.events.push(format!("content({})", content.payload.len()));
    }
}
