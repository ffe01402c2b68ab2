//! Decoded attribute payloads.
//!
//! One [`AttributeValue`] variant per payload shape. Scalars cover most
//! which-ids; the bespoke compound shapes carry the handful of attributes
//! whose layout is neither a scalar nor a flat schema record.

use bytes::Bytes;

use crate::attribute::schema::FieldSet;
use crate::common::StarColor;
use crate::item::ItemSet;

/// Decoded payload of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Marker attribute without payload (and unknown-id placeholders)
    Void,
    Bool(bool),
    Int(i32),
    UInt(u32),
    Double(f64),
    Color(StarColor),
    /// Integer pair (cell merge spans, symbol sizes, page sizes)
    Vec2i(i32, i32),
    Text(String),
    /// Nested attribute set
    ItemSet(Box<ItemSet>),
    Font(FontValue),
    Escapement(EscapementValue),
    CharFormat(CharFormatValue),
    Content(ContentValue),
    Field(FieldValue),
    FlyContent(FlyValue),
    Footnote(FootnoteValue),
    HardBlank(HardBlankValue),
    InetFormat(InetFormatValue),
    RefMark(RefMarkValue),
    Brush(BrushValue),
    Box(BoxValue),
    Tabs(Vec<TabStop>),
    NamedColor(NamedColorValue),
    /// Schema-driven record
    Record(FieldSet),
    /// Payload kept undecoded
    Opaque(Bytes),
}

impl AttributeValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of the `Int`, `UInt` and `Bool` shapes.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(i64::from(*v)),
            AttributeValue::UInt(v) => Some(i64::from(*v)),
            AttributeValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<StarColor> {
        match self {
            AttributeValue::Color(c) => Some(*c),
            AttributeValue::NamedColor(named) => named.color,
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&FieldSet> {
        match self {
            AttributeValue::Record(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_item_set(&self) -> Option<&ItemSet> {
        match self {
            AttributeValue::ItemSet(set) => Some(set),
            _ => None,
        }
    }

    /// Whether the value may lead back into a style chain or nested set.
    pub fn is_recursive(&self) -> bool {
        matches!(self, AttributeValue::ItemSet(_) | AttributeValue::CharFormat(_))
    }
}

/// Font description (family name, style name, pitch and charset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontValue {
    /// Generic family (0 unknown, 1 decorative, 2 modern, 3 roman, 4 script, 5 swiss)
    pub family: u8,
    /// 0 unknown, 1 fixed, 2 variable
    pub pitch: u8,
    pub charset: u8,
    pub name: String,
    pub style: String,
}

/// Super/subscript offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscapementValue {
    /// Offset in percent of the font height; positive raises, 0 is none.
    /// `101`/`-101` mean automatic super/subscript.
    pub escapement: i16,
    /// Relative font height in percent
    pub proportion: u8,
}

/// Offset that requests automatic super/subscript placement.
pub const ESCAPEMENT_AUTO: i16 = 101;

/// Reference to a named character style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFormatValue {
    pub name: String,
}

/// Embedded content section kept for the document reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentValue {
    pub payload: Bytes,
}

/// Kind of a text field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldType {
    DateTime,
    PageNumber,
    PageCount,
    Author,
    FileName,
    Title,
    Chapter,
    Database,
    User,
    HiddenText,
    Reference,
    #[default]
    Unknown,
}

impl FieldType {
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => FieldType::DateTime,
            1 => FieldType::PageNumber,
            2 => FieldType::PageCount,
            3 => FieldType::Author,
            4 => FieldType::FileName,
            5 => FieldType::Title,
            6 => FieldType::Chapter,
            7 => FieldType::Database,
            8 => FieldType::User,
            9 => FieldType::HiddenText,
            10 => FieldType::Reference,
            _ => FieldType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldType::DateTime => "date-time",
            FieldType::PageNumber => "page-number",
            FieldType::PageCount => "page-count",
            FieldType::Author => "author",
            FieldType::FileName => "file-name",
            FieldType::Title => "title",
            FieldType::Chapter => "chapter",
            FieldType::Database => "database",
            FieldType::User => "user",
            FieldType::HiddenText => "hidden-text",
            FieldType::Reference => "reference",
            FieldType::Unknown => "unknown",
        }
    }
}

/// Text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValue {
    pub field_type: FieldType,
    /// Raw type code, kept for unknown types
    pub code: u16,
    pub format: u16,
    /// Name or cached content, depending on the type
    pub content: String,
}

/// Frame anchored as a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlyValue {
    /// Name of the frame format
    pub format: String,
}

/// Footnote or endnote anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootnoteValue {
    pub number: u16,
    /// Explicit label; empty for automatic numbering
    pub label: String,
    pub endnote: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardBlankValue {
    pub ch: char,
}

impl Default for HardBlankValue {
    fn default() -> Self {
        Self { ch: '\u{a0}' }
    }
}

/// Hyperlink span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InetFormatValue {
    pub url: String,
    pub target: String,
    pub name: String,
    pub visited_style: String,
    pub unvisited_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefMarkValue {
    pub name: String,
}

/// Background fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrushValue {
    pub transparent: bool,
    pub color: StarColor,
    pub fill: StarColor,
    pub style: i8,
    /// Graphic position; 0 when there is no graphic
    pub position: u16,
    pub link: Option<String>,
}

/// One border line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorderLine {
    pub color: StarColor,
    pub outer: u16,
    pub inner: u16,
    pub distance: u16,
}

impl BorderLine {
    /// Total width in the pool's length unit.
    pub fn width(&self) -> u32 {
        u32::from(self.outer) + u32::from(self.inner) + u32::from(self.distance)
    }

    pub fn is_double(&self) -> bool {
        self.inner != 0 && self.distance != 0
    }
}

/// Borders on four sides, in top, bottom, left, right order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxValue {
    pub distance: u16,
    pub lines: [Option<BorderLine>; 4],
    /// Per-side padding, same order as `lines`
    pub distances: Option<[u16; 4]>,
}

/// Side names in [`BoxValue`] order.
pub const BOX_SIDES: [&str; 4] = ["top", "bottom", "left", "right"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabAdjust {
    #[default]
    Left,
    Right,
    Decimal,
    Center,
    Default,
}

impl TabAdjust {
    pub fn from_raw(raw: i8) -> Option<Self> {
        match raw {
            0 => Some(TabAdjust::Left),
            1 => Some(TabAdjust::Right),
            2 => Some(TabAdjust::Decimal),
            3 => Some(TabAdjust::Center),
            4 => Some(TabAdjust::Default),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStop {
    pub position: i32,
    pub adjust: TabAdjust,
    pub decimal: char,
    pub fill: char,
}

/// Colour from a named table entry or given inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedColorValue {
    pub name: String,
    /// Table index; -1 when the colour is stored inline
    pub index: i32,
    pub color: Option<StarColor>,
}
