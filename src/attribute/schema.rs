//! Data-driven record layouts.
//!
//! Many attributes are a flat sequence of scalars whose presence depends
//! on the item version (written next to each item) or on the stream's
//! compatibility version. A [`Schema`] lists those fields in stream order,
//! each with a [`Gate`] saying for which versions it is present. The
//! version matrix of an attribute is therefore a table that can be
//! inspected and tested, rather than a chain of inline checks.
//!
//! Alternative encodings of one field (a `u8` that became a `u16`) are
//! separate entries with the same name and disjoint gates.

use std::fmt;

use smallvec::SmallVec;

use crate::attribute::reader::ItemReader;
use crate::common::StarColor;
use crate::zone::version::SWG_LONGIDX;

/// Binary shape of one schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I8,
    Bool,
    U16,
    I16,
    U32,
    I32,
    F64,
    /// Four raw bytes: red, green, blue, transparency
    Color,
    /// 16-bit colour name, followed by three 16-bit components for user colours
    StreamColor,
    /// Three 16-bit components, high byte significant
    Rgb16,
    Compressed,
    ByteString,
}

impl FieldKind {
    /// Encoded width, or `None` when it depends on the data.
    pub fn width(self) -> Option<u64> {
        match self {
            FieldKind::U8 | FieldKind::I8 | FieldKind::Bool => Some(1),
            FieldKind::U16 | FieldKind::I16 => Some(2),
            FieldKind::U32 | FieldKind::I32 | FieldKind::Color => Some(4),
            FieldKind::Rgb16 => Some(6),
            FieldKind::F64 => Some(8),
            FieldKind::StreamColor | FieldKind::Compressed | FieldKind::ByteString => None,
        }
    }
}

/// Version condition under which a field is present.
///
/// Ranges are half-open: `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    ItemVersion { min: u16, max: u16 },
    StreamVersion { min: u16, max: u16 },
}

impl Gate {
    /// Present from item version `min` on.
    pub const fn item_from(min: u16) -> Self {
        Gate::ItemVersion { min, max: u16::MAX }
    }

    /// Present below item version `max`.
    pub const fn item_before(max: u16) -> Self {
        Gate::ItemVersion { min: 0, max }
    }

    pub const fn stream_from(min: u16) -> Self {
        Gate::StreamVersion { min, max: u16::MAX }
    }

    pub const fn stream_before(max: u16) -> Self {
        Gate::StreamVersion { min: 0, max }
    }

    pub fn admits(&self, item_version: u16, stream_version: u16) -> bool {
        match *self {
            Gate::Always => true,
            Gate::ItemVersion { min, max } => (min..max).contains(&item_version),
            Gate::StreamVersion { min, max } => (min..max).contains(&stream_version),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub gate: Gate,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        gate: Gate::Always,
    }
}

const fn gated(name: &'static str, kind: FieldKind, gate: Gate) -> FieldSpec {
    FieldSpec { name, kind, gate }
}

/// Ordered field layout of a record attribute.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Fields present for the given versions, in stream order.
    pub fn active_fields(
        &self,
        item_version: u16,
        stream_version: u16,
    ) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.fields
            .iter()
            .filter(move |spec| spec.gate.admits(item_version, stream_version))
    }

    /// Bytes read for the given versions, or `None` when a present field
    /// has a data-dependent width.
    pub fn byte_width(&self, item_version: u16, stream_version: u16) -> Option<u64> {
        self.active_fields(item_version, stream_version)
            .map(|spec| spec.kind.width())
            .sum()
    }

    /// Read every present field. `None` when the data ends early.
    pub fn read(
        &'static self,
        reader: &mut ItemReader<'_>,
        item_version: u16,
        stream_version: u16,
    ) -> Option<FieldSet> {
        let mut set = FieldSet::new(self.name);
        for spec in self.active_fields(item_version, stream_version) {
            let value = match spec.kind {
                FieldKind::U8 => Scalar::Int(i64::from(reader.read_u8()?)),
                FieldKind::I8 => Scalar::Int(i64::from(reader.read_i8()?)),
                FieldKind::Bool => Scalar::Bool(reader.read_bool()?),
                FieldKind::U16 => Scalar::Int(i64::from(reader.read_u16()?)),
                FieldKind::I16 => Scalar::Int(i64::from(reader.read_i16()?)),
                FieldKind::U32 => Scalar::Int(i64::from(reader.read_u32()?)),
                FieldKind::I32 => Scalar::Int(i64::from(reader.read_i32()?)),
                FieldKind::F64 => Scalar::Double(reader.read_f64()?),
                FieldKind::Color => Scalar::Color(reader.read_color()?),
                FieldKind::StreamColor => Scalar::Color(reader.read_stream_color()?),
                FieldKind::Rgb16 => Scalar::Color(reader.read_rgb16()?),
                FieldKind::Compressed => Scalar::Int(i64::from(reader.read_compressed()?)),
                FieldKind::ByteString => Scalar::Text(reader.read_byte_string()?),
            };
            set.push(spec.name, value);
        }
        Some(set)
    }
}

/// Value of one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Double(f64),
    Color(StarColor),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Double(d) => write!(f, "{}", d),
            Scalar::Color(c) => write!(f, "{}", c),
            Scalar::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Decoded record: field values in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    schema: &'static str,
    fields: SmallVec<[(&'static str, Scalar); 8]>,
}

impl FieldSet {
    pub fn new(schema: &'static str) -> Self {
        Self {
            schema,
            fields: SmallVec::new(),
        }
    }

    pub fn schema(&self) -> &'static str {
        self.schema
    }

    /// Append a field value, replacing an earlier one of the same name.
    pub fn push(&mut self, name: &'static str, value: Scalar) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Scalar::Int(i) => Some(*i),
            Scalar::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Scalar::Bool(b) => Some(*b),
            Scalar::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn double(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Scalar::Double(d) => Some(*d),
            Scalar::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn color(&self, name: &str) -> Option<StarColor> {
        match self.get(name)? {
            Scalar::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Scalar)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

use FieldKind::*;

/// Font height: height, proportional size, size unit.
pub static FONT_HEIGHT: Schema = Schema {
    name: "FontHeight",
    fields: &[
        field("height", U16),
        gated("prop", U8, Gate::item_before(2)),
        gated("prop", U16, Gate::item_from(2)),
        gated("unit", U16, Gate::item_from(1)),
    ],
};

pub static LR_SPACE: Schema = Schema {
    name: "LRSpace",
    fields: &[
        field("left", U16),
        field("prop_left", U8),
        field("right", U16),
        field("prop_right", U8),
        field("first_line", I16),
        field("prop_first_line", U8),
        gated("text_left", U16, Gate::item_from(1)),
        gated("auto_first", Bool, Gate::item_from(2)),
    ],
};

pub static UL_SPACE: Schema = Schema {
    name: "ULSpace",
    fields: &[
        field("upper", U16),
        field("prop_upper", U8),
        field("lower", U16),
        field("prop_lower", U8),
    ],
};

pub static LINE_SPACING: Schema = Schema {
    name: "LineSpacing",
    fields: &[
        field("prop_space", I8),
        field("inter_space", I16),
        field("height", U16),
        field("rule", I8),
        field("inter_rule", I8),
    ],
};

pub static ADJUST: Schema = Schema {
    name: "Adjust",
    fields: &[field("adjust", I8), gated("last", I8, Gate::item_from(1))],
};

pub static SHADOW: Schema = Schema {
    name: "Shadow",
    fields: &[
        field("location", I8),
        field("width", U16),
        field("transparent", Bool),
        field("color", StreamColor),
        field("fill", StreamColor),
        field("style", I8),
    ],
};

pub static FRAME_SIZE: Schema = Schema {
    name: "FrameSize",
    fields: &[
        field("size_type", I8),
        field("width", I32),
        field("height", I32),
        gated("width_percent", U8, Gate::item_from(1)),
        gated("height_percent", U8, Gate::item_from(1)),
    ],
};

pub static VERT_ORIENT: Schema = Schema {
    name: "VertOrient",
    fields: &[
        field("position", I32),
        field("orient", I8),
        field("relation", I8),
    ],
};

pub static HORI_ORIENT: Schema = Schema {
    name: "HoriOrient",
    fields: &[
        field("position", I32),
        field("orient", I8),
        field("relation", I8),
        gated("toggle", Bool, Gate::item_from(1)),
    ],
};

/// Anchor: type, then the page number, widened to a compressed integer
/// once streams switched to long indices.
pub static ANCHOR: Schema = Schema {
    name: "Anchor",
    fields: &[
        field("anchor_type", I8),
        gated("page", U16, Gate::stream_before(SWG_LONGIDX)),
        gated("page", Compressed, Gate::stream_from(SWG_LONGIDX)),
    ],
};

pub static HYPHEN_ZONE: Schema = Schema {
    name: "HyphenZone",
    fields: &[
        field("hyphenate", Bool),
        field("page_end", Bool),
        field("min_lead", U8),
        field("min_trail", U8),
        field("max_hyphens", U8),
    ],
};

pub static DROP_CAPS: Schema = Schema {
    name: "DropCaps",
    fields: &[
        field("lines", U16),
        field("chars", U16),
        field("distance", U16),
        gated("whole_word", Bool, Gate::item_from(1)),
    ],
};

pub static CROP: Schema = Schema {
    name: "Crop",
    fields: &[
        field("top", I32),
        field("left", I32),
        field("right", I32),
        field("bottom", I32),
    ],
};

pub static MARGIN: Schema = Schema {
    name: "Margin",
    fields: &[
        field("left", I16),
        field("top", I16),
        field("right", I16),
        field("bottom", I16),
    ],
};

pub static CELL_PROTECTION: Schema = Schema {
    name: "CellProtection",
    fields: &[
        field("protect", Bool),
        field("hide_formula", Bool),
        field("hide_cell", Bool),
        field("hide_print", Bool),
    ],
};

pub static FRAME_PROTECT: Schema = Schema {
    name: "Protect",
    fields: &[
        field("content", Bool),
        field("size", Bool),
        field("position", Bool),
    ],
};

pub static SURROUND: Schema = Schema {
    name: "Surround",
    fields: &[
        field("surround", I8),
        gated("anchor_only", Bool, Gate::item_from(1)),
        gated("contour", Bool, Gate::item_from(2)),
        gated("outside", Bool, Gate::item_from(3)),
    ],
};

pub static ROTATE: Schema = Schema {
    name: "Rotate",
    fields: &[field("angle", U16), field("fit_to_line", Bool)],
};

pub static TWO_LINES: Schema = Schema {
    name: "TwoLines",
    fields: &[
        field("enabled", Bool),
        field("start", U16),
        field("end", U16),
    ],
};

/// Gradient body of a named gradient item.
pub static GRADIENT: Schema = Schema {
    name: "Gradient",
    fields: &[
        field("style", U16),
        field("start", Rgb16),
        field("end", Rgb16),
        field("angle", I32),
        field("border", U16),
        field("x_offset", U16),
        field("y_offset", U16),
        field("start_intensity", U16),
        field("end_intensity", U16),
        gated("steps", U16, Gate::item_from(1)),
    ],
};

/// Dash body of a named dash item.
pub static DASH: Schema = Schema {
    name: "Dash",
    fields: &[
        field("style", I32),
        field("dots", U16),
        field("dot_len", U32),
        field("dashes", U16),
        field("dash_len", U32),
        field("distance", U32),
    ],
};

/// Every record layout, for table-wide checks.
pub static ALL: &[&Schema] = &[
    &FONT_HEIGHT,
    &LR_SPACE,
    &UL_SPACE,
    &LINE_SPACING,
    &ADJUST,
    &SHADOW,
    &FRAME_SIZE,
    &VERT_ORIENT,
    &HORI_ORIENT,
    &ANCHOR,
    &HYPHEN_ZONE,
    &DROP_CAPS,
    &CROP,
    &MARGIN,
    &CELL_PROTECTION,
    &FRAME_PROTECT,
    &SURROUND,
    &ROTATE,
    &TWO_LINES,
    &GRADIENT,
    &DASH,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_height_widths() {
        assert_eq!(FONT_HEIGHT.byte_width(0, 0), Some(3));
        assert_eq!(FONT_HEIGHT.byte_width(1, 0), Some(5));
        assert_eq!(FONT_HEIGHT.byte_width(2, 0), Some(6));
    }

    #[test]
    fn test_stream_gate_switches_encoding() {
        assert_eq!(ANCHOR.byte_width(0, SWG_LONGIDX - 1), Some(3));
        assert_eq!(ANCHOR.byte_width(0, SWG_LONGIDX), None);
        let names: Vec<_> = ANCHOR
            .active_fields(0, SWG_LONGIDX)
            .map(|spec| (spec.name, spec.kind))
            .collect();
        assert_eq!(
            names,
            vec![("anchor_type", FieldKind::I8), ("page", FieldKind::Compressed)]
        );
    }

    #[test]
    fn test_alternative_encodings_are_disjoint() {
        for schema in ALL {
            for version in [0u16, 1, 2, 3, 4, SWG_LONGIDX - 1, SWG_LONGIDX, 0x0300] {
                let mut seen = Vec::new();
                for spec in schema.active_fields(version, version) {
                    assert!(
                        !seen.contains(&spec.name),
                        "{} has two '{}' fields at version {}",
                        schema.name,
                        spec.name,
                        version
                    );
                    seen.push(spec.name);
                }
            }
        }
    }

    #[test]
    fn test_field_set_accessors() {
        let mut set = FieldSet::new("Test");
        set.push("flag", Scalar::Bool(true));
        set.push("size", Scalar::Int(12));
        set.push("size", Scalar::Int(14));
        assert_eq!(set.len(), 2);
        assert_eq!(set.int("size"), Some(14));
        assert_eq!(set.bool("flag"), Some(true));
        assert_eq!(set.int("flag"), Some(1));
        assert_eq!(set.text("size"), None);
    }
}
