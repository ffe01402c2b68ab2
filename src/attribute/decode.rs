//! Payload decoders.
//!
//! A [`Decoder`] names the binary shape of a which-id's payload. Decoding
//! never reads past the payload end handed in by the caller, and a layout
//! that does not fit the data yields `None` instead of a partial value.

use log::trace;

use crate::attribute::reader::ItemReader;
use crate::attribute::schema::{FieldSet, Scalar, Schema};
use crate::attribute::value::*;
use crate::attribute::{Attribute, AttributeKey, PoolFamily, registry};
use crate::common::Diagnostic;
use crate::item::{ItemPool, ItemSet, WhichRange};
use crate::zone::StarZone;

/// Binary shape of an attribute payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    Void,
    Bool,
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    Double,
    /// Four raw bytes
    Color,
    Vec2i16,
    Vec2i32,
    /// Byte string in the stream charset
    Text,
    /// Nested item set restricted to `first..=last` of `family`
    ItemSet {
        family: PoolFamily,
        first: u16,
        last: u16,
    },
    Font,
    Escapement,
    CharFormat,
    Content,
    Field,
    FlyContent,
    Footnote,
    HardBlank,
    InetFormat,
    RefMark,
    Brush,
    Box,
    Tabs,
    NamedColor,
    Record(&'static Schema),
    /// Name and table index, followed by the record when no index is given
    NamedRecord(&'static Schema),
    /// Payload kept as bytes
    Opaque,
}

impl Decoder {
    /// Value of a freshly created prototype of this shape.
    pub fn default_value(self) -> AttributeValue {
        match self {
            Decoder::Void => AttributeValue::Void,
            Decoder::Bool => AttributeValue::Bool(false),
            Decoder::U8 | Decoder::U16 | Decoder::U32 => AttributeValue::UInt(0),
            Decoder::I8 | Decoder::I16 | Decoder::I32 => AttributeValue::Int(0),
            Decoder::Double => AttributeValue::Double(0.0),
            Decoder::Color => AttributeValue::Color(Default::default()),
            Decoder::Vec2i16 | Decoder::Vec2i32 => AttributeValue::Vec2i(0, 0),
            Decoder::Text => AttributeValue::Text(String::new()),
            Decoder::ItemSet { .. } => AttributeValue::ItemSet(Box::default()),
            Decoder::Font => AttributeValue::Font(FontValue::default()),
            Decoder::Escapement => AttributeValue::Escapement(EscapementValue {
                escapement: 0,
                proportion: 100,
            }),
            Decoder::CharFormat => AttributeValue::CharFormat(CharFormatValue::default()),
            Decoder::Content => AttributeValue::Content(ContentValue::default()),
            Decoder::Field => AttributeValue::Field(FieldValue::default()),
            Decoder::FlyContent => AttributeValue::FlyContent(FlyValue::default()),
            Decoder::Footnote => AttributeValue::Footnote(FootnoteValue::default()),
            Decoder::HardBlank => AttributeValue::HardBlank(HardBlankValue::default()),
            Decoder::InetFormat => AttributeValue::InetFormat(InetFormatValue::default()),
            Decoder::RefMark => AttributeValue::RefMark(RefMarkValue::default()),
            Decoder::Brush => AttributeValue::Brush(BrushValue {
                transparent: true,
                ..BrushValue::default()
            }),
            Decoder::Box => AttributeValue::Box(BoxValue::default()),
            Decoder::Tabs => AttributeValue::Tabs(Vec::new()),
            Decoder::NamedColor => AttributeValue::NamedColor(NamedColorValue {
                index: -1,
                ..NamedColorValue::default()
            }),
            Decoder::Record(schema) | Decoder::NamedRecord(schema) => {
                AttributeValue::Record(FieldSet::new(schema.name))
            },
            Decoder::Opaque => AttributeValue::Opaque(Default::default()),
        }
    }

    /// Decode one payload at item version `version`.
    pub(crate) fn decode(
        self,
        reader: &mut ItemReader<'_>,
        version: u16,
        pool: &mut ItemPool,
    ) -> Option<AttributeValue> {
        let value = match self {
            Decoder::Void => AttributeValue::Void,
            Decoder::Bool => AttributeValue::Bool(reader.read_bool()?),
            Decoder::U8 => AttributeValue::UInt(u32::from(reader.read_u8()?)),
            Decoder::U16 => AttributeValue::UInt(u32::from(reader.read_u16()?)),
            Decoder::U32 => AttributeValue::UInt(reader.read_u32()?),
            Decoder::I8 => AttributeValue::Int(i32::from(reader.read_i8()?)),
            Decoder::I16 => AttributeValue::Int(i32::from(reader.read_i16()?)),
            Decoder::I32 => AttributeValue::Int(reader.read_i32()?),
            Decoder::Double => AttributeValue::Double(reader.read_f64()?),
            Decoder::Color => AttributeValue::Color(reader.read_color()?),
            Decoder::Vec2i16 => {
                let x = reader.read_i16()?;
                let y = reader.read_i16()?;
                AttributeValue::Vec2i(i32::from(x), i32::from(y))
            },
            Decoder::Vec2i32 => AttributeValue::Vec2i(reader.read_i32()?, reader.read_i32()?),
            Decoder::Text => AttributeValue::Text(reader.read_byte_string()?),
            Decoder::ItemSet {
                family,
                first,
                last,
            } => {
                let end = reader.end();
                let mut set = ItemSet::new();
                set.read(reader.zone(), WhichRange::new(family, first, last), end, pool);
                AttributeValue::ItemSet(Box::new(set))
            },
            Decoder::Font => AttributeValue::Font(read_font(reader)?),
            Decoder::Escapement => AttributeValue::Escapement(EscapementValue {
                escapement: reader.read_i16()?,
                proportion: reader.read_u8()?,
            }),
            Decoder::CharFormat => AttributeValue::CharFormat(CharFormatValue {
                name: reader.read_pool_name()?,
            }),
            Decoder::Content => AttributeValue::Content(ContentValue {
                payload: reader.read_rest()?,
            }),
            Decoder::Field => {
                let code = reader.read_u16()?;
                AttributeValue::Field(FieldValue {
                    field_type: FieldType::from_code(code),
                    code,
                    format: reader.read_u16()?,
                    content: reader.read_byte_string()?,
                })
            },
            Decoder::FlyContent => AttributeValue::FlyContent(FlyValue {
                format: reader.read_pool_name()?,
            }),
            Decoder::Footnote => {
                let number = reader.read_u16()?;
                let label = reader.read_byte_string()?;
                let endnote = if version >= 1 {
                    reader.read_bool()?
                } else {
                    false
                };
                AttributeValue::Footnote(FootnoteValue {
                    number,
                    label,
                    endnote,
                })
            },
            Decoder::HardBlank => {
                let ch = if version >= 1 {
                    reader.read_char()?
                } else {
                    HardBlankValue::default().ch
                };
                AttributeValue::HardBlank(HardBlankValue { ch })
            },
            Decoder::InetFormat => AttributeValue::InetFormat(read_inet_format(reader, version)?),
            Decoder::RefMark => AttributeValue::RefMark(RefMarkValue {
                name: reader.read_byte_string()?,
            }),
            Decoder::Brush => AttributeValue::Brush(read_brush(reader, version)?),
            Decoder::Box => AttributeValue::Box(read_box(reader, version)?),
            Decoder::Tabs => AttributeValue::Tabs(read_tabs(reader)?),
            Decoder::NamedColor => {
                let name = reader.read_byte_string()?;
                let index = reader.read_i32()?;
                let color = if index < 0 {
                    Some(reader.read_stream_color()?)
                } else {
                    None
                };
                AttributeValue::NamedColor(NamedColorValue { name, index, color })
            },
            Decoder::Record(schema) => {
                let stream_version = reader.zone().version();
                AttributeValue::Record(schema.read(reader, version, stream_version)?)
            },
            Decoder::NamedRecord(schema) => {
                let name = reader.read_byte_string()?;
                let index = reader.read_i32()?;
                let mut set = if index < 0 {
                    let stream_version = reader.zone().version();
                    schema.read(reader, version, stream_version)?
                } else {
                    FieldSet::new(schema.name)
                };
                set.push("name", Scalar::Text(name));
                set.push("index", Scalar::Int(i64::from(index)));
                AttributeValue::Record(set)
            },
            Decoder::Opaque => AttributeValue::Opaque(reader.read_rest()?),
        };
        Some(value)
    }
}

fn read_font(reader: &mut ItemReader<'_>) -> Option<FontValue> {
    Some(FontValue {
        family: reader.read_u8()?,
        pitch: reader.read_u8()?,
        charset: reader.read_u8()?,
        name: reader.read_byte_string()?,
        style: reader.read_byte_string()?,
    })
}

fn read_inet_format(reader: &mut ItemReader<'_>, version: u16) -> Option<InetFormatValue> {
    let url = reader.read_byte_string()?;
    let target = reader.read_byte_string()?;
    let visited_style = reader.read_pool_name()?;
    let unvisited_style = reader.read_pool_name()?;
    let name = if version >= 1 {
        reader.read_byte_string()?
    } else {
        String::new()
    };
    Some(InetFormatValue {
        url,
        target,
        name,
        visited_style,
        unvisited_style,
    })
}

fn read_brush(reader: &mut ItemReader<'_>, version: u16) -> Option<BrushValue> {
    let transparent = reader.read_bool()?;
    let color = reader.read_stream_color()?;
    let fill = reader.read_stream_color()?;
    let style = reader.read_i8()?;
    let (position, link) = if version >= 1 {
        let position = reader.read_u16()?;
        let link = if position != 0 {
            Some(reader.read_byte_string()?)
        } else {
            None
        };
        (position, link)
    } else {
        (0, None)
    };
    Some(BrushValue {
        transparent,
        color,
        fill,
        style,
        position,
        link,
    })
}

fn read_box(reader: &mut ItemReader<'_>, version: u16) -> Option<BoxValue> {
    let mut value = BoxValue {
        distance: reader.read_u16()?,
        ..BoxValue::default()
    };
    loop {
        let side = reader.read_i8()?;
        let Some(slot) = usize::try_from(side).ok().filter(|&s| s < 4) else {
            break;
        };
        value.lines[slot] = Some(BorderLine {
            color: reader.read_stream_color()?,
            outer: reader.read_u16()?,
            inner: reader.read_u16()?,
            distance: reader.read_u16()?,
        });
    }
    if version >= 1 {
        let mut distances = [0u16; 4];
        for distance in &mut distances {
            *distance = reader.read_u16()?;
        }
        value.distances = Some(distances);
    }
    Some(value)
}

fn read_tabs(reader: &mut ItemReader<'_>) -> Option<Vec<TabStop>> {
    let count = reader.read_i8()?;
    let mut stops = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    for _ in 0..count.max(0) {
        let position = reader.read_i32()?;
        let adjust = TabAdjust::from_raw(reader.read_i8()?).unwrap_or_default();
        let decimal = reader.read_char()?;
        let fill = reader.read_char()?;
        stops.push(TabStop {
            position,
            adjust,
            decimal,
            fill,
        });
    }
    Some(stops)
}

/// Decode the attribute `key` at the cursor.
///
/// Reads at most up to `end_pos` (capped by the innermost open record).
/// An unregistered key is reported once per pool, skipped to the payload
/// end and returned as a placeholder. A payload that does not fit its
/// layout yields `None`, a `VersionMismatch` diagnostic and a restored
/// cursor; the caller heals by seeking to the payload end.
pub fn decode_attribute(
    zone: &mut StarZone,
    key: AttributeKey,
    version: u16,
    end_pos: u64,
    pool: &mut ItemPool,
) -> Option<Attribute> {
    let limit = end_pos.min(zone.current_end());
    let Some(spec) = registry().spec(key) else {
        if pool.note_unknown(key) {
            zone.report(Diagnostic::UnknownAttribute { key });
        }
        if zone.tell() < limit {
            zone.seek(limit);
        }
        return Some(Attribute::placeholder(key));
    };

    let start = zone.tell();
    let mut reader = ItemReader::new(zone, limit);
    match spec.decoder.decode(&mut reader, version, pool) {
        Some(value) => {
            trace!("{}: decoded {} ({}) v{}", zone.name(), spec.name, key, version);
            Some(Attribute {
                key,
                name: spec.name,
                value,
            })
        },
        None => {
            zone.seek(start);
            zone.report(Diagnostic::VersionMismatch {
                key,
                name: spec.name,
                version,
            });
            None
        },
    }
}
