//! Canonical trace form of attributes.
//!
//! `name` when the value equals the prototype default, `name=value` for
//! single values, `name[field=value,...]` for compound ones. Colours print
//! as `#rrggbb`, text is quoted.

use super::Attribute;
use super::value::{AttributeValue, BOX_SIDES, TabAdjust};

enum Printed {
    Bare,
    Single(String),
    Fields(Vec<String>),
}

pub(super) fn print_attribute(attr: &Attribute) -> String {
    if attr.is_placeholder() {
        return format!("{}[{}]", attr.name, attr.key);
    }
    if attr.is_default() {
        return attr.name.to_string();
    }
    match describe(&attr.value) {
        Printed::Bare => attr.name.to_string(),
        Printed::Single(text) => format!("{}={}", attr.name, text),
        Printed::Fields(fields) => format!("{}[{}]", attr.name, fields.join(",")),
    }
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text)
}

fn describe(value: &AttributeValue) -> Printed {
    match value {
        AttributeValue::Void => Printed::Bare,
        AttributeValue::Bool(b) => Printed::Single(b.to_string()),
        AttributeValue::Int(i) => Printed::Single(i.to_string()),
        AttributeValue::UInt(u) => Printed::Single(u.to_string()),
        AttributeValue::Double(d) => Printed::Single(d.to_string()),
        AttributeValue::Color(c) => Printed::Single(c.to_string()),
        AttributeValue::Vec2i(x, y) => Printed::Single(format!("({},{})", x, y)),
        AttributeValue::Text(s) => Printed::Single(quoted(s)),
        AttributeValue::Opaque(bytes) => Printed::Single(format!("<{} bytes>", bytes.len())),
        AttributeValue::ItemSet(set) => Printed::Fields(vec![format!("items={}", set.len())]),
        AttributeValue::Font(font) => {
            let mut fields = vec![format!("name={}", quoted(&font.name))];
            if !font.style.is_empty() {
                fields.push(format!("style={}", quoted(&font.style)));
            }
            fields.push(format!("family={}", font.family));
            fields.push(format!("pitch={}", font.pitch));
            fields.push(format!("charset={}", font.charset));
            Printed::Fields(fields)
        },
        AttributeValue::Escapement(esc) => Printed::Fields(vec![
            format!("escapement={}", esc.escapement),
            format!("proportion={}", esc.proportion),
        ]),
        AttributeValue::CharFormat(format) => {
            Printed::Fields(vec![format!("name={}", quoted(&format.name))])
        },
        AttributeValue::Content(content) => {
            Printed::Fields(vec![format!("bytes={}", content.payload.len())])
        },
        AttributeValue::Field(field) => {
            let mut fields = vec![
                format!("type={}", field.field_type.name()),
                format!("format={}", field.format),
            ];
            if !field.content.is_empty() {
                fields.push(format!("content={}", quoted(&field.content)));
            }
            Printed::Fields(fields)
        },
        AttributeValue::FlyContent(fly) => {
            Printed::Fields(vec![format!("format={}", quoted(&fly.format))])
        },
        AttributeValue::Footnote(note) => {
            let mut fields = vec![format!("number={}", note.number)];
            if !note.label.is_empty() {
                fields.push(format!("label={}", quoted(&note.label)));
            }
            if note.endnote {
                fields.push("endnote".to_string());
            }
            Printed::Fields(fields)
        },
        AttributeValue::HardBlank(blank) => {
            Printed::Fields(vec![format!("char=U+{:04X}", u32::from(blank.ch))])
        },
        AttributeValue::InetFormat(link) => {
            let mut fields = vec![format!("url={}", quoted(&link.url))];
            for (name, text) in [
                ("target", &link.target),
                ("name", &link.name),
                ("visited", &link.visited_style),
                ("unvisited", &link.unvisited_style),
            ] {
                if !text.is_empty() {
                    fields.push(format!("{}={}", name, quoted(text)));
                }
            }
            Printed::Fields(fields)
        },
        AttributeValue::RefMark(mark) => {
            Printed::Fields(vec![format!("name={}", quoted(&mark.name))])
        },
        AttributeValue::Brush(brush) => {
            let mut fields = Vec::new();
            if brush.transparent {
                fields.push("transparent".to_string());
            }
            fields.push(format!("color={}", brush.color));
            fields.push(format!("fill={}", brush.fill));
            fields.push(format!("style={}", brush.style));
            if let Some(link) = &brush.link {
                fields.push(format!("link={}", quoted(link)));
            }
            Printed::Fields(fields)
        },
        AttributeValue::Box(borders) => {
            let mut fields = vec![format!("distance={}", borders.distance)];
            for (side, line) in BOX_SIDES.iter().zip(borders.lines.iter()) {
                if let Some(line) = line {
                    fields.push(format!("{}={}:{}", side, line.width(), line.color));
                }
            }
            Printed::Fields(fields)
        },
        AttributeValue::Tabs(stops) => Printed::Fields(
            stops
                .iter()
                .map(|stop| {
                    let adjust = match stop.adjust {
                        TabAdjust::Left => "left",
                        TabAdjust::Right => "right",
                        TabAdjust::Decimal => "decimal",
                        TabAdjust::Center => "center",
                        TabAdjust::Default => "default",
                    };
                    format!("{}:{}", stop.position, adjust)
                })
                .collect(),
        ),
        AttributeValue::NamedColor(named) => {
            let mut fields = Vec::new();
            if !named.name.is_empty() {
                fields.push(format!("name={}", quoted(&named.name)));
            }
            match named.color {
                Some(color) => fields.push(format!("color={}", color)),
                None => fields.push(format!("index={}", named.index)),
            }
            Printed::Fields(fields)
        },
        AttributeValue::Record(record) => Printed::Fields(
            record
                .iter()
                .map(|(name, scalar)| format!("{}={}", name, scalar))
                .collect(),
        ),
    }
}
