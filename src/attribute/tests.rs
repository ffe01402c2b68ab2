use proptest::prelude::*;
use rstest::rstest;

use super::schema::ALL;
use super::which::*;
use super::*;
use crate::common::{Diagnostic, StarColor};
use crate::item::{ItemPool, Traversal};
use crate::testutil::StreamBuilder;
use crate::zone::RecordProbe;
use crate::zone::version::SWG_LONGIDX;

fn decode_bytes(key: AttributeKey, version: u16, payload: &[u8]) -> (Option<Attribute>, u64) {
    let mut builder = StreamBuilder::new();
    builder.bytes(payload).u8(0xEE);
    let mut zone = builder.zone();
    let mut pool = ItemPool::new();
    let attr = decode_attribute(&mut zone, key, version, payload.len() as u64, &mut pool);
    (attr, zone.tell())
}

fn applied(attr: &Attribute) -> (StyleState, Traversal) {
    let pool = ItemPool::new();
    let mut traversal = Traversal::new(&pool);
    let mut state = StyleState::new();
    attr.add_to(&mut state, &pool, &mut traversal);
    (state, traversal)
}

fn font_str<'a>(state: &'a StyleState, key: &str) -> Option<&'a str> {
    state.font.get(key).and_then(|v| v.as_str())
}

/// Encoded payload of a scalar value in the given shape.
fn encode(decoder: Decoder, value: &AttributeValue) -> Option<Vec<u8>> {
    let bytes = match (decoder, value) {
        (Decoder::Bool, AttributeValue::Bool(b)) => vec![u8::from(*b)],
        (Decoder::U8, AttributeValue::UInt(v)) => vec![*v as u8],
        (Decoder::U16, AttributeValue::UInt(v)) => (*v as u16).to_le_bytes().to_vec(),
        (Decoder::U32, AttributeValue::UInt(v)) => v.to_le_bytes().to_vec(),
        (Decoder::I8, AttributeValue::Int(v)) => vec![*v as i8 as u8],
        (Decoder::I16, AttributeValue::Int(v)) => (*v as i16).to_le_bytes().to_vec(),
        (Decoder::I32, AttributeValue::Int(v)) => v.to_le_bytes().to_vec(),
        (Decoder::Double, AttributeValue::Double(d)) => d.to_le_bytes().to_vec(),
        (Decoder::Color, AttributeValue::Color(c)) => vec![c.r, c.g, c.b, c.transparency],
        _ => return None,
    };
    Some(bytes)
}

/// Value of the given scalar shape built from raw random input.
fn scalar(decoder: Decoder, raw: u32, double: f64) -> Option<AttributeValue> {
    let value = match decoder {
        Decoder::Bool => AttributeValue::Bool(raw & 1 == 1),
        Decoder::U8 => AttributeValue::UInt(raw & 0xFF),
        Decoder::U16 => AttributeValue::UInt(raw & 0xFFFF),
        Decoder::U32 => AttributeValue::UInt(raw),
        Decoder::I8 => AttributeValue::Int(i32::from(raw as u8 as i8)),
        Decoder::I16 => AttributeValue::Int(i32::from(raw as u16 as i16)),
        Decoder::I32 => AttributeValue::Int(raw as i32),
        Decoder::Double => AttributeValue::Double(double),
        Decoder::Color => AttributeValue::Color(StarColor::from_rgba_bytes(raw.to_le_bytes())),
        _ => return None,
    };
    Some(value)
}

fn scalar_specs() -> Vec<&'static AttributeSpec> {
    let mut specs: Vec<_> = registry()
        .iter()
        .filter(|spec| scalar(spec.decoder, 0, 0.0).is_some())
        .collect();
    specs.sort_by_key(|spec| spec.key);
    specs
}

#[test]
fn test_scalar_defaults_read_back_as_default() {
    let specs = scalar_specs();
    assert!(specs.len() > 100);
    for spec in specs {
        let payload = encode(spec.decoder, &spec.default).unwrap();
        let (attr, end) = decode_bytes(spec.key, 0, &payload);
        let attr = attr.unwrap();
        assert_eq!(attr.value, spec.default, "{}", spec.name);
        assert!(attr.is_default(), "{}", spec.name);
        assert_eq!(attr.print_data(), spec.name);
        assert_eq!(end, payload.len() as u64);
    }
}

#[test]
fn test_black_char_color_is_default() {
    let key = AttributeKey::writer(RES_CHRATR_COLOR);
    let (attr, _) = decode_bytes(key, 0, &[0, 0, 0, 0]);
    let attr = attr.unwrap();
    let (state, _) = applied(&attr);
    assert_eq!(
        state.font.get("fo:color").and_then(|v| v.as_color()),
        Some(StarColor::new(0, 0, 0))
    );
    assert_eq!(attr.print_data(), "CharColor");

    let (attr, _) = decode_bytes(key, 0, &[0xFF, 0, 0, 0]);
    let attr = attr.unwrap();
    assert_eq!(attr.print_data(), "CharColor=#ff0000");
    assert_eq!(attr.to_string(), "CharColor=#ff0000");
}

#[rstest]
#[case(0, "none", "none", None)]
#[case(1, "single", "solid", None)]
#[case(2, "double", "solid", None)]
#[case(9, "single", "wave", None)]
#[case(11, "double", "wave", None)]
#[case(12, "single", "solid", Some("bold"))]
#[case(18, "single", "wave", Some("bold"))]
fn test_underline_mapping(
    #[case] raw: u8,
    #[case] kind: &str,
    #[case] style: &str,
    #[case] width: Option<&str>,
) {
    let (attr, _) = decode_bytes(AttributeKey::writer(RES_CHRATR_UNDERLINE), 0, &[raw]);
    let (state, traversal) = applied(&attr.unwrap());
    assert_eq!(font_str(&state, "style:text-underline-type"), Some(kind));
    assert_eq!(font_str(&state, "style:text-underline-style"), Some(style));
    assert_eq!(font_str(&state, "style:text-underline-width"), width);
    assert!(traversal.diagnostics().is_empty());
}

#[test]
fn test_unknown_underline_falls_back_to_none() {
    let (attr, _) = decode_bytes(AttributeKey::writer(RES_CHRATR_UNDERLINE), 0, &[0xFF]);
    let (state, traversal) = applied(&attr.unwrap());
    assert_eq!(font_str(&state, "style:text-underline-type"), Some("none"));
    assert_eq!(font_str(&state, "style:text-underline-style"), Some("none"));
    assert!(traversal.diagnostics().any(|d| matches!(
        d,
        Diagnostic::UnknownEnumValue {
            name: "underline",
            value: 255
        }
    )));
}

#[rstest]
#[case(RES_CHRATR_WEIGHT, "fo:font-weight", 8, "bold")]
#[case(RES_CHRATR_WEIGHT, "fo:font-weight", 5, "normal")]
#[case(RES_CHRATR_CJK_WEIGHT, "style:font-weight-asian", 10, "900")]
#[case(RES_CHRATR_POSTURE, "fo:font-style", 2, "italic")]
#[case(RES_CHRATR_CTL_POSTURE, "style:font-style-complex", 1, "oblique")]
fn test_script_keyed_tables(
    #[case] which: u16,
    #[case] property: &str,
    #[case] raw: u8,
    #[case] expected: &str,
) {
    let (attr, _) = decode_bytes(AttributeKey::writer(which), 0, &[raw]);
    let (state, _) = applied(&attr.unwrap());
    assert_eq!(font_str(&state, property), Some(expected));
}

#[rstest]
#[case(1, "single", None)]
#[case(2, "double", None)]
#[case(5, "single", Some("/"))]
#[case(6, "single", Some("X"))]
fn test_crossed_out_mapping(#[case] raw: u8, #[case] kind: &str, #[case] text: Option<&str>) {
    let (attr, _) = decode_bytes(AttributeKey::writer(RES_CHRATR_CROSSEDOUT), 0, &[raw]);
    let (state, _) = applied(&attr.unwrap());
    assert_eq!(font_str(&state, "style:text-line-through-type"), Some(kind));
    assert_eq!(font_str(&state, "style:text-line-through-text"), text);
}

#[test]
fn test_font_height_version_gates() {
    let key = AttributeKey::writer(RES_CHRATR_FONTSIZE);
    // height 240 twips, 100%, no unit
    let (attr, end) = decode_bytes(key, 0, &[0xF0, 0x00, 100]);
    assert_eq!(end, 3);
    let (state, _) = applied(&attr.unwrap());
    assert_eq!(
        state.font.get("fo:font-size").and_then(|v| v.as_length()).map(|l| l.to_string()),
        Some("12pt".to_string())
    );

    let (attr, end) = decode_bytes(key, 2, &[0xF0, 0x00, 100, 0, 0, 0]);
    assert_eq!(end, 6);
    let AttributeValue::Record(fields) = attr.unwrap().value else {
        panic!("record expected");
    };
    assert_eq!(fields.int("prop"), Some(100));
    assert_eq!(fields.int("unit"), Some(0));
}

#[test]
fn test_short_payload_is_version_mismatch() {
    let mut builder = StreamBuilder::new();
    builder.u8(1).u8(2).u8(3);
    let mut zone = builder.zone();
    let mut pool = ItemPool::new();
    let key = AttributeKey::writer(RES_CHRATR_FONTSIZE);
    assert!(decode_attribute(&mut zone, key, 2, 3, &mut pool).is_none());
    assert_eq!(zone.tell(), 0);
    assert!(zone.diagnostics().any(|d| matches!(
        d,
        Diagnostic::VersionMismatch { version: 2, .. }
    )));
}

#[test]
fn test_unknown_key_prints_placeholder() {
    let key = AttributeKey::writer(9000);
    let (attr, end) = decode_bytes(key, 0, &[1, 2, 3]);
    let attr = attr.unwrap();
    assert_eq!(end, 3);
    assert!(attr.is_placeholder());
    assert_eq!(attr.print_data(), "unknown[Writer:9000]");
    let (state, _) = applied(&attr);
    assert!(state.is_empty());
}

#[test]
fn test_footnote_label_and_endnote_flag() {
    let key = AttributeKey::writer(RES_TXTATR_FTN);
    let mut builder = StreamBuilder::new();
    builder.u16(4).byte_string("iv").bool(true);
    let payload = builder.build();

    let (attr, end) = decode_bytes(key, 1, &payload);
    assert_eq!(end, payload.len() as u64);
    let AttributeValue::Footnote(note) = attr.unwrap().value else {
        panic!("footnote expected");
    };
    assert_eq!(note.number, 4);
    assert_eq!(note.label, "iv");
    assert!(note.endnote);

    // version 0 has no endnote flag; the trailing byte stays unread
    let (attr, end) = decode_bytes(key, 0, &payload);
    assert_eq!(end, payload.len() as u64 - 1);
    let AttributeValue::Footnote(note) = attr.unwrap().value else {
        panic!("footnote expected");
    };
    assert!(!note.endnote);
}

#[test]
fn test_schema_widths_grow_with_item_version() {
    for schema in ALL {
        for stream in [0u16, SWG_LONGIDX] {
            let mut previous: Option<(u64, Vec<&str>)> = None;
            for version in 0..5u16 {
                let names: Vec<&str> = schema.active_fields(version, stream).map(|s| s.name).collect();
                let width = schema.byte_width(version, stream);
                if let (Some((prev_width, prev_names)), Some(width)) = (&previous, width) {
                    assert!(width >= *prev_width, "{} shrinks at version {}", schema.name, version);
                    for name in prev_names {
                        assert!(names.contains(name), "{} drops '{}'", schema.name, name);
                    }
                }
                previous = width.map(|w| (w, names));
            }
        }
    }
}

/// Apply `attr` twice, checking that the second pass changes nothing and
/// repeats the findings of the first.
fn assert_apply_idempotent(attr: &Attribute, state: &mut StyleState, traversal: &mut Traversal) {
    let pool = ItemPool::new();
    let before = traversal.diagnostics().len();
    attr.add_to(state, &pool, traversal);
    let once = state.clone();
    let first = traversal.diagnostics().entries()[before..].to_vec();
    attr.add_to(state, &pool, traversal);
    assert_eq!(*state, once, "{}", attr.name);
    assert_eq!(&traversal.diagnostics().entries()[before + first.len()..], &first[..], "{}", attr.name);
}

#[test]
fn test_every_prototype_applies_idempotently() {
    let pool = ItemPool::new();
    for spec in registry().iter() {
        let attr = Attribute::create(spec.key).unwrap();
        let mut state = StyleState::new();
        let mut traversal = Traversal::new(&pool);
        assert_apply_idempotent(&attr, &mut state, &mut traversal);
    }
}

proptest! {
    #[test]
    fn prop_scalar_apply_is_idempotent(raw in any::<u32>(), double in -1.0e9f64..1.0e9) {
        let pool = ItemPool::new();
        let mut state = StyleState::new();
        let mut traversal = Traversal::new(&pool);
        for spec in scalar_specs() {
            let mut attr = Attribute::create(spec.key).unwrap();
            attr.value = scalar(spec.decoder, raw, double).unwrap();
            assert_apply_idempotent(&attr, &mut state, &mut traversal);
        }
    }

    #[test]
    fn prop_scalar_round_trip(index in any::<prop::sample::Index>(), raw in any::<u32>(), double in -1.0e9f64..1.0e9) {
        let specs = scalar_specs();
        let spec = specs[index.index(specs.len())];
        let value = scalar(spec.decoder, raw, double).unwrap();
        let payload = encode(spec.decoder, &value).unwrap();
        let (attr, end) = decode_bytes(spec.key, 0, &payload);
        let attr = attr.unwrap();
        prop_assert_eq!(&attr.value, &value);
        prop_assert_eq!(attr.name, spec.name);
        prop_assert_eq!(end, payload.len() as u64);
    }

    #[test]
    fn prop_unknown_id_stays_inside_record(
        which in 5000u16..6000,
        body in prop::collection::vec(any::<u8>(), 0..32),
        declared in any::<u64>(),
    ) {
        let key = AttributeKey::writer(which);
        let mut builder = StreamBuilder::new();
        builder.sw(b'A', |b| {
            b.bytes(&body);
        });
        builder.zeros(8);
        let mut zone = builder.zone();
        let mut pool = ItemPool::new();

        let header = zone.open_record(RecordProbe::Sw(Some(b'A'))).unwrap();
        for _ in 0..2 {
            let attr = decode_attribute(&mut zone, key, 0, declared, &mut pool);
            prop_assert!(attr.is_some_and(|a| a.is_placeholder()));
            prop_assert!(zone.tell() <= header.end);
        }
        let reported = zone
            .diagnostics()
            .entries()
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnknownAttribute { .. }))
            .count();
        prop_assert_eq!(reported, 1);
        zone.close_record(&header, "Unknown");
        prop_assert_eq!(zone.tell(), header.end);
    }
}
