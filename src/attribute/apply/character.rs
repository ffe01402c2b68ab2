use log::debug;

use crate::attribute::effect::{CharEffect, Script};
use crate::attribute::value::{AttributeValue, ESCAPEMENT_AUTO};
use crate::attribute::Attribute;
use crate::common::Diagnostic;
use crate::common::encoding::CHARSET_SYMBOL;
use crate::item::{StyleFamily, StyleLookup, Traversal, apply_style};
use crate::state::{PropertyList, StyleState};

use super::{length, lookup};

/// Underline line kind, line style and bold flag per raw value.
const UNDERLINES: [(&str, &str, bool); 19] = [
    ("none", "none", false),
    ("single", "solid", false),
    ("double", "solid", false),
    ("single", "dotted", false),
    ("none", "none", false),
    ("single", "dash", false),
    ("single", "long-dash", false),
    ("single", "dot-dash", false),
    ("single", "dot-dot-dash", false),
    ("single", "wave", false),
    ("single", "wave", false),
    ("double", "wave", false),
    ("single", "solid", true),
    ("single", "dotted", true),
    ("single", "dash", true),
    ("single", "long-dash", true),
    ("single", "dot-dash", true),
    ("single", "dot-dot-dash", true),
    ("single", "wave", true),
];

const WEIGHTS: [&str; 11] = [
    "normal", "100", "200", "300", "400", "normal", "500", "600", "bold", "800", "900",
];

const POSTURES: [&str; 4] = ["normal", "oblique", "italic", "normal"];

const RELIEFS: [&str; 3] = ["none", "embossed", "engraved"];

const EMPHASIS_MARKS: [&str; 5] = ["none", "dot", "circle", "disc", "accent"];

const FONT_FAMILIES: [&str; 6] = ["", "decorative", "modern", "roman", "script", "swiss"];

const FONT_PITCHES: [&str; 3] = ["", "fixed", "variable"];

const EMPHASIS_BELOW: i64 = 0x2000;

/// Windows language ids with their ISO language and country codes.
const LANGUAGES: &[(u16, &str, &str)] = &[
    (0x0401, "ar", "SA"),
    (0x0404, "zh", "TW"),
    (0x0405, "cs", "CZ"),
    (0x0406, "da", "DK"),
    (0x0407, "de", "DE"),
    (0x0408, "el", "GR"),
    (0x0409, "en", "US"),
    (0x040a, "es", "ES"),
    (0x040b, "fi", "FI"),
    (0x040c, "fr", "FR"),
    (0x040d, "he", "IL"),
    (0x040e, "hu", "HU"),
    (0x0410, "it", "IT"),
    (0x0411, "ja", "JP"),
    (0x0412, "ko", "KR"),
    (0x0413, "nl", "NL"),
    (0x0414, "nb", "NO"),
    (0x0415, "pl", "PL"),
    (0x0416, "pt", "BR"),
    (0x0419, "ru", "RU"),
    (0x041d, "sv", "SE"),
    (0x041f, "tr", "TR"),
    (0x0804, "zh", "CN"),
    (0x0807, "de", "CH"),
    (0x0809, "en", "GB"),
    (0x080c, "fr", "BE"),
    (0x0816, "pt", "PT"),
    (0x0c07, "de", "AT"),
    (0x0c09, "en", "AU"),
    (0x0c0a, "es", "ES"),
    (0x0c0c, "fr", "CA"),
];

const LANGUAGE_NONE: u16 = 0x00FF;

pub(super) fn apply(
    effect: CharEffect,
    attr: &Attribute,
    state: &mut StyleState,
    pool: &dyn StyleLookup,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let family = attr.key.family;
    if effect == CharEffect::CharFormat {
        apply_char_format(value, state, pool, traversal);
        return;
    }
    let font = &mut state.font;

    match effect {
        CharEffect::CaseMap => {
            let Some(raw) = value.as_int() else { return };
            let (transform, variant) = match raw {
                0 => ("none", "normal"),
                1 => ("uppercase", "normal"),
                2 => ("lowercase", "normal"),
                3 => ("capitalize", "normal"),
                4 => ("none", "small-caps"),
                _ => {
                    traversal.report(Diagnostic::UnknownEnumValue {
                        name: "case map",
                        value: raw,
                    });
                    ("none", "normal")
                },
            };
            font.insert("fo:text-transform", transform);
            font.insert("fo:font-variant", variant);
        },
        CharEffect::Color => {
            if let Some(color) = value.as_color() {
                font.insert("fo:color", color);
            }
        },
        CharEffect::Contour => {
            if let Some(on) = value.as_bool() {
                font.insert("style:text-outline", on);
            }
        },
        CharEffect::CrossedOut => {
            let Some(raw) = value.as_int() else { return };
            let (kind, text, bold) = match raw {
                0 | 3 => ("none", None, false),
                1 => ("single", None, false),
                2 => ("double", None, false),
                4 => ("single", None, true),
                5 => ("single", Some("/"), false),
                6 => ("single", Some("X"), false),
                _ => {
                    traversal.report(Diagnostic::UnknownEnumValue {
                        name: "crossed out",
                        value: raw,
                    });
                    ("none", None, false)
                },
            };
            font.insert("style:text-line-through-type", kind);
            font.insert(
                "style:text-line-through-style",
                if kind == "none" { "none" } else { "solid" },
            );
            if bold {
                font.insert("style:text-line-through-width", "bold");
            } else {
                font.remove("style:text-line-through-width");
            }
            match text {
                Some(text) => font.insert("style:text-line-through-text", text),
                None => {
                    font.remove("style:text-line-through-text");
                },
            }
        },
        CharEffect::Escapement => {
            let AttributeValue::Escapement(esc) = value else { return };
            let position = match esc.escapement {
                ESCAPEMENT_AUTO => format!("super {}%", esc.proportion),
                e if e == -ESCAPEMENT_AUTO => format!("sub {}%", esc.proportion),
                0 => "0% 100%".to_string(),
                e => format!("{}% {}%", e, esc.proportion),
            };
            font.insert("style:text-position", position);
        },
        CharEffect::Font(script) => {
            let AttributeValue::Font(desc) = value else { return };
            font.insert(&script.key("fo:font-family", "style:font-family"), desc.name.as_str());
            if !desc.style.is_empty() {
                font.insert(
                    &script.key("style:font-style-name", "style:font-style-name"),
                    desc.style.as_str(),
                );
            }
            let generic = FONT_FAMILIES.get(usize::from(desc.family)).copied().unwrap_or("");
            if !generic.is_empty() {
                font.insert(
                    &script.key("style:font-family-generic", "style:font-family-generic"),
                    generic,
                );
            }
            let pitch = FONT_PITCHES.get(usize::from(desc.pitch)).copied().unwrap_or("");
            if !pitch.is_empty() {
                font.insert(&script.key("style:font-pitch", "style:font-pitch"), pitch);
            }
            if desc.charset == CHARSET_SYMBOL {
                font.insert(&script.key("style:font-charset", "style:font-charset"), "x-symbol");
            }
        },
        CharEffect::FontSize(script) => {
            let Some(record) = value.as_record() else { return };
            let key = script.key("fo:font-size", "style:font-size");
            let prop = record.int("prop").unwrap_or(100);
            if prop != 100 {
                font.insert_percent(&key, prop as f64);
            } else if let Some(height) = record.int("height") {
                font.insert(&key, length(family, height));
            }
        },
        CharEffect::Kerning => {
            let Some(raw) = value.as_int() else { return };
            if raw == 0 {
                font.insert("fo:letter-spacing", "normal");
            } else {
                font.insert("fo:letter-spacing", length(family, raw));
            }
        },
        CharEffect::Language(script) => {
            let Some(raw) = value.as_int() else { return };
            set_language(font, script, raw);
        },
        CharEffect::Posture(script) => {
            let Some(raw) = value.as_int() else { return };
            let posture = lookup(&POSTURES, raw, "posture", "normal", traversal);
            font.insert(&script.key("fo:font-style", "style:font-style"), posture);
        },
        CharEffect::ProportionalSize => {
            if let Some(raw) = value.as_int() {
                font.insert_percent("style:font-size-rel", raw as f64);
            }
        },
        CharEffect::Shadowed => {
            if let Some(on) = value.as_bool() {
                font.insert("fo:text-shadow", if on { "1pt 1pt" } else { "none" });
            }
        },
        CharEffect::Underline => {
            let Some(raw) = value.as_int() else { return };
            let (kind, style, bold) = match usize::try_from(raw).ok().and_then(|i| UNDERLINES.get(i)) {
                Some(entry) => *entry,
                None => {
                    traversal.report(Diagnostic::UnknownEnumValue {
                        name: "underline",
                        value: raw,
                    });
                    ("none", "none", false)
                },
            };
            font.insert("style:text-underline-type", kind);
            font.insert("style:text-underline-style", style);
            if bold {
                font.insert("style:text-underline-width", "bold");
            } else {
                font.remove("style:text-underline-width");
            }
        },
        CharEffect::Weight(script) => {
            let Some(raw) = value.as_int() else { return };
            let weight = lookup(&WEIGHTS, raw, "weight", "normal", traversal);
            font.insert(&script.key("fo:font-weight", "style:font-weight"), weight);
        },
        CharEffect::WordLineMode => {
            let Some(words) = value.as_bool() else { return };
            let mode = if words { "skip-white-space" } else { "continuous" };
            font.insert("style:text-underline-mode", mode);
            font.insert("style:text-line-through-mode", mode);
        },
        CharEffect::AutoKern => {
            if let Some(on) = value.as_bool() {
                font.insert("style:letter-kerning", on);
            }
        },
        CharEffect::Blink => {
            if let Some(on) = value.as_bool() {
                font.insert("style:text-blinking", on);
            }
        },
        CharEffect::NoHyphen => {
            if let Some(off) = value.as_bool() {
                font.insert("fo:hyphenate", !off);
            }
        },
        CharEffect::Background => {
            let AttributeValue::Brush(brush) = value else { return };
            if brush.transparent {
                font.insert("fo:background-color", "transparent");
            } else {
                font.insert("fo:background-color", brush.color);
            }
        },
        CharEffect::Rotate => {
            let Some(record) = value.as_record() else { return };
            let angle = record.int("angle").unwrap_or(0);
            font.insert("style:text-rotation-angle", angle / 10);
            let fit = record.bool("fit_to_line").unwrap_or(false);
            font.insert("style:text-rotation-scale", if fit { "line-height" } else { "fixed" });
        },
        CharEffect::EmphasisMark => {
            let Some(raw) = value.as_int() else { return };
            let mark = lookup(&EMPHASIS_MARKS, raw & 0x0FFF, "emphasis mark", "none", traversal);
            if mark == "none" {
                font.insert("style:text-emphasize", "none");
            } else {
                let position = if raw & EMPHASIS_BELOW != 0 { "below" } else { "above" };
                font.insert("style:text-emphasize", format!("{} {}", mark, position));
            }
        },
        CharEffect::TwoLines => {
            let Some(record) = value.as_record() else { return };
            if !record.bool("enabled").unwrap_or(false) {
                font.insert("style:text-combine", "none");
                return;
            }
            font.insert("style:text-combine", "lines");
            for (field, key) in [
                ("start", "style:text-combine-start-char"),
                ("end", "style:text-combine-end-char"),
            ] {
                let ch = record
                    .int(field)
                    .and_then(|raw| u32::try_from(raw).ok())
                    .and_then(char::from_u32)
                    .filter(|ch| *ch != '\0');
                match ch {
                    Some(ch) => font.insert(key, ch.to_string()),
                    None => {
                        font.remove(key);
                    },
                }
            }
        },
        CharEffect::ScaleWidth => {
            if let Some(raw) = value.as_int() {
                font.insert_percent("style:text-scale", raw as f64);
            }
        },
        CharEffect::Relief => {
            let Some(raw) = value.as_int() else { return };
            let relief = lookup(&RELIEFS, raw, "relief", "none", traversal);
            font.insert("style:font-relief", relief);
        },
        CharEffect::Hidden => {
            let Some(hidden) = value.as_bool() else { return };
            if hidden {
                font.insert("text:display", "none");
            } else {
                font.remove("text:display");
            }
        },
        CharEffect::CharFormat => {},
    }
}

fn set_language(font: &mut PropertyList, script: Script, raw: i64) {
    let language_key = script.key("fo:language", "style:language");
    let country_key = script.key("fo:country", "style:country");
    let Ok(id) = u16::try_from(raw) else { return };
    if id == LANGUAGE_NONE {
        font.insert(&language_key, "zxx");
        font.remove(&country_key);
        return;
    }
    match LANGUAGES.iter().find(|(lcid, _, _)| *lcid == id) {
        Some((_, language, country)) => {
            font.insert(&language_key, *language);
            font.insert(&country_key, *country);
        },
        None => debug!("no ISO code for language id {:#06x}", id),
    }
}

/// Record the character style and apply its items.
fn apply_char_format(
    value: &AttributeValue,
    state: &mut StyleState,
    pool: &dyn StyleLookup,
    traversal: &mut Traversal,
) {
    let AttributeValue::CharFormat(format) = value else { return };
    if format.name.is_empty() {
        return;
    }
    state.char_style = Some(format.name.clone());
    let found = pool
        .find_style(&format.name, StyleFamily::Character)
        .or_else(|| pool.find_style(&format.name, StyleFamily::Paragraph));
    match found {
        Some(id) => apply_style(id, state, pool, traversal),
        None => traversal.report(Diagnostic::MissingStyle {
            name: format.name.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underline_table_covers_bold_variants() {
        assert_eq!(UNDERLINES.len(), 19);
        assert!(UNDERLINES[12..].iter().all(|(_, _, bold)| *bold));
        assert!(UNDERLINES[..12].iter().all(|(_, _, bold)| !*bold));
    }

    #[test]
    fn test_language_lookup() {
        let mut font = PropertyList::new();
        set_language(&mut font, Script::Asian, 0x0411);
        assert_eq!(font.get("style:language-asian").and_then(|v| v.as_str()), Some("ja"));
        assert_eq!(font.get("style:country-asian").and_then(|v| v.as_str()), Some("JP"));

        set_language(&mut font, Script::Latin, i64::from(LANGUAGE_NONE));
        assert_eq!(font.get("fo:language").and_then(|v| v.as_str()), Some("zxx"));
    }
}
