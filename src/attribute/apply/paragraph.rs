use crate::attribute::effect::ParaEffect;
use crate::attribute::value::{AttributeValue, TabAdjust};
use crate::attribute::Attribute;
use crate::item::Traversal;
use crate::state::{PropertyList, PropertyValue, StyleState};

use super::{length, lookup, unsigned_byte};

const ALIGNMENTS: [&str; 6] = ["start", "end", "justify", "center", "justify", "end"];

const VERTICAL_ALIGNMENTS: [&str; 5] = ["auto", "baseline", "top", "middle", "bottom"];

const WRITING_MODES: [&str; 5] = ["lr-tb", "rl-tb", "tb-rl", "tb-lr", "page"];

// Line spacing rules
const LINE_FIX: i64 = 1;
const LINE_MIN: i64 = 2;
const INTER_PROP: i64 = 1;
const INTER_FIX: i64 = 2;

pub(super) fn apply(
    effect: ParaEffect,
    attr: &Attribute,
    state: &mut StyleState,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let family = attr.key.family;
    let para = &mut state.paragraph;

    match effect {
        ParaEffect::LineSpacing => {
            let Some(record) = value.as_record() else { return };
            let rule = record.int("rule").unwrap_or(0);
            let inter = record.int("inter_rule").unwrap_or(0);
            let height = record.int("height").unwrap_or(0);
            match rule {
                LINE_FIX => para.insert("fo:line-height", length(family, height)),
                LINE_MIN => para.insert("style:line-height-at-least", length(family, height)),
                _ => {},
            }
            match inter {
                INTER_PROP => {
                    let prop = unsigned_byte(record.int("prop_space").unwrap_or(100));
                    para.insert_percent("fo:line-height", prop as f64);
                },
                INTER_FIX => {
                    let space = record.int("inter_space").unwrap_or(0);
                    para.insert("style:line-spacing", length(family, space));
                },
                _ if rule != LINE_FIX && rule != LINE_MIN => {
                    para.insert_percent("fo:line-height", 100.0);
                },
                _ => {},
            }
        },
        ParaEffect::Adjust => {
            let Some(record) = value.as_record() else { return };
            let adjust = record.int("adjust").unwrap_or(0);
            para.insert(
                "fo:text-align",
                lookup(&ALIGNMENTS, adjust, "paragraph adjust", "start", traversal),
            );
            if let Some(last) = record.int("last") {
                let last = match last {
                    2 => "justify",
                    3 => "center",
                    _ => "start",
                };
                para.insert("fo:text-align-last", last);
            }
        },
        ParaEffect::Split => {
            if let Some(split) = value.as_bool() {
                para.insert("fo:keep-together", if split { "auto" } else { "always" });
            }
        },
        ParaEffect::Orphans => {
            if let Some(lines) = value.as_int() {
                para.insert("fo:orphans", lines);
            }
        },
        ParaEffect::Widows => {
            if let Some(lines) = value.as_int() {
                para.insert("fo:widows", lines);
            }
        },
        ParaEffect::Tabs => {
            let AttributeValue::Tabs(stops) = value else { return };
            let entries = stops
                .iter()
                .filter(|stop| stop.adjust != TabAdjust::Default)
                .map(|stop| {
                    let mut entry = PropertyList::new();
                    entry.insert("style:position", length(family, i64::from(stop.position)));
                    let kind = match stop.adjust {
                        TabAdjust::Right => "right",
                        TabAdjust::Decimal => "char",
                        TabAdjust::Center => "center",
                        TabAdjust::Left | TabAdjust::Default => "left",
                    };
                    entry.insert("style:type", kind);
                    if stop.adjust == TabAdjust::Decimal {
                        entry.insert("style:char", stop.decimal.to_string());
                    }
                    if stop.fill != ' ' && stop.fill != '\0' {
                        entry.insert("style:leader-text", stop.fill.to_string());
                    }
                    entry
                })
                .collect();
            para.insert("style:tab-stops", PropertyValue::List(entries));
        },
        ParaEffect::HyphenZone => {
            let Some(record) = value.as_record() else { return };
            para.insert("fo:hyphenate", record.bool("hyphenate").unwrap_or(false));
            if let Some(lead) = record.int("min_lead") {
                para.insert("fo:hyphenation-remain-char-count", lead);
            }
            if let Some(trail) = record.int("min_trail") {
                para.insert("fo:hyphenation-push-char-count", trail);
            }
            match record.int("max_hyphens") {
                Some(0) | None => para.insert("fo:hyphenation-ladder-count", "no-limit"),
                Some(max) => para.insert("fo:hyphenation-ladder-count", max),
            }
        },
        ParaEffect::DropCaps => {
            let Some(record) = value.as_record() else { return };
            let lines = record.int("lines").unwrap_or(0);
            if lines <= 1 {
                para.remove("style:drop-cap-lines");
                return;
            }
            para.insert("style:drop-cap-lines", lines);
            if record.bool("whole_word").unwrap_or(false) {
                para.insert("style:drop-cap-length", "word");
            } else {
                para.insert("style:drop-cap-length", record.int("chars").unwrap_or(1));
            }
            para.insert(
                "style:drop-cap-distance",
                length(family, record.int("distance").unwrap_or(0)),
            );
        },
        ParaEffect::Register => {
            if let Some(on) = value.as_bool() {
                para.insert("style:register-true", on);
            }
        },
        ParaEffect::NumRule => {
            match value.as_text() {
                Some(name) if !name.is_empty() => para.insert("style:list-style-name", name),
                _ => {
                    para.remove("style:list-style-name");
                },
            }
        },
        ParaEffect::ScriptSpace => {
            if let Some(on) = value.as_bool() {
                para.insert("style:text-autospace", if on { "ideograph-alpha" } else { "none" });
            }
        },
        ParaEffect::HangingPunctuation => {
            if let Some(on) = value.as_bool() {
                para.insert("style:punctuation-wrap", if on { "hanging" } else { "simple" });
            }
        },
        ParaEffect::ForbiddenRules => {
            if let Some(on) = value.as_bool() {
                para.insert("style:line-break", if on { "strict" } else { "normal" });
            }
        },
        ParaEffect::VertAlign => {
            let Some(raw) = value.as_int() else { return };
            para.insert(
                "style:vertical-align",
                lookup(&VERTICAL_ALIGNMENTS, raw, "vertical align", "auto", traversal),
            );
        },
        ParaEffect::SnapToGrid => {
            if let Some(on) = value.as_bool() {
                para.insert("style:snap-to-layout-grid", on);
            }
        },
        ParaEffect::ConnectBorder => {
            if let Some(on) = value.as_bool() {
                para.insert("style:join-border", on);
            }
        },
        ParaEffect::WritingDirection => {
            let Some(raw) = value.as_int() else { return };
            para.insert(
                "style:writing-mode",
                lookup(&WRITING_MODES, raw, "writing direction", "page", traversal),
            );
        },
        ParaEffect::OutlineLevel => {
            if let Some(level) = value.as_int() {
                para.insert("text:outline-level", level);
            }
        },
    }
}
