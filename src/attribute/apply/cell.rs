use crate::attribute::effect::CellEffect;
use crate::attribute::{Attribute, AttributeValue};
use crate::common::Diagnostic;
use crate::item::Traversal;
use crate::state::StyleState;

use super::{length, lookup};

const VERTICAL_JUSTIFY: [&str; 4] = ["automatic", "top", "middle", "bottom"];

// Horizontal justification
const HOR_STANDARD: i64 = 0;
const HOR_REPEAT: i64 = 5;

pub(super) fn apply(
    effect: CellEffect,
    attr: &Attribute,
    state: &mut StyleState,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let family = attr.key.family;

    match effect {
        CellEffect::HorJustify => {
            let Some(raw) = value.as_int() else { return };
            let align = match raw {
                HOR_STANDARD => None,
                1 => Some("start"),
                2 => Some("center"),
                3 => Some("end"),
                4 => Some("justify"),
                HOR_REPEAT => Some("start"),
                _ => {
                    traversal.report(Diagnostic::UnknownEnumValue {
                        name: "horizontal justify",
                        value: raw,
                    });
                    Some("start")
                },
            };
            let cell = &mut state.cell;
            match align {
                Some(align) => {
                    cell.insert("style:text-align-source", "fix");
                    state.paragraph.insert("fo:text-align", align);
                },
                None => {
                    cell.insert("style:text-align-source", "value-type");
                    state.paragraph.remove("fo:text-align");
                },
            }
            state.cell.insert("style:repeat-content", raw == HOR_REPEAT);
        },
        CellEffect::Indent => {
            if let Some(raw) = value.as_int() {
                state.paragraph.insert("fo:margin-left", length(family, raw));
            }
        },
        CellEffect::VerJustify => {
            let Some(raw) = value.as_int() else { return };
            state.cell.insert(
                "style:vertical-align",
                lookup(&VERTICAL_JUSTIFY, raw, "vertical justify", "automatic", traversal),
            );
        },
        CellEffect::Orientation => {
            let Some(raw) = value.as_int() else { return };
            let cell = &mut state.cell;
            match raw {
                1 => {
                    cell.insert("style:direction", "ltr");
                    cell.insert("style:rotation-angle", 270i64);
                },
                2 => {
                    cell.insert("style:direction", "ltr");
                    cell.insert("style:rotation-angle", 90i64);
                },
                3 => {
                    cell.insert("style:direction", "ttb");
                    cell.remove("style:rotation-angle");
                },
                _ => {
                    if raw != 0 {
                        traversal.report(Diagnostic::UnknownEnumValue {
                            name: "cell orientation",
                            value: raw,
                        });
                    }
                    cell.insert("style:direction", "ltr");
                    cell.remove("style:rotation-angle");
                },
            }
        },
        CellEffect::RotateValue => {
            if let Some(hundredths) = value.as_int() {
                state.cell.insert("style:rotation-angle", hundredths as f64 / 100.0);
            }
        },
        CellEffect::LineBreak => {
            if let Some(wrap) = value.as_bool() {
                state.cell.insert("fo:wrap-option", if wrap { "wrap" } else { "no-wrap" });
            }
        },
        CellEffect::Margin => {
            let Some(record) = value.as_record() else { return };
            for side in ["left", "top", "right", "bottom"] {
                if let Some(raw) = record.int(side) {
                    state.cell.insert(&format!("fo:padding-{}", side), length(family, raw));
                }
            }
        },
        CellEffect::Merge => {
            let AttributeValue::Vec2i(columns, rows) = *value else { return };
            let cell = &mut state.cell;
            for (count, key) in [
                (columns, "table:number-columns-spanned"),
                (rows, "table:number-rows-spanned"),
            ] {
                if count > 1 {
                    cell.insert(key, count);
                } else {
                    cell.remove(key);
                }
            }
        },
        CellEffect::ValueFormat => {
            if let Some(format) = value.as_int() {
                state.cell.insert("style:data-style-name", format!("N{}", format));
            }
        },
        CellEffect::Protection => {
            let Some(record) = value.as_record() else { return };
            let protect = record.bool("protect").unwrap_or(true);
            let hide_formula = record.bool("hide_formula").unwrap_or(false);
            let hide_cell = record.bool("hide_cell").unwrap_or(false);
            let mode = match (hide_cell, protect, hide_formula) {
                (true, _, _) => "hidden-and-protected",
                (false, true, true) => "protected formula-hidden",
                (false, true, false) => "protected",
                (false, false, true) => "formula-hidden",
                (false, false, false) => "none",
            };
            state.cell.insert("style:cell-protect", mode);
            let hide_print = record.bool("hide_print").unwrap_or(false);
            state.cell.insert("style:print-content", !hide_print);
        },
        CellEffect::PageSize => {
            let AttributeValue::Vec2i(width, height) = *value else { return };
            state.page.insert("fo:page-width", length(family, i64::from(width)));
            state.page.insert("fo:page-height", length(family, i64::from(height)));
        },
    }
}
