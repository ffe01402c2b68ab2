use crate::attribute::effect::FrameEffect;
use crate::attribute::schema::FieldSet;
use crate::attribute::value::{AttributeValue, BOX_SIDES, BorderLine};
use crate::attribute::{Attribute, PoolFamily};
use crate::common::Diagnostic;
use crate::item::Traversal;
use crate::state::{ApplyTarget, PropertyList, StyleState};

use super::{length, lookup};

const BREAKS: [(&str, &str); 7] = [
    ("auto", "auto"),
    ("column", "auto"),
    ("auto", "column"),
    ("column", "column"),
    ("page", "auto"),
    ("auto", "page"),
    ("page", "page"),
];

const WRAPS: [&str; 6] = ["none", "run-through", "parallel", "dynamic", "left", "right"];

const VERTICAL_POSITIONS: [&str; 10] = [
    "from-top", "top", "middle", "bottom", "top", "middle", "bottom", "top", "middle", "bottom",
];

const HORIZONTAL_POSITIONS: [&str; 7] =
    ["from-left", "right", "center", "left", "inside", "outside", "left"];

const RELATIONS: [&str; 9] = [
    "paragraph",
    "paragraph-content",
    "char",
    "page-start-margin",
    "page-end-margin",
    "frame-start-margin",
    "frame-end-margin",
    "page",
    "page-content",
];

const ANCHORS: [&str; 5] = ["paragraph", "as-char", "page", "frame", "char"];

/// Shadow offset signs per location: top-left, top-right, bottom-left,
/// bottom-right.
const SHADOW_SIGNS: [(i64, i64); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

// Frame size types
const SIZE_MINIMUM: i64 = 2;

pub(super) fn apply(
    effect: FrameEffect,
    attr: &Attribute,
    state: &mut StyleState,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let family = attr.key.family;
    let is_paragraph = state.target == ApplyTarget::Paragraph;

    match effect {
        FrameEffect::LRSpace => {
            let Some(record) = value.as_record() else { return };
            let target = state.target_list();
            set_margin(target, family, record, "left", "fo:margin-left");
            set_margin(target, family, record, "right", "fo:margin-right");
            if is_paragraph {
                set_margin(target, family, record, "first_line", "fo:text-indent");
                if let Some(auto) = record.bool("auto_first") {
                    target.insert("style:auto-text-indent", auto);
                }
            }
        },
        FrameEffect::ULSpace => {
            let Some(record) = value.as_record() else { return };
            let target = state.target_list();
            set_margin(target, family, record, "upper", "fo:margin-top");
            set_margin(target, family, record, "lower", "fo:margin-bottom");
        },
        FrameEffect::Background => {
            let AttributeValue::Brush(brush) = value else { return };
            let target = state.target_list();
            if brush.transparent {
                target.insert("fo:background-color", "transparent");
            } else {
                target.insert("fo:background-color", brush.color);
            }
        },
        FrameEffect::Box => {
            let AttributeValue::Box(borders) = value else { return };
            let target = state.target_list();
            for (i, side) in BOX_SIDES.iter().enumerate() {
                let border_key = format!("fo:border-{}", side);
                let width_key = format!("style:border-line-width-{}", side);
                match &borders.lines[i] {
                    Some(line) => {
                        target.insert(&border_key, border_text(family, line));
                        if line.is_double() {
                            target.insert(&width_key, double_widths(family, line));
                        } else {
                            target.remove(&width_key);
                        }
                    },
                    None => {
                        target.insert(&border_key, "none");
                        target.remove(&width_key);
                    },
                }
                let padding = borders
                    .distances
                    .map(|distances| distances[i])
                    .unwrap_or(borders.distance);
                target.insert(
                    &format!("fo:padding-{}", side),
                    length(family, i64::from(padding)),
                );
            }
        },
        FrameEffect::Shadow => {
            let Some(record) = value.as_record() else { return };
            let location = record.int("location").unwrap_or(0);
            let shadow = match usize::try_from(location - 1).ok().and_then(|i| SHADOW_SIGNS.get(i)) {
                Some((sx, sy)) => {
                    let width = record.int("width").unwrap_or(0);
                    let color = record.color("color").unwrap_or_default();
                    format!(
                        "{} {} {}",
                        color,
                        length(family, sx * width),
                        length(family, sy * width)
                    )
                },
                None => {
                    if location != 0 {
                        traversal.report(Diagnostic::UnknownEnumValue {
                            name: "shadow location",
                            value: location,
                        });
                    }
                    "none".to_string()
                },
            };
            state.target_list().insert("style:shadow", shadow);
        },
        _ => apply_frame_only(effect, value, family, &mut state.frame, traversal),
    }
}

/// Attributes that always describe a frame.
fn apply_frame_only(
    effect: FrameEffect,
    value: &AttributeValue,
    family: PoolFamily,
    frame: &mut PropertyList,
    traversal: &mut Traversal,
) {
    match effect {
        FrameEffect::Size => {
            let Some(record) = value.as_record() else { return };
            let width = record.int("width").unwrap_or(0);
            let height = record.int("height").unwrap_or(0);
            frame.insert("svg:width", length(family, width));
            if record.int("size_type") == Some(SIZE_MINIMUM) {
                frame.insert("fo:min-height", length(family, height));
                frame.remove("svg:height");
            } else {
                frame.insert("svg:height", length(family, height));
                frame.remove("fo:min-height");
            }
            for (field, key) in [
                ("width_percent", "style:rel-width"),
                ("height_percent", "style:rel-height"),
            ] {
                match record.int(field) {
                    Some(percent) if percent > 0 => frame.insert_percent(key, percent as f64),
                    _ => {
                        frame.remove(key);
                    },
                }
            }
        },
        FrameEffect::Break => {
            let Some(raw) = value.as_int() else { return };
            let (before, after) = match usize::try_from(raw).ok().and_then(|i| BREAKS.get(i)) {
                Some(entry) => *entry,
                None => {
                    traversal.report(Diagnostic::UnknownEnumValue {
                        name: "break",
                        value: raw,
                    });
                    ("auto", "auto")
                },
            };
            frame.insert("fo:break-before", before);
            frame.insert("fo:break-after", after);
        },
        FrameEffect::Print => {
            if let Some(on) = value.as_bool() {
                frame.insert("style:print-content", on);
            }
        },
        FrameEffect::Opaque => {
            if let Some(on) = value.as_bool() {
                frame.insert("style:run-through", if on { "foreground" } else { "background" });
            }
        },
        FrameEffect::Protect => {
            let Some(record) = value.as_record() else { return };
            let parts: Vec<&str> = ["content", "size", "position"]
                .into_iter()
                .filter(|field| record.bool(field).unwrap_or(false))
                .collect();
            if parts.is_empty() {
                frame.insert("style:protect", "none");
            } else {
                frame.insert("style:protect", parts.join(" "));
            }
        },
        FrameEffect::Surround => {
            let Some(record) = value.as_record() else { return };
            let raw = record.int("surround").unwrap_or(0);
            frame.insert("style:wrap", lookup(&WRAPS, raw, "surround", "none", traversal));
            if let Some(anchor_only) = record.bool("anchor_only") {
                frame.insert(
                    "style:number-wrapped-paragraphs",
                    if anchor_only { "1" } else { "no-limit" },
                );
            }
            if let Some(contour) = record.bool("contour") {
                frame.insert("style:wrap-contour", contour);
            }
            if let Some(outside) = record.bool("outside") {
                frame.insert("style:wrap-contour-mode", if outside { "outside" } else { "full" });
            }
        },
        FrameEffect::VertOrient => {
            let Some(record) = value.as_record() else { return };
            let orient = record.int("orient").unwrap_or(0);
            let pos = lookup(&VERTICAL_POSITIONS, orient, "vertical orientation", "from-top", traversal);
            frame.insert("style:vertical-pos", pos);
            let relation = record.int("relation").unwrap_or(0);
            frame.insert(
                "style:vertical-rel",
                lookup(&RELATIONS, relation, "vertical relation", "paragraph", traversal),
            );
            if pos == "from-top" {
                frame.insert("svg:y", length(family, record.int("position").unwrap_or(0)));
            }
        },
        FrameEffect::HoriOrient => {
            let Some(record) = value.as_record() else { return };
            let orient = record.int("orient").unwrap_or(0);
            let pos = lookup(
                &HORIZONTAL_POSITIONS,
                orient,
                "horizontal orientation",
                "from-left",
                traversal,
            );
            frame.insert("style:horizontal-pos", pos);
            let relation = record.int("relation").unwrap_or(0);
            frame.insert(
                "style:horizontal-rel",
                lookup(&RELATIONS, relation, "horizontal relation", "paragraph", traversal),
            );
            if pos == "from-left" {
                frame.insert("svg:x", length(family, record.int("position").unwrap_or(0)));
            }
            if record.bool("toggle").unwrap_or(false) {
                frame.insert("style:mirror", "horizontal-on-even");
            }
        },
        FrameEffect::Anchor => {
            let Some(record) = value.as_record() else { return };
            let raw = record.int("anchor_type").unwrap_or(0);
            frame.insert("text:anchor-type", lookup(&ANCHORS, raw, "anchor", "paragraph", traversal));
            match record.int("page") {
                Some(page) if page > 0 => frame.insert("text:anchor-page-number", page),
                _ => {
                    frame.remove("text:anchor-page-number");
                },
            }
        },
        FrameEffect::Keep => {
            if let Some(keep) = value.as_bool() {
                frame.insert("fo:keep-with-next", if keep { "always" } else { "auto" });
            }
        },
        FrameEffect::EditInReadonly => {
            if let Some(on) = value.as_bool() {
                frame.insert("style:editable", on);
            }
        },
        FrameEffect::LayoutSplit => {
            if let Some(on) = value.as_bool() {
                frame.insert("style:may-break-between-rows", on);
            }
        },
        FrameEffect::LRSpace
        | FrameEffect::ULSpace
        | FrameEffect::Background
        | FrameEffect::Box
        | FrameEffect::Shadow => {},
    }
}

/// Margin as a percentage when the proportional slot differs from 100,
/// as a length otherwise.
fn set_margin(
    target: &mut PropertyList,
    family: PoolFamily,
    record: &FieldSet,
    field: &str,
    key: &str,
) {
    let prop = record
        .int(&format!("prop_{}", field))
        .map(|prop| prop & 0xFF)
        .unwrap_or(100);
    if prop != 100 {
        target.insert_percent(key, prop as f64);
        return;
    }
    if let Some(raw) = record.int(field) {
        target.insert(key, length(family, raw));
    }
}

fn border_text(family: PoolFamily, line: &BorderLine) -> String {
    let kind = if line.is_double() { "double" } else { "solid" };
    format!("{} {} {}", length(family, i64::from(line.width())), kind, line.color)
}

fn double_widths(family: PoolFamily, line: &BorderLine) -> String {
    format!(
        "{} {} {}",
        length(family, i64::from(line.inner)),
        length(family, i64::from(line.distance)),
        length(family, i64::from(line.outer))
    )
}
