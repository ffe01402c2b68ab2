//! Drawing line, fill, shadow, text-frame and 3D scene attributes.
//!
//! Colours, gradients and dashes may name an entry of the document's
//! colour/gradient/dash tables instead of carrying the value inline. The
//! name is always recorded; the inline value only when it is present.

use log::debug;

use crate::attribute::effect::{DrawEffect, Scene3dEffect};
use crate::attribute::schema::FieldSet;
use crate::attribute::{Attribute, AttributeValue, PoolFamily};
use crate::item::Traversal;
use crate::state::{PropertyList, StyleState};

use super::{length, lookup};

const STROKES: [&str; 3] = ["none", "solid", "dash"];

const LINE_JOINS: [&str; 5] = ["none", "middle", "bevel", "miter", "round"];

const FILLS: [&str; 5] = ["none", "solid", "gradient", "hatch", "bitmap"];

const GRADIENT_STYLES: [&str; 6] = ["linear", "axial", "radial", "ellipsoid", "square", "rectangular"];

const DASH_STYLES: [&str; 4] = ["rect", "round", "rect", "round"];

const VERTICAL_ADJUSTS: [&str; 4] = ["top", "middle", "bottom", "justify"];

const HORIZONTAL_ADJUSTS: [&str; 4] = ["left", "center", "right", "justify"];

const NORMALS_KINDS: [&str; 3] = ["object", "flat", "sphere"];

const PROJECTIONS: [&str; 2] = ["parallel", "perspective"];

const SHADINGS: [&str; 4] = ["flat", "phong", "gouraud", "draft"];

pub(super) fn apply(
    effect: DrawEffect,
    attr: &Attribute,
    state: &mut StyleState,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let family = attr.key.family;
    let graphic = &mut state.graphic;

    match effect {
        DrawEffect::LineStyle => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert("draw:stroke", lookup(&STROKES, raw, "line style", "none", traversal));
        },
        DrawEffect::LineDash => {
            let Some(record) = value.as_record() else { return };
            set_table_name(graphic, "draw:stroke-dash", record);
            if record.get("style").is_some() {
                set_dash(graphic, family, record, traversal);
            }
        },
        DrawEffect::LineWidth => set_length(graphic, "svg:stroke-width", family, value),
        DrawEffect::LineColor => set_named_color(graphic, "svg:stroke-color", value),
        DrawEffect::LineStartWidth => set_length(graphic, "draw:marker-start-width", family, value),
        DrawEffect::LineEndWidth => set_length(graphic, "draw:marker-end-width", family, value),
        DrawEffect::LineTransparence => set_opacity(graphic, "svg:stroke-opacity", value),
        DrawEffect::LineJoint => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert(
                "draw:stroke-linejoin",
                lookup(&LINE_JOINS, raw, "line joint", "none", traversal),
            );
        },
        DrawEffect::FillStyle => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert("draw:fill", lookup(&FILLS, raw, "fill style", "none", traversal));
        },
        DrawEffect::FillColor => set_named_color(graphic, "draw:fill-color", value),
        DrawEffect::FillGradient => {
            let Some(record) = value.as_record() else { return };
            set_table_name(graphic, "draw:fill-gradient-name", record);
            if let Some(style) = record.int("style") {
                graphic.insert(
                    "draw:gradient-style",
                    lookup(&GRADIENT_STYLES, style, "gradient style", "linear", traversal),
                );
                if let Some(start) = record.color("start") {
                    graphic.insert("draw:start-color", start);
                }
                if let Some(end) = record.color("end") {
                    graphic.insert("draw:end-color", end);
                }
                if let Some(angle) = record.int("angle") {
                    graphic.insert("draw:angle", angle);
                }
                if let Some(border) = record.int("border") {
                    graphic.insert_percent("draw:border", border as f64);
                }
            }
        },
        DrawEffect::FillTransparence => set_opacity(graphic, "draw:opacity", value),
        DrawEffect::Shadow => {
            if let Some(on) = value.as_bool() {
                graphic.insert("draw:shadow", if on { "visible" } else { "hidden" });
            }
        },
        DrawEffect::ShadowColor => set_named_color(graphic, "draw:shadow-color", value),
        DrawEffect::ShadowXDist => set_length(graphic, "draw:shadow-offset-x", family, value),
        DrawEffect::ShadowYDist => set_length(graphic, "draw:shadow-offset-y", family, value),
        DrawEffect::ShadowTransparence => set_opacity(graphic, "draw:shadow-opacity", value),
        DrawEffect::TextMinFrameHeight => set_length(graphic, "fo:min-height", family, value),
        DrawEffect::TextAutoGrowHeight => {
            if let Some(on) = value.as_bool() {
                graphic.insert("draw:auto-grow-height", on);
            }
        },
        DrawEffect::TextDistance(key) => set_length(graphic, key, family, value),
        DrawEffect::TextVertAdjust => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert(
                "draw:textarea-vertical-align",
                lookup(&VERTICAL_ADJUSTS, raw, "text vertical adjust", "top", traversal),
            );
        },
        DrawEffect::TextHorzAdjust => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert(
                "draw:textarea-horizontal-align",
                lookup(&HORIZONTAL_ADJUSTS, raw, "text horizontal adjust", "left", traversal),
            );
        },
    }
}

pub(super) fn apply_scene(
    effect: Scene3dEffect,
    attr: &Attribute,
    state: &mut StyleState,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let family = attr.key.family;
    let graphic = &mut state.graphic;

    match effect {
        Scene3dEffect::PercentDiagonal => {
            if let Some(raw) = value.as_int() {
                graphic.insert_percent("dr3d:edge-rounding", raw as f64);
            }
        },
        Scene3dEffect::BackScale => {
            if let Some(raw) = value.as_int() {
                graphic.insert_percent("dr3d:back-scale", raw as f64);
            }
        },
        Scene3dEffect::Depth => set_length(graphic, "dr3d:depth", family, value),
        Scene3dEffect::HorizontalSegments => {
            if let Some(count) = value.as_int() {
                graphic.insert("dr3d:horizontal-segments", count);
            }
        },
        Scene3dEffect::VerticalSegments => {
            if let Some(count) = value.as_int() {
                graphic.insert("dr3d:vertical-segments", count);
            }
        },
        Scene3dEffect::EndAngle => {
            if let Some(tenths) = value.as_int() {
                graphic.insert("dr3d:end-angle", tenths as f64 / 10.0);
            }
        },
        Scene3dEffect::DoubleSided => {
            if let Some(on) = value.as_bool() {
                graphic.insert("dr3d:backface-culling", if on { "disabled" } else { "enabled" });
            }
        },
        Scene3dEffect::NormalsKind => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert(
                "dr3d:normals-kind",
                lookup(&NORMALS_KINDS, raw, "normals kind", "object", traversal),
            );
        },
        Scene3dEffect::Perspective => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert(
                "dr3d:projection",
                lookup(&PROJECTIONS, raw, "projection", "perspective", traversal),
            );
        },
        Scene3dEffect::Distance => set_length(graphic, "dr3d:distance", family, value),
        Scene3dEffect::FocalLength => set_length(graphic, "dr3d:focal-length", family, value),
        Scene3dEffect::TwoSidedLighting => {
            if let Some(on) = value.as_bool() {
                graphic.insert("dr3d:lighting-mode", if on { "double-sided" } else { "standard" });
            }
        },
        Scene3dEffect::LightColor(light) => {
            if let Some(color) = value.as_color() {
                graphic.insert(&format!("dr3d:light-diffuse-color-{}", light), color);
            }
        },
        Scene3dEffect::AmbientColor => {
            if let Some(color) = value.as_color() {
                graphic.insert("dr3d:ambient-color", color);
            }
        },
        Scene3dEffect::LightOn(light) => {
            if let Some(on) = value.as_bool() {
                graphic.insert(&format!("dr3d:light-enabled-{}", light), on);
            }
        },
        Scene3dEffect::ShadowSlant => {
            if let Some(degrees) = value.as_int() {
                graphic.insert("dr3d:shadow-slant", degrees);
            }
        },
        Scene3dEffect::ShadeMode => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert("dr3d:shading", lookup(&SHADINGS, raw, "shade mode", "gouraud", traversal));
        },
    }
}

fn set_length(list: &mut PropertyList, key: &str, family: PoolFamily, value: &AttributeValue) {
    if let Some(raw) = value.as_int() {
        list.insert(key, length(family, raw));
    }
}

/// Opacity from a transparency percentage.
fn set_opacity(list: &mut PropertyList, key: &str, value: &AttributeValue) {
    if let Some(raw) = value.as_int() {
        list.insert_percent(key, (100 - raw.clamp(0, 100)) as f64);
    }
}

fn set_named_color(list: &mut PropertyList, key: &str, value: &AttributeValue) {
    let AttributeValue::NamedColor(named) = value else { return };
    match named.color {
        Some(color) => list.insert(key, color),
        None => debug!("{} refers to table entry {} ('{}')", key, named.index, named.name),
    }
}

fn set_table_name(list: &mut PropertyList, key: &str, record: &FieldSet) {
    match record.text("name") {
        Some(name) if !name.is_empty() => list.insert(key, name),
        _ => {
            list.remove(key);
        },
    }
}

fn set_dash(list: &mut PropertyList, family: PoolFamily, record: &FieldSet, traversal: &mut Traversal) {
    let style = record.int("style").unwrap_or(0);
    list.insert("draw:dash-style", lookup(&DASH_STYLES, style, "dash style", "rect", traversal));
    for (count, len, count_key, len_key) in [
        ("dots", "dot_len", "draw:dots1", "draw:dots1-length"),
        ("dashes", "dash_len", "draw:dots2", "draw:dots2-length"),
    ] {
        if let Some(n) = record.int(count) {
            list.insert(count_key, n);
        }
        if let Some(raw) = record.int(len) {
            list.insert(len_key, length(family, raw));
        }
    }
    if let Some(distance) = record.int("distance") {
        list.insert("draw:distance", length(family, distance));
    }
}
