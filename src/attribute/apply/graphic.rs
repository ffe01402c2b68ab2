use crate::attribute::Attribute;
use crate::attribute::effect::GraphicEffect;
use crate::item::Traversal;
use crate::state::StyleState;

use super::{length, lookup};

const MIRRORS: [&str; 4] = ["none", "vertical", "horizontal", "horizontal vertical"];

const COLOR_MODES: [&str; 4] = ["standard", "greyscale", "mono", "watermark"];

pub(super) fn apply(
    effect: GraphicEffect,
    attr: &Attribute,
    state: &mut StyleState,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let graphic = &mut state.graphic;

    match effect {
        GraphicEffect::Mirror => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert("style:mirror", lookup(&MIRRORS, raw, "mirror", "none", traversal));
        },
        GraphicEffect::Crop => {
            let Some(record) = value.as_record() else { return };
            let side = |name: &str| length(attr.key.family, record.int(name).unwrap_or(0));
            graphic.insert(
                "fo:clip",
                format!(
                    "rect({}, {}, {}, {})",
                    side("top"),
                    side("right"),
                    side("bottom"),
                    side("left")
                ),
            );
        },
        GraphicEffect::Rotation => {
            if let Some(tenths) = value.as_int() {
                graphic.insert("draw:rotation", tenths as f64 / 10.0);
            }
        },
        GraphicEffect::Luminance => {
            if let Some(raw) = value.as_int() {
                graphic.insert_percent("draw:luminance", raw as f64);
            }
        },
        GraphicEffect::Contrast => {
            if let Some(raw) = value.as_int() {
                graphic.insert_percent("draw:contrast", raw as f64);
            }
        },
        GraphicEffect::Channel(channel) => {
            let Some(raw) = value.as_int() else { return };
            let key = match channel {
                'r' => "draw:red",
                'g' => "draw:green",
                _ => "draw:blue",
            };
            graphic.insert_percent(key, raw as f64);
        },
        GraphicEffect::Gamma => {
            if let Some(gamma) = value.as_double() {
                graphic.insert_percent("draw:gamma", gamma * 100.0);
            }
        },
        GraphicEffect::Invert => {
            if let Some(on) = value.as_bool() {
                graphic.insert("draw:color-inversion", on);
            }
        },
        GraphicEffect::Transparency => {
            if let Some(raw) = value.as_int() {
                graphic.insert_percent("draw:image-opacity", (100 - raw.clamp(0, 100)) as f64);
            }
        },
        GraphicEffect::DrawMode => {
            let Some(raw) = value.as_int() else { return };
            graphic.insert(
                "draw:color-mode",
                lookup(&COLOR_MODES, raw, "draw mode", "standard", traversal),
            );
        },
    }
}
