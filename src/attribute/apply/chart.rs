use crate::attribute::effect::ChartEffect;
use crate::attribute::{Attribute, AttributeValue};
use crate::common::Diagnostic;
use crate::item::Traversal;
use crate::state::StyleState;

use super::{length, lookup};

const LEGEND_POSITIONS: [&str; 5] = ["none", "start", "top", "end", "bottom"];

const ERROR_CATEGORIES: [&str; 6] = [
    "none",
    "variance",
    "standard-deviation",
    "percentage",
    "error-margin",
    "constant",
];

pub(super) fn apply(
    effect: ChartEffect,
    attr: &Attribute,
    state: &mut StyleState,
    traversal: &mut Traversal,
) {
    let value = &attr.value;
    let chart = &mut state.chart;

    match effect {
        ChartEffect::DataDescription => {
            let Some(raw) = value.as_int() else { return };
            let (number, text) = match raw {
                0 => ("none", false),
                1 => ("value", false),
                2 => ("percentage", false),
                3 => ("none", true),
                4 => ("percentage", true),
                5 => ("value", true),
                _ => {
                    traversal.report(Diagnostic::UnknownEnumValue {
                        name: "data description",
                        value: raw,
                    });
                    ("none", false)
                },
            };
            chart.insert("chart:data-label-number", number);
            chart.insert("chart:data-label-text", text);
        },
        ChartEffect::ShowSymbol => {
            if let Some(on) = value.as_bool() {
                chart.insert("chart:data-label-symbol", on);
            }
        },
        ChartEffect::LegendPosition => {
            let Some(raw) = value.as_int() else { return };
            let position = lookup(&LEGEND_POSITIONS, raw, "legend position", "none", traversal);
            if position == "none" {
                chart.insert("chart:display-legend", false);
                chart.remove("chart:legend-position");
            } else {
                chart.insert("chart:display-legend", true);
                chart.insert("chart:legend-position", position);
            }
        },
        ChartEffect::TextOrientation => {
            let Some(raw) = value.as_int() else { return };
            match raw {
                2 => chart.insert("style:direction", "ttb"),
                3 => chart.insert("style:rotation-angle", 90i64),
                _ => {
                    chart.insert("style:direction", "ltr");
                    chart.remove("style:rotation-angle");
                },
            }
        },
        ChartEffect::AxisAuto(key) => {
            if value.as_bool() == Some(true) {
                state.auto_axes.insert(key.to_string());
                chart.remove(key);
            } else {
                state.auto_axes.remove(key);
            }
        },
        ChartEffect::AxisValue(key) => {
            // an automatic axis ignores explicit values in either order
            if state.auto_axes.contains(key) {
                return;
            }
            if let Some(number) = value.as_double() {
                chart.insert(key, number);
            }
        },
        ChartEffect::Logarithmic => {
            if let Some(on) = value.as_bool() {
                chart.insert("chart:logarithmic", on);
            }
        },
        ChartEffect::MeanValue => {
            if let Some(on) = value.as_bool() {
                chart.insert("chart:mean-value", on);
            }
        },
        ChartEffect::ErrorKind => {
            let Some(raw) = value.as_int() else { return };
            chart.insert(
                "chart:error-category",
                lookup(&ERROR_CATEGORIES, raw, "error kind", "none", traversal),
            );
        },
        ChartEffect::ErrorPercent => {
            if let Some(percent) = value.as_double() {
                chart.insert("chart:error-percentage", percent);
            }
        },
        ChartEffect::StyleFlag(key) => {
            if let Some(on) = value.as_bool() {
                chart.insert(key, on);
            }
        },
        ChartEffect::SymbolSize => {
            let AttributeValue::Vec2i(width, height) = *value else { return };
            chart.insert("chart:symbol-width", length(attr.key.family, i64::from(width)));
            chart.insert("chart:symbol-height", length(attr.key.family, i64::from(height)));
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeKey;
    use crate::attribute::which::{SCHATTR_Y_AXIS_AUTO_MIN, SCHATTR_Y_AXIS_MIN};
    use crate::item::ItemPool;

    fn chart_attr(which: u16, value: AttributeValue) -> Attribute {
        let mut attr = Attribute::create(AttributeKey::chart(which)).unwrap();
        attr.value = value;
        attr
    }

    #[test]
    fn test_auto_axis_wins_in_either_order() {
        let pool = ItemPool::new();
        let auto = chart_attr(SCHATTR_Y_AXIS_AUTO_MIN, AttributeValue::Bool(true));
        let min = chart_attr(SCHATTR_Y_AXIS_MIN, AttributeValue::Double(-5.0));

        for order in [[&auto, &min], [&min, &auto]] {
            let mut state = StyleState::new();
            let mut traversal = Traversal::new(&pool);
            for attr in order {
                attr.add_to(&mut state, &pool, &mut traversal);
            }
            assert!(!state.chart.contains("chart:minimum"));
        }

        let manual = chart_attr(SCHATTR_Y_AXIS_AUTO_MIN, AttributeValue::Bool(false));
        let mut state = StyleState::new();
        let mut traversal = Traversal::new(&pool);
        manual.add_to(&mut state, &pool, &mut traversal);
        min.add_to(&mut state, &pool, &mut traversal);
        assert!(state.chart.contains("chart:minimum"));
    }

    #[test]
    fn test_axis_pair_applied_twice_is_stable() {
        let pool = ItemPool::new();
        let min = chart_attr(SCHATTR_Y_AXIS_MIN, AttributeValue::Double(2.5));
        for auto in [true, false] {
            let flag = chart_attr(SCHATTR_Y_AXIS_AUTO_MIN, AttributeValue::Bool(auto));
            for order in [[&flag, &min], [&min, &flag]] {
                let mut state = StyleState::new();
                let mut traversal = Traversal::new(&pool);
                for attr in order {
                    attr.add_to(&mut state, &pool, &mut traversal);
                }
                let once = state.clone();
                for attr in order {
                    attr.add_to(&mut state, &pool, &mut traversal);
                }
                assert_eq!(state, once);
                assert_eq!(state.chart.contains("chart:minimum"), !auto);
            }
        }
    }
}
