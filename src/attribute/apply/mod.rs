//! Projection of decoded attributes onto style state.
//!
//! [`apply`] dispatches on the registered [`Effect`]; the per-category
//! modules hold the raw-value tables. Every projection writes with
//! insert-or-replace, so applying an attribute twice leaves the same state.

mod cell;
mod character;
mod chart;
mod draw;
mod frame;
mod graphic;
mod paragraph;

use log::trace;

use crate::common::{Diagnostic, Length};
use crate::item::{StyleLookup, Traversal};
use crate::listener::ContentListener;
use crate::state::StyleState;

use super::effect::Effect;
use super::value::AttributeValue;
use super::which::{EE_FEATURE_LINEBR, EE_FEATURE_TAB, RES_TXTATR_SOFTHYPH};
use super::{Attribute, PoolFamily};

pub(super) fn apply(
    effect: Effect,
    attr: &Attribute,
    state: &mut StyleState,
    pool: &dyn StyleLookup,
    traversal: &mut Traversal,
) {
    match effect {
        Effect::Char(effect) => character::apply(effect, attr, state, pool, traversal),
        Effect::Para(effect) => paragraph::apply(effect, attr, state, traversal),
        Effect::Frame(effect) => frame::apply(effect, attr, state, traversal),
        Effect::Graphic(effect) => graphic::apply(effect, attr, state, traversal),
        Effect::Cell(effect) => cell::apply(effect, attr, state, traversal),
        Effect::Chart(effect) => chart::apply(effect, attr, state, traversal),
        Effect::Draw(effect) => draw::apply(effect, attr, state, traversal),
        Effect::Scene3d(effect) => draw::apply_scene(effect, attr, state, traversal),
        Effect::NestedSet => {
            let Some(set) = attr.value.as_item_set() else {
                return;
            };
            if !traversal.descend() {
                return;
            }
            set.add_to(state, pool, traversal);
            traversal.ascend();
        },
        Effect::Content | Effect::None => {
            trace!("{} has no style projection", attr.name);
        },
    }
}

pub(super) fn send(
    attr: &Attribute,
    listener: &mut dyn ContentListener,
    state: &StyleState,
    pool: &dyn StyleLookup,
    traversal: &mut Traversal,
) -> bool {
    match &attr.value {
        AttributeValue::HardBlank(blank) => listener.insert_char(blank.ch),
        AttributeValue::Field(field) => listener.insert_field(field, state),
        AttributeValue::Footnote(note) => {
            listener.open_footnote(note);
            if !note.label.is_empty() {
                listener.insert_text(&note.label);
            }
            listener.close_footnote();
        },
        AttributeValue::InetFormat(link) => listener.open_link(link),
        AttributeValue::FlyContent(fly) => listener.insert_frame_anchor(fly),
        AttributeValue::RefMark(mark) => listener.insert_reference_mark(mark),
        AttributeValue::Content(content) => listener.insert_content(content),
        AttributeValue::ItemSet(set) => {
            if !traversal.descend() {
                return false;
            }
            let sent = set.send(listener, state, pool, traversal);
            traversal.ascend();
            return sent;
        },
        AttributeValue::Void => match (attr.key.family, attr.key.which) {
            (PoolFamily::EditEngine, EE_FEATURE_TAB) => listener.insert_char('\t'),
            (PoolFamily::EditEngine, EE_FEATURE_LINEBR) => listener.insert_eol(),
            (PoolFamily::Writer, RES_TXTATR_SOFTHYPH) => listener.insert_char('\u{ad}'),
            _ => return false,
        },
        _ => return false,
    }
    true
}

/// Length in the family's native unit: twips for Writer and Calc,
/// 1/100 mm for the drawing-based pools.
pub(super) fn length(family: PoolFamily, raw: i64) -> Length {
    match family {
        PoolFamily::Writer | PoolFamily::Calc => Length::from_twips(raw),
        PoolFamily::EditEngine | PoolFamily::Chart | PoolFamily::Draw => {
            Length::from_hundredth_mm(raw)
        },
    }
}

/// Entry `raw` of a value table.
///
/// Out-of-range values give `fallback` and record an `UnknownEnumValue`.
pub(super) fn lookup(
    table: &[&'static str],
    raw: i64,
    name: &'static str,
    fallback: &'static str,
    traversal: &mut Traversal,
) -> &'static str {
    match usize::try_from(raw).ok().and_then(|i| table.get(i)) {
        Some(entry) => entry,
        None => {
            traversal.report(Diagnostic::UnknownEnumValue { name, value: raw });
            fallback
        },
    }
}

/// Raw percentage stored in an 8-bit signed slot.
#[inline]
pub(super) fn unsigned_byte(raw: i64) -> i64 {
    raw & 0xFF
}
