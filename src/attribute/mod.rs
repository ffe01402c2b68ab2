//! Attribute registry and decoders.
//!
//! Every formatting attribute in a StarOffice stream is identified by a
//! which-id inside a pool family. The registry maps each known
//! [`AttributeKey`] to a spec holding:
//!
//! - a [`Decoder`]: the binary shape of the payload (a handful of shapes
//!   back hundreds of which-ids),
//! - an [`Effect`]: what the decoded value means when applied to a
//!   [`StyleState`](crate::state::StyleState),
//! - the prototype's default value, used for printing and for lookups of
//!   attributes a set does not carry.
//!
//! Keeping the representation (decoder) apart from the meaning (effect)
//! lets one unsigned-integer decoder serve underline, strike-through,
//! relief, case-map and many more ids, each distinguished at apply time.

mod apply;
mod decode;
mod effect;
mod print;
mod reader;
mod registry;
pub mod schema;
mod value;
pub mod which;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::{StyleLookup, Traversal};
use crate::listener::ContentListener;
use crate::state::StyleState;

pub use decode::{Decoder, decode_attribute};
pub use effect::{
    CellEffect, CharEffect, ChartEffect, DrawEffect, Effect, FrameEffect, GraphicEffect,
    ParaEffect, Scene3dEffect, Script,
};
pub use reader::ItemReader;
pub use registry::{AttributeSpec, Registry, registry};
pub use value::{
    AttributeValue, BorderLine, BoxValue, BrushValue, CharFormatValue, ContentValue,
    EscapementValue, FieldType, FieldValue, FlyValue, FontValue, FootnoteValue, HardBlankValue,
    InetFormatValue, NamedColorValue, RefMarkValue, TabAdjust, TabStop,
};

/// Item pool family a which-id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolFamily {
    /// Writer text, paragraph, frame, graphic and table-box attributes
    Writer,
    /// Edit engine (outliner, drawing text) attributes
    EditEngine,
    /// Spreadsheet cell and page attributes
    Calc,
    /// Chart axis, series and legend attributes
    Chart,
    /// Drawing line, fill, shadow, text and 3D attributes
    Draw,
}

impl fmt::Display for PoolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoolFamily::Writer => "Writer",
            PoolFamily::EditEngine => "EditEngine",
            PoolFamily::Calc => "Calc",
            PoolFamily::Chart => "Chart",
            PoolFamily::Draw => "Draw",
        };
        f.write_str(name)
    }
}

/// Identity of an attribute kind: a which-id within a pool family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeKey {
    pub family: PoolFamily,
    pub which: u16,
}

impl AttributeKey {
    #[inline]
    pub const fn new(family: PoolFamily, which: u16) -> Self {
        Self { family, which }
    }

    #[inline]
    pub const fn writer(which: u16) -> Self {
        Self::new(PoolFamily::Writer, which)
    }

    #[inline]
    pub const fn edit(which: u16) -> Self {
        Self::new(PoolFamily::EditEngine, which)
    }

    #[inline]
    pub const fn calc(which: u16) -> Self {
        Self::new(PoolFamily::Calc, which)
    }

    #[inline]
    pub const fn chart(which: u16) -> Self {
        Self::new(PoolFamily::Chart, which)
    }

    #[inline]
    pub const fn draw(which: u16) -> Self {
        Self::new(PoolFamily::Draw, which)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.which)
    }
}

/// A decoded attribute.
///
/// Created from its prototype and filled in by one decode; immutable
/// afterwards and owned by the item pool's arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: AttributeKey,
    pub name: &'static str,
    pub value: AttributeValue,
}

impl Attribute {
    /// Fresh copy of the registered prototype for `key`.
    pub fn create(key: AttributeKey) -> Option<Attribute> {
        registry().create(key)
    }

    /// Placeholder for a which-id the registry does not know.
    pub fn placeholder(key: AttributeKey) -> Attribute {
        Attribute {
            key,
            name: "unknown",
            value: AttributeValue::Void,
        }
    }

    /// Whether this attribute came from an unregistered which-id.
    pub fn is_placeholder(&self) -> bool {
        registry().spec(self.key).is_none()
    }

    /// The prototype's default value, if the key is registered.
    pub fn default_value(&self) -> Option<&'static AttributeValue> {
        registry().spec(self.key).map(|spec| &spec.default)
    }

    /// Whether the value equals the prototype default.
    pub fn is_default(&self) -> bool {
        self.default_value().is_some_and(|default| *default == self.value)
    }

    /// Project the value onto `state`.
    pub fn add_to(&self, state: &mut StyleState, pool: &dyn StyleLookup, traversal: &mut Traversal) {
        let Some(spec) = registry().spec(self.key) else {
            return;
        };
        apply::apply(spec.effect, self, state, pool, traversal);
    }

    /// Forward embedded content to `listener`.
    ///
    /// Returns `false` for attributes that carry no content.
    pub fn send(
        &self,
        listener: &mut dyn ContentListener,
        state: &StyleState,
        pool: &dyn StyleLookup,
        traversal: &mut Traversal,
    ) -> bool {
        apply::send(self, listener, state, pool, traversal)
    }

    /// Canonical trace form: `name` when the value is the default,
    /// `name=value` otherwise.
    pub fn print_data(&self) -> String {
        print::print_attribute(self)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print_data())
    }
}

