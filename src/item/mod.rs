//! Item pools, item sets and named-style resolution.
//!
//! Decoded attributes live in an arena owned by the [`ItemPool`]; an
//! [`ItemSet`] maps attribute keys to arena indices. Named styles carry an
//! item set whose parent reference forms the inheritance chain.
//!
//! Every resolve/apply/print pass runs with a [`Traversal`], which tracks the
//! items and styles currently being expanded by their arena index. A
//! revisit is logged as a cycle and ends that branch; the rest of the pass
//! carries on.

mod pool;
mod resolve;
mod set;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeKey};

pub use pool::ItemPool;
pub use resolve::{ResolveState, Traversal, apply_style};
pub use set::{ItemSet, WhichRange};

/// Stable arena index of a pooled attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena index of a named style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(pub(crate) u32);

impl StyleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Family a named style belongs to; names are unique per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StyleFamily {
    #[default]
    Paragraph,
    Character,
    Frame,
    Page,
    Numbering,
    Cell,
    Graphic,
}

/// A named style.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub name: String,
    pub family: StyleFamily,
    /// Style used for the next paragraph
    pub follow: Option<String>,
    /// The style's own attributes; `item_set.parent` names the parent style
    pub item_set: ItemSet,
}

impl Style {
    pub fn new(name: impl Into<String>, family: StyleFamily) -> Self {
        let name = name.into();
        let item_set = ItemSet {
            style: Some(name.clone()),
            family,
            ..ItemSet::default()
        };
        Self {
            name,
            family,
            follow: None,
            item_set,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.item_set.parent = Some(parent.into());
        self
    }

    pub fn parent(&self) -> Option<&str> {
        self.item_set.parent.as_deref()
    }
}

/// Read access to pooled items and named styles.
///
/// Resolution and apply only need lookups, so they take this trait instead
/// of the concrete pool.
pub trait StyleLookup {
    fn item(&self, id: ItemId) -> Option<&Attribute>;

    fn item_count(&self) -> usize;

    /// Pool-level default for `key`, if the document set one.
    fn default_item(&self, key: AttributeKey) -> Option<&Attribute>;

    fn find_style(&self, name: &str, family: StyleFamily) -> Option<StyleId>;

    fn style(&self, id: StyleId) -> Option<&Style>;

    fn style_count(&self) -> usize;
}
