use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::attribute::{Attribute, AttributeKey, ItemReader, PoolFamily, decode_attribute};
use crate::common::{Diagnostic, Diagnostics};
use crate::config::DecoderConfig;
use crate::state::StyleState;
use crate::zone::StarZone;

use super::{ItemId, Style, StyleFamily, StyleId, StyleLookup, Traversal, apply_style};

/// Arena of decoded attributes plus the document's named styles.
#[derive(Debug, Default)]
pub struct ItemPool {
    items: Vec<Attribute>,
    defaults: HashMap<AttributeKey, ItemId>,
    styles: Vec<Style>,
    style_index: HashMap<(StyleFamily, String), StyleId>,
    /// Items stored once in the pool and referenced from sets by index
    surrogates: HashMap<(AttributeKey, u16), ItemId>,
    reported_unknown: HashSet<AttributeKey>,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `attr` into the arena.
    pub fn insert(&mut self, attr: Attribute) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(attr);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Attribute> {
        self.items.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Make `attr` the pool default for its key.
    pub fn set_default(&mut self, attr: Attribute) -> ItemId {
        let key = attr.key;
        let id = self.insert(attr);
        self.defaults.insert(key, id);
        id
    }

    /// Register a named style, replacing one of the same family and name.
    pub fn add_style(&mut self, style: Style) -> StyleId {
        let key = (style.family, style.name.clone());
        if let Some(&id) = self.style_index.get(&key) {
            debug!("style '{}' redefined", style.name);
            self.styles[id.index()] = style;
            return id;
        }
        let id = StyleId(self.styles.len() as u32);
        self.styles.push(style);
        self.style_index.insert(key, id);
        id
    }

    pub fn style_mut(&mut self, id: StyleId) -> Option<&mut Style> {
        self.styles.get_mut(id.index())
    }

    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    pub fn add_surrogate(&mut self, key: AttributeKey, index: u16, id: ItemId) {
        self.surrogates.insert((key, index), id);
    }

    /// Pooled item referenced by surrogate `index`.
    pub fn surrogate(&self, key: AttributeKey, index: u16) -> Option<ItemId> {
        self.surrogates.get(&(key, index)).copied()
    }

    /// Returns `true` the first time `key` is seen as unknown.
    pub fn note_unknown(&mut self, key: AttributeKey) -> bool {
        self.reported_unknown.insert(key)
    }

    /// Read a block of pooled items up to `end`.
    ///
    /// Layout: u16 count; per item u16 which, u16 version, u16 surrogate
    /// index, u32 payload length and the payload. Each item becomes
    /// reachable through [`surrogate`](Self::surrogate).
    pub fn read_items(&mut self, zone: &mut StarZone, family: PoolFamily, end: u64) -> bool {
        let end = end.min(zone.current_end());
        let Some(count) = ItemReader::new(zone, end).read_u16() else {
            return false;
        };
        for _ in 0..count {
            let mut reader = ItemReader::new(zone, end);
            let (Some(which), Some(version), Some(index), Some(len)) = (
                reader.read_u16(),
                reader.read_u16(),
                reader.read_u16(),
                reader.read_u32(),
            ) else {
                warn!("pool item header truncated at {}", zone.tell());
                return false;
            };
            let item_end = zone.tell().saturating_add(u64::from(len)).min(end);
            let key = AttributeKey::new(family, which);
            if let Some(attr) = decode_attribute(zone, key, version, item_end, self) {
                let id = self.insert(attr);
                self.add_surrogate(key, index, id);
            }
            zone.seek(item_end);
        }
        true
    }

    /// Apply the named style to `state`, returning the findings of the pass.
    ///
    /// Nesting is capped at `config.max_depth`.
    pub fn apply_named_style(
        &self,
        name: &str,
        family: StyleFamily,
        state: &mut StyleState,
        config: &DecoderConfig,
    ) -> Diagnostics {
        let mut traversal = Traversal::with_max_depth(self, config.max_depth);
        match self.find_style(name, family) {
            Some(id) => apply_style(id, state, self, &mut traversal),
            None => traversal.report(Diagnostic::MissingStyle {
                name: name.to_string(),
            }),
        }
        traversal.into_diagnostics()
    }
}

impl StyleLookup for ItemPool {
    fn item(&self, id: ItemId) -> Option<&Attribute> {
        self.get(id)
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn default_item(&self, key: AttributeKey) -> Option<&Attribute> {
        self.defaults.get(&key).and_then(|id| self.get(*id))
    }

    fn find_style(&self, name: &str, family: StyleFamily) -> Option<StyleId> {
        self.style_index.get(&(family, name.to_string())).copied()
    }

    fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id.index())
    }

    fn style_count(&self) -> usize {
        self.styles.len()
    }
}
