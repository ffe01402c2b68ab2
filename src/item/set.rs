use std::collections::BTreeMap;

use fixedbitset::FixedBitSet;
use log::{debug, trace, warn};

use crate::attribute::{Attribute, AttributeKey, ItemReader, PoolFamily, decode_attribute};
use crate::common::Diagnostic;
use crate::listener::ContentListener;
use crate::state::StyleState;
use crate::zone::StarZone;

use super::{ItemId, ItemPool, ResolveState, StyleFamily, StyleId, StyleLookup, Traversal};

/// Surrogate marking an entry whose payload follows inline.
const SURROGATE_DIRECT: u16 = 0xFFFF;
/// Surrogate marking an entry without a value.
const SURROGATE_NULL: u16 = 0xFFF0;

/// Inclusive which-id range of one family accepted by a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhichRange {
    pub family: PoolFamily,
    pub first: u16,
    pub last: u16,
}

impl WhichRange {
    pub const fn new(family: PoolFamily, first: u16, last: u16) -> Self {
        Self {
            family,
            first,
            last,
        }
    }

    /// Every which-id of `family`.
    pub const fn all(family: PoolFamily) -> Self {
        Self::new(family, 0, u16::MAX)
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        key.family == self.family && (self.first..=self.last).contains(&key.which)
    }
}

/// Attributes keyed by which-id, optionally tied to a named style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSet {
    pub(crate) items: BTreeMap<AttributeKey, ItemId>,
    /// Name of the style this set belongs to
    pub style: Option<String>,
    /// Name of the parent style, looked up in `family`
    pub parent: Option<String>,
    pub family: StyleFamily,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `attr` into the pool and insert it, replacing an item with the
    /// same key.
    pub fn add(&mut self, attr: Attribute, pool: &mut ItemPool) -> ItemId {
        let key = attr.key;
        let id = pool.insert(attr);
        self.items.insert(key, id);
        id
    }

    /// Insert an already pooled item.
    pub fn add_id(&mut self, key: AttributeKey, id: ItemId) {
        self.items.insert(key, id);
    }

    pub fn remove(&mut self, key: AttributeKey) -> Option<ItemId> {
        self.items.remove(&key)
    }

    pub fn get<'p>(&self, key: AttributeKey, pool: &'p dyn StyleLookup) -> Option<&'p Attribute> {
        self.items.get(&key).and_then(|id| pool.item(*id))
    }

    /// The set's own item, else the pool default, else the registered
    /// prototype.
    pub fn get_or_default(&self, key: AttributeKey, pool: &dyn StyleLookup) -> Option<Attribute> {
        self.get(key, pool)
            .or_else(|| pool.default_item(key))
            .cloned()
            .or_else(|| Attribute::create(key))
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.items.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, ItemId)> + '_ {
        self.items.iter().map(|(key, id)| (*key, *id))
    }

    /// Read a serialized set up to `end`.
    ///
    /// Layout: u16 count; per entry u16 which, u16 item version and u16
    /// surrogate. A direct entry continues with a u32 payload length and
    /// the payload. Entries outside `limits` are decoded to stay aligned
    /// but not inserted. Returns `false` when the entry table is cut short;
    /// entries read before that are kept.
    pub fn read(
        &mut self,
        zone: &mut StarZone,
        limits: WhichRange,
        end: u64,
        pool: &mut ItemPool,
    ) -> bool {
        if !zone.enter_nested() {
            return false;
        }
        let ok = self.read_entries(zone, limits, end, pool);
        zone.leave_nested();
        ok
    }

    fn read_entries(
        &mut self,
        zone: &mut StarZone,
        limits: WhichRange,
        end: u64,
        pool: &mut ItemPool,
    ) -> bool {
        let end = end.min(zone.current_end());
        let Some(count) = ItemReader::new(zone, end).read_u16() else {
            return false;
        };

        for _ in 0..count {
            let mut reader = ItemReader::new(zone, end);
            let (Some(which), Some(version), Some(surrogate)) =
                (reader.read_u16(), reader.read_u16(), reader.read_u16())
            else {
                warn!("item set entry truncated at {}", zone.tell());
                return false;
            };
            let key = AttributeKey::new(limits.family, which);

            match surrogate {
                SURROGATE_DIRECT => {
                    let Some(len) = ItemReader::new(zone, end).read_u32() else {
                        return false;
                    };
                    let declared = zone.tell().saturating_add(u64::from(len));
                    if declared > end {
                        warn!("item {} declares {} bytes past the set end", key, declared - end);
                    }
                    let item_end = declared.min(end);
                    let attr = decode_attribute(zone, key, version, item_end, pool);
                    zone.seek(item_end);
                    match attr {
                        Some(attr) if limits.contains(key) => {
                            self.add(attr, pool);
                        },
                        Some(_) => debug!("item {} outside {:?}, skipped", key, limits),
                        None => {},
                    }
                },
                SURROGATE_NULL => {},
                index => match pool.surrogate(key, index) {
                    Some(id) if limits.contains(key) => self.add_id(key, id),
                    Some(_) => debug!("pooled item {} outside {:?}, skipped", key, limits),
                    None => zone.report(Diagnostic::UnknownSurrogate { key, index }),
                },
            }
        }
        true
    }

    /// This set merged with its parent chain: keys set locally win over
    /// inherited ones.
    pub fn resolve(&self, pool: &dyn StyleLookup, traversal: &mut Traversal) -> ItemSet {
        self.merge_parents(pool, traversal, false).0
    }

    /// Merge the parent chain into a copy of this set and return the
    /// ancestors whose items were taken.
    ///
    /// With `skip_visited` the walk also stops at an ancestor this traversal
    /// is already applying or has finished applying.
    fn merge_parents(
        &self,
        pool: &dyn StyleLookup,
        traversal: &mut Traversal,
        skip_visited: bool,
    ) -> (ItemSet, Vec<StyleId>) {
        let mut resolved = self.clone();
        resolved.parent = None;
        let mut merged = Vec::new();

        let mut seen = FixedBitSet::with_capacity(pool.style_count());
        if let Some(own) = self.style.as_deref().and_then(|name| pool.find_style(name, self.family)) {
            mark(&mut seen, own.index());
        }

        let mut parent = self.parent.clone();
        while let Some(name) = parent {
            let Some(id) = pool.find_style(&name, self.family) else {
                traversal.report(Diagnostic::MissingStyle { name });
                break;
            };
            if seen.contains(id.index()) {
                traversal.report(Diagnostic::CycleDetected {
                    what: format!("parent style '{}'", name),
                });
                break;
            }
            if skip_visited {
                match traversal.style_state(id) {
                    ResolveState::Unresolved => {},
                    ResolveState::Resolving => {
                        trace!("parent style '{}' is being applied further up", name);
                        break;
                    },
                    ResolveState::Resolved => {
                        trace!("parent style '{}' already applied", name);
                        break;
                    },
                }
            }
            mark(&mut seen, id.index());
            let Some(style) = pool.style(id) else {
                break;
            };
            for (key, item) in &style.item_set.items {
                resolved.items.entry(*key).or_insert(*item);
            }
            merged.push(id);
            parent = style.item_set.parent.clone();
        }
        (resolved, merged)
    }

    /// Apply every resolved item to `state`.
    ///
    /// The merged parent styles count as being resolved while their items
    /// are applied, so a character format pointing back into the chain is
    /// cut as a cycle instead of applying the same items again.
    pub fn add_to(&self, state: &mut StyleState, pool: &dyn StyleLookup, traversal: &mut Traversal) {
        let (resolved, ancestors) = self.merge_parents(pool, traversal, true);
        for id in &ancestors {
            if let Some(style) = pool.style(*id) {
                traversal.begin_style(*id, &style.name);
            }
        }
        for (_, id) in resolved.iter() {
            let Some(attr) = pool.item(id) else {
                continue;
            };
            if attr.value.is_recursive() {
                if !traversal.enter_item(id) {
                    continue;
                }
                attr.add_to(state, pool, traversal);
                traversal.leave_item(id);
            } else {
                attr.add_to(state, pool, traversal);
            }
        }
        for id in &ancestors {
            traversal.end_style(*id);
        }
    }

    /// Forward the content of the set's own items to `listener`.
    ///
    /// Returns `true` if any item carried content.
    pub fn send(
        &self,
        listener: &mut dyn ContentListener,
        state: &StyleState,
        pool: &dyn StyleLookup,
        traversal: &mut Traversal,
    ) -> bool {
        let mut sent = false;
        for (_, id) in self.iter() {
            let Some(attr) = pool.item(id) else {
                continue;
            };
            if !traversal.enter_item(id) {
                continue;
            }
            sent |= attr.send(listener, state, pool, traversal);
            traversal.leave_item(id);
        }
        sent
    }

    /// Trace form: `{item,item,...}` with nested sets expanded in place.
    pub fn print_data(&self, pool: &dyn StyleLookup, traversal: &mut Traversal) -> String {
        let mut parts = Vec::with_capacity(self.items.len());
        for (key, id) in self.iter() {
            let Some(attr) = pool.item(id) else {
                parts.push(format!("missing[{}]", key));
                continue;
            };
            match attr.value.as_item_set() {
                Some(nested) => {
                    if !traversal.enter_item(id) {
                        parts.push(format!("{}{{...}}", attr.name));
                        continue;
                    }
                    parts.push(format!("{}{}", attr.name, nested.print_data(pool, traversal)));
                    traversal.leave_item(id);
                },
                None => parts.push(attr.print_data()),
            }
        }
        let body = parts.join(",");
        match (&self.style, &self.parent) {
            (Some(style), Some(parent)) => format!("{}<{}{{{}}}", style, parent, body),
            (Some(style), None) => format!("{}{{{}}}", style, body),
            _ => format!("{{{}}}", body),
        }
    }
}

fn mark(set: &mut FixedBitSet, index: usize) {
    if index >= set.len() {
        set.grow(index + 1);
    }
    set.insert(index);
}
