use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use super::*;
use crate::attribute::which::*;
use crate::attribute::{AttributeValue, FootnoteValue, HardBlankValue, PoolFamily};
use crate::attribute::CharFormatValue;
use crate::common::{Diagnostic, StarColor};
use crate::config::DecoderConfig;
use crate::listener::TraceListener;
use crate::state::StyleState;
use crate::testutil::StreamBuilder;

fn attr(key: AttributeKey, value: AttributeValue) -> Attribute {
    let mut attr = Attribute::create(key).unwrap();
    attr.value = value;
    attr
}

fn color(key: AttributeKey, r: u8, g: u8, b: u8) -> Attribute {
    attr(key, AttributeValue::Color(StarColor::new(r, g, b)))
}

fn font_color(state: &StyleState) -> Option<StarColor> {
    state.font.get("fo:color").and_then(|v| v.as_color())
}

fn char_format(name: &str) -> Attribute {
    attr(
        AttributeKey::writer(RES_TXTATR_CHARFMT),
        AttributeValue::CharFormat(CharFormatValue {
            name: name.to_string(),
        }),
    )
}

/// Pool view that counts how often each item is fetched.
struct CountingLookup<'a> {
    pool: &'a ItemPool,
    hits: RefCell<HashMap<ItemId, usize>>,
}

impl<'a> CountingLookup<'a> {
    fn new(pool: &'a ItemPool) -> Self {
        Self {
            pool,
            hits: RefCell::new(HashMap::new()),
        }
    }

    fn hits(&self, id: ItemId) -> usize {
        self.hits.borrow().get(&id).copied().unwrap_or(0)
    }
}

impl StyleLookup for CountingLookup<'_> {
    fn item(&self, id: ItemId) -> Option<&Attribute> {
        *self.hits.borrow_mut().entry(id).or_insert(0) += 1;
        self.pool.item(id)
    }

    fn item_count(&self) -> usize {
        self.pool.item_count()
    }

    fn default_item(&self, key: AttributeKey) -> Option<&Attribute> {
        self.pool.default_item(key)
    }

    fn find_style(&self, name: &str, family: StyleFamily) -> Option<StyleId> {
        self.pool.find_style(name, family)
    }

    fn style(&self, id: StyleId) -> Option<&Style> {
        self.pool.style(id)
    }

    fn style_count(&self) -> usize {
        self.pool.style_count()
    }
}

#[test]
fn test_read_direct_null_and_pooled_entries() {
    let mut pool = ItemPool::new();
    let pooled = pool.insert(attr(AttributeKey::writer(RES_CHRATR_UNDERLINE), AttributeValue::UInt(1)));
    pool.add_surrogate(AttributeKey::writer(RES_CHRATR_UNDERLINE), 5, pooled);

    let mut builder = StreamBuilder::new();
    builder.u16(5);
    builder.u16(RES_CHRATR_COLOR).u16(0).u16(0xFFFF).u32(4).bytes(&[0xFF, 0, 0, 0]);
    builder.u16(RES_CHRATR_WEIGHT).u16(0).u16(0xFFF0);
    builder.u16(RES_CHRATR_UNDERLINE).u16(0).u16(5);
    // paragraph attribute, outside the character range
    builder.u16(RES_PARATR_SPLIT).u16(0).u16(0xFFFF).u32(1).bool(false);
    builder.u16(RES_CHRATR_CROSSEDOUT).u16(0).u16(9);
    let end = builder.len() as u64;
    let mut zone = builder.zone();

    let mut set = ItemSet::new();
    let limits = WhichRange::new(PoolFamily::Writer, RES_CHRATR_CASEMAP, RES_CHRATR_END - 1);
    assert!(set.read(&mut zone, limits, end, &mut pool));

    assert_eq!(zone.tell(), end);
    assert_eq!(set.len(), 2);
    let read = set.get(AttributeKey::writer(RES_CHRATR_COLOR), &pool).unwrap();
    assert_eq!(read.value, AttributeValue::Color(StarColor::new(0xFF, 0, 0)));
    assert_eq!(set.get(AttributeKey::writer(RES_CHRATR_UNDERLINE), &pool).unwrap().value, AttributeValue::UInt(1));
    assert!(!set.contains(AttributeKey::writer(RES_CHRATR_WEIGHT)));
    assert!(!set.contains(AttributeKey::writer(RES_PARATR_SPLIT)));
    assert!(zone.diagnostics().any(|d| matches!(
        d,
        Diagnostic::UnknownSurrogate { index: 9, .. }
    )));
}

#[test]
fn test_read_truncated_table_keeps_earlier_entries() {
    let mut pool = ItemPool::new();
    let mut builder = StreamBuilder::new();
    builder.u16(3);
    builder.u16(RES_CHRATR_CONTOUR).u16(0).u16(0xFFFF).u32(1).bool(true);
    builder.u16(RES_CHRATR_SHADOWED);
    let end = builder.len() as u64;
    let mut zone = builder.zone();

    let mut set = ItemSet::new();
    assert!(!set.read(&mut zone, WhichRange::all(PoolFamily::Writer), end, &mut pool));
    assert_eq!(set.len(), 1);
    assert_eq!(zone.level(), 0);
}

#[test]
fn test_get_or_default_falls_back_to_pool_then_prototype() {
    let key = AttributeKey::writer(RES_CHRATR_COLOR);
    let mut pool = ItemPool::new();
    let set = ItemSet::new();

    let prototype = set.get_or_default(key, &pool).unwrap();
    assert!(prototype.is_default());

    pool.set_default(color(key, 0, 0, 0xFF));
    assert_eq!(
        set.get_or_default(key, &pool).unwrap().value.as_color(),
        Some(StarColor::new(0, 0, 0xFF))
    );

    let mut own = ItemSet::new();
    own.add(color(key, 0xFF, 0, 0), &mut pool);
    assert_eq!(
        own.get_or_default(key, &pool).unwrap().value.as_color(),
        Some(StarColor::new(0xFF, 0, 0))
    );
    assert!(set.get_or_default(AttributeKey::writer(9999), &pool).is_none());
}

#[test]
fn test_parent_chain_local_items_win() {
    let mut pool = ItemPool::new();
    let mut standard = Style::new("Standard", StyleFamily::Paragraph);
    standard.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 0, 0, 0xFF), &mut pool);
    standard
        .item_set
        .add(attr(AttributeKey::writer(RES_CHRATR_CONTOUR), AttributeValue::Bool(true)), &mut pool);
    pool.add_style(standard);

    let mut heading = Style::new("Heading", StyleFamily::Paragraph).with_parent("Standard");
    heading.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 0xFF, 0, 0), &mut pool);
    pool.add_style(heading);

    let mut state = StyleState::new();
    let diags = pool.apply_named_style("Heading", StyleFamily::Paragraph, &mut state, &DecoderConfig::new());
    assert!(diags.is_empty());
    assert_eq!(font_color(&state), Some(StarColor::new(0xFF, 0, 0)));
    assert!(state.font.contains("style:text-outline"));
}

#[test]
fn test_missing_parent_and_style_reported() {
    let mut pool = ItemPool::new();
    let mut orphan = Style::new("Orphan", StyleFamily::Paragraph).with_parent("Gone");
    orphan.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 1, 2, 3), &mut pool);
    pool.add_style(orphan);

    let mut state = StyleState::new();
    let diags = pool.apply_named_style("Orphan", StyleFamily::Paragraph, &mut state, &DecoderConfig::new());
    assert!(diags.any(|d| matches!(d, Diagnostic::MissingStyle { name } if name == "Gone")));
    assert_eq!(font_color(&state), Some(StarColor::new(1, 2, 3)));

    let diags = pool.apply_named_style("Orphan", StyleFamily::Character, &mut state, &DecoderConfig::new());
    assert!(diags.any(|d| matches!(d, Diagnostic::MissingStyle { name } if name == "Orphan")));
}

#[test]
fn test_char_format_pointing_at_own_style_stops_at_cycle() {
    let mut pool = ItemPool::new();
    let mut heading = Style::new("Heading1", StyleFamily::Paragraph);
    heading.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 0xFF, 0, 0), &mut pool);
    heading.item_set.add(char_format("Heading1"), &mut pool);
    let id = pool.add_style(heading);

    let mut state = StyleState::new();
    let diags = pool.apply_named_style("Heading1", StyleFamily::Paragraph, &mut state, &DecoderConfig::new());

    assert!(diags.any(|d| matches!(d, Diagnostic::CycleDetected { .. })));
    assert_eq!(font_color(&state), Some(StarColor::new(0xFF, 0, 0)));
    assert_eq!(state.char_style.as_deref(), Some("Heading1"));

    let mut traversal = Traversal::new(&pool);
    apply_style(id, &mut StyleState::new(), &pool, &mut traversal);
    assert_eq!(traversal.style_state(id), ResolveState::Resolved);
}

#[test]
fn test_char_format_into_parent_applies_parent_once() {
    let mut pool = ItemPool::new();
    let mut base = Style::new("B", StyleFamily::Paragraph);
    let colour = base.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 0, 0xFF, 0), &mut pool);
    base.item_set.add(char_format("B"), &mut pool);
    pool.add_style(base);
    let derived = pool.add_style(Style::new("A", StyleFamily::Paragraph).with_parent("B"));

    let lookup = CountingLookup::new(&pool);
    let mut traversal = Traversal::new(&lookup);
    let mut state = StyleState::new();
    apply_style(derived, &mut state, &lookup, &mut traversal);

    assert_eq!(lookup.hits(colour), 1);
    assert!(traversal
        .diagnostics()
        .any(|d| matches!(d, Diagnostic::CycleDetected { what } if what == "style 'B'")));
    assert_eq!(font_color(&state), Some(StarColor::new(0, 0xFF, 0)));
    let base = pool.find_style("B", StyleFamily::Paragraph).unwrap();
    assert_eq!(traversal.style_state(base), ResolveState::Resolved);
    assert_eq!(traversal.style_state(derived), ResolveState::Resolved);
}

#[test]
fn test_shared_parent_applied_once_without_cycle() {
    let mut pool = ItemPool::new();
    let mut base = Style::new("Base", StyleFamily::Paragraph);
    let colour = base.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 1, 2, 3), &mut pool);
    pool.add_style(base);

    let mut left = Style::new("Left", StyleFamily::Paragraph).with_parent("Base");
    left.item_set.add(char_format("Right"), &mut pool);
    let left = pool.add_style(left);
    let mut right = Style::new("Right", StyleFamily::Paragraph).with_parent("Base");
    let shadow = right
        .item_set
        .add(attr(AttributeKey::writer(RES_CHRATR_SHADOWED), AttributeValue::Bool(true)), &mut pool);
    pool.add_style(right);

    let lookup = CountingLookup::new(&pool);
    let mut traversal = Traversal::new(&lookup);
    let mut state = StyleState::new();
    apply_style(left, &mut state, &lookup, &mut traversal);

    assert_eq!(lookup.hits(colour), 1);
    assert_eq!(lookup.hits(shadow), 1);
    assert!(traversal.diagnostics().is_empty());
    assert_eq!(state.char_style.as_deref(), Some("Right"));
    assert_eq!(font_color(&state), Some(StarColor::new(1, 2, 3)));

    // a second request in the same pass is a no-op
    apply_style(left, &mut state, &lookup, &mut traversal);
    assert_eq!(lookup.hits(colour), 1);
    assert!(traversal.diagnostics().is_empty());
}

#[test]
fn test_apply_named_style_honours_depth_cap() {
    let mut pool = ItemPool::new();
    let mut body = Style::new("Body", StyleFamily::Paragraph);
    body.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 7, 7, 7), &mut pool);
    pool.add_style(body);

    let mut state = StyleState::new();
    let capped = DecoderConfig::new().with_max_depth(0);
    let diags = pool.apply_named_style("Body", StyleFamily::Paragraph, &mut state, &capped);
    assert!(diags.any(|d| matches!(d, Diagnostic::DepthExceeded { depth: 1 })));
    assert_eq!(font_color(&state), None);

    let diags = pool.apply_named_style("Body", StyleFamily::Paragraph, &mut state, &DecoderConfig::new());
    assert!(diags.is_empty());
    assert_eq!(font_color(&state), Some(StarColor::new(7, 7, 7)));
}

#[test]
fn test_parent_cycle_terminates() {
    let mut pool = ItemPool::new();
    let mut a = Style::new("A", StyleFamily::Paragraph).with_parent("B");
    a.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 9, 9, 9), &mut pool);
    pool.add_style(a);
    pool.add_style(Style::new("B", StyleFamily::Paragraph).with_parent("A"));

    let mut traversal = Traversal::new(&pool);
    let id = pool.find_style("A", StyleFamily::Paragraph).unwrap();
    let resolved = pool.style(id).unwrap().item_set.resolve(&pool, &mut traversal);
    assert_eq!(resolved.len(), 1);
    assert!(resolved.parent.is_none());
    assert!(traversal
        .diagnostics()
        .any(|d| matches!(d, Diagnostic::CycleDetected { .. })));
}

#[test]
fn test_self_referencing_nested_set_is_cut() {
    let key = AttributeKey::calc(ATTR_PATTERN);
    let mut pool = ItemPool::new();
    let mut inner = ItemSet::new();
    let next = ItemId(pool.len() as u32);
    inner.add_id(key, next);
    let id = pool.insert(attr(key, AttributeValue::ItemSet(Box::new(inner))));
    assert_eq!(id, next);

    let mut top = ItemSet::new();
    top.add_id(key, id);
    let mut traversal = Traversal::new(&pool);
    top.add_to(&mut StyleState::new(), &pool, &mut traversal);
    assert!(traversal
        .diagnostics()
        .any(|d| matches!(d, Diagnostic::CycleDetected { .. })));
    assert_eq!(traversal.depth(), 0);

    let mut traversal = Traversal::new(&pool);
    let printed = top.print_data(&pool, &mut traversal);
    assert!(printed.contains("{...}"));
}

#[test]
fn test_nesting_beyond_cap_reports_depth() {
    let key = AttributeKey::calc(ATTR_PATTERN);
    let mut pool = ItemPool::new();
    let mut set = ItemSet::new();
    for _ in 0..3 {
        let mut outer = ItemSet::new();
        outer.add(attr(key, AttributeValue::ItemSet(Box::new(set))), &mut pool);
        set = outer;
    }

    let mut traversal = Traversal::with_max_depth(&pool, 1);
    set.add_to(&mut StyleState::new(), &pool, &mut traversal);
    assert!(traversal
        .diagnostics()
        .any(|d| matches!(d, Diagnostic::DepthExceeded { .. })));
    assert_eq!(traversal.depth(), 0);
}

#[test]
fn test_send_forwards_content_items() {
    let mut pool = ItemPool::new();
    let mut set = ItemSet::new();
    set.add(
        attr(
            AttributeKey::writer(RES_TXTATR_FTN),
            AttributeValue::Footnote(FootnoteValue {
                number: 3,
                label: "a".to_string(),
                endnote: false,
            }),
        ),
        &mut pool,
    );
    set.add(
        attr(
            AttributeKey::writer(RES_TXTATR_HARDBLANK),
            AttributeValue::HardBlank(HardBlankValue { ch: '-' }),
        ),
        &mut pool,
    );
    set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 1, 1, 1), &mut pool);

    let mut listener = TraceListener::new();
    let mut traversal = Traversal::new(&pool);
    assert!(set.send(&mut listener, &StyleState::new(), &pool, &mut traversal));
    assert_eq!(listener.events, ["footnote(3)", "text(a)", "/footnote", "text(-)"]);
}

#[test]
fn test_print_data_names_style_and_parent() {
    let mut pool = ItemPool::new();
    let mut style = Style::new("Body", StyleFamily::Paragraph).with_parent("Standard");
    style.item_set.add(color(AttributeKey::writer(RES_CHRATR_COLOR), 0xFF, 0, 0), &mut pool);
    let mut traversal = Traversal::new(&pool);
    assert_eq!(
        style.item_set.print_data(&pool, &mut traversal),
        "Body<Standard{CharColor=#ff0000}"
    );
}

#[test]
fn test_style_redefinition_replaces() {
    let mut pool = ItemPool::new();
    let first = pool.add_style(Style::new("Body", StyleFamily::Paragraph));
    let second = pool.add_style(Style::new("Body", StyleFamily::Paragraph).with_parent("Standard"));
    assert_eq!(first, second);
    assert_eq!(pool.style(first).unwrap().parent(), Some("Standard"));
    let other = pool.add_style(Style::new("Body", StyleFamily::Character));
    assert_ne!(first, other);
    assert_eq!(pool.styles().count(), 2);
}

const CHAIN_KEYS: [u16; 4] = [RES_CHRATR_COLOR, RES_CHRATR_CONTOUR, RES_CHRATR_SHADOWED, RES_CHRATR_BLINK];

fn chain_value(which: u16) -> AttributeValue {
    if which == RES_CHRATR_COLOR {
        AttributeValue::Color(StarColor::new(1, 2, 3))
    } else {
        AttributeValue::Bool(true)
    }
}

proptest! {
    #[test]
    fn prop_resolve_visits_each_item_at_most_once(
        links in prop::collection::vec(
            (0usize..8, prop::collection::vec(0usize..4, 0..4), prop::option::of(0usize..8)),
            1..8,
        )
    ) {
        let n = links.len();
        let mut pool = ItemPool::new();
        let mut plain_items = Vec::new();
        for (i, (parent, keys, format)) in links.iter().enumerate() {
            // parents and formats past the end are missing styles
            let mut style = Style::new(format!("S{}", i), StyleFamily::Paragraph)
                .with_parent(format!("S{}", parent));
            for k in keys {
                let which = CHAIN_KEYS[*k];
                plain_items.push(style.item_set.add(attr(AttributeKey::writer(which), chain_value(which)), &mut pool));
            }
            if let Some(target) = format {
                style.item_set.add(char_format(&format!("S{}", target)), &mut pool);
            }
            pool.add_style(style);
        }

        let mut expected = BTreeSet::new();
        let mut seen = BTreeSet::new();
        let mut current = Some(0usize);
        while let Some(i) = current {
            if i >= n || !seen.insert(i) {
                break;
            }
            expected.extend(links[i].1.iter().map(|k| CHAIN_KEYS[*k]));
            if links[i].2.is_some() {
                expected.insert(RES_TXTATR_CHARFMT);
            }
            current = Some(links[i].0);
        }

        let id = pool.find_style("S0", StyleFamily::Paragraph).unwrap();
        let mut traversal = Traversal::new(&pool);
        let resolved = pool.style(id).unwrap().item_set.resolve(&pool, &mut traversal);
        let keys: BTreeSet<u16> = resolved.iter().map(|(key, _)| key.which).collect();
        prop_assert_eq!(keys.len(), resolved.len());
        prop_assert_eq!(keys, expected);

        let lookup = CountingLookup::new(&pool);
        let mut traversal = Traversal::new(&lookup);
        apply_style(id, &mut StyleState::new(), &lookup, &mut traversal);
        for item in &plain_items {
            prop_assert!(lookup.hits(*item) <= 1, "item {:?} applied {} times", item, lookup.hits(*item));
        }
        prop_assert_eq!(traversal.depth(), 0);
        prop_assert_eq!(traversal.style_state(id), ResolveState::Resolved);
    }
}
