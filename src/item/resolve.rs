use fixedbitset::FixedBitSet;
use log::trace;

use crate::common::{Diagnostic, Diagnostics};
use crate::config::DecoderConfig;
use crate::state::StyleState;

use super::{ItemId, StyleId, StyleLookup};

/// Progress of a named style within one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveState {
    #[default]
    Unresolved,
    /// Being applied; meeting it again is a cycle
    Resolving,
    Resolved,
}

/// State carried through one resolve/apply/print pass.
///
/// Tracks the recursive items on the current path and the resolve state of
/// every named style, both by arena index, plus the nesting depth and the
/// diagnostics found along the way.
#[derive(Debug)]
pub struct Traversal {
    on_path: FixedBitSet,
    styles: Vec<ResolveState>,
    depth: usize,
    max_depth: usize,
    diagnostics: Diagnostics,
}

impl Traversal {
    pub fn new(pool: &dyn StyleLookup) -> Self {
        Self::with_max_depth(pool, DecoderConfig::default().max_depth)
    }

    pub fn with_max_depth(pool: &dyn StyleLookup, max_depth: usize) -> Self {
        Self {
            on_path: FixedBitSet::with_capacity(pool.item_count()),
            styles: vec![ResolveState::Unresolved; pool.style_count()],
            depth: 0,
            max_depth,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Put a recursive item on the current path.
    ///
    /// Returns `false` and records a cycle if it is already there.
    pub fn enter_item(&mut self, id: ItemId) -> bool {
        let index = id.index();
        if index >= self.on_path.len() {
            self.on_path.grow(index + 1);
        }
        if self.on_path.contains(index) {
            self.report(Diagnostic::CycleDetected {
                what: format!("item #{}", index),
            });
            return false;
        }
        self.on_path.insert(index);
        true
    }

    pub fn leave_item(&mut self, id: ItemId) {
        if id.index() < self.on_path.len() {
            self.on_path.set(id.index(), false);
        }
    }

    /// Count one level of nesting against the depth cap.
    ///
    /// On `false` the caller must not call [`ascend`](Self::ascend).
    pub fn descend(&mut self) -> bool {
        if self.depth >= self.max_depth {
            self.report(Diagnostic::DepthExceeded {
                depth: self.depth + 1,
            });
            return false;
        }
        self.depth += 1;
        true
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Move a style to `Resolving`.
    ///
    /// Returns `false` and records a cycle if it is already being resolved.
    pub fn begin_style(&mut self, id: StyleId, name: &str) -> bool {
        let index = id.index();
        if index >= self.styles.len() {
            self.styles.resize(index + 1, ResolveState::Unresolved);
        }
        if self.styles[index] == ResolveState::Resolving {
            self.report(Diagnostic::CycleDetected {
                what: format!("style '{}'", name),
            });
            return false;
        }
        trace!("resolving style '{}'", name);
        self.styles[index] = ResolveState::Resolving;
        true
    }

    pub fn end_style(&mut self, id: StyleId) {
        if let Some(state) = self.styles.get_mut(id.index()) {
            *state = ResolveState::Resolved;
        }
    }

    pub fn style_state(&self, id: StyleId) -> ResolveState {
        self.styles.get(id.index()).copied().unwrap_or_default()
    }

    /// Log and record a finding.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Apply a named style, its parent chain included, to `state`.
///
/// A style met again while it is being applied ends that branch with a
/// `CycleDetected`; everything applied before stays in `state`. A style
/// already applied in this traversal is not applied twice.
pub fn apply_style(
    id: StyleId,
    state: &mut StyleState,
    pool: &dyn StyleLookup,
    traversal: &mut Traversal,
) {
    let Some(style) = pool.style(id) else {
        return;
    };
    if traversal.style_state(id) == ResolveState::Resolved {
        trace!("style '{}' already applied", style.name);
        return;
    }
    if !traversal.begin_style(id, &style.name) {
        return;
    }
    if traversal.descend() {
        style.item_set.add_to(state, pool, traversal);
        traversal.ascend();
    }
    traversal.end_style(id);
}
