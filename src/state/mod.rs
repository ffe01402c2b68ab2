//! Style state accumulated by applying attributes.
//!
//! Attributes never write output directly. Each one projects its decoded
//! value onto a [`StyleState`]: one [`PropertyList`] per category, keyed
//! by ODF property names. Document readers take the lists from there.

mod property;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use property::{PropertyList, PropertyValue};

/// Object that receives target-dependent attributes (margins, borders,
/// background and shadow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplyTarget {
    #[default]
    Paragraph,
    Frame,
    Graphic,
    Cell,
    Page,
    Chart,
}

/// Mutable accumulator for one style or one formatted run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleState {
    pub font: PropertyList,
    pub paragraph: PropertyList,
    pub frame: PropertyList,
    pub graphic: PropertyList,
    pub cell: PropertyList,
    pub chart: PropertyList,
    pub page: PropertyList,
    /// Where target-dependent attributes go
    pub target: ApplyTarget,
    /// Character style applied through a char-format attribute
    pub char_style: Option<String>,
    /// Chart axis properties switched to automatic
    pub auto_axes: BTreeSet<String>,
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose target-dependent attributes go to `target`.
    pub fn with_target(target: ApplyTarget) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Property list of the current target.
    pub fn target_list(&mut self) -> &mut PropertyList {
        match self.target {
            ApplyTarget::Paragraph => &mut self.paragraph,
            ApplyTarget::Frame => &mut self.frame,
            ApplyTarget::Graphic => &mut self.graphic,
            ApplyTarget::Cell => &mut self.cell,
            ApplyTarget::Page => &mut self.page,
            ApplyTarget::Chart => &mut self.chart,
        }
    }

    /// Whether no attribute has been applied yet.
    pub fn is_empty(&self) -> bool {
        self.font.is_empty()
            && self.paragraph.is_empty()
            && self.frame.is_empty()
            && self.graphic.is_empty()
            && self.cell.is_empty()
            && self.chart.is_empty()
            && self.page.is_empty()
            && self.char_style.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_routing() {
        let mut state = StyleState::with_target(ApplyTarget::Cell);
        state.target_list().insert("fo:padding", 1i64);
        assert!(state.cell.contains("fo:padding"));
        assert!(state.paragraph.is_empty());
        assert!(!state.is_empty());
    }
}
