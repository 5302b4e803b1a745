// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pointer hit-testing and the ordered selection set

use crate::layers::LayerSet;
use plan_lite_core::{PlanElement, Point2D};
use serde::{Deserialize, Serialize};

/// Default hit tolerance in document units, applied on all four sides.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Resolve a document-space point to the topmost-painted element under it.
///
/// Elements are scanned in reverse document order so later-painted elements
/// win. Bare text (no bounds) is never hit, and hidden layers are skipped
/// entirely without touching the element list.
pub fn hit_test<'a>(
    elements: &'a [PlanElement],
    layers: &LayerSet,
    point: Point2D,
    tolerance: f64,
) -> Option<&'a PlanElement> {
    elements.iter().rev().find(|element| {
        layers.is_visible(element.layer)
            && element
                .bounds
                .is_some_and(|bounds| bounds.expanded(tolerance).contains(point))
    })
}

/// Ordered selection plus the at-most-one hovered element
///
/// Insertion order is selection order. Hover is independent of selection
/// and cleared when the pointer leaves the canvas.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectionState {
    selected: Vec<String>,
    hovered: Option<String>,
}

impl SelectionState {
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Exclusive select replaces the set; additive select appends if absent.
    /// Re-selecting an already-selected id is a no-op, not a toggle.
    pub fn select(&mut self, id: &str, additive: bool) {
        if !additive {
            self.selected.clear();
            self.selected.push(id.to_string());
            return;
        }
        if !self.is_selected(id) {
            self.selected.push(id.to_string());
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.selected.retain(|s| s != id);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.hovered = None;
    }

    pub fn set_hovered(&mut self, id: Option<String>) {
        self.hovered = id;
    }

    pub fn pointer_left(&mut self) {
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_lite_core::parse;

    fn overlapping_plan() -> Vec<PlanElement> {
        parse(
            "<svg viewBox='0 0 100 100'>\
             <rect id='under' class='space' x='0' y='0' width='50' height='50'/>\
             <rect id='over' class='space' x='20' y='20' width='50' height='50'/>\
             <line id='axis-a' class='grid' x1='30' y1='0' x2='30' y2='100'/>\
             <text id='note' class='label' x='30' y='30'>N</text>\
             </svg>",
        )
        .unwrap()
        .elements
    }

    #[test]
    fn topmost_painted_element_wins() {
        let elements = overlapping_plan();
        let layers = LayerSet::default();
        // (30, 30) is inside under, over, and the grid line's expanded
        // bounds; the grid line paints last among bounded elements.
        let hit = hit_test(&elements, &layers, Point2D::new(35.0, 35.0), 0.0).unwrap();
        assert_eq!(hit.id, "over");
    }

    #[test]
    fn hidden_layer_is_skipped_without_mutating_elements() {
        let elements = overlapping_plan();
        let mut layers = LayerSet::default();
        layers.hide_all();
        assert!(hit_test(&elements, &layers, Point2D::new(35.0, 35.0), 0.0).is_none());
        assert_eq!(elements.len(), 4);

        let mut only_arch = LayerSet::default();
        only_arch.toggle_visibility(plan_lite_core::Layer::Grid);
        let hit = hit_test(&elements, &only_arch, Point2D::new(30.0, 10.0), 2.0).unwrap();
        assert_eq!(hit.id, "under");
    }

    #[test]
    fn tolerance_expands_the_hit_area() {
        let elements = overlapping_plan();
        let layers = LayerSet::default();
        assert!(hit_test(&elements, &layers, Point2D::new(74.0, 74.0), 0.0).is_none());
        let hit = hit_test(&elements, &layers, Point2D::new(74.0, 74.0), HIT_TOLERANCE).unwrap();
        assert_eq!(hit.id, "over");
    }

    #[test]
    fn bare_text_is_never_hit() {
        let elements = overlapping_plan();
        let layers = LayerSet::default();
        // Directly on the text anchor; the grid line is underneath and wins.
        let hit = hit_test(&elements, &layers, Point2D::new(30.0, 30.0), 1.0).unwrap();
        assert_ne!(hit.id, "note");
    }

    #[test]
    fn exclusive_select_is_idempotent() {
        let mut selection = SelectionState::default();
        selection.select("a", false);
        selection.select("a", false);
        assert_eq!(selection.selected_ids(), ["a"]);
    }

    #[test]
    fn additive_select_preserves_insertion_order() {
        let mut selection = SelectionState::default();
        selection.select("a", false);
        selection.select("b", true);
        selection.select("a", true);
        assert_eq!(selection.selected_ids(), ["a", "b"]);
    }

    #[test]
    fn deselect_removes_only_the_target() {
        let mut selection = SelectionState::default();
        selection.select("a", false);
        selection.select("b", true);
        selection.deselect("a");
        assert_eq!(selection.selected_ids(), ["b"]);
        selection.deselect("missing");
        assert_eq!(selection.selected_ids(), ["b"]);
    }

    #[test]
    fn clear_empties_selection_and_hover() {
        let mut selection = SelectionState::default();
        selection.select("a", false);
        selection.set_hovered(Some("b".into()));
        selection.clear();
        assert!(selection.selected_ids().is_empty());
        assert!(selection.hovered_id().is_none());
    }

    #[test]
    fn hover_is_independent_of_selection() {
        let mut selection = SelectionState::default();
        selection.select("a", false);
        selection.set_hovered(Some("b".into()));
        assert_eq!(selection.selected_ids(), ["a"]);
        assert_eq!(selection.hovered_id(), Some("b"));
        selection.pointer_left();
        assert!(selection.hovered_id().is_none());
        assert_eq!(selection.selected_ids(), ["a"]);
    }
}
