// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Composed viewer state and its reducer
//!
//! One immutable state value per open viewer. Every transition goes through
//! [`ViewerState::apply`], which returns a complete replacement state, so a
//! listener comparing before/after never observes a partial update.

use crate::layers::LayerSet;
use crate::measurement::Measurement;
use crate::scene3d::{ClippingPlane, ClippingPlanePatch, SceneState};
use crate::selection::SelectionState;
use crate::transform::ViewTransform;
use plan_lite_core::{Layer, Point2D};
use serde::{Deserialize, Serialize};

/// Active canvas tool
///
/// Drawing tools past `Select`/`Pan` are placeholders for the editing
/// surface; they carry no parser-level behavior here.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Wall,
    Door,
    Window,
    Dimension,
    Text,
    Erase,
}

/// Whole viewer state: tool, layers, selection, transform, measurement,
/// and the 3D mirror state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewerState {
    pub tool: Tool,
    pub layers: LayerSet,
    pub selection: SelectionState,
    pub transform: ViewTransform,
    pub measurement: Measurement,
    pub scene: SceneState,
}

/// Every discrete transition the viewer supports
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    SetTool(Tool),

    ToggleLayerVisibility(Layer),
    SetLayerLocked(Layer, bool),
    SetLayerOpacity(Layer, f64),
    ShowAllLayers,
    HideAllLayers,

    Select { id: String, additive: bool },
    Deselect(String),
    ClearSelection,
    SetHovered(Option<String>),
    PointerLeft,

    PanBy { dx: f64, dy: f64 },
    ZoomAt { screen: Point2D, direction: i8 },
    Rotate(f64),
    FitToContent { content: (f64, f64), viewport: (f64, f64) },
    ResetView,

    StartMeasurement,
    AddMeasurementPoint(Point2D),
    ClearMeasurement,

    SetTotalFloors(usize),
    ToggleFloor(usize),
    ShowFloor(usize),
    HideFloor(usize),
    IsolateFloor(usize),
    ShowAllFloors,
    HideAllFloors,
    SetFloorOpacity(usize, f64),
    SetExploded(bool),
    ToggleExploded,
    SetExplodeDistance(f64),
    AddClippingPlane(ClippingPlane),
    RemoveClippingPlane(String),
    UpdateClippingPlane { id: String, patch: ClippingPlanePatch },
    ToggleClippingPlane(String),
    SetActiveClippingPlane(Option<String>),
}

impl ViewerState {
    /// Fresh state for a newly loaded plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition: build the complete successor state for one action.
    #[must_use]
    pub fn apply(&self, action: ViewerAction) -> Self {
        let mut next = self.clone();
        match action {
            ViewerAction::SetTool(tool) => next.tool = tool,

            ViewerAction::ToggleLayerVisibility(layer) => next.layers.toggle_visibility(layer),
            ViewerAction::SetLayerLocked(layer, locked) => next.layers.set_locked(layer, locked),
            ViewerAction::SetLayerOpacity(layer, opacity) => {
                next.layers.set_opacity(layer, opacity)
            }
            ViewerAction::ShowAllLayers => next.layers.show_all(),
            ViewerAction::HideAllLayers => next.layers.hide_all(),

            ViewerAction::Select { id, additive } => next.selection.select(&id, additive),
            ViewerAction::Deselect(id) => next.selection.deselect(&id),
            ViewerAction::ClearSelection => next.selection.clear(),
            ViewerAction::SetHovered(id) => next.selection.set_hovered(id),
            ViewerAction::PointerLeft => next.selection.pointer_left(),

            ViewerAction::PanBy { dx, dy } => next.transform = next.transform.panned_by(dx, dy),
            ViewerAction::ZoomAt { screen, direction } => {
                next.transform = next.transform.zoom_at(screen, direction)
            }
            ViewerAction::Rotate(delta) => next.transform = next.transform.rotated_by(delta),
            ViewerAction::FitToContent { content, viewport } => {
                next.transform = next
                    .transform
                    .fit_to_content(content.0, content.1, viewport.0, viewport.1)
            }
            ViewerAction::ResetView => next.transform = next.transform.reset(),

            ViewerAction::StartMeasurement => next.measurement.start(),
            ViewerAction::AddMeasurementPoint(point) => next.measurement.add_point(point),
            ViewerAction::ClearMeasurement => next.measurement.clear(),

            ViewerAction::SetTotalFloors(count) => next.scene.set_total_floors(count),
            ViewerAction::ToggleFloor(floor) => next.scene.toggle_floor(floor),
            ViewerAction::ShowFloor(floor) => next.scene.show_floor(floor),
            ViewerAction::HideFloor(floor) => next.scene.hide_floor(floor),
            ViewerAction::IsolateFloor(floor) => next.scene.isolate_floor(floor),
            ViewerAction::ShowAllFloors => next.scene.show_all_floors(),
            ViewerAction::HideAllFloors => next.scene.hide_all_floors(),
            ViewerAction::SetFloorOpacity(floor, opacity) => {
                next.scene.set_floor_opacity(floor, opacity)
            }
            ViewerAction::SetExploded(exploded) => next.scene.set_exploded(exploded),
            ViewerAction::ToggleExploded => next.scene.toggle_exploded(),
            ViewerAction::SetExplodeDistance(distance) => {
                next.scene.set_explode_distance(distance)
            }
            ViewerAction::AddClippingPlane(plane) => next.scene.add_clipping_plane(plane),
            ViewerAction::RemoveClippingPlane(id) => next.scene.remove_clipping_plane(&id),
            ViewerAction::UpdateClippingPlane { id, patch } => {
                next.scene.update_clipping_plane(&id, patch)
            }
            ViewerAction::ToggleClippingPlane(id) => next.scene.toggle_clipping_plane(&id),
            ViewerAction::SetActiveClippingPlane(id) => next.scene.set_active_clipping_plane(id),
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_returns_a_replacement_without_touching_the_original() {
        let state = ViewerState::new();
        let next = state.apply(ViewerAction::SetTool(Tool::Pan));
        assert_eq!(state.tool, Tool::Select);
        assert_eq!(next.tool, Tool::Pan);
    }

    #[test]
    fn interleaved_slices_stay_coherent() {
        let mut state = ViewerState::new();
        state = state.apply(ViewerAction::StartMeasurement);
        state = state.apply(ViewerAction::AddMeasurementPoint(Point2D::new(0.0, 0.0)));
        state = state.apply(ViewerAction::ToggleLayerVisibility(Layer::Grid));
        state = state.apply(ViewerAction::Select {
            id: "wall-0".into(),
            additive: false,
        });
        state = state.apply(ViewerAction::Rotate(90.0));
        state = state.apply(ViewerAction::AddMeasurementPoint(Point2D::new(3.0, 4.0)));

        assert!(state.measurement.is_active());
        assert_eq!(state.measurement.segments().len(), 1);
        assert!(!state.layers.is_visible(Layer::Grid));
        assert_eq!(state.selection.selected_ids(), ["wall-0"]);
        assert_eq!(state.transform.rotation, 90.0);
    }

    #[test]
    fn new_plan_gets_a_fresh_state() {
        let old = ViewerState::new()
            .apply(ViewerAction::SetTool(Tool::Pan))
            .apply(ViewerAction::HideAllLayers);
        let fresh = ViewerState::new();
        assert_ne!(old, fresh);
        assert_eq!(fresh.tool, Tool::Select);
        assert!(fresh.layers.is_visible(Layer::Architectural));
    }

    #[test]
    fn tool_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tool::Select).unwrap(), "\"select\"");
        assert_eq!(serde_json::to_string(&Tool::Erase).unwrap(), "\"erase\"");
    }
}
