// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volumetric viewer state: floors, exploded view, clipping planes
//!
//! Mirrors the 2D layer model for the 3D side of the viewer. Floors carry
//! visibility and opacity, the exploded view separates floors vertically by
//! a configurable distance, and clipping planes are named half-space cuts.

use nalgebra::Vector3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXPLODE_DISTANCE: f64 = 5.0;
pub const MIN_EXPLODE_DISTANCE: f64 = 1.0;
pub const MAX_EXPLODE_DISTANCE: f64 = 15.0;

/// A named half-space cut: unit-ish normal plus signed offset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClippingPlane {
    pub id: String,
    pub name: String,
    pub normal: Vector3<f64>,
    pub constant: f64,
    pub enabled: bool,
}

/// Partial update for one clipping plane; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClippingPlanePatch {
    pub name: Option<String>,
    pub normal: Option<Vector3<f64>>,
    pub constant: Option<f64>,
    pub enabled: Option<bool>,
}

/// 3D scene state for one open model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneState {
    total_floors: usize,
    /// Subset of `0..total_floors`, kept sorted ascending.
    visible_floors: Vec<usize>,
    floor_opacity: FxHashMap<usize, f64>,
    exploded_view: bool,
    explode_distance: f64,
    clipping_planes: Vec<ClippingPlane>,
    active_clipping_plane: Option<String>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            total_floors: 0,
            visible_floors: Vec::new(),
            floor_opacity: FxHashMap::default(),
            exploded_view: false,
            explode_distance: DEFAULT_EXPLODE_DISTANCE,
            clipping_planes: Vec::new(),
            active_clipping_plane: None,
        }
    }
}

impl SceneState {
    pub fn total_floors(&self) -> usize {
        self.total_floors
    }

    pub fn visible_floors(&self) -> &[usize] {
        &self.visible_floors
    }

    pub fn is_floor_visible(&self, floor: usize) -> bool {
        self.visible_floors.binary_search(&floor).is_ok()
    }

    pub fn floor_opacity(&self, floor: usize) -> f64 {
        self.floor_opacity.get(&floor).copied().unwrap_or(1.0)
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded_view
    }

    pub fn explode_distance(&self) -> f64 {
        self.explode_distance
    }

    pub fn clipping_planes(&self) -> &[ClippingPlane] {
        &self.clipping_planes
    }

    pub fn active_clipping_plane(&self) -> Option<&str> {
        self.active_clipping_plane.as_deref()
    }

    /// Resize the floor stack: every floor becomes visible at opacity 1.
    pub fn set_total_floors(&mut self, count: usize) {
        self.total_floors = count;
        self.visible_floors = (0..count).collect();
        self.floor_opacity = (0..count).map(|f| (f, 1.0)).collect();
    }

    pub fn toggle_floor(&mut self, floor: usize) {
        match self.visible_floors.binary_search(&floor) {
            Ok(position) => {
                self.visible_floors.remove(position);
            }
            Err(position) => {
                self.visible_floors.insert(position, floor);
            }
        }
    }

    pub fn show_floor(&mut self, floor: usize) {
        if let Err(position) = self.visible_floors.binary_search(&floor) {
            self.visible_floors.insert(position, floor);
        }
    }

    pub fn hide_floor(&mut self, floor: usize) {
        if let Ok(position) = self.visible_floors.binary_search(&floor) {
            self.visible_floors.remove(position);
        }
    }

    /// Show exactly one floor.
    pub fn isolate_floor(&mut self, floor: usize) {
        self.visible_floors = vec![floor];
    }

    pub fn show_all_floors(&mut self) {
        self.visible_floors = (0..self.total_floors).collect();
    }

    pub fn hide_all_floors(&mut self) {
        self.visible_floors.clear();
    }

    pub fn set_floor_opacity(&mut self, floor: usize, opacity: f64) {
        self.floor_opacity.insert(floor, opacity.clamp(0.0, 1.0));
    }

    /// Toggling the exploded view leaves the explode distance untouched.
    pub fn set_exploded(&mut self, exploded: bool) {
        self.exploded_view = exploded;
    }

    pub fn toggle_exploded(&mut self) {
        self.exploded_view = !self.exploded_view;
    }

    pub fn set_explode_distance(&mut self, distance: f64) {
        self.explode_distance = distance.clamp(MIN_EXPLODE_DISTANCE, MAX_EXPLODE_DISTANCE);
    }

    /// Append a plane. The new plane does not become active on its own.
    pub fn add_clipping_plane(&mut self, plane: ClippingPlane) {
        self.clipping_planes.push(plane);
    }

    /// Remove a plane; if it was the active one, active clears too.
    pub fn remove_clipping_plane(&mut self, id: &str) {
        self.clipping_planes.retain(|p| p.id != id);
        if self.active_clipping_plane.as_deref() == Some(id) {
            self.active_clipping_plane = None;
        }
    }

    /// Merge a partial update into the identified plane.
    pub fn update_clipping_plane(&mut self, id: &str, patch: ClippingPlanePatch) {
        if let Some(plane) = self.clipping_planes.iter_mut().find(|p| p.id == id) {
            if let Some(name) = patch.name {
                plane.name = name;
            }
            if let Some(normal) = patch.normal {
                plane.normal = normal;
            }
            if let Some(constant) = patch.constant {
                plane.constant = constant;
            }
            if let Some(enabled) = patch.enabled {
                plane.enabled = enabled;
            }
        }
    }

    /// Flip `enabled` only.
    pub fn toggle_clipping_plane(&mut self, id: &str) {
        if let Some(plane) = self.clipping_planes.iter_mut().find(|p| p.id == id) {
            plane.enabled = !plane.enabled;
        }
    }

    pub fn set_active_clipping_plane(&mut self, id: Option<String>) {
        self.active_clipping_plane = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(id: &str) -> ClippingPlane {
        ClippingPlane {
            id: id.into(),
            name: format!("Section {}", id),
            normal: Vector3::new(0.0, 0.0, 1.0),
            constant: 0.0,
            enabled: true,
        }
    }

    #[test]
    fn set_total_floors_resets_visibility_and_opacity() {
        let mut scene = SceneState::default();
        scene.set_total_floors(4);
        scene.hide_floor(2);
        scene.set_floor_opacity(1, 0.3);

        scene.set_total_floors(3);
        assert_eq!(scene.visible_floors(), [0, 1, 2]);
        assert_eq!(scene.floor_opacity(1), 1.0);
    }

    #[test]
    fn toggle_keeps_floors_sorted() {
        let mut scene = SceneState::default();
        scene.set_total_floors(5);
        scene.hide_all_floors();
        scene.toggle_floor(3);
        scene.toggle_floor(0);
        scene.toggle_floor(4);
        assert_eq!(scene.visible_floors(), [0, 3, 4]);
        scene.toggle_floor(3);
        assert_eq!(scene.visible_floors(), [0, 4]);
    }

    #[test]
    fn isolate_shows_exactly_one_floor() {
        let mut scene = SceneState::default();
        scene.set_total_floors(6);
        scene.isolate_floor(2);
        assert_eq!(scene.visible_floors(), [2]);
        scene.show_all_floors();
        assert_eq!(scene.visible_floors().len(), 6);
    }

    #[test]
    fn show_and_hide_are_idempotent() {
        let mut scene = SceneState::default();
        scene.set_total_floors(3);
        scene.show_floor(1);
        scene.show_floor(1);
        assert_eq!(scene.visible_floors(), [0, 1, 2]);
        scene.hide_floor(1);
        scene.hide_floor(1);
        assert_eq!(scene.visible_floors(), [0, 2]);
    }

    #[test]
    fn toggling_exploded_preserves_distance() {
        let mut scene = SceneState::default();
        scene.set_explode_distance(9.0);
        scene.toggle_exploded();
        assert!(scene.is_exploded());
        assert_eq!(scene.explode_distance(), 9.0);
        scene.toggle_exploded();
        assert_eq!(scene.explode_distance(), 9.0);
    }

    #[test]
    fn explode_distance_clamps_to_ui_range() {
        let mut scene = SceneState::default();
        scene.set_explode_distance(40.0);
        assert_eq!(scene.explode_distance(), MAX_EXPLODE_DISTANCE);
        scene.set_explode_distance(0.0);
        assert_eq!(scene.explode_distance(), MIN_EXPLODE_DISTANCE);
    }

    #[test]
    fn adding_a_plane_does_not_activate_it() {
        let mut scene = SceneState::default();
        scene.add_clipping_plane(plane("p1"));
        assert_eq!(scene.clipping_planes().len(), 1);
        assert!(scene.active_clipping_plane().is_none());

        scene.set_active_clipping_plane(Some("p1".into()));
        assert_eq!(scene.active_clipping_plane(), Some("p1"));
    }

    #[test]
    fn removing_the_active_plane_clears_active() {
        let mut scene = SceneState::default();
        scene.add_clipping_plane(plane("p1"));
        scene.add_clipping_plane(plane("p2"));
        scene.set_active_clipping_plane(Some("p1".into()));

        scene.remove_clipping_plane("p1");
        assert!(scene.active_clipping_plane().is_none());
        assert_eq!(scene.clipping_planes().len(), 1);

        scene.set_active_clipping_plane(Some("p2".into()));
        scene.remove_clipping_plane("p1");
        assert_eq!(scene.active_clipping_plane(), Some("p2"));
    }

    #[test]
    fn update_merges_only_present_fields() {
        let mut scene = SceneState::default();
        scene.add_clipping_plane(plane("p1"));
        scene.update_clipping_plane(
            "p1",
            ClippingPlanePatch {
                constant: Some(2.5),
                enabled: Some(false),
                ..Default::default()
            },
        );
        let updated = &scene.clipping_planes()[0];
        assert_eq!(updated.constant, 2.5);
        assert!(!updated.enabled);
        assert_eq!(updated.name, "Section p1");
        assert_eq!(updated.normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn toggle_flips_enabled_only() {
        let mut scene = SceneState::default();
        scene.add_clipping_plane(plane("p1"));
        scene.toggle_clipping_plane("p1");
        assert!(!scene.clipping_planes()[0].enabled);
        assert_eq!(scene.clipping_planes()[0].constant, 0.0);
        scene.toggle_clipping_plane("missing");
        assert_eq!(scene.clipping_planes().len(), 1);
    }
}
