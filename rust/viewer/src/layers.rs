// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-layer visibility, lock, and opacity flags
//!
//! A hidden layer's elements are excluded from rendering and hit-testing; a
//! locked layer stays visible and hit-testable but rejects edits. Neither
//! flag ever mutates the parsed element list.

use plan_lite_core::Layer;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Flags for one layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayerState {
    pub visible: bool,
    pub locked: bool,
    pub opacity: f64,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            visible: true,
            locked: false,
            opacity: 1.0,
        }
    }
}

/// Flags for every known layer
///
/// Seeded all visible/unlocked at opacity 1, except the grid layer which
/// starts locked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerSet {
    states: FxHashMap<Layer, LayerState>,
}

impl Default for LayerSet {
    fn default() -> Self {
        let mut states = FxHashMap::default();
        for layer in Layer::ALL {
            states.insert(
                layer,
                LayerState {
                    locked: layer == Layer::Grid,
                    ..LayerState::default()
                },
            );
        }
        Self { states }
    }
}

impl LayerSet {
    pub fn state(&self, layer: Layer) -> LayerState {
        self.states.get(&layer).copied().unwrap_or_default()
    }

    pub fn is_visible(&self, layer: Layer) -> bool {
        self.state(layer).visible
    }

    pub fn is_locked(&self, layer: Layer) -> bool {
        self.state(layer).locked
    }

    pub fn opacity(&self, layer: Layer) -> f64 {
        self.state(layer).opacity
    }

    pub fn toggle_visibility(&mut self, layer: Layer) {
        let entry = self.states.entry(layer).or_default();
        entry.visible = !entry.visible;
    }

    pub fn set_locked(&mut self, layer: Layer, locked: bool) {
        self.states.entry(layer).or_default().locked = locked;
    }

    pub fn set_opacity(&mut self, layer: Layer, opacity: f64) {
        self.states.entry(layer).or_default().opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn show_all(&mut self) {
        for layer in Layer::ALL {
            self.states.entry(layer).or_default().visible = true;
        }
    }

    pub fn hide_all(&mut self) {
        for layer in Layer::ALL {
            self.states.entry(layer).or_default().visible = false;
        }
    }
}
