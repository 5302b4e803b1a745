// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canvas host: pointer, wheel, and keyboard event wiring
//!
//! Composes the parsed plan with the viewer state. Continuous pointer pan is
//! coalesced to the latest sample and flushed at most once per rendered
//! frame; zoom and rotation apply atomically per input event. Keyboard
//! shortcuts are suppressed while a text input has focus.

use crate::selection::{hit_test, HIT_TOLERANCE};
use crate::state::{Tool, ViewerAction, ViewerState};
use plan_lite_core::{Layer, ParsedPlan, Point2D};

/// Rotation step for the keyboard shortcut.
const ROTATE_STEP_DEGREES: f64 = 90.0;

/// One open plan canvas: document, state, and pending pointer input
#[derive(Debug, Default)]
pub struct CanvasHost {
    state: ViewerState,
    plan: Option<ParsedPlan>,
    viewport_width: f64,
    viewport_height: f64,
    /// Latest unflushed pointer sample while panning; intermediate samples
    /// between two frames are dropped.
    pending_pointer: Option<Point2D>,
    /// Pointer position as of the last flushed pan step.
    drag_anchor: Option<Point2D>,
}

impl CanvasHost {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn plan(&self) -> Option<&ParsedPlan> {
        self.plan.as_ref()
    }

    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Adopt a newly parsed plan. The viewer state resets wholesale; a
    /// failed re-parse never reaches this point, so the previous plan and
    /// state survive parse errors.
    pub fn load_plan(&mut self, plan: ParsedPlan) {
        self.plan = Some(plan);
        self.state = ViewerState::new();
        self.pending_pointer = None;
        self.drag_anchor = None;
    }

    pub fn dispatch(&mut self, action: ViewerAction) {
        self.state = self.state.apply(action);
    }

    /// Pointer press. `additive` reflects the multi-select modifier.
    pub fn pointer_down(&mut self, screen: Point2D, additive: bool) {
        if self.state.measurement.is_active() {
            let document_point = self.state.transform.screen_to_document(screen);
            self.dispatch(ViewerAction::AddMeasurementPoint(document_point));
            return;
        }

        match self.state.tool {
            Tool::Pan => {
                self.drag_anchor = Some(screen);
                self.pending_pointer = None;
            }
            Tool::Select => {
                let document_point = self.state.transform.screen_to_document(screen);
                let hit_id = self.plan.as_ref().and_then(|plan| {
                    hit_test(
                        &plan.elements,
                        &self.state.layers,
                        document_point,
                        HIT_TOLERANCE,
                    )
                    .map(|element| element.id.clone())
                });
                match hit_id {
                    Some(id) => self.dispatch(ViewerAction::Select { id, additive }),
                    None if !additive => self.dispatch(ViewerAction::ClearSelection),
                    None => {}
                }
            }
            // Drawing tools are placeholders with no canvas behavior here.
            _ => {}
        }
    }

    /// Pointer move. While panning, only the newest sample is kept; hover
    /// tracking is immediate.
    pub fn pointer_move(&mut self, screen: Point2D) {
        if self.drag_anchor.is_some() {
            self.pending_pointer = Some(screen);
            return;
        }
        if self.state.tool == Tool::Select {
            let document_point = self.state.transform.screen_to_document(screen);
            let hovered = self.plan.as_ref().and_then(|plan| {
                hit_test(
                    &plan.elements,
                    &self.state.layers,
                    document_point,
                    HIT_TOLERANCE,
                )
                .map(|element| element.id.clone())
            });
            self.dispatch(ViewerAction::SetHovered(hovered));
        }
    }

    /// Frame tick: flush at most one coalesced pan step.
    ///
    /// Returns whether a pan was applied, letting the render loop skip
    /// redundant redraws.
    pub fn on_frame(&mut self) -> bool {
        let (Some(anchor), Some(latest)) = (self.drag_anchor, self.pending_pointer.take()) else {
            return false;
        };
        let dx = latest.x - anchor.x;
        let dy = latest.y - anchor.y;
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.dispatch(ViewerAction::PanBy { dx, dy });
        self.drag_anchor = Some(latest);
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag_anchor = None;
        self.pending_pointer = None;
    }

    pub fn pointer_leave(&mut self) {
        self.drag_anchor = None;
        self.pending_pointer = None;
        self.dispatch(ViewerAction::PointerLeft);
    }

    /// Wheel zoom, anchored at the cursor, applied atomically per event.
    pub fn wheel(&mut self, screen: Point2D, delta_y: f64) {
        let direction = if delta_y < 0.0 { 1 } else { -1 };
        self.dispatch(ViewerAction::ZoomAt { screen, direction });
    }

    /// Keyboard surface. Returns whether the key was handled; everything is
    /// suppressed while a text input has focus.
    pub fn key(&mut self, key: &str, text_input_focused: bool) -> bool {
        if text_input_focused {
            return false;
        }
        match key {
            "v" | "V" | "1" => self.dispatch(ViewerAction::SetTool(Tool::Select)),
            "h" | "H" | "2" => self.dispatch(ViewerAction::SetTool(Tool::Pan)),
            "m" | "M" => {
                if self.state.measurement.is_active() {
                    self.dispatch(ViewerAction::ClearMeasurement);
                } else {
                    self.dispatch(ViewerAction::StartMeasurement);
                }
            }
            "g" | "G" => self.dispatch(ViewerAction::ToggleLayerVisibility(Layer::Grid)),
            "r" | "R" => self.dispatch(ViewerAction::Rotate(ROTATE_STEP_DEGREES)),
            "f" | "F" => {
                let content = self
                    .plan
                    .as_ref()
                    .map(|plan| (plan.width, plan.height))
                    .unwrap_or((0.0, 0.0));
                self.dispatch(ViewerAction::FitToContent {
                    content,
                    viewport: (self.viewport_width, self.viewport_height),
                });
            }
            "+" | "=" => self.zoom_at_center(1),
            "-" => self.zoom_at_center(-1),
            "Escape" => self.dispatch(ViewerAction::ClearMeasurement),
            _ => return false,
        }
        true
    }

    fn zoom_at_center(&mut self, direction: i8) {
        let center = Point2D::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        self.dispatch(ViewerAction::ZoomAt {
            screen: center,
            direction,
        });
    }
}
