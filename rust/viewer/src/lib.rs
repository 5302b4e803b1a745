// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Lite Viewer State
//!
//! Interactive state for viewing a parsed floor plan: the viewport
//! transform, selection and hit-testing, the measurement tool, per-layer
//! visibility flags, and the mirrored 3D scene state (floors, exploded
//! view, clipping planes).
//!
//! All state lives in one [`ViewerState`] value replaced wholesale through
//! [`ViewerState::apply`]; the [`CanvasHost`] wires pointer, wheel, and
//! keyboard events into those transitions, coalescing continuous pan input
//! to one step per rendered frame.
//!
//! ```rust
//! use plan_lite_viewer::{CanvasHost, Tool, ViewerAction};
//! use plan_lite_core::{parse, Point2D};
//!
//! let mut host = CanvasHost::new(800.0, 600.0);
//! host.load_plan(parse("<svg viewBox='0 0 100 80'/>").unwrap());
//! host.key("f", false); // fit the plan into the viewport
//! host.wheel(Point2D::new(400.0, 300.0), -120.0);
//! assert!(host.state().transform.zoom > 1.0);
//! ```

pub mod host;
pub mod layers;
pub mod measurement;
pub mod scene3d;
pub mod selection;
pub mod state;
pub mod transform;

pub use host::CanvasHost;
pub use layers::{LayerSet, LayerState};
pub use measurement::{MeasuredSegment, Measurement};
pub use scene3d::{
    ClippingPlane, ClippingPlanePatch, SceneState, DEFAULT_EXPLODE_DISTANCE,
    MAX_EXPLODE_DISTANCE, MIN_EXPLODE_DISTANCE,
};
pub use selection::{hit_test, SelectionState, HIT_TOLERANCE};
pub use state::{Tool, ViewerAction, ViewerState};
pub use transform::{ViewTransform, FIT_MARGIN, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
