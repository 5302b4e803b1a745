// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Lite Core Parser
//!
//! SVG floor-plan interpreter built with [roxmltree](https://docs.rs/roxmltree).
//! Turns a backend-generated plan drawing into a typed, layered CAD element
//! model ready for interactive viewing.
//!
//! ## Overview
//!
//! - **Plan Parsing**: one pass over the drawing produces a [`ParsedPlan`] —
//!   sizing, classified elements in paint order, and the structural grid
//! - **Classification**: layer and element kind resolve from explicit
//!   metadata, then class/id keywords, then the stroke palette
//! - **Tolerant Decoding**: degenerate elements drop and unusable fields
//!   default; only a missing drawing root fails the parse
//! - **Path Approximation**: line-type path commands (`M/L/H/V`) are
//!   captured, curves are not tessellated
//!
//! ## Quick Start
//!
//! ```rust
//! use plan_lite_core::{parse, ElementKind, Layer};
//!
//! let drawing = r#"<svg viewBox="0 0 100 80">
//!   <rect x="10" y="10" width="20" height="15" class="space"/>
//!   <line x1="0" y1="0" x2="100" y2="0" class="wall"/>
//! </svg>"#;
//!
//! let plan = parse(drawing).unwrap();
//! assert_eq!(plan.width, 100.0);
//! assert_eq!(plan.elements.len(), 2);
//! assert_eq!(plan.elements[0].kind, ElementKind::Space);
//! assert_eq!(plan.elements[0].layer, Layer::Architectural);
//! ```

pub mod classify;
pub mod error;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod path_data;

pub use classify::{classify_kind, classify_layer, NodeHints, ShapeFamily};
pub use error::{Error, Result};
pub use geometry::{Bounds, Point2D, Transform2D};
pub use model::{
    grid_label_x, grid_label_y, grid_labels, ElementKind, ElementStyle, Layer, ParsedPlan,
    PlanElement, SpaceInfo, TextInfo, ViewBox,
};
pub use parser::parse;
pub use path_data::extract_path_points;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2, Vector3};
