// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed element model produced by the plan parser

use crate::geometry::{Bounds, Point2D};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Drawing layer a parsed element belongs to
///
/// Layers group elements for visibility and lock control; they are resolved
/// exactly once at parse time and never change afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    Architectural,
    Structural,
    MepHvac,
    MepElectrical,
    MepPlumbing,
    Annotations,
    Grid,
    Dimensions,
    Furniture,
}

impl Layer {
    /// Every known layer, in panel display order.
    pub const ALL: [Layer; 9] = [
        Layer::Architectural,
        Layer::Structural,
        Layer::MepHvac,
        Layer::MepElectrical,
        Layer::MepPlumbing,
        Layer::Annotations,
        Layer::Grid,
        Layer::Dimensions,
        Layer::Furniture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Architectural => "architectural",
            Layer::Structural => "structural",
            Layer::MepHvac => "mep-hvac",
            Layer::MepElectrical => "mep-electrical",
            Layer::MepPlumbing => "mep-plumbing",
            Layer::Annotations => "annotations",
            Layer::Grid => "grid",
            Layer::Dimensions => "dimensions",
            Layer::Furniture => "furniture",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic role of a drawn primitive, distinct from its raw shape family
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Wall,
    Door,
    Window,
    Column,
    Beam,
    Space,
    Core,
    Stairs,
    Elevator,
    Duct,
    Pipe,
    GridLine,
    Dimension,
    Text,
    GenericLine,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Wall => "wall",
            ElementKind::Door => "door",
            ElementKind::Window => "window",
            ElementKind::Column => "column",
            ElementKind::Beam => "beam",
            ElementKind::Space => "space",
            ElementKind::Core => "core",
            ElementKind::Stairs => "stairs",
            ElementKind::Elevator => "elevator",
            ElementKind::Duct => "duct",
            ElementKind::Pipe => "pipe",
            ElementKind::GridLine => "grid-line",
            ElementKind::Dimension => "dimension",
            ElementKind::Text => "text",
            ElementKind::GenericLine => "generic-line",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stroke/fill styling carried by a parsed element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke: "#000000".into(),
            stroke_width: 1.0,
            fill: "none".into(),
        }
    }
}

/// Space/core metadata attached to rectangular room elements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpaceInfo {
    pub name: String,
    /// Area in document units squared (width x height for rectangular spaces)
    pub area: f64,
    pub space_type: String,
    pub requires_daylight: bool,
}

/// Literal text content for annotation elements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextInfo {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub anchor: String,
}

/// One parsed drawing primitive with resolved layer and kind
///
/// `points` is never empty: a single point is a radial primitive carrying
/// `radius`, two points a straight segment, three or more an outline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanElement {
    pub id: String,
    pub kind: ElementKind,
    pub layer: Layer,
    pub points: SmallVec<[Point2D; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Absent only for bare text, which is positioned rather than bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    pub style: ElementStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextInfo>,
}

/// Document viewbox: origin plus extents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Result of one successful parse
///
/// Replaced wholesale on re-parse, never mutated in place. Element order is
/// document paint order: later elements occlude earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedPlan {
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_box: Option<ViewBox>,
    pub elements: Vec<PlanElement>,
    pub grid_x: Vec<f64>,
    pub grid_y: Vec<f64>,
    pub grid_labels_x: Vec<String>,
    pub grid_labels_y: Vec<String>,
}

/// Alphabetic label for X-grid position `index`: A, B, ..., Z, AA, AB, ...
pub fn grid_label_x(index: usize) -> String {
    let mut label = String::new();
    let mut n = index;
    loop {
        label.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label
}

/// Numeric label for Y-grid position `index`: 1, 2, 3, ...
pub fn grid_label_y(index: usize) -> String {
    (index + 1).to_string()
}

/// Positional labels for a grid coordinate run.
///
/// Purely a function of array length and position; must be recomputed
/// whenever the grid array is regenerated.
pub fn grid_labels(count: usize, label: fn(usize) -> String) -> Vec<String> {
    (0..count).map(label).collect()
}
