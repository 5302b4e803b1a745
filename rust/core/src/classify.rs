// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heuristic layer/kind classification for raw drawing nodes
//!
//! Resolution is a fixed chain evaluated once per node at parse time:
//! explicit metadata, then keyword tables over class/id tokens, then the
//! stroke palette, then a default. The tables are ordered `(pattern, result)`
//! pairs so precedence stays testable on its own.

use crate::model::{ElementKind, Layer};

/// Raw shape family of a drawing node, before semantic classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeFamily {
    Line,
    Rect,
    Polyline,
    Polygon,
    Circle,
    Path,
    Text,
}

/// Classification inputs gathered from one drawing node
///
/// `own_tokens` and `ancestor_tokens` are lowercased class/id text; the
/// generator attaches layer classes to wrapper groups, so ancestors count,
/// with the node's own tokens taking precedence.
#[derive(Debug, Clone, Default)]
pub struct NodeHints<'a> {
    pub data_layer: Option<&'a str>,
    pub data_type: Option<&'a str>,
    pub own_tokens: String,
    pub ancestor_tokens: String,
    pub stroke: Option<&'a str>,
}

/// Keyword table for layer resolution, first match wins.
const LAYER_KEYWORDS: &[(&str, Layer)] = &[
    ("wall", Layer::Architectural),
    ("outline", Layer::Architectural),
    ("column", Layer::Structural),
    ("beam", Layer::Structural),
    ("struct", Layer::Structural),
    ("hvac", Layer::MepHvac),
    ("duct", Layer::MepHvac),
    ("electrical", Layer::MepElectrical),
    ("panel", Layer::MepElectrical),
    ("plumbing", Layer::MepPlumbing),
    ("pipe", Layer::MepPlumbing),
    ("riser", Layer::MepPlumbing),
    ("grid", Layer::Grid),
    ("axis", Layer::Grid),
    ("axes", Layer::Grid),
    ("dimension", Layer::Dimensions),
    ("dim", Layer::Dimensions),
    ("annotation", Layer::Annotations),
    ("label", Layer::Annotations),
    ("legend", Layer::Annotations),
    ("text", Layer::Annotations),
    ("furniture", Layer::Furniture),
    ("equipment", Layer::Furniture),
    ("mep", Layer::MepHvac),
    ("arch", Layer::Architectural),
];

/// Keyword table for kind resolution, first match wins.
const KIND_KEYWORDS: &[(&str, ElementKind)] = &[
    ("wall", ElementKind::Wall),
    ("door", ElementKind::Door),
    ("window", ElementKind::Window),
    ("column", ElementKind::Column),
    ("beam", ElementKind::Beam),
    ("core", ElementKind::Core),
    ("space", ElementKind::Space),
    ("room", ElementKind::Space),
    ("stair", ElementKind::Stairs),
    ("elevator", ElementKind::Elevator),
    ("duct", ElementKind::Duct),
    ("pipe", ElementKind::Pipe),
    ("grid", ElementKind::GridLine),
    ("axis", ElementKind::GridLine),
    ("axes", ElementKind::GridLine),
    ("dimension", ElementKind::Dimension),
    ("dim", ElementKind::Dimension),
    ("text", ElementKind::Text),
    ("label", ElementKind::Text),
];

/// Stroke palette fallback: CAD convention colors carried by MEP and
/// structural linework when no naming hint survives.
const STROKE_LAYERS: &[(&str, Layer)] = &[
    ("red", Layer::Structural),
    ("#ff0000", Layer::Structural),
    ("#f00", Layer::Structural),
    ("cyan", Layer::MepHvac),
    ("#00ffff", Layer::MepHvac),
    ("#0ff", Layer::MepHvac),
    ("magenta", Layer::MepElectrical),
    ("#ff00ff", Layer::MepElectrical),
    ("#f0f", Layer::MepElectrical),
    ("blue", Layer::MepPlumbing),
    ("#0000ff", Layer::MepPlumbing),
    ("#00f", Layer::MepPlumbing),
];

fn layer_from_wire(name: &str) -> Option<Layer> {
    let name = name.trim().to_ascii_lowercase();
    Layer::ALL.iter().copied().find(|l| l.as_str() == name)
}

fn kind_from_wire(name: &str) -> Option<ElementKind> {
    const ALL: [ElementKind; 15] = [
        ElementKind::Wall,
        ElementKind::Door,
        ElementKind::Window,
        ElementKind::Column,
        ElementKind::Beam,
        ElementKind::Space,
        ElementKind::Core,
        ElementKind::Stairs,
        ElementKind::Elevator,
        ElementKind::Duct,
        ElementKind::Pipe,
        ElementKind::GridLine,
        ElementKind::Dimension,
        ElementKind::Text,
        ElementKind::GenericLine,
    ];
    let name = name.trim().to_ascii_lowercase();
    ALL.iter().copied().find(|k| k.as_str() == name)
}

fn match_keywords<T: Copy>(tokens: &str, table: &[(&str, T)]) -> Option<T> {
    if tokens.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|(keyword, _)| tokens.contains(keyword))
        .map(|(_, value)| *value)
}

/// Resolve the layer for one node. Deterministic and side-effect-free.
pub fn classify_layer(hints: &NodeHints<'_>) -> Layer {
    if let Some(layer) = hints.data_layer.and_then(layer_from_wire) {
        return layer;
    }
    if let Some(layer) = match_keywords(&hints.own_tokens, LAYER_KEYWORDS) {
        return layer;
    }
    if let Some(layer) = match_keywords(&hints.ancestor_tokens, LAYER_KEYWORDS) {
        return layer;
    }
    if let Some(stroke) = hints.stroke {
        let stroke = stroke.trim().to_ascii_lowercase();
        if let Some((_, layer)) = STROKE_LAYERS.iter().find(|(color, _)| *color == stroke) {
            return *layer;
        }
    }
    Layer::Architectural
}

/// Resolve the element kind for one node. Deterministic and side-effect-free.
pub fn classify_kind(hints: &NodeHints<'_>, shape: ShapeFamily) -> ElementKind {
    if let Some(kind) = hints.data_type.and_then(kind_from_wire) {
        return kind;
    }
    if let Some(kind) = match_keywords(&hints.own_tokens, KIND_KEYWORDS) {
        return kind;
    }
    if let Some(kind) = match_keywords(&hints.ancestor_tokens, KIND_KEYWORDS) {
        return kind;
    }
    match shape {
        ShapeFamily::Text => ElementKind::Text,
        ShapeFamily::Rect => ElementKind::Space,
        ShapeFamily::Circle => ElementKind::Column,
        ShapeFamily::Line | ShapeFamily::Polyline | ShapeFamily::Polygon | ShapeFamily::Path => {
            ElementKind::Wall
        }
    }
}
