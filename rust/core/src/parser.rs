// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SVG floor-plan parser
//!
//! Turns one backend-generated drawing into a [`ParsedPlan`]: document
//! sizing, a flat ordered list of classified elements, and the structural
//! grid. The parser is tolerant by construction: the only fatal condition is
//! a missing drawing root. Everything else degrades per element (dropped) or
//! per field (documented default), so a sloppy drawing still yields a plan.

use crate::classify::{classify_kind, classify_layer, NodeHints, ShapeFamily};
use crate::error::{Error, Result};
use crate::geometry::{Bounds, Point2D, Transform2D};
use crate::model::{
    grid_label_x, grid_label_y, grid_labels, ElementKind, ElementStyle, Layer, ParsedPlan,
    PlanElement, SpaceInfo, TextInfo, ViewBox,
};
use crate::path_data::extract_path_points;
use roxmltree::{Document, Node};
use smallvec::{smallvec, SmallVec};

const DEFAULT_STROKE_WIDTH: f64 = 1.0;
const DEFAULT_STROKE: &str = "#000000";
const DEFAULT_FILL: &str = "none";
const DEFAULT_FONT_SIZE: f64 = 12.0;
const DEFAULT_FONT_FAMILY: &str = "sans-serif";
const DEFAULT_TEXT_ANCHOR: &str = "start";

/// Near-axis tolerance when bucketing fallback grid lines.
const GRID_AXIS_TOLERANCE: f64 = 0.1;

/// Parse one drawing document into a plan.
///
/// Fails only when no `<svg>` root element can be found.
pub fn parse(text: &str) -> Result<ParsedPlan> {
    let doc = Document::parse(text).map_err(|_| Error::MalformedDocument)?;
    let svg = find_drawing_root(&doc).ok_or(Error::MalformedDocument)?;

    let (width, height, view_box) = parse_sizing(svg);

    let mut elements: Vec<PlanElement> = Vec::new();
    // Raw grid-line coordinates collected while traversing, used only when
    // the explicit grid attributes are absent or unusable.
    let mut scanned_grid_x: Vec<f64> = Vec::new();
    let mut scanned_grid_y: Vec<f64> = Vec::new();

    for node in svg.descendants().filter(Node::is_element) {
        let shape = match shape_family(node.tag_name().name()) {
            Some(shape) => shape,
            None => continue,
        };

        let hints = gather_hints(node);
        let layer = classify_layer(&hints);
        let kind = classify_kind(&hints, shape);

        if shape == ShapeFamily::Line && (layer == Layer::Grid || kind == ElementKind::GridLine) {
            collect_grid_line(node, &mut scanned_grid_x, &mut scanned_grid_y);
        }

        let transform = composed_transform(node);
        let Some(geometry) = extract_geometry(node, shape, &transform) else {
            continue;
        };

        let index = elements.len();
        elements.push(build_element(node, shape, kind, layer, geometry, index));
    }

    let (grid_x, grid_y) = resolve_grid(svg, scanned_grid_x, scanned_grid_y);
    let grid_labels_x = grid_labels(grid_x.len(), grid_label_x);
    let grid_labels_y = grid_labels(grid_y.len(), grid_label_y);

    Ok(ParsedPlan {
        width,
        height,
        view_box,
        elements,
        grid_x,
        grid_y,
        grid_labels_x,
        grid_labels_y,
    })
}

fn find_drawing_root<'a>(doc: &'a Document<'a>) -> Option<Node<'a, 'a>> {
    let root = doc.root_element();
    if root.tag_name().name() == "svg" {
        return Some(root);
    }
    root.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "svg")
}

fn shape_family(tag: &str) -> Option<ShapeFamily> {
    match tag {
        "line" => Some(ShapeFamily::Line),
        "rect" => Some(ShapeFamily::Rect),
        "polyline" => Some(ShapeFamily::Polyline),
        "polygon" => Some(ShapeFamily::Polygon),
        "circle" => Some(ShapeFamily::Circle),
        "path" => Some(ShapeFamily::Path),
        "text" => Some(ShapeFamily::Text),
        _ => None,
    }
}

/// Parse a single numeric attribute, locale-invariant.
///
/// Trailing unit suffixes ("px") are ignored; anything that does not start
/// with a finite number yields `None`.
fn parse_float(raw: &str) -> Option<f64> {
    let bytes = raw.trim().as_bytes();
    match lexical_core::parse_partial::<f64>(bytes) {
        Ok((value, consumed)) if consumed > 0 && value.is_finite() => Some(value),
        _ => None,
    }
}

fn num_attr(node: Node<'_, '_>, name: &str, default: f64) -> f64 {
    node.attribute(name).and_then(parse_float).unwrap_or(default)
}

fn parse_sizing(svg: Node<'_, '_>) -> (f64, f64, Option<ViewBox>) {
    let mut width = num_attr(svg, "width", 0.0);
    let mut height = num_attr(svg, "height", 0.0);

    let view_box = svg.attribute("viewBox").and_then(parse_view_box);
    if let Some(vb) = view_box {
        width = vb.width;
        height = vb.height;
    }
    (width, height, view_box)
}

/// A well-formed viewBox is exactly four finite numeric tokens.
fn parse_view_box(raw: &str) -> Option<ViewBox> {
    let tokens: Vec<f64> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| parse_float(s))
        .collect::<Option<Vec<f64>>>()?;
    if tokens.len() != 4 {
        return None;
    }
    Some(ViewBox {
        x: tokens[0],
        y: tokens[1],
        width: tokens[2],
        height: tokens[3],
    })
}

/// Classification context: the node's own class/id tokens and metadata win
/// over anything inherited from wrapper groups.
fn gather_hints<'a>(node: Node<'a, 'a>) -> NodeHints<'a> {
    let mut own_tokens = String::new();
    push_tokens(&mut own_tokens, node);

    let mut ancestor_tokens = String::new();
    for ancestor in node.ancestors().skip(1).filter(Node::is_element) {
        push_tokens(&mut ancestor_tokens, ancestor);
    }

    let inherited = |name: &str| {
        node.ancestors()
            .filter(Node::is_element)
            .find_map(|n| n.attribute(name))
    };

    NodeHints {
        data_layer: inherited("data-layer"),
        data_type: inherited("data-type"),
        own_tokens,
        ancestor_tokens,
        stroke: inherited("stroke"),
    }
}

fn push_tokens(buffer: &mut String, node: Node<'_, '_>) {
    for attr in ["class", "id"] {
        if let Some(value) = node.attribute(attr) {
            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(&value.to_ascii_lowercase());
        }
    }
}

/// Compose the transform chain from the drawing root down to `node`.
fn composed_transform(node: Node<'_, '_>) -> Transform2D {
    let chain: Vec<&str> = node
        .ancestors()
        .filter(Node::is_element)
        .filter_map(|n| n.attribute("transform"))
        .collect();

    let mut transform = Transform2D::identity();
    for raw in chain.iter().rev() {
        transform = transform.then(&Transform2D::parse(raw));
    }
    transform
}

/// Geometry survivors of per-shape extraction.
struct ExtractedGeometry {
    points: SmallVec<[Point2D; 4]>,
    radius: Option<f64>,
    bounds: Option<Bounds>,
    /// Untransformed rect extents, kept for space area computation.
    rect_size: Option<(f64, f64)>,
}

fn extract_geometry(
    node: Node<'_, '_>,
    shape: ShapeFamily,
    transform: &Transform2D,
) -> Option<ExtractedGeometry> {
    match shape {
        ShapeFamily::Line => extract_line(node, transform),
        ShapeFamily::Rect => extract_rect(node, transform),
        ShapeFamily::Polyline | ShapeFamily::Polygon => extract_poly(node, transform),
        ShapeFamily::Circle => extract_circle(node, transform),
        ShapeFamily::Path => extract_path(node, transform),
        ShapeFamily::Text => extract_text_position(node, transform),
    }
}

fn extract_line(node: Node<'_, '_>, transform: &Transform2D) -> Option<ExtractedGeometry> {
    let points: SmallVec<[Point2D; 4]> = smallvec![
        transform.apply(Point2D::new(
            num_attr(node, "x1", 0.0),
            num_attr(node, "y1", 0.0)
        )),
        transform.apply(Point2D::new(
            num_attr(node, "x2", 0.0),
            num_attr(node, "y2", 0.0)
        )),
    ];
    let bounds = Bounds::from_points(&points);
    Some(ExtractedGeometry {
        points,
        radius: None,
        bounds,
        rect_size: None,
    })
}

fn extract_rect(node: Node<'_, '_>, transform: &Transform2D) -> Option<ExtractedGeometry> {
    let x = num_attr(node, "x", 0.0);
    let y = num_attr(node, "y", 0.0);
    let w = num_attr(node, "width", 0.0);
    let h = num_attr(node, "height", 0.0);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    let points: SmallVec<[Point2D; 4]> = smallvec![
        transform.apply(Point2D::new(x, y)),
        transform.apply(Point2D::new(x + w, y)),
        transform.apply(Point2D::new(x + w, y + h)),
        transform.apply(Point2D::new(x, y + h)),
    ];
    let bounds = Bounds::from_points(&points);
    Some(ExtractedGeometry {
        points,
        radius: None,
        bounds,
        rect_size: Some((w, h)),
    })
}

fn extract_poly(node: Node<'_, '_>, transform: &Transform2D) -> Option<ExtractedGeometry> {
    let raw = node.attribute("points")?;
    let values: Vec<f64> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(parse_float)
        .collect();

    let points: SmallVec<[Point2D; 4]> = values
        .chunks_exact(2)
        .map(|pair| transform.apply(Point2D::new(pair[0], pair[1])))
        .collect();
    if points.len() < 2 {
        return None;
    }
    let bounds = Bounds::from_points(&points);
    Some(ExtractedGeometry {
        points,
        radius: None,
        bounds,
        rect_size: None,
    })
}

fn extract_circle(node: Node<'_, '_>, transform: &Transform2D) -> Option<ExtractedGeometry> {
    let r = num_attr(node, "r", 0.0);
    if r <= 0.0 {
        return None;
    }
    let center = transform.apply(Point2D::new(
        num_attr(node, "cx", 0.0),
        num_attr(node, "cy", 0.0),
    ));
    let points: SmallVec<[Point2D; 4]> = smallvec![center];
    Some(ExtractedGeometry {
        points,
        radius: Some(r),
        bounds: Some(Bounds::from_circle(center, r)),
        rect_size: None,
    })
}

fn extract_path(node: Node<'_, '_>, transform: &Transform2D) -> Option<ExtractedGeometry> {
    let d = node.attribute("d")?;
    let points: SmallVec<[Point2D; 4]> = extract_path_points(d)
        .into_iter()
        .map(|p| transform.apply(p))
        .collect();
    if points.len() < 2 {
        return None;
    }
    let bounds = Bounds::from_points(&points);
    Some(ExtractedGeometry {
        points,
        radius: None,
        bounds,
        rect_size: None,
    })
}

fn extract_text_position(node: Node<'_, '_>, transform: &Transform2D) -> Option<ExtractedGeometry> {
    if text_content(node).trim().is_empty() {
        return None;
    }
    let anchor_point = transform.apply(Point2D::new(
        num_attr(node, "x", 0.0),
        num_attr(node, "y", 0.0),
    ));
    let points: SmallVec<[Point2D; 4]> = smallvec![anchor_point];
    // Text is positioned, not bounded
    Some(ExtractedGeometry {
        points,
        radius: None,
        bounds: None,
        rect_size: None,
    })
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn build_element(
    node: Node<'_, '_>,
    shape: ShapeFamily,
    kind: ElementKind,
    layer: Layer,
    geometry: ExtractedGeometry,
    index: usize,
) -> PlanElement {
    let id = node
        .attribute("id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-{}", kind, index));

    let style = ElementStyle {
        stroke: node.attribute("stroke").unwrap_or(DEFAULT_STROKE).into(),
        stroke_width: num_attr(node, "stroke-width", DEFAULT_STROKE_WIDTH),
        fill: node.attribute("fill").unwrap_or(DEFAULT_FILL).into(),
    };

    let space = match (kind, geometry.rect_size) {
        (ElementKind::Space | ElementKind::Core, Some((w, h))) => Some(SpaceInfo {
            name: node.attribute("data-name").unwrap_or_default().into(),
            area: w * h,
            space_type: node.attribute("data-space-type").unwrap_or_default().into(),
            requires_daylight: node.attribute("data-daylight") == Some("true"),
        }),
        _ => None,
    };

    let text = (shape == ShapeFamily::Text).then(|| TextInfo {
        text: text_content(node).trim().to_string(),
        font_size: num_attr(node, "font-size", DEFAULT_FONT_SIZE),
        font_family: node
            .attribute("font-family")
            .unwrap_or(DEFAULT_FONT_FAMILY)
            .into(),
        anchor: node
            .attribute("text-anchor")
            .unwrap_or(DEFAULT_TEXT_ANCHOR)
            .into(),
    });

    PlanElement {
        id,
        kind,
        layer,
        points: geometry.points,
        radius: geometry.radius,
        bounds: geometry.bounds,
        style,
        space,
        text,
    }
}

/// Bucket a grid/axis line by orientation using its raw endpoint attributes.
fn collect_grid_line(node: Node<'_, '_>, grid_x: &mut Vec<f64>, grid_y: &mut Vec<f64>) {
    let x1 = num_attr(node, "x1", 0.0);
    let y1 = num_attr(node, "y1", 0.0);
    let x2 = num_attr(node, "x2", 0.0);
    let y2 = num_attr(node, "y2", 0.0);

    if (x1 - x2).abs() < GRID_AXIS_TOLERANCE {
        grid_x.push(x1);
    } else if (y1 - y2).abs() < GRID_AXIS_TOLERANCE {
        grid_y.push(y1);
    }
}

/// Explicit grid attributes win; scanned axis lines are the fallback.
fn resolve_grid(
    svg: Node<'_, '_>,
    scanned_x: Vec<f64>,
    scanned_y: Vec<f64>,
) -> (Vec<f64>, Vec<f64>) {
    let grid_x = svg
        .attribute("data-grid-x")
        .and_then(parse_grid_values)
        .unwrap_or(scanned_x);
    let grid_y = svg
        .attribute("data-grid-y")
        .and_then(parse_grid_values)
        .unwrap_or(scanned_y);
    (normalize_grid(grid_x), normalize_grid(grid_y))
}

/// Accept both the JSON array form (`[0,12,24]`) and the bare
/// comma-separated form the generator emits (`0.00,12.00`).
///
/// All-or-nothing: one unusable token rejects the whole attribute so the
/// axis-line fallback can take over.
fn parse_grid_values(raw: &str) -> Option<Vec<f64>> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let values: Vec<f64> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_float)
        .collect::<Option<Vec<f64>>>()?;
    if values.is_empty() {
        return None;
    }
    Some(values)
}

/// De-duplicate by exact value and sort ascending before label generation.
///
/// Exact-equality dedup is intentional: near-duplicate coordinates from
/// differing source precision do not merge.
fn normalize_grid(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a == b);
    values
}
