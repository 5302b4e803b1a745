// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry primitives shared by the parser and the viewer

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A 2D point in document space (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Axis-aligned bounding box
///
/// Always derived from point data; `min_x <= max_x` and `min_y <= max_y`
/// hold for every constructed value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Compute the bounding box of a non-empty point set.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[Point2D]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    /// Bounding box of a circle from its center and radius.
    pub fn from_circle(center: Point2D, radius: f64) -> Self {
        Self {
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Grow the box by `amount` on all four sides.
    pub fn expanded(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

/// 2D affine transform in SVG matrix order: `[a, b, c, d, e, f]`
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    m: [f64; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Rotation by `degrees` about the origin.
    pub fn rotation(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            m: [cos, sin, -sin, cos, 0.0, 0.0],
        }
    }

    /// Rotation by `degrees` about `(cx, cy)`.
    pub fn rotation_about(degrees: f64, cx: f64, cy: f64) -> Self {
        Self::translation(cx, cy)
            .then(&Self::rotation(degrees))
            .then(&Self::translation(-cx, -cy))
    }

    /// Compose with `other` applied before `self` (standard SVG nesting order).
    pub fn then(&self, other: &Transform2D) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        )
    }

    pub fn is_identity(&self) -> bool {
        self.m == [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    }

    /// Parse a composed SVG transform string such as
    /// `translate(10, 5) rotate(-90 30 40) scale(2)`.
    ///
    /// Functions compose left-to-right. Unknown function names and functions
    /// with unusable arguments are skipped rather than failing the parse.
    pub fn parse(text: &str) -> Self {
        let mut result = Self::identity();
        let mut rest = text;

        while let Some(open) = rest.find('(') {
            let name = rest[..open].trim().trim_start_matches(',').trim();
            let Some(close) = rest[open..].find(')') else {
                break;
            };
            let args: Vec<f64> = rest[open + 1..open + close]
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .filter_map(|s| lexical_core::parse::<f64>(s.as_bytes()).ok())
                .collect();

            let step = match (name, args.as_slice()) {
                ("translate", [tx]) => Self::translation(*tx, 0.0),
                ("translate", [tx, ty, ..]) => Self::translation(*tx, *ty),
                ("scale", [s]) => Self::scaling(*s, *s),
                ("scale", [sx, sy, ..]) => Self::scaling(*sx, *sy),
                ("rotate", [deg]) => Self::rotation(*deg),
                ("rotate", [deg, cx, cy, ..]) => Self::rotation_about(*deg, *cx, *cy),
                _ => Self::identity(),
            };
            result = result.then(&step);
            rest = &rest[open + close + 1..];
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounds_from_points_orders_extents() {
        let bounds = Bounds::from_points(&[
            Point2D::new(10.0, -2.0),
            Point2D::new(-3.0, 7.0),
            Point2D::new(4.0, 4.0),
        ])
        .unwrap();
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.min_y, -2.0);
        assert_eq!(bounds.max_x, 10.0);
        assert_eq!(bounds.max_y, 7.0);
    }

    #[test]
    fn bounds_from_empty_slice_is_none() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn expanded_bounds_contain_nearby_point() {
        let bounds = Bounds::from_points(&[Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0)])
            .unwrap()
            .expanded(5.0);
        assert!(bounds.contains(Point2D::new(-4.0, 12.0)));
        assert!(!bounds.contains(Point2D::new(-6.0, 0.0)));
    }

    #[test]
    fn parse_composed_transform() {
        let t = Transform2D::parse("translate(10, 5) scale(2)");
        let p = t.apply(Point2D::new(3.0, 4.0));
        assert_relative_eq!(p.x, 16.0);
        assert_relative_eq!(p.y, 13.0);
    }

    #[test]
    fn parse_rotate_about_center() {
        // rotate(-90 30 40) maps the center onto itself
        let t = Transform2D::parse("rotate(-90 30 40)");
        let c = t.apply(Point2D::new(30.0, 40.0));
        assert_relative_eq!(c.x, 30.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 40.0, epsilon = 1e-9);

        let p = t.apply(Point2D::new(31.0, 40.0));
        assert_relative_eq!(p.x, 30.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 39.0, epsilon = 1e-9);
    }

    #[test]
    fn unknown_function_is_skipped() {
        let t = Transform2D::parse("skewX(20) translate(1, 2)");
        let p = t.apply(Point2D::new(0.0, 0.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn malformed_arguments_degrade_to_identity() {
        let t = Transform2D::parse("translate(abc) scale()");
        assert!(t.is_identity());
    }
}
