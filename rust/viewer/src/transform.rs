// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewport transform: pan, zoom, rotation
//!
//! All operations are pure — each returns the next transform value — so the
//! viewer can replace its state wholesale and observers never see a half
//! applied pan/zoom pair.

use plan_lite_core::Point2D;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;
/// Multiplicative step per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;
/// Fraction of the viewport the fitted content occupies.
pub const FIT_MARGIN: f64 = 0.9;

/// Current pan/zoom/rotation of the plan viewport
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViewTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    /// Degrees, normalized to `[0, 360)`.
    pub rotation: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
            rotation: 0.0,
        }
    }
}

impl ViewTransform {
    /// Map a document-space point to screen space:
    /// rotate about the origin, scale, then pan.
    pub fn document_to_screen(&self, p: Point2D) -> Point2D {
        let rotated = rotate_point(p, self.rotation);
        Point2D::new(
            rotated.x * self.zoom + self.pan_x,
            rotated.y * self.zoom + self.pan_y,
        )
    }

    /// Inverse of [`document_to_screen`](Self::document_to_screen); the pair
    /// round-trips to floating-point tolerance for any reachable transform.
    pub fn screen_to_document(&self, p: Point2D) -> Point2D {
        let unpanned = Point2D::new((p.x - self.pan_x) / self.zoom, (p.y - self.pan_y) / self.zoom);
        rotate_point(unpanned, -self.rotation)
    }

    /// Zoom by one step, anchored at `screen_point`: the document-space
    /// location under the cursor stays under the cursor.
    pub fn zoom_at(&self, screen_point: Point2D, direction: i8) -> Self {
        let anchor = self.screen_to_document(screen_point);
        let factor = if direction > 0 {
            ZOOM_STEP
        } else {
            1.0 / ZOOM_STEP
        };
        let zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        let rotated = rotate_point(anchor, self.rotation);
        Self {
            pan_x: screen_point.x - rotated.x * zoom,
            pan_y: screen_point.y - rotated.y * zoom,
            zoom,
            rotation: self.rotation,
        }
    }

    /// Pan by a screen-space delta.
    pub fn panned_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
            ..*self
        }
    }

    /// Rotate by `delta_degrees`, normalizing into `[0, 360)`.
    pub fn rotated_by(&self, delta_degrees: f64) -> Self {
        Self {
            rotation: (self.rotation + delta_degrees).rem_euclid(360.0),
            ..*self
        }
    }

    /// Fit content extents into the viewport with a margin, centering the
    /// content. Nonpositive extents leave the transform unchanged.
    pub fn fit_to_content(
        &self,
        content_width: f64,
        content_height: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Self {
        if content_width <= 0.0 || content_height <= 0.0 {
            return *self;
        }
        let zoom = (FIT_MARGIN
            * (viewport_width / content_width).min(viewport_height / content_height))
        .clamp(MIN_ZOOM, MAX_ZOOM);

        let content_center = Point2D::new(content_width / 2.0, content_height / 2.0);
        let rotated = rotate_point(content_center, self.rotation);
        Self {
            pan_x: viewport_width / 2.0 - rotated.x * zoom,
            pan_y: viewport_height / 2.0 - rotated.y * zoom,
            zoom,
            rotation: self.rotation,
        }
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }
}

fn rotate_point(p: Point2D, degrees: f64) -> Point2D {
    if degrees == 0.0 {
        return p;
    }
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    Point2D::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip_identity_transform() {
        let t = ViewTransform::default();
        let p = Point2D::new(12.5, -3.75);
        let back = t.screen_to_document(t.document_to_screen(p));
        assert_relative_eq!(back.x, p.x);
        assert_relative_eq!(back.y, p.y);
    }

    #[test]
    fn round_trip_after_arbitrary_op_sequence() {
        let mut t = ViewTransform::default();
        t = t.panned_by(120.0, -48.5);
        t = t.zoom_at(Point2D::new(400.0, 300.0), 1);
        t = t.rotated_by(37.0);
        t = t.zoom_at(Point2D::new(10.0, 650.0), -1);
        t = t.panned_by(-6.0, 9.0);
        t = t.rotated_by(-123.4);

        let p = Point2D::new(87.2, 44.9);
        let back = t.screen_to_document(t.document_to_screen(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
    }

    #[test]
    fn zoom_in_then_out_restores_zoom_and_anchor() {
        let start = ViewTransform::default().panned_by(35.0, -10.0);
        let cursor = Point2D::new(200.0, 150.0);
        let doc_before = start.screen_to_document(cursor);

        let zoomed = start.zoom_at(cursor, 1);
        // The anchored document point stays under the cursor mid-gesture.
        let mid = zoomed.screen_to_document(cursor);
        assert_relative_eq!(mid.x, doc_before.x, epsilon = 1e-9);
        assert_relative_eq!(mid.y, doc_before.y, epsilon = 1e-9);

        let restored = zoomed.zoom_at(cursor, -1);
        assert_relative_eq!(restored.zoom, start.zoom, epsilon = 1e-9);
        let doc_after = restored.screen_to_document(cursor);
        assert_relative_eq!(doc_after.x, doc_before.x, epsilon = 1e-9);
        assert_relative_eq!(doc_after.y, doc_before.y, epsilon = 1e-9);
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut t = ViewTransform::default();
        for _ in 0..200 {
            t = t.zoom_at(Point2D::new(0.0, 0.0), 1);
        }
        assert_relative_eq!(t.zoom, MAX_ZOOM);
        for _ in 0..400 {
            t = t.zoom_at(Point2D::new(0.0, 0.0), -1);
        }
        assert_relative_eq!(t.zoom, MIN_ZOOM);
    }

    #[test]
    fn four_quarter_turns_return_to_start() {
        let mut t = ViewTransform::default().rotated_by(15.0);
        let original = t.rotation;
        for _ in 0..4 {
            t = t.rotated_by(90.0);
        }
        assert_relative_eq!(t.rotation, original);
    }

    #[test]
    fn negative_rotation_normalizes() {
        let t = ViewTransform::default().rotated_by(-90.0);
        assert_relative_eq!(t.rotation, 270.0);
    }

    #[test]
    fn fit_centers_content_with_margin() {
        let t = ViewTransform::default().fit_to_content(100.0, 80.0, 800.0, 600.0);
        // Limiting axis is height: 0.9 * 600/80
        assert_relative_eq!(t.zoom, 6.75);
        let center = t.document_to_screen(Point2D::new(50.0, 40.0));
        assert_relative_eq!(center.x, 400.0);
        assert_relative_eq!(center.y, 300.0);
    }

    #[test]
    fn fit_with_degenerate_content_is_a_no_op() {
        let t = ViewTransform::default().panned_by(5.0, 5.0);
        assert_eq!(t.fit_to_content(0.0, 80.0, 800.0, 600.0), t);
    }

    #[test]
    fn reset_restores_defaults() {
        let t = ViewTransform::default()
            .panned_by(9.0, 9.0)
            .zoom_at(Point2D::new(1.0, 1.0), 1)
            .rotated_by(45.0)
            .reset();
        assert_eq!(t, ViewTransform::default());
    }
}
