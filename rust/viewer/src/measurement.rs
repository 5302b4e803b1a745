// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Distance measurement tool
//!
//! A small state machine: idle until started, then every canvas click
//! appends a document-space point. Consecutive point pairs expose their
//! Euclidean distance and midpoint for on-canvas annotation. There is no
//! upper bound on points and the tool never terminates on its own.

use plan_lite_core::Point2D;
use serde::{Deserialize, Serialize};

/// Measurement tool state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    active: bool,
    points: Vec<Point2D>,
}

/// One annotated span between consecutive measurement points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredSegment {
    pub from: Point2D,
    pub to: Point2D,
    pub distance: f64,
    /// Annotation anchor.
    pub midpoint: Point2D,
}

impl Measurement {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Begin measuring, discarding any prior points.
    pub fn start(&mut self) {
        self.points.clear();
        self.active = true;
    }

    /// Append a clicked point (document space, unclamped). Ignored while
    /// idle.
    pub fn add_point(&mut self, point: Point2D) {
        if self.active {
            self.points.push(point);
        }
    }

    /// Return to idle and discard all points.
    pub fn clear(&mut self) {
        self.active = false;
        self.points.clear();
    }

    /// Pairwise spans in click order.
    pub fn segments(&self) -> Vec<MeasuredSegment> {
        self.points
            .windows(2)
            .map(|pair| MeasuredSegment {
                from: pair[0],
                to: pair[1],
                distance: pair[0].distance_to(&pair[1]),
                midpoint: pair[0].midpoint(&pair[1]),
            })
            .collect()
    }
}
