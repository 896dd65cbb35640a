//! Beam geometry between two anchors.
//!
//! A beam is a cubic Bezier S-curve connecting the centers of two elements,
//! expressed relative to the top-left corner of a container. The dominant
//! axis of the segment decides which axis the control points are bent on:
//!
//! ```text
//!  horizontal-dominant               vertical-dominant
//!
//!  start ───╮                        start
//!           │                          │
//!           ╰─── end                   ╰────╮
//!                                           │
//!                                          end
//! ```
//!
//! Both control points sit at the midpoint of the dominant axis. For a
//! horizontal-dominant segment they keep the start and end Y respectively,
//! which yields `M sx sy C mx sy mx ey ex ey`. Vertical-dominant segments
//! mirror this on the Y axis.
//!
//! # Examples
//!
//! ```
//! use wirebeam_core::{curve::{BeamGeometry, Orientation}, geometry::Bounds};
//!
//! let container = Bounds::from_rect(0.0, 0.0, 800.0, 200.0);
//! let from = Bounds::from_rect(40.0, 80.0, 40.0, 40.0);
//! let to = Bounds::from_rect(700.0, 80.0, 40.0, 40.0);
//!
//! let beam = BeamGeometry::from_rects(container, from, to);
//! assert_eq!(beam.orientation(), Orientation::Horizontal);
//! assert_eq!(beam.path_data(), "M 60 100 C 390 100 390 100 720 100");
//! ```

use std::fmt::{self, Write};

use log::trace;

use crate::geometry::{Bounds, Point};

/// Returns the center of `anchor` relative to the top-left corner of `container`.
///
/// Both bounds are in the same (viewport) coordinate space.
pub fn anchor_center(container: Bounds, anchor: Bounds) -> Point {
    Point::new(
        anchor.min_x() - container.min_x() + anchor.width() / 2.0,
        anchor.min_y() - container.min_y() + anchor.height() / 2.0,
    )
}

/// The dominant axis of a beam segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `|dx| > |dy|`: control points bend along X.
    Horizontal,
    /// `|dx| <= |dy|`: control points bend along Y.
    Vertical,
}

impl Orientation {
    /// Classifies the segment from `start` to `end`.
    ///
    /// Ties go to [`Orientation::Vertical`]. The result does not depend on
    /// which end is the start.
    pub fn classify(start: Point, end: Point) -> Self {
        let delta = end.sub_point(start).abs();
        if delta.x() > delta.y() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The cubic curve of one beam, in container-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamGeometry {
    start: Point,
    control1: Point,
    control2: Point,
    end: Point,
    orientation: Orientation,
}

impl BeamGeometry {
    /// Builds the S-curve from `start` to `end`.
    pub fn between(start: Point, end: Point) -> Self {
        let orientation = Orientation::classify(start, end);
        let mid = start.midpoint(end);
        let (control1, control2) = match orientation {
            Orientation::Horizontal => (start.with_x(mid.x()), end.with_x(mid.x())),
            Orientation::Vertical => (start.with_y(mid.y()), end.with_y(mid.y())),
        };

        Self {
            start,
            control1,
            control2,
            end,
            orientation,
        }
    }

    /// Builds the curve between the centers of `from` and `to`, relative to `container`.
    pub fn from_rects(container: Bounds, from: Bounds, to: Bounds) -> Self {
        let start = anchor_center(container, from);
        let end = anchor_center(container, to);
        let geometry = Self::between(start, end);
        trace!(
            start:? = start,
            end:? = end,
            orientation = geometry.orientation.name();
            "Computed beam geometry"
        );
        geometry
    }

    /// Returns the same curve traversed from end to start.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            control1: self.control2,
            control2: self.control1,
            end: self.start,
            orientation: self.orientation,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns both control points, in path order.
    pub fn control_points(&self) -> (Point, Point) {
        (self.control1, self.control2)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Renders the curve as SVG path data: `M sx sy C c1x c1y c2x c2y ex ey`.
    pub fn path_data(&self) -> String {
        let mut data = String::with_capacity(64);
        let points = [self.control1, self.control2, self.end];

        data.push('M');
        push_point(&mut data, self.start);
        data.push_str(" C");
        for point in points {
            push_point(&mut data, point);
        }
        data
    }
}

fn push_point(data: &mut String, point: Point) {
    // Writing into a String cannot fail.
    let _ = write!(data, " {} {}", coord(point.x()), coord(point.y()));
}

/// Normalizes negative zero so it prints as `0`.
fn coord(value: f32) -> f32 {
    if value == 0.0 { 0.0 } else { value }
}
