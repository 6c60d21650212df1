// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubblegraph Placement: spawn-point generation for bubble graphs.
//!
//! When a node enters the graph it needs somewhere to appear that is not on
//! top of the nodes already displayed. A full layout pass would be overkill:
//! the scene backend will pull the node into position anyway. This crate
//! provides the two small geometric pieces the widget core needs instead:
//!
//! - [`PositionClock`]: a modular counter that deals out evenly spaced points
//!   on a circle of fixed radius around a caller-supplied center. Each call to
//!   [`PositionClock::advance`] returns the next point along the circle and
//!   moves the cursor, so consecutive entries fan out rather than stack. The
//!   sequence repeats with period `divisions`; if more nodes enter than there
//!   are divisions, positions repeat and the scene separates them.
//! - [`clamp_center`]: bounds a node's center inside a container rectangle
//!   given the node's half-extents, used to keep a dragged node on screen.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use bubblegraph_placement::PositionClock;
//!
//! let mut clock = PositionClock::new(4, 1.0);
//! let center = Point::ZERO;
//!
//! let first = clock.advance(center);
//! for _ in 0..3 {
//!     clock.advance(center);
//! }
//! // Four divisions: the fifth point repeats the first.
//! assert_eq!(clock.advance(center), first);
//! ```
//!
//! Both pieces are deterministic and single-writer; the clock restarts only
//! by constructing a new one.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point
//!   math.
//!
//! This crate is `no_std`.

#![no_std]

use core::f64::consts::TAU;

use kurbo::{Point, Rect, Size, Vec2};

/// A modular counter that deals out evenly spaced points on a circle.
///
/// Holds `divisions` and an internal cursor in `[0, divisions)`. Each call to
/// [`advance`](Self::advance) returns the point at angle
/// `2π·cursor/divisions` (scaled by the radius, offset by the given center)
/// and then steps the cursor, wrapping after a full revolution.
#[derive(Clone, Debug)]
pub struct PositionClock {
    index: u32,
    divisions: u32,
    radius: f64,
}

impl PositionClock {
    /// Create a clock that deals out `divisions` points on a circle of
    /// `radius`.
    ///
    /// # Panics
    ///
    /// Panics if `divisions` is zero.
    #[must_use]
    pub fn new(divisions: u32, radius: f64) -> Self {
        assert!(divisions > 0, "a position clock needs at least one division");
        Self {
            index: 0,
            divisions,
            radius,
        }
    }

    /// Place a new point on the circle defined by the configured radius and
    /// the given center, then step the internal cursor so the next call
    /// yields the next point along the circle.
    pub fn advance(&mut self, center: Point) -> Point {
        let arc = TAU / f64::from(self.divisions);
        let position = center + self.radius * Vec2::from_angle(arc * f64::from(self.index));
        self.index = (self.index + 1) % self.divisions;
        position
    }

    /// The number of points dealt out per revolution.
    #[must_use]
    pub const fn divisions(&self) -> u32 {
        self.divisions
    }

    /// The radius of the circle the points lie on.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }
}

/// Clamp a node center so the node's box stays inside `bounds`.
///
/// `half_extents` is half the node's width and height. On an axis where the
/// container is too small to hold the node at all, the center falls back to
/// the middle of the container on that axis.
#[must_use]
pub fn clamp_center(center: Point, half_extents: Size, bounds: Rect) -> Point {
    Point::new(
        clamp_axis(center.x, bounds.x0, bounds.x1, half_extents.width),
        clamp_axis(center.y, bounds.y0, bounds.y1, half_extents.height),
    )
}

fn clamp_axis(value: f64, min: f64, max: f64, half: f64) -> f64 {
    if max - min <= 2.0 * half {
        return min + (max - min) / 2.0;
    }
    value.clamp(min + half, max - half)
}
