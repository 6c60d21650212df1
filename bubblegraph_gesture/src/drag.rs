// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state tracking for directly manipulated nodes.
//!
//! While a node is being dragged it is detached from the scene's physics and
//! attachment systems, so something else has to know where it is and keep it
//! on screen. [`DragState`] is that something: it captures the grab offset at
//! [`DragState::begin`], clamps the node center to the container on every
//! [`DragState::update`], and converts the release velocity into an amplified
//! throw impulse at [`DragState::end`].
//!
//! ## Usage
//!
//! ```
//! use bubblegraph_gesture::drag::DragState;
//! use kurbo::{Point, Rect, Size, Vec2};
//!
//! let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
//! let half = Size::new(50.0, 50.0);
//! let mut state: DragState<u32> = DragState::new();
//!
//! // Grab node 7 slightly right of its center.
//! state.begin(7, Point::new(210.0, 150.0), Point::new(200.0, 150.0));
//!
//! // The grab offset is preserved as the pointer moves.
//! let center = state.update(7, Point::new(260.0, 150.0), half, bounds);
//! assert_eq!(center, Some(Point::new(250.0, 150.0)));
//!
//! // Release: the node's last position comes back with the amplified throw.
//! let (position, velocity) = state.end(7, Vec2::new(30.0, 0.0)).unwrap();
//! assert_eq!(position, Point::new(250.0, 150.0));
//! assert_eq!(velocity, Vec2::new(60.0, 0.0));
//! ```
//!
//! ## Transition rules
//!
//! 1. `begin` is ignored for a node that is already being dragged.
//! 2. `update`/`end`/`cancel` are ignored (return `None`) for nodes with no
//!    active drag, so stale events after a reconciliation are harmless.
//! 3. `update` clamps the node center so the node's box stays inside the
//!    container bounds, using the node's half-extents.
//! 4. `end` removes the drag and returns the last clamped position together
//!    with the release velocity scaled by [`DragState::velocity_gain`].
//! 5. `cancel` removes the drag and returns only the last position; a
//!    cancelled gesture imparts no throw.
//!
//! Multiple nodes can be dragged at once (multitouch); each drag is tracked
//! independently.

use alloc::collections::BTreeMap;

use bubblegraph_placement::clamp_center;
use kurbo::{Point, Rect, Size, Vec2};

/// A single step of a drag gesture, in container coordinates.
///
/// Input capture produces these; the graph core consumes them. `Began` and
/// `Changed` carry the pointer location, `Ended` carries the release
/// velocity, and `Cancelled` carries nothing (the gesture was taken away,
/// e.g. by an incoming call or a palm rejection, so no throw applies).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// The pointer went down on the node.
    Began {
        /// Pointer location at the start of the gesture.
        pointer: Point,
    },
    /// The pointer moved while holding the node.
    Changed {
        /// Current pointer location.
        pointer: Point,
    },
    /// The pointer was released.
    Ended {
        /// Raw pointer velocity at release time, in units per second.
        velocity: Vec2,
    },
    /// The gesture was interrupted by the system.
    Cancelled,
}

/// State for one actively dragged node.
#[derive(Copy, Clone, Debug)]
struct Drag {
    /// Pointer position minus node center, captured at the grab.
    offset: Vec2,
    /// Last clamped node center.
    position: Point,
}

/// Drag gesture state for a set of nodes, keyed by node identity.
///
/// Tracks active drags independently so concurrent gestures do not interfere.
/// The state is single-writer: drive it from the same control thread that
/// owns the graph.
#[derive(Clone, Debug)]
pub struct DragState<K> {
    drags: BTreeMap<K, Drag>,
    /// Factor applied to the raw release velocity to make throws feel lively.
    pub velocity_gain: f64,
}

/// Default amplification applied to the release velocity.
pub const DEFAULT_VELOCITY_GAIN: f64 = 2.0;

impl<K: Copy + Ord> DragState<K> {
    /// Create an empty drag state with the default throw amplification.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drags: BTreeMap::new(),
            velocity_gain: DEFAULT_VELOCITY_GAIN,
        }
    }

    /// Create an empty drag state with a custom throw amplification.
    #[must_use]
    pub fn with_velocity_gain(velocity_gain: f64) -> Self {
        Self {
            drags: BTreeMap::new(),
            velocity_gain,
        }
    }

    /// Record the start of a drag on `target`.
    ///
    /// `pointer` is the pointer location and `center` the node's current
    /// center; their difference is preserved for the rest of the gesture so
    /// the node does not jump under the user's finger. Returns `false` and
    /// leaves the existing drag untouched if `target` is already being
    /// dragged.
    pub fn begin(&mut self, target: K, pointer: Point, center: Point) -> bool {
        if self.drags.contains_key(&target) {
            return false;
        }
        self.drags.insert(
            target,
            Drag {
                offset: pointer - center,
                position: center,
            },
        );
        true
    }

    /// Move an active drag to follow the pointer.
    ///
    /// Applies the grab offset, clamps the resulting center so the node's box
    /// (given by `half_extents`) stays inside `bounds`, records it, and
    /// returns it. Returns `None` if `target` has no active drag.
    pub fn update(
        &mut self,
        target: K,
        pointer: Point,
        half_extents: Size,
        bounds: Rect,
    ) -> Option<Point> {
        let drag = self.drags.get_mut(&target)?;
        let center = clamp_center(pointer - drag.offset, half_extents, bounds);
        drag.position = center;
        Some(center)
    }

    /// Finish an active drag.
    ///
    /// Returns the node's last clamped center and the release velocity scaled
    /// by [`velocity_gain`](Self::velocity_gain), or `None` if `target` has
    /// no active drag.
    pub fn end(&mut self, target: K, velocity: Vec2) -> Option<(Point, Vec2)> {
        let drag = self.drags.remove(&target)?;
        Some((drag.position, self.velocity_gain * velocity))
    }

    /// Abort an active drag without a throw.
    ///
    /// Returns the node's last clamped center, or `None` if `target` has no
    /// active drag.
    pub fn cancel(&mut self, target: K) -> Option<Point> {
        self.drags.remove(&target).map(|drag| drag.position)
    }

    /// Whether any node is currently being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !self.drags.is_empty()
    }

    /// Whether `target` is currently being dragged.
    #[must_use]
    pub fn contains(&self, target: K) -> bool {
        self.drags.contains_key(&target)
    }

    /// The last clamped center of an actively dragged node.
    #[must_use]
    pub fn position(&self, target: K) -> Option<Point> {
        self.drags.get(&target).map(|drag| drag.position)
    }

    /// The nodes with an active drag, in key order.
    pub fn targets(&self) -> impl Iterator<Item = K> + '_ {
        self.drags.keys().copied()
    }

    /// The number of active drags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drags.len()
    }

    /// Whether no drags are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drags.is_empty()
    }

    /// Drop all active drags.
    pub fn clear(&mut self) {
        self.drags.clear();
    }
}

impl<K: Copy + Ord> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}
