// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A springy, collision-aware scene backend.
//!
//! Related nodes hang off the focused node on distance-limited links, the
//! focused node is pulled to the container center by a soft snap, free bodies
//! drift under optional gravity, and overlapping bodies are pushed apart.
//! The simulation is advanced explicitly with [`SpringScene::step`]; nothing
//! moves between steps, so hosts control the cadence and tests are
//! deterministic.
//!
//! Integration is semi-implicit Euler with per-body velocity damping. The
//! related-node link is enforced as a maximum separation: nodes may drift
//! closer to the focused node than the link length, but never further.

use core::fmt::Debug;
use core::hash::Hash;

use bubblegraph_placement::clamp_center;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::Scene;

/// Magnitude applied to the host-fed gravity direction.
pub const GRAVITY_MAGNITUDE: f64 = 0.2;

/// Base acceleration one unit of gravity magnitude corresponds to, in
/// units/s².
const GRAVITY_ACCELERATION: f64 = 1000.0;

/// Tuning for a [`SpringScene`].
#[derive(Clone, Copy, Debug)]
pub struct SpringParams {
    /// Collision radius of a node body; also the half-extent used to keep
    /// bodies inside the container.
    pub node_radius: f64,
    /// Maximum separation between a related node and the focused node.
    pub attachment_length: f64,
    /// Acceleration per unit of displacement pulling the focused node toward
    /// the container center, in 1/s².
    pub snap_stiffness: f64,
    /// Extra per-second velocity bleed on the snapped body. Low values let
    /// the snap overshoot and wobble before settling.
    pub snap_damping: f64,
    /// Per-second velocity resistance applied to every body.
    pub body_damping: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            node_radius: 50.0,
            attachment_length: 120.0,
            snap_stiffness: 30.0,
            snap_damping: 0.1,
            body_damping: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Body {
    position: Point,
    velocity: Vec2,
}

#[derive(Clone, Copy, Debug)]
struct Attachment<K> {
    anchor: K,
    length: f64,
}

/// A spring/rod/collision simulation implementing [`Scene`].
///
/// Single-writer: drive it from the control thread that owns the graph. The
/// gravity direction may originate on a sensor thread, but the host must
/// marshal it onto the control thread before calling
/// [`SpringScene::set_gravity_direction`].
#[derive(Clone, Debug)]
pub struct SpringScene<K> {
    bodies: HashMap<K, Body>,
    attachments: HashMap<K, Attachment<K>>,
    focused: Option<K>,
    bounds: Rect,
    gravity_enabled: bool,
    gravity_direction: Vec2,
    params: SpringParams,
}

impl<K: Copy + Eq + Hash + Debug> SpringScene<K> {
    /// Create a scene over the given container bounds with default tuning.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self::with_params(bounds, SpringParams::default())
    }

    /// Create a scene over the given container bounds with explicit tuning.
    #[must_use]
    pub fn with_params(bounds: Rect, params: SpringParams) -> Self {
        Self {
            bodies: HashMap::new(),
            attachments: HashMap::new(),
            focused: None,
            bounds,
            gravity_enabled: false,
            gravity_direction: Vec2::ZERO,
            params,
        }
    }

    /// Enable or disable the gravity effect.
    ///
    /// While enabled, every body accelerates along the direction last passed
    /// to [`SpringScene::set_gravity_direction`].
    pub fn set_gravity_effect(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    /// Update the gravity direction from the host's motion feed.
    ///
    /// `direction` is a unit-scale vector (e.g. the device's gravity vector
    /// projected into the container plane); it is applied with the fixed
    /// [`GRAVITY_MAGNITUDE`]. Callers on a sensor thread must hand this off
    /// to the control thread first.
    pub fn set_gravity_direction(&mut self, direction: Vec2) {
        self.gravity_direction = direction;
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        self.integrate(dt);
        self.enforce_attachments();
        self.separate_collisions();
        self.clamp_to_bounds();
    }

    fn integrate(&mut self, dt: f64) {
        let center = self.bounds.center();
        let gravity = self.gravity_direction * (GRAVITY_MAGNITUDE * GRAVITY_ACCELERATION);
        for (node, body) in self.bodies.iter_mut() {
            let mut accel = Vec2::ZERO;
            if self.gravity_enabled {
                accel += gravity;
            }
            let mut damping = self.params.body_damping;
            if self.focused == Some(*node) {
                accel += self.params.snap_stiffness * (center - body.position);
                damping += self.params.snap_damping;
            }
            body.velocity = (body.velocity + dt * accel) * (1.0 / (1.0 + damping * dt));
            body.position = body.position + dt * body.velocity;
        }
    }

    fn enforce_attachments(&mut self) {
        let links: SmallVec<[(K, K, f64); 8]> = self
            .attachments
            .iter()
            .map(|(node, attachment)| (*node, attachment.anchor, attachment.length))
            .collect();
        for (node, anchor, length) in links {
            let Some(anchor_position) = self.bodies.get(&anchor).map(|b| b.position) else {
                continue;
            };
            let Some(body) = self.bodies.get_mut(&node) else {
                continue;
            };
            let delta = body.position - anchor_position;
            let distance = delta.hypot();
            if distance <= length || distance == 0.0 {
                continue;
            }
            let direction = delta * (1.0 / distance);
            body.position = anchor_position + length * direction;
            // Remove the outward radial velocity so the node does not keep
            // fighting the link on the next step.
            let outward = body.velocity.dot(direction);
            if outward > 0.0 {
                body.velocity -= outward * direction;
            }
        }
    }

    fn separate_collisions(&mut self) {
        let keys: SmallVec<[K; 16]> = self.bodies.keys().copied().collect();
        let min_distance = 2.0 * self.params.node_radius;
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let (a, b) = match (self.bodies.get(&keys[i]), self.bodies.get(&keys[j])) {
                    (Some(a), Some(b)) => (a.position, b.position),
                    _ => continue,
                };
                let delta = b - a;
                let distance = delta.hypot();
                if distance >= min_distance {
                    continue;
                }
                // Coincident bodies separate along the x axis.
                let direction = if distance > 1e-9 {
                    delta * (1.0 / distance)
                } else {
                    Vec2::new(1.0, 0.0)
                };
                let push = 0.5 * (min_distance - distance);
                if let Some(body) = self.bodies.get_mut(&keys[i]) {
                    body.position = body.position - push * direction;
                }
                if let Some(body) = self.bodies.get_mut(&keys[j]) {
                    body.position = body.position + push * direction;
                }
            }
        }
    }

    fn clamp_to_bounds(&mut self) {
        let half = Size::new(self.params.node_radius, self.params.node_radius);
        for body in self.bodies.values_mut() {
            body.position = clamp_center(body.position, half, self.bounds);
        }
    }

    /// Current velocity of a tracked body.
    #[must_use]
    pub fn velocity(&self, node: K) -> Option<Vec2> {
        self.bodies.get(&node).map(|body| body.velocity)
    }

    /// Number of bodies in the scene.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of related-node attachments in the scene.
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// The node currently engaged as focused, if any.
    #[must_use]
    pub fn focused(&self) -> Option<K> {
        self.focused
    }

    /// The tuning this scene runs with.
    #[must_use]
    pub fn params(&self) -> SpringParams {
        self.params
    }
}

impl<K: Copy + Eq + Hash + Debug> Scene<K> for SpringScene<K> {
    fn add_behaviors(&mut self, node: K, origin: Point) {
        if self.bodies.contains_key(&node) {
            debug_assert!(false, "body for {node:?} added twice");
            log::warn!("ignoring a duplicate body for an already tracked node");
            return;
        }
        self.bodies.insert(
            node,
            Body {
                position: origin,
                velocity: Vec2::ZERO,
            },
        );
    }

    fn remove_behaviors(&mut self, node: K) {
        if self.bodies.remove(&node).is_none() {
            debug_assert!(false, "removing a body that was never added: {node:?}");
            log::warn!("ignoring body removal for an untracked node");
            return;
        }
        if self.attachments.remove(&node).is_some() {
            debug_assert!(false, "body {node:?} removed while still attached");
            log::warn!("dropped a dangling attachment with its body");
        }
    }

    fn add_related_behaviors(&mut self, node: K) {
        let Some(anchor) = self.focused else {
            debug_assert!(false, "attaching {node:?} with no focused node engaged");
            log::warn!("ignoring an attachment with no focused node engaged");
            return;
        };
        if anchor == node || !self.bodies.contains_key(&node) {
            debug_assert!(false, "attaching an invalid node: {node:?}");
            log::warn!("ignoring an attachment for an invalid node");
            return;
        }
        if self.attachments.contains_key(&node) {
            debug_assert!(false, "node {node:?} attached twice");
            log::warn!("ignoring a duplicate attachment");
            return;
        }
        self.attachments.insert(
            node,
            Attachment {
                anchor,
                length: self.params.attachment_length,
            },
        );
    }

    fn remove_related_behaviors(&mut self, node: K) {
        if self.attachments.remove(&node).is_none() {
            debug_assert!(false, "no attachment to remove for {node:?}");
            log::warn!("ignoring attachment removal for an unattached node");
        }
    }

    fn add_focused_behaviors(&mut self, node: K) {
        debug_assert!(
            self.focused.is_none(),
            "engaging a focused node while another is engaged"
        );
        if !self.bodies.contains_key(&node) {
            debug_assert!(false, "focusing a node with no body: {node:?}");
            log::warn!("ignoring focus engagement for an untracked node");
            return;
        }
        self.focused = Some(node);
    }

    fn remove_focused_behaviors(&mut self, node: K) {
        if self.focused != Some(node) {
            debug_assert!(false, "disengaging a node that is not focused: {node:?}");
            log::warn!("ignoring focus disengagement for a non-focused node");
            return;
        }
        self.focused = None;
    }

    fn add_velocity(&mut self, node: K, velocity: Vec2) {
        let Some(body) = self.bodies.get_mut(&node) else {
            debug_assert!(false, "adding velocity to an untracked node: {node:?}");
            log::warn!("ignoring a velocity impulse for an untracked node");
            return;
        };
        body.velocity += velocity;
    }

    fn layout_changed(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn position(&self, node: K) -> Option<Point> {
        self.bodies.get(&node).map(|body| body.position)
    }
}
