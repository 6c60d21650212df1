// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A physics-free scene backend.
//!
//! The focused node sits at the container center and related nodes are fanned
//! evenly onto a ring around it, re-fanned whenever the ring membership or the
//! container changes. Impulses are ignored. Useful for hosts that want a
//! still layout, for screenshots, and for reduced-motion modes.

use core::f64::consts::TAU;
use core::fmt::Debug;
use core::hash::Hash;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};

use crate::Scene;

/// Default ring radius for related nodes.
pub const DEFAULT_RING_RADIUS: f64 = 120.0;

/// A purely geometric [`Scene`]: focused node centered, related nodes on a
/// ring.
#[derive(Clone, Debug)]
pub struct StaticScene<K> {
    positions: HashMap<K, Point>,
    ring: Vec<K>,
    focused: Option<K>,
    bounds: Rect,
    ring_radius: f64,
}

impl<K: Copy + Eq + Hash + Debug> StaticScene<K> {
    /// Create a scene over the given container bounds.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self::with_ring_radius(bounds, DEFAULT_RING_RADIUS)
    }

    /// Create a scene with an explicit ring radius.
    #[must_use]
    pub fn with_ring_radius(bounds: Rect, ring_radius: f64) -> Self {
        Self {
            positions: HashMap::new(),
            ring: Vec::new(),
            focused: None,
            bounds,
            ring_radius,
        }
    }

    /// Number of nodes the scene is tracking.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of nodes on the related ring.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.ring.len()
    }

    /// The node currently engaged as focused, if any.
    #[must_use]
    pub fn focused(&self) -> Option<K> {
        self.focused
    }

    fn relayout(&mut self) {
        let center = self.bounds.center();
        if let Some(focused) = self.focused {
            if let Some(position) = self.positions.get_mut(&focused) {
                *position = center;
            }
        }
        let count = self.ring.len();
        for (i, node) in self.ring.iter().enumerate() {
            let angle = TAU * (i as f64) / (count as f64);
            if let Some(position) = self.positions.get_mut(node) {
                *position = center + self.ring_radius * Vec2::from_angle(angle);
            }
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> Scene<K> for StaticScene<K> {
    fn add_behaviors(&mut self, node: K, origin: Point) {
        if self.positions.contains_key(&node) {
            debug_assert!(false, "node {node:?} added twice");
            log::warn!("ignoring a duplicate node in the static scene");
            return;
        }
        self.positions.insert(node, origin);
    }

    fn remove_behaviors(&mut self, node: K) {
        if self.positions.remove(&node).is_none() {
            debug_assert!(false, "removing a node that was never added: {node:?}");
            log::warn!("ignoring removal of an untracked node");
            return;
        }
        let before = self.ring.len();
        self.ring.retain(|entry| *entry != node);
        if self.ring.len() != before {
            debug_assert!(false, "node {node:?} removed while still on the ring");
            log::warn!("dropped a dangling ring entry with its node");
            self.relayout();
        }
    }

    fn add_related_behaviors(&mut self, node: K) {
        if !self.positions.contains_key(&node) || self.ring.contains(&node) {
            debug_assert!(false, "attaching an invalid node: {node:?}");
            log::warn!("ignoring a ring entry for an invalid node");
            return;
        }
        self.ring.push(node);
        self.relayout();
    }

    fn remove_related_behaviors(&mut self, node: K) {
        let before = self.ring.len();
        self.ring.retain(|entry| *entry != node);
        if self.ring.len() == before {
            debug_assert!(false, "no ring entry to remove for {node:?}");
            log::warn!("ignoring ring removal for a node not on the ring");
            return;
        }
        self.relayout();
    }

    fn add_focused_behaviors(&mut self, node: K) {
        debug_assert!(
            self.focused.is_none(),
            "engaging a focused node while another is engaged"
        );
        if !self.positions.contains_key(&node) {
            debug_assert!(false, "focusing a node with no position: {node:?}");
            log::warn!("ignoring focus engagement for an untracked node");
            return;
        }
        self.focused = Some(node);
        self.relayout();
    }

    fn remove_focused_behaviors(&mut self, node: K) {
        if self.focused != Some(node) {
            debug_assert!(false, "disengaging a node that is not focused: {node:?}");
            log::warn!("ignoring focus disengagement for a non-focused node");
            return;
        }
        self.focused = None;
    }

    fn add_velocity(&mut self, _node: K, _velocity: Vec2) {
        // A still layout has nothing to do with an impulse.
    }

    fn layout_changed(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.relayout();
    }

    fn position(&self, node: K) -> Option<Point> {
        self.positions.get(&node).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    #[test]
    fn focused_node_sits_at_the_center() {
        let mut scene: StaticScene<u32> = StaticScene::new(BOUNDS);
        scene.add_behaviors(1, Point::ZERO);
        scene.add_focused_behaviors(1);
        assert_eq!(scene.position(1), Some(BOUNDS.center()));
    }

    #[test]
    fn related_nodes_fan_onto_the_ring() {
        let mut scene: StaticScene<u32> = StaticScene::new(BOUNDS);
        scene.add_behaviors(1, Point::ZERO);
        scene.add_focused_behaviors(1);
        for node in 2..6 {
            scene.add_behaviors(node, Point::ZERO);
            scene.add_related_behaviors(node);
        }

        let center = BOUNDS.center();
        for node in 2..6_u32 {
            let position = scene.position(node).unwrap();
            assert!(
                (position.distance(center) - DEFAULT_RING_RADIUS).abs() < 1e-9,
                "node {node} is off the ring"
            );
        }
        // Four nodes, four distinct quarter-turn positions.
        let first = scene.position(2).unwrap();
        let third = scene.position(4).unwrap();
        assert!(
            (first.distance(third) - 2.0 * DEFAULT_RING_RADIUS).abs() < 1e-9,
            "opposite ring entries should be diametrically placed"
        );
    }

    #[test]
    fn ring_refans_after_a_removal() {
        let mut scene: StaticScene<u32> = StaticScene::new(BOUNDS);
        scene.add_behaviors(1, Point::ZERO);
        scene.add_focused_behaviors(1);
        for node in 2..5 {
            scene.add_behaviors(node, Point::ZERO);
            scene.add_related_behaviors(node);
        }

        scene.remove_related_behaviors(3);
        scene.remove_behaviors(3);
        assert_eq!(scene.ring_count(), 2);

        // Two survivors end up diametrically opposed.
        let a = scene.position(2).unwrap();
        let b = scene.position(4).unwrap();
        assert!(
            (a.distance(b) - 2.0 * DEFAULT_RING_RADIUS).abs() < 1e-9,
            "two ring entries should sit across from each other"
        );
    }

    #[test]
    fn layout_change_recenters_everything() {
        let mut scene: StaticScene<u32> = StaticScene::new(BOUNDS);
        scene.add_behaviors(1, Point::ZERO);
        scene.add_focused_behaviors(1);
        scene.add_behaviors(2, Point::ZERO);
        scene.add_related_behaviors(2);

        let moved = Rect::new(100.0, 100.0, 900.0, 700.0);
        scene.layout_changed(moved);
        assert_eq!(scene.position(1), Some(moved.center()));
        let related = scene.position(2).unwrap();
        assert!(
            (related.distance(moved.center()) - DEFAULT_RING_RADIUS).abs() < 1e-9,
            "ring follows the new center"
        );
    }
}
