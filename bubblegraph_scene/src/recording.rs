// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording test double for the [`Scene`] capability.
//!
//! [`RecordingScene`] appends every operation to an op log and keeps the same
//! body/attachment/focus bookkeeping a real backend would, so tests can
//! assert both *what* the reconciler asked for and *that* adds and removes
//! balance.
//!
//! ```
//! use bubblegraph_scene::{RecordingScene, Scene, SceneOp};
//! use kurbo::Point;
//!
//! let mut scene: RecordingScene<u32> = RecordingScene::new();
//! scene.add_behaviors(1, Point::ZERO);
//! scene.add_focused_behaviors(1);
//!
//! assert_eq!(scene.body_count(), 1);
//! assert_eq!(
//!     scene.take_ops(),
//!     vec![
//!         SceneOp::AddBehaviors(1, Point::ZERO),
//!         SceneOp::AddFocusedBehaviors(1),
//!     ],
//! );
//! ```

use core::fmt::Debug;
use core::hash::Hash;

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Vec2};

use crate::Scene;

/// One recorded [`Scene`] operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneOp<K> {
    /// [`Scene::add_behaviors`] with the spawn origin.
    AddBehaviors(K, Point),
    /// [`Scene::remove_behaviors`].
    RemoveBehaviors(K),
    /// [`Scene::add_related_behaviors`].
    AddRelatedBehaviors(K),
    /// [`Scene::remove_related_behaviors`].
    RemoveRelatedBehaviors(K),
    /// [`Scene::add_focused_behaviors`].
    AddFocusedBehaviors(K),
    /// [`Scene::remove_focused_behaviors`].
    RemoveFocusedBehaviors(K),
    /// [`Scene::add_velocity`] with the impulse.
    AddVelocity(K, Vec2),
    /// [`Scene::layout_changed`] with the new bounds.
    LayoutChanged(Rect),
}

/// A [`Scene`] that records operations instead of animating.
#[derive(Clone, Debug)]
pub struct RecordingScene<K> {
    ops: Vec<SceneOp<K>>,
    bodies: HashMap<K, Point>,
    attachments: HashSet<K>,
    focused: Option<K>,
}

impl<K: Copy + Eq + Hash + Debug> RecordingScene<K> {
    /// Create an empty recording scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            bodies: HashMap::new(),
            attachments: HashSet::new(),
            focused: None,
        }
    }

    /// The operations recorded so far, in call order.
    #[must_use]
    pub fn ops(&self) -> &[SceneOp<K>] {
        &self.ops
    }

    /// Drain and return the recorded operations.
    pub fn take_ops(&mut self) -> Vec<SceneOp<K>> {
        core::mem::take(&mut self.ops)
    }

    /// Forget the recorded operations, keeping the bookkeeping.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of bodies currently tracked.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of attachments currently tracked.
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// The node currently engaged as focused, if any.
    #[must_use]
    pub fn focused(&self) -> Option<K> {
        self.focused
    }

    /// Whether `node` currently has a body.
    #[must_use]
    pub fn is_tracking(&self, node: K) -> bool {
        self.bodies.contains_key(&node)
    }

    /// Whether `node` currently has a related attachment.
    #[must_use]
    pub fn is_attached(&self, node: K) -> bool {
        self.attachments.contains(&node)
    }
}

impl<K: Copy + Eq + Hash + Debug> Default for RecordingScene<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug> Scene<K> for RecordingScene<K> {
    fn add_behaviors(&mut self, node: K, origin: Point) {
        self.ops.push(SceneOp::AddBehaviors(node, origin));
        let previous = self.bodies.insert(node, origin);
        debug_assert!(previous.is_none(), "body for {node:?} added twice");
    }

    fn remove_behaviors(&mut self, node: K) {
        self.ops.push(SceneOp::RemoveBehaviors(node));
        let removed = self.bodies.remove(&node);
        debug_assert!(removed.is_some(), "removing an untracked body: {node:?}");
        debug_assert!(
            !self.attachments.contains(&node),
            "body {node:?} removed while still attached"
        );
        self.attachments.remove(&node);
    }

    fn add_related_behaviors(&mut self, node: K) {
        self.ops.push(SceneOp::AddRelatedBehaviors(node));
        debug_assert!(self.focused.is_some(), "attachment with no focused node");
        debug_assert!(self.bodies.contains_key(&node), "attaching {node:?} with no body");
        let inserted = self.attachments.insert(node);
        debug_assert!(inserted, "node {node:?} attached twice");
    }

    fn remove_related_behaviors(&mut self, node: K) {
        self.ops.push(SceneOp::RemoveRelatedBehaviors(node));
        let removed = self.attachments.remove(&node);
        debug_assert!(removed, "no attachment to remove for {node:?}");
    }

    fn add_focused_behaviors(&mut self, node: K) {
        self.ops.push(SceneOp::AddFocusedBehaviors(node));
        debug_assert!(self.focused.is_none(), "focused node engaged twice");
        debug_assert!(self.bodies.contains_key(&node), "focusing {node:?} with no body");
        self.focused = Some(node);
    }

    fn remove_focused_behaviors(&mut self, node: K) {
        self.ops.push(SceneOp::RemoveFocusedBehaviors(node));
        debug_assert!(
            self.focused == Some(node),
            "disengaging a non-focused node: {node:?}"
        );
        self.focused = None;
    }

    fn add_velocity(&mut self, node: K, velocity: Vec2) {
        self.ops.push(SceneOp::AddVelocity(node, velocity));
        debug_assert!(
            self.bodies.contains_key(&node),
            "velocity for an untracked node: {node:?}"
        );
    }

    fn layout_changed(&mut self, bounds: Rect) {
        self.ops.push(SceneOp::LayoutChanged(bounds));
    }

    fn position(&self, node: K) -> Option<Point> {
        self.bodies.get(&node).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn records_operations_in_call_order() {
        let mut scene: RecordingScene<u32> = RecordingScene::new();
        scene.add_behaviors(1, Point::ZERO);
        scene.add_focused_behaviors(1);
        scene.add_behaviors(2, Point::new(120.0, 0.0));
        scene.add_related_behaviors(2);
        scene.add_velocity(2, Vec2::new(5.0, 0.0));

        assert_eq!(
            scene.ops(),
            &[
                SceneOp::AddBehaviors(1, Point::ZERO),
                SceneOp::AddFocusedBehaviors(1),
                SceneOp::AddBehaviors(2, Point::new(120.0, 0.0)),
                SceneOp::AddRelatedBehaviors(2),
                SceneOp::AddVelocity(2, Vec2::new(5.0, 0.0)),
            ],
        );
    }

    #[test]
    fn bookkeeping_balances_adds_and_removes() {
        let mut scene: RecordingScene<u32> = RecordingScene::new();
        scene.add_behaviors(1, Point::ZERO);
        scene.add_focused_behaviors(1);
        scene.add_behaviors(2, Point::ZERO);
        scene.add_related_behaviors(2);
        assert_eq!(scene.body_count(), 2);
        assert_eq!(scene.attachment_count(), 1);
        assert!(scene.is_attached(2));

        scene.remove_related_behaviors(2);
        scene.remove_behaviors(2);
        scene.remove_focused_behaviors(1);
        scene.remove_behaviors(1);
        assert_eq!(scene.body_count(), 0);
        assert_eq!(scene.attachment_count(), 0);
        assert_eq!(scene.focused(), None);
        assert!(!scene.is_tracking(1));
    }

    #[test]
    fn take_ops_drains_the_log() {
        let mut scene: RecordingScene<u32> = RecordingScene::new();
        scene.add_behaviors(1, Point::ZERO);
        let drained = scene.take_ops();
        assert_eq!(drained, vec![SceneOp::AddBehaviors(1, Point::ZERO)]);
        assert!(scene.ops().is_empty());
        assert_eq!(scene.body_count(), 1);
    }
}
