// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubblegraph Scene: the animation capability a bubble graph drives.
//!
//! The focus reconciler in `bubblegraph_graph` never talks to a physics or
//! animation engine directly. It drives the [`Scene`] trait, and the backend
//! decides what "attached to the focused node" or "snapped to the center"
//! looks like on screen. Three backends ship with this crate:
//!
//! - [`SpringScene`]: a springy, playful simulation with free-floating
//!   bodies, collision separation, distance-limited attachments between
//!   related nodes and the focused node, a soft snap pulling the focused
//!   node to the container center, throw impulses, and an optional host-fed
//!   gravity direction. Advance it with [`SpringScene::step`].
//! - [`StaticScene`]: no physics at all; the focused node sits at the
//!   center and related nodes are fanned onto a ring. Useful for hosts that
//!   want a still layout, for screenshots, and for reduced-motion modes.
//! - [`RecordingScene`]: a test double that records every operation and
//!   tracks body/attachment bookkeeping so tests can assert that add and
//!   remove calls balance.
//!
//! ## Contract
//!
//! The caller (normally the reconciler) upholds these ordering rules, and
//! backends may rely on them:
//!
//! - A node enters with [`Scene::add_behaviors`] before any other call names
//!   it, and no call names it after [`Scene::remove_behaviors`].
//! - [`Scene::add_related_behaviors`] is only called while a focused node is
//!   engaged; the attachment anchors to that node specifically, which is why
//!   the reconciler detaches and reattaches survivors when focus moves.
//! - A node is never simultaneously related and focused.
//! - [`Scene::remove_related_behaviors`] precedes [`Scene::remove_behaviors`]
//!   when a related node leaves.
//!
//! Operations that name an untracked node are a logic error in the caller:
//! backends assert in debug builds and degrade to a logged no-op in release
//! builds rather than crash a live UI.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Rect, Vec2};

pub mod recording;
pub mod spring;
pub mod static_layout;

pub use recording::{RecordingScene, SceneOp};
pub use spring::{SpringParams, SpringScene};
pub use static_layout::StaticScene;

/// The animation capability a bubble graph drives.
///
/// Implementations own node positions: the graph supplies a spawn origin when
/// a node enters and reads positions back through [`Scene::position`].
/// The node key `K` is a small copyable handle chosen by the host.
pub trait Scene<K: Copy> {
    /// Enter a free-floating body for `node` at `origin`.
    ///
    /// Every displayed node gets one of these, the focused node included; the
    /// focused node's snap anchor is layered on top via
    /// [`Scene::add_focused_behaviors`].
    fn add_behaviors(&mut self, node: K, origin: Point);

    /// Remove `node`'s body from the scene entirely.
    ///
    /// Related or focused behaviors, if any, have already been removed by the
    /// caller when this is invoked.
    fn remove_behaviors(&mut self, node: K);

    /// Attach `node` to the currently focused node with a distance-limited
    /// link.
    fn add_related_behaviors(&mut self, node: K);

    /// Detach `node` from the focused node.
    fn remove_related_behaviors(&mut self, node: K);

    /// Engage the focused-node behaviors for `node`: a springy snap toward
    /// the container center.
    fn add_focused_behaviors(&mut self, node: K);

    /// Disengage the focused-node behaviors for `node`.
    fn remove_focused_behaviors(&mut self, node: K);

    /// Impart an instantaneous velocity to `node`, e.g. the amplified throw
    /// of a released drag.
    fn add_velocity(&mut self, node: K, velocity: Vec2);

    /// The container's reference geometry changed; re-anchor the snap point
    /// and any bounds-dependent behavior to the new bounds.
    fn layout_changed(&mut self, bounds: Rect);

    /// Current center of `node`, or `None` if the scene is not tracking it.
    fn position(&self, node: K) -> Option<Point>;
}
