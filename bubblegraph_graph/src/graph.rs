// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus reconciler.
//!
//! [`BubbleGraph`] owns the registry, the position clock, and the drag state,
//! and drives an injected [`Scene`] backend. The two entry points are
//! [`BubbleGraph::reload_data`] (cold start: tear everything down and rebuild
//! from the data source) and [`BubbleGraph::focus`] (transition: diff the old
//! and new related sets and apply the difference).
//!
//! ## The transition
//!
//! Given a new focal index, the reconciler computes three sets:
//!
//! - `to_add`: newly related nodes that must be created and attached. The old
//!   focus is excluded; it is reclassified through the demote path, never
//!   freshly added.
//! - `to_remove`: displayed nodes that are no longer relevant. The new focus
//!   is excluded; it is promoted in place, never removed and recreated.
//! - `to_keep`: nodes related before and after. They still change hands:
//!   attachments anchor to a specific focused body, so survivors are
//!   detached from the old focus and reattached to the new one.
//!
//! Removal runs first, then the focus handover (promote-or-create the new
//! focus, demote-or-remove the old one), then reattachment and creation.
//! Interaction is disabled for the duration so a tap or drag cannot observe
//! the torn intermediate state; it is restored on every exit path.

use core::fmt::Debug;
use core::hash::Hash;

use alloc::collections::BTreeSet;

use bubblegraph_gesture::drag::{DragEvent, DragState};
use bubblegraph_placement::PositionClock;
use bubblegraph_scene::Scene;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::registry::{Handlers, Registry};
use crate::source::DataSource;

/// Tuning for a [`BubbleGraph`].
#[derive(Clone, Copy, Debug)]
pub struct GraphConfig {
    /// Half-extent of a node, used to clamp dragged nodes to the container.
    pub node_radius: f64,
    /// Positions dealt out per revolution of the spawn clock.
    pub clock_divisions: u32,
    /// Radius of the circle newly entering nodes spawn on.
    pub clock_radius: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_radius: 50.0,
            clock_divisions: 7,
            clock_radius: 120.0,
        }
    }
}

/// An interactive bubble graph: one focused node, its related set, and the
/// machinery to move focus between them.
///
/// Generic over the node key `K`, the host's node payload `N`, the
/// [`DataSource`] `D`, and the [`Scene`] backend `S`. All state is owned by
/// the instance; see the crate docs for the threading model.
pub struct BubbleGraph<K, N, D, S> {
    source: Option<D>,
    scene: S,
    registry: Registry<K, N>,
    clock: PositionClock,
    drag: DragState<K>,
    bounds: Rect,
    config: GraphConfig,
    allows_dragging: bool,
    interaction_enabled: bool,
}

impl<K: Copy + Ord + Eq + Hash + Debug, N, D, S> Debug for BubbleGraph<K, N, D, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BubbleGraph")
            .field("focused", &self.registry.focused())
            .field("related", &self.registry.related())
            .field("bounds", &self.bounds)
            .field("allows_dragging", &self.allows_dragging)
            .field("interaction_enabled", &self.interaction_enabled)
            .finish_non_exhaustive()
    }
}

impl<K, N, D, S> BubbleGraph<K, N, D, S>
where
    K: Copy + Ord + Eq + Hash + Debug,
    D: DataSource<K, N>,
    S: Scene<K>,
{
    /// Create a graph over `bounds` with no data source configured.
    ///
    /// [`reload_data`](Self::reload_data) and [`focus`](Self::focus) are
    /// no-ops until [`set_data_source`](Self::set_data_source) is called.
    #[must_use]
    pub fn new(scene: S, bounds: Rect) -> Self {
        Self::with_config(scene, bounds, GraphConfig::default())
    }

    /// Create a graph with a data source already configured.
    #[must_use]
    pub fn with_source(scene: S, source: D, bounds: Rect) -> Self {
        let mut graph = Self::new(scene, bounds);
        graph.source = Some(source);
        graph
    }

    /// Create a graph with explicit tuning.
    #[must_use]
    pub fn with_config(scene: S, bounds: Rect, config: GraphConfig) -> Self {
        Self {
            source: None,
            scene,
            registry: Registry::new(),
            clock: PositionClock::new(config.clock_divisions, config.clock_radius),
            drag: DragState::new(),
            bounds,
            config,
            allows_dragging: true,
            interaction_enabled: true,
        }
    }

    /// Replace the data source. Call [`reload_data`](Self::reload_data)
    /// afterwards to rebuild the display from the new source.
    pub fn set_data_source(&mut self, source: Option<D>) {
        self.source = source;
    }

    /// The configured data source.
    #[must_use]
    pub fn data_source(&self) -> Option<&D> {
        self.source.as_ref()
    }

    /// Mutable access to the configured data source.
    pub fn data_source_mut(&mut self) -> Option<&mut D> {
        self.source.as_mut()
    }

    /// Tear down every displayed node and rebuild from the data source.
    ///
    /// Detaches scene behaviors and handlers before removal, then re-queries
    /// the source for a fresh focal index and its related set. A no-op when
    /// no data source is configured.
    pub fn reload_data(&mut self) {
        let Some(mut source) = self.source.take() else {
            return;
        };
        self.reload_from(&mut source);
        self.source = Some(source);
    }

    fn reload_from(&mut self, source: &mut D) {
        self.cancel_active_drags();

        if let Some(old) = self.registry.clear_focused() {
            self.scene.remove_focused_behaviors(old);
            self.remove_node(old);
        }
        for index in self.registry.take_related() {
            self.scene.remove_related_behaviors(index);
            self.remove_node(index);
        }

        let center = self.bounds.center();
        let focal = source.focused_node();
        let node = source.configure_node(focal);
        self.add_node(focal, node, center, Handlers::TAP);
        self.registry.set_focused(focal);
        self.scene.add_focused_behaviors(focal);

        let related = self.query_related(source, focal);
        for &index in &related {
            let node = source.configure_node(index);
            let origin = self.clock.advance(center);
            self.add_node(index, node, origin, Handlers::TAP | Handlers::DRAG);
            self.scene.add_related_behaviors(index);
        }
        self.registry.set_related(related);

        debug_assert!(
            self.registry.is_consistent(),
            "registry inconsistent after a reload"
        );
    }

    /// Move focus to `index`.
    ///
    /// A no-op when `index` is already focused or when no data source is
    /// configured. `index` need not be in the current related set; the graph
    /// animates out nodes that stopped being relevant, keeps shared
    /// relations, and re-anchors them to the new focus. User interaction is
    /// disabled while the transition runs and restored on every exit path.
    pub fn focus(&mut self, index: K) {
        let Some(mut source) = self.source.take() else {
            log::warn!("ignoring a focus request with no data source configured");
            return;
        };
        let restore = self.interaction_enabled;
        self.interaction_enabled = false;
        self.transition_focus(&mut source, index);
        self.interaction_enabled = restore;
        self.source = Some(source);
    }

    fn transition_focus(&mut self, source: &mut D, new_focus: K) {
        // The right node is already focused; nothing to reconcile.
        if self.registry.focused() == Some(new_focus) {
            return;
        }
        // Straighten out in-flight drags before tearing the scene apart.
        self.cancel_active_drags();

        let new_related = self.query_related(source, new_focus);
        let old_focus = self.registry.focused();
        let current_related = self.registry.related().clone();

        // Newly related nodes to create and attach. The old focus is already
        // displayed; it is reclassified below, never freshly added.
        let to_add: SmallVec<[K; 8]> = new_related
            .difference(&current_related)
            .copied()
            .filter(|index| Some(*index) != old_focus)
            .collect();
        // Displayed nodes that stopped being relevant. The new focus is
        // promoted below, never removed and recreated.
        let to_remove: SmallVec<[K; 8]> = current_related
            .difference(&new_related)
            .copied()
            .filter(|index| *index != new_focus)
            .collect();
        // Survivors stay displayed but their attachments anchor to a specific
        // focused body, so they must change hands.
        let to_keep: SmallVec<[K; 8]> = new_related
            .intersection(&current_related)
            .copied()
            .collect();

        for &index in &to_remove {
            self.scene.remove_related_behaviors(index);
            self.remove_node(index);
        }
        for &index in &to_keep {
            self.scene.remove_related_behaviors(index);
        }

        if let Some(old) = old_focus {
            self.scene.remove_focused_behaviors(old);
            self.registry.clear_focused();
        }

        if current_related.contains(&new_focus) {
            // Promote the existing node in place; no data-source re-query.
            self.scene.remove_related_behaviors(new_focus);
            self.registry.set_focused(new_focus);
            self.registry.set_handlers(new_focus, Handlers::TAP);
            self.scene.add_focused_behaviors(new_focus);
        } else {
            let node = source.configure_node(new_focus);
            let center = self.bounds.center();
            self.add_node(new_focus, node, center, Handlers::TAP);
            self.registry.set_focused(new_focus);
            self.scene.add_focused_behaviors(new_focus);
        }
        debug_assert!(
            self.registry.focused() == Some(new_focus),
            "focus handover failed"
        );

        if let Some(old) = old_focus {
            if new_related.contains(&old) {
                // Demote: the old focus stays displayed as a related node.
                self.registry.set_handlers(old, Handlers::TAP | Handlers::DRAG);
                self.scene.add_related_behaviors(old);
            } else {
                self.remove_node(old);
            }
        }

        for &index in &to_keep {
            self.scene.add_related_behaviors(index);
        }

        let center = self.bounds.center();
        for &index in &to_add {
            let node = source.configure_node(index);
            let origin = self.clock.advance(center);
            self.add_node(index, node, origin, Handlers::TAP | Handlers::DRAG);
            self.scene.add_related_behaviors(index);
        }

        self.registry.set_related(new_related);

        debug_assert!(
            self.registry.is_consistent(),
            "registry inconsistent after a focus transition"
        );
    }

    /// Report a tap on `index`.
    ///
    /// Returns the index the host should treat as selected (and typically
    /// respond to by calling [`focus`](Self::focus)), or `None` when
    /// interaction is disabled, a drag is in progress, or the index is no
    /// longer displayed. A tap can land shortly after its node was removed,
    /// and stale selections must not reach the host.
    #[must_use]
    pub fn tap(&self, index: K) -> Option<K> {
        if !self.interaction_enabled || self.drag.is_dragging() {
            return None;
        }
        self.registry.contains(index).then_some(index)
    }

    /// Feed a drag gesture transition for `node`.
    ///
    /// While dragged, a node is detached from the scene so physics cannot
    /// fight the user's finger; its center follows the pointer, clamped to
    /// the container. On [`DragEvent::Ended`] the scene behaviors are
    /// restored and the release velocity becomes an amplified throw; on
    /// [`DragEvent::Cancelled`] behaviors are restored without a throw.
    ///
    /// The focused node is not draggable, and events for nodes that are no
    /// longer displayed are ignored.
    pub fn drag(&mut self, node: K, event: DragEvent) {
        if !self.interaction_enabled || !self.allows_dragging {
            return;
        }
        if self.registry.focused() == Some(node) || !self.registry.contains(node) {
            return;
        }
        match event {
            DragEvent::Began { pointer } => {
                if self.drag.contains(node) {
                    return;
                }
                let Some(center) = self.scene.position(node) else {
                    return;
                };
                if self.registry.related().contains(&node) {
                    self.scene.remove_related_behaviors(node);
                }
                self.scene.remove_behaviors(node);
                self.drag.begin(node, pointer, center);
            }
            DragEvent::Changed { pointer } => {
                let half = Size::new(self.config.node_radius, self.config.node_radius);
                self.drag.update(node, pointer, half, self.bounds);
            }
            DragEvent::Ended { velocity } => {
                let Some((position, throw)) = self.drag.end(node, velocity) else {
                    return;
                };
                self.scene.add_behaviors(node, position);
                if self.registry.related().contains(&node) {
                    self.scene.add_related_behaviors(node);
                }
                self.scene.add_velocity(node, throw);
            }
            DragEvent::Cancelled => {
                let Some(position) = self.drag.cancel(node) else {
                    return;
                };
                self.scene.add_behaviors(node, position);
                if self.registry.related().contains(&node) {
                    self.scene.add_related_behaviors(node);
                }
            }
        }
    }

    /// The container's reference geometry changed.
    pub fn layout_changed(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.scene.layout_changed(bounds);
    }

    /// The currently focused key, if any.
    #[must_use]
    pub fn focused(&self) -> Option<K> {
        self.registry.focused()
    }

    /// The keys currently displayed as related.
    #[must_use]
    pub fn related(&self) -> &BTreeSet<K> {
        self.registry.related()
    }

    /// The payload displayed for `index`.
    #[must_use]
    pub fn node(&self, index: K) -> Option<&N> {
        self.registry.get(index)
    }

    /// The handlers installed on `index`.
    #[must_use]
    pub fn handlers(&self, index: K) -> Option<Handlers> {
        self.registry.handlers(index)
    }

    /// Number of displayed nodes (focused plus related).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Current center of `index`. While `index` is being dragged this is the
    /// drag position; otherwise it is the scene's simulated position.
    #[must_use]
    pub fn position(&self, index: K) -> Option<Point> {
        self.drag
            .position(index)
            .or_else(|| self.scene.position(index))
    }

    /// Whether any node is currently being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether users may drag related nodes.
    #[must_use]
    pub fn allows_dragging(&self) -> bool {
        self.allows_dragging
    }

    /// Allow or forbid dragging related nodes.
    pub fn set_allows_dragging(&mut self, allows: bool) {
        self.allows_dragging = allows;
    }

    /// Whether taps and drags are currently accepted.
    #[must_use]
    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Enable or disable user interaction.
    ///
    /// Focus transitions disable interaction internally and restore whatever
    /// the host set here when they finish.
    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.interaction_enabled = enabled;
    }

    /// The injected scene backend.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the injected scene backend, e.g. to step a
    /// simulation or feed it a gravity direction.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Query the related set, enforcing the "never related to itself"
    /// contract.
    fn query_related(&mut self, source: &mut D, index: K) -> BTreeSet<K> {
        let mut related = source.related_nodes(index);
        if related.remove(&index) {
            debug_assert!(
                false,
                "data source reported {index:?} as related to itself"
            );
            log::warn!("ignoring a self-relation reported by the data source");
        }
        related
    }

    fn add_node(&mut self, index: K, node: N, origin: Point, handlers: Handlers) {
        self.registry.insert(index, node, handlers);
        self.scene.add_behaviors(index, origin);
    }

    fn remove_node(&mut self, index: K) {
        // A dragged node was already detached from the scene at drag-begin.
        if self.drag.cancel(index).is_none() {
            self.scene.remove_behaviors(index);
        }
        self.registry.remove(index);
    }

    /// Restore scene behaviors for every in-flight drag and drop the drag
    /// state, returning the graph to its at-rest shape.
    fn cancel_active_drags(&mut self) {
        let targets: SmallVec<[K; 4]> = self.drag.targets().collect();
        for index in targets {
            let Some(position) = self.drag.cancel(index) else {
                continue;
            };
            if self.registry.contains(index) {
                self.scene.add_behaviors(index, position);
                if self.registry.related().contains(&index) {
                    self.scene.add_related_behaviors(index);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    use bubblegraph_scene::{RecordingScene, SceneOp};
    use kurbo::Vec2;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    struct MapSource {
        focal: u32,
        relations: BTreeMap<u32, BTreeSet<u32>>,
        configured: Vec<u32>,
    }

    impl MapSource {
        fn new(focal: u32, entries: &[(u32, &[u32])]) -> Self {
            let relations = entries
                .iter()
                .map(|(index, related)| (*index, related.iter().copied().collect()))
                .collect();
            Self {
                focal,
                relations,
                configured: Vec::new(),
            }
        }
    }

    impl DataSource<u32, String> for MapSource {
        fn focused_node(&self) -> u32 {
            self.focal
        }

        fn related_nodes(&self, index: u32) -> BTreeSet<u32> {
            self.relations.get(&index).cloned().unwrap_or_default()
        }

        fn configure_node(&mut self, index: u32) -> String {
            self.configured.push(index);
            format!("node {index}")
        }
    }

    type TestGraph = BubbleGraph<u32, String, MapSource, RecordingScene<u32>>;

    fn star_source() -> MapSource {
        MapSource::new(0, &[(0, &[1, 2, 3]), (2, &[0, 1, 3])])
    }

    fn loaded(source: MapSource) -> TestGraph {
        let mut graph = BubbleGraph::with_source(RecordingScene::new(), source, BOUNDS);
        graph.reload_data();
        graph
    }

    #[test]
    fn reload_builds_a_consistent_display() {
        let graph = loaded(star_source());

        assert_eq!(graph.focused(), Some(0));
        assert_eq!(graph.related(), &(1..4).collect::<BTreeSet<_>>());
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.handlers(0), Some(Handlers::TAP));
        for index in 1..4 {
            assert_eq!(graph.handlers(index), Some(Handlers::TAP | Handlers::DRAG));
        }
        assert_eq!(graph.scene().body_count(), 4);
        assert_eq!(graph.scene().attachment_count(), 3);
        assert_eq!(graph.scene().focused(), Some(0));
        assert_eq!(graph.node(2).map(String::as_str), Some("node 2"));
    }

    #[test]
    fn reload_with_no_source_is_a_noop() {
        let mut graph: TestGraph = BubbleGraph::new(RecordingScene::new(), BOUNDS);
        graph.reload_data();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.scene().ops().is_empty());
    }

    #[test]
    fn repeated_reloads_do_not_accumulate_state() {
        let mut graph = loaded(star_source());
        graph.reload_data();

        assert_eq!(graph.focused(), Some(0));
        assert_eq!(graph.related(), &(1..4).collect::<BTreeSet<_>>());
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.registry.handler_count(), 4);
        assert_eq!(graph.scene().body_count(), 4);
        assert_eq!(graph.scene().attachment_count(), 3);
        assert!(graph.registry.is_consistent());
    }

    #[test]
    fn focusing_the_focused_node_is_a_noop() {
        let mut graph = loaded(star_source());
        graph.scene_mut().clear_ops();

        graph.focus(0);

        assert!(graph.scene().ops().is_empty(), "no scene calls on a no-op");
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.registry.handler_count(), 4);
        assert!(graph.interaction_enabled());
    }

    #[test]
    fn focusing_a_related_node_promotes_it_in_place() {
        let mut graph = loaded(star_source());
        graph.scene_mut().clear_ops();

        // focused = 0, related = {1, 2, 3}, relatedFor(2) = {0, 1, 3}:
        // nothing to add, nothing to remove, 1 and 3 change hands, 2 is
        // promoted, and 0 is demoted because it is related to 2.
        graph.focus(2);

        assert_eq!(graph.focused(), Some(2));
        assert_eq!(graph.related(), &[0, 1, 3].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.handlers(2), Some(Handlers::TAP));
        assert_eq!(graph.handlers(0), Some(Handlers::TAP | Handlers::DRAG));
        assert_eq!(
            graph.scene().ops(),
            &[
                SceneOp::RemoveRelatedBehaviors(1),
                SceneOp::RemoveRelatedBehaviors(3),
                SceneOp::RemoveFocusedBehaviors(0),
                SceneOp::RemoveRelatedBehaviors(2),
                SceneOp::AddFocusedBehaviors(2),
                SceneOp::AddRelatedBehaviors(0),
                SceneOp::AddRelatedBehaviors(1),
                SceneOp::AddRelatedBehaviors(3),
            ],
        );
        // The promoted node was reused, not re-queried.
        assert_eq!(
            graph.data_source().unwrap().configured,
            &[0, 1, 2, 3],
            "only the initial reload configures nodes"
        );
    }

    #[test]
    fn the_old_focus_is_removed_when_no_longer_related() {
        let mut graph = loaded(MapSource::new(0, &[(0, &[1, 2, 3]), (2, &[1, 3])]));
        graph.scene_mut().clear_ops();

        graph.focus(2);

        assert_eq!(graph.focused(), Some(2));
        assert_eq!(graph.related(), &[1, 3].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(graph.node_count(), 3);
        assert!(graph.node(0).is_none(), "node 0 left the display");
        assert!(
            graph.scene().ops().contains(&SceneOp::RemoveBehaviors(0)),
            "the unrelated old focus exits the scene"
        );
    }

    #[test]
    fn focusing_an_undisplayed_node_creates_it_fresh() {
        let mut graph = loaded(MapSource::new(0, &[(0, &[1, 2, 3]), (9, &[1])]));
        graph.scene_mut().clear_ops();

        graph.focus(9);

        assert_eq!(graph.focused(), Some(9));
        assert_eq!(graph.related(), &[1].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(graph.node_count(), 2);
        // The fresh focus spawns at the container center.
        assert!(
            graph
                .scene()
                .ops()
                .contains(&SceneOp::AddBehaviors(9, BOUNDS.center())),
            "fresh focus enters at the center"
        );
        // 2 and 3 are gone, 1 survived and was re-anchored.
        assert!(graph.scene().ops().contains(&SceneOp::RemoveBehaviors(2)));
        assert!(graph.scene().ops().contains(&SceneOp::RemoveBehaviors(3)));
        assert!(graph.scene().ops().contains(&SceneOp::AddRelatedBehaviors(1)));
        assert_eq!(graph.scene().attachment_count(), 1);
    }

    #[test]
    fn round_trip_restores_the_original_related_set() {
        let mut graph = loaded(star_source());
        let original: BTreeSet<u32> = graph.related().clone();

        graph.focus(2);
        graph.focus(0);

        assert_eq!(graph.focused(), Some(0));
        assert_eq!(graph.related(), &original);
        assert_eq!(graph.node_count(), 4);
        assert!(graph.registry.is_consistent());
    }

    #[test]
    fn invariants_hold_across_arbitrary_focus_sequences() {
        let relations: &[(u32, &[u32])] = &[
            (0, &[1, 2, 3]),
            (1, &[0, 4]),
            (2, &[0, 1, 3]),
            (3, &[5, 6]),
            (4, &[]),
            (5, &[0]),
        ];
        let mut graph = loaded(MapSource::new(0, relations));

        for &target in &[2, 3, 5, 0, 1, 4, 0] {
            graph.focus(target);

            assert_eq!(graph.focused(), Some(target));
            let expected = graph.data_source().unwrap().related_nodes(target);
            assert_eq!(graph.related(), &expected);
            assert_eq!(graph.node_count(), expected.len() + 1);
            assert_eq!(graph.registry.handler_count(), graph.node_count());
            assert_eq!(graph.scene().body_count(), graph.node_count());
            assert_eq!(graph.scene().attachment_count(), expected.len());
            assert!(graph.registry.is_consistent());
        }
    }

    #[test]
    fn focus_without_a_source_is_ignored() {
        let mut graph: TestGraph = BubbleGraph::new(RecordingScene::new(), BOUNDS);
        graph.focus(3);
        assert_eq!(graph.node_count(), 0);
        assert!(graph.scene().ops().is_empty());
    }

    #[test]
    fn tap_reports_only_live_nodes() {
        let mut graph = loaded(star_source());

        assert_eq!(graph.tap(1), Some(1));
        assert_eq!(graph.tap(0), Some(0));
        // A tap can arrive for an index that was just removed.
        assert_eq!(graph.tap(99), None);

        graph.set_interaction_enabled(false);
        assert_eq!(graph.tap(1), None);
        graph.set_interaction_enabled(true);

        // Bubbles are detached mid-drag; a focus change would go poorly.
        graph.drag(1, DragEvent::Began { pointer: graph.position(1).unwrap() });
        assert_eq!(graph.tap(2), None);
    }

    #[test]
    fn drag_detaches_clamps_and_restores() {
        let mut graph = loaded(star_source());
        let start = graph.position(1).unwrap();
        graph.scene_mut().clear_ops();

        graph.drag(1, DragEvent::Began { pointer: start });
        assert!(graph.is_dragging());
        assert_eq!(
            graph.scene().ops(),
            &[
                SceneOp::RemoveRelatedBehaviors(1),
                SceneOp::RemoveBehaviors(1),
            ],
        );
        assert!(!graph.scene().is_tracking(1));

        // The drag position wins over the (now absent) scene position.
        graph.drag(1, DragEvent::Changed { pointer: Point::new(-500.0, 120.0) });
        assert_eq!(graph.position(1), Some(Point::new(50.0, 120.0)));

        graph.scene_mut().clear_ops();
        graph.drag(1, DragEvent::Ended { velocity: Vec2::new(10.0, 5.0) });
        assert_eq!(
            graph.scene().ops(),
            &[
                SceneOp::AddBehaviors(1, Point::new(50.0, 120.0)),
                SceneOp::AddRelatedBehaviors(1),
                SceneOp::AddVelocity(1, Vec2::new(20.0, 10.0)),
            ],
        );
        assert!(!graph.is_dragging());
        // The drag never touched the related set.
        assert_eq!(graph.related(), &(1..4).collect::<BTreeSet<_>>());
        assert!(graph.registry.is_consistent());
    }

    #[test]
    fn cancelled_drags_restore_without_a_throw() {
        let mut graph = loaded(star_source());
        let start = graph.position(1).unwrap();

        graph.drag(1, DragEvent::Began { pointer: start });
        graph.scene_mut().clear_ops();
        graph.drag(1, DragEvent::Cancelled);

        assert_eq!(
            graph.scene().ops(),
            &[
                SceneOp::AddBehaviors(1, start),
                SceneOp::AddRelatedBehaviors(1),
            ],
        );
        assert!(!graph.is_dragging());
    }

    #[test]
    fn the_focused_node_is_not_draggable() {
        let mut graph = loaded(star_source());
        graph.scene_mut().clear_ops();

        graph.drag(0, DragEvent::Began { pointer: BOUNDS.center() });

        assert!(!graph.is_dragging());
        assert!(graph.scene().ops().is_empty());
    }

    #[test]
    fn dragging_can_be_forbidden() {
        let mut graph = loaded(star_source());
        graph.set_allows_dragging(false);
        graph.scene_mut().clear_ops();

        graph.drag(1, DragEvent::Began { pointer: graph.position(1).unwrap() });

        assert!(!graph.is_dragging());
        assert!(graph.scene().ops().is_empty());
    }

    #[test]
    fn stale_drag_events_are_ignored() {
        let mut graph = loaded(star_source());
        graph.scene_mut().clear_ops();

        graph.drag(42, DragEvent::Began { pointer: Point::ZERO });
        graph.drag(42, DragEvent::Ended { velocity: Vec2::ZERO });

        assert!(graph.scene().ops().is_empty());
    }

    #[test]
    fn focusing_during_a_drag_settles_the_drag_first() {
        let mut graph = loaded(star_source());
        let start = graph.position(1).unwrap();
        graph.drag(1, DragEvent::Began { pointer: start });
        graph.drag(1, DragEvent::Changed { pointer: Point::new(600.0, 500.0) });

        graph.focus(2);

        assert!(!graph.is_dragging());
        assert_eq!(graph.focused(), Some(2));
        assert_eq!(graph.scene().body_count(), graph.node_count());
        assert!(graph.registry.is_consistent());
    }

    #[test]
    fn layout_changes_reach_the_scene() {
        let mut graph = loaded(star_source());
        graph.scene_mut().clear_ops();

        let moved = Rect::new(0.0, 0.0, 640.0, 480.0);
        graph.layout_changed(moved);

        assert_eq!(graph.scene().ops(), &[SceneOp::LayoutChanged(moved)]);
    }

    #[test]
    fn a_dragged_survivor_is_reattached_to_the_new_focus() {
        // 1 stays related across the 0 → 2 transition while being dragged.
        let mut graph = loaded(star_source());
        let start = graph.position(1).unwrap();
        graph.drag(1, DragEvent::Began { pointer: start });

        graph.focus(2);

        assert_eq!(graph.scene().focused(), Some(2));
        assert!(graph.scene().is_attached(1), "survivor hangs off the new focus");
        assert_eq!(graph.scene().attachment_count(), graph.related().len());
    }
}
