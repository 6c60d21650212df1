// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for the nodes currently on display.
//!
//! The registry is an index-keyed arena: nodes are looked up by key and never
//! hold a pointer back into the graph. It tracks which key is focused, which
//! keys are related, each node's payload, and the interaction handlers
//! installed on it. The reconciler mutates it; everything else reads it.

use core::fmt::Debug;
use core::hash::Hash;

use alloc::collections::BTreeSet;

use hashbrown::HashMap;

bitflags::bitflags! {
    /// Interaction handlers installed on a displayed node.
    ///
    /// The focused node carries only [`Handlers::TAP`]; related nodes carry
    /// both flags. Exactly one entry exists per displayed node, which the
    /// consistency check relies on to catch double-registration and missed
    /// cleanup.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Handlers: u8 {
        /// Tap-to-select / tap-to-refocus.
        const TAP  = 0b0000_0001;
        /// Direct manipulation by dragging.
        const DRAG = 0b0000_0010;
    }
}

/// State for the nodes currently on display, owned by one graph instance.
///
/// Single-writer: mutated only by the owning graph on its control thread.
/// The invariants listed on [`is_consistent`](Self::is_consistent) hold
/// whenever no focus transition is in progress.
#[derive(Clone, Debug)]
pub struct Registry<K, N> {
    nodes: HashMap<K, N>,
    handlers: HashMap<K, Handlers>,
    related: BTreeSet<K>,
    focused: Option<K>,
}

impl<K: Copy + Ord + Eq + Hash + Debug, N> Registry<K, N> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            handlers: HashMap::new(),
            related: BTreeSet::new(),
            focused: None,
        }
    }

    /// Register a node's payload and handlers under `index`.
    pub fn insert(&mut self, index: K, node: N, handlers: Handlers) {
        let previous = self.nodes.insert(index, node);
        debug_assert!(previous.is_none(), "node {index:?} registered twice");
        self.handlers.insert(index, handlers);
    }

    /// Remove every trace of `index` and return its payload.
    pub fn remove(&mut self, index: K) -> Option<N> {
        self.handlers.remove(&index);
        self.related.remove(&index);
        if self.focused == Some(index) {
            self.focused = None;
        }
        self.nodes.remove(&index)
    }

    /// Whether `index` is currently displayed.
    #[must_use]
    pub fn contains(&self, index: K) -> bool {
        self.nodes.contains_key(&index)
    }

    /// The payload registered under `index`.
    #[must_use]
    pub fn get(&self, index: K) -> Option<&N> {
        self.nodes.get(&index)
    }

    /// Mutable access to the payload registered under `index`.
    pub fn get_mut(&mut self, index: K) -> Option<&mut N> {
        self.nodes.get_mut(&index)
    }

    /// The currently focused key, if any.
    #[must_use]
    pub fn focused(&self) -> Option<K> {
        self.focused
    }

    /// Mark `index` as the focused node.
    ///
    /// The node must already be registered. If it was in the related set it
    /// leaves it; a node is never related and focused at once.
    pub fn set_focused(&mut self, index: K) {
        debug_assert!(
            self.nodes.contains_key(&index),
            "focusing an unregistered node: {index:?}"
        );
        self.related.remove(&index);
        self.focused = Some(index);
    }

    /// Clear the focused key, returning it.
    pub fn clear_focused(&mut self) -> Option<K> {
        self.focused.take()
    }

    /// The keys currently displayed as related.
    #[must_use]
    pub fn related(&self) -> &BTreeSet<K> {
        &self.related
    }

    /// Replace the related set wholesale.
    pub fn set_related(&mut self, related: BTreeSet<K>) {
        self.related = related;
    }

    /// Take the related set, leaving it empty.
    pub fn take_related(&mut self) -> BTreeSet<K> {
        core::mem::take(&mut self.related)
    }

    /// The handlers installed on `index`.
    #[must_use]
    pub fn handlers(&self, index: K) -> Option<Handlers> {
        self.handlers.get(&index).copied()
    }

    /// Replace the handlers installed on `index`.
    pub fn set_handlers(&mut self, index: K, handlers: Handlers) {
        debug_assert!(
            self.nodes.contains_key(&index),
            "setting handlers on an unregistered node: {index:?}"
        );
        self.handlers.insert(index, handlers);
    }

    /// Number of handler entries; equals the displayed-node count when the
    /// registry is consistent.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Number of displayed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is displayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the displayed nodes and their payloads.
    pub fn nodes(&self) -> impl Iterator<Item = (K, &N)> {
        self.nodes.iter().map(|(index, node)| (*index, node))
    }

    /// Check the at-rest invariants.
    ///
    /// Outside an in-progress transition the registry is either completely
    /// empty, or:
    ///
    /// - exactly one focused node exists and it is not in the related set,
    /// - `len() == related().len() + 1`,
    /// - every related key is registered,
    /// - there is exactly one handler entry per displayed node, `TAP` for
    ///   the focused node and `TAP | DRAG` for related nodes.
    ///
    /// Intended for debug assertions and tests.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.nodes.is_empty() {
            return self.focused.is_none() && self.related.is_empty() && self.handlers.is_empty();
        }
        let Some(focused) = self.focused else {
            return false;
        };
        if self.related.contains(&focused) {
            return false;
        }
        if self.nodes.len() != self.related.len() + 1 {
            return false;
        }
        if self.handlers.len() != self.nodes.len() {
            return false;
        }
        if self.handlers.get(&focused) != Some(&Handlers::TAP) {
            return false;
        }
        self.related.iter().all(|index| {
            self.nodes.contains_key(index)
                && self.handlers.get(index) == Some(&(Handlers::TAP | Handlers::DRAG))
        })
    }
}

impl<K: Copy + Ord + Eq + Hash + Debug, N> Default for Registry<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> Registry<u32, &'static str> {
        let mut registry = Registry::new();
        registry.insert(0, "focus", Handlers::TAP);
        registry.set_focused(0);
        for index in 1..4 {
            registry.insert(index, "related", Handlers::TAP | Handlers::DRAG);
        }
        registry.set_related((1..4).collect());
        registry
    }

    #[test]
    fn empty_registry_is_consistent() {
        let registry: Registry<u32, ()> = Registry::new();
        assert!(registry.is_consistent());
    }

    #[test]
    fn populated_registry_is_consistent() {
        let registry = populated();
        assert!(registry.is_consistent());
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.handler_count(), 4);
    }

    #[test]
    fn remove_clears_every_trace() {
        let mut registry = populated();
        registry.remove(2);
        assert!(!registry.contains(2));
        assert!(registry.handlers(2).is_none());
        assert!(!registry.related().contains(&2));
        // The related set shrank with the node, so the counts still line up.
        assert!(registry.is_consistent());
    }

    #[test]
    fn focusing_a_related_node_pulls_it_out_of_the_related_set() {
        let mut registry = populated();
        registry.clear_focused();
        registry.remove(0);
        registry.set_focused(2);
        registry.set_handlers(2, Handlers::TAP);
        assert_eq!(registry.focused(), Some(2));
        assert!(!registry.related().contains(&2));
        assert!(registry.is_consistent());
    }

    #[test]
    fn handler_mismatches_are_inconsistent() {
        let mut registry = populated();
        registry.set_handlers(1, Handlers::TAP);
        assert!(!registry.is_consistent());

        let mut registry = populated();
        registry.set_handlers(0, Handlers::TAP | Handlers::DRAG);
        assert!(!registry.is_consistent());
    }

    #[test]
    fn missing_focus_is_inconsistent() {
        let mut registry = populated();
        registry.clear_focused();
        assert!(!registry.is_consistent());
    }
}
