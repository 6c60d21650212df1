// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo data sources for the bubblegraph crates.
//!
//! The showcase source is a complete k-ary tree whose nodes are colored by
//! their position on the hue wheel: the root is uncolored, and every other
//! node gets the hue at its normalized in-order position. Focusing a node
//! shows its children, so drilling down walks ever narrower slices of the
//! wheel.

use std::collections::BTreeSet;

use bubblegraph_graph::DataSource;

/// Offset applied to the hue wheel so the first branch does not start on
/// pure red.
const HUE_SHIFT: f64 = 30.61 / 360.0;

/// A complete k-ary tree addressed by level-order index, root at `0`.
#[derive(Clone, Copy, Debug)]
pub struct CompleteKaryTree {
    branching: u32,
    size: u32,
}

impl CompleteKaryTree {
    /// Create a complete tree with the given branching factor and height
    /// (a height of `0` is just the root).
    ///
    /// # Panics
    ///
    /// Panics if `branching` is less than two.
    #[must_use]
    pub fn new(branching: u32, height: u32) -> Self {
        assert!(branching >= 2, "a k-ary tree needs at least two children per node");
        let size = (branching.pow(height + 1) - 1) / (branching - 1);
        Self { branching, size }
    }

    /// Total number of nodes.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// The root index.
    #[must_use]
    pub const fn root(&self) -> u32 {
        0
    }

    /// The parent of `index`, or `None` for the root.
    #[must_use]
    pub const fn parent(&self, index: u32) -> Option<u32> {
        if index == 0 {
            None
        } else {
            Some((index - 1) / self.branching)
        }
    }

    /// The children of `index`; empty for leaves.
    #[must_use]
    pub fn children(&self, index: u32) -> Vec<u32> {
        let first = self.branching * index + 1;
        (first..first + self.branching)
            .filter(|child| *child < self.size)
            .collect()
    }

    /// Whether `index` has no children.
    #[must_use]
    pub fn is_leaf(&self, index: u32) -> bool {
        self.branching * index + 1 >= self.size
    }

    /// Indices in in-order traversal order (half the children, the node,
    /// the remaining children).
    #[must_use]
    pub fn in_order(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.size as usize);
        self.visit(self.root(), &mut out);
        out
    }

    fn visit(&self, index: u32, out: &mut Vec<u32>) {
        if self.is_leaf(index) {
            out.push(index);
            return;
        }
        let children = self.children(index);
        let mid = children.len() / 2;
        for &child in &children[..mid] {
            self.visit(child, out);
        }
        out.push(index);
        for &child in &children[mid..] {
            self.visit(child, out);
        }
    }
}

/// The prepared visual for one hue-wheel node.
#[derive(Clone, Debug, PartialEq)]
pub struct HueBubble {
    /// Display text, e.g. `"217°"`.
    pub label: String,
    /// Hue in degrees, `None` for the uncolored root.
    pub hue_degrees: Option<f64>,
}

/// A [`DataSource`] over a complete k-ary tree colored by the hue wheel.
///
/// Related nodes are the children of the focused node; leaves have no
/// related set and make poor focus targets, which hosts can check with
/// [`HueWheelSource::can_focus`].
#[derive(Clone, Debug)]
pub struct HueWheelSource {
    tree: CompleteKaryTree,
    hue_at: Vec<f64>,
    focused: u32,
}

impl HueWheelSource {
    /// Create a source over a tree of the given branching factor and height.
    #[must_use]
    pub fn new(branching: u32, height: u32) -> Self {
        let tree = CompleteKaryTree::new(branching, height);
        let in_order = tree.in_order();
        let mut hue_at = vec![0.0; tree.size() as usize];
        for (position, &index) in in_order.iter().enumerate() {
            let normalized = position as f64 / tree.size() as f64;
            hue_at[index as usize] = (normalized + HUE_SHIFT).fract();
        }
        Self {
            tree,
            hue_at,
            focused: tree.root(),
        }
    }

    /// The underlying tree.
    #[must_use]
    pub fn tree(&self) -> &CompleteKaryTree {
        &self.tree
    }

    /// Record a new focal node, typically in response to a selection.
    pub fn set_focused(&mut self, index: u32) {
        self.focused = index;
    }

    /// Whether focusing `index` would show anything around it.
    #[must_use]
    pub fn can_focus(&self, index: u32) -> bool {
        !self.tree.is_leaf(index)
    }
}

impl DataSource<u32, HueBubble> for HueWheelSource {
    fn focused_node(&self) -> u32 {
        self.focused
    }

    fn related_nodes(&self, index: u32) -> BTreeSet<u32> {
        self.tree.children(index).into_iter().collect()
    }

    fn configure_node(&mut self, index: u32) -> HueBubble {
        if index == self.tree.root() {
            return HueBubble {
                label: "•".to_string(),
                hue_degrees: None,
            };
        }
        let degrees = (self.hue_at[index as usize] * 360.0).round();
        HueBubble {
            label: format!("{degrees:.0}°"),
            hue_degrees: Some(degrees),
        }
    }
}
