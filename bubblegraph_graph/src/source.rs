// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The content contract between a bubble graph and its host.

use alloc::collections::BTreeSet;

/// Provides the graph's content: which node is focal, which nodes relate to
/// which, and a prepared visual for each node as it enters display.
///
/// The node key `K` is a small copyable handle (typically an index into the
/// host's model); the payload `N` is whatever the host renders. The graph
/// core stores the payload while the node is displayed and drops it when the
/// node leaves.
///
/// ## Contract
///
/// - [`related_nodes`](Self::related_nodes) must never include the queried
///   index itself; a node is not related to itself. Violations are a
///   programming error: the graph asserts in debug builds and strips the
///   offending entry in release builds.
/// - [`configure_node`](Self::configure_node) is queried again each time a
///   node re-enters display; the source must return a fully prepared visual
///   every time.
///
/// Queries are synchronous and issued on the control thread.
pub trait DataSource<K, N> {
    /// The index of the node that should currently be focal.
    fn focused_node(&self) -> K;

    /// The set of indices related to `index`.
    fn related_nodes(&self, index: K) -> BTreeSet<K>;

    /// Prepare a visual for `index`, ready for display.
    fn configure_node(&mut self, index: K) -> N;
}
