// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubblegraph Graph: the interactive bubble-graph widget core.
//!
//! A bubble graph shows one **focused** node at the center of the container
//! with its **related** nodes hanging around it, linked through a pluggable
//! [`Scene`](bubblegraph_scene::Scene) backend. Tapping a related node
//! refocuses the graph on it; the hard part is the transition, which must
//! decide from the old and new related sets alone which nodes to add, which
//! to remove, and which to keep (but re-anchor), without leaking a body, an
//! attachment, or a handler along the way. [`BubbleGraph`] owns that
//! reconciliation, the node registry, and the gesture plumbing.
//!
//! The host supplies content through the [`DataSource`] contract and feeds
//! input as discrete events ([`BubbleGraph::tap`],
//! [`BubbleGraph::drag`]); there is no coupling to any particular windowing
//! or rendering system.
//!
//! ## Minimal example
//!
//! A five-node star with tap-to-refocus:
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use bubblegraph_graph::{BubbleGraph, DataSource};
//! use bubblegraph_scene::StaticScene;
//! use kurbo::Rect;
//!
//! struct Star;
//!
//! impl DataSource<u32, String> for Star {
//!     fn focused_node(&self) -> u32 {
//!         0
//!     }
//!
//!     fn related_nodes(&self, index: u32) -> BTreeSet<u32> {
//!         match index {
//!             // The hub is related to every leaf, each leaf only to the hub.
//!             0 => (1..5).collect(),
//!             _ => [0].into_iter().collect(),
//!         }
//!     }
//!
//!     fn configure_node(&mut self, index: u32) -> String {
//!         format!("node {index}")
//!     }
//! }
//!
//! let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
//! let mut graph = BubbleGraph::with_source(StaticScene::new(bounds), Star, bounds);
//!
//! graph.reload_data();
//! assert_eq!(graph.focused(), Some(0));
//! assert_eq!(graph.node_count(), 5);
//!
//! // The host forwards a tap as a focus request.
//! if let Some(selected) = graph.tap(3) {
//!     graph.focus(selected);
//! }
//! assert_eq!(graph.focused(), Some(3));
//! assert!(graph.related().contains(&0));
//! assert_eq!(graph.node_count(), 2);
//! ```
//!
//! ## Concurrency
//!
//! The graph is single-threaded: registry mutation, reconciliation, and scene
//! calls all happen on the control thread that owns the [`BubbleGraph`].
//! Data-source queries are synchronous; a slow source blocks that thread.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod graph;
pub mod registry;
pub mod source;

pub use bubblegraph_gesture::drag::DragEvent;
pub use graph::{BubbleGraph, GraphConfig};
pub use registry::{Handlers, Registry};
pub use source::DataSource;
