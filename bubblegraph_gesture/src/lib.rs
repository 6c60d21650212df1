// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubblegraph Gesture: drag interaction state for bubble graphs.
//!
//! Input capture (a windowing toolkit's recognizers, a web pointer-event
//! stream, a test) produces discrete [`drag::DragEvent`] transitions; this
//! crate turns them into the bookkeeping a bubble graph needs while a node is
//! detached from its scene for direct manipulation: where the user grabbed
//! the node, where its center may legally move, and how hard it was thrown on
//! release.
//!
//! Keeping this state machine separate from the focus reconciler lets both be
//! unit-tested without a real UI event source.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod drag;
