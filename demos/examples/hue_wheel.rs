// Copyright 2026 the Bubblegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a hue-wheel bubble graph from the terminal: drill down two levels,
//! come back up, and throw a bubble around.

use bubblegraph_demos::{HueBubble, HueWheelSource};
use bubblegraph_graph::{BubbleGraph, DragEvent};
use bubblegraph_scene::SpringScene;
use kurbo::{Rect, Vec2};

type Graph = BubbleGraph<u32, HueBubble, HueWheelSource, SpringScene<u32>>;

const BOUNDS: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

fn settle(graph: &mut Graph, seconds: f64) {
    let steps = (seconds * 60.0) as u32;
    for _ in 0..steps {
        graph.scene_mut().step(1.0 / 60.0);
    }
}

fn print_state(graph: &Graph, heading: &str) {
    println!("== {heading}");
    let focused = graph.focused().expect("the graph always has a focus here");
    let label = &graph.node(focused).expect("focused node is displayed").label;
    let position = graph.position(focused).expect("focused node has a position");
    println!("   focused {focused} ({label}) at ({:.0}, {:.0})", position.x, position.y);
    for &index in graph.related() {
        let label = &graph.node(index).expect("related node is displayed").label;
        let position = graph.position(index).expect("related node has a position");
        println!("   related {index} ({label}) at ({:.0}, {:.0})", position.x, position.y);
    }
}

fn main() {
    let source = HueWheelSource::new(4, 3);
    let mut graph = Graph::with_source(SpringScene::new(BOUNDS), source, BOUNDS);

    graph.reload_data();
    settle(&mut graph, 2.0);
    print_state(&graph, "after reload");

    // Drill down two levels, the way taps would.
    let mut path = Vec::new();
    for _ in 0..2 {
        let next = graph
            .related()
            .iter()
            .copied()
            .find(|&index| graph.data_source().unwrap().can_focus(index));
        let Some(next) = next else { break };
        let Some(selected) = graph.tap(next) else { break };
        path.push(graph.focused().expect("a focus exists before a transition"));
        graph.data_source_mut().unwrap().set_focused(selected);
        graph.focus(selected);
        settle(&mut graph, 2.0);
        print_state(&graph, "after drilling down");
    }

    // And back up.
    while let Some(previous) = path.pop() {
        graph.data_source_mut().unwrap().set_focused(previous);
        graph.focus(previous);
        settle(&mut graph, 2.0);
    }
    print_state(&graph, "back at the root");

    // Throw one of the related bubbles.
    if let Some(&node) = graph.related().iter().next() {
        let start = graph.position(node).expect("related node has a position");
        graph.drag(node, DragEvent::Began { pointer: start });
        graph.drag(
            node,
            DragEvent::Changed {
                pointer: start + Vec2::new(90.0, 40.0),
            },
        );
        graph.drag(
            node,
            DragEvent::Ended {
                velocity: Vec2::new(150.0, -80.0),
            },
        );
        settle(&mut graph, 2.0);
        print_state(&graph, "after a throw");
    }
}
