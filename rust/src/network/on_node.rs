//! Activity-on-node encoding.

use crate::interner::TaskId;

use super::{ArcLabel, Encoded, NodeLabel, PrecedenceGraph, TaskAnchor};

/// One node per task; an edge from each predecessor to the task.
///
/// The edge weight is the predecessor's duration, so a node's propagated time
/// is the task's start time and its exit weight is its own duration.
pub(super) fn encode(durations: &[f64], predecessors: &[Vec<TaskId>]) -> Encoded {
    let mut graph = PrecedenceGraph::with_capacity(durations.len());
    let anchors: Vec<TaskAnchor> = durations
        .iter()
        .enumerate()
        .map(|(task, &duration)| {
            TaskAnchor::Node(graph.add_node(NodeLabel::Task(task as TaskId), duration))
        })
        .collect();

    for (task, preds) in predecessors.iter().enumerate() {
        for &pred in preds {
            graph.add_arc(pred, task as u32, ArcLabel::Precedence, durations[pred as usize]);
        }
    }

    Encoded {
        graph,
        anchors,
        terminals: None,
        dummy_count: 0,
    }
}
