//! Activity-on-arc encoding.

use rustc_hash::FxHashSet;

use crate::interner::TaskId;

use super::{ArcLabel, Encoded, NodeId, NodeLabel, PrecedenceGraph, TaskAnchor};

/// Event and dummy counters for one encode call.
#[derive(Default)]
struct Allocator {
    next_event: u32,
    next_dummy: u32,
}

impl Allocator {
    fn event(&mut self, graph: &mut PrecedenceGraph) -> NodeId {
        let node = graph.add_node(NodeLabel::Event(self.next_event), 0.0);
        self.next_event += 1;
        node
    }

    fn dummy(&mut self) -> ArcLabel {
        let label = ArcLabel::Dummy(self.next_dummy);
        self.next_dummy += 1;
        label
    }
}

/// Each task becomes one arc between two events.
///
/// A task without predecessors starts at START, otherwise at a fresh event;
/// a task without successors ends at END, otherwise at a fresh event.
/// Dependencies are then wired with zero-weight dummy arcs from the
/// predecessor's end event to the task's start event, at most one per
/// ordered event pair.
pub(super) fn encode(
    durations: &[f64],
    predecessors: &[Vec<TaskId>],
    successors: &[Vec<TaskId>],
) -> Encoded {
    let mut graph = PrecedenceGraph::with_capacity(2 * durations.len() + 2);
    let start = graph.add_node(NodeLabel::Start, 0.0);
    let end = graph.add_node(NodeLabel::End, 0.0);
    let mut alloc = Allocator::default();

    let mut tails: Vec<NodeId> = Vec::with_capacity(durations.len());
    let mut heads: Vec<NodeId> = Vec::with_capacity(durations.len());
    for task in 0..durations.len() {
        let tail = if predecessors[task].is_empty() {
            start
        } else {
            alloc.event(&mut graph)
        };
        let head = if successors[task].is_empty() {
            end
        } else {
            alloc.event(&mut graph)
        };
        tails.push(tail);
        heads.push(head);
    }

    for (task, &duration) in durations.iter().enumerate() {
        graph.add_arc(
            tails[task],
            heads[task],
            ArcLabel::Task(task as TaskId),
            duration,
        );
    }

    let mut linked: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
    for (task, preds) in predecessors.iter().enumerate() {
        let tail = tails[task];
        for &pred in preds {
            let pred_head = heads[pred as usize];
            if pred_head != tail && linked.insert((pred_head, tail)) {
                let label = alloc.dummy();
                graph.add_arc(pred_head, tail, label, 0.0);
            }
        }
    }

    let anchors = tails
        .into_iter()
        .zip(heads)
        .map(|(tail, head)| TaskAnchor::Arc { tail, head })
        .collect();

    Encoded {
        graph,
        anchors,
        terminals: Some((start, end)),
        dummy_count: alloc.next_dummy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_tasks_share_terminals() {
        let encoded = encode(&[2.0, 3.0], &[vec![], vec![]], &[vec![], vec![]]);
        let (start, end) = encoded.terminals.unwrap();
        assert_eq!(encoded.graph.node_count(), 2);
        assert_eq!(
            encoded.anchors,
            vec![
                TaskAnchor::Arc { tail: start, head: end },
                TaskAnchor::Arc { tail: start, head: end },
            ]
        );
        // Parallel arcs are kept, one per task.
        assert_eq!(encoded.graph.successors(start).len(), 2);
        assert_eq!(encoded.dummy_count, 0);
    }

    #[test]
    fn test_chain_uses_one_dummy_per_link() {
        // a -> b -> c
        let preds = vec![vec![], vec![0], vec![1]];
        let succs = vec![vec![1], vec![2], vec![]];
        let encoded = encode(&[1.0, 2.0, 3.0], &preds, &succs);

        // START, END, a.end, b.start, b.end, c.start
        assert_eq!(encoded.graph.node_count(), 6);
        assert_eq!(encoded.dummy_count, 2);
        let dummies: Vec<(NodeId, NodeId)> = encoded
            .graph
            .arcs()
            .filter(|(_, arc)| matches!(arc.label, ArcLabel::Dummy(_)))
            .map(|(from, arc)| (from, arc.to))
            .collect();
        assert_eq!(dummies, vec![(2, 3), (4, 5)]);
    }

    #[test]
    fn test_repeated_dependency_adds_one_dummy() {
        // b lists a twice.
        let encoded = encode(&[1.0, 1.0], &[vec![], vec![0, 0]], &[vec![1, 1], vec![]]);
        assert_eq!(encoded.dummy_count, 1);

        let (start, end) = encoded.terminals.unwrap();
        assert_eq!(
            encoded.anchors,
            vec![
                TaskAnchor::Arc { tail: start, head: 2 },
                TaskAnchor::Arc { tail: 3, head: end },
            ]
        );
        let links = encoded
            .graph
            .arcs()
            .filter(|&(from, arc)| (from, arc.to) == (2, 3))
            .count();
        assert_eq!(links, 1);
    }

    #[test]
    fn test_event_numbering_restarts_per_call() {
        let preds = vec![vec![], vec![0]];
        let succs = vec![vec![1], vec![]];
        let first = encode(&[1.0, 1.0], &preds, &succs);
        let second = encode(&[1.0, 1.0], &preds, &succs);
        assert_eq!(first.graph.label(2), NodeLabel::Event(0));
        assert_eq!(second.graph.label(2), NodeLabel::Event(0));
    }
}
