//! Arena-backed weighted DAG shared by both network encodings.

use std::collections::VecDeque;

use crate::error::{CpmError, CpmResult};
use crate::interner::TaskId;

/// Index of a node in the graph arena.
pub type NodeId = u32;

/// What a graph node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    /// A task node (activity-on-node).
    Task(TaskId),
    /// Project start event (activity-on-arc).
    Start,
    /// Project end event (activity-on-arc).
    End,
    /// Intermediate event allocated during the build.
    Event(u32),
}

/// What an arc stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArcLabel {
    /// Direct precedence edge between two task nodes.
    Precedence,
    /// Real activity arc.
    Task(TaskId),
    /// Zero-duration dummy arc with its build-scoped id.
    Dummy(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub to: NodeId,
    pub label: ArcLabel,
    /// Time that must elapse between the two endpoints.
    pub weight: f64,
}

/// Directed graph stored as index lists.
///
/// `exit` is the time a node still needs after its own time before the project
/// can finish: a task's duration for task nodes, zero for events.
#[derive(Clone, Debug, Default)]
pub struct PrecedenceGraph {
    labels: Vec<NodeLabel>,
    successors: Vec<Vec<Arc>>,
    exit: Vec<f64>,
    arc_count: usize,
}

impl PrecedenceGraph {
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            labels: Vec::with_capacity(nodes),
            successors: Vec::with_capacity(nodes),
            exit: Vec::with_capacity(nodes),
            arc_count: 0,
        }
    }

    pub fn add_node(&mut self, label: NodeLabel, exit: f64) -> NodeId {
        let id = self.labels.len() as NodeId;
        self.labels.push(label);
        self.successors.push(Vec::new());
        self.exit.push(exit);
        id
    }

    pub fn add_arc(&mut self, from: NodeId, to: NodeId, label: ArcLabel, weight: f64) {
        self.successors[from as usize].push(Arc { to, label, weight });
        self.arc_count += 1;
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    #[inline]
    pub fn label(&self, node: NodeId) -> NodeLabel {
        self.labels[node as usize]
    }

    #[inline]
    pub fn successors(&self, node: NodeId) -> &[Arc] {
        &self.successors[node as usize]
    }

    #[inline]
    pub fn exit(&self, node: NodeId) -> f64 {
        self.exit[node as usize]
    }

    /// Iterate over every arc as (from, arc).
    pub fn arcs(&self) -> impl Iterator<Item = (NodeId, &Arc)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(from, arcs)| arcs.iter().map(move |arc| (from as NodeId, arc)))
    }

    /// Reverse adjacency: for each node, its (predecessor, weight) pairs.
    pub fn predecessors(&self) -> Vec<Vec<(NodeId, f64)>> {
        let mut reverse = vec![Vec::new(); self.node_count()];
        for (from, arc) in self.arcs() {
            reverse[arc.to as usize].push((from, arc.weight));
        }
        reverse
    }

    /// Topological order using Kahn's algorithm.
    ///
    /// Fails with `CyclicDependency` when some node is never released.
    pub fn topological_order(&self) -> CpmResult<Vec<NodeId>> {
        let n = self.node_count();
        let mut in_degree = vec![0usize; n];
        for (_, arc) in self.arcs() {
            in_degree[arc.to as usize] += 1;
        }

        let mut queue: VecDeque<NodeId> = (0..n as NodeId)
            .filter(|&node| in_degree[node as usize] == 0)
            .collect();
        let mut order = Vec::with_capacity(n);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for arc in self.successors(node) {
                let degree = &mut in_degree[arc.to as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(arc.to);
                }
            }
        }

        if order.len() != n {
            return Err(CpmError::CyclicDependency {
                visited: order.len(),
                total: n,
            });
        }
        Ok(order)
    }

    /// Reverse topological order, released from the sinks.
    pub fn reverse_topological_order(
        &self,
        predecessors: &[Vec<(NodeId, f64)>],
    ) -> CpmResult<Vec<NodeId>> {
        let n = self.node_count();
        let mut out_degree: Vec<usize> = self.successors.iter().map(|s| s.len()).collect();

        let mut queue: VecDeque<NodeId> = (0..n as NodeId)
            .filter(|&node| out_degree[node as usize] == 0)
            .collect();
        let mut order = Vec::with_capacity(n);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &(pred, _) in &predecessors[node as usize] {
                let degree = &mut out_degree[pred as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(pred);
                }
            }
        }

        if order.len() != n {
            return Err(CpmError::CyclicDependency {
                visited: order.len(),
                total: n,
            });
        }
        Ok(order)
    }
}
