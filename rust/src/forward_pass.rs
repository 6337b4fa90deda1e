//! Forward pass: earliest start/finish times and the project makespan.

use crate::error::CpmResult;
use crate::interner::TaskId;
use crate::network::{Network, NetworkShape, TaskAnchor};
use crate::{log_phase, log_trace};

/// Output of the forward pass.
#[derive(Clone, Debug, PartialEq)]
pub struct EarliestTimes {
    /// Earliest time per graph node (task start for task nodes, event time for events).
    node_times: Vec<f64>,
    /// Earliest start per task, indexed by task id.
    starts: Vec<f64>,
    /// Earliest finish per task, indexed by task id.
    finishes: Vec<f64>,
    makespan: f64,
    shape: NetworkShape,
}

impl EarliestTimes {
    pub fn makespan(&self) -> f64 {
        self.makespan
    }

    #[inline]
    pub fn earliest_start(&self, task: TaskId) -> f64 {
        self.starts[task as usize]
    }

    #[inline]
    pub fn earliest_finish(&self, task: TaskId) -> f64 {
        self.finishes[task as usize]
    }

    pub fn node_time(&self, node: u32) -> f64 {
        self.node_times[node as usize]
    }

    pub fn task_count(&self) -> usize {
        self.starts.len()
    }

    /// The network these times were computed on.
    pub fn shape(&self) -> NetworkShape {
        self.shape
    }
}

/// Run the forward pass over a built network.
///
/// Nodes are released in Kahn order; each arc relaxes its head to
/// `max(head, tail + weight)`. A task's earliest start is read from its node
/// (activity-on-node) or its tail event (activity-on-arc), and its earliest
/// finish is start plus duration.
///
/// The makespan is the largest earliest finish for activity-on-node networks
/// and the END event time for activity-on-arc networks.
///
/// # Errors
/// * `CyclicDependency` if some node is never released (the builder already
///   rejects cyclic registries, so this only guards the invariant)
pub fn forward_pass(network: &Network<'_>, verbosity: u8) -> CpmResult<EarliestTimes> {
    let graph = network.graph();
    let order = graph.topological_order()?;

    let mut node_times = vec![0.0_f64; graph.node_count()];
    for &node in &order {
        let time = node_times[node as usize];
        for arc in graph.successors(node) {
            let candidate = time + arc.weight;
            let head = &mut node_times[arc.to as usize];
            if candidate > *head {
                log_trace!(
                    verbosity,
                    "    Forward {} -> {}: {} -> {}",
                    network.node_name(node),
                    network.node_name(arc.to),
                    *head,
                    candidate
                );
                *head = candidate;
            }
        }
    }

    let n = network.task_count();
    let mut starts = Vec::with_capacity(n);
    let mut finishes = Vec::with_capacity(n);
    for task in 0..n as TaskId {
        let start = match network.anchor(task) {
            TaskAnchor::Node(node) => node_times[node as usize],
            TaskAnchor::Arc { tail, .. } => node_times[tail as usize],
        };
        starts.push(start);
        finishes.push(start + network.duration(task));
    }

    let makespan = match network.terminals() {
        Some((_, end)) => node_times[end as usize],
        None => finishes.iter().copied().fold(0.0, f64::max),
    };

    log_phase!(
        verbosity,
        "Forward pass over {} nodes: makespan {}",
        order.len(),
        makespan
    );

    Ok(EarliestTimes {
        node_times,
        starts,
        finishes,
        makespan,
        shape: network.shape(),
    })
}
