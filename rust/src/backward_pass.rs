//! Backward pass: latest start/finish times and slack.

use crate::error::CpmResult;
use crate::forward_pass::EarliestTimes;
use crate::interner::{TaskId, TaskIndex};
use crate::models::{TaskReport, TaskTiming, TIME_EPSILON};
use crate::network::{Network, NetworkShape, TaskAnchor};
use crate::{log_phase, log_trace};

/// Complete CPM timing table for one network.
#[derive(Clone, Debug)]
pub struct Timings<'r> {
    index: TaskIndex<'r>,
    durations: Vec<f64>,
    timings: Vec<TaskTiming>,
    makespan: f64,
    shape: NetworkShape,
}

impl<'r> Timings<'r> {
    pub fn makespan(&self) -> f64 {
        self.makespan
    }

    /// The network this table was computed on.
    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&TaskTiming> {
        self.index
            .get(task_id)
            .map(|task| &self.timings[task as usize])
    }

    #[inline]
    pub fn by_index(&self, task: TaskId) -> &TaskTiming {
        &self.timings[task as usize]
    }

    pub fn duration(&self, task: TaskId) -> f64 {
        self.durations[task as usize]
    }

    /// (task id, timing) in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'r str, &TaskTiming)> + '_ {
        self.timings
            .iter()
            .enumerate()
            .filter_map(|(task, timing)| Some((self.index.resolve(task as TaskId)?, timing)))
    }

    /// True when both tables cover the same tasks with matching times.
    pub fn agrees_with(&self, other: &Timings<'_>, tolerance: f64) -> bool {
        if self.len() != other.len() || (self.makespan - other.makespan).abs() > tolerance {
            return false;
        }
        self.iter().all(|(id, timing)| {
            other
                .get(id)
                .is_some_and(|theirs| timing.approx_eq(theirs, tolerance))
        })
    }

    /// Owned per-task output records in registration order.
    pub fn reports(&self) -> Vec<TaskReport> {
        self.iter()
            .enumerate()
            .map(|(task, (id, timing))| TaskReport {
                id: id.to_string(),
                duration: self.durations[task],
                timing: *timing,
                critical: timing.is_critical(),
            })
            .collect()
    }
}

/// Run the backward pass seeded with the forward pass makespan.
///
/// Nodes are released from the sinks in reverse Kahn order. Sinks take
/// `makespan - exit`, every other node the minimum of `successor - weight`
/// over its outgoing arcs. A task's latest finish is read from its node plus
/// duration (activity-on-node) or from its head event (activity-on-arc), and
/// its latest start is latest finish minus duration.
///
/// # Errors
/// * `NetworkMismatch` if `earliest` was computed on a different network
/// * `CyclicDependency` if some node is never released
pub fn backward_pass<'r>(
    network: &Network<'r>,
    earliest: &EarliestTimes,
    verbosity: u8,
) -> CpmResult<Timings<'r>> {
    network.ensure_shape(earliest.shape())?;

    let graph = network.graph();
    let makespan = earliest.makespan();
    let predecessors = graph.predecessors();
    let order = graph.reverse_topological_order(&predecessors)?;

    let mut latest = vec![f64::INFINITY; graph.node_count()];
    for &node in &order {
        if graph.successors(node).is_empty() {
            latest[node as usize] = makespan - graph.exit(node);
        }
        let time = latest[node as usize];
        for &(pred, weight) in &predecessors[node as usize] {
            let candidate = time - weight;
            if candidate < latest[pred as usize] {
                log_trace!(
                    verbosity,
                    "    Backward {} <- {}: {}",
                    network.node_name(pred),
                    network.node_name(node),
                    candidate
                );
                latest[pred as usize] = candidate;
            }
        }
    }

    let n = network.task_count();
    let mut timings = Vec::with_capacity(n);
    let mut durations = Vec::with_capacity(n);
    for task in 0..n as TaskId {
        let duration = network.duration(task);
        let latest_finish = match network.anchor(task) {
            TaskAnchor::Node(node) => latest[node as usize] + duration,
            TaskAnchor::Arc { head, .. } => latest[head as usize],
        };
        let earliest_start = earliest.earliest_start(task);
        let latest_start = latest_finish - duration;
        let mut slack = latest_start - earliest_start;
        if slack.abs() < TIME_EPSILON {
            slack = 0.0;
        }
        timings.push(TaskTiming {
            earliest_start,
            earliest_finish: earliest.earliest_finish(task),
            latest_start,
            latest_finish,
            slack,
        });
        durations.push(duration);
    }

    log_phase!(
        verbosity,
        "Backward pass over {} nodes from makespan {}",
        order.len(),
        makespan
    );

    Ok(Timings {
        index: network.index().clone(),
        durations,
        timings,
        makespan,
        shape: network.shape(),
    })
}
