//! Precedence networks in activity-on-node and activity-on-arc form.
//!
//! Both encodings are lowered onto the same [`PrecedenceGraph`] arena so the
//! forward and backward passes run one routine for either kind. Where a task's
//! times live in that arena is recorded per task as a [`TaskAnchor`].

mod builder;
mod graph;
mod on_arc;
mod on_node;

use std::fmt;

use crate::error::{CpmError, CpmResult};
use crate::interner::{TaskId, TaskIndex};
use crate::models::Task;

pub use builder::NetworkBuilder;
pub use graph::{Arc, ArcLabel, NodeId, NodeLabel, PrecedenceGraph};

/// Network encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetworkKind {
    /// Activity-on-node: tasks are nodes, edges are direct dependencies.
    OnNode,
    /// Activity-on-arc: tasks are arcs between events, linked by dummy arcs.
    OnArc,
}

impl NetworkKind {
    /// Short code ("AN" / "AA") accepted by `from_code`.
    pub fn code(&self) -> &'static str {
        match self {
            NetworkKind::OnNode => "AN",
            NetworkKind::OnArc => "AA",
        }
    }

    /// Parse "AN"/"AA" (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "AN" => Some(NetworkKind::OnNode),
            "AA" => Some(NetworkKind::OnArc),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkKind::OnNode => write!(f, "activity-on-node"),
            NetworkKind::OnArc => write!(f, "activity-on-arc"),
        }
    }
}

/// Where a task's times are read from in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskAnchor {
    /// Node time is the task's start time.
    Node(NodeId),
    /// Tail event carries the start time, head event the finish time.
    Arc { tail: NodeId, head: NodeId },
}

/// Activity carried by an activity-on-arc arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity<'r> {
    Task(&'r str),
    Dummy(u32),
}

impl fmt::Display for Activity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Task(id) => write!(f, "{}", id),
            Activity::Dummy(n) => write!(f, "DUMMY_{}", n),
        }
    }
}

/// Arc of an activity-on-arc network, resolved to names.
#[derive(Clone, Debug, PartialEq)]
pub struct EventArc<'r> {
    pub from: NodeId,
    pub to: NodeId,
    pub activity: Activity<'r>,
    pub duration: f64,
}

impl EventArc<'_> {
    pub fn is_dummy(&self) -> bool {
        matches!(self.activity, Activity::Dummy(_))
    }
}

/// Counts describing a built network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSummary {
    pub kind: NetworkKind,
    pub tasks: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Events including START and END (activity-on-arc only, else 0).
    pub events: usize,
    pub dummy_arcs: usize,
}

/// Encoding and sizes identifying which network a pass result belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkShape {
    pub kind: NetworkKind,
    pub tasks: usize,
    pub nodes: usize,
}

impl fmt::Display for NetworkShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} network with {} tasks and {} nodes",
            self.kind, self.tasks, self.nodes
        )
    }
}

/// Graph produced by one of the encoders.
pub(crate) struct Encoded {
    pub graph: PrecedenceGraph,
    pub anchors: Vec<TaskAnchor>,
    /// START and END events (activity-on-arc only).
    pub terminals: Option<(NodeId, NodeId)>,
    pub dummy_count: u32,
}

/// A built, acyclic precedence network.
///
/// Borrows the registry it was built from; the registry stays frozen for as
/// long as the network lives.
#[derive(Clone, Debug)]
pub struct Network<'r> {
    kind: NetworkKind,
    index: TaskIndex<'r>,
    tasks: Vec<&'r Task>,
    /// Deduplicated predecessor ids per task.
    predecessors: Vec<Vec<TaskId>>,
    /// Successor ids per task, in registration order.
    successors: Vec<Vec<TaskId>>,
    graph: PrecedenceGraph,
    anchors: Vec<TaskAnchor>,
    terminals: Option<(NodeId, NodeId)>,
    dummy_count: u32,
}

impl<'r> Network<'r> {
    pub(crate) fn new(
        kind: NetworkKind,
        index: TaskIndex<'r>,
        tasks: Vec<&'r Task>,
        predecessors: Vec<Vec<TaskId>>,
        successors: Vec<Vec<TaskId>>,
        encoded: Encoded,
    ) -> Self {
        Self {
            kind,
            index,
            tasks,
            predecessors,
            successors,
            graph: encoded.graph,
            anchors: encoded.anchors,
            terminals: encoded.terminals,
            dummy_count: encoded.dummy_count,
        }
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn index(&self) -> &TaskIndex<'r> {
        &self.index
    }

    pub fn task(&self, id: &str) -> Option<&'r Task> {
        self.index.get(id).map(|t| self.tasks[t as usize])
    }

    /// Task ids in arena order (registration order).
    pub fn task_ids(&self) -> impl Iterator<Item = &'r str> + '_ {
        self.tasks.iter().map(|t| t.id.as_str())
    }

    #[inline]
    pub fn duration(&self, task: TaskId) -> f64 {
        self.tasks[task as usize].duration
    }

    pub fn graph(&self) -> &PrecedenceGraph {
        &self.graph
    }

    #[inline]
    pub fn anchor(&self, task: TaskId) -> TaskAnchor {
        self.anchors[task as usize]
    }

    /// START and END events of an activity-on-arc network.
    pub fn terminals(&self) -> Option<(NodeId, NodeId)> {
        self.terminals
    }

    pub(crate) fn task_predecessors(&self, task: TaskId) -> &[TaskId] {
        &self.predecessors[task as usize]
    }

    pub(crate) fn task_successors(&self, task: TaskId) -> &[TaskId] {
        &self.successors[task as usize]
    }

    fn require(&self, kind: NetworkKind, operation: &'static str) -> CpmResult<()> {
        if self.kind != kind {
            return Err(CpmError::WrongGraphEncodingForOperation {
                operation,
                actual: self.kind,
            });
        }
        Ok(())
    }

    /// Direct successors of a task node (activity-on-node only).
    pub fn successors(&self, task_id: &str) -> CpmResult<Vec<&'r str>> {
        self.require(NetworkKind::OnNode, "successors")?;
        let task = self
            .index
            .get(task_id)
            .ok_or_else(|| CpmError::UnknownTask(task_id.to_string()))?;
        let TaskAnchor::Node(node) = self.anchor(task) else {
            return Ok(Vec::new());
        };
        Ok(self
            .graph
            .successors(node)
            .iter()
            .filter_map(|arc| match self.graph.label(arc.to) {
                NodeLabel::Task(t) => self.index.resolve(t),
                _ => None,
            })
            .collect())
    }

    /// All arcs, real and dummy, in event order (activity-on-arc only).
    pub fn arcs(&self) -> CpmResult<Vec<EventArc<'r>>> {
        self.require(NetworkKind::OnArc, "arcs")?;
        Ok(self
            .graph
            .arcs()
            .filter_map(|(from, arc)| {
                let activity = match arc.label {
                    ArcLabel::Task(t) => Activity::Task(self.index.resolve(t)?),
                    ArcLabel::Dummy(n) => Activity::Dummy(n),
                    ArcLabel::Precedence => return None,
                };
                Some(EventArc {
                    from,
                    to: arc.to,
                    activity,
                    duration: arc.weight,
                })
            })
            .collect())
    }

    /// Only the zero-duration dummy arcs (activity-on-arc only).
    pub fn dummy_arcs(&self) -> CpmResult<Vec<EventArc<'r>>> {
        self.require(NetworkKind::OnArc, "dummy_arcs")?;
        Ok(self.arcs()?.into_iter().filter(|a| a.is_dummy()).collect())
    }

    /// Human-readable node name: task id, START, END or N<k>.
    pub fn node_name(&self, node: NodeId) -> String {
        match self.graph.label(node) {
            NodeLabel::Task(t) => self.index.resolve(t).unwrap_or("?").to_string(),
            NodeLabel::Start => "START".to_string(),
            NodeLabel::End => "END".to_string(),
            NodeLabel::Event(n) => format!("N{}", n),
        }
    }

    pub fn shape(&self) -> NetworkShape {
        NetworkShape {
            kind: self.kind,
            tasks: self.tasks.len(),
            nodes: self.graph.node_count(),
        }
    }

    /// Reject pass results computed on a different network.
    pub(crate) fn ensure_shape(&self, found: NetworkShape) -> CpmResult<()> {
        let expected = self.shape();
        if found != expected {
            return Err(CpmError::NetworkMismatch { expected, found });
        }
        Ok(())
    }

    pub fn summary(&self) -> NetworkSummary {
        let events = match self.kind {
            NetworkKind::OnNode => 0,
            NetworkKind::OnArc => self.graph.node_count(),
        };
        NetworkSummary {
            kind: self.kind,
            tasks: self.tasks.len(),
            nodes: self.graph.node_count(),
            edges: self.graph.arc_count(),
            events,
            dummy_arcs: self.dummy_count as usize,
        }
    }
}
