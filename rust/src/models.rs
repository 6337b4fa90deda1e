//! Core data types for the CPM engine.

/// A task definition as registered, before any network exists.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: String,
    pub duration: f64,
    /// Predecessor ids; order is irrelevant and duplicates collapse at build time.
    pub predecessors: Vec<String>,
}

impl Task {
    pub fn new(id: &str, duration: f64, predecessors: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            duration,
            predecessors: predecessors.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Computed CPM times for one task.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    pub slack: f64,
}

/// Tolerance used for every time comparison in the engine.
pub const TIME_EPSILON: f64 = 1e-9;

impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        self.slack.abs() < TIME_EPSILON
    }

    /// True when every field matches `other` within `tolerance`.
    pub fn approx_eq(&self, other: &TaskTiming, tolerance: f64) -> bool {
        (self.earliest_start - other.earliest_start).abs() <= tolerance
            && (self.earliest_finish - other.earliest_finish).abs() <= tolerance
            && (self.latest_start - other.latest_start).abs() <= tolerance
            && (self.latest_finish - other.latest_finish).abs() <= tolerance
            && (self.slack - other.slack).abs() <= tolerance
    }
}

/// Per-task output record.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskReport {
    pub id: String,
    pub duration: f64,
    pub timing: TaskTiming,
    pub critical: bool,
}
