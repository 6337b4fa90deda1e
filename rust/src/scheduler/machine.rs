//! Per-machine timeline of assigned tasks.

use crate::backward_pass::Timings;
use crate::models::TIME_EPSILON;

/// A task placed on a machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub task_id: String,
    pub start: f64,
    pub end: f64,
    /// Set after scheduling from the backward pass; the scheduler itself ignores slack.
    pub critical: bool,
}

/// Tracks one machine's assignments in start order.
///
/// Invariant: assignments are sorted by start and never overlap, because each
/// new task starts no earlier than `free_at`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MachineTimeline {
    free_at: f64,
    assignments: Vec<Assignment>,
}

impl MachineTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time at which the machine finishes its last assignment.
    pub fn free_at(&self) -> f64 {
        self.free_at
    }

    /// Earliest start on this machine for a task ready at `ready`.
    #[inline]
    pub fn candidate_start(&self, ready: f64) -> f64 {
        ready.max(self.free_at)
    }

    /// Append a task starting at `start` (clamped to the machine's free time).
    pub fn assign(&mut self, task_id: &str, start: f64, duration: f64) -> &Assignment {
        let start = self.candidate_start(start);
        let end = start + duration;
        self.free_at = end;
        self.assignments.push(Assignment {
            task_id: task_id.to_string(),
            start,
            end,
            critical: false,
        });
        &self.assignments[self.assignments.len() - 1]
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Total time spent executing tasks.
    pub fn busy_time(&self) -> f64 {
        self.assignments.iter().map(|a| a.end - a.start).sum()
    }

    /// True if no two assignments overlap.
    pub fn is_disjoint(&self) -> bool {
        self.assignments
            .windows(2)
            .all(|pair| pair[0].end <= pair[1].start + TIME_EPSILON)
    }

    pub(crate) fn mark_critical(&mut self, timings: &Timings<'_>) {
        for assignment in &mut self.assignments {
            assignment.critical = timings
                .get(&assignment.task_id)
                .is_some_and(|t| t.is_critical());
        }
    }
}
