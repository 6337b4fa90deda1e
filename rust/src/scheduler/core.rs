//! Greedy list scheduler over identical parallel machines.

use crate::backward_pass::Timings;
use crate::error::{CpmError, CpmResult};
use crate::forward_pass::EarliestTimes;
use crate::interner::TaskId;
use crate::logging::VERBOSITY_SILENT;
use crate::network::{Network, NetworkShape};
use crate::sorting::{sort_by_start, StartKey};
use crate::{log_decision, log_phase};

use super::machine::{Assignment, MachineTimeline};

/// Result of machine scheduling: one timeline per machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    machines: Vec<MachineTimeline>,
    shape: NetworkShape,
}

impl Schedule {
    /// The network this schedule was built from.
    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    pub fn machines(&self) -> &[MachineTimeline] {
        &self.machines
    }

    pub fn machine(&self, index: usize) -> Option<&MachineTimeline> {
        self.machines.get(index)
    }

    /// Latest end over all machines. Exceeds the CPM makespan when
    /// machines are the bottleneck.
    pub fn completion_time(&self) -> f64 {
        self.machines
            .iter()
            .map(MachineTimeline::free_at)
            .fold(0.0, f64::max)
    }

    /// Locate a task: (machine index, assignment).
    pub fn find(&self, task_id: &str) -> Option<(usize, &Assignment)> {
        self.machines.iter().enumerate().find_map(|(index, machine)| {
            machine
                .assignments()
                .iter()
                .find(|a| a.task_id == task_id)
                .map(|a| (index, a))
        })
    }

    /// Flag assignments of zero-slack tasks.
    ///
    /// `timings` must come from the backward pass over the network this
    /// schedule was built from.
    ///
    /// # Errors
    /// * `NetworkMismatch` if `timings` belongs to a different network
    /// * `UnknownTask` if an assigned task has no timing
    pub fn mark_critical(&mut self, timings: &Timings<'_>) -> CpmResult<()> {
        if timings.shape() != self.shape {
            return Err(CpmError::NetworkMismatch {
                expected: self.shape,
                found: timings.shape(),
            });
        }
        let missing = self
            .machines
            .iter()
            .flat_map(|machine| machine.assignments())
            .find(|a| timings.get(&a.task_id).is_none());
        if let Some(assignment) = missing {
            return Err(CpmError::UnknownTask(assignment.task_id.clone()));
        }
        for machine in &mut self.machines {
            machine.mark_critical(timings);
        }
        Ok(())
    }
}

/// Assigns tasks, in (earliest start, id) order, to the machine where they can
/// start soonest.
///
/// This is a list-scheduling heuristic: it ignores slack, does not revisit
/// earlier choices and does not delay successors when a task is pushed back by
/// machine availability.
#[derive(Clone, Debug)]
pub struct MachineScheduler {
    machines: usize,
    verbosity: u8,
}

impl MachineScheduler {
    /// # Errors
    /// * `InvalidMachineCount` if `machines` is 0
    pub fn new(machines: usize) -> CpmResult<Self> {
        if machines < 1 {
            return Err(CpmError::InvalidMachineCount(0));
        }
        Ok(Self {
            machines,
            verbosity: VERBOSITY_SILENT,
        })
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn machines(&self) -> usize {
        self.machines
    }

    /// Validate a signed machine count coming from an untyped caller.
    ///
    /// # Errors
    /// * `InvalidMachineCount` if `machines` is below 1
    pub fn machine_count(machines: i64) -> CpmResult<usize> {
        match usize::try_from(machines) {
            Ok(count) if count >= 1 => Ok(count),
            _ => Err(CpmError::InvalidMachineCount(machines)),
        }
    }

    /// Schedule every task of `network` using forward pass start times.
    ///
    /// # Errors
    /// * `NetworkMismatch` if `earliest` was computed on a different network
    pub fn schedule(
        &self,
        network: &Network<'_>,
        earliest: &EarliestTimes,
    ) -> CpmResult<Schedule> {
        network.ensure_shape(earliest.shape())?;

        let index = network.index();
        let mut order: Vec<TaskId> = (0..network.task_count() as TaskId).collect();
        sort_by_start(&mut order, |&task| StartKey {
            earliest_start: earliest.earliest_start(task),
            task_id: index.resolve(task).unwrap_or(""),
        });

        let mut timelines = vec![MachineTimeline::new(); self.machines];
        for task in order {
            let ready = earliest.earliest_start(task);
            let mut best = 0;
            let mut best_start = timelines[0].candidate_start(ready);
            for (machine, timeline) in timelines.iter().enumerate().skip(1) {
                let candidate = timeline.candidate_start(ready);
                if candidate < best_start {
                    best = machine;
                    best_start = candidate;
                }
            }

            let task_id = index.resolve(task).unwrap_or("");
            let placed = timelines[best].assign(task_id, best_start, network.duration(task));
            log_decision!(
                self.verbosity,
                "  Assign {} -> machine {} [{}, {}] (ready {})",
                task_id,
                best,
                placed.start,
                placed.end,
                ready
            );
        }

        let schedule = Schedule {
            machines: timelines,
            shape: network.shape(),
        };
        log_phase!(
            self.verbosity,
            "Scheduled {} tasks on {} machines, completion {}",
            network.task_count(),
            self.machines,
            schedule.completion_time()
        );
        Ok(schedule)
    }
}
