//! Greedy assignment of tasks to identical parallel machines.
//!
//! Runs after the forward pass: each task becomes ready at its earliest start
//! and occupies one machine for its duration.

mod core;
mod machine;

pub use core::{MachineScheduler, Schedule};
pub use machine::{Assignment, MachineTimeline};
