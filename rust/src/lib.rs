//! Critical Path Method scheduling engine.
//!
//! Tasks with durations and predecessor sets are registered in a
//! [`TaskRegistry`], compiled into either an activity-on-node or an
//! activity-on-arc [`Network`], and propagated forward and backward to obtain
//! earliest/latest times, slack and the critical path. A greedy list scheduler
//! then places tasks on identical parallel machines.
//!
//! ```
//! use cpm_rust::{CpmConfig, CpmEngine, NetworkKind, TaskRegistry};
//!
//! let mut registry = TaskRegistry::new();
//! registry.add_task("A", 3.0, &[]).unwrap();
//! registry.add_task("B", 2.0, &["A"]).unwrap();
//! registry.add_task("C", 4.0, &["A"]).unwrap();
//! registry.add_task("D", 1.0, &["B", "C"]).unwrap();
//!
//! let config = CpmConfig::default().with_kind(NetworkKind::OnArc).with_machines(2);
//! let report = CpmEngine::new(config).run(&registry).unwrap();
//! assert_eq!(report.makespan, 8.0);
//! assert_eq!(report.critical_path, vec!["A", "C", "D"]);
//! ```

#[macro_use]
pub mod logging;

pub mod backward_pass;
pub mod calendar;
mod config;
pub mod critical_path;
mod engine;
mod error;
pub mod forward_pass;
mod interner;
mod models;
pub mod network;
mod registry;
pub mod scheduler;
pub mod sorting;

#[cfg(feature = "python")]
mod python;

pub use backward_pass::{backward_pass, Timings};
pub use calendar::{project_schedule, DatedAssignment};
pub use config::CpmConfig;
pub use critical_path::{critical_chains, extract_critical_path};
pub use engine::{CpmEngine, CpmReport};
pub use error::{CpmError, CpmResult};
pub use forward_pass::{forward_pass, EarliestTimes};
pub use interner::{TaskId, TaskIndex};
pub use models::{Task, TaskReport, TaskTiming, TIME_EPSILON};
pub use network::{Network, NetworkBuilder, NetworkKind, NetworkShape, NetworkSummary};
pub use registry::TaskRegistry;
pub use scheduler::{Assignment, MachineScheduler, MachineTimeline, Schedule};
