//! PyO3 bindings exposing the engine as the `cpm_rust.rust` module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::calendar::DatedAssignment;
use crate::config::CpmConfig;
use crate::engine::{CpmEngine, CpmReport};
use crate::error::CpmError;
use crate::models::{Task, TaskReport};
use crate::network::NetworkKind;
use crate::registry::TaskRegistry;
use crate::scheduler::{Assignment, MachineScheduler};

fn to_py_err(e: CpmError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Task input record.
#[pyclass(name = "Task")]
#[derive(Clone, Debug)]
pub struct PyTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
}

#[pymethods]
impl PyTask {
    #[new]
    #[pyo3(signature = (id, duration, predecessors=Vec::new()))]
    fn new(id: String, duration: f64, predecessors: Vec<String>) -> Self {
        Self {
            id,
            duration,
            predecessors,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, duration={}, predecessors={:?})",
            self.id, self.duration, self.predecessors
        )
    }
}

impl From<PyTask> for Task {
    fn from(task: PyTask) -> Self {
        Task {
            id: task.id,
            duration: task.duration,
            predecessors: task.predecessors,
        }
    }
}

/// Computed timing for one task.
#[pyclass(name = "TaskResult")]
#[derive(Clone, Debug)]
pub struct PyTaskResult {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub es: f64,
    #[pyo3(get)]
    pub ef: f64,
    #[pyo3(get)]
    pub ls: f64,
    #[pyo3(get)]
    pub lf: f64,
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl PyTaskResult {
    fn __repr__(&self) -> String {
        format!(
            "TaskResult(id={:?}, es={}, ef={}, ls={}, lf={}, slack={})",
            self.id, self.es, self.ef, self.ls, self.lf, self.slack
        )
    }
}

impl From<&TaskReport> for PyTaskResult {
    fn from(report: &TaskReport) -> Self {
        Self {
            id: report.id.clone(),
            duration: report.duration,
            es: report.timing.earliest_start,
            ef: report.timing.earliest_finish,
            ls: report.timing.latest_start,
            lf: report.timing.latest_finish,
            slack: report.timing.slack,
            critical: report.critical,
        }
    }
}

/// A task placed on a machine, with optional calendar dates.
#[pyclass(name = "Assignment")]
#[derive(Clone, Debug)]
pub struct PyAssignment {
    #[pyo3(get)]
    pub task_id: String,
    #[pyo3(get)]
    pub machine: usize,
    #[pyo3(get)]
    pub start: f64,
    #[pyo3(get)]
    pub end: f64,
    #[pyo3(get)]
    pub critical: bool,
    #[pyo3(get)]
    pub start_date: Option<NaiveDate>,
    #[pyo3(get)]
    pub end_date: Option<NaiveDate>,
}

#[pymethods]
impl PyAssignment {
    fn __repr__(&self) -> String {
        format!(
            "Assignment(task_id={:?}, machine={}, start={}, end={})",
            self.task_id, self.machine, self.start, self.end
        )
    }
}

impl PyAssignment {
    fn new(machine: usize, assignment: &Assignment, dated: Option<&DatedAssignment>) -> Self {
        Self {
            task_id: assignment.task_id.clone(),
            machine,
            start: assignment.start,
            end: assignment.end,
            critical: assignment.critical,
            start_date: dated.map(|d| d.start_date),
            end_date: dated.map(|d| d.end_date),
        }
    }
}

/// Full result of `run_cpm`.
#[pyclass(name = "CpmResult")]
#[derive(Clone, Debug)]
pub struct PyCpmResult {
    #[pyo3(get)]
    pub network_type: String,
    #[pyo3(get)]
    pub makespan: f64,
    #[pyo3(get)]
    pub tasks: Vec<PyTaskResult>,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    #[pyo3(get)]
    pub critical_chains: Vec<Vec<String>>,
    /// One list of assignments per machine, ordered by start.
    #[pyo3(get)]
    pub schedule: Vec<Vec<PyAssignment>>,
    #[pyo3(get)]
    pub completion_time: f64,
    #[pyo3(get)]
    pub event_count: usize,
    #[pyo3(get)]
    pub dummy_arc_count: usize,
}

#[pymethods]
impl PyCpmResult {
    fn __repr__(&self) -> String {
        format!(
            "CpmResult(network_type={:?}, makespan={}, critical_path={:?})",
            self.network_type, self.makespan, self.critical_path
        )
    }
}

impl From<CpmReport> for PyCpmResult {
    fn from(report: CpmReport) -> Self {
        let dated = report.dated_schedule.as_deref().unwrap_or(&[]);
        let schedule = report
            .schedule
            .machines()
            .iter()
            .enumerate()
            .map(|(machine, timeline)| {
                timeline
                    .assignments()
                    .iter()
                    .map(|a| {
                        let date = dated
                            .iter()
                            .find(|d| d.machine == machine && d.task_id == a.task_id);
                        PyAssignment::new(machine, a, date)
                    })
                    .collect()
            })
            .collect();

        Self {
            network_type: report.kind.code().to_string(),
            makespan: report.makespan,
            tasks: report.tasks.iter().map(PyTaskResult::from).collect(),
            completion_time: report.schedule.completion_time(),
            critical_path: report.critical_path,
            critical_chains: report.critical_chains,
            schedule,
            event_count: report.summary.events,
            dummy_arc_count: report.summary.dummy_arcs,
        }
    }
}

/// Run the critical path method and machine scheduling.
///
/// # Arguments
/// * `tasks` - List of Task records
/// * `machines` - Number of identical parallel machines (>= 1)
/// * `network_type` - "AN" (activity-on-node) or "AA" (activity-on-arc)
/// * `verbosity` - 0=silent, 1=phases, 2=decisions, 3=trace (stderr)
/// * `project_start` - Optional date of time offset 0; adds dates to the schedule
///
/// # Raises
/// * ValueError on invalid input, unknown network type or cyclic dependencies
#[pyfunction]
#[pyo3(signature = (tasks, machines, network_type="AN", verbosity=0, project_start=None))]
fn run_cpm(
    tasks: Vec<PyTask>,
    machines: i64,
    network_type: &str,
    verbosity: u8,
    project_start: Option<NaiveDate>,
) -> PyResult<PyCpmResult> {
    let kind = NetworkKind::from_code(network_type).ok_or_else(|| {
        PyValueError::new_err(format!(
            "unknown network type {:?}, expected \"AN\" or \"AA\"",
            network_type
        ))
    })?;

    let machines = MachineScheduler::machine_count(machines).map_err(to_py_err)?;

    let registry =
        TaskRegistry::from_tasks(tasks.into_iter().map(Task::from)).map_err(to_py_err)?;

    let mut config = CpmConfig::default()
        .with_kind(kind)
        .with_machines(machines)
        .with_verbosity(verbosity);
    config.project_start = project_start;

    let report = CpmEngine::new(config).run(&registry).map_err(to_py_err)?;
    Ok(report.into())
}

/// The cpm_rust.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTask>()?;
    m.add_class::<PyTaskResult>()?;
    m.add_class::<PyAssignment>()?;
    m.add_class::<PyCpmResult>()?;

    m.add_function(wrap_pyfunction!(run_cpm, m)?)?;

    Ok(())
}
