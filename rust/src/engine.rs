//! End-to-end CPM run: build, both passes, critical path and machine schedule.

use crate::backward_pass::backward_pass;
use crate::calendar::{project_schedule, DatedAssignment};
use crate::config::CpmConfig;
use crate::critical_path::{critical_chains, extract_critical_path};
use crate::error::CpmResult;
use crate::forward_pass::forward_pass;
use crate::log_phase;
use crate::models::TaskReport;
use crate::network::{NetworkBuilder, NetworkKind, NetworkSummary};
use crate::registry::TaskRegistry;
use crate::scheduler::{MachineScheduler, Schedule};

/// Owned result of a full run. Independent of the registry it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct CpmReport {
    pub kind: NetworkKind,
    pub summary: NetworkSummary,
    /// Per-task timings in registration order.
    pub tasks: Vec<TaskReport>,
    pub makespan: f64,
    /// Zero-slack tasks ordered by (earliest start, id).
    pub critical_path: Vec<String>,
    pub critical_chains: Vec<Vec<String>>,
    pub schedule: Schedule,
    /// Present when the config carries a project start date.
    pub dated_schedule: Option<Vec<DatedAssignment>>,
}

impl CpmReport {
    pub fn task(&self, task_id: &str) -> Option<&TaskReport> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

/// Runs the full pipeline with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct CpmEngine {
    config: CpmConfig,
}

impl CpmEngine {
    pub fn new(config: CpmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CpmConfig {
        &self.config
    }

    /// Analyze and schedule every task in `registry`.
    ///
    /// The machine count is validated before any graph work so a bad
    /// configuration fails fast.
    ///
    /// # Errors
    /// Any build, propagation or scheduling error; no partial report is returned.
    pub fn run(&self, registry: &TaskRegistry) -> CpmResult<CpmReport> {
        let verbosity = self.config.verbosity;
        let scheduler = MachineScheduler::new(self.config.machines)?.with_verbosity(verbosity);

        let network = NetworkBuilder::new(self.config.kind)
            .with_verbosity(verbosity)
            .build(registry)?;
        let earliest = forward_pass(&network, verbosity)?;
        let timings = backward_pass(&network, &earliest, verbosity)?;

        let critical_path = extract_critical_path(&timings, verbosity)
            .into_iter()
            .map(String::from)
            .collect();
        let chains = critical_chains(&network, &timings, self.config.max_critical_chains)?
            .into_iter()
            .map(|chain| chain.into_iter().map(String::from).collect())
            .collect();

        let mut schedule = scheduler.schedule(&network, &earliest)?;
        schedule.mark_critical(&timings)?;
        let dated_schedule = self
            .config
            .project_start
            .map(|origin| project_schedule(&schedule, origin));

        log_phase!(
            verbosity,
            "{} run done: makespan {}, completion {}",
            network.kind().code(),
            timings.makespan(),
            schedule.completion_time()
        );

        Ok(CpmReport {
            kind: network.kind(),
            summary: network.summary(),
            tasks: timings.reports(),
            makespan: timings.makespan(),
            critical_path,
            critical_chains: chains,
            schedule,
            dated_schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CpmError;
    use chrono::NaiveDate;

    fn make_task(registry: &mut TaskRegistry, id: &str, duration: f64, preds: &[&str]) {
        registry.add_task(id, duration, preds).unwrap();
    }

    fn diamond() -> TaskRegistry {
        let mut registry = TaskRegistry::new();
        make_task(&mut registry, "A", 3.0, &[]);
        make_task(&mut registry, "B", 2.0, &["A"]);
        make_task(&mut registry, "C", 4.0, &["A"]);
        make_task(&mut registry, "D", 1.0, &["B", "C"]);
        registry
    }

    fn run(registry: &TaskRegistry, config: CpmConfig) -> CpmResult<CpmReport> {
        CpmEngine::new(config).run(registry)
    }

    #[test]
    fn test_worked_example() {
        let registry = diamond();
        for kind in [NetworkKind::OnNode, NetworkKind::OnArc] {
            let config = CpmConfig::default().with_kind(kind).with_machines(2);
            let report = run(&registry, config).unwrap();
            assert_eq!(report.kind, kind);
            assert_eq!(report.makespan, 8.0);

            let expected = [
                ("A", 0.0, 3.0, 0.0, 3.0),
                ("B", 3.0, 5.0, 5.0, 7.0),
                ("C", 3.0, 7.0, 3.0, 7.0),
                ("D", 7.0, 8.0, 7.0, 8.0),
            ];
            for (id, es, ef, ls, lf) in expected {
                let t = report.task(id).unwrap().timing;
                assert!((t.earliest_start - es).abs() < 1e-9, "{} ES", id);
                assert!((t.earliest_finish - ef).abs() < 1e-9, "{} EF", id);
                assert!((t.latest_start - ls).abs() < 1e-9, "{} LS", id);
                assert!((t.latest_finish - lf).abs() < 1e-9, "{} LF", id);
            }
            assert_eq!(report.task("B").unwrap().timing.slack, 2.0);
            assert!(!report.task("B").unwrap().critical);

            assert_eq!(report.critical_path, vec!["A", "C", "D"]);
            assert_eq!(report.critical_chains, vec![vec!["A", "C", "D"]]);

            let machine0: Vec<&str> = report.schedule.machines()[0]
                .assignments()
                .iter()
                .map(|a| a.task_id.as_str())
                .collect();
            assert_eq!(machine0, vec!["A", "B", "D"]);
            let (machine, d) = report.schedule.find("D").unwrap();
            assert_eq!((machine, d.start, d.end), (0, 7.0, 8.0));
            assert!(d.critical);
            assert!(report.dated_schedule.is_none());
        }
    }

    #[test]
    fn test_encodings_agree() {
        let mut registry = TaskRegistry::new();
        make_task(&mut registry, "survey", 2.0, &[]);
        make_task(&mut registry, "permits", 5.5, &["survey"]);
        make_task(&mut registry, "order", 3.0, &[]);
        make_task(&mut registry, "foundation", 4.0, &["permits", "survey"]);
        make_task(&mut registry, "frame", 6.0, &["foundation", "order"]);
        make_task(&mut registry, "wiring", 2.5, &["frame"]);
        make_task(&mut registry, "plumbing", 3.5, &["frame"]);
        make_task(&mut registry, "inspect", 0.0, &["wiring", "plumbing"]);
        make_task(&mut registry, "paint", 1.0, &["inspect"]);

        let on_node = run(&registry, CpmConfig::default().with_machines(3)).unwrap();
        let on_arc = run(
            &registry,
            CpmConfig::default()
                .with_kind(NetworkKind::OnArc)
                .with_machines(3),
        )
        .unwrap();

        assert!((on_node.makespan - on_arc.makespan).abs() < 1e-9);
        for (a, b) in on_node.tasks.iter().zip(&on_arc.tasks) {
            assert_eq!(a.id, b.id);
            assert!(a.timing.approx_eq(&b.timing, 1e-9), "{}", a.id);
            assert!(a.timing.slack >= 0.0);
        }
        assert_eq!(on_node.critical_path, on_arc.critical_path);
        assert_eq!(on_node.critical_chains, on_arc.critical_chains);
        assert_eq!(on_node.schedule, on_arc.schedule);
        assert!(on_arc.summary.dummy_arcs > 0);
        assert_eq!(on_node.summary.dummy_arcs, 0);
    }

    #[test]
    fn test_errors_abort_run() {
        let registry = diamond();
        assert_eq!(
            run(&registry, CpmConfig::default().with_machines(0)).unwrap_err(),
            CpmError::InvalidMachineCount(0)
        );

        assert_eq!(
            run(&TaskRegistry::new(), CpmConfig::default()).unwrap_err(),
            CpmError::EmptyNetwork
        );

        let mut registry = TaskRegistry::new();
        make_task(&mut registry, "a", 1.0, &["ghost"]);
        assert!(matches!(
            run(&registry, CpmConfig::default()).unwrap_err(),
            CpmError::UnknownPredecessor { .. }
        ));

        let mut registry = TaskRegistry::new();
        make_task(&mut registry, "a", 1.0, &["b"]);
        make_task(&mut registry, "b", 1.0, &["a"]);
        for kind in [NetworkKind::OnNode, NetworkKind::OnArc] {
            assert!(matches!(
                run(&registry, CpmConfig::default().with_kind(kind)).unwrap_err(),
                CpmError::CyclicDependency { .. }
            ));
        }
    }

    #[test]
    fn test_dated_schedule() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let report = run(
            &diamond(),
            CpmConfig::default().with_machines(2).with_project_start(start),
        )
        .unwrap();
        let dated = report.dated_schedule.unwrap();
        assert_eq!(dated.len(), 4);
        let c = dated.iter().find(|a| a.task_id == "C").unwrap();
        assert_eq!(c.machine, 1);
        assert_eq!(c.start_date, NaiveDate::from_ymd_opt(2025, 3, 6).unwrap());
        assert_eq!(c.end_date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(c.critical);
    }

    #[test]
    fn test_report_outlives_registry() {
        let report = {
            let registry = diamond();
            run(&registry, CpmConfig::default()).unwrap()
        };
        assert_eq!(report.tasks.len(), 4);
        assert_eq!(report.summary.tasks, 4);
        assert_eq!(report.schedule.completion_time(), 10.0);
    }

    #[test]
    fn test_outputs_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CpmReport>();
        assert_send_sync::<crate::network::Network<'static>>();
        assert_send_sync::<crate::backward_pass::Timings<'static>>();
        assert_send_sync::<Schedule>();
    }
}
