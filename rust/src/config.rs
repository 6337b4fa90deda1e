//! Configuration types for the CPM engine.

use chrono::NaiveDate;

use crate::logging::VERBOSITY_SILENT;
use crate::network::NetworkKind;

/// Configuration for a full CPM run (build, passes, extraction, scheduling).
#[derive(Clone, Debug)]
pub struct CpmConfig {
    /// Network encoding used for propagation.
    pub kind: NetworkKind,
    /// Number of identical parallel machines for the greedy schedule.
    pub machines: usize,
    /// Verbosity level: 0=silent, 1=phases, 2=decisions, 3=trace.
    pub verbosity: u8,
    /// Upper bound on enumerated connected critical chains.
    pub max_critical_chains: usize,
    /// Calendar date of time offset 0; enables dated schedule output.
    pub project_start: Option<NaiveDate>,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            kind: NetworkKind::OnNode,
            machines: 1,
            verbosity: VERBOSITY_SILENT,
            max_critical_chains: 64,
            project_start: None,
        }
    }
}

impl CpmConfig {
    pub fn with_kind(mut self, kind: NetworkKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_machines(mut self, machines: usize) -> Self {
        self.machines = machines;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_project_start(mut self, start: NaiveDate) -> Self {
        self.project_start = Some(start);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CpmConfig::default();
        assert_eq!(config.kind, NetworkKind::OnNode);
        assert_eq!(config.machines, 1);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.max_critical_chains, 64);
        assert!(config.project_start.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let config = CpmConfig::default()
            .with_kind(NetworkKind::OnArc)
            .with_machines(3)
            .with_verbosity(2)
            .with_project_start(start);
        assert_eq!(config.kind, NetworkKind::OnArc);
        assert_eq!(config.machines, 3);
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.project_start, Some(start));
    }
}
