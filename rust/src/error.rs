//! Error types for network construction, propagation and scheduling.

use thiserror::Error;

use crate::network::{NetworkKind, NetworkShape};

/// Errors raised by the CPM engine.
///
/// Every variant aborts the operation in progress; no partial network,
/// timing table or schedule is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CpmError {
    #[error("Task already registered: {0}")]
    DuplicateTaskId(String),
    #[error("Task {task_id} has negative duration {duration}")]
    NegativeDuration { task_id: String, duration: f64 },
    #[error("Task {task_id} has non-finite duration")]
    NonFiniteDuration { task_id: String },
    #[error("Task {task_id} references unknown predecessor {predecessor}")]
    UnknownPredecessor {
        task_id: String,
        predecessor: String,
    },
    #[error("Unknown task: {0}")]
    UnknownTask(String),
    #[error("Circular dependency detected ({visited} of {total} nodes ordered)")]
    CyclicDependency { visited: usize, total: usize },
    #[error("Cannot build a network without tasks")]
    EmptyNetwork,
    #[error("Machine count must be at least 1, got {0}")]
    InvalidMachineCount(i64),
    #[error("Results from an {found} do not match an {expected}")]
    NetworkMismatch {
        expected: NetworkShape,
        found: NetworkShape,
    },
    #[error("{operation} is not available on an {actual} network")]
    WrongGraphEncodingForOperation {
        operation: &'static str,
        actual: NetworkKind,
    },
}

pub type CpmResult<T> = Result<T, CpmError>;
