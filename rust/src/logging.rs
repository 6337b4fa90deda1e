//! Logging macros for the CPM engine with verbosity level control.
//!
//! Costs one integer comparison when disabled (verbosity=0).
//! Levels:
//! - 0: SILENT
//! - 1: PHASES (network built, pass finished, makespan)
//! - 2: DECISIONS (machine assignments, critical tasks)
//! - 3: TRACE (node relaxations, dummy arcs)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_PHASES: u8 = 1;
pub const VERBOSITY_DECISIONS: u8 = 2;
pub const VERBOSITY_TRACE: u8 = 3;

/// Log at PHASES level (verbosity >= 1).
#[macro_export]
macro_rules! log_phase {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PHASES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DECISIONS level (verbosity >= 2).
///
/// Used for: machine selection, critical task selection.
#[macro_export]
macro_rules! log_decision {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DECISIONS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at TRACE level (verbosity >= 3).
///
/// Used for: per-node relaxations and event allocation.
#[macro_export]
macro_rules! log_trace {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TRACE {
            eprintln!($($arg)*);
        }
    };
}
