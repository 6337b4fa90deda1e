//! Critical path extraction.
//!
//! The critical path is reported two ways: the flat sequence of zero-slack
//! tasks ordered by start, and the connected source-to-sink chains those tasks
//! form. The flat sequence is the primary output; chains are for callers that
//! need actual paths through the network.

mod chains;
mod extraction;

pub use chains::critical_chains;
pub use extraction::extract_critical_path;
