//! Registry validation and dispatch to the two encoders.

use crate::error::{CpmError, CpmResult};
use crate::interner::{TaskId, TaskIndex};
use crate::logging::VERBOSITY_SILENT;
use crate::models::Task;
use crate::registry::TaskRegistry;
use crate::{log_phase, log_trace};

use super::{on_arc, on_node, Network, NetworkKind};

/// Builds a [`Network`] of a fixed encoding from a registry.
#[derive(Clone, Debug)]
pub struct NetworkBuilder {
    kind: NetworkKind,
    verbosity: u8,
}

impl NetworkBuilder {
    pub fn new(kind: NetworkKind) -> Self {
        Self {
            kind,
            verbosity: VERBOSITY_SILENT,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Validate the registry and build the network.
    ///
    /// # Errors
    /// * `EmptyNetwork` if the registry holds no tasks
    /// * `UnknownPredecessor` if any predecessor id was never registered
    /// * `CyclicDependency` if the encoded graph has no full topological order
    pub fn build<'r>(&self, registry: &'r TaskRegistry) -> CpmResult<Network<'r>> {
        if registry.is_empty() {
            return Err(CpmError::EmptyNetwork);
        }

        let tasks: Vec<&'r Task> = registry.tasks().iter().collect();
        let mut index = TaskIndex::with_capacity(tasks.len());
        for &task in &tasks {
            index.intern(task.id.as_str());
        }

        let predecessors = resolve_predecessors(&tasks, &index)?;
        let mut successors: Vec<Vec<TaskId>> = vec![Vec::new(); tasks.len()];
        for (task, preds) in predecessors.iter().enumerate() {
            for &pred in preds {
                successors[pred as usize].push(task as TaskId);
            }
        }

        let durations: Vec<f64> = tasks.iter().map(|t| t.duration).collect();
        let encoded = match self.kind {
            NetworkKind::OnNode => on_node::encode(&durations, &predecessors),
            NetworkKind::OnArc => on_arc::encode(&durations, &predecessors, &successors),
        };

        encoded.graph.topological_order()?;

        for (from, arc) in encoded.graph.arcs() {
            log_trace!(
                self.verbosity,
                "    Arc {} -> {} ({:?}, {})",
                from,
                arc.to,
                arc.label,
                arc.weight
            );
        }
        log_phase!(
            self.verbosity,
            "Built {} network: {} tasks, {} nodes, {} arcs, {} dummies",
            self.kind,
            tasks.len(),
            encoded.graph.node_count(),
            encoded.graph.arc_count(),
            encoded.dummy_count
        );

        Ok(Network::new(
            self.kind,
            index,
            tasks,
            predecessors,
            successors,
            encoded,
        ))
    }
}

/// Map predecessor ids to task ids, dropping repeated entries.
fn resolve_predecessors(tasks: &[&Task], index: &TaskIndex<'_>) -> CpmResult<Vec<Vec<TaskId>>> {
    let mut resolved = Vec::with_capacity(tasks.len());
    for task in tasks {
        let mut preds: Vec<TaskId> = Vec::with_capacity(task.predecessors.len());
        for pred in &task.predecessors {
            let id = index
                .get(pred)
                .ok_or_else(|| CpmError::UnknownPredecessor {
                    task_id: task.id.clone(),
                    predecessor: pred.clone(),
                })?;
            if !preds.contains(&id) {
                preds.push(id);
            }
        }
        resolved.push(preds);
    }
    Ok(resolved)
}
