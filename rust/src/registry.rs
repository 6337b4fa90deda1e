//! Task registry: the mutable input side of the engine.
//!
//! Networks borrow the registry they were built from, so the borrow checker
//! rejects any mutation while a network is alive.

use rustc_hash::FxHashMap;

use crate::error::{CpmError, CpmResult};
use crate::models::Task;
use crate::network::{Network, NetworkBuilder, NetworkKind};

/// Ordered collection of task definitions with unique ids.
#[derive(Clone, Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    /// task id -> position in `tasks`
    ids: FxHashMap<String, usize>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every task in order, stopping at the first rejected one.
    pub fn from_tasks<I: IntoIterator<Item = Task>>(tasks: I) -> CpmResult<Self> {
        let mut registry = Self::new();
        for task in tasks {
            registry.add(task)?;
        }
        Ok(registry)
    }

    /// Register a task.
    ///
    /// Predecessors are not checked here; they may be registered later and are
    /// validated when a network is built.
    pub fn add_task(&mut self, id: &str, duration: f64, predecessors: &[&str]) -> CpmResult<()> {
        self.add(Task::new(id, duration, predecessors))
    }

    /// Register an already constructed task.
    pub fn add(&mut self, task: Task) -> CpmResult<()> {
        if self.ids.contains_key(&task.id) {
            return Err(CpmError::DuplicateTaskId(task.id));
        }
        if task.duration.is_nan() || task.duration.is_infinite() {
            return Err(CpmError::NonFiniteDuration { task_id: task.id });
        }
        if task.duration < 0.0 {
            return Err(CpmError::NegativeDuration {
                task_id: task.id,
                duration: task.duration,
            });
        }
        self.ids.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.ids.get(id).map(|&pos| &self.tasks[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Tasks in registration order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Build a network of the given encoding with default builder settings.
    pub fn build(&self, kind: NetworkKind) -> CpmResult<Network<'_>> {
        NetworkBuilder::new(kind).build(self)
    }
}
