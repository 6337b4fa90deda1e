//! String interning for task ids.
//!
//! Task ids are mapped to dense integers once, at network build time, so the
//! propagation loops index plain vectors instead of hashing strings.

use rustc_hash::FxHashMap;

/// Interned task id (index into the network's task arena).
pub type TaskId = u32;

/// Bidirectional task id <-> integer mapping.
#[derive(Debug, Clone)]
pub struct TaskIndex<'a> {
    to_int: FxHashMap<&'a str, TaskId>,
    from_int: Vec<&'a str>,
}

impl<'a> TaskIndex<'a> {
    /// Create an index with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a string, returning its integer id.
    /// If already interned, returns the existing id.
    pub fn intern(&mut self, s: &'a str) -> TaskId {
        if let Some(&id) = self.to_int.get(s) {
            return id;
        }
        let id = self.from_int.len() as TaskId;
        self.from_int.push(s);
        self.to_int.insert(s, id);
        id
    }

    #[inline]
    pub fn get(&self, s: &str) -> Option<TaskId> {
        self.to_int.get(s).copied()
    }

    #[inline]
    pub fn resolve(&self, id: TaskId) -> Option<&'a str> {
        self.from_int.get(id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}
