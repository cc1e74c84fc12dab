// src/exec/completion.rs

//! Completed-task set shared between the executor and a wave's workers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::dag::TaskName;

/// Grow-only set of completed task names.
///
/// Workers call [`mark_done`](Self::mark_done) concurrently; the executor
/// only reads through [`snapshot`](Self::snapshot), and only after the wave
/// barrier, so a wave's readiness never sees writes made during that wave.
///
/// Cloning shares the same underlying set.
#[derive(Debug, Clone, Default)]
pub struct CompletionSet {
    inner: Arc<Mutex<HashSet<TaskName>>>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `task` finished. Marking twice is a no-op.
    pub fn mark_done(&self, task: &str) {
        let mut done = self.lock();
        if !done.contains(task) {
            done.insert(task.to_string());
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> HashSet<TaskName> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking writer cannot leave the set half-updated (each write is a
    // single insert), so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashSet<TaskName>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
