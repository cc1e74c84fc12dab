// src/config/model.rs

use indexmap::IndexMap;
use serde::Deserialize;

use crate::dag::{TaskName, TaskSpec};

/// Task file as read from TOML.
///
/// ```toml
/// [task.build]
/// duration = 2
///
/// [task.test]
/// duration = 3
/// after = ["build"]
/// ```
///
/// Tables keep their file order, which becomes the graph's insertion order.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: IndexMap<TaskName, TaskEntry>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskEntry {
    /// Time units the task takes once started.
    pub duration: u64,

    /// Dependency list: this task waits for all tasks listed here.
    #[serde(default)]
    pub after: Vec<TaskName>,
}

impl TaskFile {
    /// Convert into task specifications, in file order.
    pub fn into_specs(self) -> Vec<TaskSpec> {
        self.task
            .into_iter()
            .map(|(name, entry)| TaskSpec {
                name,
                duration: entry.duration,
                dependencies: entry.after,
            })
            .collect()
    }
}
