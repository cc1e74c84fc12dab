// src/dag/graph.rs

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::dag::TaskName;
use crate::errors::{Result, WavedagError};

/// A task as supplied by the shell, before it becomes part of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: TaskName,
    /// Time units needed to complete the task once started.
    pub duration: u64,
    /// Names of the tasks that must complete first, in declaration order.
    pub dependencies: Vec<TaskName>,
}

impl TaskSpec {
    pub fn new<I, S>(name: impl Into<TaskName>, duration: u64, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskName>,
    {
        Self {
            name: name.into(),
            duration,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }
}

/// A node of the task graph: static task data plus both edge directions.
#[derive(Debug, Clone)]
pub struct Task {
    name: TaskName,
    duration: u64,
    /// Direct dependencies, deduplicated, first declaration wins.
    deps: Vec<TaskName>,
    /// Direct dependents (tasks that list this one as a dependency).
    dependents: Vec<TaskName>,
}

impl Task {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn dependencies(&self) -> &[TaskName] {
        &self.deps
    }

    pub fn dependents(&self) -> &[TaskName] {
        &self.dependents
    }
}

/// In-memory task graph keyed by task name.
///
/// Iteration always follows the order in which tasks were supplied, so every
/// consumer (validation, estimation, wave scheduling) behaves the same way
/// across runs with identical input.
///
/// The graph is not validated on construction: dependency names may refer to
/// unknown tasks and the relation may contain cycles. Wrap it in a
/// [`ValidatedGraph`](crate::dag::ValidatedGraph) before estimating or
/// executing.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: IndexMap<TaskName, Task>,
}

impl TaskGraph {
    /// Build a graph from an ordered sequence of task specifications.
    ///
    /// Fails on an empty name, a duplicate name, or an empty input.
    pub fn build<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = TaskSpec>,
    {
        let mut tasks: IndexMap<TaskName, Task> = IndexMap::new();

        for spec in specs {
            if spec.name.trim().is_empty() {
                return Err(WavedagError::MalformedSpec {
                    spec: format!(
                        "{}, {}, [{}]",
                        spec.name,
                        spec.duration,
                        spec.dependencies.join(", ")
                    ),
                    reason: "task name is empty".to_string(),
                });
            }

            if tasks.contains_key(&spec.name) {
                return Err(WavedagError::DuplicateTask(spec.name));
            }

            let deps: IndexSet<TaskName> = spec.dependencies.into_iter().collect();

            tasks.insert(
                spec.name.clone(),
                Task {
                    name: spec.name,
                    duration: spec.duration,
                    deps: deps.into_iter().collect(),
                    dependents: Vec::new(),
                },
            );
        }

        if tasks.is_empty() {
            return Err(WavedagError::NoTasks);
        }

        // Second pass: reverse edges. Unknown dependency names are left for
        // the validator to report.
        let edges: Vec<(TaskName, TaskName)> = tasks
            .values()
            .flat_map(|task| {
                task.deps
                    .iter()
                    .map(move |dep| (dep.clone(), task.name.clone()))
            })
            .collect();

        for (dep, dependent) in edges {
            if let Some(node) = tasks.get_mut(&dep) {
                node.dependents.push(dependent);
            }
        }

        debug!(tasks = tasks.len(), "task graph built");

        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// All task names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(|s| s.as_str())
    }

    /// Immediate dependencies of a task (empty for unknown names).
    pub fn dependencies_of(&self, name: &str) -> &[TaskName] {
        self.tasks
            .get(name)
            .map(|t| t.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (empty for unknown names).
    pub fn dependents_of(&self, name: &str) -> &[TaskName] {
        self.tasks
            .get(name)
            .map(|t| t.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks without dependencies.
    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.tasks().filter(|t| t.deps.is_empty())
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.tasks.get_index_of(name)
    }

    pub(crate) fn task_at(&self, index: usize) -> Option<&Task> {
        self.tasks.get_index(index).map(|(_, task)| task)
    }
}
