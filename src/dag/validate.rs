// src/dag/validate.rs

use tracing::debug;

use crate::dag::TaskName;
use crate::dag::graph::TaskGraph;
use crate::errors::{Result, WavedagError};

/// Run both structural checks against a graph.
///
/// This checks:
/// - every dependency name refers to a defined task
/// - the dependency relation has no cycle
///
/// Validation never mutates the graph, so calling it repeatedly yields the
/// same result.
pub fn validate(graph: &TaskGraph) -> Result<()> {
    validate_references(graph)?;
    validate_acyclic(graph)?;
    debug!(tasks = graph.len(), "task graph validated");
    Ok(())
}

/// A task graph that passed [`validate`].
///
/// Estimation and execution only accept this type, so they can rely on every
/// dependency being defined and on a ready task existing while work remains.
#[derive(Debug, Clone)]
pub struct ValidatedGraph {
    graph: TaskGraph,
}

impl ValidatedGraph {
    pub fn new(graph: TaskGraph) -> Result<Self> {
        validate(&graph)?;
        Ok(Self { graph })
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Wrap a graph without checking it, so executor tests can reach states
    /// a validated graph never produces.
    #[cfg(test)]
    pub(crate) fn unchecked(graph: TaskGraph) -> Self {
        Self { graph }
    }
}

impl TryFrom<TaskGraph> for ValidatedGraph {
    type Error = WavedagError;

    fn try_from(graph: TaskGraph) -> std::result::Result<Self, Self::Error> {
        Self::new(graph)
    }
}

fn validate_references(graph: &TaskGraph) -> Result<()> {
    for task in graph.tasks() {
        let missing: Vec<TaskName> = task
            .dependencies()
            .iter()
            .filter(|dep| !graph.contains(dep))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(WavedagError::UndefinedDependencies {
                task: task.name().to_string(),
                missing,
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Iterative three-colour DFS following dependency edges.
///
/// Each stack frame is `(task index, next dependency position)`; a node is
/// `Done` once all of its dependencies have been explored, and is never
/// walked again.
fn validate_acyclic(graph: &TaskGraph) -> Result<()> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..graph.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        marks[root] = Mark::OnStack;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let next_dep = graph
                .task_at(node)
                .and_then(|task| task.dependencies().get(cursor));

            let Some(dep) = next_dep else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };

            frame.1 += 1;

            // Unknown names are reported by `validate_references`.
            let Some(dep_index) = graph.index_of(dep) else {
                continue;
            };

            match marks[dep_index] {
                Mark::Unvisited => {
                    marks[dep_index] = Mark::OnStack;
                    stack.push((dep_index, 0));
                }
                Mark::OnStack => {
                    let cycle = cycle_from_stack(graph, &stack, dep_index);
                    debug!(?cycle, "dependency cycle found");
                    return Err(WavedagError::DependencyCycle { cycle });
                }
                Mark::Done => {}
            }
        }
    }

    Ok(())
}

/// Names on the stack from `closing` to the top, with `closing` repeated at
/// the end (`A -> B -> A` reads "A depends on B, which depends on A").
fn cycle_from_stack(graph: &TaskGraph, stack: &[(usize, usize)], closing: usize) -> Vec<TaskName> {
    let start = stack
        .iter()
        .position(|&(index, _)| index == closing)
        .unwrap_or(0);

    stack[start..]
        .iter()
        .map(|&(index, _)| index)
        .chain(std::iter::once(closing))
        .filter_map(|index| graph.task_at(index))
        .map(|task| task.name().to_string())
        .collect()
}
