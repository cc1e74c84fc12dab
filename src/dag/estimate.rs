// src/dag/estimate.rs

//! Critical-path runtime estimation.
//!
//! Every task is assumed to start the instant its last dependency finishes,
//! no matter how many other tasks are running at the same time. The
//! resulting makespan is the lower bound any real execution can reach.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::dag::graph::{Task, TaskGraph};
use crate::dag::validate::ValidatedGraph;
use crate::dag::TaskName;
use crate::errors::{Result, WavedagError};

/// Earliest start and finish of one task, in duration units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    pub start: u64,
    pub finish: u64,
}

/// Result of estimating a graph under unlimited parallelism.
#[derive(Debug, Clone)]
pub struct Schedule {
    timings: IndexMap<TaskName, TaskTiming>,
    makespan: u64,
    critical_path: Vec<TaskName>,
}

impl Schedule {
    /// Minimum total completion time.
    pub fn makespan(&self) -> u64 {
        self.makespan
    }

    pub fn timing_of(&self, task: &str) -> Option<TaskTiming> {
        self.timings.get(task).copied()
    }

    /// Timings for every task, in graph insertion order.
    pub fn timings(&self) -> impl Iterator<Item = (&str, TaskTiming)> {
        self.timings.iter().map(|(name, t)| (name.as_str(), *t))
    }

    /// One dependency chain whose last task finishes at the makespan,
    /// listed from the first task to start to the last one to finish.
    pub fn critical_path(&self) -> &[TaskName] {
        &self.critical_path
    }
}

/// Expected total runtime of a validated graph, in duration units.
pub fn estimate_runtime(graph: &ValidatedGraph) -> Result<u64> {
    Ok(estimate_schedule(graph)?.makespan())
}

/// Earliest start/finish for every task plus makespan and critical path.
pub fn estimate_schedule(graph: &ValidatedGraph) -> Result<Schedule> {
    schedule_graph(graph.graph())
}

/// Pass-based earliest-start computation.
///
/// Each pass schedules every task whose dependencies were all scheduled in
/// earlier passes. A pass with nothing ready while tasks remain means the
/// graph was not actually valid.
pub(crate) fn schedule_graph(graph: &TaskGraph) -> Result<Schedule> {
    let mut scheduled: IndexMap<TaskName, TaskTiming> = IndexMap::with_capacity(graph.len());
    let mut makespan = 0u64;
    let mut pass = 0usize;

    while scheduled.len() < graph.len() {
        pass += 1;

        let ready: Vec<&Task> = graph
            .tasks()
            .filter(|task| {
                !scheduled.contains_key(task.name())
                    && task
                        .dependencies()
                        .iter()
                        .all(|dep| scheduled.contains_key(dep))
            })
            .collect();

        if ready.is_empty() {
            let remaining = graph.len() - scheduled.len();
            return Err(WavedagError::SchedulingInconsistency { remaining });
        }

        for task in ready {
            let start = task
                .dependencies()
                .iter()
                .filter_map(|dep| scheduled.get(dep))
                .map(|timing| timing.finish)
                .max()
                .unwrap_or(0);
            let finish = start.saturating_add(task.duration());
            makespan = makespan.max(finish);

            trace!(pass, task = %task.name(), start, finish, "task scheduled");
            scheduled.insert(task.name().to_string(), TaskTiming { start, finish });
        }
    }

    let timings: IndexMap<TaskName, TaskTiming> = graph
        .names()
        .filter_map(|name| scheduled.get(name).map(|t| (name.to_string(), *t)))
        .collect();

    let critical_path = critical_path(graph, &timings, makespan);

    debug!(passes = pass, makespan, ?critical_path, "runtime estimated");

    Ok(Schedule {
        timings,
        makespan,
        critical_path,
    })
}

/// Walk back from the first task finishing at `makespan`, always following
/// the first dependency (declaration order) that finishes exactly when the
/// current task starts.
fn critical_path(
    graph: &TaskGraph,
    timings: &IndexMap<TaskName, TaskTiming>,
    makespan: u64,
) -> Vec<TaskName> {
    let mut path = Vec::new();

    let mut current = timings
        .iter()
        .find(|(_, t)| t.finish == makespan)
        .map(|(name, t)| (name.as_str(), *t));

    while let Some((name, timing)) = current {
        path.push(name.to_string());
        current = graph
            .dependencies_of(name)
            .iter()
            .filter_map(|dep| timings.get(dep).map(|t| (dep.as_str(), *t)))
            .find(|(_, t)| t.finish == timing.start);
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::TaskSpec;

    fn validated(specs: &[(&str, u64, &[&str])]) -> ValidatedGraph {
        let graph = TaskGraph::build(
            specs
                .iter()
                .map(|(name, duration, deps)| TaskSpec::new(*name, *duration, deps.iter().copied())),
        )
        .unwrap();
        ValidatedGraph::new(graph).unwrap()
    }

    #[test]
    fn linear_chain_sums_durations() {
        let g = validated(&[("A", 2, &[]), ("B", 3, &["A"]), ("C", 4, &["B"])]);
        assert_eq!(estimate_runtime(&g).unwrap(), 9);
    }

    #[test]
    fn independent_tasks_take_the_longest_duration() {
        let g = validated(&[("A", 2, &[]), ("B", 7, &[]), ("C", 4, &[])]);
        assert_eq!(estimate_runtime(&g).unwrap(), 7);
    }

    #[test]
    fn diamond_uses_the_slower_branch() {
        let g = validated(&[
            ("A", 1, &[]),
            ("B", 5, &["A"]),
            ("C", 2, &["A"]),
            ("D", 1, &["B", "C"]),
        ]);
        let schedule = estimate_schedule(&g).unwrap();

        assert_eq!(schedule.makespan(), 7);
        assert_eq!(
            schedule.timing_of("D"),
            Some(TaskTiming { start: 6, finish: 7 })
        );
        assert_eq!(schedule.critical_path(), ["A", "B", "D"]);
    }

    #[test]
    fn timings_follow_insertion_order_even_when_declared_before_deps() {
        let g = validated(&[("late", 1, &["early"]), ("early", 2, &[])]);
        let schedule = estimate_schedule(&g).unwrap();

        let names: Vec<&str> = schedule.timings().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["late", "early"]);
        assert_eq!(schedule.makespan(), 3);
        assert_eq!(schedule.critical_path(), ["early", "late"]);
    }

    #[test]
    fn zero_durations_estimate_zero() {
        let g = validated(&[("A", 0, &[]), ("B", 0, &["A"])]);
        assert_eq!(estimate_runtime(&g).unwrap(), 0);
    }

    #[test]
    fn unvalidated_cycle_is_a_scheduling_inconsistency() {
        let graph = TaskGraph::build(vec![
            TaskSpec::new("ok", 1, Vec::<String>::new()),
            TaskSpec::new("A", 1, ["B"]),
            TaskSpec::new("B", 1, ["A"]),
        ])
        .unwrap();

        match schedule_graph(&graph).unwrap_err() {
            WavedagError::SchedulingInconsistency { remaining } => assert_eq!(remaining, 2),
            other => panic!("expected SchedulingInconsistency, got {other:?}"),
        }
    }
}
