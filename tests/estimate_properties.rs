// tests/estimate_properties.rs

use std::collections::HashSet;

use proptest::prelude::*;
use wavedag::dag::{TaskSpec, ValidatedGraph, TaskGraph, estimate_runtime, estimate_schedule};

// Strategy to generate a valid DAG as (duration, deps) per task.
// We ensure acyclicity by only allowing task N to depend on tasks 0..N-1.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<(u64, Vec<usize>)>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        proptest::collection::vec(
            (
                0..20u64,
                proptest::collection::vec(any::<usize>(), 0..num_tasks),
            ),
            num_tasks,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (duration, potential_deps))| {
                    // Sanitize dependencies: only allow deps < i
                    let deps: HashSet<usize> = if i == 0 {
                        HashSet::new()
                    } else {
                        potential_deps.into_iter().map(|d| d % i).collect()
                    };
                    let mut deps: Vec<usize> = deps.into_iter().collect();
                    deps.sort_unstable();
                    (duration, deps)
                })
                .collect()
        })
    })
}

fn specs(tasks: &[(u64, Vec<usize>)], order: &[usize]) -> Vec<TaskSpec> {
    order
        .iter()
        .map(|&i| {
            let (duration, deps) = &tasks[i];
            TaskSpec::new(
                format!("task_{i}"),
                *duration,
                deps.iter().map(|d| format!("task_{d}")),
            )
        })
        .collect()
}

fn validated(specs: Vec<TaskSpec>) -> ValidatedGraph {
    ValidatedGraph::new(TaskGraph::build(specs).unwrap()).unwrap()
}

/// Longest duration-weighted path ending at each task, computed directly.
fn longest_chain(tasks: &[(u64, Vec<usize>)]) -> u64 {
    let mut best = vec![0u64; tasks.len()];
    for (i, (duration, deps)) in tasks.iter().enumerate() {
        let before = deps.iter().map(|&d| best[d]).max().unwrap_or(0);
        best[i] = before + duration;
    }
    best.into_iter().max().unwrap_or(0)
}

proptest! {
    #[test]
    fn estimate_is_the_longest_dependency_chain(tasks in dag_strategy(12)) {
        let order: Vec<usize> = (0..tasks.len()).collect();
        let graph = validated(specs(&tasks, &order));
        let estimate = estimate_runtime(&graph).unwrap();

        let max_single = tasks.iter().map(|(d, _)| *d).max().unwrap_or(0);
        prop_assert!(estimate >= max_single);
        prop_assert_eq!(estimate, longest_chain(&tasks));
    }

    #[test]
    fn every_task_starts_after_its_dependencies_finish(tasks in dag_strategy(12)) {
        let order: Vec<usize> = (0..tasks.len()).collect();
        let graph = validated(specs(&tasks, &order));
        let schedule = estimate_schedule(&graph).unwrap();

        for (i, (duration, deps)) in tasks.iter().enumerate() {
            let timing = schedule.timing_of(&format!("task_{i}")).unwrap();
            prop_assert_eq!(timing.finish, timing.start + duration);
            for d in deps {
                let dep = schedule.timing_of(&format!("task_{d}")).unwrap();
                prop_assert!(dep.finish <= timing.start);
            }
        }
    }

    #[test]
    fn estimate_is_independent_of_insertion_order(
        (tasks, shuffled) in dag_strategy(10).prop_flat_map(|tasks| {
            let forward: Vec<usize> = (0..tasks.len()).collect();
            (Just(tasks), Just(forward).prop_shuffle())
        }),
    ) {
        let forward: Vec<usize> = (0..tasks.len()).collect();

        let a = validated(specs(&tasks, &forward));
        let b = validated(specs(&tasks, &shuffled));
        prop_assert_eq!(estimate_runtime(&a).unwrap(), estimate_runtime(&b).unwrap());
    }
}
