// src/exec/mod.rs

//! Wave execution layer.
//!
//! This module runs the tasks of a validated graph for real, wave by wave,
//! and reports progress back to the shell via [`ExecEvent`]s.
//!
//! - [`completion`] holds the completed-task set shared by a wave's workers.
//! - [`runner`] provides the `TaskRunner` trait and the production
//!   `SleepRunner`, which simulates work by sleeping.
//! - [`wave`] owns the executor loop: compute the ready set, launch it, wait
//!   for the whole wave, repeat.

use std::time::Duration;

use crate::dag::TaskName;

pub mod completion;
pub mod runner;
pub mod wave;

pub use completion::CompletionSet;
pub use runner::{SleepRunner, TaskRunner};
pub use wave::WaveExecutor;

/// How many ready tasks a wave launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Every ready task runs concurrently.
    #[default]
    Parallel,
    /// Only the first ready task (insertion order) runs; the rest wait for
    /// a later wave.
    Serial,
}

/// A task handed to a [`TaskRunner`] for one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub name: TaskName,
    /// Duration in abstract units; the runner decides what a unit means.
    pub duration: u64,
    /// 1-based wave the task was launched in.
    pub wave: usize,
}

/// Progress events emitted while executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecEvent {
    /// A new wave was computed and is about to launch.
    WaveStarted { wave: usize, tasks: Vec<TaskName> },
    /// A task was launched.
    TaskStarted { task: TaskName, duration: u64 },
    /// A task finished and is now in the completed set.
    TaskFinished { task: TaskName, elapsed: Duration },
}

/// What an execution observed.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// Wall-clock time from executor start until the last wave finished.
    pub elapsed: Duration,
    /// Task names in the order they completed.
    pub completion_order: Vec<TaskName>,
    /// Number of waves launched.
    pub waves: usize,
}

impl ExecutionReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// `units × unit`, saturating at `Duration::MAX`.
pub fn scale_duration(unit: Duration, units: u64) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    let nanos = unit.as_nanos().saturating_mul(u128::from(units));
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_duration_multiplies_small_values() {
        assert_eq!(
            scale_duration(Duration::from_millis(250), 4),
            Duration::from_secs(1)
        );
        assert_eq!(scale_duration(Duration::from_secs(1), 0), Duration::ZERO);
    }

    #[test]
    fn scale_duration_handles_values_beyond_u32() {
        let scaled = scale_duration(Duration::from_nanos(1), u64::from(u32::MAX) + 1);
        assert_eq!(scaled, Duration::from_nanos(u64::from(u32::MAX) + 1));
    }

    #[test]
    fn scale_duration_saturates() {
        assert_eq!(scale_duration(Duration::MAX, 2), Duration::MAX);
    }
}
