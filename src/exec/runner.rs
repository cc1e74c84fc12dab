// src/exec/runner.rs

//! Pluggable "run one task" abstraction.
//!
//! The wave executor hands every launched task to a `TaskRunner` instead of
//! sleeping inline. This keeps the barrier/readiness logic in one place while
//! letting tests observe or replace the simulated work.
//!
//! - `SleepRunner` is the production implementation: it blocks the task for
//!   `duration × time_unit`.
//! - Tests can provide their own runner that, for example, records start and
//!   finish instants.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::trace;

use super::{ScheduledTask, scale_duration};

/// Trait abstracting how a launched task performs its work.
///
/// The returned future is spawned onto the runtime, so it must own all of its
/// data. The executor marks the task completed once the future resolves.
pub trait TaskRunner: Send + Sync + 'static {
    fn run_task(&self, task: ScheduledTask) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
}

/// Runner that simulates work by sleeping for the task's scaled duration.
#[derive(Debug, Clone, Copy)]
pub struct SleepRunner {
    time_unit: Duration,
}

impl SleepRunner {
    pub fn new(time_unit: Duration) -> Self {
        Self { time_unit }
    }
}

impl Default for SleepRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TaskRunner for SleepRunner {
    fn run_task(&self, task: ScheduledTask) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        let sleep_for = scale_duration(self.time_unit, task.duration);

        Box::pin(async move {
            trace!(task = %task.name, wave = task.wave, ?sleep_for, "sleeping");
            tokio::time::sleep(sleep_for).await;
        })
    }
}
