// src/exec/wave.rs

//! Main executor loop: ready set → launch → barrier → repeat.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::dag::graph::{Task, TaskGraph};
use crate::dag::{TaskName, ValidatedGraph};
use crate::errors::{Result, WavedagError};

use super::completion::CompletionSet;
use super::runner::{SleepRunner, TaskRunner};
use super::{ExecEvent, ExecutionMode, ExecutionReport, ScheduledTask};

/// Pause before recomputing an unexpectedly empty ready set.
pub const DEFAULT_STALL_BACKOFF: Duration = Duration::from_millis(100);

/// Runs a validated graph wave by wave.
///
/// Each wave launches the tasks whose dependencies are all in the completed
/// set, then waits for *every* one of them before computing the next wave.
/// A task that could start as soon as a fast sibling finishes still waits
/// for the slowest member of the wave, so the observed runtime is at least
/// the critical-path estimate and exceeds it whenever a wave is uneven.
pub struct WaveExecutor<R: TaskRunner> {
    runner: Arc<R>,
    mode: ExecutionMode,
    events: Option<mpsc::Sender<ExecEvent>>,
    stall_backoff: Duration,
}

impl<R: TaskRunner> std::fmt::Debug for WaveExecutor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveExecutor")
            .field("mode", &self.mode)
            .field("stall_backoff", &self.stall_backoff)
            .field("emits_events", &self.events.is_some())
            .finish_non_exhaustive()
    }
}

impl WaveExecutor<SleepRunner> {
    /// Executor whose tasks sleep for `duration × time_unit`.
    pub fn sleeping(time_unit: Duration) -> Self {
        Self::new(SleepRunner::new(time_unit))
    }
}

impl<R: TaskRunner> WaveExecutor<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner: Arc::new(runner),
            mode: ExecutionMode::default(),
            events: None,
            stall_backoff: DEFAULT_STALL_BACKOFF,
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Send progress events to `tx`. A closed receiver is ignored.
    pub fn with_events(mut self, tx: mpsc::Sender<ExecEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn with_stall_backoff(mut self, backoff: Duration) -> Self {
        self.stall_backoff = backoff;
        self
    }

    /// Execute every task of `graph`, honouring dependencies.
    ///
    /// Only fails if a runner future panics, since the wave barrier can then
    /// never be reached.
    pub async fn execute(&self, graph: &ValidatedGraph) -> Result<ExecutionReport> {
        let graph = graph.graph();
        let started = Instant::now();
        let completed = CompletionSet::new();
        let mut completion_order: Vec<TaskName> = Vec::with_capacity(graph.len());
        let mut wave = 0usize;

        info!(tasks = graph.len(), mode = ?self.mode, "execution started");

        while completed.len() < graph.len() {
            let snapshot = completed.snapshot();
            let mut ready = ready_tasks(graph, &snapshot);

            if ready.is_empty() {
                // Unreachable for a validated graph with a correct barrier;
                // treated as a transient race rather than an error.
                warn!(
                    completed = snapshot.len(),
                    total = graph.len(),
                    backoff = ?self.stall_backoff,
                    "no ready tasks although work remains; retrying"
                );
                tokio::time::sleep(self.stall_backoff).await;
                continue;
            }

            if self.mode == ExecutionMode::Serial {
                ready.truncate(1);
            }

            wave += 1;
            let names: Vec<TaskName> = ready.iter().map(|t| t.name().to_string()).collect();
            debug!(wave, tasks = ?names, "launching wave");
            emit(&self.events, ExecEvent::WaveStarted { wave, tasks: names }).await;

            let finished = self.run_wave(wave, &ready, &completed).await?;
            completion_order.extend(finished);
        }

        let elapsed = started.elapsed();
        info!(waves = wave, ?elapsed, "execution finished");

        Ok(ExecutionReport {
            elapsed,
            completion_order,
            waves: wave,
        })
    }

    /// Launch every task of one wave and wait for all of them.
    ///
    /// Returns the task names in the order they finished.
    async fn run_wave(
        &self,
        wave: usize,
        ready: &[&Task],
        completed: &CompletionSet,
    ) -> Result<Vec<TaskName>> {
        let mut workers: JoinSet<TaskName> = JoinSet::new();

        for task in ready {
            let scheduled = ScheduledTask {
                name: task.name().to_string(),
                duration: task.duration(),
                wave,
            };
            let runner = Arc::clone(&self.runner);
            let completed = completed.clone();
            let events = self.events.clone();

            workers.spawn(async move {
                let name = scheduled.name.clone();
                let duration = scheduled.duration;
                let task_started = Instant::now();

                info!(task = %name, wave, duration, "task started");
                emit(
                    &events,
                    ExecEvent::TaskStarted {
                        task: name.clone(),
                        duration,
                    },
                )
                .await;

                runner.run_task(scheduled).await;
                completed.mark_done(&name);

                let elapsed = task_started.elapsed();
                info!(task = %name, wave, ?elapsed, "task finished");
                emit(
                    &events,
                    ExecEvent::TaskFinished {
                        task: name.clone(),
                        elapsed,
                    },
                )
                .await;

                name
            });
        }

        let mut finished = Vec::with_capacity(ready.len());
        while let Some(joined) = workers.join_next().await {
            let name = joined.map_err(|e| WavedagError::TaskJoin(e.to_string()))?;
            finished.push(name);
        }

        debug!(wave, "wave barrier reached");
        Ok(finished)
    }
}

/// Uncompleted tasks whose dependencies are all in `completed`, in graph
/// insertion order.
pub(crate) fn ready_tasks<'g>(graph: &'g TaskGraph, completed: &HashSet<TaskName>) -> Vec<&'g Task> {
    graph
        .tasks()
        .filter(|task| {
            !completed.contains(task.name())
                && task
                    .dependencies()
                    .iter()
                    .all(|dep| completed.contains(dep))
        })
        .collect()
}

async fn emit(events: &Option<mpsc::Sender<ExecEvent>>, event: ExecEvent) {
    if let Some(tx) = events {
        if tx.send(event).await.is_err() {
            debug!("event receiver dropped; continuing without progress events");
        }
    }
}
