// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Mode, RunConfig};
use crate::dag::{Schedule, TaskGraph, ValidatedGraph, estimate_schedule};
use crate::errors::{Result, WavedagError};
use crate::exec::{ExecEvent, ExecutionReport, WaveExecutor, scale_duration};

/// Outcome of one `--validate` or `--run` invocation.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub schedule: Schedule,
    /// `None` in validate mode.
    pub execution: Option<ExecutionReport>,
    pub time_unit: Duration,
}

impl RunReport {
    /// Critical-path estimate in wall-clock terms.
    pub fn expected(&self) -> Duration {
        scale_duration(self.time_unit, self.schedule.makespan())
    }

    /// Actual minus expected runtime, in seconds.
    pub fn delta_secs(&self) -> Option<f64> {
        self.execution
            .as_ref()
            .map(|exec| exec.elapsed_secs() - self.expected().as_secs_f64())
    }
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - argument resolution (task file + `-t` specs)
/// - graph construction and validation
/// - runtime estimation
/// - (in run mode) wave execution with progress output
pub async fn run(args: CliArgs) -> Result<()> {
    let config = RunConfig::from_args(&args)?;
    run_config(config).await?;
    Ok(())
}

/// Run a resolved configuration, printing the report to stdout.
pub async fn run_config(config: RunConfig) -> Result<RunReport> {
    let graph = ValidatedGraph::new(TaskGraph::build(config.specs)?)?;
    let schedule = estimate_schedule(&graph)?;

    info!(
        tasks = graph.graph().len(),
        makespan = schedule.makespan(),
        "task graph validated and estimated"
    );

    let mut report = RunReport {
        schedule,
        execution: None,
        time_unit: config.time_unit,
    };
    print_estimate(&report);

    if config.mode == Mode::Validate {
        return Ok(report);
    }

    let (event_tx, event_rx) = mpsc::channel::<ExecEvent>(64);
    let printer = tokio::spawn(print_events(event_rx, config.time_unit));

    // The executor owns the only sender; dropping it lets the printer drain
    // and finish.
    let execution = {
        let executor = WaveExecutor::sleeping(config.time_unit)
            .with_mode(config.execution)
            .with_events(event_tx);
        executor.execute(&graph).await?
    };

    printer
        .await
        .map_err(|e| WavedagError::TaskJoin(e.to_string()))?;

    report.execution = Some(execution);
    print_runtime(&report);

    Ok(report)
}

fn print_estimate(report: &RunReport) {
    println!(
        "Expected runtime: {} units ({:.2}s).",
        report.schedule.makespan(),
        report.expected().as_secs_f64()
    );
    println!(
        "Critical path: {}",
        report.schedule.critical_path().join(" -> ")
    );
}

fn print_runtime(report: &RunReport) {
    let (Some(exec), Some(delta)) = (report.execution.as_ref(), report.delta_secs()) else {
        return;
    };

    println!("Total runtime in run mode: {:.2}s", exec.elapsed_secs());
    println!("Runtime delta between actual & expected: {delta:.2}s");
    debug!(waves = exec.waves, order = ?exec.completion_order, "run report printed");
}

/// Console output for progress events, until the executor drops its sender.
async fn print_events(mut rx: mpsc::Receiver<ExecEvent>, time_unit: Duration) {
    while let Some(event) = rx.recv().await {
        match event {
            ExecEvent::WaveStarted { wave, tasks } => {
                debug!(wave, ?tasks, "wave started");
            }
            ExecEvent::TaskStarted { task, duration } => {
                println!(
                    "Executing task: {task} (duration: {duration} units, {:.2}s)",
                    scale_duration(time_unit, duration).as_secs_f64()
                );
            }
            ExecEvent::TaskFinished { task, elapsed } => {
                println!(
                    "Task completed: {task} (actual duration: ~{:.2}s)",
                    elapsed.as_secs_f64()
                );
            }
        }
    }
}
