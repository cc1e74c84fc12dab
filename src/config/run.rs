// src/config/run.rs

//! Typed run configuration handed from the CLI shell to the core.

use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::loader::load_task_specs;
use crate::config::spec::parse_task_spec;
use crate::dag::TaskSpec;
use crate::errors::{Result, WavedagError};
use crate::exec::ExecutionMode;

/// What the shell should do with a valid graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Validate and print the expected runtime only.
    Validate,
    /// Validate, estimate, then execute and compare.
    Run,
}

/// Everything a run needs, resolved from CLI arguments.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Task specifications: task file entries first, then `-t` tasks.
    pub specs: Vec<TaskSpec>,
    pub mode: Mode,
    pub execution: ExecutionMode,
    /// Wall-clock length of one duration unit.
    pub time_unit: Duration,
}

impl RunConfig {
    /// Resolve CLI arguments: read the task file (if any), parse every
    /// `-t` string and check the shell options.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        if args.time_unit_ms == 0 {
            return Err(WavedagError::ConfigError(
                "--time-unit-ms must be >= 1 (got 0)".to_string(),
            ));
        }

        let mut specs = match &args.file {
            Some(path) => load_task_specs(path)?,
            None => Vec::new(),
        };

        for raw in &args.tasks {
            specs.push(parse_task_spec(raw)?);
        }

        if specs.is_empty() {
            return Err(WavedagError::NoTasks);
        }

        let mode = if args.run { Mode::Run } else { Mode::Validate };
        let execution = if args.serial {
            ExecutionMode::Serial
        } else {
            ExecutionMode::Parallel
        };

        Ok(Self {
            specs,
            mode,
            execution,
            time_unit: Duration::from_millis(args.time_unit_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("wavedag").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn resolves_tasks_and_modes() {
        let cfg = RunConfig::from_args(&args(&[
            "-t",
            "A, 2, []",
            "--task",
            "B, 3, [A]",
            "--run",
            "--serial",
            "--time-unit-ms",
            "10",
        ]))
        .unwrap();

        assert_eq!(cfg.specs.len(), 2);
        assert_eq!(cfg.specs[1].dependencies, vec!["A"]);
        assert_eq!(cfg.mode, Mode::Run);
        assert_eq!(cfg.execution, ExecutionMode::Serial);
        assert_eq!(cfg.time_unit, Duration::from_millis(10));
    }

    #[test]
    fn validate_mode_defaults_to_parallel_seconds() {
        let cfg = RunConfig::from_args(&args(&["-t", "A, 2, []", "--validate"])).unwrap();
        assert_eq!(cfg.mode, Mode::Validate);
        assert_eq!(cfg.execution, ExecutionMode::Parallel);
        assert_eq!(cfg.time_unit, Duration::from_secs(1));
    }

    #[test]
    fn no_tasks_is_an_error() {
        let err = RunConfig::from_args(&args(&["--validate"])).unwrap_err();
        assert!(matches!(err, WavedagError::NoTasks));
    }

    #[test]
    fn zero_time_unit_is_rejected() {
        let err = RunConfig::from_args(&args(&["-t", "A, 1, []", "--run", "--time-unit-ms", "0"]))
            .unwrap_err();
        assert!(matches!(err, WavedagError::ConfigError(_)));
    }

    #[test]
    fn validate_and_run_are_exclusive_and_one_is_required() {
        let both = CliArgs::try_parse_from(["wavedag", "-t", "A, 1, []", "--validate", "--run"]);
        assert!(both.is_err());

        let neither = CliArgs::try_parse_from(["wavedag", "-t", "A, 1, []"]);
        assert!(neither.is_err());
    }
}
