// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

/// Command-line arguments for `wavedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wavedag",
    version,
    about = "Validate a task dependency graph, estimate its critical-path runtime and run it in waves.",
    long_about = None
)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["validate", "run"])
))]
pub struct CliArgs {
    /// Task specification: `name, duration, [dep1, dep2, ...]`.
    ///
    /// May be given many times. Dependencies may be a JSON array of strings
    /// or a bare bracketed list.
    #[arg(short = 't', long = "task", value_name = "TASK")]
    pub tasks: Vec<String>,

    /// TOML task file with `[task.<name>]` sections (`duration`, `after`).
    ///
    /// Tasks from the file come before tasks given with `-t`.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verify the task list and print the expected runtime.
    #[arg(long)]
    pub validate: bool,

    /// Execute the tasks and compare actual with expected runtime.
    #[arg(long)]
    pub run: bool,

    /// Launch one ready task per wave instead of all of them.
    #[arg(long)]
    pub serial: bool,

    /// Milliseconds of wall-clock time per duration unit.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub time_unit_ms: u64,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WAVEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
