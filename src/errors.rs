// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::dag::TaskName;

#[derive(Error, Debug)]
pub enum WavedagError {
    #[error(
        "task format is invalid: '{spec}'. Expected 'name, duration, [dep1, dep2, ...]'. Details: {reason}"
    )]
    MalformedSpec { spec: String, reason: String },

    #[error("task with name '{0}' already defined")]
    DuplicateTask(TaskName),

    #[error("no tasks given; specify -t/--task or --file to provide task details")]
    NoTasks,

    #[error("dependencies '{}' of task '{task}' are not defined", .missing.join(", "))]
    UndefinedDependencies {
        task: TaskName,
        missing: Vec<TaskName>,
    },

    #[error("cycle detected in task dependencies: {}", .cycle.join(" -> "))]
    DependencyCycle { cycle: Vec<TaskName> },

    #[error("task scheduling error: no ready task while {remaining} task(s) remain unscheduled")]
    SchedulingInconsistency { remaining: usize },

    #[error("task runner failed before reaching the wave barrier: {0}")]
    TaskJoin(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WavedagError>;
