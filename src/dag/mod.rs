// src/dag/mod.rs

//! Task graph model, validation and runtime estimation.
//!
//! - [`graph`] holds the tasks, their durations and dependency edges.
//! - [`validate`] checks referential integrity and acyclicity, and produces
//!   the [`ValidatedGraph`] the rest of the crate works with.
//! - [`estimate`] computes the critical-path runtime under unlimited
//!   parallelism.

pub mod estimate;
pub mod graph;
pub mod validate;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

pub use estimate::{Schedule, TaskTiming, estimate_runtime, estimate_schedule};
pub use graph::{Task, TaskGraph, TaskSpec};
pub use validate::{ValidatedGraph, validate};
