// src/config/mod.rs

//! Input handling for wavedag.
//!
//! Responsibilities:
//! - Parse `-t/--task` strings into task specifications (`spec.rs`).
//! - Define the TOML task file model (`model.rs`) and load it (`loader.rs`).
//! - Resolve CLI arguments into a typed [`RunConfig`] (`run.rs`).

pub mod loader;
pub mod model;
pub mod run;
pub mod spec;

pub use loader::{load_from_path, load_task_specs};
pub use model::{TaskEntry, TaskFile};
pub use run::{Mode, RunConfig};
pub use spec::parse_task_spec;
