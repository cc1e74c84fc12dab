// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::TaskFile;
use crate::dag::TaskSpec;
use crate::errors::Result;

/// Load a task file from a given path and return the raw `TaskFile`.
///
/// This only performs TOML deserialization; graph construction and
/// validation happen later, together with tasks given on the command line.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<TaskFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let file: TaskFile = toml::from_str(&contents)?;

    debug!(path = %path.display(), tasks = file.task.len(), "task file loaded");
    Ok(file)
}

/// Load a task file and convert it into task specifications, in file order.
pub fn load_task_specs(path: impl AsRef<Path>) -> Result<Vec<TaskSpec>> {
    Ok(load_from_path(path)?.into_specs())
}
