// src/config/spec.rs

//! Parsing of `-t/--task` strings: `name, duration, [dep1, dep2, ...]`.

use crate::dag::{TaskName, TaskSpec};
use crate::errors::{Result, WavedagError};

/// Parse one task specification string.
///
/// The string is split on the first two commas; the third part is the
/// dependency list and may contain commas itself. Accepted dependency lists:
///
/// - empty (no dependencies)
/// - a JSON array of strings: `["A", "B"]`
/// - a bare list: `[A, B]` (items are trimmed; surrounding quotes dropped)
pub fn parse_task_spec(raw: &str) -> Result<TaskSpec> {
    let malformed = |reason: String| WavedagError::MalformedSpec {
        spec: raw.to_string(),
        reason,
    };

    let mut parts = raw.splitn(3, ',').map(str::trim);
    let (Some(name), Some(duration), Some(deps)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed(
            "expected three comma-separated parts (name, duration, dependencies)".to_string(),
        ));
    };

    if name.is_empty() {
        return Err(malformed("task name is empty".to_string()));
    }

    let duration: u64 = duration
        .parse()
        .map_err(|e| malformed(format!("invalid duration '{duration}': {e}")))?;

    let dependencies = parse_dependency_list(deps).map_err(malformed)?;

    Ok(TaskSpec {
        name: name.to_string(),
        duration,
        dependencies,
    })
}

fn parse_dependency_list(raw: &str) -> std::result::Result<Vec<TaskName>, String> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let inner = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("dependency list '{raw}' must be enclosed in [ and ]"))?;

    if let Ok(list) = serde_json::from_str::<Vec<TaskName>>(raw) {
        return match list.iter().find(|dep| dep.trim().is_empty()) {
            Some(_) => Err("dependency names must not be empty".to_string()),
            None => Ok(list),
        };
    }

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            let unquoted = item
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| item.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
                .unwrap_or(item)
                .trim();

            if unquoted.is_empty() {
                Err(format!("empty dependency name in '{raw}'"))
            } else if unquoted.contains(['"', '\'', '[', ']']) {
                Err(format!("invalid dependency name '{item}'"))
            } else {
                Ok(unquoted.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_task_without_dependencies() {
        let spec = parse_task_spec("build, 3, []").unwrap();
        assert_eq!(spec, TaskSpec::new("build", 3, Vec::<String>::new()));

        let spec = parse_task_spec("build,3,").unwrap();
        assert!(spec.dependencies.is_empty());
    }

    #[test]
    fn parses_json_dependency_list() {
        let spec = parse_task_spec(r#"test, 2, ["build", "lint"]"#).unwrap();
        assert_eq!(spec.dependencies, vec!["build", "lint"]);
    }

    #[test]
    fn parses_bare_dependency_list() {
        let spec = parse_task_spec("deploy, 1, [build, 'test' , lint]").unwrap();
        assert_eq!(spec.name, "deploy");
        assert_eq!(spec.dependencies, vec!["build", "test", "lint"]);
    }

    #[test]
    fn rejects_missing_parts() {
        let err = parse_task_spec("build, 3").unwrap_err();
        match err {
            WavedagError::MalformedSpec { spec, reason } => {
                assert_eq!(spec, "build, 3");
                assert!(reason.contains("three"));
            }
            other => panic!("expected MalformedSpec, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(matches!(
            parse_task_spec("build, -1, []"),
            Err(WavedagError::MalformedSpec { .. })
        ));
        assert!(matches!(
            parse_task_spec("build, two, []"),
            Err(WavedagError::MalformedSpec { .. })
        ));
    }

    #[test]
    fn rejects_unbracketed_or_broken_lists() {
        assert!(parse_task_spec("a, 1, b").is_err());
        assert!(parse_task_spec("a, 1, [b").is_err());
        assert!(parse_task_spec("a, 1, [b, , c]").is_err());
        assert!(parse_task_spec(r#"a, 1, [""]"#).is_err());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(parse_task_spec(" , 1, []").is_err());
    }
}
