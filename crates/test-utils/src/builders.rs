use wavedag::dag::{TaskGraph, TaskSpec, ValidatedGraph};

/// Builder for task specification lists to simplify test setup.
///
/// ```ignore
/// let graph = GraphBuilder::new()
///     .task("A", 2, &[])
///     .task("B", 3, &["A"])
///     .validated();
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    specs: Vec<TaskSpec>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(mut self, name: &str, duration: u64, deps: &[&str]) -> Self {
        self.specs
            .push(TaskSpec::new(name, duration, deps.iter().copied()));
        self
    }

    /// Linear chain: each task depends on the previous one.
    pub fn chain(mut self, tasks: &[(&str, u64)]) -> Self {
        let mut previous: Option<&str> = None;
        for &(name, duration) in tasks {
            let deps: Vec<&str> = previous.into_iter().collect();
            self = self.task(name, duration, &deps);
            previous = Some(name);
        }
        self
    }

    pub fn build(self) -> TaskGraph {
        TaskGraph::build(self.specs).expect("Failed to build task graph from builder")
    }

    pub fn validated(self) -> ValidatedGraph {
        ValidatedGraph::new(self.build()).expect("Failed to validate task graph from builder")
    }
}
