#![allow(dead_code)]

use std::error::Error;

use wavedag::dag::ValidatedGraph;
use wavedag_test_utils::builders::GraphBuilder;

pub use wavedag_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn Error>>;

/// A(2) -> B(3) -> C(4)
pub fn chain_abc() -> ValidatedGraph {
    GraphBuilder::new()
        .chain(&[("A", 2), ("B", 3), ("C", 4)])
        .validated()
}

/// A(1) fans out to B(5) and C(2), both feed D(1).
pub fn diamond() -> ValidatedGraph {
    GraphBuilder::new()
        .task("A", 1, &[])
        .task("B", 5, &["A"])
        .task("C", 2, &["A"])
        .task("D", 1, &["B", "C"])
        .validated()
}
