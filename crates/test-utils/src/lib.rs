pub mod builders;
pub mod recording_runner;

use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};
use wavedag::dag::ValidatedGraph;
use wavedag::exec::{ExecutionReport, TaskRunner, WaveExecutor};

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Filtered by `WAVEDAG_LOG` (same variable as the binary), defaulting to
/// `wavedag=debug` so failing tests show the wave-by-wave trace.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("WAVEDAG_LOG")
            .unwrap_or_else(|_| EnvFilter::new("wavedag=debug"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Execute `graph`, failing the test if it does not finish within `limit`.
///
/// Under a paused clock `limit` is virtual time, so a generous bound costs
/// nothing while still catching an executor that never reaches its last wave.
pub async fn execute_within<R: TaskRunner>(
    executor: &WaveExecutor<R>,
    graph: &ValidatedGraph,
    limit: Duration,
) -> ExecutionReport {
    tokio::time::timeout(limit, executor.execute(graph))
        .await
        .unwrap_or_else(|_| panic!("execution did not finish within {limit:?}"))
        .expect("execution failed")
}
