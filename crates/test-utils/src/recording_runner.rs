use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use wavedag::exec::{scale_duration, ScheduledTask, TaskRunner};

/// One task execution as observed by [`RecordingRunner`].
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub name: String,
    pub wave: usize,
    pub started: Instant,
    pub finished: Instant,
}

/// A runner that:
/// - sleeps for the scaled duration, like the production runner
/// - records when each task started and finished.
#[derive(Debug, Clone)]
pub struct RecordingRunner {
    time_unit: Duration,
    records: Arc<Mutex<Vec<RunRecord>>>,
}

impl RecordingRunner {
    pub fn new(time_unit: Duration) -> Self {
        Self {
            time_unit,
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the records, usable after the runner moved into an
    /// executor.
    pub fn records(&self) -> Arc<Mutex<Vec<RunRecord>>> {
        Arc::clone(&self.records)
    }
}

impl TaskRunner for RecordingRunner {
    fn run_task(&self, task: ScheduledTask) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        let sleep_for = scale_duration(self.time_unit, task.duration);
        let records = Arc::clone(&self.records);

        Box::pin(async move {
            let started = Instant::now();
            tokio::time::sleep(sleep_for).await;
            let finished = Instant::now();

            let mut guard = records.lock().unwrap();
            guard.push(RunRecord {
                name: task.name,
                wave: task.wave,
                started,
                finished,
            });
        })
    }
}
