use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Row counters shared across stages and batch workers.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub processed: usize,
    pub failed: usize,
}

#[derive(Default)]
struct Metrics {
    processed: usize,
    failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    /// Records a finished batch of `total` rows of which `failed` were rejected.
    pub fn record_batch(&self, total: usize, failed: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += total;
            metrics.failed += failed;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                processed: metrics.processed,
                failed: metrics.failed,
            }
        } else {
            MetricsSnapshot::default()
        }
    }

    pub fn reset(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            *metrics = Metrics::default();
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
