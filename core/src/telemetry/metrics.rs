use serde::Serialize;
use std::sync::Mutex;

/// Counters for radius filter runs.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub filters_run: usize,
    pub candidates_evaluated: usize,
    pub candidates_kept: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_filter(&self, evaluated: usize, kept: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.filters_run += 1;
            metrics.candidates_evaluated += evaluated;
            metrics.candidates_kept += kept;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
