use serde::Serialize;
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

/// Point-in-time copy of the analysis counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub datasets_ranked: usize,
    pub fires_ranked: usize,
    pub pairs_correlated: usize,
    pub fires_unpaired: usize,
    pub selection_failures: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_ranked(&self, fires: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.datasets_ranked += 1;
            metrics.fires_ranked += fires;
        }
    }

    pub fn record_correlation(&self, paired: usize, unpaired: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.pairs_correlated += paired;
            metrics.fires_unpaired += unpaired;
        }
    }

    pub fn record_selection_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.selection_failures += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_ranked(12);
        recorder.record_ranked(8);
        recorder.record_correlation(8, 4);
        recorder.record_selection_failure();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.datasets_ranked, 2);
        assert_eq!(snapshot.fires_ranked, 20);
        assert_eq!(snapshot.pairs_correlated, 8);
        assert_eq!(snapshot.fires_unpaired, 4);
        assert_eq!(snapshot.selection_failures, 1);
    }
}
