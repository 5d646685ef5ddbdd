use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,
    cache_hits: AtomicUsize,

    // Timing (in microseconds)
    total_analyze_time_us: AtomicU64,
    analyses_run: AtomicUsize,

    // Counts
    total_spans_tagged: AtomicUsize,
    total_structure_items: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            total_analyze_time_us: AtomicU64::new(0),
            analyses_run: AtomicUsize::new(0),
            total_spans_tagged: AtomicUsize::new(0),
            total_structure_items: AtomicUsize::new(0),
        })
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_analysis(&self, duration: Duration, spans: usize, items: usize) {
        self.total_analyze_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.analyses_run.fetch_add(1, Ordering::Relaxed);
        self.total_spans_tagged.fetch_add(spans, Ordering::Relaxed);
        self.total_structure_items.fetch_add(items, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            avg_analyze_time_ms: self.avg_time_ms(&self.total_analyze_time_us, &self.analyses_run),
            total_spans_tagged: self.total_spans_tagged.load(Ordering::Relaxed),
            total_structure_items: self.total_structure_items.load(Ordering::Relaxed),
        }
    }

    fn avg_time_ms(&self, total_us: &AtomicU64, count: &AtomicUsize) -> f64 {
        let total = total_us.load(Ordering::Relaxed) as f64;
        let cnt = count.load(Ordering::Relaxed) as f64;
        if cnt > 0.0 {
            total / cnt / 1000.0 // Convert to ms
        } else {
            0.0
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub cache_hits: usize,
    pub avg_analyze_time_ms: f64,
    pub total_spans_tagged: usize,
    pub total_structure_items: usize,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts() {
        let metrics = Metrics::new();
        metrics.record_request(true);
        metrics.record_request(false);
        metrics.record_analysis(Duration::from_millis(4), 10, 3);
        metrics.record_analysis(Duration::from_millis(2), 6, 2);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 2);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.total_spans_tagged, 16);
        assert_eq!(snapshot.total_structure_items, 5);
        assert!((snapshot.avg_analyze_time_ms - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_without_samples() {
        assert_eq!(Metrics::new().snapshot().avg_analyze_time_ms, 0.0);
    }
}
