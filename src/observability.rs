//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    programmers_created: AtomicU64,
    programmers_updated: AtomicU64,
    programmers_deleted: AtomicU64,
    validation_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn programmer_created(&self) {
        self.programmers_created.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "programmers_created", "Metric incremented");
    }

    pub fn programmer_updated(&self) {
        self.programmers_updated.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "programmers_updated", "Metric incremented");
    }

    pub fn programmer_deleted(&self) {
        self.programmers_deleted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "programmers_deleted", "Metric incremented");
    }

    pub fn validation_failed(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "validation_failures", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            programmers_created: self.programmers_created.load(Ordering::Relaxed),
            programmers_updated: self.programmers_updated.load(Ordering::Relaxed),
            programmers_deleted: self.programmers_deleted.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub programmers_created: u64,
    pub programmers_updated: u64,
    pub programmers_deleted: u64,
    pub validation_failures: u64,
}
