//! Per-template sink metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single template's sink
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Total successful renders
    render_count: AtomicU64,
    /// Total failed render attempts
    failure_count: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total render count
    pub fn render_count(&self) -> u64 {
        self.render_count.load(Ordering::Relaxed)
    }

    /// Increment render count
    pub fn inc_render_count(&self) {
        self.render_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            render_count: self.render_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Point-in-time copy of sink metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total successful renders
    pub render_count: u64,
    /// Total failed render attempts
    pub failure_count: u64,
}
