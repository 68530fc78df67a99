//! Observability counters for the governor core.
//!
//! Rate-limit rejections and recovered summarization failures are expected
//! outcomes, not errors, so they surface here as counters rather than in a
//! log stream.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters tracking governor and windower activity.
///
/// Cloning is cheap and all clones share the same counters. Updates use
/// relaxed atomics; reads may briefly lag under contention.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Checks that were admitted
    checks_admitted: AtomicU64,
    /// Checks refused because the window was full
    checks_rejected: AtomicU64,
    /// Summaries produced by the text-generation capability
    summaries_generated: AtomicU64,
    /// Summarization calls that failed or timed out and were recovered
    summaries_failed: AtomicU64,
    /// Reductions that skipped the generation call on a vacuous transcript
    summaries_skipped: AtomicU64,
    /// Expired entries removed by sweeps
    entries_reaped: AtomicU64,
}

impl Metrics {
    /// Create a new metrics handle with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_admitted(&self) {
        self.inner.checks_admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.inner.checks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_summary(&self) {
        self.inner
            .summaries_generated
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_summary_failure(&self) {
        self.inner.summaries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_summary_skipped(&self) {
        self.inner.summaries_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reaped(&self, count: u64) {
        self.inner.entries_reaped.fetch_add(count, Ordering::Relaxed);
    }

    /// Total checks admitted.
    pub fn checks_admitted(&self) -> u64 {
        self.inner.checks_admitted.load(Ordering::Relaxed)
    }

    /// Total checks refused.
    pub fn checks_rejected(&self) -> u64 {
        self.inner.checks_rejected.load(Ordering::Relaxed)
    }

    /// Total summaries produced.
    pub fn summaries_generated(&self) -> u64 {
        self.inner.summaries_generated.load(Ordering::Relaxed)
    }

    /// Total summarization failures recovered into empty summaries.
    pub fn summaries_failed(&self) -> u64 {
        self.inner.summaries_failed.load(Ordering::Relaxed)
    }

    /// Total reductions that skipped summarization.
    pub fn summaries_skipped(&self) -> u64 {
        self.inner.summaries_skipped.load(Ordering::Relaxed)
    }

    /// Total expired entries removed by sweeps.
    pub fn entries_reaped(&self) -> u64 {
        self.inner.entries_reaped.load(Ordering::Relaxed)
    }

    /// Get a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            checks_admitted: self.checks_admitted(),
            checks_rejected: self.checks_rejected(),
            summaries_generated: self.summaries_generated(),
            summaries_failed: self.summaries_failed(),
            summaries_skipped: self.summaries_skipped(),
            entries_reaped: self.entries_reaped(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inner.checks_admitted.store(0, Ordering::Relaxed);
        self.inner.checks_rejected.store(0, Ordering::Relaxed);
        self.inner.summaries_generated.store(0, Ordering::Relaxed);
        self.inner.summaries_failed.store(0, Ordering::Relaxed);
        self.inner.summaries_skipped.store(0, Ordering::Relaxed);
        self.inner.entries_reaped.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Checks that were admitted
    pub checks_admitted: u64,
    /// Checks refused because the window was full
    pub checks_rejected: u64,
    /// Summaries produced by the text-generation capability
    pub summaries_generated: u64,
    /// Summarization calls recovered into empty summaries
    pub summaries_failed: u64,
    /// Reductions that skipped the generation call
    pub summaries_skipped: u64,
    /// Expired entries removed by sweeps
    pub entries_reaped: u64,
}

impl MetricsSnapshot {
    /// Total checks processed (admitted + rejected).
    pub fn total_checks(&self) -> u64 {
        self.checks_admitted.saturating_add(self.checks_rejected)
    }

    /// Ratio of rejected checks to total checks (0.0 to 1.0).
    ///
    /// Returns 0.0 when no checks have been processed.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.total_checks();
        if total == 0 {
            0.0
        } else {
            self.checks_rejected as f64 / total as f64
        }
    }
}
