//! Per-identity admission control.
//!
//! The governor decides whether an identity may invoke the assistant right
//! now, using a fixed-window counter with lazy expiry. It is synchronous,
//! purely in-memory, and infallible once constructed: capacity exhaustion is
//! a normal result, not an error.

use std::sync::Arc;

use tracing::debug;

use crate::application::config::GovernorConfig;
use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, EntryStore};
use crate::domain::entry::{Admission, WindowEntry};

/// Result of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window; 0 when refused
    pub remaining: u32,
}

/// Fixed-window admission control, one counter per identity.
///
/// The whole check-then-increment sequence executes inside the store's
/// per-entry critical section, so parallel checks for one identity can
/// never over-admit. Windows expire lazily: an entry whose reset instant
/// has passed behaves exactly like a missing one, whether or not the
/// [reaper](crate::infrastructure::reaper::StaleEntryReaper) has deleted it.
///
/// This is a fixed-window counter, not a sliding window: an identity that
/// exhausts a window just before it lapses and again right after can issue
/// up to `2 * max_requests` requests across the boundary. That burst is
/// accepted behavior.
#[derive(Debug, Clone)]
pub struct RateGovernor<S>
where
    S: EntryStore + Clone,
{
    store: S,
    clock: Arc<dyn Clock>,
    config: GovernorConfig,
    metrics: Metrics,
}

impl<S> RateGovernor<S>
where
    S: EntryStore + Clone,
{
    /// Create a governor over the given store and clock.
    pub fn new(config: GovernorConfig, store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            config,
            metrics: Metrics::new(),
        }
    }

    /// Decide whether `identity` may issue another request right now.
    ///
    /// Admission either opens a fresh window (first request, or a lapsed
    /// window), or consumes one slot of the live window. A full live window
    /// refuses the request and leaves the entry untouched; callers should
    /// treat that as "retry after the window resets", not as a failure.
    pub fn check(&self, identity: &str) -> RateDecision {
        let now = self.clock.now();
        let config = self.config;

        let admission = self.store.with_entry_mut(
            identity,
            || WindowEntry::vacant(now),
            |entry| entry.register(now, config.max_requests, config.window),
        );

        match admission {
            Admission::Granted { remaining } => {
                self.metrics.record_admitted();
                RateDecision {
                    allowed: true,
                    remaining,
                }
            }
            Admission::Refused => {
                self.metrics.record_rejected();
                RateDecision {
                    allowed: false,
                    remaining: 0,
                }
            }
        }
    }

    /// Remove entries whose window has already lapsed.
    ///
    /// Returns the number of entries removed. Purely a memory bound:
    /// admission decisions are identical whether or not this ever runs.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.store.len());

        if removed > 0 {
            self.metrics.record_reaped(removed as u64);
            debug!(removed, "swept expired rate entries");
        }
        removed
    }

    /// Number of identities currently tracked, including expired entries
    /// not yet swept.
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// Check if no identities are tracked.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drop all tracked entries.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// The configured limits.
    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Counters for admitted/rejected checks and sweep activity.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
