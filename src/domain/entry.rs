//! Fixed-window admission state.
//!
//! One [`WindowEntry`] exists per identity. The entry carries everything the
//! admission decision needs, so the decision itself is a pure function of the
//! entry, the current instant, and the configured limits.

use std::time::{Duration, Instant};

/// Outcome of registering a request against a window entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request fits in the current window.
    Granted {
        /// Requests left in the window after this one.
        remaining: u32,
    },
    /// The window is full; the entry is left unchanged.
    Refused,
}

impl Admission {
    /// Check if this admission is Granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Admission::Granted { .. })
    }

    /// Check if this admission is Refused.
    pub fn is_refused(&self) -> bool {
        matches!(self, Admission::Refused)
    }
}

/// Per-identity fixed-window counter.
///
/// An entry is *live* while `now < window_reset_at`. An expired entry is
/// equivalent to no entry at all: the next request starts a fresh window.
/// Expiry is lazy — nothing has to delete the entry for admission to be
/// correct, deletion only bounds memory.
///
/// # Example
/// ```
/// use chat_governor::domain::entry::{Admission, WindowEntry};
/// use std::time::{Duration, Instant};
///
/// let now = Instant::now();
/// let window = Duration::from_secs(60);
/// let mut entry = WindowEntry::vacant(now);
///
/// assert_eq!(entry.register(now, 2, window), Admission::Granted { remaining: 1 });
/// assert_eq!(entry.register(now, 2, window), Admission::Granted { remaining: 0 });
/// assert_eq!(entry.register(now, 2, window), Admission::Refused);
///
/// // Once the window lapses the same entry behaves like a fresh one.
/// let later = now + Duration::from_secs(61);
/// assert_eq!(entry.register(later, 2, window), Admission::Granted { remaining: 1 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    count: u32,
    window_reset_at: Instant,
}

impl WindowEntry {
    /// Create a placeholder for an identity that has no live window yet.
    ///
    /// The placeholder is already expired at `now`, so the first
    /// [`register`](Self::register) call opens a fresh window through the
    /// same code path as a lapsed one.
    pub fn vacant(now: Instant) -> Self {
        Self {
            count: 0,
            window_reset_at: now,
        }
    }

    /// Open a fresh window containing one admitted request.
    pub fn open(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            window_reset_at: now + window,
        }
    }

    /// Number of requests admitted in the current window.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Instant at which the current window lapses.
    pub fn window_reset_at(&self) -> Instant {
        self.window_reset_at
    }

    /// Whether the window has lapsed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.window_reset_at
    }

    /// Register one request at `now` under the given limits.
    ///
    /// Lazy expiry: a lapsed window is replaced by a fresh one holding this
    /// request. A refused request leaves the entry untouched.
    pub fn register(&mut self, now: Instant, max_requests: u32, window: Duration) -> Admission {
        if self.is_expired(now) {
            *self = Self::open(now, window);
            return Admission::Granted {
                remaining: max_requests.saturating_sub(1),
            };
        }

        if self.count < max_requests {
            self.count += 1;
            Admission::Granted {
                remaining: max_requests - self.count,
            }
        } else {
            Admission::Refused
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn vacant_entry_opens_fresh_window() {
        let now = Instant::now();
        let mut entry = WindowEntry::vacant(now);

        assert_eq!(
            entry.register(now, 5, WINDOW),
            Admission::Granted { remaining: 4 }
        );
        assert_eq!(entry.count(), 1);
        assert_eq!(entry.window_reset_at(), now + WINDOW);
    }

    #[test]
    fn remaining_decreases_until_refused() {
        let now = Instant::now();
        let mut entry = WindowEntry::vacant(now);

        assert_eq!(
            entry.register(now, 3, WINDOW),
            Admission::Granted { remaining: 2 }
        );
        assert_eq!(
            entry.register(now, 3, WINDOW),
            Admission::Granted { remaining: 1 }
        );
        assert_eq!(
            entry.register(now, 3, WINDOW),
            Admission::Granted { remaining: 0 }
        );
        assert_eq!(entry.register(now, 3, WINDOW), Admission::Refused);
        assert_eq!(entry.register(now, 3, WINDOW), Admission::Refused);
    }

    #[test]
    fn refusal_leaves_entry_unchanged() {
        let now = Instant::now();
        let mut entry = WindowEntry::vacant(now);

        entry.register(now, 1, WINDOW);
        let before = entry.clone();

        assert_eq!(entry.register(now, 1, WINDOW), Admission::Refused);
        assert_eq!(entry, before);
    }

    #[test]
    fn lapsed_window_is_replaced() {
        let now = Instant::now();
        let mut entry = WindowEntry::vacant(now);

        entry.register(now, 2, WINDOW);
        entry.register(now, 2, WINDOW);
        assert_eq!(entry.register(now, 2, WINDOW), Admission::Refused);

        let later = now + WINDOW + Duration::from_secs(1);
        assert_eq!(
            entry.register(later, 2, WINDOW),
            Admission::Granted { remaining: 1 }
        );
        assert_eq!(entry.count(), 1);
        assert_eq!(entry.window_reset_at(), later + WINDOW);
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let now = Instant::now();
        let entry = WindowEntry::open(now, WINDOW);

        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + WINDOW - Duration::from_nanos(1)));
        assert!(entry.is_expired(now + WINDOW));
    }

    #[test]
    fn count_never_exceeds_limit() {
        let now = Instant::now();
        let mut entry = WindowEntry::vacant(now);

        for _ in 0..100 {
            entry.register(now, 7, WINDOW);
        }
        assert_eq!(entry.count(), 7);
    }
}
