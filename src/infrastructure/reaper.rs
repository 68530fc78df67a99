//! Periodic eviction of stale rate entries.
//!
//! The reaper bounds the governor's memory. Admission is already correct
//! without it (windows expire lazily), so the sweep only deletes entries
//! whose window has lapsed. It runs as an explicitly owned tokio task:
//! [`StaleEntryReaper::start`] returns a handle whose
//! [`shutdown`](ReaperHandle::shutdown) stops the task gracefully, and
//! dropping the handle leaves the task running.

use std::fmt;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::application::config::ConfigError;
use crate::application::governor::RateGovernor;
use crate::application::ports::EntryStore;

/// Configuration for the reaper sweep cadence.
#[derive(Debug, Clone)]
pub struct ReaperConfig {
    /// Time between sweeps
    pub interval: Duration,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
        }
    }
}

impl ReaperConfig {
    /// Create a reaper configuration with the given sweep interval.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroReapInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroReapInterval);
        }
        Ok(Self { interval })
    }
}

/// Error returned when the reaper task fails to stop cleanly.
#[derive(Debug)]
pub struct ShutdownError;

impl fmt::Display for ShutdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reaper task did not shut down cleanly")
    }
}

impl std::error::Error for ShutdownError {}

/// Periodic sweep task over a governor's entry store.
///
/// Owns a clone of the governor; the caller keeps using its own clone, both
/// share the same store, clock, and metrics.
pub struct StaleEntryReaper<S>
where
    S: EntryStore + Clone,
{
    governor: RateGovernor<S>,
    config: ReaperConfig,
}

impl<S> StaleEntryReaper<S>
where
    S: EntryStore + Clone + Send + Sync + 'static,
{
    /// Create a reaper for the given governor.
    pub fn new(governor: RateGovernor<S>, config: ReaperConfig) -> Self {
        Self { governor, config }
    }

    /// Spawn the background sweep task.
    ///
    /// The task sweeps once per configured interval until the returned
    /// handle's [`shutdown`](ReaperHandle::shutdown) is awaited. Dropping
    /// the handle does NOT stop the task.
    pub fn start(self) -> ReaperHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let governor = self.governor;
        let period = self.config.interval;

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            // The first tick completes immediately; consume it so the first
            // sweep happens one full interval after start.
            ticker.tick().await;

            let mut detached = false;
            loop {
                if detached {
                    ticker.tick().await;
                    governor.sweep_expired();
                    continue;
                }

                tokio::select! {
                    outcome = &mut stop_rx => {
                        if outcome.is_ok() {
                            break;
                        }
                        // Handle dropped without shutdown: keep sweeping.
                        detached = true;
                    }
                    _ = ticker.tick() => {
                        governor.sweep_expired();
                    }
                }
            }
        });

        ReaperHandle {
            stop: stop_tx,
            task,
        }
    }
}

/// Handle to a running reaper task.
pub struct ReaperHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Stop the sweep task and wait for it to finish.
    ///
    /// # Errors
    /// Returns [`ShutdownError`] if the task panicked or was aborted before
    /// it could acknowledge the stop signal.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        // The task may already have exited; a failed send is fine.
        let _ = self.stop.send(());
        self.task.await.map_err(|_| ShutdownError)
    }

    /// Whether the sweep task has already exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_zero_interval() {
        assert!(matches!(
            ReaperConfig::new(Duration::ZERO),
            Err(ConfigError::ZeroReapInterval)
        ));
    }

    #[test]
    fn config_default_is_five_minutes() {
        assert_eq!(ReaperConfig::default().interval, Duration::from_secs(300));
    }
}
