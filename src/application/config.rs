//! Construction-time configuration.
//!
//! Invalid limits are a setup bug, so validation fails fast here instead of
//! surfacing later as odd admission or windowing behavior.

use std::fmt;
use std::time::Duration;

/// Error returned when configuration validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_requests` must be greater than zero
    ZeroMaxRequests,
    /// The admission window duration must be greater than zero
    ZeroWindow,
    /// `max_messages` must be greater than zero
    ZeroMaxMessages,
    /// The reaper interval must be greater than zero
    ZeroReapInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMaxRequests => write!(f, "max_requests must be greater than 0"),
            ConfigError::ZeroWindow => write!(f, "window duration must be greater than 0"),
            ConfigError::ZeroMaxMessages => write!(f, "max_messages must be greater than 0"),
            ConfigError::ZeroReapInterval => write!(f, "reap interval must be greater than 0"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Admission limits for the governor: at most `max_requests` checks per
/// identity per `window`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GovernorConfig {
    /// Maximum requests admitted per identity per window
    pub max_requests: u32,
    /// Length of the fixed window
    pub window: Duration,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window: Duration::from_secs(60),
        }
    }
}

impl GovernorConfig {
    /// Create a validated governor configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroMaxRequests`] or [`ConfigError::ZeroWindow`]
    /// when either limit is zero.
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, ConfigError> {
        if max_requests == 0 {
            return Err(ConfigError::ZeroMaxRequests);
        }
        if window.is_zero() {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(Self {
            max_requests,
            window,
        })
    }
}

/// Tuning for the context windower.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowerConfig {
    /// How many trailing messages survive a reduction
    pub max_messages: usize,
    /// Transcript lines shorter than this many characters are dropped
    pub min_line_len: usize,
    /// Character budget for the summarization prompt
    pub max_prompt_chars: usize,
    /// Output-token budget handed to the text-generation capability
    pub max_summary_tokens: u32,
    /// Deadline for the summarization call
    pub timeout: Duration,
}

impl Default for WindowerConfig {
    fn default() -> Self {
        Self {
            max_messages: 20,
            min_line_len: 12,
            max_prompt_chars: 8_000,
            max_summary_tokens: 256,
            timeout: Duration::from_secs(10),
        }
    }
}

impl WindowerConfig {
    /// Create a windower configuration keeping `max_messages` trailing
    /// messages, with defaults for everything else.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroMaxMessages`] if `max_messages` is zero.
    pub fn new(max_messages: usize) -> Result<Self, ConfigError> {
        if max_messages == 0 {
            return Err(ConfigError::ZeroMaxMessages);
        }
        Ok(Self {
            max_messages,
            ..Self::default()
        })
    }

    /// Set the summarization deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the prompt character budget.
    pub fn with_max_prompt_chars(mut self, max_prompt_chars: usize) -> Self {
        self.max_prompt_chars = max_prompt_chars;
        self
    }

    /// Set the minimum transcript line length.
    pub fn with_min_line_len(mut self, min_line_len: usize) -> Self {
        self.min_line_len = min_line_len;
        self
    }

    /// Set the output-token budget for summaries.
    pub fn with_max_summary_tokens(mut self, max_summary_tokens: u32) -> Self {
        self.max_summary_tokens = max_summary_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn governor_config_rejects_zero_limit() {
        let result = GovernorConfig::new(0, Duration::from_secs(60));
        assert_eq!(result, Err(ConfigError::ZeroMaxRequests));
    }

    #[test]
    fn governor_config_rejects_zero_window() {
        let result = GovernorConfig::new(20, Duration::ZERO);
        assert_eq!(result, Err(ConfigError::ZeroWindow));
    }

    #[test]
    fn governor_config_accepts_valid_limits() {
        let config = GovernorConfig::new(20, Duration::from_secs(60)).unwrap();
        assert_eq!(config.max_requests, 20);
        assert_eq!(config.window, Duration::from_secs(60));
    }

    #[test]
    fn windower_config_rejects_zero_max_messages() {
        assert_eq!(WindowerConfig::new(0), Err(ConfigError::ZeroMaxMessages));
    }

    #[test]
    fn windower_config_defaults() {
        let config = WindowerConfig::default();
        assert_eq!(config.max_messages, 20);
        assert_eq!(config.min_line_len, 12);
        assert_eq!(config.max_prompt_chars, 8_000);
        assert_eq!(config.max_summary_tokens, 256);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn windower_config_setters_chain() {
        let config = WindowerConfig::new(10)
            .unwrap()
            .with_timeout(Duration::from_secs(3))
            .with_max_prompt_chars(500)
            .with_min_line_len(4)
            .with_max_summary_tokens(64);

        assert_eq!(config.max_messages, 10);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_prompt_chars, 500);
        assert_eq!(config.min_line_len, 4);
        assert_eq!(config.max_summary_tokens, 64);
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::ZeroMaxRequests.to_string(),
            "max_requests must be greater than 0"
        );
        assert_eq!(
            ConfigError::ZeroReapInterval.to_string(),
            "reap interval must be greater than 0"
        );
    }
}
