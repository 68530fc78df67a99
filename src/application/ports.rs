//! Ports (interfaces) for the application layer.
//!
//! Ports define what the application layer needs from the outside world;
//! infrastructure adapters implement them. The governor and windower only
//! ever see these traits, which is what lets tests substitute a controlled
//! clock, store, or generator.

use std::fmt::{self, Debug};
use std::time::Instant;

use async_trait::async_trait;

use crate::domain::entry::WindowEntry;

/// Port for obtaining current time.
///
/// Injected so elapsed time can be simulated in tests instead of slept
/// through. Infrastructure provides `SystemClock` for production and
/// `MockClock` (in `infrastructure::mocks`) for tests.
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Port for the concurrent identity-to-entry map backing the governor.
///
/// `with_entry_mut` must give the closure exclusive access to the entry for
/// its whole duration: the governor's check-then-increment runs inside it,
/// so two parallel checks for one identity can never both observe the same
/// count. Infrastructure provides `IdentityStore` (dashmap-backed).
pub trait EntryStore: Send + Sync + Debug {
    /// Access an identity's entry with mutable access, creating it via
    /// `vacant` if absent.
    ///
    /// # Arguments
    /// * `identity` - The identity to look up
    /// * `vacant` - Produces the placeholder entry for a first-seen identity
    /// * `accessor` - Runs with exclusive access to the entry
    fn with_entry_mut<R>(
        &self,
        identity: &str,
        vacant: impl FnOnce() -> WindowEntry,
        accessor: impl FnOnce(&mut WindowEntry) -> R,
    ) -> R;

    /// Number of tracked identities.
    fn len(&self) -> usize;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries.
    fn clear(&self);

    /// Remove entries for which the predicate returns false.
    fn retain(&self, f: impl FnMut(&str, &mut WindowEntry) -> bool);
}

/// Error from the text-generation capability.
///
/// Never escapes the windower: any generation failure degrades the result
/// to an empty summary instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The provider rejected or failed the call
    Provider(String),
    /// The call did not complete within the deadline
    TimedOut,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Provider(reason) => {
                write!(f, "text generation provider error: {reason}")
            }
            GenerationError::TimedOut => write!(f, "text generation timed out"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Port for the external text-generation capability.
///
/// Owned and implemented outside this crate (the language-model client).
/// This is the governor core's sole suspension point.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` under `system_instruction`,
    /// producing at most `max_output_tokens` tokens.
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GenerationError>;
}
