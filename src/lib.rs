//! # chat-governor
//!
//! Per-identity rate limiting and context windowing for chat assistants.
//!
//! This crate is the conversational resource governor of a chat assistant:
//! it decides *how often* an identity may invoke the assistant and *how
//! large* the conversational context handed to the language model may grow.
//! It deliberately does not decide *what* the assistant can do — tool
//! execution, authentication, and persistence belong to the surrounding
//! application.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat_governor::{
//!     ContextWindower, ConversationMessage, GovernorConfig, IdentityStore,
//!     RateGovernor, SystemClock, WindowerConfig,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # use chat_governor::{GenerationError, TextGenerator};
//! # #[derive(Debug)] struct LlmClient;
//! # #[async_trait::async_trait]
//! # impl TextGenerator for LlmClient {
//! #     async fn generate(&self, _: &str, _: &str, _: u32) -> Result<String, GenerationError> {
//! #         Ok(String::new())
//! #     }
//! # }
//! # async fn handle(messages: Vec<ConversationMessage>) {
//! // At most 20 requests per identity per minute.
//! let config = GovernorConfig::new(20, Duration::from_secs(60)).unwrap();
//! let governor =
//!     RateGovernor::new(config, Arc::new(IdentityStore::new()), Arc::new(SystemClock::new()));
//!
//! let decision = governor.check("user-42");
//! if !decision.allowed {
//!     // Structured refusal: tell the caller to retry shortly.
//!     return;
//! }
//!
//! // Keep the 20 most recent messages; summarize everything older.
//! let windower = ContextWindower::new(Arc::new(LlmClient), WindowerConfig::default());
//! let window = windower.reduce(messages).await;
//! // window.summary: None (nothing cut) or Some(summary, possibly empty)
//! // window.messages: the trailing messages, in original order
//! # }
//! ```
//!
//! ## Admission control
//!
//! [`RateGovernor::check`] is a fixed-window counter with lazy expiry: the
//! first request for an identity (or the first after its window lapses)
//! opens a fresh window, and each admitted request consumes one slot. A
//! full window refuses with `allowed = false, remaining = 0` — an expected,
//! actionable outcome, never an error. Bursts of up to `2N` across a window
//! boundary are accepted behavior of the fixed-window scheme.
//!
//! The check-then-increment sequence runs inside the store's per-entry
//! critical section, so one governor instance can be shared across worker
//! threads without over-admitting. The store is confined to one process;
//! sharing limits across instances requires an external store and is out of
//! scope here.
//!
//! ## Context windowing
//!
//! [`ContextWindower::reduce`] passes short conversations through untouched
//! and otherwise keeps the trailing `max_messages` messages, compressing the
//! older ones into a 3-5 sentence summary via the injected
//! [`TextGenerator`]. Summarization is best-effort: provider errors and
//! timeouts degrade to an empty summary instead of failing the request, and
//! are observable via [`Metrics`] and a `tracing` warning.
//!
//! ## Memory management
//!
//! Each tracked identity costs one map entry (a counter and an instant,
//! roughly 100 bytes with the key). Expired entries are harmless for
//! correctness but accumulate for as long as new identities keep appearing,
//! so [`StaleEntryReaper`] sweeps them on a fixed period (default 5
//! minutes). The reaper is an explicitly owned task: start it when the
//! application comes up, shut its handle down when the application stops.
//!
//! ## Testing
//!
//! The `test-helpers` feature exposes [`infrastructure::mocks`] with a
//! controllable `MockClock` and a scripted `MockGenerator`:
//!
//! ```toml
//! [dev-dependencies]
//! chat-governor = { version = "*", features = ["test-helpers"] }
//! ```

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    entry::{Admission, WindowEntry},
    message::{ConversationMessage, MessageContent, MessagePart, Role},
};

pub use application::{
    config::{ConfigError, GovernorConfig, WindowerConfig},
    governor::{RateDecision, RateGovernor},
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, EntryStore, GenerationError, TextGenerator},
    windower::{ContextWindower, WindowResult},
};

pub use infrastructure::{
    clock::SystemClock,
    reaper::{ReaperConfig, ReaperHandle, ShutdownError, StaleEntryReaper},
    store::IdentityStore,
};
