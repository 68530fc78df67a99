//! Context windowing with summarize-and-truncate.
//!
//! The windower bounds how much conversation is sent to the language model.
//! Short conversations pass through untouched; long ones keep their trailing
//! messages and compress everything older into a short summary produced by
//! the injected text-generation capability. A failed or slow summarization
//! never fails the request — the caller gets an empty summary and the same
//! trailing messages.

use std::sync::Arc;

use tokio::time::timeout;
use tracing::warn;

use crate::application::config::WindowerConfig;
use crate::application::metrics::Metrics;
use crate::application::ports::{GenerationError, TextGenerator};
use crate::domain::message::ConversationMessage;
use crate::domain::transcript;

/// Fixed system instruction for the summarization call.
const SUMMARY_INSTRUCTION: &str = "Summarize the conversation excerpt in 3 to 5 sentences, \
     written in the conversation's own language. Cover the topics discussed, any decisions \
     made, and which issues were resolved or remain open.";

/// Result of reducing a conversation to its context window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowResult {
    /// Summary of the messages that were cut off. `None` when nothing was
    /// cut; `Some("")` when summarization was skipped or failed.
    pub summary: Option<String>,
    /// The trailing messages, in original order.
    pub messages: Vec<ConversationMessage>,
}

/// Bounds conversational context by summarizing old turns into a short
/// narrative and keeping only the most recent messages.
///
/// The summarization call is this core's sole suspension point and runs
/// under the configured deadline. [`reduce`](Self::reduce) is infallible:
/// every failure path degrades to an empty summary.
pub struct ContextWindower {
    generator: Arc<dyn TextGenerator>,
    config: WindowerConfig,
    metrics: Metrics,
}

impl ContextWindower {
    /// Create a windower over the given text-generation capability.
    pub fn new(generator: Arc<dyn TextGenerator>, config: WindowerConfig) -> Self {
        Self {
            generator,
            config,
            metrics: Metrics::new(),
        }
    }

    /// Reduce with the configured `max_messages`.
    pub async fn reduce(&self, messages: Vec<ConversationMessage>) -> WindowResult {
        self.reduce_to(messages, self.config.max_messages).await
    }

    /// Reduce `messages` to at most `max_messages` trailing messages.
    ///
    /// When the input already fits, it is returned unchanged with no
    /// summary. Otherwise the result's `messages` is exactly the trailing
    /// `max_messages` elements in original order, and `summary` is `Some`:
    /// the generated narrative, or `""` when the older transcript was
    /// vacuous or the generation call failed or timed out.
    pub async fn reduce_to(
        &self,
        messages: Vec<ConversationMessage>,
        max_messages: usize,
    ) -> WindowResult {
        if messages.len() <= max_messages {
            return WindowResult {
                summary: None,
                messages,
            };
        }

        let mut older = messages;
        let recent = older.split_off(older.len() - max_messages);
        let summary = self.summarize(&older).await;

        WindowResult {
            summary: Some(summary),
            messages: recent,
        }
    }

    /// Counters for generated, skipped, and recovered-failed summaries.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    async fn summarize(&self, older: &[ConversationMessage]) -> String {
        let rendered = transcript::render(older, self.config.min_line_len);
        if rendered.is_empty() {
            // Vacuous transcript: nothing to summarize, skip the call.
            self.metrics.record_summary_skipped();
            return String::new();
        }

        let prompt = transcript::clamp_chars(&rendered, self.config.max_prompt_chars);
        let call = self
            .generator
            .generate(SUMMARY_INSTRUCTION, prompt, self.config.max_summary_tokens);

        let outcome = match timeout(self.config.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::TimedOut),
        };

        match outcome {
            Ok(summary) => {
                self.metrics.record_summary();
                summary
            }
            Err(error) => {
                warn!(%error, "summarization failed, continuing without a summary");
                self.metrics.record_summary_failure();
                String::new()
            }
        }
    }
}
