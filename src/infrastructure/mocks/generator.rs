//! Scripted text generator for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{GenerationError, TextGenerator};

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(String),
    Hang,
}

/// Scripted [`TextGenerator`] double.
///
/// Records every prompt it receives and then either replies with a canned
/// summary, fails with a provider error, or never resolves (for exercising
/// the windower's timeout path).
#[derive(Clone)]
pub struct MockGenerator {
    script: Script,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    /// A generator that answers every call with `summary`.
    pub fn replying(summary: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(summary.into()))
    }

    /// A generator that fails every call with a provider error.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(reason.into()))
    }

    /// A generator whose calls never resolve.
    pub fn hanging() -> Self {
        Self::with_script(Script::Hang)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .expect("MockGenerator mutex poisoned - a test thread panicked while holding the lock")
            .len()
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .expect("MockGenerator mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        _system_instruction: &str,
        prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .expect("MockGenerator mutex poisoned - a test thread panicked while holding the lock")
            .push(prompt.to_owned());

        match &self.script {
            Script::Reply(summary) => Ok(summary.clone()),
            Script::Fail(reason) => Err(GenerationError::Provider(reason.clone())),
            Script::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
        }
    }
}
