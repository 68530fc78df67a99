//! Demo walking through admission control, context windowing, and the
//! reaper lifecycle with a canned text generator in place of a real
//! language-model client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chat_governor::{
    ContextWindower, ConversationMessage, GenerationError, GovernorConfig, IdentityStore,
    RateGovernor, ReaperConfig, StaleEntryReaper, SystemClock, TextGenerator, WindowerConfig,
};

/// Stand-in for the language-model client the application would inject.
#[derive(Debug)]
struct CannedGenerator;

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(
        &self,
        _system_instruction: &str,
        prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        Ok(format!(
            "The user and assistant exchanged {} turns about an order.",
            prompt.lines().count()
        ))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Admission Control ===\n");

    let config = GovernorConfig::new(5, Duration::from_secs(60)).unwrap();
    let governor = RateGovernor::new(
        config,
        Arc::new(IdentityStore::new()),
        Arc::new(SystemClock::new()),
    );

    println!("Policy: at most 5 requests per identity per minute\n");
    for attempt in 1..=8 {
        let decision = governor.check("user-42");
        println!(
            "attempt {attempt}: allowed={} remaining={}",
            decision.allowed, decision.remaining
        );
    }

    let snapshot = governor.metrics().snapshot();
    println!(
        "\nadmitted={} rejected={} rejection_rate={:.0}%",
        snapshot.checks_admitted,
        snapshot.checks_rejected,
        snapshot.rejection_rate() * 100.0
    );

    println!("\n=== Context Windowing ===\n");

    let windower = ContextWindower::new(Arc::new(CannedGenerator), WindowerConfig::default());

    let mut messages = Vec::new();
    for i in 0..26 {
        if i % 2 == 0 {
            messages.push(ConversationMessage::user(format!(
                "question {i}: where is my order right now?"
            )));
        } else {
            messages.push(ConversationMessage::assistant(format!(
                "answer {i}: your order is on its way."
            )));
        }
    }

    println!("Conversation has {} messages, window keeps 20\n", messages.len());
    let window = windower.reduce(messages).await;
    println!("kept messages : {}", window.messages.len());
    println!("summary       : {}", window.summary.as_deref().unwrap_or("<none>"));

    println!("\n=== Reaper Lifecycle ===\n");

    let reaper = StaleEntryReaper::new(
        governor.clone(),
        ReaperConfig::new(Duration::from_secs(1)).unwrap(),
    );
    let handle = reaper.start();
    println!("reaper started (1s sweep interval)");

    tokio::time::sleep(Duration::from_millis(1500)).await;
    println!("tracked identities: {}", governor.entry_count());

    handle.shutdown().await.unwrap();
    println!("reaper shut down cleanly");
}
