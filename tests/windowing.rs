//! Integration tests for context windowing.

use std::sync::Arc;
use std::time::Duration;

use chat_governor::infrastructure::mocks::MockGenerator;
use chat_governor::{
    ContextWindower, ConversationMessage, MessagePart, Role, WindowerConfig,
};

fn conversation(len: usize) -> Vec<ConversationMessage> {
    (0..len)
        .map(|i| {
            if i % 2 == 0 {
                ConversationMessage::user(format!("message {i}: asking about the delivery"))
            } else {
                ConversationMessage::assistant(format!("message {i}: replying with an update"))
            }
        })
        .collect()
}

#[tokio::test]
async fn input_at_the_limit_is_returned_unchanged() {
    let generator = MockGenerator::replying("unused");
    let windower = ContextWindower::new(Arc::new(generator.clone()), WindowerConfig::default());

    let messages = conversation(20);
    let result = windower.reduce_to(messages.clone(), 20).await;

    assert_eq!(result.summary, None);
    assert_eq!(result.messages, messages);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn twenty_five_messages_keep_the_last_twenty() {
    let generator = MockGenerator::replying("the user asked about a delivery");
    let windower = ContextWindower::new(Arc::new(generator.clone()), WindowerConfig::default());

    let messages = conversation(25);
    let result = windower.reduce_to(messages.clone(), 20).await;

    // Exactly the trailing 20, in original order.
    assert_eq!(result.messages.len(), 20);
    assert_eq!(result.messages, messages[5..].to_vec());

    // The older transcript was non-empty, so the summary is the narrative.
    assert_eq!(
        result.summary.as_deref(),
        Some("the user asked about a delivery")
    );

    // The prompt is built from the older five messages only.
    let prompt = generator.prompts().remove(0);
    assert!(prompt.starts_with("User: message 0"));
    assert!(prompt.contains("message 4"));
    assert!(!prompt.contains("message 5"));
}

#[tokio::test]
async fn generator_error_never_escapes() {
    let generator = MockGenerator::failing("backend exploded");
    let windower = ContextWindower::new(Arc::new(generator), WindowerConfig::default());

    let messages = conversation(30);
    let result = windower.reduce_to(messages.clone(), 20).await;

    assert_eq!(result.summary.as_deref(), Some(""));
    assert_eq!(result.messages, messages[10..].to_vec());
    assert_eq!(windower.metrics().summaries_failed(), 1);
    assert_eq!(windower.metrics().summaries_generated(), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_generator_hits_the_deadline_and_degrades() {
    let generator = MockGenerator::hanging();
    let config = WindowerConfig::default().with_timeout(Duration::from_secs(5));
    let windower = ContextWindower::new(Arc::new(generator.clone()), config);

    let messages = conversation(25);
    let result = windower.reduce_to(messages, 20).await;

    assert_eq!(result.summary.as_deref(), Some(""));
    assert_eq!(result.messages.len(), 20);
    assert_eq!(generator.call_count(), 1);
    assert_eq!(windower.metrics().summaries_failed(), 1);
}

#[tokio::test]
async fn noop_turns_are_not_worth_a_generation_call() {
    let generator = MockGenerator::replying("unused");
    let windower = ContextWindower::new(Arc::new(generator.clone()), WindowerConfig::default());

    // Older slice: acknowledgements and a bare image, nothing summarizable.
    let mut messages = vec![
        ConversationMessage::user("ok"),
        ConversationMessage::assistant("ok!"),
        ConversationMessage::with_parts(
            Role::User,
            vec![MessagePart::Media {
                mime_type: "image/png".into(),
            }],
        ),
    ];
    messages.extend(conversation(20));

    let result = windower.reduce_to(messages, 20).await;

    assert_eq!(result.summary.as_deref(), Some(""));
    assert_eq!(generator.call_count(), 0);
    assert_eq!(windower.metrics().summaries_skipped(), 1);
}

#[tokio::test]
async fn structured_parts_contribute_text_only() {
    let generator = MockGenerator::replying("summary");
    let windower = ContextWindower::new(Arc::new(generator.clone()), WindowerConfig::default());

    let mut messages = vec![ConversationMessage::with_parts(
        Role::User,
        vec![
            MessagePart::Text {
                text: "please look at this photo of the broken part".into(),
            },
            MessagePart::Media {
                mime_type: "image/jpeg".into(),
            },
        ],
    )];
    messages.extend(conversation(20));

    let result = windower.reduce_to(messages, 20).await;
    assert!(result.summary.is_some());

    let prompt = generator.prompts().remove(0);
    assert_eq!(prompt, "User: please look at this photo of the broken part");
}

#[tokio::test]
async fn oversized_transcript_is_clamped() {
    let generator = MockGenerator::replying("summary");
    let config = WindowerConfig::default().with_max_prompt_chars(100);
    let windower = ContextWindower::new(Arc::new(generator.clone()), config);

    let result = windower.reduce_to(conversation(40), 20).await;
    assert!(result.summary.is_some());

    let prompt = generator.prompts().remove(0);
    assert_eq!(prompt.chars().count(), 100);
}

#[tokio::test]
async fn reduce_defaults_to_twenty_messages() {
    let generator = MockGenerator::replying("summary");
    let windower = ContextWindower::new(Arc::new(generator), WindowerConfig::default());

    let result = windower.reduce(conversation(23)).await;
    assert_eq!(result.messages.len(), 20);
    assert!(result.summary.is_some());

    let passthrough = ContextWindower::new(
        Arc::new(MockGenerator::replying("unused")),
        WindowerConfig::default(),
    );
    let result = passthrough.reduce(conversation(20)).await;
    assert_eq!(result.summary, None);
}
