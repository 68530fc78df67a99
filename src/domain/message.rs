//! Conversation message model.
//!
//! Messages are owned by the surrounding application's conversation store;
//! this crate only reads them. Content is either plain text or a sequence of
//! structured parts, of which only the text-bearing ones contribute to
//! transcripts.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user talking to the assistant
    User,
    /// The assistant itself
    Assistant,
    /// Instructions injected by the application
    System,
}

impl Role {
    /// Label used when rendering transcript lines.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::System => "System",
        }
    }
}

/// One part of a structured message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    /// Plain text.
    Text {
        /// The text content
        text: String,
    },
    /// Non-text payload (image, audio, file reference). Carries no
    /// transcript text.
    Media {
        /// MIME type of the payload
        mime_type: String,
    },
}

/// Message body: plain text, or ordered structured parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// A plain text body
    Text(String),
    /// A structured body made of ordered parts
    Parts(Vec<MessagePart>),
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Who authored the turn
    pub role: Role,
    /// The turn's body
    pub content: MessageContent,
}

impl ConversationMessage {
    /// Create a plain-text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a plain-text assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a message with structured parts.
    pub fn with_parts(role: Role, parts: Vec<MessagePart>) -> Self {
        Self {
            role,
            content: MessageContent::Parts(parts),
        }
    }

    /// The message's text, with non-text parts discarded.
    ///
    /// For structured content, text-bearing parts are joined in order with a
    /// single space.
    pub fn flattened_text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    MessagePart::Text { text } => Some(text.as_str()),
                    MessagePart::Media { .. } => None,
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
