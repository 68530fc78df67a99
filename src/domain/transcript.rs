//! Transcript rendering for summarization prompts.
//!
//! Turns the older slice of a conversation into the plain-text prompt handed
//! to the text-generation capability: one `Role: text` line per message,
//! no-op turns filtered out, the whole thing clamped to a character budget.

use crate::domain::message::ConversationMessage;

/// Render messages into newline-joined `Role: text` lines.
///
/// Each message contributes its flattened text; messages whose rendered line
/// is shorter than `min_line_len` characters are dropped, which filters
/// empty turns and bare acknowledgements.
pub fn render(messages: &[ConversationMessage], min_line_len: usize) -> String {
    let mut lines = Vec::with_capacity(messages.len());

    for message in messages {
        let text = message.flattened_text();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        let line = format!("{}: {}", message.role.label(), text);
        if line.chars().count() < min_line_len {
            continue;
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Clamp `text` to at most `max_chars` characters without splitting a
/// character.
pub fn clamp_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
