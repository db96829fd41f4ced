//! Fallback title taken from a message's text.

use confab_types::message::{render_chat_message, ChatMessage};

/// Longest title, in characters, including the ellipsis.
pub const MAX_TITLE_LENGTH: usize = 100;

const ELLIPSIS: &str = "...";

/// Last non-blank line of the rendered message, capped at [`MAX_TITLE_LENGTH`].
///
/// Returns an empty string when the message has no visible text.
pub fn chat_title_from_message(message: &ChatMessage) -> String {
    let rendered = render_chat_message(message);
    let line = rendered
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    truncate_title(line)
}

fn truncate_title(text: &str) -> String {
    if text.chars().count() <= MAX_TITLE_LENGTH {
        return text.to_string();
    }
    let mut title: String = text
        .chars()
        .take(MAX_TITLE_LENGTH - ELLIPSIS.len())
        .collect();
    title.push_str(ELLIPSIS);
    title
}
