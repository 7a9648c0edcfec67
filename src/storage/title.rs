//! Title derivation for sessions saved without an explicit title

use super::types::Message;
use chrono::Local;

/// Longest first-message title kept verbatim, in characters
pub const TITLE_MAX_CHARS: usize = 50;

/// Characters kept from a longer first message before the ellipsis
pub const TITLE_KEEP_CHARS: usize = 47;

/// Derive a title from the first non-empty user message.
///
/// Falls back to `Chat YYYY-MM-DD HH:MM` in local time when the transcript
/// has no user text.
pub fn derive_title(messages: &[Message]) -> String {
    messages
        .iter()
        .filter(|m| m.is_user())
        .map(|m| m.content.trim())
        .find(|content| !content.is_empty())
        .map(truncate_title)
        .unwrap_or_else(fallback_title)
}

fn truncate_title(content: &str) -> String {
    if content.chars().count() > TITLE_MAX_CHARS {
        let head: String = content.chars().take(TITLE_KEEP_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

fn fallback_title() -> String {
    format!("Chat {}", Local::now().format("%Y-%m-%d %H:%M"))
}
