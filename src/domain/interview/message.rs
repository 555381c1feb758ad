//! Chat transcript messages and the bounded history window.

use serde::{Deserialize, Serialize};

/// Number of trailing messages included in oracle context.
///
/// Keeps prompts bounded regardless of interview length; older turns are
/// already reflected in the answer sheet.
pub const HISTORY_WINDOW: usize = 6;

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person being interviewed.
    User,
    /// The interviewing assistant.
    Assistant,
}

/// One message in the interview transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message.
    pub role: ChatRole,
    /// Message content.
    pub text: String,
}

impl ChatMessage {
    /// Creates a new message.
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }
}

/// Returns the trailing window of a transcript.
///
/// Truncation is most-recent-first: the last [`HISTORY_WINDOW`] messages
/// are kept, in their original order.
pub fn recent_window(history: &[ChatMessage]) -> &[ChatMessage] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_history_is_returned_whole() {
        let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        assert_eq!(recent_window(&history), &history[..]);
    }

    #[test]
    fn long_history_keeps_most_recent_messages() {
        let history: Vec<ChatMessage> = (0..10)
            .map(|i| ChatMessage::user(format!("message {}", i)))
            .collect();

        let window = recent_window(&history);
        assert_eq!(window.len(), HISTORY_WINDOW);
        assert_eq!(window.first().unwrap().text, "message 4");
        assert_eq!(window.last().unwrap().text, "message 9");
    }

    #[test]
    fn empty_history_yields_empty_window() {
        assert!(recent_window(&[]).is_empty());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
