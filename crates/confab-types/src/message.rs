//! Chat history items as they appear inside a persisted session.
//!
//! The orchestrator treats messages as opaque apart from their role and
//! their rendered text, so unknown fields are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::fmt;
use std::str::FromStr;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Thinking,
    Tool,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::Thinking => write!(f, "thinking"),
            MessageRole::Tool => write!(f, "tool"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "thinking" => Ok(MessageRole::Thinking),
            "tool" => Ok(MessageRole::Tool),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// One part of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessagePart {
    Text {
        text: String,
    },
    ImageUrl {
        #[serde(rename = "imageUrl")]
        image_url: ImageUrl,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Message body: either plain text or an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

/// A single message exchanged with a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: MessageContent,
    /// Fields this crate does not interpret (tool calls, ids, ...).
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
            extra: Map::new(),
        }
    }
}

/// An entry in a session's history: the message plus UI-side annotations
/// (context items, edit state, ...) that are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistoryItem {
    pub message: ChatMessage,
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl ChatHistoryItem {
    pub fn new(role: MessageRole, content: impl Into<MessageContent>) -> Self {
        Self {
            message: ChatMessage::new(role, content),
            extra: Map::new(),
        }
    }
}

/// Render a message body as plain text.
///
/// Text parts are joined with newlines; non-text parts are dropped.
pub fn render_chat_message(message: &ChatMessage) -> String {
    match &message.content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                MessagePart::ImageUrl { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
