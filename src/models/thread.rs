use serde::{Deserialize, Serialize};

use super::Role;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Thread {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TextValue {
    pub value: String,
}

/// One content segment of a thread message. Only text segments carry text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextValue },
    #[serde(other)]
    Unsupported,
}

impl MessageContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text { text } => Some(text.value.as_str()),
            MessageContent::Unsupported => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThreadMessage {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

impl ThreadMessage {
    /// Text of every text segment, in segment order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(MessageContent::text)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageCreateRequest {
    pub role: Role,
    pub content: String,
}

impl MessageCreateRequest {
    pub fn user(content: &str) -> Self {
        MessageCreateRequest {
            role: Role::User,
            content: content.to_string(),
        }
    }
}

/// Listing of a thread's messages, newest first. Accepts a bare array or the `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageList {
    Page { data: Vec<ThreadMessage> },
    Bare(Vec<ThreadMessage>),
}

impl MessageList {
    pub fn into_messages(self) -> Vec<ThreadMessage> {
        match self {
            MessageList::Page { data } => data,
            MessageList::Bare(messages) => messages,
        }
    }
}
