use std::fmt;

use serde::{Deserialize, Serialize};

pub mod chat_request;
pub mod chat_response;
pub mod run;
pub mod thread;

pub use chat_request::ChatRequest;
pub use chat_response::{ChatResponse, Choice, FinishReason};

/// Author of a message, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conversation turn supplied by the caller of a chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    User(String),
    Assistant(String),
}

impl Message {
    pub fn content(&self) -> &str {
        match self {
            Message::User(content) | Message::Assistant(content) => content,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::User(_) => Role::User,
            Message::Assistant(_) => Role::Assistant,
        }
    }
}

/// Chat completion message in wire form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        ChatMessage {
            role: Role::System,
            content: Some(content.to_string()),
        }
    }

    /// Maps back to a caller-facing message. System and unknown roles have no counterpart.
    pub fn into_message(self) -> Option<Message> {
        let content = self.content.unwrap_or_default();
        match self.role {
            Role::User => Some(Message::User(content)),
            Role::Assistant => Some(Message::Assistant(content)),
            Role::System | Role::Other(_) => None,
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        ChatMessage {
            role: message.role(),
            content: Some(message.content().to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_maps_to_user_role() {
        let wire = ChatMessage::from(&Message::User("x".to_string()));
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "x"}));
    }

    #[test]
    fn test_assistant_wire_message_maps_back() {
        let wire: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hello"}"#).unwrap();
        assert_eq!(
            wire.into_message(),
            Some(Message::Assistant("hello".to_string()))
        );
    }

    #[test]
    fn test_system_wire_message_has_no_caller_form() {
        assert_eq!(ChatMessage::system("be brief").into_message(), None);
    }

    #[test]
    fn test_unknown_role_is_kept_raw() {
        let role: Role = serde_json::from_str(r#""tool""#).unwrap();
        assert_eq!(role, Role::Other("tool".to_string()));
        assert_eq!(serde_json::to_string(&role).unwrap(), r#""tool""#);
    }

    #[test]
    fn test_null_content_deserializes() {
        let wire: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":null}"#).unwrap();
        assert_eq!(wire.content, None);
    }
}
