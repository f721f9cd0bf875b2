use serde::{Deserialize, Serialize};

use super::{ChatMessage, Message};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Builds a request whose first message is the system prompt, followed by `messages` in order.
    pub fn new(model: &str, system_message: &str, messages: &[Message]) -> Self {
        let mut wire_messages = Vec::with_capacity(messages.len() + 1);
        wire_messages.push(ChatMessage::system(system_message));
        wire_messages.extend(messages.iter().map(ChatMessage::from));

        ChatRequest {
            model: model.to_string(),
            messages: wire_messages,
        }
    }
}
