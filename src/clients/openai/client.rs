use tracing::debug;

use crate::config::ClientConfiguration;
use crate::error::Result;
use crate::models::thread::MessageCreateRequest;
use crate::models::{ChatRequest, Message};

use super::api::OpenAiApi;
use super::poller::{extract_latest_assistant_text, poll_run, PollPolicy};
use super::service::OpenAiService;

/// Entry point for chat completions and assistant threads.
pub struct OpenAiClient<A = OpenAiService> {
    api: A,
    poll_policy: PollPolicy,
}

impl OpenAiClient<OpenAiService> {
    pub fn new(config: &ClientConfiguration) -> Result<Self> {
        Ok(Self::with_api(OpenAiService::new(config)?))
    }
}

impl<A: OpenAiApi> OpenAiClient<A> {
    pub fn with_api(api: A) -> Self {
        OpenAiClient {
            api,
            poll_policy: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Sends `system_message` followed by `messages` and returns the reply.
    ///
    /// A response with zero or several choices gives `Ok(None)`.
    pub async fn chat_completion(
        &self,
        model: &str,
        system_message: &str,
        messages: &[Message],
    ) -> Result<Option<String>> {
        let request = ChatRequest::new(model, system_message, messages);
        let response = self.api.chat_completions(&request).await?;
        match response.single_choice() {
            Some(choice) => debug!(
                "Chat completion {} finished: {}",
                response.id,
                choice
                    .finish_reason
                    .as_ref()
                    .map_or("unknown", |reason| reason.as_str())
            ),
            None => debug!(
                "Chat completion {} returned {} choices, ignoring",
                response.id,
                response.choices.len()
            ),
        }
        Ok(response.into_single_content())
    }

    pub async fn create_thread(&self) -> Result<String> {
        Ok(self.api.create_thread().await?.id)
    }

    /// Appends a user message and returns its id.
    pub async fn add_message_to_thread(&self, thread_id: &str, content: &str) -> Result<String> {
        let message = self
            .api
            .create_message(thread_id, &MessageCreateRequest::user(content))
            .await?;
        Ok(message.id)
    }

    /// Runs `assistant_id` on the thread, waits for it to complete and returns what it wrote.
    pub async fn run_thread(&self, thread_id: &str, assistant_id: &str) -> Result<Vec<String>> {
        poll_run(&self.api, &self.poll_policy, thread_id, assistant_id).await?;
        let messages = self.api.list_messages(thread_id).await?;
        Ok(extract_latest_assistant_text(messages))
    }
}
