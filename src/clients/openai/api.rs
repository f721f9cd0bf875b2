use crate::error::Result;
use crate::models::run::{Run, RunCreateRequest};
use crate::models::thread::{MessageCreateRequest, Thread, ThreadMessage};
use crate::models::{ChatRequest, ChatResponse};

/// The remote operations the client is built on.
///
/// `OpenAiService` talks HTTP; tests swap in an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait OpenAiApi {
    async fn chat_completions(&self, request: &ChatRequest) -> Result<ChatResponse>;

    async fn create_thread(&self) -> Result<Thread>;

    async fn create_message(
        &self,
        thread_id: &str,
        request: &MessageCreateRequest,
    ) -> Result<ThreadMessage>;

    /// Messages of a thread, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;

    async fn create_run(&self, thread_id: &str, request: &RunCreateRequest) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;
}
