pub mod api;
pub mod client;
pub mod poller;
pub mod service;

pub use api::OpenAiApi;
pub use client::OpenAiClient;
pub use poller::{extract_latest_assistant_text, poll_run, PollPolicy};
pub use service::OpenAiService;
