//! Client for the OpenAI chat completions and assistants (threads and runs) endpoints.
//!
//! ```no_run
//! use openai_threads::{ClientConfiguration, OpenAiClient};
//!
//! # async fn demo() -> openai_threads::Result<()> {
//! let client = OpenAiClient::new(&ClientConfiguration::new("sk-..."))?;
//! let thread_id = client.create_thread().await?;
//! client.add_message_to_thread(&thread_id, "What is a run?").await?;
//! for text in client.run_thread(&thread_id, "asst_...").await? {
//!     println!("{}", text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod models;

pub use clients::openai::{OpenAiApi, OpenAiClient, OpenAiService, PollPolicy};
pub use config::{ClientConfiguration, HttpConfiguration, HttpLoggingLevel, HttpProxy};
pub use error::{Error, Result};
pub use models::run::{Run, RunStatus};
pub use models::{Message, Role};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn user_agent() -> String {
    format!("openai-threads/{}", VERSION)
}
