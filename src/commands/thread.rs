use anyhow::{Context, Error};
use openai_threads::OpenAiClient;

use crate::args::ThreadSubCommand;

pub async fn run(client: &OpenAiClient, thread_sub_command: &ThreadSubCommand) -> Result<(), Error> {
    match thread_sub_command {
        ThreadSubCommand::Create => {
            let thread_id = client.create_thread().await.context("create thread failed")?;
            println!("{}", thread_id);
        }
        ThreadSubCommand::Add { thread, content } => {
            let message_id = client
                .add_message_to_thread(thread, &content.join(" "))
                .await
                .with_context(|| format!("add message to thread {} failed", thread))?;
            println!("{}", message_id);
        }
        ThreadSubCommand::Run { thread, assistant } => {
            let texts = client
                .run_thread(thread, assistant)
                .await
                .with_context(|| format!("run of {} on thread {} failed", assistant, thread))?;
            for text in texts {
                println!("{}", text);
            }
        }
    }
    Ok(())
}
