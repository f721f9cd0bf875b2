use anyhow::{Context, Error};
use openai_threads::OpenAiClient;
use tracing::info;

use crate::args::AskSubCommand;

pub async fn run(client: &OpenAiClient, ask_sub_command: &AskSubCommand) -> Result<(), Error> {
    let thread_id = match &ask_sub_command.thread {
        Some(thread_id) => thread_id.clone(),
        None => {
            let thread_id = client.create_thread().await.context("create thread failed")?;
            info!("Created thread {}", thread_id);
            thread_id
        }
    };

    client
        .add_message_to_thread(&thread_id, &ask_sub_command.prompt.join(" "))
        .await
        .context("add message failed")?;

    let texts = client
        .run_thread(&thread_id, &ask_sub_command.assistant)
        .await
        .with_context(|| format!("run on thread {} failed", thread_id))?;

    if texts.is_empty() {
        eprintln!("The assistant did not write anything");
    }
    for text in texts {
        println!("{}", text);
    }
    eprintln!("thread: {}", thread_id);
    Ok(())
}
