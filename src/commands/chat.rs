use anyhow::{Context, Error};
use openai_threads::{Message, OpenAiClient};
use tracing::info;

use crate::{args::ChatSubCommand, settings::Settings};

pub async fn run(
    client: &OpenAiClient,
    settings: &Settings,
    chat_sub_command: &ChatSubCommand,
) -> Result<(), Error> {
    let model = chat_sub_command
        .model
        .clone()
        .unwrap_or_else(|| settings.model());
    let prompt = chat_sub_command.prompt.join(" ");
    info!("Sending chat completion to {}", model);

    let reply = client
        .chat_completion(&model, &chat_sub_command.system, &[Message::User(prompt)])
        .await
        .context("chat completion failed")?;

    match reply {
        Some(content) => println!("{}", content),
        None => eprintln!("The response did not contain exactly one choice"),
    }
    Ok(())
}
