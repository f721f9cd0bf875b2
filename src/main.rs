use anyhow::{Context, Error};
use clap::Parser;
use openai_threads::OpenAiClient;
use tracing::debug;

use args::{Args, SubCommands};

mod args;
mod commands;
mod settings;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "openai_threads=info".to_string())
        )
        .init();
    let args = Args::parse();
    let settings = settings::settings();

    let config = settings.client_configuration(args.base_url.as_deref(), args.http_logging)?;
    debug!("Using {:?}", config);
    let client = OpenAiClient::new(&config).context("failed to build the HTTP client")?;

    match &args.subcmd {
        SubCommands::Chat(chat_cmd) => {
            commands::chat::run(&client, settings, chat_cmd).await?;
        }
        SubCommands::Thread(thread_cmd) => {
            commands::thread::run(&client, thread_cmd).await?;
        }
        SubCommands::Ask(ask_cmd) => {
            commands::ask::run(&client, ask_cmd).await?;
        }
    };
    Ok(())
}
