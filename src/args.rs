use clap::{Parser, Subcommand};
use openai_threads::HttpLoggingLevel;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = r###"
Talk to OpenAI from the command line.

- chat: a single chat completion with a system prompt.
- thread: create assistant threads, add messages to them and run an assistant on them.
- ask: all of the above in one go; the run is polled until it completes and its answer is printed.

The API key is read from the config file or OPENAI_API_KEY.
"###
)]
pub struct Args {
    /// HTTP logging: none, info, headers, body or all
    #[arg(long, global = true)]
    pub http_logging: Option<HttpLoggingLevel>,

    /// Override the API base URL, e.g. http://localhost:8080/v1
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub subcmd: SubCommands,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// Send one chat completion request
    Chat(ChatSubCommand),
    /// Work with assistant threads
    #[command(subcommand)]
    Thread(ThreadSubCommand),
    /// Ask an assistant a question on a new or existing thread
    Ask(AskSubCommand),
}

#[derive(Parser, Debug)]
pub struct ChatSubCommand {
    /// Model to use; falls back to the configured model
    #[arg(short, long)]
    pub model: Option<String>,

    #[arg(short, long, default_value = "You are a helpful assistant.")]
    pub system: String,

    /// The prompt, sent as a user message
    #[arg(required = true)]
    pub prompt: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ThreadSubCommand {
    /// Create an empty thread and print its id
    Create,
    /// Add a user message to a thread
    Add {
        #[arg(short, long)]
        thread: String,
        #[arg(required = true)]
        content: Vec<String>,
    },
    /// Run an assistant on a thread and print what it wrote
    Run {
        #[arg(short, long)]
        thread: String,
        #[arg(short, long)]
        assistant: String,
    },
}

#[derive(Parser, Debug)]
pub struct AskSubCommand {
    #[arg(short, long)]
    pub assistant: String,

    /// Continue this thread instead of creating a new one
    #[arg(short, long)]
    pub thread: Option<String>,

    #[arg(required = true)]
    pub prompt: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thread_run() {
        let args = Args::parse_from([
            "openai-threads",
            "--http-logging",
            "headers",
            "thread",
            "run",
            "--thread",
            "thread_1",
            "--assistant",
            "asst_1",
        ]);
        assert_eq!(args.http_logging, Some(HttpLoggingLevel::Headers));
        match args.subcmd {
            SubCommands::Thread(ThreadSubCommand::Run { thread, assistant }) => {
                assert_eq!(thread, "thread_1");
                assert_eq!(assistant, "asst_1");
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_parse_chat_defaults() {
        let args = Args::parse_from(["openai-threads", "chat", "hello", "there"]);
        match args.subcmd {
            SubCommands::Chat(chat) => {
                assert_eq!(chat.model, None);
                assert_eq!(chat.system, "You are a helpful assistant.");
                assert_eq!(chat.prompt.join(" "), "hello there");
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_bad_logging_level_is_rejected() {
        let result = Args::try_parse_from(["openai-threads", "--http-logging", "loud", "thread", "create"]);
        assert!(result.is_err());
    }
}
