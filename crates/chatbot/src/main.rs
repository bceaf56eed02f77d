use std::io::Write;

use clap::{Parser, Subcommand};
use island_chatbot::{
    load_dotenv, report_dotenv, ChatApp, ChatbotConfig, ChatbotError, Persona,
};
use log::{error, LevelFilter};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Onchain persona chatbot.
#[derive(Debug, Parser)]
#[command(name = "island-chatbot", version, about)]
struct Cli {
    /// Persona to run: trader, ava or michi.
    #[arg(long, env = "CHATBOT_PERSONA", default_value_t = Persona::Trader)]
    persona: Persona,

    /// Print the whole streamed transcript instead of the last fragment.
    #[arg(long)]
    transcript: bool,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat; `exit` or `quit` leaves.
    Chat,
    /// Send one message and print the reply.
    Ask { message: String },
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

async fn reply(app: &ChatApp, message: &str, transcript: bool) -> Result<String, ChatbotError> {
    if transcript {
        Ok(app.send_message_with_transcript(message).await?.transcript)
    } else {
        app.send_message(message).await
    }
}

async fn chat(app: &ChatApp, transcript: bool) -> Result<(), ChatbotError> {
    println!(
        "Chatting with {}. Type 'exit' to end.",
        app.persona().display_name()
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nPrompt: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        match reply(app, message, transcript).await {
            Ok(text) => println!("{text}\n-------------------"),
            // A failed turn should not end the session.
            Err(e) => error!("{e}"),
        }
    }
    Ok(())
}

async fn run(cli: Cli, config: ChatbotConfig) -> Result<(), ChatbotError> {
    let app = ChatApp::start(&config, cli.persona)?;
    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => chat(&app, cli.transcript).await,
        Command::Ask { message } => {
            println!("{}", reply(&app, &message, cli.transcript).await?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    // Read .env before clap so CHATBOT_PERSONA can come from it.
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    report_dotenv(&dotenv);
    let config = ChatbotConfig::from_env();

    if let Err(e) = run(cli, config).await {
        error!("{e}");
        std::process::exit(1);
    }
}
