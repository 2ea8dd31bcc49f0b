use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sahayak::{cli, config, server};

#[derive(Parser)]
#[command(name = "sahayak", version, about = "Conversational assistant with a knowledge store, weather/date/time intents and an LLM fallback")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (query API + web chat page)
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Resolve one message and print the reply
    Ask {
        message: String,
    },
    /// Manage the knowledge store
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeAction,
    },
    /// Check the database and configuration
    Doctor,
}

#[derive(Subcommand)]
enum KnowledgeAction {
    /// Add a question/answer pair (existing questions are never overwritten)
    Add { question: String, answer: String },
    /// Look up the answer for an exact question
    Get { question: String },
    /// List the most recent entries
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::SahayakConfig::load()?;

    // Log to stderr so `ask` and `knowledge` output stays clean on stdout.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve_http(config).await?;
        }
        Command::Ask { message } => cli::ask(&config, &message).await?,
        Command::Knowledge { action } => match action {
            KnowledgeAction::Add { question, answer } => {
                cli::knowledge::add(&config, &question, &answer)?
            }
            KnowledgeAction::Get { question } => cli::knowledge::get(&config, &question)?,
            KnowledgeAction::List { limit } => cli::knowledge::list(&config, limit)?,
        },
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
