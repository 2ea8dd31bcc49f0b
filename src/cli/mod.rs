pub mod doctor;
pub mod knowledge;

use anyhow::Result;

use crate::config::SahayakConfig;
use crate::server;

/// Resolve a single message through the full chain and print the reply.
pub async fn ask(config: &SahayakConfig, message: &str) -> Result<()> {
    let credentials = config.credentials()?;
    let assistant = server::build_assistant(config, credentials)?;
    let reply = assistant.respond(message).await;
    tracing::debug!(intent = %reply.intent, "ask complete");
    println!("{}", reply.text);
    Ok(())
}
