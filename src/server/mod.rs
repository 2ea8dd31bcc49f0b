//! HTTP surfaces: the JSON query API and the web chat page.
//!
//! [`serve_http`] validates credentials, opens the knowledge database, builds the
//! [`Assistant`] and serves the router until ctrl-c.

pub mod handlers;
pub mod routes;
pub mod state;
pub mod ui;

use anyhow::{Context, Result};

use crate::assistant::Assistant;
use crate::config::{Credentials, SahayakConfig};
use crate::db;
use crate::knowledge::KnowledgeStore;
use crate::transcript::SessionTranscripts;

pub use routes::create_router;
pub use state::AppState;

/// Open the store and wire the real providers.
pub fn build_assistant(config: &SahayakConfig, credentials: Credentials) -> Result<Assistant> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "knowledge store ready");

    Ok(Assistant::from_config(
        config,
        credentials,
        KnowledgeStore::new(conn),
    ))
}

/// Start the HTTP server.
pub async fn serve_http(config: SahayakConfig) -> Result<()> {
    let credentials = config.credentials()?;
    let assistant = build_assistant(&config, credentials)?;
    let transcripts = SessionTranscripts::with_limits(
        config.server.max_sessions,
        config.server.max_transcript_messages,
    );
    let router = create_router(AppState::new(assistant).with_transcripts(transcripts));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "listening at http://{bind_addr}/");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
