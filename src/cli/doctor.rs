//! CLI `doctor` command: database diagnostics and credential presence.

use anyhow::{Context, Result};

use crate::config::SahayakConfig;
use crate::db;

/// Print a health report for the knowledge database and configuration.
pub fn doctor(config: &SahayakConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("Sahayak Health Report");
    println!("=====================");
    println!();

    match config.credentials() {
        Ok(_) => println!("Credentials:       OK (both keys set)"),
        Err(e) => println!("Credentials:       MISSING ({e})"),
    }
    println!("Weather endpoint:  {}", config.weather.base_url);
    println!("Completion model:  {} @ {}", config.completion.model, config.completion.base_url);
    println!();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `sahayak serve` or `sahayak knowledge add` to initialize.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;
    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!("SQLite:            v{}", report.sqlite_version);
    println!("Knowledge entries: {}", report.knowledge_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery: restore a backup of {}", db_path.display());
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
