//! CLI `knowledge` commands: add, get and list entries without starting the server.

use anyhow::Result;

use crate::config::SahayakConfig;
use crate::knowledge::KnowledgeStore;

fn open_store(config: &SahayakConfig) -> Result<KnowledgeStore> {
    let conn = crate::db::open_database(config.resolved_db_path())?;
    Ok(KnowledgeStore::new(conn))
}

pub fn add(config: &SahayakConfig, question: &str, answer: &str) -> Result<()> {
    let store = open_store(config)?;
    println!("{}", store.put(question, answer));
    Ok(())
}

pub fn get(config: &SahayakConfig, question: &str) -> Result<()> {
    let store = open_store(config)?;
    match store.get(question)? {
        Some(answer) => println!("{answer}"),
        None => println!("(no entry)"),
    }
    Ok(())
}

pub fn list(config: &SahayakConfig, limit: usize) -> Result<()> {
    let store = open_store(config)?;
    let entries = store.list(limit)?;
    if entries.is_empty() {
        println!("Knowledge store is empty.");
        return Ok(());
    }
    for entry in entries {
        let when = entry.created_at.as_deref().unwrap_or("-");
        println!("[{when}] {} => {}", entry.question, entry.answer);
    }
    Ok(())
}
