//! A small conversational assistant exposed through a web chat page and a
//! query-parameter JSON API.
//!
//! Every message goes through one resolution chain ([`assistant::Assistant`]):
//!
//! | Order | Branch | Responder |
//! |-------|--------|-----------|
//! | 1 | exact question stored | [`knowledge`] |
//! | 2 | weather keyword (+ city) | [`weather`] |
//! | 3 | date phrase | [`clock`] |
//! | 4 | time phrase | [`clock`] |
//! | 5 | anything else | [`completion`] |
//!
//! Trigger phrases and city aliases are data ([`intent::IntentTables`]) and can be
//! overridden from the config file.
//!
//! # Modules
//!
//! - [`config`] - TOML config, env overrides, credential validation
//! - [`db`] - SQLite setup, schema, migrations, health checks
//! - [`server`] - axum router, API and UI handlers

pub mod assistant;
pub mod cli;
pub mod clock;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod server;
pub mod transcript;
pub mod weather;
