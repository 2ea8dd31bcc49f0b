use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ConfigError;
use crate::intent::IntentTables;
use crate::transcript::{DEFAULT_MAX_MESSAGES, DEFAULT_MAX_SESSIONS};

/// Environment variable holding the completion provider key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the weather provider key.
pub const OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SahayakConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub weather: WeatherConfig,
    pub completion: CompletionConfig,
    pub credentials: CredentialsConfig,
    pub intents: IntentTables,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Web UI transcripts kept in memory before the least recently used is evicted.
    pub max_sessions: usize,
    pub max_transcript_messages: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub units: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system_prompt: String,
}

/// Raw credential values as read from the config file and environment.
///
/// Use [`SahayakConfig::credentials`] to get validated keys.
#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    pub openai_api_key: Option<String>,
    pub openweather_api_key: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("CredentialsConfig")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openweather_api_key", &redact(&self.openweather_api_key))
            .finish()
    }
}

/// Validated provider keys. Both are required before the assistant can serve.
#[derive(Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub openweather_api_key: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8501,
            log_level: "info".into(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_transcript_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_sahayak_dir()
            .join("knowledge.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org/data/2.5/weather".into(),
            units: "metric".into(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-3.5-turbo".into(),
            max_tokens: 200,
            temperature: 0.7,
            system_prompt: "आप एक सहायक AI असिस्टेंट हैं। मौसम या समय के सवालों के लिए, सीधे जानकारी देने का प्रयास करें। अगर आपको स्पष्ट रूप से शहर का नाम नहीं मिलता है, तो यूजर से पूछें।".into(),
        }
    }
}

/// Returns `~/.sahayak/`
pub fn default_sahayak_dir() -> PathBuf {
    home_dir().join(".sahayak")
}

/// Returns the default config file path: `~/.sahayak/config.toml`
pub fn default_config_path() -> PathBuf {
    default_sahayak_dir().join("config.toml")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl SahayakConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            SahayakConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (SAHAYAK_DB, SAHAYAK_HOST, SAHAYAK_PORT,
    /// SAHAYAK_LOG_LEVEL and the two provider keys).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SAHAYAK_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("SAHAYAK_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SAHAYAK_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid SAHAYAK_PORT"),
            }
        }
        if let Ok(val) = std::env::var("SAHAYAK_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var(OPENAI_API_KEY) {
            self.credentials.openai_api_key = Some(val);
        }
        if let Ok(val) = std::env::var(OPENWEATHER_API_KEY) {
            self.credentials.openweather_api_key = Some(val);
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// Validate that both provider keys are present and non-empty.
    ///
    /// A missing key is a startup failure; the error names the key.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let openai_api_key = present(&self.credentials.openai_api_key)
            .ok_or(ConfigError::MissingCredential(OPENAI_API_KEY))?;
        let openweather_api_key = present(&self.credentials.openweather_api_key)
            .ok_or(ConfigError::MissingCredential(OPENWEATHER_API_KEY))?;
        Ok(Credentials {
            openai_api_key,
            openweather_api_key,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}
