//! The intent resolution chain.
//!
//! [`Assistant::respond`] is the one code path every surface (query API, web UI,
//! CLI) uses to turn a message into a reply. Resolution order, first match wins:
//!
//! 1. exact question in the knowledge store
//! 2. weather keyword, then a known city (or a request for one)
//! 3. date phrase
//! 4. time phrase
//! 5. language-model completion
//!
//! No step propagates a failure: each responder returns text.

use std::sync::Arc;

use serde::Serialize;

use crate::clock::{self, Clock, SystemClock};
use crate::completion::{CompletionSource, OpenAiClient};
use crate::config::{Credentials, SahayakConfig};
use crate::intent::{self, Intent, IntentTables, Trigger};
use crate::knowledge::types::PutStatus;
use crate::knowledge::KnowledgeStore;
use crate::weather::{OpenWeatherClient, WeatherSource};

pub const KNOWLEDGE_PREFIX: &str = "मेरे ज्ञानकोष से: ";
pub const COMPLETION_PREFIX: &str = "ChatGPT से मिला: ";
pub const ASK_FOR_CITY: &str = "कृपया मुझे शहर का नाम बताएं जिसका मौसम आप जानना चाहते हैं।";
pub const COMPLETION_FAILED: &str = "ChatGPT से जवाब प्राप्त करने में असमर्थ।";
pub const NO_ANSWER: &str = "माफ़ करना, मैं इस सवाल का जवाब नहीं दे पा रहा हूँ।";

/// A reply and the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

impl Reply {
    fn new(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            intent,
            text: text.into(),
        }
    }
}

pub struct Assistant {
    knowledge: KnowledgeStore,
    weather: Arc<dyn WeatherSource>,
    completion: Arc<dyn CompletionSource>,
    clock: Arc<dyn Clock>,
    tables: IntentTables,
}

impl Assistant {
    /// Build a chain over explicit collaborators, using the system clock and
    /// default tables.
    pub fn new(
        knowledge: KnowledgeStore,
        weather: Arc<dyn WeatherSource>,
        completion: Arc<dyn CompletionSource>,
    ) -> Self {
        Self {
            knowledge,
            weather,
            completion,
            clock: Arc::new(SystemClock),
            tables: IntentTables::default(),
        }
    }

    /// Wire the real HTTP providers from configuration and validated keys.
    pub fn from_config(
        config: &SahayakConfig,
        credentials: Credentials,
        knowledge: KnowledgeStore,
    ) -> Self {
        let weather = OpenWeatherClient::new(&config.weather, credentials.openweather_api_key);
        let completion = OpenAiClient::new(&config.completion, credentials.openai_api_key);
        Self::new(knowledge, Arc::new(weather), Arc::new(completion))
            .with_tables(config.intents.clone())
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_tables(mut self, tables: IntentTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    pub fn add_knowledge(&self, question: &str, answer: &str) -> PutStatus {
        self.knowledge.put(question, answer)
    }

    /// Resolve one message. Stateless: nothing from earlier messages is consulted.
    pub async fn respond(&self, message: &str) -> Reply {
        if let Some(answer) = self.stored_answer(message) {
            return Reply::new(Intent::Knowledge, format!("{KNOWLEDGE_PREFIX}{answer}"));
        }

        let reply = match intent::classify(&self.tables, message) {
            Trigger::Weather(Some(city)) => {
                Reply::new(Intent::Weather, self.weather.lookup(city).await)
            }
            Trigger::Weather(None) => Reply::new(Intent::Weather, ASK_FOR_CITY),
            Trigger::Date => Reply::new(Intent::Date, clock::date_reply(&self.clock.now())),
            Trigger::Time => Reply::new(Intent::Time, clock::time_reply(&self.clock.now())),
            Trigger::Unmatched => Reply::new(Intent::Fallback, self.ask_model(message).await),
        };

        tracing::info!(intent = %reply.intent, message_len = message.len(), "resolved message");
        reply
    }

    /// Knowledge hit with a non-empty answer. Store errors count as a miss.
    fn stored_answer(&self, message: &str) -> Option<String> {
        match self.knowledge.get(message) {
            Ok(answer) => answer.filter(|a| !a.is_empty()),
            Err(e) => {
                tracing::error!(error = %e, "knowledge lookup failed, continuing chain");
                None
            }
        }
    }

    async fn ask_model(&self, message: &str) -> String {
        match self.completion.complete(message).await {
            Ok(text) if text.is_empty() => NO_ANSWER.to_string(),
            Ok(text) => format!("{COMPLETION_PREFIX}{text}"),
            Err(e) => {
                tracing::error!(error = %e, "completion request failed");
                COMPLETION_FAILED.to_string()
            }
        }
    }
}
