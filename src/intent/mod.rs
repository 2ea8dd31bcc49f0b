//! Intent resolution over plain strings.
//!
//! [`classify`] decides which hand-coded responder handles a message once the
//! knowledge lookup has missed. Branches are tried in a fixed order (weather, date,
//! time) and the first hit wins, even if later branches would also match.

pub mod tables;

use serde::Serialize;

pub use tables::{CityAlias, IntentTables};

/// Which branch produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Knowledge,
    Weather,
    Date,
    Time,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Weather => "weather",
            Self::Date => "date",
            Self::Time => "time",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hand-coded match, borrowed from the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger<'a> {
    /// Weather keyword present; `None` when no known city was mentioned.
    Weather(Option<&'a str>),
    Date,
    Time,
    /// Nothing matched; hand the message to the completion fallback.
    Unmatched,
}

/// Classify a message against the tables. Lowercases once, then tests in order.
pub fn classify<'a>(tables: &'a IntentTables, message: &str) -> Trigger<'a> {
    let lowered = message.to_lowercase();

    if tables.mentions_weather(&lowered) {
        Trigger::Weather(tables.find_city(&lowered))
    } else if tables.asks_date(&lowered) {
        Trigger::Date
    } else if tables.asks_time(&lowered) {
        Trigger::Time
    } else {
        Trigger::Unmatched
    }
}
