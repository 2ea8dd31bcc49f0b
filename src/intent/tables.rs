//! Trigger tables for the hand-coded intents.
//!
//! Every list is plain configuration: the defaults reproduce the fixed Hindi/English
//! vocabulary the assistant ships with, and a deployment may replace any list under
//! `[intents]` in the config file. Matching is a lowercased substring test, checked
//! in table order.

use serde::{Deserialize, Serialize};

/// A canonical city name (sent to the weather provider) and the spellings that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityAlias {
    pub name: String,
    pub aliases: Vec<String>,
}

impl CityAlias {
    fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentTables {
    pub weather_keywords: Vec<String>,
    pub cities: Vec<CityAlias>,
    pub date_phrases: Vec<String>,
    pub time_phrases: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for IntentTables {
    fn default() -> Self {
        Self {
            weather_keywords: strings(&["मौसम", "तापमान", "कैसा है मौसम", "वेदर", "बारिश", "जलवायु"]),
            cities: vec![
                CityAlias::new("Delhi", &["दिल्ली"]),
                CityAlias::new("Mumbai", &["मुंबई"]),
                CityAlias::new("Bengaluru", &["बेंगलुरु"]),
                CityAlias::new("Jaipur", &["जयपुर"]),
                CityAlias::new("Kota", &["kota", "कोटा"]),
                CityAlias::new("Chennai", &["chennai", "चेन्नई"]),
                CityAlias::new("Kolkata", &["kolkata", "कोलकाता"]),
            ],
            date_phrases: strings(&["आज क्या तारीख है", "तारीख बताओ", "आज की डेट"]),
            time_phrases: strings(&["अभी क्या समय है", "समय बताओ", "कितने बजे हैं"]),
        }
    }
}

fn contains_any(lowered: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && lowered.contains(&n.to_lowercase()))
}

impl IntentTables {
    /// `lowered` must already be lowercased.
    pub fn mentions_weather(&self, lowered: &str) -> bool {
        contains_any(lowered, &self.weather_keywords)
    }

    /// First city in table order with an alias inside `lowered`.
    pub fn find_city(&self, lowered: &str) -> Option<&str> {
        self.cities
            .iter()
            .find(|c| contains_any(lowered, &c.aliases))
            .map(|c| c.name.as_str())
    }

    pub fn asks_date(&self, lowered: &str) -> bool {
        contains_any(lowered, &self.date_phrases)
    }

    pub fn asks_time(&self, lowered: &str) -> bool {
        contains_any(lowered, &self.time_phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_aliases_resolve_to_canonical_names() {
        let t = IntentTables::default();
        assert_eq!(t.find_city("मुंबई का मौसम"), Some("Mumbai"));
        assert_eq!(t.find_city("दिल्ली में बारिश"), Some("Delhi"));
        assert_eq!(t.find_city("kota weather"), Some("Kota"));
        assert_eq!(t.find_city("कोलकाता"), Some("Kolkata"));
        assert_eq!(t.find_city("लंदन"), None);
    }

    #[test]
    fn first_city_in_table_order_wins() {
        let t = IntentTables::default();
        // Kolkata appears first in the text, Delhi first in the table
        assert_eq!(t.find_city("कोलकाता और दिल्ली"), Some("Delhi"));
    }

    #[test]
    fn matching_is_substring_based() {
        let t = IntentTables::default();
        // "kota" inside "dakota" still selects Kota
        assert_eq!(t.find_city("north dakota"), Some("Kota"));
        assert!(t.mentions_weather("आज कैसा है मौसम?"));
        assert!(!t.mentions_weather("नमस्ते"));
    }

    #[test]
    fn configured_aliases_match_case_insensitively() {
        let t = IntentTables {
            cities: vec![CityAlias::new("Pune", &["Pune"])],
            ..IntentTables::default()
        };
        assert_eq!(t.find_city("weather in pune"), Some("Pune"));
    }

    #[test]
    fn empty_phrases_never_match() {
        let t = IntentTables {
            date_phrases: vec![String::new()],
            ..IntentTables::default()
        };
        assert!(!t.asks_date("anything"));
    }

    #[test]
    fn date_and_time_phrases() {
        let t = IntentTables::default();
        assert!(t.asks_date("भाई, आज क्या तारीख है?"));
        assert!(t.asks_time("अभी क्या समय है"));
        assert!(!t.asks_time("आज की डेट"));
    }
}
