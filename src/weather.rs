//! Current-weather lookup against an OpenWeatherMap-compatible endpoint.
//!
//! [`WeatherSource::lookup`] always yields a sentence for the user. Transport
//! failures, unknown cities, bodies missing a field and bodies of an unexpected
//! shape each map to their own template.
//! Every call is a fresh request: no retries, no caching.

use async_trait::async_trait;
use serde_json::{Number, Value};

use crate::config::WeatherConfig;
use crate::error::WeatherError;

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Describe the current weather in `city`. Never fails.
    async fn lookup(&self, city: &str) -> String;
}

/// Fields extracted from a successful provider body.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub description: String,
    pub temp: Number,
    pub feels_like: Number,
}

impl Conditions {
    pub fn describe(&self, city: &str) -> String {
        format!(
            "शहर **{city}** में मौसम है: **{}**, तापमान: **{}°C**, महसूस हो रहा है: **{}°C**।",
            self.description, self.temp, self.feels_like
        )
    }
}

pub fn city_not_found(city: &str) -> String {
    format!("शहर **{city}** का मौसम नहीं मिल पाया। कृपया सही शहर का नाम बताएं।")
}

pub fn invalid_data(city: &str) -> String {
    format!("शहर **{city}** का मौसम डेटा अमान्य है। ")
}

pub fn network_failure(detail: impl std::fmt::Display) -> String {
    format!("मौसम की जानकारी प्राप्त करते समय नेटवर्क या API त्रुटि हुई: {detail}")
}

pub fn unknown_failure(detail: impl std::fmt::Display) -> String {
    format!("मौसम की जानकारी में कोई अज्ञात त्रुटि हुई: {detail}")
}

/// Interpret a provider body. `Ok(None)` means the provider reported a non-200 `cod`.
pub fn parse_body(body: &Value) -> Result<Option<Conditions>, WeatherError> {
    let ok = body.get("cod").and_then(Value::as_f64) == Some(200.0);
    if !ok {
        return Ok(None);
    }

    // An absent list is a missing field; a present but empty list is an unexpected shape.
    let first = body
        .get("weather")
        .ok_or(WeatherError::MalformedBody("weather"))?
        .as_array()
        .and_then(|list| list.first())
        .ok_or_else(|| WeatherError::UnexpectedShape("weather list is empty".into()))?;
    let description = first
        .get("description")
        .and_then(Value::as_str)
        .ok_or(WeatherError::MalformedBody("weather[0].description"))?;
    let temp = body
        .pointer("/main/temp")
        .and_then(Value::as_number)
        .ok_or(WeatherError::MalformedBody("main.temp"))?;
    let feels_like = body
        .pointer("/main/feels_like")
        .and_then(Value::as_number)
        .ok_or(WeatherError::MalformedBody("main.feels_like"))?;

    Ok(Some(Conditions {
        description: description.to_string(),
        temp: temp.clone(),
        feels_like: feels_like.clone(),
    }))
}

pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key,
            units: config.units.clone(),
        }
    }

    /// One GET with `q`, `appid` and `units`. HTTP error statuses are failures.
    pub async fn fetch(&self, city: &str) -> Result<Option<Conditions>, WeatherError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_body(&body)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn lookup(&self, city: &str) -> String {
        match self.fetch(city).await {
            Ok(Some(conditions)) => {
                tracing::info!(city, "weather lookup succeeded");
                conditions.describe(city)
            }
            Ok(None) => {
                tracing::info!(city, "weather provider did not recognize city");
                city_not_found(city)
            }
            Err(WeatherError::Http(e)) => {
                // The request URL carries the API key
                let e = e.without_url();
                tracing::warn!(city, error = %e, "weather request failed");
                network_failure(e)
            }
            Err(e @ WeatherError::MalformedBody(_)) => {
                tracing::warn!(city, error = %e, "weather body malformed");
                invalid_data(city)
            }
            Err(e @ WeatherError::UnexpectedShape(_)) => {
                tracing::warn!(city, error = %e, "weather body has unexpected shape");
                unknown_failure(e)
            }
        }
    }
}
