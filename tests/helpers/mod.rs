#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use sahayak::assistant::Assistant;
use sahayak::clock::FixedClock;
use sahayak::completion::CompletionSource;
use sahayak::db;
use sahayak::error::CompletionError;
use sahayak::knowledge::KnowledgeStore;
use sahayak::weather::WeatherSource;

/// Fresh in-memory store with schema and migrations applied.
pub fn test_store() -> KnowledgeStore {
    KnowledgeStore::new(db::open_memory_database().unwrap())
}

/// Weather source that records the cities it was asked about.
#[derive(Default)]
pub struct StubWeather {
    pub cities: Mutex<Vec<String>>,
}

#[async_trait]
impl WeatherSource for StubWeather {
    async fn lookup(&self, city: &str) -> String {
        self.cities.lock().unwrap().push(city.to_string());
        format!("{city}: साफ़ आसमान")
    }
}

/// Completion source that always answers with a fixed text and counts calls.
pub struct StubCompletion {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl StubCompletion {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionSource for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

pub struct TestAssistant {
    pub assistant: Assistant,
    pub weather: Arc<StubWeather>,
    pub completion: Arc<StubCompletion>,
}

/// Assistant over an in-memory store, stub providers, and a clock pinned to
/// 2025-01-26 09:15 local time.
pub fn test_assistant() -> TestAssistant {
    let weather = Arc::new(StubWeather::default());
    let completion = Arc::new(StubCompletion::new("मैं एक मॉडल हूँ"));
    let now = Local.with_ymd_and_hms(2025, 1, 26, 9, 15, 0).single().unwrap();
    let assistant = Assistant::new(test_store(), weather.clone(), completion.clone())
        .with_clock(Arc::new(FixedClock(now)));
    TestAssistant {
        assistant,
        weather,
        completion,
    }
}

/// Serve `router` on an ephemeral local port. Returns the base URL.
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
