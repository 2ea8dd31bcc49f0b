//! Router-level tests for the query API, the chat page and health.

mod helpers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use helpers::{test_assistant, StubCompletion, StubWeather};
use sahayak::server::handlers::{HealthResponse, INVALID_ACTION, MISSING_KNOWLEDGE_FIELDS};
use sahayak::server::{create_router, AppState};
use sahayak::transcript::SessionTranscripts;
use std::sync::Arc;

// =============================================================================
// Helpers
// =============================================================================

struct TestApp {
    router: Router,
    state: AppState,
    weather: Arc<StubWeather>,
    completion: Arc<StubCompletion>,
}

fn make_app() -> TestApp {
    let t = test_assistant();
    let state = AppState::new(t.assistant);
    TestApp {
        router: create_router(state.clone()),
        state,
        weather: t.weather,
        completion: t.completion,
    }
}

/// Path plus percent-encoded query string.
fn uri(path: &str, params: &[(&str, &str)]) -> String {
    let url = reqwest::Url::parse_with_params(&format!("http://localhost{path}"), params).unwrap();
    match url.query() {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    }
}

fn form_body(params: &[(&str, &str)]) -> String {
    let url = reqwest::Url::parse_with_params("http://localhost/", params).unwrap();
    url.query().unwrap_or_default().to_string()
}

fn form_post(path: &str, params: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form_body(params))).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn api_call(app: &TestApp, path: &str, params: &[(&str, &str)]) -> Value {
    let request = Request::get(uri(path, params)).body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_string(response).await).unwrap()
}

// =============================================================================
// Query API
// =============================================================================

#[tokio::test]
async fn unrecognized_action_returns_fixed_error_without_side_effects() {
    let app = make_app();
    let json = api_call(
        &app,
        "/api",
        &[("action", "delete_everything"), ("message", "मौसम दिल्ली"), ("question_to_add", "q"), ("answer_to_add", "a")],
    )
    .await;

    assert_eq!(json, serde_json::json!({"response": INVALID_ACTION}));
    assert_eq!(app.state.assistant.knowledge().count().unwrap(), 0);
    assert!(app.weather.cities.lock().unwrap().is_empty());
    assert_eq!(app.completion.call_count(), 0);
}

#[tokio::test]
async fn add_knowledge_then_chat_hits_store() {
    let app = make_app();

    let added = api_call(
        &app,
        "/api",
        &[("action", "add_knowledge"), ("question_to_add", "तुम्हारा नाम?"), ("answer_to_add", "सहायक")],
    )
    .await;
    assert_eq!(added["response"], "ज्ञान सफलतापूर्वक जोड़ा गया।");

    let again = api_call(
        &app,
        "/api",
        &[("action", "add_knowledge"), ("question_to_add", "तुम्हारा नाम?"), ("answer_to_add", "कोई और")],
    )
    .await;
    assert_eq!(again["response"], "इस प्रश्न के लिए ज्ञान पहले से मौजूद है।");

    let chat = api_call(&app, "/api", &[("action", "chat"), ("message", "तुम्हारा नाम?")]).await;
    assert_eq!(chat["response"], "मेरे ज्ञानकोष से: सहायक");
    assert_eq!(app.completion.call_count(), 0);
}

#[tokio::test]
async fn add_knowledge_requires_both_fields() {
    let app = make_app();
    let json = api_call(
        &app,
        "/api",
        &[("action", "add_knowledge"), ("question_to_add", "केवल प्रश्न")],
    )
    .await;
    assert_eq!(json["response"], MISSING_KNOWLEDGE_FIELDS);
    assert_eq!(app.state.assistant.knowledge().count().unwrap(), 0);
}

#[tokio::test]
async fn action_defaults_to_chat_on_root_query() {
    let app = make_app();
    let json = api_call(&app, "/", &[("message", "दिल्ली में मौसम")]).await;
    assert_eq!(json["response"], "Delhi: साफ़ आसमान");
    assert_eq!(*app.weather.cities.lock().unwrap(), vec!["Delhi".to_string()]);
}

#[tokio::test]
async fn post_with_query_params_is_accepted() {
    let app = make_app();
    let request = Request::post(uri("/api", &[("message", "कुछ भी")]))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["response"], "ChatGPT से मिला: मैं एक मॉडल हूँ");
    assert_eq!(app.completion.call_count(), 1);
}

#[tokio::test]
async fn repeated_query_key_uses_first_value() {
    let app = make_app();
    let json = api_call(
        &app,
        "/api",
        &[("action", "chat"), ("message", "समय बताओ"), ("message", "x")],
    )
    .await;
    assert_eq!(json, serde_json::json!({"response": "अभी 09:15 AM बज रहे हैं।"}));
    assert_eq!(app.completion.call_count(), 0);

    let json = api_call(&app, "/", &[("message", "a"), ("message", "b")]).await;
    assert_eq!(json["response"], "ChatGPT से मिला: मैं एक मॉडल हूँ");
    assert_eq!(*app.completion.prompts.lock().unwrap(), vec!["a".to_string()]);
}

// =============================================================================
// Web UI
// =============================================================================

#[tokio::test]
async fn root_without_query_serves_page_and_session_cookie() {
    let app = make_app();
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("sahayak_session="));
    let page = body_string(response).await;
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains(r#"action="/chat""#));
}

#[tokio::test]
async fn chat_form_builds_transcript_per_session() {
    let app = make_app();
    let session = format!("sahayak_session={}", uuid::Uuid::now_v7());

    let first = app
        .router
        .clone()
        .oneshot(form_post("/chat", &[("message", "समय बताओ")], Some(&session)))
        .await
        .unwrap();
    assert!(first.headers().get(header::SET_COOKIE).is_none());
    let page = body_string(first).await;
    assert!(page.contains("समय बताओ"));
    assert!(page.contains("अभी 09:15 AM बज रहे हैं।"));

    let second = app
        .router
        .clone()
        .oneshot(form_post("/chat", &[("message", "चेन्नई मौसम")], Some(&session)))
        .await
        .unwrap();
    let page = body_string(second).await;
    let earlier = page.find("अभी 09:15 AM").unwrap();
    let later = page.find("Chennai: साफ़ आसमान").unwrap();
    assert!(earlier < later);

    // A different browser sees none of it
    let other = app
        .router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(!body_string(other).await.contains("समय बताओ"));
}

#[tokio::test]
async fn fresh_session_cookies_do_not_grow_transcripts_past_cap() {
    let t = test_assistant();
    let state = AppState::new(t.assistant).with_transcripts(SessionTranscripts::with_limits(5, 20));
    let router = create_router(state.clone());

    for _ in 0..40 {
        let session = format!("sahayak_session={}", uuid::Uuid::now_v7());
        let response = router
            .clone()
            .oneshot(form_post("/chat", &[("message", "समय बताओ")], Some(&session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(state.transcripts.session_count(), 5);
}

#[tokio::test]
async fn blank_chat_input_is_ignored() {
    let app = make_app();
    let response = app
        .router
        .clone()
        .oneshot(form_post("/chat", &[("message", "   ")], None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.completion.call_count(), 0);
    assert_eq!(app.state.transcripts.session_count(), 0);
}

#[tokio::test]
async fn knowledge_form_reports_status() {
    let app = make_app();

    let response = app
        .router
        .clone()
        .oneshot(form_post("/knowledge", &[("question", "प्रश्न"), ("answer", "उत्तर")], None))
        .await
        .unwrap();
    let page = body_string(response).await;
    assert!(page.contains(r#"<div class="notice success">ज्ञान सफलतापूर्वक जोड़ा गया।</div>"#));

    let response = app
        .router
        .clone()
        .oneshot(form_post("/knowledge", &[("question", "प्रश्न"), ("answer", "")], None))
        .await
        .unwrap();
    let page = body_string(response).await;
    assert!(page.contains("ज्ञान जोड़ने के लिए प्रश्न और उत्तर दोनों टाइप करें।"));
    assert_eq!(app.state.assistant.knowledge().count().unwrap(), 1);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_knowledge_count() {
    let app = make_app();
    app.state.assistant.add_knowledge("a", "b");

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.knowledge_entries, Some(1));
}
