//! Route handlers for the query API and the web UI.
//!
//! Both surfaces go through [`Assistant::respond`]; the API wraps the reply as
//! `{"response": ...}`, the UI appends it to the caller's transcript.

use axum::extract::{Query, RawQuery, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::assistant::Assistant;
use crate::server::state::AppState;
use crate::server::ui::{self, Notice};

pub const INVALID_ACTION: &str = "अवैध कार्रवाई निर्दिष्ट।";
pub const MISSING_KNOWLEDGE_FIELDS: &str = "ज्ञान जोड़ने के लिए प्रश्न और उत्तर दोनों चाहिए।";
pub const MISSING_KNOWLEDGE_FIELDS_UI: &str = "ज्ञान जोड़ने के लिए प्रश्न और उत्तर दोनों टाइप करें।";

pub const SESSION_COOKIE: &str = "sahayak_session";

// =============================================================================
// Query API
// =============================================================================

/// Query parameters accepted by the API. `action` defaults to `chat`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApiParams {
    pub action: Option<String>,
    pub message: Option<String>,
    pub question_to_add: Option<String>,
    pub answer_to_add: Option<String>,
}

impl ApiParams {
    /// Build from decoded query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "action" => &mut params.action,
                "message" => &mut params.message,
                "question_to_add" => &mut params.question_to_add,
                "answer_to_add" => &mut params.answer_to_add,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub response: String,
}

impl ApiResponse {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Run one API request against the assistant. Unknown actions touch nothing.
pub async fn dispatch(assistant: &Assistant, params: ApiParams) -> ApiResponse {
    match params.action.as_deref().unwrap_or("chat") {
        "add_knowledge" => {
            let question = params.question_to_add.unwrap_or_default();
            let answer = params.answer_to_add.unwrap_or_default();
            if question.is_empty() || answer.is_empty() {
                return ApiResponse::new(MISSING_KNOWLEDGE_FIELDS);
            }
            ApiResponse::new(assistant.add_knowledge(&question, &answer).message())
        }
        "chat" => {
            let message = params.message.unwrap_or_default();
            ApiResponse::new(assistant.respond(&message).await.text)
        }
        other => {
            tracing::warn!(action = other, "unrecognized API action");
            ApiResponse::new(INVALID_ACTION)
        }
    }
}

/// GET|POST /api
pub async fn api(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<ApiResponse> {
    Json(dispatch(&state.assistant, ApiParams::from_pairs(pairs)).await)
}

/// GET|POST / - the query API when a query string is present, else the chat page.
pub async fn root(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    if raw.as_deref().is_some_and(|q| !q.is_empty()) {
        let params = ApiParams::from_pairs(pairs);
        return Json(dispatch(&state.assistant, params).await).into_response();
    }

    let session = Session::from_headers(&headers);
    let transcript = state.transcripts.snapshot(&session.id);
    session.page_response(ui::render_page(&transcript, None))
}

// =============================================================================
// Web UI
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct KnowledgeForm {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// POST /chat - run the chain and append the exchange to this browser's transcript.
pub async fn ui_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let session = Session::from_headers(&headers);

    if !form.message.trim().is_empty() {
        let reply = state.assistant.respond(&form.message).await;
        state
            .transcripts
            .record_exchange(&session.id, &form.message, &reply.text);
    }

    let transcript = state.transcripts.snapshot(&session.id);
    session.page_response(ui::render_page(&transcript, None))
}

/// POST /knowledge - the sidebar form.
pub async fn ui_add_knowledge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<KnowledgeForm>,
) -> Response {
    let session = Session::from_headers(&headers);

    let notice = if form.question.is_empty() || form.answer.is_empty() {
        Notice::warning(MISSING_KNOWLEDGE_FIELDS_UI)
    } else {
        let status = state.assistant.add_knowledge(&form.question, &form.answer);
        if status.is_inserted() {
            Notice::success(status.message())
        } else {
            Notice::warning(status.message())
        }
    };

    let transcript = state.transcripts.snapshot(&session.id);
    session.page_response(ui::render_page(&transcript, Some(&notice)))
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub knowledge_entries: Option<i64>,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let knowledge_entries = match state.assistant.knowledge().count() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not count knowledge");
            None
        }
    };
    Json(HealthResponse {
        status: (if knowledge_entries.is_some() { "ok" } else { "degraded" }).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        knowledge_entries,
    })
}

// =============================================================================
// Session cookie
// =============================================================================

/// Browser session id from the cookie, or a fresh one to be set on the response.
struct Session {
    id: String,
    is_new: bool,
}

impl Session {
    fn from_headers(headers: &HeaderMap) -> Self {
        let existing = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
            .find(|id| uuid::Uuid::parse_str(id).is_ok());

        match existing {
            Some(id) => Self {
                id: id.to_string(),
                is_new: false,
            },
            None => Self {
                id: uuid::Uuid::now_v7().to_string(),
                is_new: true,
            },
        }
    }

    fn page_response(&self, page: String) -> Response {
        let mut response = Html(page).into_response();
        if self.is_new {
            let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
        }
        response
    }
}
