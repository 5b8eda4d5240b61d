//! Local stand-in for the survey API

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Requests the mock server has seen
#[derive(Default)]
pub struct Recorded {
    pub question_langs: Mutex<Vec<String>>,
    pub i18n_langs: Mutex<Vec<String>>,
    pub evaluations: Mutex<Vec<Value>>,
}

/// How the mock server should behave
#[derive(Clone)]
pub struct MockConfig {
    pub questions: Value,
    pub questions_status: StatusCode,
    pub questions_delay: Duration,
    pub evaluate_status: StatusCode,
    pub result: Value,
    pub i18n_status: StatusCode,
    pub translations: Value,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            questions: json!([
                { "question": "q1", "options": "[\"optA\",\"optB\"]" },
                { "question": "q2", "options": "[\"optA\",\"optB\"]" },
                { "question": "q3", "options": "[\"optA\",\"optB\"]" }
            ]),
            questions_status: StatusCode::OK,
            questions_delay: Duration::ZERO,
            evaluate_status: StatusCode::OK,
            result: json!({
                "type": "teto-boy",
                "explanation": "You are a TETO-BOY.\nConfident.",
                "advice": "Listen more.",
                "love_chain_info": "teto-boy loves egen-girl"
            }),
            i18n_status: StatusCode::OK,
            translations: json!({ "home.title": "성별 테스트", "result.type.teto-boy": "테토남" }),
        }
    }
}

#[derive(Clone)]
struct MockState {
    config: MockConfig,
    recorded: Arc<Recorded>,
}

async fn questions(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state
        .recorded
        .question_langs
        .lock()
        .unwrap()
        .push(params.get("lang").cloned().unwrap_or_default());
    tokio::time::sleep(state.config.questions_delay).await;
    (state.config.questions_status, Json(state.config.questions.clone()))
}

async fn evaluate(State(state): State<MockState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.recorded.evaluations.lock().unwrap().push(body);
    (state.config.evaluate_status, Json(state.config.result.clone()))
}

async fn i18n(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state
        .recorded
        .i18n_langs
        .lock()
        .unwrap()
        .push(params.get("lang").cloned().unwrap_or_default());
    (state.config.i18n_status, Json(state.config.translations.clone()))
}

/// Serve the mock API on an ephemeral port; returns its base URL
pub async fn spawn(config: MockConfig) -> (String, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let router = Router::new()
        .route("/api/questions", get(questions))
        .route("/api/evaluate", post(evaluate))
        .route("/api/i18n", get(i18n))
        .with_state(MockState {
            config,
            recorded: recorded.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}
