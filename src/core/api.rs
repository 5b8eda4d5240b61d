//! HTTP client for the survey API
//!
//! Endpoints:
//! - GET  /api/questions?lang={code} - Question list
//! - POST /api/evaluate              - Evaluate answers, returns a result
//! - GET  /api/i18n?lang={code}      - UI string table

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::{Gender, Language, Question, SurveyError, SurveyResult, TypeResult};
use crate::{EVALUATE_PATH, I18N_PATH, QUESTIONS_PATH, REQUEST_TIMEOUT_SECS};

/// Body of `POST /api/evaluate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub gender: Gender,
    pub answers: BTreeMap<String, String>,
    pub lang: Language,
}

/// The remote side of the survey: questions, evaluation, translations
#[async_trait]
pub trait SurveyBackend: Send + Sync {
    /// Ordered question list for a language. Fails with `LoadError`.
    async fn fetch_questions(&self, lang: Language) -> SurveyResult<Vec<Question>>;

    /// Evaluate a completed answer sheet. Fails with `SubmitError`.
    async fn evaluate(&self, request: &EvaluateRequest) -> SurveyResult<TypeResult>;

    /// Translation table for a language. Fails with `LoadError`.
    async fn fetch_translations(&self, lang: Language) -> SurveyResult<HashMap<String, String>>;
}

/// `SurveyBackend` over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for an API origin such as `https://coni.myds.me`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Same as `new` with a custom per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!("HTTP client setup failed, requests will not time out: {}", e);
                Client::new()
            }
        };

        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path?lang=code` and decode JSON; any failure becomes a message
    async fn get_json<T: DeserializeOwned>(&self, path: &str, lang: Language) -> Result<T, String> {
        let url = self.url(path);
        debug!("GET {}?lang={}", url, lang.code());

        let response = self
            .http_client
            .get(&url)
            .query(&[("lang", lang.code())])
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", path, e))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("{} returned {}", path, status);
            return Err(format!("{} returned HTTP {}", path, status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("invalid response from {}: {}", path, e))
    }
}

#[async_trait]
impl SurveyBackend for HttpBackend {
    async fn fetch_questions(&self, lang: Language) -> SurveyResult<Vec<Question>> {
        let questions: Vec<Question> = self
            .get_json(QUESTIONS_PATH, lang)
            .await
            .map_err(|e| SurveyError::LoadError(format!("Failed to load questions: {}", e)))?;
        debug!("Fetched {} questions", questions.len());
        Ok(questions)
    }

    async fn evaluate(&self, request: &EvaluateRequest) -> SurveyResult<TypeResult> {
        let url = self.url(EVALUATE_PATH);
        debug!("POST {} ({} answers)", url, request.answers.len());

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SurveyError::SubmitError(format!("Failed to analyse results: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Evaluation error: {} - {}", status, body);
            return Err(SurveyError::SubmitError(format!(
                "Failed to analyse results (HTTP {})",
                status.as_u16()
            )));
        }

        response
            .json::<TypeResult>()
            .await
            .map_err(|e| SurveyError::SubmitError(format!("Invalid evaluation response: {}", e)))
    }

    async fn fetch_translations(&self, lang: Language) -> SurveyResult<HashMap<String, String>> {
        self.get_json(I18N_PATH, lang)
            .await
            .map_err(|e| SurveyError::LoadError(format!("Failed to load translations: {}", e)))
    }
}
