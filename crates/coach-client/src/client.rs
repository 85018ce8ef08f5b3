//! HTTP client for the `/api/v1/` endpoints.

use coach_types::{
    DailyTaskQuery, DailyTaskResponse, ErrorDetail, FeedbackRequest, FeedbackResponse,
    VocabularyQuery, VocabularyResponse,
};
use serde::de::DeserializeOwned;
use std::fmt;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Every failure the user can see is one of these three.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API answered with an error body.
    #[error("Error from API: {detail}")]
    Api { status: u16, detail: String },
    /// Nothing came back: server down or unreachable.
    #[error("No response from server. Please check if the backend is running.")]
    NoResponse,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        // is_request: sent, but the connection closed before a response arrived
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ClientError::NoResponse
        } else {
            ClientError::Unexpected(e.to_string())
        }
    }
}

pub struct CoachClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoachClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("COACH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, ClientError> {
        let res = self
            .client
            .post(self.url("/api/v1/feedback"))
            .json(req)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn daily_task(&self, query: &DailyTaskQuery) -> Result<DailyTaskResponse, ClientError> {
        let res = self
            .client
            .get(self.url("/api/v1/daily-task"))
            .query(query)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn vocabulary(
        &self,
        query: &VocabularyQuery,
    ) -> Result<VocabularyResponse, ClientError> {
        let res = self
            .client
            .get(self.url("/api/v1/vocabulary-list"))
            .query(query)
            .send()
            .await?;
        decode(res).await
    }
}

impl fmt::Debug for CoachClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoachClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return res
            .json()
            .await
            .map_err(|e| ClientError::Unexpected(e.to_string()));
    }
    let body = res.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "API returned an error");
    Err(ClientError::Api {
        status: status.as_u16(),
        detail: error_detail(status, &body),
    })
}

/// `detail` from an error body, else the body text, else the status reason.
fn error_detail(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(ErrorDetail { detail }) = serde_json::from_str::<ErrorDetail>(body) {
        return detail;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(String::from)
        .unwrap_or_else(|| status.to_string())
}
