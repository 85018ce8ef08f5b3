//! Axum server and routes.

use crate::config::CorsOrigins;
use crate::error::ApiError;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use coach_types::{
    DailyTaskQuery, DailyTaskResponse, FeedbackRequest, FeedbackResponse, RootResponse,
    VocabularyQuery, VocabularyResponse, WritingCoach,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const ROOT_MESSAGE: &str = "Pro-English-Writing-Coach API is running!";

pub struct AppState {
    /// `None` when no LLM provider is configured; coach routes then answer 503.
    pub coach: Option<Arc<dyn WritingCoach>>,
}

impl AppState {
    pub fn new(coach: Arc<dyn WritingCoach>) -> Self {
        Self { coach: Some(coach) }
    }

    pub fn uninitialized() -> Self {
        Self { coach: None }
    }

    fn coach(&self) -> Result<&dyn WritingCoach, ApiError> {
        self.coach.as_deref().ok_or(ApiError::NotInitialized)
    }
}

pub fn router(state: Arc<AppState>, cors: &CorsOrigins) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/v1/feedback", post(handle_feedback))
        .route("/api/v1/daily-task", get(handle_daily_task))
        .route("/api/v1/vocabulary-list", get(handle_vocabulary))
        .layer(cors.layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn handle_feedback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let coach = state.coach()?;
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        chars = req.text.chars().count(),
        level = %req.level_or_default(),
        context = req.context().unwrap_or(""),
        "feedback requested"
    );
    let res = coach.feedback(&req).await?;
    tracing::info!(%request_id, changes = res.changes_list.len(), "feedback returned");
    Ok(Json(res))
}

async fn handle_daily_task(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DailyTaskQuery>,
) -> Result<Json<DailyTaskResponse>, ApiError> {
    let coach = state.coach()?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, level = %query.level_or_default(), "daily task requested");
    let res = coach.daily_task(&query).await?;
    tracing::info!(%request_id, "daily task returned");
    Ok(Json(res))
}

async fn handle_vocabulary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VocabularyQuery>,
) -> Result<Json<VocabularyResponse>, ApiError> {
    let coach = state.coach()?;
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        level = %query.level_or_default(),
        topic = query.topic().unwrap_or(""),
        count = query.effective_count(),
        "vocabulary list requested"
    );
    let res = coach.vocabulary(&query).await?;
    tracing::info!(%request_id, words = res.vocabulary.len(), "vocabulary list returned");
    Ok(Json(res))
}
