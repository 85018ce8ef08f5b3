//! The WritingCoach trait and its error type.

use crate::{
    DailyTaskQuery, DailyTaskResponse, FeedbackRequest, FeedbackResponse, VocabularyQuery,
    VocabularyResponse,
};
use async_trait::async_trait;

/// Writing coach: feedback, daily tasks and vocabulary lists.
#[async_trait]
pub trait WritingCoach: Send + Sync {
    /// Corrected text plus an itemized list of changes.
    async fn feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, CoachError>;

    /// One short writing task for today.
    async fn daily_task(&self, query: &DailyTaskQuery) -> Result<DailyTaskResponse, CoachError>;

    /// Level-appropriate vocabulary with definitions and examples.
    async fn vocabulary(&self, query: &VocabularyQuery)
        -> Result<VocabularyResponse, CoachError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Provider(String),
    #[error("coach error: {0}")]
    Other(String),
}
