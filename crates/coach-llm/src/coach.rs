//! WritingCoach backed by a chat-completion LLM.

use crate::llm::{LLMClient, LLMError, Message};
use crate::{parse, prompt};
use async_trait::async_trait;
use coach_types::{
    CoachError, DailyTaskQuery, DailyTaskResponse, FeedbackRequest, FeedbackResponse,
    VocabularyQuery, VocabularyResponse, WritingCoach,
};

pub const EMPTY_TEXT_MESSAGE: &str = "Input 'text' is required and cannot be empty.";

/// Builds prompts, makes one LLM call per operation and parses the reply.
pub struct LlmWritingCoach<C> {
    llm: C,
}

impl<C: LLMClient> LlmWritingCoach<C> {
    pub fn new(llm: C) -> Self {
        Self { llm }
    }

    pub fn llm(&self) -> &C {
        &self.llm
    }

    async fn ask(&self, operation: &'static str, messages: &[Message]) -> Result<String, CoachError> {
        tracing::debug!(operation, model = self.llm.model(), "calling LLM");
        self.llm.complete_with_messages(messages).await.map_err(|e| {
            tracing::error!(operation, error = %e, "LLM call failed");
            provider_error(e)
        })
    }
}

fn provider_error(e: LLMError) -> CoachError {
    CoachError::Provider(e.to_string())
}

#[async_trait]
impl<C: LLMClient> WritingCoach for LlmWritingCoach<C> {
    async fn feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, CoachError> {
        if req.is_blank() {
            return Err(CoachError::InvalidInput(EMPTY_TEXT_MESSAGE.to_string()));
        }
        let messages = prompt::feedback_messages(&req.text, req.level_or_default(), req.context());
        let raw = self.ask("feedback", &messages).await?;
        Ok(parse::parse_feedback(&raw))
    }

    async fn daily_task(&self, query: &DailyTaskQuery) -> Result<DailyTaskResponse, CoachError> {
        let today = chrono::Local::now().date_naive();
        let messages = prompt::daily_task_messages(query.level_or_default(), query.context(), today);
        let raw = self.ask("daily_task", &messages).await?;
        let task = parse::parse_daily_task(&raw).map_err(provider_error)?;
        Ok(DailyTaskResponse { task })
    }

    async fn vocabulary(
        &self,
        query: &VocabularyQuery,
    ) -> Result<VocabularyResponse, CoachError> {
        let count = query.effective_count();
        let messages = prompt::vocabulary_messages(query.level_or_default(), query.topic(), count);
        let raw = self.ask("vocabulary", &messages).await?;
        let mut vocabulary = parse::parse_vocabulary(&raw).map_err(|e| {
            tracing::warn!(raw = %raw, "unparsable vocabulary reply");
            provider_error(e)
        })?;
        vocabulary.truncate(count as usize);
        Ok(VocabularyResponse { vocabulary })
    }
}
