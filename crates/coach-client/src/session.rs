//! Form and result state for one user, independent of how it is rendered.

use crate::client::{ClientError, CoachClient};
use coach_types::{
    DailyTaskQuery, DailyTaskResponse, Feature, FeedbackRequest, FeedbackResponse, Level,
    VocabularyQuery, VocabularyResponse,
};

/// A finished request's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Feedback(FeedbackResponse),
    DailyTask(DailyTaskResponse),
    Vocabulary(VocabularyResponse),
}

/// At most one request is in flight: `begin` refuses while `loading`.
#[derive(Debug, Clone, Default)]
pub struct CoachSession {
    feature: Feature,
    pub text: String,
    pub level: Level,
    pub context: String,
    pub topic: String,
    pub count: Option<u32>,
    loading: bool,
    error: Option<String>,
    feedback: Option<FeedbackResponse>,
    daily_task: Option<DailyTaskResponse>,
    vocabulary: Option<VocabularyResponse>,
}

impl CoachSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn feedback(&self) -> Option<&FeedbackResponse> {
        self.feedback.as_ref()
    }

    pub fn daily_task(&self) -> Option<&DailyTaskResponse> {
        self.daily_task.as_ref()
    }

    pub fn vocabulary(&self) -> Option<&VocabularyResponse> {
        self.vocabulary.as_ref()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn can_submit(&self) -> bool {
        if self.loading {
            return false;
        }
        match self.feature {
            Feature::Feedback => !self.text.trim().is_empty(),
            Feature::DailyTask | Feature::Vocabulary => true,
        }
    }

    /// Switch tabs. Results and errors from the previous tab are dropped.
    pub fn select_feature(&mut self, feature: Feature) {
        self.feature = feature;
        self.clear_results();
    }

    fn clear_results(&mut self) {
        self.error = None;
        self.feedback = None;
        self.daily_task = None;
        self.vocabulary = None;
    }

    pub fn feedback_request(&self) -> FeedbackRequest {
        FeedbackRequest {
            text: self.text.clone(),
            level: Some(self.level),
            context: non_blank(&self.context),
        }
    }

    pub fn daily_task_query(&self) -> DailyTaskQuery {
        DailyTaskQuery {
            level: Some(self.level),
            context: non_blank(&self.context),
        }
    }

    pub fn vocabulary_query(&self) -> VocabularyQuery {
        VocabularyQuery {
            level: Some(self.level),
            topic: non_blank(&self.topic),
            count: self.count,
        }
    }

    /// Mark a request as started. Returns false (and changes nothing) when
    /// one is already running or the form cannot be submitted.
    pub fn begin(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.loading = true;
        self.clear_results();
        true
    }

    pub fn finish(&mut self, outcome: Outcome) {
        self.loading = false;
        self.error = None;
        match outcome {
            Outcome::Feedback(r) => self.feedback = Some(r),
            Outcome::DailyTask(r) => self.daily_task = Some(r),
            Outcome::Vocabulary(r) => self.vocabulary = Some(r),
        }
    }

    pub fn fail(&mut self, err: &ClientError) {
        self.loading = false;
        self.error = Some(err.to_string());
    }

    /// Run the selected tab's request. Returns true when a result arrived.
    pub async fn submit(&mut self, client: &CoachClient) -> bool {
        if !self.begin() {
            return false;
        }
        let result = match self.feature {
            Feature::Feedback => client
                .feedback(&self.feedback_request())
                .await
                .map(Outcome::Feedback),
            Feature::DailyTask => client
                .daily_task(&self.daily_task_query())
                .await
                .map(Outcome::DailyTask),
            Feature::Vocabulary => client
                .vocabulary(&self.vocabulary_query())
                .await
                .map(Outcome::Vocabulary),
        };
        match result {
            Ok(outcome) => {
                self.finish(outcome);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "request failed");
                self.fail(&e);
                false
            }
        }
    }
}

/// `None` for blank input, otherwise the input unchanged.
fn non_blank(s: &str) -> Option<String> {
    (!s.trim().is_empty()).then(|| s.to_string())
}
