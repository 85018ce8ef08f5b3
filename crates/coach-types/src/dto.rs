//! Request and response DTOs for the writing coach endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of vocabulary entries requested.
pub const DEFAULT_VOCABULARY_COUNT: u32 = 10;
/// Upper bound on vocabulary entries per request.
pub const MAX_VOCABULARY_COUNT: u32 = 20;

/// Target CEFR proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    B1,
    B2,
    #[default]
    C1,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
        }
    }

    /// Short proficiency label used inside prompts.
    pub fn description(&self) -> &'static str {
        match self {
            Level::B1 => "intermediate (B1)",
            Level::B2 => "upper-intermediate (B2)",
            Level::C1 => "advanced professional (C1)",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level '{0}': expected B1, B2 or C1")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Feature tab selected on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    #[default]
    Feedback,
    DailyTask,
    Vocabulary,
}

/// Body of `POST /api/v1/feedback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl FeedbackRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: None,
            context: None,
        }
    }

    /// Level to target: the requested one or C1.
    pub fn level_or_default(&self) -> Level {
        self.level.unwrap_or_default()
    }

    /// Context exactly as sent; `None` when absent or blank.
    pub fn context(&self) -> Option<&str> {
        non_blank(self.context.as_deref())
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub corrected_text: String,
    pub changes_list: Vec<String>,
}

/// Query of `GET /api/v1/daily-task`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTaskQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl DailyTaskQuery {
    pub fn level_or_default(&self) -> Level {
        self.level.unwrap_or_default()
    }

    pub fn context(&self) -> Option<&str> {
        non_blank(self.context.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTaskResponse {
    pub task: String,
}

/// Query of `GET /api/v1/vocabulary-list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl VocabularyQuery {
    pub fn level_or_default(&self) -> Level {
        self.level.unwrap_or_default()
    }

    pub fn topic(&self) -> Option<&str> {
        non_blank(self.topic.as_deref())
    }

    /// Requested count, defaulted and clamped to `1..=MAX_VOCABULARY_COUNT`.
    pub fn effective_count(&self) -> u32 {
        self.count
            .unwrap_or(DEFAULT_VOCABULARY_COUNT)
            .clamp(1, MAX_VOCABULARY_COUNT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyResponse {
    pub vocabulary: Vec<VocabularyEntry>,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
