//! Parsing of LLM replies into response DTOs.

use crate::llm::LLMError;
use crate::prompt::{
    CHANGES_LIST_MARKER, CORRECTED_TEXT_MARKER, RESPONSE_END, RESPONSE_START, TASK_END, TASK_START,
};
use coach_types::{FeedbackResponse, VocabularyEntry};
use serde::Deserialize;

pub const INNER_FORMAT_ERROR: &str = "AI output format error: Could not parse corrected text or changes list. Please see raw output below.";
pub const OUTER_FORMAT_ERROR: &str = "AI output format error: Could not find structured response markers. Please see raw output below.";

/// Text between the first `start` and the first `end`. `None` unless both
/// occur and the first `end` follows the first `start`.
fn between<'a>(raw: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = raw.find(start)? + start.len();
    let to = raw.find(end)?;
    (to >= from).then(|| &raw[from..to])
}

/// Parse a feedback reply. A reply that does not follow the marker format
/// still yields a response, carrying the raw output as its only change.
pub fn parse_feedback(raw: &str) -> FeedbackResponse {
    let Some(inner) = between(raw, RESPONSE_START, RESPONSE_END) else {
        tracing::warn!(raw, "LLM reply is missing response markers");
        return FeedbackResponse {
            corrected_text: OUTER_FORMAT_ERROR.to_string(),
            changes_list: vec![format!("Raw LLM output: {raw}")],
        };
    };
    let inner = inner.trim();

    let corrected_at = inner.find(CORRECTED_TEXT_MARKER);
    let changes_at = inner.find(CHANGES_LIST_MARKER);
    match (corrected_at, changes_at) {
        (Some(c), Some(l)) if l > c => {
            let corrected_text = inner[c + CORRECTED_TEXT_MARKER.len()..l].trim().to_string();
            let changes_list = inner[l + CHANGES_LIST_MARKER.len()..]
                .lines()
                .map(str::trim)
                .filter(|line| line.starts_with('-'))
                .map(|line| line.trim_start_matches(['-', ' ']).trim().to_string())
                .filter(|item| !item.is_empty())
                .collect();
            FeedbackResponse {
                corrected_text,
                changes_list,
            }
        }
        _ => {
            tracing::warn!(inner, "LLM reply has markers but no corrected text/changes sections");
            FeedbackResponse {
                corrected_text: INNER_FORMAT_ERROR.to_string(),
                changes_list: vec![format!("Raw LLM output (parsing failed): {inner}")],
            }
        }
    }
}

/// Parse a daily task reply: the text between task markers, or the whole reply.
pub fn parse_daily_task(raw: &str) -> Result<String, LLMError> {
    let task = match between(raw, TASK_START, TASK_END) {
        Some(t) => t.trim(),
        None => {
            tracing::debug!("daily task reply has no markers, using whole reply");
            raw.trim()
        }
    };
    if task.is_empty() {
        return Err(LLMError::Parse("empty daily task".to_string()));
    }
    Ok(task.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VocabularyPayload {
    List(Vec<VocabularyEntry>),
    Wrapped { vocabulary: Vec<VocabularyEntry> },
}

impl VocabularyPayload {
    fn into_entries(self) -> Vec<VocabularyEntry> {
        match self {
            VocabularyPayload::List(v) => v,
            VocabularyPayload::Wrapped { vocabulary } => vocabulary,
        }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let s = raw.trim();
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // drop the info string, e.g. "json"
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a vocabulary reply: a JSON array, or an object with a `vocabulary`
/// array, optionally fenced or surrounded by prose.
pub fn parse_vocabulary(raw: &str) -> Result<Vec<VocabularyEntry>, LLMError> {
    let body = strip_code_fence(raw);
    let payload = match serde_json::from_str::<VocabularyPayload>(body) {
        Ok(p) => p,
        Err(first) => {
            let (Some(from), Some(to)) = (body.find('['), body.rfind(']')) else {
                return Err(LLMError::Parse(first.to_string()));
            };
            if to < from {
                return Err(LLMError::Parse(first.to_string()));
            }
            serde_json::from_str::<VocabularyPayload>(&body[from..=to])
                .map_err(|e| LLMError::Parse(e.to_string()))?
        }
    };

    let entries: Vec<VocabularyEntry> = payload
        .into_entries()
        .into_iter()
        .map(|e| VocabularyEntry {
            word: e.word.trim().to_string(),
            definition: e.definition.trim().to_string(),
            example: e.example.trim().to_string(),
        })
        .filter(|e| !e.word.is_empty())
        .collect();
    if entries.is_empty() {
        return Err(LLMError::Parse("no vocabulary entries".to_string()));
    }
    Ok(entries)
}
