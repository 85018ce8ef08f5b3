//! Prompt builders. Each reply format here is what the matching parser in
//! [`crate::parse`] expects.

use crate::llm::Message;
use chrono::NaiveDate;
use coach_types::Level;

pub const RESPONSE_START: &str = "---START_RESPONSE---";
pub const RESPONSE_END: &str = "---END_RESPONSE---";
pub const CORRECTED_TEXT_MARKER: &str = "CORRECTED_TEXT:";
pub const CHANGES_LIST_MARKER: &str = "CHANGES_LIST:";
pub const TASK_START: &str = "---START_TASK---";
pub const TASK_END: &str = "---END_TASK---";

/// System message for every request at the given level.
pub fn system_message(level: Level) -> Message {
    Message::system(format!(
        "You are an English writing assistant that provides clear, concise, and structured \
         feedback for {} English learners.",
        level.description()
    ))
}

pub fn feedback_messages(text: &str, level: Level, context: Option<&str>) -> Vec<Message> {
    vec![
        system_message(level),
        Message::user(feedback_prompt(text, level, context)),
    ]
}

pub fn feedback_prompt(text: &str, level: Level, context: Option<&str>) -> String {
    let context_line = context
        .map(|c| format!("The text is intended for: {c}\n"))
        .unwrap_or_default();
    format!(
        "You are an English writing assistant specializing in {level}-level proficiency.
Review the following text for any grammatical errors, spelling mistakes, and awkward phrasing that a non-native speaker might make.
{context_line}Provide the corrected text and then list the specific changes you made, with a brief explanation for each change.
Focus on clarity, naturalness, and grammatical accuracy suitable for a {desc} writer.

Format your response strictly as follows:
{RESPONSE_START}
{CORRECTED_TEXT_MARKER} [The corrected version of the input text goes here.]
{CHANGES_LIST_MARKER}
- [Change 1 with brief explanation. e.g., 'Changed \"a apple\" to \"an apple\" - corrected article usage.']
- [Change 2 with brief explanation. e.g., 'Rephrased \"I want to do\" to \"I would like to do\" - improved formality.']
{RESPONSE_END}

Original Text:
\"{text}\"
",
        level = level.as_str(),
        desc = level.description(),
    )
}

pub fn daily_task_messages(level: Level, context: Option<&str>, today: NaiveDate) -> Vec<Message> {
    vec![
        system_message(level),
        Message::user(daily_task_prompt(level, context, today)),
    ]
}

pub fn daily_task_prompt(level: Level, context: Option<&str>, today: NaiveDate) -> String {
    let context_line = context
        .map(|c| format!("The task should practise writing for: {c}\n"))
        .unwrap_or_default();
    format!(
        "Today is {date}. Create one short, realistic English writing task for a {desc} learner.
{context_line}The task should take 10 to 20 minutes and state the expected length in words.

Format your response strictly as follows:
{TASK_START}
[The task description goes here.]
{TASK_END}
",
        date = today.format("%A, %B %-d, %Y"),
        desc = level.description(),
    )
}

pub fn vocabulary_messages(level: Level, topic: Option<&str>, count: u32) -> Vec<Message> {
    vec![
        system_message(level),
        Message::user(vocabulary_prompt(level, topic, count)),
    ]
}

pub fn vocabulary_prompt(level: Level, topic: Option<&str>, count: u32) -> String {
    let topic_line = topic
        .map(|t| format!("All words should relate to the topic: {t}\n"))
        .unwrap_or_default();
    format!(
        "List {count} useful English words or expressions for a {desc} learner.
{topic_line}For each one give a short definition and one natural example sentence.

Respond with a JSON array only, no prose, in exactly this shape:
[{{\"word\": \"...\", \"definition\": \"...\", \"example\": \"...\"}}]
",
        desc = level.description(),
    )
}
