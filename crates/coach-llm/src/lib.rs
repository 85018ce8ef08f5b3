//! LLM-backed writing coach: OpenAI-compatible client, prompts and reply parsing.

mod coach;
mod llm;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod parse;
pub mod prompt;

pub use coach::LlmWritingCoach;
pub use coach_types::{CoachError, WritingCoach};
pub use llm::{LLMClient, LLMError, LlmConfig, Message, OpenAiLLMClient};

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockLLMClient;
