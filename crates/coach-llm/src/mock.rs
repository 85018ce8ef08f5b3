//! Mock LLM client for tests: canned reply, no network.

use crate::llm::{LLMClient, LLMError, Message};
use std::sync::Mutex;

enum Reply {
    Text(String),
    Error(String),
}

/// Mock client that returns a fixed reply (or API error) and records every call.
pub struct MockLLMClient {
    reply: Reply,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLLMClient {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Error(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Message lists received so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl LLMClient for MockLLMClient {
    async fn complete_with_messages(&self, messages: &[Message]) -> Result<String, LLMError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(messages.to_vec());
        match &self.reply {
            Reply::Text(t) => Ok(t.clone()),
            Reply::Error(e) => Err(LLMError::Api(e.clone())),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn complete_sends_single_user_message() {
        let llm = MockLLMClient::with_reply("ok");
        assert_eq!(llm.complete("hello").await.unwrap(), "ok");
        assert_eq!(llm.calls(), vec![vec![Message::user("hello")]]);
    }

    #[tokio::test]
    async fn error_reply_is_api_error() {
        let llm = MockLLMClient::with_error("down");
        assert!(matches!(llm.complete("x").await, Err(LLMError::Api(ref m)) if m == "down"));
    }
}
