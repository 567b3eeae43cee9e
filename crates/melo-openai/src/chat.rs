use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::OpenAiError;

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Anything that turns a conversation into a single reply.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        messages: &[ChatMessage],
    ) -> impl Future<Output = Result<String, OpenAiError>> + Send;
}

/// Body of a chat completions call.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Deterministic sampling, the only mode summaries are generated with.
    pub fn deterministic(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice.
    pub fn into_text(self) -> Result<String, OpenAiError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OpenAiError::ResponseParse("no content in first choice".to_string()))
    }
}

/// Models sometimes return escaped newlines; turn them into real ones.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
