use crate::types::CompletionFailure;
use async_trait::async_trait;

/// Answer text, or the reason no answer could be extracted.
pub type ChatResponse = Result<String, CompletionFailure>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// A remote chat-completion backend.
///
/// One attempt per call: implementations must not retry.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn create_chat_completion(&self, request: &CompletionRequest) -> ChatResponse;
}
