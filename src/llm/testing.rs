// Scripted completion backend for tests

use crate::llm::provider::{ChatCompletion, ChatResponse, CompletionRequest};
use crate::types::CompletionFailure;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and records every request it sees.
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new(responses: Vec<ChatResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedCompletion {
    async fn create_chat_completion(&self, request: &CompletionRequest) -> ChatResponse {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionFailure::Transport("script exhausted".into())))
    }
}
