//! Shared test doubles for the promptdeck workspace.

use async_trait::async_trait;
use promptdeck::errors::PromptError;
use promptdeck::providers::ai::{AiProvider, ChatRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// An in-process AI provider with pre-programmed responses.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response. The key should be a unique substring of the
    /// final user message of the request it answers.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded requests for assertion.
    pub fn get_calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, request: ChatRequest) -> Result<String, PromptError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(request.clone());
        drop(calls);

        let current_prompt = request
            .messages
            .last()
            .map(|message| message.content.as_str())
            .unwrap_or_default();

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if current_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for prompt. Got: '{current_prompt}'"
        )))
    }
}
