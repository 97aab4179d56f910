pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A single message in a chat exchange with the model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// A fully assembled model call: the system prompt plus the ordered
/// conversation history, ending with the current user prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for generating one response from
/// an assembled chat request, independent of the backing API.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates one response for the given chat request.
    async fn generate(&self, request: ChatRequest) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
