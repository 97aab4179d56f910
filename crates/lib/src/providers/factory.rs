//! # AI Provider Factory
//!
//! Centralizes provider construction so every consumer (the CLI today, any
//! future front end) builds providers the same way from the same
//! configuration strings.

use crate::{
    errors::PromptError,
    providers::ai::{openai::OpenAiCompatProvider, AiProvider},
};
use tracing::info;

/// Creates an AI provider instance from configuration strings.
///
/// `kind` selects the provider family. Only OpenAI-compatible endpoints are
/// supported; the argument keeps construction sites stable if more families
/// are added.
pub fn create_ai_provider(
    kind: &str,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<Box<dyn AiProvider>, PromptError> {
    match kind {
        "openai" | "local" => {
            info!("Configuring OpenAI-compatible provider with URL: {api_url}");
            Ok(Box::new(OpenAiCompatProvider::new(api_url, api_key, model)?))
        }
        other => Err(PromptError::UnsupportedProvider(other.to_string())),
    }
}
