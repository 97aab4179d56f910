//! # Prompt Sequencer
//!
//! Explicit session state for one guided run: the flattened prompt list, a
//! cursor, and the responses recorded so far. The caller owns the value and
//! passes it around; the parser and formatter stay stateless.

use crate::catalog::{PromptCatalog, PromptRecord};
use crate::prompts::{analyst, IDEA_PLACEHOLDER};
use crate::providers::ai::{ChatMessage, ChatRequest};
use std::collections::BTreeMap;

/// One prompt in the flattened global order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedPrompt {
    pub section: String,
    pub record: PromptRecord,
}

/// The state of one guided run over a parsed catalog.
///
/// Flattening is deterministic: the same catalog always yields the same
/// index-to-prompt mapping. Responses are stored per index so skipped
/// prompts simply contribute nothing to the report.
#[derive(Debug, Clone)]
pub struct PromptSequence {
    prompts: Vec<SequencedPrompt>,
    cursor: usize,
    responses: BTreeMap<usize, String>,
}

impl PromptSequence {
    /// Flattens the catalog's sections into one linear prompt list.
    pub fn new(catalog: &PromptCatalog) -> Self {
        let prompts = catalog
            .iter_flat()
            .map(|(section, record)| SequencedPrompt {
                section: section.to_string(),
                record: record.clone(),
            })
            .collect();
        Self {
            prompts,
            cursor: 0,
            responses: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// The cursor position (the index of the prompt currently in play).
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn get(&self, index: usize) -> Option<&SequencedPrompt> {
        self.prompts.get(index)
    }

    /// The prompt under the cursor, or `None` for an empty sequence.
    pub fn current(&self) -> Option<&SequencedPrompt> {
        self.prompts.get(self.cursor)
    }

    /// Moves the cursor forward; returns false when already on the last
    /// prompt.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.prompts.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor back; returns false when already at the start.
    pub fn rewind(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Records the model response (or a user-facing failure message) for a
    /// prompt index. A later call for the same index replaces the response.
    pub fn record_response(&mut self, index: usize, response: impl Into<String>) {
        if index < self.prompts.len() {
            self.responses.insert(index, response.into());
        }
    }

    pub fn response(&self, index: usize) -> Option<&str> {
        self.responses.get(&index).map(String::as_str)
    }

    /// Answered prompts in global order.
    pub fn answered(&self) -> impl Iterator<Item = (usize, &SequencedPrompt, &str)> {
        self.responses
            .iter()
            .filter_map(|(&index, response)| {
                self.prompts
                    .get(index)
                    .map(|prompt| (index, prompt, response.as_str()))
            })
    }

    /// Assembles the model call for the prompt at `index`: the analyst
    /// system prompt, then for every answered prior index a (request,
    /// result) pair, then the current prompt, with the idea text
    /// substituted into every template.
    pub fn request_for(&self, index: usize, idea: &str) -> Option<ChatRequest> {
        let prompt = self.prompts.get(index)?;

        let mut messages = Vec::new();
        for (prior_index, prior, response) in self.answered() {
            if prior_index >= index {
                break;
            }
            let prior_prompt = substitute_idea(&prior.record.template, idea);
            messages.push(ChatMessage::user(analyst::previous_request(
                prior_index,
                &prior_prompt,
            )));
            messages.push(ChatMessage::assistant(analyst::previous_result(
                prior_index,
                response,
            )));
        }

        let current_prompt = substitute_idea(&prompt.record.template, idea);
        messages.push(ChatMessage::user(analyst::next_analysis(&current_prompt)));

        Some(ChatRequest {
            system: analyst::ANALYST_SYSTEM_PROMPT.to_string(),
            messages,
        })
    }

    /// [`Self::request_for`] at the cursor.
    pub fn build_request(&self, idea: &str) -> Option<ChatRequest> {
        self.request_for(self.cursor, idea)
    }
}

/// Replaces the idea placeholder in a template with the user's input text.
pub fn substitute_idea(template: &str, idea: &str) -> String {
    template.replace(IDEA_PLACEHOLDER, idea)
}
