//! # Prompt Sequencer Tests
//!
//! Covers flattening determinism, cursor movement, response recording, and
//! chat-history assembly (prior answered prompts only, idea substitution,
//! failure text treated as an ordinary response).

use promptdeck::catalog::{parse, PromptFormat};
use promptdeck::prompts::analyst::ANALYST_SYSTEM_PROMPT;
use promptdeck::providers::ai::AiProvider;
use promptdeck::sequence::{substitute_idea, PromptSequence};
use promptdeck_test_utils::MockAiProvider;

const ANALYSIS_FILE: &str = "### Market\n\
                             **1. Size**\n\
                             Estimate the market size for <idea>.\n\
                             **2. Growth**\n\
                             Project growth for <idea>.\n\
                             ### Competition\n\
                             **3. Rivals**\n\
                             List competitors of <idea>.\n";

fn sample_sequence() -> PromptSequence {
    PromptSequence::new(&parse(PromptFormat::Analysis, ANALYSIS_FILE))
}

#[test]
fn flattening_is_deterministic() {
    let first = sample_sequence();
    let second = sample_sequence();

    assert_eq!(first.len(), 3);
    for index in 0..first.len() {
        assert_eq!(first.get(index), second.get(index));
    }
    assert_eq!(first.get(0).unwrap().section, "Market");
    assert_eq!(first.get(2).unwrap().section, "Competition");
}

#[test]
fn cursor_moves_within_bounds() {
    let mut sequence = sample_sequence();

    assert_eq!(sequence.position(), 0);
    assert!(!sequence.rewind());
    assert!(sequence.advance());
    assert!(sequence.advance());
    assert!(!sequence.advance());
    assert_eq!(sequence.position(), 2);
    assert!(sequence.rewind());
    assert_eq!(sequence.position(), 1);
    assert_eq!(sequence.current().unwrap().record.number, "2");
}

#[test]
fn substitution_replaces_every_placeholder() {
    assert_eq!(
        substitute_idea("Judge <idea> against <idea>.", "solar kiosks"),
        "Judge solar kiosks against solar kiosks."
    );
}

#[test]
fn request_includes_only_answered_prior_prompts() {
    let mut sequence = sample_sequence();
    sequence.record_response(0, "Sized at $10B.");
    // Index 1 is left unanswered on purpose.

    let request = sequence.request_for(2, "solar kiosks").unwrap();
    assert_eq!(request.system, ANALYST_SYSTEM_PROMPT);
    // One (request, result) pair for index 0, then the current prompt.
    assert_eq!(request.messages.len(), 3);

    assert_eq!(request.messages[0].role, "user");
    assert!(request.messages[0]
        .content
        .starts_with("Previous analysis request 1:"));
    assert!(request.messages[0]
        .content
        .contains("Estimate the market size for solar kiosks."));

    assert_eq!(request.messages[1].role, "assistant");
    assert!(request.messages[1]
        .content
        .starts_with("Previous analysis result 1:"));
    assert!(request.messages[1].content.contains("Sized at $10B."));

    assert_eq!(request.messages[2].role, "user");
    assert!(request.messages[2]
        .content
        .starts_with("Based on all previous analyses, please provide the next analysis:"));
    assert!(request.messages[2]
        .content
        .contains("List competitors of solar kiosks."));
}

#[test]
fn first_request_has_no_history() {
    let sequence = sample_sequence();
    let request = sequence.build_request("solar kiosks").unwrap();

    assert_eq!(request.messages.len(), 1);
    assert!(request.messages[0]
        .content
        .contains("Estimate the market size for solar kiosks."));
}

#[test]
fn out_of_range_requests_and_responses_are_ignored() {
    let mut sequence = sample_sequence();
    assert!(sequence.request_for(99, "x").is_none());

    sequence.record_response(99, "ignored");
    assert_eq!(sequence.answered().count(), 0);
}

#[test]
fn failure_text_is_recorded_like_any_response() {
    let mut sequence = sample_sequence();
    sequence.record_response(0, "Sized at $10B.");
    sequence.record_response(1, "Error: the model call for this prompt failed.");

    let answered: Vec<_> = sequence.answered().collect();
    assert_eq!(answered.len(), 2);
    assert_eq!(answered[0].0, 0);
    assert_eq!(answered[1].2, "Error: the model call for this prompt failed.");

    // The failure response is replayed as history like any other.
    let request = sequence.request_for(2, "solar kiosks").unwrap();
    assert_eq!(request.messages.len(), 5);
}

#[tokio::test]
async fn drives_a_run_against_the_mock_provider() {
    let provider = MockAiProvider::new();
    provider.add_response("market size for solar kiosks", "It is huge.");
    provider.add_response("growth for solar kiosks", "Doubling yearly.");
    provider.add_response("competitors of solar kiosks", "Nobody yet.");

    let mut sequence = sample_sequence();
    for index in 0..sequence.len() {
        let request = sequence.request_for(index, "solar kiosks").unwrap();
        let response = provider.generate(request).await.unwrap();
        sequence.record_response(index, response);
    }

    assert_eq!(sequence.answered().count(), 3);
    assert_eq!(sequence.response(1), Some("Doubling yearly."));

    let calls = provider.get_calls();
    assert_eq!(calls.len(), 3);
    // History grows as the run progresses: 1, then 3, then 5 messages.
    assert_eq!(calls[0].messages.len(), 1);
    assert_eq!(calls[1].messages.len(), 3);
    assert_eq!(calls[2].messages.len(), 5);
    assert_eq!(calls[2].system, ANALYST_SYSTEM_PROMPT);
}

#[tokio::test]
async fn unprogrammed_prompts_surface_an_error_to_record() {
    let provider = MockAiProvider::new();
    let sequence = sample_sequence();

    let request = sequence.build_request("solar kiosks").unwrap();
    let result = provider.generate(request).await;
    assert!(result.is_err());
}
