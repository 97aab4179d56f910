//! # Paper-Review Prompts
//!
//! The NeurIPS/ICLR review files list numbered review questions; the stored
//! template is not the file body but this synthesized wrapper around the
//! question title, with the paper text substituted at call time.

use super::IDEA_PLACEHOLDER;

/// Builds the full review prompt template from a review-question title.
pub fn review_template(title: &str) -> String {
    format!(
        "Based on the following research paper, {title}\n\nPaper text:\n{IDEA_PLACEHOLDER}\n\nPlease provide a detailed response addressing this aspect of the review."
    )
}
