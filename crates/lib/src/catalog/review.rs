//! Review-format parser (NeurIPS and ICLR).
//!
//! Both review files are flat numbered question lists under one fixed
//! section label. A prompt header is any line whose trimmed form starts
//! with a decimal digit and contains `". "`. The body lines under a header
//! are scanned only to find the next header; the stored template is
//! synthesized from the question title alone, wrapping it around the paper
//! text placeholder.

use super::cursor::LineCursor;
use super::{PromptCatalog, PromptRecord, Section};
use crate::prompts::review::review_template;

pub(super) fn parse(raw: &str, section_label: &str) -> PromptCatalog {
    let mut section = Section::new(section_label);

    let mut cursor = LineCursor::new(raw);
    while let Some(line) = cursor.current() {
        if let Some((number, title)) = split_header(line.trim()) {
            cursor.advance();
            // Body text is discarded; only the title feeds the template.
            let _body = cursor.collect_until(|next| split_header(next.trim()).is_some());
            section.prompts.push(PromptRecord {
                number: number.to_string(),
                title: title.to_string(),
                template: review_template(title),
            });
            continue;
        }
        cursor.advance();
    }

    // The fixed section is present even when no prompts parsed.
    PromptCatalog {
        sections: vec![section],
    }
}

/// Splits a numbered review question header into number and title.
fn split_header(line: &str) -> Option<(&str, &str)> {
    if !line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    line.split_once(". ")
}
