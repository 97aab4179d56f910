//! Research-format parser.
//!
//! Section headers are `## ` lines; every `### ` line is a prompt whose
//! title is the full header text (this format carries no numbering).
//! Template text is every subsequent non-empty line up to the next `##` or
//! `# ` line; a prompt whose accumulated template is blank is dropped.

use super::cursor::LineCursor;
use super::{PromptCatalog, PromptRecord, Section};

pub(super) fn parse(raw: &str) -> PromptCatalog {
    let mut catalog = PromptCatalog::default();
    let mut current: Option<Section> = None;

    let mut cursor = LineCursor::new(raw);
    while let Some(line) = cursor.current() {
        if let Some(name) = line.strip_prefix("## ") {
            if let Some(section) = current.take() {
                catalog.sections.push(section);
            }
            current = Some(Section::new(name.trim()));
            cursor.advance();
            continue;
        }

        if let Some(title) = line.strip_prefix("### ") {
            let title = title.trim().to_string();

            cursor.advance();
            let body = cursor
                .collect_until(|next| next.starts_with("##") || next.starts_with("# "));
            let template: String = body
                .iter()
                .filter(|body_line| !body_line.trim().is_empty())
                .map(|body_line| format!("{body_line}\n"))
                .collect();

            if let Some(section) = current.as_mut() {
                if !template.trim().is_empty() {
                    section.prompts.push(PromptRecord {
                        number: String::new(),
                        title,
                        template,
                    });
                }
            }
            continue;
        }

        cursor.advance();
    }

    if let Some(section) = current.take() {
        catalog.sections.push(section);
    }
    catalog
}
