//! Plan-format parser.
//!
//! Section headers are `## ` lines and prompt headers are `### ` lines, both
//! with any `**` emphasis stripped. The prompt header splits on the first
//! `". "` into number and title. Template text is the following run of
//! non-blank lines up to the next `##`/`---` line, with a leading `>`
//! blockquote marker stripped per line. A blank line ends the template.

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
            current = Some(Section::new(name.trim().replace("**", "")));
            cursor.advance();
            continue;
        }

        if let Some(header) = line.strip_prefix("### ") {
            let header = header.trim().replace("**", "");
            let (number, title) = match header.split_once(". ") {
                Some((number, title)) => (number.to_string(), title.to_string()),
                None => (String::new(), header.clone()),
            };

            cursor.advance();
            let body = cursor.collect_until(|next| {
                next.trim().is_empty() || next.starts_with("##") || next.starts_with("---")
            });
            let template: String = body
                .iter()
                .map(|body_line| {
                    let trimmed = body_line.trim();
                    let unquoted = trimmed
                        .strip_prefix('>')
                        .map(str::trim)
                        .unwrap_or(trimmed);
                    format!("{unquoted}\n")
                })
                .collect();

            if let Some(section) = current.as_mut() {
                if !template.is_empty() {
                    section.prompts.push(PromptRecord {
                        number,
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
