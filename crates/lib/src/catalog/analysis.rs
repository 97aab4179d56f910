//! Analysis-format parser.
//!
//! Section headers are `### ` lines. Prompt headers are bold lines such as
//! `**3. Competitive Landscape**`: the line is split on `.`, the first
//! segment (minus the `**` markers) is the number and the second segment is
//! the title. Template text is every subsequent non-empty line up to the
//! next `**`-, `---`-, or `###`-prefixed line.

use super::cursor::LineCursor;
use super::{PromptCatalog, PromptRecord, Section};

pub(super) fn parse(raw: &str) -> PromptCatalog {
    let mut catalog = PromptCatalog::default();
    let mut current: Option<Section> = None;

    let mut cursor = LineCursor::new(raw);
    while let Some(line) = cursor.current() {
        if let Some(name) = line.strip_prefix("### ") {
            if let Some(section) = current.take() {
                catalog.sections.push(section);
            }
            current = Some(Section::new(name.trim()));
            cursor.advance();
            continue;
        }

        if line.starts_with("**") && line.contains('.') {
            let mut segments = line.split('.');
            let number = segments
                .next()
                .unwrap_or_default()
                .replace("**", "")
                .trim()
                .to_string();
            // A title containing its own period keeps only the first
            // segment after the number; the rest of the header is dropped.
            let title = segments
                .next()
                .unwrap_or_default()
                .replace("**", "")
                .trim()
                .to_string();

            cursor.advance();
            let body = cursor.collect_until(|next| {
                next.starts_with("**") || next.starts_with("---") || next.starts_with("###")
            });
            let template: String = body
                .iter()
                .filter(|body_line| !body_line.trim().is_empty())
                .map(|body_line| format!("{body_line}\n"))
                .collect();

            // Headers seen before any section, and prompts with no body,
            // are dropped.
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
