//! # Response Formatter
//!
//! Turns one raw model response (markdown-ish text that may contain tables,
//! bullet lists, and leftover HTML tags) into an ordered sequence of
//! renderable blocks. Rendering never fails: a table span that cannot be
//! reconstructed into a rectangular grid is kept as plain text instead.

mod table;

pub use table::TableError;

use tracing::debug;

/// The paragraph prefix bullet lines are rewritten to. The report builder
/// uses it to give bullet paragraphs their own indentation.
pub const BULLET_PREFIX: &str = "\u{2022} ";

/// A renderable unit produced from one model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBlock {
    /// Ordered paragraphs; a run of bullet items forms its own paragraph.
    Text(Vec<String>),
    /// Rectangular table rows; the first row is the header.
    Table(Vec<Vec<String>>),
}

/// Separator motifs that confirm a candidate line actually starts a table.
const HEADER_SEPARATOR_MOTIFS: [&str; 5] = ["-|-", "---|", "|---", ":--", "--:"];

/// Converts one response string into an ordered block sequence.
///
/// Order is preserved: text and table blocks interleave exactly as they
/// appear in the response.
pub fn render(response: &str) -> Vec<RenderBlock> {
    let scrubbed = scrub(response);
    let mut blocks = Vec::new();

    for span in split_spans(&scrubbed) {
        match span {
            Span::Text(text) => {
                let paragraphs = into_paragraphs(&text);
                if !paragraphs.is_empty() {
                    blocks.push(RenderBlock::Text(paragraphs));
                }
            }
            Span::Table(text) => match table::reconstruct(&text) {
                Ok(rows) => blocks.push(RenderBlock::Table(rows)),
                Err(err) => {
                    debug!("Table span kept as plain text: {err}");
                    let fallback = text.replace('|', " | ");
                    blocks.push(RenderBlock::Text(vec![fallback.trim().to_string()]));
                }
            },
        }
    }

    blocks
}

/// Removes literal markup the model tends to emit. Heading markers collapse
/// into plain paragraph text; there is no distinct heading block.
fn scrub(text: &str) -> String {
    text.replace("<para>", "")
        .replace("</para>", "")
        .replace("<b>", "")
        .replace("</b>", "")
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("###", "")
        .replace("##", "")
}

enum Span {
    Text(String),
    Table(String),
}

/// A `|` in prose is not a table: the line only starts one when a header
/// separator appears within the next two lines.
fn header_separator_follows(lines: &[&str], index: usize) -> bool {
    lines
        .iter()
        .skip(index + 1)
        .take(2)
        .any(|next| is_header_separator(next))
}

/// Matches separator rows with or without inner spacing, e.g. both
/// `|---|---|` and `| --- | --- |`.
fn is_header_separator(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.contains('|')
        && HEADER_SEPARATOR_MOTIFS
            .iter()
            .any(|motif| compact.contains(motif))
}

/// Splits the scrubbed response into alternating text and table spans.
///
/// Inside a table span, a blank line is absorbed when the line after it
/// still contains `|`; the span ends at the first non-blank, non-`|` line,
/// which starts the next text span.
fn split_spans(scrubbed: &str) -> Vec<Span> {
    let lines: Vec<&str> = scrubbed.split('\n').collect();
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut table = String::new();
    let mut in_table = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if !in_table && line.contains('|') && header_separator_follows(&lines, i) {
            if !text.is_empty() {
                spans.push(Span::Text(std::mem::take(&mut text)));
            }
            in_table = true;
            table.push_str(line);
            table.push('\n');
            i += 1;
            continue;
        }

        if in_table {
            if line.contains('|') {
                table.push_str(line);
                table.push('\n');
            } else if line.is_empty() {
                if lines.get(i + 1).is_some_and(|next| next.contains('|')) {
                    i += 1;
                    table.push_str(lines[i].trim());
                    table.push('\n');
                } else {
                    spans.push(Span::Table(std::mem::take(&mut table)));
                    in_table = false;
                }
            } else {
                spans.push(Span::Table(std::mem::take(&mut table)));
                in_table = false;
                text.push_str(line);
                text.push('\n');
            }
        } else {
            text.push_str(line);
            text.push('\n');
        }

        i += 1;
    }

    if in_table {
        spans.push(Span::Table(table));
    } else if !text.is_empty() {
        spans.push(Span::Text(text));
    }
    spans
}

/// Splits a text span into paragraphs. A blank line ends the current
/// paragraph; runs of `- `/`* ` bullet lines form their own paragraph,
/// separate from surrounding prose.
fn into_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut in_bullet_list = false;

    let flush = |current: &mut Vec<String>, paragraphs: &mut Vec<String>| {
        if !current.is_empty() {
            paragraphs.push(current.join("\n"));
            current.clear();
        }
    };

    for line in text.split('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush(&mut current, &mut paragraphs);
            in_bullet_list = false;
            continue;
        }

        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            if !in_bullet_list {
                flush(&mut current, &mut paragraphs);
            }
            current.push(format!("{BULLET_PREFIX}{item}"));
            in_bullet_list = true;
        } else {
            if in_bullet_list {
                flush(&mut current, &mut paragraphs);
                in_bullet_list = false;
            }
            current.push(trimmed.to_string());
        }
    }
    flush(&mut current, &mut paragraphs);

    paragraphs.retain(|paragraph| !paragraph.trim().is_empty());
    paragraphs
}
