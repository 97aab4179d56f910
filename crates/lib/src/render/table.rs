//! Markdown table reconstruction.
//!
//! Model output frequently wraps table rows across physical lines or drops
//! the outer pipes. This module re-joins the accumulated span into complete
//! `|...|` rows, discards the separator rows, and pads everything into a
//! rectangular grid.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("table span has no header row")]
    MissingHeader,
}

/// Motifs that identify a separator row inside an accumulated span.
const ROW_SEPARATOR_MOTIFS: [&str; 5] = ["---", ":-:", "-|-", ":--", "--:"];

/// Reconstructs a table span into rectangular rows, header first.
///
/// Every row is padded with empty cells to the widest row seen, so all
/// rows (the header included) share one column count.
pub(super) fn reconstruct(span: &str) -> Result<Vec<Vec<String>>, TableError> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in rejoin_wrapped_rows(span) {
        if is_separator_row(&line) {
            continue;
        }
        let cells: Vec<String> = line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(String::from)
            .collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    if rows.is_empty() {
        return Err(TableError::MissingHeader);
    }

    let max_columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(max_columns, String::new());
    }
    Ok(rows)
}

fn is_separator_row(line: &str) -> bool {
    ROW_SEPARATOR_MOTIFS.iter().any(|motif| line.contains(motif))
}

/// Re-joins physical lines that were wrapped mid-row and synthesizes
/// missing outer pipes, so each returned element is one complete row.
///
/// A line that does not both start and end with `|` is treated as a
/// continuation of the previous incomplete line.
fn rejoin_wrapped_rows(span: &str) -> Vec<String> {
    let mut joined: Vec<String> = Vec::new();
    let mut pending = String::new();

    for line in span.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() || !stripped.contains('|') {
            continue;
        }

        if is_separator_row(stripped) || (stripped.starts_with('|') && stripped.ends_with('|')) {
            if !pending.is_empty() {
                joined.push(std::mem::take(&mut pending));
            }
            joined.push(stripped.to_string());
        } else if pending.is_empty() {
            pending = stripped.to_string();
        } else {
            pending.push(' ');
            pending.push_str(stripped);
        }
    }
    if !pending.is_empty() {
        joined.push(pending);
    }

    joined
        .into_iter()
        .map(|mut row| {
            if !row.starts_with('|') {
                row.insert(0, '|');
            }
            if !row.ends_with('|') {
                row.push('|');
            }
            row
        })
        .collect()
}
