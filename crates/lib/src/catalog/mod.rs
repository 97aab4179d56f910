//! # Prompt Catalog
//!
//! Parsers for the five known prompt-file formats. Each format is a distinct
//! line-scanning strategy that turns semi-structured text into an ordered
//! collection of sections, each holding labeled prompt templates.
//!
//! Parsing never fails: malformed fragments are skipped, and an unrecognized
//! format tag yields an empty catalog rather than an error.

mod analysis;
mod cursor;
mod plan;
mod research;
mod review;

use crate::errors::PromptError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// The five recognized prompt-file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptFormat {
    Analysis,
    Plan,
    Research,
    NeuripsReview,
    IclrReview,
}

impl PromptFormat {
    /// Human-readable label, used in the report filename convention.
    pub fn label(&self) -> &'static str {
        match self {
            PromptFormat::Analysis => "Analysis",
            PromptFormat::Plan => "Plan",
            PromptFormat::Research => "Research",
            PromptFormat::NeuripsReview => "Neurips",
            PromptFormat::IclrReview => "Iclr",
        }
    }
}

impl FromStr for PromptFormat {
    type Err = PromptError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "analysis" | "analyze" => Ok(PromptFormat::Analysis),
            "plan" => Ok(PromptFormat::Plan),
            "research" => Ok(PromptFormat::Research),
            "neurips" => Ok(PromptFormat::NeuripsReview),
            "iclr" => Ok(PromptFormat::IclrReview),
            other => Err(PromptError::UnknownFormat(other.to_string())),
        }
    }
}

/// A single prompt template parsed from a prompt file.
///
/// `template` contains the literal `<idea>` placeholder that the caller
/// substitutes with the user's input text before the model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub number: String,
    pub title: String,
    pub template: String,
}

/// A named group of prompts; file order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub prompts: Vec<PromptRecord>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompts: Vec::new(),
        }
    }
}

/// The ordered sections parsed from one prompt file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCatalog {
    pub sections: Vec<Section>,
}

impl PromptCatalog {
    /// Total number of prompts across all sections.
    pub fn prompt_count(&self) -> usize {
        self.sections.iter().map(|s| s.prompts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.prompt_count() == 0
    }

    /// Iterates prompts in global order, paired with their section name.
    pub fn iter_flat(&self) -> impl Iterator<Item = (&str, &PromptRecord)> {
        self.sections.iter().flat_map(|section| {
            section
                .prompts
                .iter()
                .map(move |record| (section.name.as_str(), record))
        })
    }
}

/// Parses `raw` according to `format`.
///
/// Never fails; fragments that do not match the format's header rules are
/// omitted from the result.
pub fn parse(format: PromptFormat, raw: &str) -> PromptCatalog {
    match format {
        PromptFormat::Analysis => analysis::parse(raw),
        PromptFormat::Plan => plan::parse(raw),
        PromptFormat::Research => research::parse(raw),
        PromptFormat::NeuripsReview => review::parse(raw, "NeurIPS Review"),
        PromptFormat::IclrReview => review::parse(raw, "ICLR Review"),
    }
}

/// Parses with a caller-supplied string tag.
///
/// An unrecognized tag yields an empty catalog rather than an error, so a
/// caller wired to user input degrades to "no prompts" instead of failing.
pub fn parse_tagged(tag: &str, raw: &str) -> PromptCatalog {
    match tag.parse::<PromptFormat>() {
        Ok(format) => parse(format, raw),
        Err(_) => {
            warn!("Unknown prompt format tag: {tag}");
            PromptCatalog::default()
        }
    }
}
