//! # Prompt Catalog Parser Tests
//!
//! Exercises the five prompt-file formats: header recognition, template
//! accumulation boundaries, section ordering, and the degradation rules
//! (unknown tags, empty templates, prompts outside any section).

use promptdeck::catalog::{parse, parse_tagged, PromptFormat};

// --- Analysis format ---

#[test]
fn analysis_parses_a_minimal_file() {
    let catalog = parse(PromptFormat::Analysis, "### Market\n**1. Size**\nThe market is big.\n");

    assert_eq!(catalog.sections.len(), 1);
    let section = &catalog.sections[0];
    assert_eq!(section.name, "Market");
    assert_eq!(section.prompts.len(), 1);

    let prompt = &section.prompts[0];
    assert_eq!(prompt.number, "1");
    assert_eq!(prompt.title, "Size");
    assert_eq!(prompt.template, "The market is big.\n");
}

#[test]
fn analysis_template_runs_to_the_next_header_marker() {
    let content = "### Strategy\n\
                   **1. Moat**\n\
                   First line.\n\
                   \n\
                   Second line after a blank.\n\
                   ---\n\
                   **2. Pricing**\n\
                   Pricing body.\n\
                   ### Next Section\n\
                   **3. Risks**\n\
                   Risk body.\n";
    let catalog = parse(PromptFormat::Analysis, content);

    assert_eq!(catalog.sections.len(), 2);
    let strategy = &catalog.sections[0];
    assert_eq!(strategy.prompts.len(), 2);
    // Blank lines inside the body are skipped, not terminators.
    assert_eq!(
        strategy.prompts[0].template,
        "First line.\nSecond line after a blank.\n"
    );
    assert_eq!(strategy.prompts[1].template, "Pricing body.\n");
    assert_eq!(catalog.sections[1].prompts[0].number, "3");
}

#[test]
fn analysis_drops_prompts_before_any_section_and_empty_templates() {
    let content = "**1. Orphan**\n\
                   Orphan body.\n\
                   ### Real\n\
                   **2. Bodyless**\n\
                   **3. Kept**\n\
                   Kept body.\n";
    let catalog = parse(PromptFormat::Analysis, content);

    assert_eq!(catalog.sections.len(), 1);
    let prompts = &catalog.sections[0].prompts;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].title, "Kept");
}

#[test]
fn analysis_retains_a_section_with_zero_prompts() {
    let catalog = parse(PromptFormat::Analysis, "### Empty\n### Full\n**1. A**\nBody.\n");

    let names: Vec<&str> = catalog.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Empty", "Full"]);
    assert!(catalog.sections[0].prompts.is_empty());
    assert_eq!(catalog.prompt_count(), 1);
}

// --- Plan format ---

#[test]
fn plan_strips_emphasis_and_blockquote_markers() {
    let content = "## **Phase One**\n\
                   ### **1. Mission**\n\
                   > Define the mission for <idea>.\n\
                   Additional context.\n\
                   \n\
                   ### 2. Vision\n\
                   State the vision.\n";
    let catalog = parse(PromptFormat::Plan, content);

    assert_eq!(catalog.sections.len(), 1);
    let section = &catalog.sections[0];
    assert_eq!(section.name, "Phase One");
    assert_eq!(section.prompts.len(), 2);

    let mission = &section.prompts[0];
    assert_eq!(mission.number, "1");
    assert_eq!(mission.title, "Mission");
    // Blockquote markers are stripped per line; the blank line ended the
    // template before the next header.
    assert_eq!(
        mission.template,
        "Define the mission for <idea>.\nAdditional context.\n"
    );

    assert_eq!(section.prompts[1].title, "Vision");
}

#[test]
fn plan_header_without_number_keeps_full_title() {
    let catalog = parse(PromptFormat::Plan, "## Phase\n### Overview\nBody.\n");

    let prompt = &catalog.sections[0].prompts[0];
    assert_eq!(prompt.number, "");
    assert_eq!(prompt.title, "Overview");
}

// --- Research format ---

#[test]
fn research_prompts_take_the_full_header_as_title() {
    let content = "## Background\n\
                   ### Literature Review\n\
                   - Survey prior work\n\
                   - Identify gaps\n\
                   \n\
                   ### Empty Subsection\n\
                   \n\
                   ## Methods\n\
                   ### Approach\n\
                   Describe the method.\n";
    let catalog = parse(PromptFormat::Research, content);

    assert_eq!(catalog.sections.len(), 2);
    let background = &catalog.sections[0];
    assert_eq!(background.name, "Background");
    // The blank subsection is dropped; blank lines inside a body are not.
    assert_eq!(background.prompts.len(), 1);
    let review = &background.prompts[0];
    assert_eq!(review.number, "");
    assert_eq!(review.title, "Literature Review");
    assert_eq!(review.template, "- Survey prior work\n- Identify gaps\n");

    assert_eq!(catalog.sections[1].prompts[0].title, "Approach");
}

// --- Review formats ---

#[test]
fn neurips_synthesizes_templates_from_titles_only() {
    let catalog = parse(
        PromptFormat::NeuripsReview,
        "1. Summarize the paper\nDetails here.\n2. Assess novelty\nMore.\n",
    );

    assert_eq!(catalog.sections.len(), 1);
    let section = &catalog.sections[0];
    assert_eq!(section.name, "NeurIPS Review");
    assert_eq!(section.prompts.len(), 2);

    let first = &section.prompts[0];
    assert_eq!(first.number, "1");
    assert_eq!(first.title, "Summarize the paper");
    assert!(first
        .template
        .starts_with("Based on the following research paper, Summarize the paper"));
    assert!(first.template.contains("<idea>"));
    // The body lines under the header are discarded.
    assert!(!first.template.contains("Details here."));

    assert_eq!(section.prompts[1].title, "Assess novelty");
}

#[test]
fn iclr_uses_its_own_section_label_and_keeps_it_when_empty() {
    let catalog = parse(PromptFormat::IclrReview, "No numbered questions here.\n");

    assert_eq!(catalog.sections.len(), 1);
    assert_eq!(catalog.sections[0].name, "ICLR Review");
    assert!(catalog.sections[0].prompts.is_empty());
    assert!(catalog.is_empty());
}

#[test]
fn review_headers_require_a_leading_digit_and_dot_space() {
    let content = "Preamble text. Not a header.\n\
                   10. Double-digit question\n\
                   1)Not a header either\n";
    let catalog = parse(PromptFormat::NeuripsReview, content);

    let prompts = &catalog.sections[0].prompts;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].number, "10");
    assert_eq!(prompts[0].title, "Double-digit question");
}

// --- Format tags and determinism ---

#[test]
fn unrecognized_tag_yields_an_empty_catalog() {
    let catalog = parse_tagged("haiku", "### Market\n**1. Size**\nBody.\n");
    assert!(catalog.sections.is_empty());
    assert!(catalog.is_empty());
}

#[test]
fn recognized_tags_map_to_their_formats() {
    let raw = "### Market\n**1. Size**\nBody.\n";
    assert_eq!(parse_tagged("analysis", raw), parse(PromptFormat::Analysis, raw));
    assert_eq!(parse_tagged("analyze", raw), parse(PromptFormat::Analysis, raw));
    assert!("bogus".parse::<PromptFormat>().is_err());
}

#[test]
fn parsing_is_deterministic_across_runs() {
    let content = "### A\n**1. One**\nBody one.\n**2. Two**\nBody two.\n### B\n**3. Three**\nBody three.\n";
    let first = parse(PromptFormat::Analysis, content);
    let second = parse(PromptFormat::Analysis, content);

    assert_eq!(first, second);
    let flat_first: Vec<_> = first.iter_flat().collect();
    let flat_second: Vec<_> = second.iter_flat().collect();
    assert_eq!(flat_first, flat_second);
}
