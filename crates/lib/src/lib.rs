//! # Guided Prompt-Sequence Core
//!
//! This crate provides the core building blocks for guiding a user through a
//! fixed, ordered sequence of prompts: parsing one of the known prompt-file
//! formats into an ordered catalog, sequencing the prompts against an AI
//! provider with the full prior history, and formatting each raw model
//! response into renderable blocks for the PDF report builder.

pub mod catalog;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod sequence;

pub use catalog::{PromptCatalog, PromptFormat, PromptRecord, Section};
pub use errors::PromptError;
pub use render::RenderBlock;
pub use sequence::PromptSequence;
