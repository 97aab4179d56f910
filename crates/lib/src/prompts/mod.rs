//! # Prompt Template Modules
//!
//! This module organizes the prompt templates and framing strings used when
//! talking to the model. The analyst persona and its markdown formatting
//! rules live in [`analyst`]; the paper-review wrapper lives in [`review`].

pub mod analyst;
pub mod review;

/// The literal placeholder token inside prompt templates that the caller
/// replaces with the user-supplied idea or paper text.
pub const IDEA_PLACEHOLDER: &str = "<idea>";
