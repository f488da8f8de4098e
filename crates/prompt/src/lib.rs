//! Prompt construction for Postcraft.
//!
//! Each generation step has a named [`Stage`] with a Handlebars template.
//! This crate provides:
//! - Built-in stage templates and the pure [`build_prompt`] entry point
//! - A [`PromptBuilder`] that can take per-workspace template overrides
//! - YAML loading of those overrides

pub mod builder;
pub mod loader;
pub mod templates;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, PromptBuilder};
pub use loader::{list_prompts, load_prompt};
pub use types::{PromptContext, PromptDefinition, Stage};
