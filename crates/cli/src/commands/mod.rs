//! Command handlers for the Postcraft CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod draft;
pub mod history;
pub mod prompt;
pub mod stats;

pub use draft::DraftCommand;
pub use history::HistoryCommand;
pub use prompt::PromptCommand;
pub use stats::StatsCommand;

use postcraft_agent::Generator;
use postcraft_core::config::{AppConfig, ProviderConfig};
use postcraft_core::{AppError, AppResult};
use postcraft_llm::create_client;
use postcraft_prompt::PromptBuilder;
use std::time::Duration;

/// Build a generator for the configured provider, with workspace prompt overrides.
pub(crate) fn build_generator(config: &AppConfig) -> AppResult<Generator> {
    config.validate()?;

    let provider_config = config.get_provider_config(&config.provider);
    let endpoint = config
        .endpoint
        .as_deref()
        .or_else(|| provider_config.as_ref().and_then(|pc| pc.endpoint()));
    let timeout = match &provider_config {
        Some(ProviderConfig::Ollama {
            timeout: Some(secs),
            ..
        }) => Some(Duration::from_secs(*secs)),
        _ => None,
    };
    let api_key = config.resolve_api_key(&config.provider);

    let client = create_client(&config.provider, endpoint, api_key.as_deref(), timeout)
        .map_err(AppError::Config)?;
    let prompts = PromptBuilder::with_overrides(&config.workspace)?;

    let generator = Generator::with_prompts(client, &config.model, prompts);
    tracing::debug!(
        provider = generator.provider_name(),
        model = generator.model(),
        "Created generator"
    );

    Ok(generator)
}

/// Pretty-print `value` as JSON on stdout.
pub(crate) fn print_json(value: &impl serde::Serialize) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
