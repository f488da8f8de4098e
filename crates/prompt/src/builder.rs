//! Prompt builder: renders stage templates with contextual fields.

use crate::loader::{list_prompts, load_prompt};
use crate::templates::{default_template, PROFILE_PREAMBLE};
use crate::types::{PromptContext, Stage};
use handlebars::Handlebars;
use postcraft_core::{AppError, AppResult};
use std::path::Path;

const PREAMBLE_TEMPLATE: &str = "profile_preamble";

/// Handlebars registry holding one template per stage.
///
/// Rendering is pure: the same stage and context always produce the same text.
pub struct PromptBuilder {
    handlebars: Handlebars<'static>,
}

impl PromptBuilder {
    /// Builder with the built-in templates.
    pub fn new() -> AppResult<Self> {
        let mut handlebars = Handlebars::new();

        // Prompts are plain text
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string(PREAMBLE_TEMPLATE, PROFILE_PREAMBLE)
            .map_err(|e| AppError::Prompt(format!("Failed to register preamble: {}", e)))?;

        let mut builder = Self { handlebars };
        for stage in Stage::ALL {
            builder.register(stage, default_template(stage))?;
        }

        Ok(builder)
    }

    /// Builder with the built-in templates, replaced by any overrides found
    /// under `<workspace>/.postcraft/prompts/`.
    pub fn with_overrides(workspace: &Path) -> AppResult<Self> {
        let mut builder = Self::new()?;

        for id in list_prompts(workspace)? {
            let definition = load_prompt(workspace, &id)?;
            let stage: Stage = definition.stage.parse()?;
            builder.register(stage, &definition.template)?;
            tracing::info!("Using template override for stage '{}' from {}.yml", stage, id);
        }

        Ok(builder)
    }

    /// Replace the template for `stage`.
    pub fn register(&mut self, stage: Stage, template: &str) -> AppResult<()> {
        self.handlebars
            .register_template_string(stage.as_str(), template)
            .map_err(|e| {
                AppError::Prompt(format!(
                    "Failed to register template for stage '{}': {}",
                    stage, e
                ))
            })
    }

    /// Render the prompt for `stage`.
    pub fn render(&self, stage: Stage, context: &PromptContext) -> AppResult<String> {
        let mut data = serde_json::to_value(context)?;

        if stage == Stage::Followup {
            let missing = context.missing_fields();
            if let (Some(map), false) = (data.as_object_mut(), missing.is_empty()) {
                map.insert("missing".to_string(), missing.join(", ").into());
            }
        }

        let body = self.handlebars.render(stage.as_str(), &data).map_err(|e| {
            AppError::Prompt(format!("Failed to render stage '{}': {}", stage, e))
        })?;

        if stage.emulates_profile() && context.profile_summary.is_some() {
            let preamble = self
                .handlebars
                .render(PREAMBLE_TEMPLATE, &data)
                .map_err(|e| AppError::Prompt(format!("Failed to render preamble: {}", e)))?;
            return Ok(preamble + &body);
        }

        Ok(body)
    }
}

/// Render the built-in template for a stage given by name.
///
/// # Errors
/// `AppError::InvalidStage` when `stage` names no known stage.
///
/// # Example
/// ```
/// use postcraft_prompt::{build_prompt, PromptContext};
///
/// let ctx = PromptContext::new().with_topic(Some("Rust")).with_tone(Some("casual"));
/// let prompt = build_prompt("headline", &ctx).unwrap();
/// assert_eq!(prompt, "Write 3 catchy LinkedIn headlines about 'Rust' with a 'casual' tone.");
/// ```
pub fn build_prompt(stage: &str, context: &PromptContext) -> AppResult<String> {
    let stage: Stage = stage.parse()?;
    tracing::trace!("Building prompt for stage '{}'", stage);
    PromptBuilder::new()?.render(stage, context)
}
