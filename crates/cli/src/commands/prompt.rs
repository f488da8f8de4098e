//! Prompt command handler.
//!
//! Renders a stage prompt exactly as the generator would send it.

use clap::Args;
use postcraft_core::{config::AppConfig, AppResult};
use postcraft_prompt::{list_prompts, PromptBuilder, PromptContext, Stage};

/// Render a stage prompt without calling the model
#[derive(Args, Debug)]
pub struct PromptCommand {
    /// Stage name (headline, body, hashtags, keywords, engagement, rewrite, cta, extract_tone, followup)
    pub stage: String,

    #[arg(long)]
    pub topic: Option<String>,

    #[arg(long)]
    pub tone: Option<String>,

    #[arg(long)]
    pub audience: Option<String>,

    #[arg(long)]
    pub keywords: Option<String>,

    #[arg(long)]
    pub headline: Option<String>,

    /// Profile summary whose tone the prompt should emulate
    #[arg(long)]
    pub profile: Option<String>,

    /// Rewrite mode (e.g. clarity, shorten)
    #[arg(long)]
    pub mode: Option<String>,

    /// Ignore workspace template overrides
    #[arg(long)]
    pub builtin: bool,
}

impl PromptCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing prompt command");
        tracing::debug!("Prompt options: {:?}", self);

        let stage: Stage = self.stage.parse()?;

        let builder = if self.builtin {
            PromptBuilder::new()?
        } else {
            let overrides = list_prompts(&config.workspace)?;
            if !overrides.is_empty() {
                tracing::debug!("Template overrides present: {}", overrides.join(", "));
            }
            PromptBuilder::with_overrides(&config.workspace)?
        };

        println!("{}", builder.render(stage, &self.context())?);
        Ok(())
    }

    fn context(&self) -> PromptContext {
        PromptContext::new()
            .with_topic(self.topic.as_deref())
            .with_tone(self.tone.as_deref())
            .with_audience(self.audience.as_deref())
            .with_keywords(self.keywords.as_deref())
            .with_headline(self.headline.as_deref())
            .with_profile_summary(self.profile.as_deref())
            .with_mode(self.mode.as_deref())
    }
}
