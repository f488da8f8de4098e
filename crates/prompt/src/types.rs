//! Prompt types for Postcraft.

use postcraft_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named prompt template variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Headline,
    Body,
    Hashtags,
    Keywords,
    Engagement,
    Rewrite,
    Cta,
    ExtractTone,
    Followup,
}

impl Stage {
    /// Every stage, in template registration order.
    pub const ALL: [Stage; 9] = [
        Stage::Headline,
        Stage::Body,
        Stage::Hashtags,
        Stage::Keywords,
        Stage::Engagement,
        Stage::Rewrite,
        Stage::Cta,
        Stage::ExtractTone,
        Stage::Followup,
    ];

    /// Canonical stage name, also used as the template and override file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Headline => "headline",
            Stage::Body => "body",
            Stage::Hashtags => "hashtags",
            Stage::Keywords => "keywords",
            Stage::Engagement => "engagement",
            Stage::Rewrite => "rewrite",
            Stage::Cta => "cta",
            Stage::ExtractTone => "extract_tone",
            Stage::Followup => "followup",
        }
    }

    /// Whether the profile-emulation preamble applies to this stage.
    ///
    /// Tone extraction reads the profile itself, so it never gets the preamble.
    pub fn emulates_profile(&self) -> bool {
        !matches!(self, Stage::ExtractTone)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| AppError::InvalidStage(s.to_string()))
    }
}

/// Contextual fields a stage template may reference.
///
/// Several stages reuse slots for other content: `engagement` passes the
/// post body as `keywords`, and `rewrite` passes the text under revision as
/// `headline` and the edit instruction as `keywords`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_summary: Option<String>,

    /// Free-text rewrite preset (e.g. "shorten", "punchier")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Keep `Some` only for values with visible content.
fn present(value: Option<impl Into<String>>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.trim().is_empty())
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, topic: Option<impl Into<String>>) -> Self {
        self.topic = present(topic);
        self
    }

    pub fn with_tone(mut self, tone: Option<impl Into<String>>) -> Self {
        self.tone = present(tone);
        self
    }

    pub fn with_audience(mut self, audience: Option<impl Into<String>>) -> Self {
        self.audience = present(audience);
        self
    }

    pub fn with_keywords(mut self, keywords: Option<impl Into<String>>) -> Self {
        self.keywords = present(keywords);
        self
    }

    pub fn with_headline(mut self, headline: Option<impl Into<String>>) -> Self {
        self.headline = present(headline);
        self
    }

    pub fn with_profile_summary(mut self, profile_summary: Option<impl Into<String>>) -> Self {
        self.profile_summary = present(profile_summary);
        self
    }

    pub fn with_mode(mut self, mode: Option<impl Into<String>>) -> Self {
        self.mode = present(mode);
        self
    }

    /// Follow-up fields still missing, in asking order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tone.is_none() {
            missing.push("tone");
        }
        if self.audience.is_none() {
            missing.push("audience");
        }
        if self.keywords.is_none() {
            missing.push("keywords");
        }
        missing
    }
}

/// A stage template override loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Stage this template replaces
    pub stage: String,

    /// Human-readable title
    #[serde(default)]
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Template string with Handlebars syntax
    pub template: String,
}
