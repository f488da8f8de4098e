//! The post under construction.

use serde::{Deserialize, Serialize};

/// Tone profile extracted from a LinkedIn "About" section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTone {
    pub tone_summary: String,

    #[serde(default)]
    pub phrases: Vec<String>,

    #[serde(default)]
    pub openers: Vec<String>,
}

impl ExtractedTone {
    /// Degraded result holding only the raw model text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            tone_summary: text.into(),
            ..Self::default()
        }
    }
}

/// In-progress, unsaved post.
///
/// Owned by exactly one [`crate::Session`]; nothing is persisted until saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub topic: Option<String>,
    pub tone: Option<String>,
    pub audience: Option<String>,

    /// Comma-separated keywords supplied by the user
    pub user_keywords: Option<String>,

    /// LinkedIn "About" text to emulate
    pub profile_summary: Option<String>,

    /// Selected headline
    pub headline: Option<String>,

    /// Headline candidates, in model order
    #[serde(default)]
    pub headlines: Vec<String>,

    pub body: Option<String>,

    /// Model-suggested keywords
    #[serde(default)]
    pub adaptive_keywords: Vec<String>,

    #[serde(default)]
    pub hashtags: Vec<String>,

    /// Call-to-action candidates
    #[serde(default)]
    pub ctas: Vec<String>,

    /// Selected call to action
    pub cta: Option<String>,

    /// `"<score> — <rationale>"`
    pub predicted_engagement: Option<String>,

    pub extracted_tone: Option<ExtractedTone>,
}

impl Draft {
    /// Draft seeded with a topic.
    pub fn with_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Self::default()
        }
    }

    pub fn topic_str(&self) -> &str {
        self.topic.as_deref().unwrap_or("")
    }
}

/// True when a field holds no visible text.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_tone_defaults_lists() {
        let tone: ExtractedTone =
            serde_json::from_str(r#"{"tone_summary": "warm and direct"}"#).unwrap();
        assert_eq!(tone.tone_summary, "warm and direct");
        assert!(tone.phrases.is_empty());
        assert!(tone.openers.is_empty());
    }

    #[test]
    fn test_blank_helpers() {
        assert!(is_blank(None));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("casual")));
        assert_eq!(non_blank("  peers "), Some("peers".to_string()));
        assert_eq!(non_blank("\n"), None);
    }

    #[test]
    fn test_draft_with_topic() {
        let draft = Draft::with_topic("AI in hiring");
        assert_eq!(draft.topic_str(), "AI in hiring");
        assert!(draft.headlines.is_empty());
    }
}
