//! Clarifying-question dispatcher.
//!
//! A stateless classifier over the current draft: the first unmet
//! condition, in fixed priority order, picks the question.

use crate::draft::{is_blank, Draft};

/// Topics shorter than this (in characters) prompt for more detail.
const MIN_TOPIC_CHARS: usize = 10;

/// What the next clarifying question should ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    Tone,
    Audience,
    Keywords,
    Angle,
    Refinement,
}

impl Followup {
    pub fn classify(draft: &Draft) -> Self {
        if is_blank(draft.tone.as_deref()) {
            return Followup::Tone;
        }
        if is_blank(draft.audience.as_deref()) {
            return Followup::Audience;
        }
        if is_blank(draft.user_keywords.as_deref()) {
            return Followup::Keywords;
        }
        match draft.topic.as_deref() {
            Some(topic) if !topic.is_empty() && topic.chars().count() < MIN_TOPIC_CHARS => {
                Followup::Angle
            }
            _ => Followup::Refinement,
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            Followup::Tone => {
                "Do you want this post to sound more professional, casual, or story-driven?"
            }
            Followup::Audience => {
                "Who are you hoping this post resonates with? (e.g., hiring managers, peers, founders)"
            }
            Followup::Keywords => {
                "Any keywords you'd like included? (e.g., AI, leadership, biotech, product thinking)"
            }
            Followup::Angle => {
                "Could you tell me a bit more about what angle you want to take on this topic?"
            }
            Followup::Refinement => {
                "Would you like this to be more concise, more narrative, or more punchy?"
            }
        }
    }
}

/// The next clarifying question for `draft`.
pub fn next_followup(draft: &Draft) -> &'static str {
    Followup::classify(draft).question()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(tone: Option<&str>, audience: Option<&str>, keywords: Option<&str>) -> Draft {
        Draft {
            tone: tone.map(str::to_string),
            audience: audience.map(str::to_string),
            user_keywords: keywords.map(str::to_string),
            ..Draft::default()
        }
    }

    #[test]
    fn test_empty_draft_asks_for_tone() {
        assert_eq!(next_followup(&Draft::default()), Followup::Tone.question());
    }

    #[test]
    fn test_tone_known_asks_for_audience() {
        let d = draft(Some("casual"), None, None);
        assert_eq!(Followup::classify(&d), Followup::Audience);
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let d = draft(Some("casual"), Some("   "), None);
        assert_eq!(Followup::classify(&d), Followup::Audience);
    }

    #[test]
    fn test_keywords_missing() {
        let d = draft(Some("casual"), Some("peers"), None);
        assert_eq!(Followup::classify(&d), Followup::Keywords);
    }

    #[test]
    fn test_short_topic_asks_for_angle() {
        let mut d = draft(Some("casual"), Some("peers"), Some("AI"));
        d.topic = Some("AI jobs".to_string());
        assert_eq!(Followup::classify(&d), Followup::Angle);
    }

    #[test]
    fn test_complete_draft_asks_for_direction() {
        let mut d = draft(Some("casual"), Some("peers"), Some("AI"));
        d.topic = Some("How AI changes junior hiring".to_string());
        assert_eq!(
            next_followup(&d),
            "Would you like this to be more concise, more narrative, or more punchy?"
        );

        // No topic at all also falls through to the generic question
        d.topic = None;
        assert_eq!(Followup::classify(&d), Followup::Refinement);
    }

    #[test]
    fn test_topic_length_counts_characters() {
        let mut d = draft(Some("casual"), Some("peers"), Some("AI"));
        // 10 characters, multi-byte
        d.topic = Some("éééééééééé".to_string());
        assert_eq!(Followup::classify(&d), Followup::Refinement);
    }
}
