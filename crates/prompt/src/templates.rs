//! Built-in stage templates.
//!
//! Optional fields sit inside `{{#if}}` blocks so an absent value drops its
//! whole clause instead of rendering an empty slot.

use crate::types::Stage;

/// Prepended to every stage except `extract_tone` when a profile is known.
pub const PROFILE_PREAMBLE: &str = "Analyze this LinkedIn profile and emulate the user's tone, style, and typical phrasing:\n{{profile_summary}}\n\n";

pub const HEADLINE: &str =
    "Write 3 catchy LinkedIn headlines about '{{topic}}'{{#if tone}} with a '{{tone}}' tone{{/if}}.";

pub const BODY: &str = "Write a detailed LinkedIn post paragraph (3-6 sentences) based on this headline: '{{headline}}'. {{#if tone}}Tone: '{{tone}}'. {{/if}}Make it engaging and professional.{{#if audience}} Audience: {{audience}}.{{/if}}{{#if keywords}} Include these keywords: {{keywords}}.{{/if}}";

pub const HASHTAGS: &str =
    "Suggest 5 relevant hashtags (with #) for the LinkedIn post about: '{{headline}}'.";

pub const KEYWORDS: &str =
    "Suggest 5–10 keywords to improve LinkedIn post visibility about: '{{topic}}'.";

pub const ENGAGEMENT: &str = "Rate the predicted engagement (1-10) and give a 1-sentence rationale for this post. Post headline: {{headline}}\nPost body: {{keywords}}{{#if audience}}\nAudience: {{audience}}{{/if}}{{#if topic}}\nTopic: {{topic}}{{/if}}";

pub const REWRITE: &str = "Here is the current LinkedIn post body:\n{{headline}}\n\nRefine it{{#if mode}} (mode: {{mode}}){{/if}} according to this instruction: {{keywords}}\nReturn only the revised post body as a paragraph (3-6 sentences).";

pub const CTA: &str =
    "Suggest 3 concise call-to-action lines for a LinkedIn post about: '{{topic}}'.";

pub const EXTRACT_TONE: &str = "Read the LinkedIn profile below. Extract a short description of the user's tone, common phrases, and 3 example sentence openers they use. Return as JSON: {\"tone_summary\": \"...\", \"phrases\": [\"...\"], \"openers\": [\"...\"]}\n\n{{profile_summary}}";

/// `missing` is injected by the builder, not taken from the context.
pub const FOLLOWUP: &str = "{{#if missing}}Ask one concise clarifying question requesting the missing fields: {{missing}}.{{else}}Ask one concise clarifying question to better tailor the LinkedIn post.{{/if}}";

/// Default template for a stage.
pub fn default_template(stage: Stage) -> &'static str {
    match stage {
        Stage::Headline => HEADLINE,
        Stage::Body => BODY,
        Stage::Hashtags => HASHTAGS,
        Stage::Keywords => KEYWORDS,
        Stage::Engagement => ENGAGEMENT,
        Stage::Rewrite => REWRITE,
        Stage::Cta => CTA,
        Stage::ExtractTone => EXTRACT_TONE,
        Stage::Followup => FOLLOWUP,
    }
}
