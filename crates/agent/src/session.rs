//! Per-conversation drafting state.
//!
//! A [`Session`] owns the draft, the chat transcript and the intake step.
//! Every handler writes a draft field only after its generation call
//! succeeds, so a failed action leaves the previous value in place.

use crate::draft::{is_blank, non_blank, Draft};
use crate::followup::next_followup;
use crate::generator::{Generator, DEFAULT_HEADLINE_COUNT, DEFAULT_KEYWORD_COUNT};
use crate::history::{HistoryRecord, HistoryStore};
use postcraft_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const DEFAULT_HEADLINE_INSTRUCTION: &str = "Make headline more engaging";
const DEFAULT_BODY_INSTRUCTION: &str = "Make the post clearer and more engaging.";
const DEFAULT_CTA_INSTRUCTION: &str = "Make CTA concise and actionable.";
const DEFAULT_FULL_INSTRUCTION: &str =
    "Make the whole post more engaging and concise while preserving tone.";
const GRAMMAR_INSTRUCTION: &str = "Improve grammar and clarity while preserving tone.";
const GRAMMAR_MODE: &str = "clarity";

/// Stored when the engagement score could not be generated.
pub const ENGAGEMENT_UNAVAILABLE: &str = "n/a";

/// Intake step of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Topic,
    Tone,
    Audience,
    Keywords,
    Profile,
    Compose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub message: String,
}

/// Drafting session for one user.
pub struct Session {
    generator: Generator,
    draft: Draft,
    step: Step,
    transcript: Vec<ChatMessage>,
    selected_adaptive: Vec<String>,
}

fn instruction_or<'a>(instruction: Option<&'a str>, default: &'a str) -> &'a str {
    instruction.filter(|i| !i.trim().is_empty()).unwrap_or(default)
}

impl Session {
    pub fn new(generator: Generator) -> Self {
        Self {
            generator,
            draft: Draft::default(),
            step: Step::Topic,
            transcript: Vec::new(),
            selected_adaptive: Vec::new(),
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn selected_adaptive(&self) -> &[String] {
        &self.selected_adaptive
    }

    /// Discard everything and start over at the topic step.
    pub fn reset(&mut self) {
        tracing::info!("Resetting session");
        self.draft = Draft::default();
        self.step = Step::Topic;
        self.transcript.clear();
        self.selected_adaptive.clear();
    }

    fn say(&mut self, role: Role, message: impl Into<String>) {
        self.transcript.push(ChatMessage {
            role,
            message: message.into(),
        });
    }

    /// Record the user's answer and queue the dispatcher's next question.
    fn answer(&mut self, text: &str, placeholder: &str, next: Step) -> &'static str {
        let shown = if text.trim().is_empty() { placeholder } else { text };
        self.say(Role::User, shown.to_string());

        let question = next_followup(&self.draft);
        self.say(Role::Assistant, question);
        self.step = next;
        question
    }

    // ---- intake ----

    /// Set the topic; returns the next clarifying question.
    pub fn submit_topic(&mut self, topic: &str) -> AppResult<&'static str> {
        let topic = non_blank(topic)
            .ok_or_else(|| AppError::Other("Topic cannot be empty".to_string()))?;
        self.draft.topic = Some(topic.clone());
        Ok(self.answer(&topic, "", Step::Tone))
    }

    pub fn submit_tone(&mut self, tone: &str) -> &'static str {
        self.draft.tone = non_blank(tone);
        self.answer(tone, "[no tone]", Step::Audience)
    }

    pub fn submit_audience(&mut self, audience: &str) -> &'static str {
        self.draft.audience = non_blank(audience);
        self.answer(audience, "[no audience]", Step::Keywords)
    }

    /// Keywords are the last question-driven field; no follow-up is queued.
    pub fn submit_keywords(&mut self, keywords: &str) {
        self.draft.user_keywords = non_blank(keywords);
        let shown = if keywords.trim().is_empty() {
            "[no keywords]"
        } else {
            keywords
        };
        self.say(Role::User, shown.to_string());
        self.step = Step::Profile;
    }

    /// Store the profile text and learn its tone.
    ///
    /// Without a user-given tone, the extracted summary becomes the tone.
    /// Tone extraction failures are logged and otherwise ignored.
    pub async fn submit_profile(&mut self, profile: &str) {
        self.draft.profile_summary = non_blank(profile);
        self.step = Step::Compose;

        let Some(profile) = self.draft.profile_summary.clone() else {
            return;
        };

        match self.generator.extract_tone_from_profile(&profile).await {
            Ok(tone) => {
                if is_blank(self.draft.tone.as_deref()) {
                    self.draft.tone = non_blank(&tone.tone_summary);
                }
                self.draft.extracted_tone = Some(tone);
            }
            Err(e) => tracing::warn!("Tone extraction failed, continuing without it: {}", e),
        }
    }

    // ---- composition ----

    /// Generate every part of the post that is still missing.
    ///
    /// Order: headlines, body, adaptive keywords, hashtags, CTAs, engagement.
    /// Keyword and hashtag failures leave those lists empty; an engagement
    /// failure stores "n/a"; any other failure stops here and is returned.
    pub async fn compose(&mut self) -> AppResult<()> {
        tracing::info!("Composing post for topic '{}'", self.draft.topic_str());

        if self.draft.headlines.is_empty() {
            self.regenerate_headlines().await?;
        } else if self.draft.headline.is_none() {
            self.draft.headline = self.draft.headlines.first().cloned();
        }

        if self.draft.body.is_none() {
            self.regenerate_body().await?;
        }

        if self.draft.adaptive_keywords.is_empty() {
            let keywords = self
                .generator
                .generate_adaptive_keywords(
                    self.draft.topic_str(),
                    self.draft.profile_summary.as_deref(),
                    DEFAULT_KEYWORD_COUNT,
                )
                .await;
            match keywords {
                Ok(keywords) => self.draft.adaptive_keywords = keywords,
                Err(e) => tracing::warn!("Adaptive keywords unavailable: {}", e),
            }
        }

        if self.draft.hashtags.is_empty() {
            let headline = self.draft.headline.clone().unwrap_or_default();
            let tags = self
                .generator
                .generate_hashtags(&headline, self.draft.profile_summary.as_deref())
                .await;
            match tags {
                Ok(tags) => self.draft.hashtags = tags,
                Err(e) => tracing::warn!("Hashtags unavailable: {}", e),
            }
        }

        if self.draft.ctas.is_empty() {
            self.regenerate_ctas().await?;
        }

        if self.draft.predicted_engagement.is_none() {
            if let Err(e) = self.rescore().await {
                tracing::warn!("Engagement score unavailable: {}", e);
                self.draft.predicted_engagement = Some(ENGAGEMENT_UNAVAILABLE.to_string());
            }
        }

        Ok(())
    }

    /// Replace the headline candidates and select the first.
    pub async fn regenerate_headlines(&mut self) -> AppResult<()> {
        let headlines = self
            .generator
            .generate_headlines(
                self.draft.topic_str(),
                self.draft.tone.as_deref(),
                self.draft.profile_summary.as_deref(),
                DEFAULT_HEADLINE_COUNT,
            )
            .await?;

        self.draft.headline = headlines.first().cloned();
        self.draft.headlines = headlines;
        Ok(())
    }

    /// Regenerate the body with the current adaptive keyword selection.
    pub async fn regenerate_body(&mut self) -> AppResult<()> {
        let body = self
            .generator
            .generate_body(
                self.draft.headline.as_deref().unwrap_or(""),
                self.draft.tone.as_deref(),
                self.draft.audience.as_deref(),
                self.draft.user_keywords.as_deref(),
                &self.selected_adaptive,
                self.draft.profile_summary.as_deref(),
            )
            .await?;

        self.draft.body = Some(body);
        Ok(())
    }

    /// Replace the CTA candidates and select the first.
    pub async fn regenerate_ctas(&mut self) -> AppResult<()> {
        let ctas = self
            .generator
            .generate_ctas(
                self.draft.topic_str(),
                self.draft.profile_summary.as_deref(),
            )
            .await?;

        self.draft.cta = ctas.first().cloned();
        self.draft.ctas = ctas;
        Ok(())
    }

    /// Recompute the engagement prediction for the current headline and body.
    pub async fn rescore(&mut self) -> AppResult<()> {
        let score = self
            .generator
            .generate_engagement_score(
                self.draft.headline.as_deref().unwrap_or(""),
                self.draft.body.as_deref().unwrap_or(""),
                self.draft.audience.as_deref(),
                self.draft.profile_summary.as_deref(),
            )
            .await?;

        self.draft.predicted_engagement = Some(score);
        Ok(())
    }

    // ---- refinement ----

    async fn refine_field(
        &self,
        field: &str,
        current: Option<&str>,
        instruction: &str,
        mode: Option<&str>,
    ) -> AppResult<String> {
        let text = current
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::Other(format!("No {} to refine. Generate one first.", field))
            })?;

        self.generator
            .refine_text(instruction, text, self.draft.profile_summary.as_deref(), mode)
            .await
    }

    pub async fn refine_headline(
        &mut self,
        instruction: Option<&str>,
        mode: Option<&str>,
    ) -> AppResult<()> {
        let instruction = instruction_or(instruction, DEFAULT_HEADLINE_INSTRUCTION);
        let refined = self
            .refine_field("headline", self.draft.headline.as_deref(), instruction, mode)
            .await?;
        self.draft.headline = Some(refined);
        Ok(())
    }

    pub async fn refine_body(
        &mut self,
        instruction: Option<&str>,
        mode: Option<&str>,
    ) -> AppResult<()> {
        let instruction = instruction_or(instruction, DEFAULT_BODY_INSTRUCTION);
        let refined = self
            .refine_field("body", self.draft.body.as_deref(), instruction, mode)
            .await?;
        self.draft.body = Some(refined);
        Ok(())
    }

    pub async fn refine_cta(
        &mut self,
        instruction: Option<&str>,
        mode: Option<&str>,
    ) -> AppResult<()> {
        let instruction = instruction_or(instruction, DEFAULT_CTA_INSTRUCTION);
        let refined = self
            .refine_field("CTA", self.draft.cta.as_deref(), instruction, mode)
            .await?;
        self.draft.cta = Some(refined);
        Ok(())
    }

    /// Apply one instruction to headline, body and CTA.
    ///
    /// Headline and CTA failures keep the old text; a body failure is returned.
    pub async fn refine_all(&mut self, instruction: Option<&str>) -> AppResult<()> {
        let instruction = instruction_or(instruction, DEFAULT_FULL_INSTRUCTION).to_string();

        if self.draft.headline.is_some() {
            if let Err(e) = self.refine_headline(Some(&instruction), None).await {
                tracing::warn!("Keeping headline: {}", e);
            }
        }

        if self.draft.body.is_some() {
            self.refine_body(Some(&instruction), None).await?;
        }

        if self.draft.cta.is_some() {
            if let Err(e) = self.refine_cta(Some(&instruction), None).await {
                tracing::warn!("Keeping CTA: {}", e);
            }
        }

        Ok(())
    }

    /// Grammar and clarity pass over the body.
    pub async fn improve_grammar(&mut self) -> AppResult<()> {
        self.refine_body(Some(GRAMMAR_INSTRUCTION), Some(GRAMMAR_MODE))
            .await
    }

    // ---- selection and editing ----

    pub fn select_headline(&mut self, index: usize) -> AppResult<()> {
        let headline = self
            .draft
            .headlines
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Other(format!("No headline #{}", index + 1)))?;
        self.draft.headline = Some(headline);
        Ok(())
    }

    pub fn select_cta(&mut self, index: usize) -> AppResult<()> {
        let cta = self
            .draft
            .ctas
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Other(format!("No CTA #{}", index + 1)))?;
        self.draft.cta = Some(cta);
        Ok(())
    }

    /// Choose which adaptive keywords the body should use.
    ///
    /// A non-empty selection regenerates the body with it.
    pub async fn set_adaptive_selection(&mut self, keywords: Vec<String>) -> AppResult<()> {
        self.selected_adaptive = keywords;
        if self.selected_adaptive.is_empty() {
            return Ok(());
        }
        self.regenerate_body().await
    }

    /// Replace the body with user-edited text.
    pub fn edit_body(&mut self, body: &str) {
        self.draft.body = Some(body.to_string());
    }

    /// Copy-ready post: headline, body and, when present, the CTA.
    pub fn final_text(&self) -> String {
        let mut text = format!(
            "{}\n\n{}",
            self.draft.headline.as_deref().unwrap_or(""),
            self.draft.body.as_deref().unwrap_or("")
        );
        if let Some(cta) = self.draft.cta.as_deref().filter(|c| !c.is_empty()) {
            text.push_str("\n\n");
            text.push_str(cta);
        }
        text
    }

    /// Append the current draft to history.
    pub fn save(&self, store: &HistoryStore) -> AppResult<HistoryRecord> {
        store.append_record(&self.draft)
    }
}
