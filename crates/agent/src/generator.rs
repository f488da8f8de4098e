//! Generation operations.
//!
//! Each operation renders one stage prompt, makes exactly one model call
//! and post-processes the text. Collaborator failures surface as
//! `AppError::GenerationFailed`; no operation retries.

use crate::cleanup::{candidates_or_raw, clean_keyword, dedup_case_insensitive, split_list};
use crate::draft::{Draft, ExtractedTone};
use crate::score::format_engagement;
use postcraft_core::{AppError, AppResult};
use postcraft_llm::{LlmClient, LlmRequest};
use postcraft_prompt::{PromptBuilder, PromptContext, Stage};
use std::sync::Arc;

/// Sampling settings for a stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl StageSettings {
    pub fn for_stage(stage: Stage) -> Self {
        let (temperature, max_tokens) = match stage {
            Stage::Headline => (0.8, 200),
            Stage::Body => (0.75, 500),
            Stage::Hashtags => (0.6, 100),
            Stage::Keywords => (0.6, 150),
            Stage::Engagement => (0.3, 80),
            Stage::Rewrite => (0.75, 400),
            Stage::Cta => (0.7, 150),
            Stage::ExtractTone => (0.2, 300),
            Stage::Followup => (0.5, 80),
        };
        Self {
            temperature,
            max_tokens,
        }
    }
}

pub const DEFAULT_HEADLINE_COUNT: usize = 3;
pub const DEFAULT_KEYWORD_COUNT: usize = 10;
const CTA_COUNT: usize = 3;
const HASHTAG_COUNT: usize = 5;

/// Generation façade over a completion client.
#[derive(Clone)]
pub struct Generator {
    client: Arc<dyn LlmClient>,
    model: String,
    prompts: Arc<PromptBuilder>,
}

impl Generator {
    /// Generator using the built-in templates.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> AppResult<Self> {
        Ok(Self::with_prompts(client, model, PromptBuilder::new()?))
    }

    /// Generator using a prepared prompt builder (e.g. with workspace overrides).
    pub fn with_prompts(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        prompts: PromptBuilder,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            prompts: Arc::new(prompts),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Render `stage`, call the model once, and return the trimmed text.
    async fn complete(&self, stage: Stage, context: &PromptContext) -> AppResult<String> {
        let prompt = self.prompts.render(stage, context)?;
        let settings = StageSettings::for_stage(stage);

        tracing::info!(stage = %stage, model = %self.model, "Generating");
        tracing::debug!(stage = %stage, "Prompt:\n{}", prompt);

        let request = LlmRequest::new(prompt, &self.model)
            .with_temperature(settings.temperature)
            .with_max_tokens(settings.max_tokens);

        let response = self.client.complete(&request).await.map_err(|e| {
            tracing::warn!(stage = %stage, "Generation failed: {}", e);
            AppError::generation(stage.as_str(), e)
        })?;

        tracing::debug!(
            stage = %stage,
            completion_tokens = response.usage.completion_tokens,
            "Response:\n{}",
            response.content
        );

        Ok(response.content.trim().to_string())
    }

    /// Up to `n` headline candidates, never empty for a non-empty response.
    pub async fn generate_headlines(
        &self,
        topic: &str,
        tone: Option<&str>,
        profile_summary: Option<&str>,
        n: usize,
    ) -> AppResult<Vec<String>> {
        let context = PromptContext::new()
            .with_topic(Some(topic))
            .with_tone(tone)
            .with_profile_summary(profile_summary);

        let text = self.complete(Stage::Headline, &context).await?;
        Ok(candidates_or_raw(&text, n))
    }

    /// Post body. User and adaptive keywords are merged into one list.
    pub async fn generate_body(
        &self,
        headline: &str,
        tone: Option<&str>,
        audience: Option<&str>,
        keywords: Option<&str>,
        adaptive_keywords: &[String],
        profile_summary: Option<&str>,
    ) -> AppResult<String> {
        let combined = merge_keywords(keywords, adaptive_keywords);
        let context = PromptContext::new()
            .with_headline(Some(headline))
            .with_tone(tone)
            .with_audience(audience)
            .with_keywords(combined)
            .with_profile_summary(profile_summary);

        self.complete(Stage::Body, &context).await
    }

    /// Up to three call-to-action lines.
    pub async fn generate_ctas(
        &self,
        topic: &str,
        profile_summary: Option<&str>,
    ) -> AppResult<Vec<String>> {
        let context = PromptContext::new()
            .with_topic(Some(topic))
            .with_profile_summary(profile_summary);

        let text = self.complete(Stage::Cta, &context).await?;
        Ok(candidates_or_raw(&text, CTA_COUNT))
    }

    /// Up to `n` distinct keywords (case-insensitive), first spelling kept.
    pub async fn generate_adaptive_keywords(
        &self,
        topic: &str,
        profile_summary: Option<&str>,
        n: usize,
    ) -> AppResult<Vec<String>> {
        let context = PromptContext::new()
            .with_topic(Some(topic))
            .with_profile_summary(profile_summary);

        let text = self.complete(Stage::Keywords, &context).await?;
        Ok(dedup_case_insensitive(split_list(&text), n))
    }

    /// Up to five `#`-prefixed hashtags.
    pub async fn generate_hashtags(
        &self,
        headline: &str,
        profile_summary: Option<&str>,
    ) -> AppResult<Vec<String>> {
        let context = PromptContext::new()
            .with_headline(Some(headline))
            .with_profile_summary(profile_summary);

        let text = self.complete(Stage::Hashtags, &context).await?;
        let tags = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(clean_keyword)
            .filter(|tag| !tag.is_empty())
            .map(|tag| format!("#{}", tag))
            .collect();

        Ok(dedup_case_insensitive(tags, HASHTAG_COUNT))
    }

    /// `"<score> — <full response>"`.
    pub async fn generate_engagement_score(
        &self,
        headline: &str,
        body: &str,
        audience: Option<&str>,
        profile_summary: Option<&str>,
    ) -> AppResult<String> {
        // The headline doubles as the topic line
        let context = PromptContext::new()
            .with_headline(Some(headline))
            .with_keywords(Some(body))
            .with_audience(audience)
            .with_topic(Some(headline))
            .with_profile_summary(profile_summary);

        let response = self.complete(Stage::Engagement, &context).await?;
        Ok(format_engagement(&response))
    }

    /// Revise `draft.body` according to `instruction`.
    ///
    /// To refine another field, pass a draft whose `body` holds that field's
    /// text and put the result back yourself.
    pub async fn refine_post(
        &self,
        instruction: &str,
        draft: &Draft,
        mode: Option<&str>,
    ) -> AppResult<String> {
        let text = draft
            .body
            .as_deref()
            .ok_or_else(|| AppError::Other("Draft has no body to refine".to_string()))?;

        self.refine_text(instruction, text, draft.profile_summary.as_deref(), mode)
            .await
    }

    /// Revise arbitrary text according to `instruction`.
    pub async fn refine_text(
        &self,
        instruction: &str,
        text: &str,
        profile_summary: Option<&str>,
        mode: Option<&str>,
    ) -> AppResult<String> {
        let context = PromptContext::new()
            .with_headline(Some(text))
            .with_keywords(Some(instruction))
            .with_mode(mode)
            .with_profile_summary(profile_summary);

        self.complete(Stage::Rewrite, &context).await
    }

    /// Tone profile of a LinkedIn "About" section.
    ///
    /// Unparseable output degrades to `tone_summary` = raw response.
    pub async fn extract_tone_from_profile(
        &self,
        profile_summary: &str,
    ) -> AppResult<ExtractedTone> {
        let context = PromptContext::new().with_profile_summary(Some(profile_summary));
        let response = self.complete(Stage::ExtractTone, &context).await?;

        Ok(parse_tone(&response).unwrap_or_else(|e| {
            tracing::debug!("Falling back to raw tone summary: {}", e);
            ExtractedTone::raw(response)
        }))
    }
}

/// Join user keywords and adaptive keywords with ", ".
fn merge_keywords(keywords: Option<&str>, adaptive_keywords: &[String]) -> Option<String> {
    let parts: Vec<&str> = keywords
        .map(str::trim)
        .into_iter()
        .chain(adaptive_keywords.iter().map(|k| k.trim()))
        .filter(|k| !k.is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Parse a tone object, tolerating a surrounding Markdown code fence.
fn parse_tone(response: &str) -> AppResult<ExtractedTone> {
    let trimmed = response.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(json.trim()).map_err(|e| AppError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedClient;

    fn generator(client: &ScriptedClient) -> Generator {
        Generator::new(Arc::new(client.clone()), "test-model").unwrap()
    }

    #[tokio::test]
    async fn test_generate_headlines_cleans_and_caps() {
        let client = ScriptedClient::with_responses([
            "1. Remote work is a skill\n2. \"Async beats meetings\"\n\n3. - Trust scales\n4. Extra",
        ]);

        let headlines = generator(&client)
            .generate_headlines("remote work", Some("bold"), None, 3)
            .await
            .unwrap();

        assert_eq!(
            headlines,
            vec!["Remote work is a skill", "Async beats meetings", "Trust scales"]
        );

        let request = &client.requests()[0];
        assert_eq!(request.temperature, Some(0.8));
        assert_eq!(request.max_tokens, Some(200));
        assert_eq!(request.model, "test-model");
        assert_eq!(
            request.prompt,
            "Write 3 catchy LinkedIn headlines about 'remote work' with a 'bold' tone."
        );
    }

    #[tokio::test]
    async fn test_generate_headlines_falls_back_to_raw() {
        let client = ScriptedClient::with_responses(["  -  "]);
        let headlines = generator(&client)
            .generate_headlines("x", None, None, 3)
            .await
            .unwrap();
        assert_eq!(headlines, vec!["-"]);
    }

    #[tokio::test]
    async fn test_generate_headlines_never_exceeds_n() {
        let client = ScriptedClient::with_responses(["a\nb\nc\nd\ne"]);
        let headlines = generator(&client)
            .generate_headlines("x", None, None, 2)
            .await
            .unwrap();
        assert_eq!(headlines.len(), 2);
    }

    #[tokio::test]
    async fn test_generate_body_merges_keywords() {
        let client = ScriptedClient::with_responses(["  The body.  "]);
        let adaptive = vec!["growth".to_string(), "teams".to_string()];

        let body = generator(&client)
            .generate_body("Ship small", Some("casual"), None, Some("AI"), &adaptive, None)
            .await
            .unwrap();

        assert_eq!(body, "The body.");
        assert!(client
            .last_prompt()
            .ends_with("Include these keywords: AI, growth, teams."));
    }

    #[tokio::test]
    async fn test_generate_body_adaptive_only() {
        let client = ScriptedClient::with_responses(["Body"]);
        let adaptive = vec!["growth".to_string()];

        generator(&client)
            .generate_body("H", None, None, None, &adaptive, None)
            .await
            .unwrap();

        assert!(client
            .last_prompt()
            .ends_with("Include these keywords: growth."));
    }

    #[tokio::test]
    async fn test_generate_ctas_capped_at_three() {
        let client = ScriptedClient::with_responses([
            "- Let's connect!\n- Share your take below.\n- Follow for more\n- DM me",
        ]);
        let ctas = generator(&client).generate_ctas("AI", None).await.unwrap();
        assert_eq!(
            ctas,
            vec!["Let's connect!", "Share your take below", "Follow for more"]
        );
    }

    #[tokio::test]
    async fn test_generate_adaptive_keywords_dedups() {
        let client = ScriptedClient::with_responses([
            "1. AI, machine learning\n2. ai\n3. #Leadership, leadership, MLOps.",
        ]);
        let keywords = generator(&client)
            .generate_adaptive_keywords("AI", None, 10)
            .await
            .unwrap();

        assert_eq!(keywords, vec!["AI", "machine learning", "Leadership", "MLOps"]);

        let lowered: std::collections::HashSet<String> =
            keywords.iter().map(|k| k.to_lowercase()).collect();
        assert_eq!(lowered.len(), keywords.len());
    }

    #[tokio::test]
    async fn test_generate_hashtags() {
        let client = ScriptedClient::with_responses([
            "#AI #Leadership, #ai\n#FutureOfWork #Hiring #Teams #Extra",
        ]);
        let tags = generator(&client)
            .generate_hashtags("AI at work", None)
            .await
            .unwrap();
        assert_eq!(
            tags,
            vec!["#AI", "#Leadership", "#FutureOfWork", "#Hiring", "#Teams"]
        );
    }

    #[tokio::test]
    async fn test_generate_engagement_score() {
        let client = ScriptedClient::with_responses(["Score: 8 — because it's actionable"]);
        let score = generator(&client)
            .generate_engagement_score("X", "Y", None, None)
            .await
            .unwrap();

        assert_eq!(score, "8 — Score: 8 — because it's actionable");

        let request = &client.requests()[0];
        assert_eq!(request.temperature, Some(0.3));
        assert!(request.prompt.contains("Post headline: X\nPost body: Y"));
        assert!(request.prompt.ends_with("Topic: X"));
    }

    #[tokio::test]
    async fn test_refine_post_uses_body_and_mode() {
        let client = ScriptedClient::with_responses(["Shorter body."]);
        let draft = Draft {
            body: Some("A long body.".to_string()),
            profile_summary: Some("Founder".to_string()),
            ..Draft::default()
        };

        let refined = generator(&client)
            .refine_post("make it shorter", &draft, Some("shorten"))
            .await
            .unwrap();

        assert_eq!(refined, "Shorter body.");
        let prompt = client.last_prompt();
        assert!(prompt.starts_with("Analyze this LinkedIn profile"));
        assert!(prompt.contains("A long body.\n\nRefine it (mode: shorten) according to this instruction: make it shorter"));
    }

    #[tokio::test]
    async fn test_refine_post_without_body() {
        let client = ScriptedClient::new();
        let result = generator(&client)
            .refine_post("x", &Draft::default(), None)
            .await;
        assert!(result.is_err());
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_extract_tone_parses_json() {
        let client = ScriptedClient::with_responses([
            "```json\n{\"tone_summary\": \"Warm, data-driven\", \"phrases\": [\"Here's the thing\"], \"openers\": [\"Last week\"]}\n```",
        ]);
        let tone = generator(&client)
            .extract_tone_from_profile("I lead analytics teams.")
            .await
            .unwrap();

        assert_eq!(tone.tone_summary, "Warm, data-driven");
        assert_eq!(tone.phrases, vec!["Here's the thing"]);
        assert_eq!(tone.openers, vec!["Last week"]);
        assert_eq!(client.requests()[0].temperature, Some(0.2));
    }

    #[tokio::test]
    async fn test_extract_tone_falls_back_to_raw() {
        let client = ScriptedClient::with_responses(["Friendly and concise."]);
        let tone = generator(&client)
            .extract_tone_from_profile("About me")
            .await
            .unwrap();
        assert_eq!(tone, ExtractedTone::raw("Friendly and concise."));
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_generation_failed() {
        let client = ScriptedClient::new();
        client.push_error("rate limited");

        match generator(&client).generate_ctas("AI", None).await {
            Err(AppError::GenerationFailed { stage, cause }) => {
                assert_eq!(stage, "cta");
                assert!(cause.contains("rate limited"));
            }
            other => panic!("Expected GenerationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_keywords() {
        assert_eq!(merge_keywords(None, &[]), None);
        assert_eq!(merge_keywords(Some("AI"), &[]), Some("AI".to_string()));
        assert_eq!(
            merge_keywords(Some(" "), &["growth".to_string()]),
            Some("growth".to_string())
        );
    }
}
