//! Saved-post history and analytics.
//!
//! History is one JSON array document, read whole and rewritten whole on
//! every append. A missing, unreadable or corrupt document reads as an
//! empty history, but is never overwritten by an append. There is a single
//! writer; no locking is done.

use crate::draft::{is_blank, Draft, ExtractedTone};
use crate::score::parse_score;
use chrono::{Local, SecondsFormat};
use postcraft_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Tone key used for records without a tone.
pub const UNSPECIFIED_TONE: &str = "unspecified";

/// Immutable snapshot of a saved draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub topic: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub tone: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub headline: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub body: Option<String>,

    #[serde(deserialize_with = "lenient::list")]
    pub hashtags: Vec<String>,

    /// Older files store a list here; it is read back comma-joined
    #[serde(deserialize_with = "lenient::text")]
    pub user_keywords: Option<String>,

    #[serde(deserialize_with = "lenient::list")]
    pub adaptive_keywords: Vec<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub cta: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub predicted_engagement: Option<String>,

    #[serde(deserialize_with = "lenient::tone")]
    pub extracted_tone: Option<ExtractedTone>,

    /// ISO-8601 local time of the save
    #[serde(deserialize_with = "lenient::timestamp")]
    pub timestamp: String,
}

/// Field decoders that accept every shape older history files used.
mod lenient {
    use crate::draft::ExtractedTone;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// A string, a number, or a list joined with ", ". An empty list is `None`.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().filter_map(scalar).collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            other => scalar(&other),
        })
    }

    /// A list of scalars, or a single non-blank string.
    pub fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.iter().filter_map(scalar).collect(),
            Value::String(s) if !s.trim().is_empty() => vec![s],
            _ => Vec::new(),
        })
    }

    /// A tone object, or plain text kept as the summary.
    pub fn tone<'de, D>(deserializer: D) -> Result<Option<ExtractedTone>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(ExtractedTone::raw(s)),
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar(&Value::deserialize(deserializer)?).unwrap_or_default())
    }
}

impl HistoryRecord {
    /// Copy the recorded fields out of `draft`.
    pub fn from_draft(draft: &Draft, timestamp: impl Into<String>) -> Self {
        Self {
            topic: draft.topic.clone(),
            tone: draft.tone.clone(),
            headline: draft.headline.clone(),
            body: draft.body.clone(),
            hashtags: draft.hashtags.clone(),
            user_keywords: draft.user_keywords.clone(),
            adaptive_keywords: draft.adaptive_keywords.clone(),
            cta: draft.cta.clone(),
            predicted_engagement: draft.predicted_engagement.clone(),
            extracted_tone: draft.extracted_tone.clone(),
            timestamp: timestamp.into(),
        }
    }
}

/// Aggregates derived from the full history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_posts: usize,

    /// Mean of parseable engagement scores; 0.0 when none parse
    pub average_engagement: f64,

    pub tone_distribution: BTreeMap<String, usize>,
}

impl Analytics {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let scores: Vec<f64> = records
            .iter()
            .filter_map(|r| r.predicted_engagement.as_deref().and_then(parse_score))
            .collect();

        let average_engagement = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        let mut tone_distribution = BTreeMap::new();
        for record in records {
            let tone = match record.tone.as_deref() {
                Some(tone) if !is_blank(Some(tone)) => tone.to_string(),
                _ => UNSPECIFIED_TONE.to_string(),
            };
            *tone_distribution.entry(tone).or_insert(0) += 1;
        }

        Self {
            total_posts: records.len(),
            average_engagement,
            tone_distribution,
        }
    }
}

/// Append-only history document on disk.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record in save order; empty on any read or parse failure.
    pub fn load_all(&self) -> Vec<HistoryRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Ignoring unreadable history {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> AppResult<Vec<HistoryRecord>> {
        if !self.path.exists() {
            tracing::debug!("No history at {:?}", self.path);
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Snapshot `draft`, stamp it with the current time, and persist.
    ///
    /// Fails without writing when the existing document cannot be read.
    pub fn append_record(&self, draft: &Draft) -> AppResult<HistoryRecord> {
        let mut records = self.try_load().map_err(|e| {
            AppError::Parse(format!(
                "Not saving: existing history {:?} is unreadable ({}). Fix or move it first.",
                self.path, e
            ))
        })?;

        let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Micros, false);
        let record = HistoryRecord::from_draft(draft, timestamp);

        records.push(record.clone());
        self.write_all(&records)?;

        tracing::info!(
            "Saved post to history ({} total) at {:?}",
            records.len(),
            self.path
        );
        Ok(record)
    }

    /// Rewrite the whole document through a sibling temp file.
    fn write_all(&self, records: &[HistoryRecord]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Other(format!("Failed to create history directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Analytics recomputed from the full history.
    pub fn compute_analytics(&self) -> Analytics {
        Analytics::from_records(&self.load_all())
    }
}
