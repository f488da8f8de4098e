//! Error types for Postcraft.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! model provider, prompt and generation failures.

use thiserror::Error;

/// Unified error type for Postcraft.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport or provider errors from the text-completion backend
    #[error("LLM error: {0}")]
    Llm(String),

    /// Template registration and rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Unknown prompt stage. Always a programming error.
    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    /// A generation call failed; the draft field it targeted is untouched.
    #[error("Generation failed at stage '{stage}': {cause}")]
    GenerationFailed { stage: String, cause: String },

    /// Model output could not be parsed into the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Wrap an error raised while generating `stage`.
    pub fn generation(stage: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        AppError::GenerationFailed {
            stage: stage.into(),
            cause: cause.to_string(),
        }
    }

    /// Whether the user can simply trigger the same action again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::GenerationFailed { .. } | AppError::Llm(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failed_display() {
        let err = AppError::generation("headline", "rate limited");
        assert_eq!(
            err.to_string(),
            "Generation failed at stage 'headline': rate limited"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_invalid_stage_not_retryable() {
        let err = AppError::InvalidStage("poem".to_string());
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Invalid stage: poem");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
