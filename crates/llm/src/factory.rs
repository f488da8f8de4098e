//! Provider factory.
//!
//! Builds an [`LlmClient`] from the provider name, endpoint and secret
//! resolved by the application configuration.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;

/// Create a completion client for `provider`.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "ollama")
/// * `endpoint` - Optional base URL; the provider default otherwise
/// * `api_key` - API key, required by openai
/// * `timeout` - Optional per-request timeout (ollama)
///
/// # Errors
/// Returns a message if the provider is unknown, a required secret is
/// missing, or the HTTP client cannot be built.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;
    let base_url = endpoint.unwrap_or(provider_type.default_endpoint());

    match provider_type {
        ProviderType::OpenAI => {
            let key = api_key.ok_or_else(|| "OpenAI provider requires API key".to_string())?;
            Ok(Arc::new(OpenAiClient::with_base_url(base_url, key)))
        }
        ProviderType::Ollama => match timeout {
            Some(timeout) => OllamaClient::with_timeout(base_url, timeout)
                .map(|client| Arc::new(client) as Arc<dyn LlmClient>)
                .map_err(|e| e.to_string()),
            None => Ok(Arc::new(OllamaClient::with_base_url(base_url))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", None, None, None).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_ollama_with_timeout() {
        let client = create_client(
            "ollama",
            Some("http://localhost:8080"),
            None,
            Some(Duration::from_secs(5)),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_openai_client() {
        let client = create_client("OpenAI", None, Some("sk-test"), None).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client("openai", None, None, None) {
            Err(err) => assert!(err.contains("OpenAI provider requires API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, None, None) {
            Err(err) => assert!(err.contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
