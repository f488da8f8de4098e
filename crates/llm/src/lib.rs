//! Text-completion backends for Postcraft.
//!
//! Generation code talks to a single trait, [`LlmClient`]: one prompt in,
//! one text blob out. Providers translate that into their HTTP APIs.
//!
//! # Providers
//! - **OpenAI**: chat completions API (default)
//! - **Ollama**: local runtime
//!
//! # Example
//! ```no_run
//! use postcraft_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Write a LinkedIn headline about Rust", "llama3.2")
//!     .with_temperature(0.8)
//!     .with_max_tokens(200);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
pub use types::ProviderType;
