//! OpenAI embeddings provider.

mod client;
mod config;
mod credentials;

pub use client::OpenAiClient;
pub use config::{OPENAI_API_URL, OpenAiBuilder, OpenAiBuilderError, OpenAiConfig};
pub use credentials::OpenAiCredentials;

/// Tracing target for OpenAI operations.
pub const TRACING_TARGET: &str = "starpoint_reqwest::openai";
