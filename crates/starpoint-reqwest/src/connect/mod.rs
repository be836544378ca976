//! Reqwest client module.
//!
//! Holds the shared HTTP client that carries the Starpoint API key, its
//! configuration and the host validation rules.

mod client;
mod config;
mod host;

pub use client::{ReqwestClient, TRACING_TARGET};
pub use config::{API_KEY_HEADER, DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use host::{EMBEDDING_URL, READER_URL, WRITER_URL, validate_host};
