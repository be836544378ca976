//! Commonly used items from starpoint-client.

pub use starpoint_core::openai::{
    BuildAndInsertEmbeddingsFromOpenAiRequest, BuildAndInsertEmbeddingsFromOpenAiResponse,
    BuildAndInsertEmbeddingsRequest, EmbeddingInput, InitOpenAiRequest, InitOpenAiResponse,
};
pub use starpoint_core::types::*;
pub use starpoint_core::{ApiResult, Error, ErrorKind, ErrorResponse, Result};

pub use crate::{Client, ClientConfig, ClientHealth};
