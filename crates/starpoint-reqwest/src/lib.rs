#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod connect;
mod error;
pub mod openai;
mod transport;

pub use crate::connect::{
    API_KEY_HEADER, DEFAULT_TIMEOUT_SECS, EMBEDDING_URL, READER_URL, ReqwestClient,
    ReqwestConfig, TRACING_TARGET, WRITER_URL, validate_host,
};
pub use crate::error::{Error, Result};
pub use crate::openai::{OpenAiBuilder, OpenAiClient, OpenAiConfig, OpenAiCredentials};
pub use crate::transport::HostTransport;
