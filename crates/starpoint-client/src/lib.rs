#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod collection;
mod config;
mod embedding;
mod openai;
mod reader;
mod writer;

#[doc(hidden)]
pub mod prelude;

pub use crate::client::{Client, ClientHealth, OPENAI_NOT_INITIALIZED_ERROR};
pub use crate::collection::CollectionWriter;
pub use crate::config::ClientConfig;
pub use crate::embedding::EmbeddingClient;
pub use crate::openai::EmbeddingPipeline;
pub use crate::reader::DocumentReader;
pub use crate::writer::DocumentWriter;
