#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod envelope;
mod error;
mod health;

pub mod openai;
pub mod transport;
pub mod types;
pub mod validation;

#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use envelope::{ApiResult, ErrorResponse};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use health::{HEALTH_CHECK_MESSAGE, ServiceHealth, ServiceStatus};
pub use transport::{Method, Transport, TransportError, TransportRequest, TransportService};
pub use validation::ValidationError;

/// Path of the collections resource.
pub const COLLECTIONS_PATH: &str = "/api/v1/collections";

/// Path of the documents resource.
pub const DOCUMENTS_PATH: &str = "/api/v1/documents";

/// Path of the query endpoint.
pub const QUERY_PATH: &str = "/api/v1/query";

/// Path of the schema inference endpoint.
pub const INFER_SCHEMA_PATH: &str = "/api/v1/infer_schema";

/// Path of the embedding endpoint.
pub const EMBED_PATH: &str = "/api/v1/embed";
