//! Query operations on the reader host.

use starpoint_core::types::{InferSchemaRequest, InferSchemaResponse, QueryRequest, QueryResponse};
use starpoint_core::{ApiResult, INFER_SCHEMA_PATH, QUERY_PATH, TransportRequest, TransportService};

/// Tracing target for read operations.
pub const TRACING_TARGET: &str = "starpoint_client::reader";

/// Queries collections and infers their metadata schema.
#[derive(Debug, Clone)]
pub struct DocumentReader {
    transport: TransportService,
}

impl DocumentReader {
    /// Binds the reader to a transport.
    pub fn new(transport: TransportService) -> Self {
        Self { transport }
    }

    /// Runs a query with `POST /api/v1/query`.
    pub async fn query(&self, request: QueryRequest) -> ApiResult<QueryResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            collection = ?request.collection,
            has_sql = request.sql.is_some(),
            has_embedding = request.query_embedding.is_some(),
            "Querying collection"
        );

        match TransportRequest::post(QUERY_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }

    /// Infers the metadata schema with `POST /api/v1/infer_schema`.
    pub async fn infer_schema(
        &self,
        request: InferSchemaRequest,
    ) -> ApiResult<InferSchemaResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            collection = ?request.collection,
            "Inferring schema"
        );

        match TransportRequest::post(INFER_SCHEMA_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }
}
