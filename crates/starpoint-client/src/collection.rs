//! Collection lifecycle operations.

use starpoint_core::types::{
    CreateCollectionRequest, CreateCollectionResponse, DeleteCollectionRequest,
    DeleteCollectionResponse,
};
use starpoint_core::{ApiResult, COLLECTIONS_PATH, TransportRequest, TransportService};

/// Tracing target for collection operations.
pub const TRACING_TARGET: &str = "starpoint_client::collection";

/// Creates and deletes collections on the writer host.
///
/// Requests are validated before anything is sent; an invalid request yields
/// an error envelope without a network call.
#[derive(Debug, Clone)]
pub struct CollectionWriter {
    transport: TransportService,
}

impl CollectionWriter {
    /// Binds the writer to a transport.
    pub fn new(transport: TransportService) -> Self {
        Self { transport }
    }

    /// Creates a collection with `POST /api/v1/collections`.
    pub async fn create_collection(
        &self,
        request: CreateCollectionRequest,
    ) -> ApiResult<CreateCollectionResponse> {
        if let Err(err) = request.validate() {
            tracing::warn!(
                target: TRACING_TARGET,
                name = %request.name,
                error = %err,
                "Rejected create collection request"
            );
            return ApiResult::from_error(err);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            name = %request.name,
            dimensionality = request.dimensionality,
            "Creating collection"
        );

        match TransportRequest::post(COLLECTIONS_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }

    /// Deletes a collection with `DELETE /api/v1/collections`.
    ///
    /// The collection id travels in the JSON body.
    pub async fn delete_collection(
        &self,
        request: DeleteCollectionRequest,
    ) -> ApiResult<DeleteCollectionResponse> {
        if let Err(err) = request.validate() {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                "Rejected delete collection request"
            );
            return ApiResult::from_error(err);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            collection_id = %request.collection_id,
            "Deleting collection"
        );

        match TransportRequest::delete(COLLECTIONS_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }
}
