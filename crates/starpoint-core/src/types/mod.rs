//! Request and response contracts of the Starpoint endpoints.

mod collection;
mod document;
mod embed;
mod query;
mod selector;

pub use collection::{
    CreateCollectionRequest, CreateCollectionResponse, DeleteCollectionRequest,
    DeleteCollectionResponse,
};
pub use document::{
    DeleteDocumentsRequest, DeleteResponse, Document, DocumentRef, DocumentUpdate,
    DocumentsResponse, InsertDocumentsRequest, InsertResponse, Metadata, UpdateDocumentsRequest,
    UpdateResponse,
};
pub use embed::{
    EmbedItem, EmbedItemsRequest, EmbedResponse, EmbedTextsRequest, EmbeddedItem, EmbeddingModel,
};
pub use query::{
    InferSchemaRequest, InferSchemaResponse, InferredSchema, QueryRequest, QueryResponse,
};
pub use selector::CollectionSelector;
