//! Combined Starpoint client.

use serde::{Deserialize, Serialize};
use starpoint_core::openai::{
    BuildAndInsertEmbeddingsFromOpenAiRequest, BuildAndInsertEmbeddingsFromOpenAiResponse,
    BuildAndInsertEmbeddingsRequest, EmbeddingService, InitOpenAiRequest, InitOpenAiResponse,
};
use starpoint_core::types::{
    CollectionSelector, CreateCollectionRequest, CreateCollectionResponse,
    DeleteCollectionRequest, DeleteCollectionResponse, DeleteDocumentsRequest, DeleteResponse,
    EmbedItem, EmbedResponse, EmbeddingModel, InferSchemaRequest, InferSchemaResponse,
    InsertDocumentsRequest, InsertResponse, Metadata, QueryRequest, QueryResponse,
    UpdateDocumentsRequest, UpdateResponse,
};
use starpoint_core::{ApiResult, Error, Result, ServiceHealth, TransportService};
use starpoint_reqwest::{OpenAiClient, OpenAiConfig, ReqwestClient};

use crate::collection::CollectionWriter;
use crate::config::ClientConfig;
use crate::embedding::EmbeddingClient;
use crate::openai::EmbeddingPipeline;
use crate::reader::DocumentReader;
use crate::writer::DocumentWriter;

/// Tracing target for client lifecycle events.
pub const TRACING_TARGET: &str = "starpoint_client::client";

/// Message returned when OpenAI is used before [`Client::init_openai`].
pub const OPENAI_NOT_INITIALIZED_ERROR: &str =
    "OpenAI has not been initialized. Call init_openai with an API key first.";

/// Health of every host the client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientHealth {
    /// Reader host.
    pub reader: ServiceHealth,
    /// Writer host.
    pub writer: ServiceHealth,
    /// Embedding host.
    pub embedding: ServiceHealth,
}

impl ClientHealth {
    /// Returns `true` if no host is unhealthy.
    pub fn is_available(&self) -> bool {
        self.reader.is_available() && self.writer.is_available() && self.embedding.is_available()
    }
}

/// Entry point bundling every Starpoint operation.
///
/// Collection and document writes go to the writer host, queries to the
/// reader host and hosted embeddings to the embedding host. OpenAI support is
/// optional and enabled with [`init_openai`](Self::init_openai).
///
/// # Examples
///
/// ```rust,ignore
/// use starpoint_client::prelude::*;
///
/// let client = Client::connect(ClientConfig::new(api_key)).await?;
/// let created = client
///     .create_collection(CreateCollectionRequest::new("docs", 1536))
///     .await;
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    collections: CollectionWriter,
    writer: DocumentWriter,
    reader: DocumentReader,
    embedding: EmbeddingClient,
    transports: [TransportService; 3],
    openai_config: OpenAiConfig,
    openai: Option<EmbeddingPipeline>,
}

impl Client {
    /// Creates a client without contacting any host.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = ReqwestClient::new(config.api_key, config.http.clone())?;
        let writer = http.bind(&config.writer_host)?.into_service();
        let reader = http.bind(&config.reader_host)?.into_service();
        let embedding = http.bind(&config.embedding_host)?.into_service();

        Self::assemble(&config, writer, reader, embedding)
    }

    /// Creates a client and health-checks every host.
    ///
    /// Fails if a host cannot be reached or answers with an error status.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let http = ReqwestClient::new(config.api_key, config.http.clone())?;
        let writer = http.connect(&config.writer_host).await?.into_service();
        let reader = http.connect(&config.reader_host).await?.into_service();
        let embedding = http.connect(&config.embedding_host).await?.into_service();

        Self::assemble(&config, writer, reader, embedding)
    }

    fn assemble(
        config: &ClientConfig,
        writer: TransportService,
        reader: TransportService,
        embedding: TransportService,
    ) -> Result<Self> {
        let mut client = Self::from_transports(writer, reader, embedding);
        if let Some(key) = &config.openai_api_key {
            client.init_openai(&InitOpenAiRequest::from_key(key.clone()))?;
        }

        tracing::info!(
            target: TRACING_TARGET,
            reader = %config.reader_host,
            writer = %config.writer_host,
            embedding = %config.embedding_host,
            openai = client.is_openai_initialized(),
            "Starpoint client created"
        );

        Ok(client)
    }

    /// Creates a client over pre-built transports.
    pub fn from_transports(
        writer: TransportService,
        reader: TransportService,
        embedding: TransportService,
    ) -> Self {
        let document_writer = DocumentWriter::new(writer.clone());
        Self {
            collections: CollectionWriter::new(writer.clone()),
            writer: document_writer,
            reader: DocumentReader::new(reader.clone()),
            embedding: EmbeddingClient::new(embedding.clone()),
            transports: [reader, writer, embedding],
            openai_config: OpenAiConfig::default(),
            openai: None,
        }
    }

    /// Sets the configuration used by later [`init_openai`](Self::init_openai) calls.
    #[must_use]
    pub fn with_openai_config(mut self, config: OpenAiConfig) -> Self {
        self.openai_config = config;
        self
    }

    /// Uses `provider` for build-and-insert calls.
    #[must_use]
    pub fn with_embedding_service(mut self, provider: EmbeddingService) -> Self {
        self.openai = Some(EmbeddingPipeline::new(provider, self.writer.clone()));
        self
    }

    /// Enables OpenAI support from a key or a key file.
    ///
    /// On failure the previous state is kept.
    pub fn init_openai(&mut self, request: &InitOpenAiRequest) -> Result<InitOpenAiResponse> {
        let client = OpenAiClient::from_init(request, self.openai_config.clone()).map_err(
            |err| {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %err,
                    "OpenAI initialization failed"
                );
                Error::from(err)
            },
        )?;

        self.openai = Some(EmbeddingPipeline::new(
            client.into_service(),
            self.writer.clone(),
        ));

        tracing::info!(target: TRACING_TARGET, "OpenAI initialized");
        Ok(InitOpenAiResponse { success: true })
    }

    /// Returns `true` once an embedding provider is configured.
    pub fn is_openai_initialized(&self) -> bool {
        self.openai.is_some()
    }

    /// Returns the collection writer.
    pub fn collections(&self) -> &CollectionWriter {
        &self.collections
    }

    /// Returns the document writer.
    pub fn writer(&self) -> &DocumentWriter {
        &self.writer
    }

    /// Returns the document reader.
    pub fn reader(&self) -> &DocumentReader {
        &self.reader
    }

    /// Returns the hosted embedding client.
    pub fn embedding(&self) -> &EmbeddingClient {
        &self.embedding
    }

    /// Checks every host. A failed check is reported as unhealthy.
    pub async fn health_check(&self) -> ClientHealth {
        let [reader, writer, embedding] = &self.transports;
        ClientHealth {
            reader: check(reader).await,
            writer: check(writer).await,
            embedding: check(embedding).await,
        }
    }

    /// See [`CollectionWriter::create_collection`].
    pub async fn create_collection(
        &self,
        request: CreateCollectionRequest,
    ) -> ApiResult<CreateCollectionResponse> {
        self.collections.create_collection(request).await
    }

    /// See [`CollectionWriter::delete_collection`].
    pub async fn delete_collection(
        &self,
        request: DeleteCollectionRequest,
    ) -> ApiResult<DeleteCollectionResponse> {
        self.collections.delete_collection(request).await
    }

    /// See [`DocumentWriter::insert`].
    pub async fn insert(&self, request: InsertDocumentsRequest) -> ApiResult<InsertResponse> {
        self.writer.insert(request).await
    }

    /// See [`DocumentWriter::update`].
    pub async fn update(&self, request: UpdateDocumentsRequest) -> ApiResult<UpdateResponse> {
        self.writer.update(request).await
    }

    /// See [`DocumentWriter::delete`].
    pub async fn delete(&self, request: DeleteDocumentsRequest) -> ApiResult<DeleteResponse> {
        self.writer.delete(request).await
    }

    /// See [`DocumentWriter::column_insert`].
    pub async fn column_insert(
        &self,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Metadata>,
        collection: CollectionSelector,
    ) -> ApiResult<InsertResponse> {
        self.writer
            .column_insert(embeddings, metadatas, collection)
            .await
    }

    /// See [`DocumentReader::query`].
    pub async fn query(&self, request: QueryRequest) -> ApiResult<QueryResponse> {
        self.reader.query(request).await
    }

    /// See [`DocumentReader::infer_schema`].
    pub async fn infer_schema(
        &self,
        request: InferSchemaRequest,
    ) -> ApiResult<InferSchemaResponse> {
        self.reader.infer_schema(request).await
    }

    /// See [`EmbeddingClient::embed`].
    pub async fn embed(&self, text: Vec<String>, model: EmbeddingModel) -> ApiResult<EmbedResponse> {
        self.embedding.embed(text, model).await
    }

    /// See [`EmbeddingClient::embed_items`].
    pub async fn embed_items(
        &self,
        items: Vec<EmbedItem>,
        model: EmbeddingModel,
    ) -> ApiResult<EmbedResponse> {
        self.embedding.embed_items(items, model).await
    }

    /// See [`EmbeddingClient::embed_and_join_metadata`].
    pub async fn embed_and_join_metadata(
        &self,
        text: Vec<String>,
        metadatas: Vec<Metadata>,
        model: EmbeddingModel,
    ) -> ApiResult<EmbedResponse> {
        self.embedding
            .embed_and_join_metadata(text, metadatas, model)
            .await
    }

    /// See [`EmbeddingPipeline::build_and_insert_embeddings_from_openai`].
    ///
    /// Returns an error envelope if OpenAI has not been initialized.
    pub async fn build_and_insert_embeddings_from_openai(
        &self,
        request: BuildAndInsertEmbeddingsFromOpenAiRequest,
    ) -> ApiResult<BuildAndInsertEmbeddingsFromOpenAiResponse> {
        match &self.openai {
            Some(pipeline) => {
                pipeline
                    .build_and_insert_embeddings_from_openai(request)
                    .await
            }
            None => ApiResult::from_error(not_initialized()),
        }
    }

    /// See [`EmbeddingPipeline::build_and_insert_embeddings`].
    pub async fn build_and_insert_embeddings(
        &self,
        request: BuildAndInsertEmbeddingsRequest,
    ) -> ApiResult<BuildAndInsertEmbeddingsFromOpenAiResponse> {
        match &self.openai {
            Some(pipeline) => pipeline.build_and_insert_embeddings(request).await,
            None => ApiResult::from_error(not_initialized()),
        }
    }
}

fn not_initialized() -> Error {
    tracing::warn!(target: TRACING_TARGET, "OpenAI used before initialization");
    Error::not_initialized().with_message(OPENAI_NOT_INITIALIZED_ERROR)
}

async fn check(transport: &TransportService) -> ServiceHealth {
    transport
        .health_check()
        .await
        .unwrap_or_else(|err| ServiceHealth::unhealthy(err.user_message()))
}
