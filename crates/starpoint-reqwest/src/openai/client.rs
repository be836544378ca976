//! Reqwest-based OpenAI embeddings client.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use starpoint_core::openai::{
    CreateEmbeddingRequest, CreateEmbeddingResponse, EmbeddingProvider, EmbeddingService,
    InitOpenAiRequest,
};
use starpoint_core::{ErrorResponse, ServiceHealth};

use super::{OpenAiConfig, OpenAiCredentials, TRACING_TARGET};
use crate::{Error, Result};

struct OpenAiClientInner {
    http: Client,
    config: OpenAiConfig,
    api_key: String,
}

/// Client for the OpenAI embeddings endpoint.
///
/// Implements [`EmbeddingProvider`] so it can be handed to the Starpoint
/// client as an [`EmbeddingService`].
#[derive(Clone)]
pub struct OpenAiClient {
    inner: Arc<OpenAiClientInner>,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a client authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>, config: OpenAiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            "OpenAI client created"
        );

        Ok(Self {
            inner: Arc::new(OpenAiClientInner {
                http,
                config,
                api_key: api_key.into(),
            }),
        })
    }

    /// Creates a client from the credentials of an init request.
    pub fn from_init(request: &InitOpenAiRequest, config: OpenAiConfig) -> Result<Self> {
        let api_key = OpenAiCredentials::try_from(request)?.resolve()?;
        Self::new(api_key, config)
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.inner.config
    }

    /// Converts this client into an [`EmbeddingService`].
    pub fn into_service(self) -> EmbeddingService {
        EmbeddingService::new(self)
    }
}

fn api_error(status: StatusCode, text: &str) -> starpoint_core::Error {
    let message = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|body| body["error"]["message"].as_str().map(str::to_owned))
        .unwrap_or_else(|| ErrorResponse::from_service_body(status.as_u16(), None).error_message);

    let error = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            starpoint_core::Error::new(starpoint_core::ErrorKind::Authentication)
        }
        _ => starpoint_core::Error::external_error(),
    };
    error.with_message(message)
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn create_embedding(
        &self,
        request: &CreateEmbeddingRequest,
    ) -> starpoint_core::Result<CreateEmbeddingResponse> {
        let url = self.inner.config.embeddings_url();

        let mut builder = self
            .inner
            .http
            .post(&url)
            .bearer_auth(&self.inner.api_key)
            .json(request);
        if let Some(organization) = &self.inner.config.organization {
            builder = builder.header("OpenAI-Organization", organization);
        }

        let response = builder.send().await.map_err(Error::from)?;
        let status = response.status();
        let text = response.text().await.map_err(Error::from)?;

        if !status.is_success() {
            tracing::error!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                body = %text,
                "OpenAI embeddings request failed"
            );
            return Err(api_error(status, &text));
        }

        let response: CreateEmbeddingResponse =
            serde_json::from_str(&text).map_err(Error::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            model = %response.model,
            embeddings = response.data.len(),
            total_tokens = response.usage.total_tokens,
            "OpenAI embeddings created"
        );

        Ok(response)
    }

    async fn health_check(&self) -> starpoint_core::Result<ServiceHealth> {
        // The client is stateless and always healthy if it was created successfully
        Ok(ServiceHealth::healthy())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use starpoint_core::ErrorKind;

    use super::*;

    fn client(server: &mockito::Server) -> OpenAiClient {
        let config = OpenAiConfig::builder()
            .with_base_url(&server.url())
            .unwrap()
            .build()
            .unwrap();
        OpenAiClient::new("sk-test", config).unwrap()
    }

    #[tokio::test]
    async fn test_create_embedding() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/embeddings")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::Json(
                json!({"model": "text-embedding-ada-002", "input": ["a", "b"]}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "object": "list",
                    "model": "text-embedding-ada-002",
                    "data": [
                        {"object": "embedding", "index": 1, "embedding": [0.2]},
                        {"object": "embedding", "index": 0, "embedding": [0.1]}
                    ],
                    "usage": {"prompt_tokens": 2, "total_tokens": 2}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let request = CreateEmbeddingRequest::new(
            "text-embedding-ada-002",
            vec!["a".to_string(), "b".to_string()],
        );
        let response = client(&server).create_embedding(&request).await.unwrap();

        assert_eq!(response.sorted_embeddings(), vec![vec![0.1], vec![0.2]]);
        assert_eq!(response.usage.total_tokens, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/embeddings")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let request = CreateEmbeddingRequest::new("text-embedding-ada-002", "a");
        let error = client(&server).create_embedding(&request).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Authentication);
        assert_eq!(error.user_message(), "Incorrect API key provided");
    }

    #[tokio::test]
    async fn test_server_error_without_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/embeddings")
            .with_status(503)
            .create_async()
            .await;

        let request = CreateEmbeddingRequest::new("text-embedding-ada-002", "a");
        let error = client(&server).create_embedding(&request).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::ExternalError);
        assert_eq!(error.user_message(), "Request failed with status code 503");
    }

    #[test]
    fn test_from_init_requires_credentials() {
        let result = OpenAiClient::from_init(&InitOpenAiRequest::default(), OpenAiConfig::default());
        assert!(result.is_err());
    }
}
