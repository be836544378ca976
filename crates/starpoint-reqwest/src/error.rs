//! Error types for reqwest-based Starpoint and OpenAI clients.

use starpoint_core::ValidationError;
use thiserror::Error;

/// Result type alias for reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A header value could not be encoded.
    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    /// A configured header name is not a valid HTTP header name.
    #[error("Invalid header name: {0}")]
    HeaderName(#[from] reqwest::header::InvalidHeaderName),
    /// Configuration failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Reading a credentials file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for starpoint_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    starpoint_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    starpoint_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_decode() {
                    starpoint_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    starpoint_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => starpoint_core::Error::from(e),
            Error::Header(e) => starpoint_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
            Error::HeaderName(e) => starpoint_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
            Error::Validation(e) => starpoint_core::Error::from(e),
            Error::Io(e) => starpoint_core::Error::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use starpoint_core::ErrorKind;

    use super::*;

    #[test]
    fn test_validation_keeps_message() {
        let error = starpoint_core::Error::from(Error::from(ValidationError::NoHost));
        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(
            error.message.as_deref(),
            Some(starpoint_core::validation::NO_HOST_ERROR)
        );
    }

    #[tokio::test]
    async fn test_connect_failure_keeps_reqwest_message() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        assert!(err.is_connect());
        let expected = err.to_string();

        let error = starpoint_core::Error::from(Error::from(err));
        assert_eq!(error.kind, ErrorKind::NetworkError);
        assert_eq!(error.message.as_deref(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_timeout_keeps_reqwest_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_body_from_request(|_| {
                std::thread::sleep(std::time::Duration::from_millis(500));
                b"hello.".to_vec()
            })
            .create_async()
            .await;

        let err = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(50))
            .build()
            .unwrap()
            .get(server.url())
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        let expected = err.to_string();

        let error = starpoint_core::Error::from(Error::from(err));
        assert_eq!(error.kind, ErrorKind::Timeout);
        assert_eq!(error.message.as_deref(), Some(expected.as_str()));
    }
}
