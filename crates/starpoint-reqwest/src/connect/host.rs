//! Host validation.

use starpoint_core::ValidationError;
use url::Url;

/// Default host of the reader endpoints.
pub const READER_URL: &str = "https://reader.starpoint.ai";

/// Default host of the writer endpoints.
pub const WRITER_URL: &str = "https://writer.starpoint.ai";

/// Default host of the embedding endpoint.
pub const EMBEDDING_URL: &str = "https://embedding.starpoint.ai";

/// Checks that `host` is an http(s) URL and strips trailing slashes.
///
/// Paths are appended to the returned value verbatim.
pub fn validate_host(host: &str) -> Result<String, ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::NoHost);
    }

    let url = Url::parse(host).map_err(|_| ValidationError::InvalidHost(host.to_owned()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ValidationError::InvalidHost(host.to_owned()));
    }

    Ok(host.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_host() {
        assert_eq!(validate_host(""), Err(ValidationError::NoHost));
    }

    #[test]
    fn test_invalid_url() {
        for host in ["asdf", "pdf://www.example.com", "www.example.com"] {
            assert_eq!(
                validate_host(host),
                Err(ValidationError::InvalidHost(host.to_owned()))
            );
        }
    }

    #[test]
    fn test_dangling_slashes_trimmed() {
        for host in ["http://www.example.com/", "http://www.example.com//"] {
            assert_eq!(validate_host(host).unwrap(), "http://www.example.com");
        }
    }

    #[test]
    fn test_simple_valid_url() {
        for host in ["http://www.example.com", "https://www.example.com", WRITER_URL] {
            assert_eq!(validate_host(host).unwrap(), host);
        }
    }
}
