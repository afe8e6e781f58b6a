//! # Blob File Source
//!
//! Buffers the whole file in memory per request; nothing is cached.

use crate::config::BlobConfig;
use async_trait::async_trait;
use gate_core::{FileArtifact, FileSource, GateError, GateResult};
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Reads the configured file URL over HTTP
pub struct BlobFileSource {
    config: BlobConfig,
    client: Client,
}

impl BlobFileSource {
    pub fn new(config: BlobConfig) -> GateResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GateError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(config, client))
    }

    /// Create a source sharing an existing HTTP client
    pub fn with_client(config: BlobConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl FileSource for BlobFileSource {
    #[instrument(skip(self), fields(file_url = %self.config.file_url))]
    async fn fetch(&self) -> GateResult<FileArtifact> {
        let mut request = self.client.get(&self.config.file_url);
        if let Some(auth) = self.config.auth_header() {
            request = request.header("Authorization", auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!("Failed to fetch file from source: {}", status);
            return Err(GateError::FileUnavailable {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        let artifact = FileArtifact::new(bytes.to_vec(), content_type);
        debug!(
            "Fetched file: {} bytes, content_type={}",
            artifact.len(),
            artifact.content_type
        );

        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::DEFAULT_CONTENT_TYPE;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn source(server: &MockServer, token: Option<&str>) -> BlobFileSource {
        let mut config = BlobConfig::new(format!("{}/files/guide.pdf", server.uri()));
        if let Some(token) = token {
            config = config.with_read_token(token);
        }
        BlobFileSource::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_defaults_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/guide.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PDF".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let artifact = source(&server, None).fetch().await.unwrap();

        assert_eq!(artifact.bytes, b"PDF");
        assert_eq!(artifact.content_type, DEFAULT_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_fetch_keeps_upstream_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/guide.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"%PDF-1.7".to_vec(), "application/octet-stream"),
            )
            .mount(&server)
            .await;

        let artifact = source(&server, None).fetch().await.unwrap();

        assert_eq!(artifact.content_type, "application/octet-stream");
        assert_eq!(artifact.bytes, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("authorization", "Bearer vercel_blob_rw_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PDF".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        source(&server, Some("vercel_blob_rw_abc"))
            .fetch()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fetch_without_token_sends_no_auth() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PDF".to_vec()))
            .mount(&server)
            .await;

        source(&server, None).fetch().await.unwrap();

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_fetch_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = source(&server, None).fetch().await.unwrap_err();

        assert!(matches!(err, GateError::FileUnavailable { status: 403 }));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Unable to retrieve file");
    }
}
