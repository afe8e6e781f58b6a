//! # Blob Configuration

use gate_core::GateError;
use std::env;

/// Location of the gated file and the optional token to read it
#[derive(Clone)]
pub struct BlobConfig {
    /// Direct URL of the file
    pub file_url: String,

    /// Bearer token for private blobs
    pub read_token: Option<String>,
}

impl BlobConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `FILE_URL`
    ///
    /// Optional:
    /// - `BLOB_READ_WRITE_TOKEN`
    pub fn from_env() -> Result<Self, GateError> {
        dotenvy::dotenv().ok();

        let file_url = non_empty_var("FILE_URL")
            .ok_or_else(|| GateError::Configuration("FILE_URL not set".to_string()))?;

        let mut config = Self::new(file_url);
        if let Some(token) = non_empty_var("BLOB_READ_WRITE_TOKEN") {
            config = config.with_read_token(token);
        }

        Ok(config)
    }

    pub fn new(file_url: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
            read_token: None,
        }
    }

    /// Builder: authenticate the fetch with a bearer token
    pub fn with_read_token(mut self, token: impl Into<String>) -> Self {
        self.read_token = Some(token.into());
        self
    }

    /// Authorization header value, when a token is configured
    pub fn auth_header(&self) -> Option<String> {
        self.read_token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }
}

impl std::fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobConfig")
            .field("file_url", &self.file_url)
            .field("read_token", &self.read_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        let config = BlobConfig::new("https://blob.example/guide.pdf");
        assert_eq!(config.auth_header(), None);

        let config = config.with_read_token("vercel_blob_rw_abc");
        assert_eq!(
            config.auth_header().as_deref(),
            Some("Bearer vercel_blob_rw_abc")
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BlobConfig::new("https://blob.example/guide.pdf").with_read_token("secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("guide.pdf"));
    }
}
