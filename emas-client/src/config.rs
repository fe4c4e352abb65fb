//! Client configuration

use std::env;

/// Default backend API root
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the stock backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `EMAS_API_URL` | `http://localhost:8080/api` |
    /// | `EMAS_API_TOKEN` | none |
    /// | `EMAS_API_TIMEOUT_SECS` | 30 |
    pub fn from_env() -> Self {
        let base_url = env::var("EMAS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = env::var("EMAS_API_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout = env::var("EMAS_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            token,
            timeout,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://toko.local/api")
            .with_token("abc")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://toko.local/api");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn test_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
    }
}
