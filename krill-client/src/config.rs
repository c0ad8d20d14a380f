//! Client configuration

use std::env;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration for connecting to the commerce platform
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://api.example.com")
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

    /// Read configuration from `KRILL_API_URL`, `KRILL_API_TOKEN` and
    /// `KRILL_TIMEOUT_SECS`, falling back to defaults where unset.
    pub fn from_env() -> Self {
        let base_url =
            env::var("KRILL_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let mut config = Self::new(base_url);
        if let Ok(token) = env::var("KRILL_API_TOKEN") {
            config.token = Some(token);
        }
        if let Some(timeout) = env::var("KRILL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        config
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
