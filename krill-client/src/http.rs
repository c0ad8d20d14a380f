//! HTTP transport for the commerce platform

use crate::submit::{CommerceTransport, TransportReply, UNIFIED_OPERATION_PATH};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// HTTP client for making network requests to the commerce platform
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a POST request with JSON body, returning status and raw body.
    ///
    /// Non-2xx statuses are NOT errors here: the submission machine needs
    /// the rejection body to decide whether the request is retryable.
    pub async fn post_raw(&self, path: &str, body: &Value) -> ClientResult<TransportReply> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;
        Ok(TransportReply { status, body })
    }
}

/// Client-side timeouts get their own variant; they are never retried
fn map_transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(error)
    }
}

#[async_trait]
impl CommerceTransport for HttpClient {
    async fn post_operation(&self, payload: &Value) -> ClientResult<TransportReply> {
        self.post_raw(UNIFIED_OPERATION_PATH, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction_keeps_token() {
        let config = ClientConfig::new("https://api.example.com")
            .with_token("tok_1")
            .with_timeout(60);
        let client = HttpClient::new(&config);
        assert_eq!(client.token(), Some("tok_1"));
        assert_eq!(client.url("/api/user/unified"), "https://api.example.com/api/user/unified");
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://localhost:8080/");
        let client = HttpClient::new(&config);
        assert_eq!(client.url("api/user/unified"), "http://localhost:8080/api/user/unified");
    }
}
