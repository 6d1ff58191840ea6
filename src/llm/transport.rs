//! HTTP transport abstraction
//!
//! Lets the completion client be exercised against a mock without network I/O.

use super::CompletionError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Raw HTTP reply: status code plus undecoded body
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Single-shot JSON POST
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Network-level failures come back as transport errors
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, CompletionError>;
}

/// reqwest-backed transport using the client's default timeouts
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, CompletionError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // Strip the URL: it carries the API key as a query parameter
                let e = e.without_url();
                if e.is_timeout() {
                    CompletionError::transport(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    CompletionError::transport(format!("Connection failed: {e}"))
                } else {
                    CompletionError::transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            CompletionError::transport(format!("Failed to read response: {}", e.without_url()))
        })?;

        Ok(HttpReply { status, body })
    }
}
