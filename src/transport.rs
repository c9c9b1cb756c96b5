//! HTTP transport used to reach the gateway.
//!
//! Endpoint wrappers only need "POST this JSON, give me the bytes back", so that
//! is all [`Transport`] asks for. [`HttpTransport`] is the `reqwest` implementation.

use crate::errors::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Posts a JSON payload and returns the raw response body.
///
/// Implementations must not retry; a failure is reported as
/// [`PayJsError::TransportError`](crate::errors::PayJsError::TransportError).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `payload` as a JSON POST to `url`.
    async fn post_json(&self, url: &str, payload: &Value) -> Result<Vec<u8>>;
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a default `reqwest` client (no timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around a preconfigured client, e.g. one with a timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use payjs::transport::HttpTransport;
    /// use std::time::Duration;
    ///
    /// let client = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    /// let transport = HttpTransport::with_client(client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}
