//! HTTP transport used by the loaders
//!
//! The loaders only need "GET this URL within this timeout"; [`Transport`]
//! is that seam, with [`HttpTransport`] as the `reqwest` implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, instrument};
use url::Url;

use crate::auth::AuthContext;
use crate::error::{ClientError, Result};

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single GET request
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`, failing with [`ClientError::Timeout`] after `timeout`
    ///
    /// Non-2xx statuses are returned as a [`RawResponse`], not an error.
    async fn get(&self, url: &Url, timeout: Duration) -> Result<RawResponse>;
}

/// `reqwest`-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    auth: Option<Arc<dyn AuthContext>>,
}

impl HttpTransport {
    /// Create a transport with a default `reqwest::Client`
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a transport with custom `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client, auth: None }
    }

    /// Attach credentials to every request
    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AuthContext>) -> Self {
        self.auth = Some(auth);
        self
    }

    async fn send(&self, url: &Url) -> Result<RawResponse> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = self.auth.as_ref().and_then(|auth| auth.bearer_token()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(RawResponse { status, body })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("authenticated", &self.auth.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, url), fields(url = %url), level = "debug")]
    async fn get(&self, url: &Url, timeout_duration: Duration) -> Result<RawResponse> {
        match timeout(timeout_duration, self.send(url)).await {
            Ok(Ok(response)) => {
                debug!(status = response.status, "response received");
                Ok(response)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ClientError::Timeout {
                timeout: timeout_duration,
            }),
        }
    }
}
