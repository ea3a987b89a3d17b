//! Origins and request plumbing shared by the loaders

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use jobboard_api::Params;

use crate::auth::StaticToken;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::query;
use crate::transport::{HttpTransport, Transport};

/// Which base URL a request goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Local proxy, tried first and retried
    Local,
    /// Remote backend, tried once after local attempts are exhausted
    Remote,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Local => f.write_str("local"),
            Origin::Remote => f.write_str("remote"),
        }
    }
}

/// Timeout and retry budget applied to one logical load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS),
            retries: crate::config::DEFAULT_RETRIES,
        }
    }
}

/// Transport plus the two origins every request can target
#[derive(Clone)]
pub struct Backend {
    transport: Arc<dyn Transport>,
    local_origin: Url,
    remote_origin: Url,
    policy: RequestPolicy,
}

impl Backend {
    /// Create a backend over an arbitrary transport
    ///
    /// # Errors
    /// Returns an error if either origin is not an absolute http(s) URL.
    pub fn new(
        transport: Arc<dyn Transport>,
        local_origin: impl AsRef<str>,
        remote_origin: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            local_origin: parse_origin(local_origin.as_ref())?,
            remote_origin: parse_origin(remote_origin.as_ref())?,
            policy: RequestPolicy::default(),
        })
    }

    /// Create a `reqwest`-backed backend from configuration
    ///
    /// # Errors
    /// Returns an error if either configured origin is invalid.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut transport = HttpTransport::new();
        if let Some(token) = &config.admin_token {
            transport = transport.with_auth(Arc::new(StaticToken::new(token.clone())));
        }
        Self::with_transport(Arc::new(transport), config)
    }

    /// Create a backend from configuration over a custom transport
    ///
    /// # Errors
    /// Returns an error if either configured origin is invalid.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(transport, &config.local_origin, &config.remote_origin)?.with_policy(
            RequestPolicy {
                timeout: config.timeout(),
                retries: config.retries,
            },
        ))
    }

    /// Replace the default timeout and retry budget
    #[must_use]
    pub fn with_policy(mut self, policy: RequestPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> RequestPolicy {
        self.policy
    }

    #[must_use]
    pub fn origin(&self, origin: Origin) -> &Url {
        match origin {
            Origin::Local => &self.local_origin,
            Origin::Remote => &self.remote_origin,
        }
    }

    /// Build `{origin}/api/{endpoint}[/{id}]?{query}`
    ///
    /// Any path already on the origin is kept as a prefix; `endpoint` may
    /// contain several `/`-separated segments.
    ///
    /// # Errors
    /// Returns an error if the origin cannot carry a path.
    pub fn url(
        &self,
        origin: Origin,
        endpoint: &str,
        id: Option<&str>,
        params: &Params,
    ) -> Result<Url> {
        let base = self.origin(origin);
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidOrigin(base.to_string()))?;
            segments.pop_if_empty().push("api");
            segments.extend(endpoint.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        query::apply(&mut url, params);
        Ok(url)
    }

    /// GET `url` and parse the body as JSON
    ///
    /// # Errors
    /// Non-2xx statuses become [`ClientError::Api`]; transport and JSON
    /// failures are passed through.
    pub async fn get_json(&self, url: &Url, timeout: Duration) -> Result<Value> {
        let response = self.transport.get(url, timeout).await?;

        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status,
                message: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("local_origin", &self.local_origin.as_str())
            .field("remote_origin", &self.remote_origin.as_str())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn parse_origin(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidOrigin(raw.to_string()));
    }
    Ok(url)
}
