//! Collection loading with retry and remote fallback

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use jobboard_api::{LoaderResult, Pagination};

use crate::backend::{Backend, Origin};
use crate::error::{ClientError, Result};
use crate::normalize::normalize;
use crate::options::LoaderOptions;
use crate::retry;

/// Message attached to normalized collection payloads that carry none
pub const LOAD_MESSAGE: &str = "Tải dữ liệu thành công";

/// Loads collection endpoints (`GET /api/{endpoint}?{query}`)
#[derive(Debug, Clone)]
pub struct DataLoader {
    backend: Backend,
}

impl DataLoader {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Load a collection
    ///
    /// Never fails: every error ends up in the `error` field of an
    /// unsuccessful [`LoaderResult`].
    #[instrument(skip(self, options), fields(endpoint = %options.endpoint))]
    pub async fn load<T: DeserializeOwned>(&self, options: &LoaderOptions) -> LoaderResult<T> {
        let outcome = retry::with_fallback(options.retries, move |origin, attempt| {
            self.attempt::<T>(origin, attempt, options)
        })
        .await;

        match outcome {
            Ok(result) => result,
            Err(e) => LoaderResult::failed(e.to_string()),
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        origin: Origin,
        attempt: u32,
        options: &LoaderOptions,
    ) -> Result<LoaderResult<T>> {
        let url = self
            .backend
            .url(origin, &options.endpoint, None, &options.params)?;
        debug!(%origin, attempt, url = %url, "loading collection");

        let raw = self.backend.get_json(&url, options.timeout).await?;
        let normalized = normalize(&raw, LOAD_MESSAGE);
        if !normalized.success {
            return Err(ClientError::Unsuccessful(normalized.message));
        }

        let items = match normalized.data {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ClientError::InvalidResponse(format!(
                    "expected an array of items, got {}",
                    json_kind(&other)
                )));
            }
        };

        let data = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<serde_json::Result<Vec<T>>>()?;

        Ok(LoaderResult::loaded(data, pagination(&raw)))
    }
}

/// Pagination block next to the data, if it is well-formed
fn pagination(raw: &Value) -> Option<Pagination> {
    raw.get("pagination")
        .filter(|p| p.is_object())
        .and_then(|p| serde_json::from_value(p.clone()).ok())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
