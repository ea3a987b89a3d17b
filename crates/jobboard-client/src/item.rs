//! Single-item loading (`GET /api/{endpoint}/{id}`)

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use jobboard_api::{ItemResult, Params, item_key_for};

use crate::backend::{Backend, Origin};
use crate::error::{ClientError, Result};
use crate::options::ItemOptions;
use crate::retry;

/// Fields that mark a bare object as an item
pub const IDENTIFYING_FIELDS: [&str; 4] = ["id", "_id", "title", "name"];

/// Message used when a `success: false` payload carries none
pub const ITEM_FAILED_MESSAGE: &str = "Failed to load item";

/// Loads one item by id
///
/// Same retry and fallback behaviour as [`crate::DataLoader`], except that a
/// 404 is final.
#[derive(Debug, Clone)]
pub struct ItemLoader {
    backend: Backend,
}

impl ItemLoader {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Load the item `id` from `endpoint`
    ///
    /// Never fails: every error ends up in the `error` field of an
    /// unsuccessful [`ItemResult`].
    #[instrument(skip(self, options))]
    pub async fn load_item<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        id: &str,
        options: &ItemOptions,
    ) -> ItemResult<T> {
        let key = item_key_for(endpoint);
        let key = key.as_str();
        let outcome = retry::with_fallback(options.retries, move |origin, attempt| {
            self.attempt::<T>(origin, attempt, endpoint, id, key, options)
        })
        .await;

        match outcome {
            Ok(item) => ItemResult::found(item),
            Err(e) => ItemResult::failed(e.to_string()),
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        origin: Origin,
        attempt: u32,
        endpoint: &str,
        id: &str,
        key: &str,
        options: &ItemOptions,
    ) -> Result<T> {
        if id.trim().is_empty() {
            return Err(ClientError::InvalidRequest("item id is empty".into()));
        }

        let url = self.backend.url(origin, endpoint, Some(id), &Params::new())?;
        debug!(%origin, attempt, url = %url, "loading item");

        let raw = match self.backend.get_json(&url, options.timeout).await {
            Err(ClientError::Api { status: 404, .. }) => return Err(ClientError::NotFound),
            other => other?,
        };

        let item = extract_item(&raw, key)?;
        Ok(serde_json::from_value(item)?)
    }
}

/// Pick the item out of a single-item payload
///
/// First match wins:
/// 1. `{success: true, data}`
/// 2. `{success: true, <key>}` (e.g. `news`, `job`)
/// 3. an object carrying one of [`IDENTIFYING_FIELDS`]
/// 4. `{success: false}`: its message becomes the error
///
/// The `success` envelope is checked before the object's own fields, so an
/// envelope that also has a top-level `id` still yields `data`.
///
/// # Errors
/// Returns [`ClientError::Unsuccessful`] for case 4 and
/// [`ClientError::InvalidResponse`] when nothing matches.
pub fn extract_item(raw: &Value, key: &str) -> Result<Value> {
    let Some(map) = raw.as_object() else {
        return Err(ClientError::InvalidResponse(
            "expected a JSON object for a single item".into(),
        ));
    };

    let success = map.get("success").and_then(Value::as_bool);

    if success == Some(true) {
        if let Some(data) = non_null(map, "data") {
            return Ok(data.clone());
        }
        if let Some(item) = non_null(map, key) {
            return Ok(item.clone());
        }
    }

    if IDENTIFYING_FIELDS.iter().any(|field| map.contains_key(*field)) {
        return Ok(raw.clone());
    }

    if success == Some(false) {
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(ITEM_FAILED_MESSAGE);
        return Err(ClientError::Unsuccessful(message.to_string()));
    }

    Err(ClientError::InvalidResponse("unrecognized item shape".into()))
}

fn non_null<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}
