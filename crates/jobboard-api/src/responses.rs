//! Response types produced by the loaders

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Canonical `{success, data, message}` shape extracted from a backend payload
///
/// A failed response never carries data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResponse<T = Value> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> NormalizedResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Failed response; data is always dropped
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

/// Pagination block returned alongside collection payloads
///
/// Counts may arrive as integral floats (`10.0`). A missing or unusable
/// `total` stays `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    #[serde(deserialize_with = "count_or_zero")]
    pub page: u64,
    #[serde(deserialize_with = "count_or_zero")]
    pub limit: u64,
    #[serde(deserialize_with = "count", skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(alias = "total_pages", deserialize_with = "count_or_zero")]
    pub total_pages: u64,
}

/// Non-negative integer, also accepted as a float without a fraction
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_count))
}

fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(count(deserializer)?.unwrap_or_default())
}

/// Result of loading a collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderResult<T> {
    pub data: Vec<T>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> LoaderResult<T> {
    /// Successful load
    ///
    /// `total` comes from the pagination block when it carries one, otherwise
    /// from the number of items actually returned.
    #[must_use]
    pub fn loaded(data: Vec<T>, pagination: Option<Pagination>) -> Self {
        let total = pagination
            .and_then(|p| p.total)
            .unwrap_or(data.len() as u64);
        Self {
            data,
            total,
            pagination,
            success: true,
            error: None,
        }
    }

    /// Failed load: empty data, zero total
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            pagination: None,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Result of loading a single item by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ItemResult<T> {
    #[must_use]
    pub fn found(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            error: Some(error.into()),
        }
    }
}
