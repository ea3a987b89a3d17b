//! Request parameter types

use serde_json::{Map, Value};

/// Query parameters for a collection request
///
/// Values are arbitrary JSON; see `jobboard_client::query` for how they are
/// rendered into a query string.
pub type Params = Map<String, Value>;

/// Merge call-time parameters over defaults
///
/// Keys present in `overrides` win, including when their value is `null`
/// (which later drops the key from the query string).
#[must_use]
pub fn merge_params(defaults: &Params, overrides: &Params) -> Params {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
