//! Backend payload normalization
//!
//! The backend answers in several shapes (`{success, data}`, bare `{data}`,
//! a raw object, or nothing useful). [`normalize`] maps all of them onto
//! [`NormalizedResponse`].

use serde_json::Value;

use jobboard_api::NormalizedResponse;

/// Message used when the payload carries nothing usable
pub const NO_DATA_MESSAGE: &str = "Không có dữ liệu";

/// Normalize an arbitrary backend payload
///
/// First match wins:
/// 1. object with a boolean `success`: taken as-is
/// 2. object with a `data` key: implicit success
/// 3. any other object or array: the whole value is the payload
/// 4. null or primitive: failure
#[must_use]
pub fn normalize(raw: &Value, default_message: &str) -> NormalizedResponse {
    match raw {
        Value::Object(map) => {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(default_message);

            if let Some(success) = map.get("success").and_then(Value::as_bool) {
                if !success {
                    return NormalizedResponse::failed(message);
                }
                return NormalizedResponse::ok(non_null(map.get("data")), message);
            }

            if map.contains_key("data") {
                return NormalizedResponse::ok(non_null(map.get("data")), message);
            }

            NormalizedResponse::ok(Some(raw.clone()), default_message)
        }
        Value::Array(_) => NormalizedResponse::ok(Some(raw.clone()), default_message),
        _ => NormalizedResponse::failed(NO_DATA_MESSAGE),
    }
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}
