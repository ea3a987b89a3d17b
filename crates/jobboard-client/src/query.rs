//! Query string rendering for collection requests

use serde_json::Value;
use url::Url;

use jobboard_api::Params;

/// Render params into `(key, value)` pairs
///
/// `null` and empty-string values are skipped. Arrays are comma-joined and
/// objects are JSON-encoded.
#[must_use]
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| render(value).map(|v| (key.clone(), v)))
        .collect()
}

/// Append rendered params to a URL
///
/// Leaves the URL without a `?` when nothing survives filtering.
pub fn apply(url: &mut Url, params: &Params) {
    let pairs = query_pairs(params);
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (key, value) in &pairs {
        query.append_pair(key, value);
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_skips_null_and_empty() {
        let pairs = query_pairs(&params(json!({
            "page": 2,
            "search": "",
            "category": null,
            "status": "active"
        })));
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("status".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn test_stringifies_values() {
        let pairs = query_pairs(&params(json!({
            "featured": true,
            "salary": 12.5,
            "tags": ["rust", "remote"],
            "filter": {"a": 1}
        })));
        assert!(pairs.contains(&("featured".into(), "true".into())));
        assert!(pairs.contains(&("salary".into(), "12.5".into())));
        assert!(pairs.contains(&("tags".into(), "rust,remote".into())));
        assert!(pairs.contains(&("filter".into(), r#"{"a":1}"#.into())));
    }

    #[test]
    fn test_keeps_zero_and_false() {
        let pairs = query_pairs(&params(json!({"page": 0, "active": false})));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_apply_encodes_values() {
        let mut url = Url::parse("http://localhost:3000/api/jobs").unwrap();
        apply(&mut url, &params(json!({"search": "kỹ sư & dev"})));
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/jobs?search=k%E1%BB%B9+s%C6%B0+%26+dev"
        );
    }

    #[test]
    fn test_apply_without_params_leaves_no_question_mark() {
        let mut url = Url::parse("http://localhost:3000/api/jobs").unwrap();
        apply(&mut url, &params(json!({"search": ""})));
        assert_eq!(url.as_str(), "http://localhost:3000/api/jobs");
    }
}
