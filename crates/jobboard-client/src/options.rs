//! Per-call options for collection and item loads

use std::time::Duration;

use serde_json::Value;

use jobboard_api::Params;

use crate::backend::RequestPolicy;

/// Options for one collection load
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    /// Path under `/api`, e.g. `jobs` or `admin/jobs`
    pub endpoint: String,
    /// Query parameters
    pub params: Params,
    /// Per-attempt timeout (default: 40s)
    pub timeout: Duration,
    /// Retries after the first attempt (default: 3)
    pub retries: u32,
}

impl LoaderOptions {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let policy = RequestPolicy::default();
        Self {
            endpoint: endpoint.into(),
            params: Params::new(),
            timeout: policy.timeout,
            retries: policy.retries,
        }
    }

    /// Add or replace a single query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace all query parameters
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Take timeout and retries from a policy
    #[must_use]
    pub fn policy(mut self, policy: RequestPolicy) -> Self {
        self.timeout = policy.timeout;
        self.retries = policy.retries;
        self
    }
}

/// Options for one item load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOptions {
    /// Per-attempt timeout (default: 40s)
    pub timeout: Duration,
    /// Retries after the first attempt (default: 3)
    pub retries: u32,
}

impl Default for ItemOptions {
    fn default() -> Self {
        RequestPolicy::default().into()
    }
}

impl From<RequestPolicy> for ItemOptions {
    fn from(policy: RequestPolicy) -> Self {
        Self {
            timeout: policy.timeout,
            retries: policy.retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loader_defaults() {
        let options = LoaderOptions::new("jobs");
        assert_eq!(options.timeout, Duration::from_millis(40_000));
        assert_eq!(options.retries, 3);
        assert!(options.params.is_empty());
    }

    #[test]
    fn test_loader_builder() {
        let options = LoaderOptions::new("news")
            .param("page", 2)
            .param("category", "events")
            .retries(1)
            .timeout(Duration::from_secs(5));
        assert_eq!(options.params.get("page"), Some(&json!(2)));
        assert_eq!(options.params.get("category"), Some(&json!("events")));
        assert_eq!(options.retries, 1);
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_item_defaults() {
        let options = ItemOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(40));
        assert_eq!(options.retries, 3);
    }
}
