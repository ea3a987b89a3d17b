//! Known resource endpoints exposed by the local proxy

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use thiserror::Error;

use crate::requests::Params;

/// Errors raised while interpreting API identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Endpoint name is not one of the known resources
    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

/// A named collection served under `/api/{endpoint}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Jobs,
    NewJobs,
    Hirings,
    News,
    Applications,
}

impl Resource {
    /// All known resources
    pub const ALL: [Resource; 5] = [
        Resource::Jobs,
        Resource::NewJobs,
        Resource::Hirings,
        Resource::News,
        Resource::Applications,
    ];

    /// Path segment under `/api`
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Resource::Jobs => "jobs",
            Resource::NewJobs => "newjobs",
            Resource::Hirings => "hirings",
            Resource::News => "news",
            Resource::Applications => "applications",
        }
    }

    /// Key a single-item payload uses for this resource (`{success, job}`)
    #[must_use]
    pub const fn item_key(self) -> &'static str {
        match self {
            Resource::Jobs => "job",
            Resource::NewJobs => "newjob",
            Resource::Hirings => "hiring",
            Resource::News => "news",
            Resource::Applications => "application",
        }
    }

    /// Preset query parameters applied to every collection load
    #[must_use]
    pub fn default_params(self) -> Params {
        let preset = match self {
            Resource::Jobs | Resource::NewJobs | Resource::Hirings => {
                json!({"page": 1, "limit": 10})
            }
            Resource::News => json!({"page": 1, "limit": 6}),
            Resource::Applications => json!({"page": 1, "limit": 20}),
        };
        preset.as_object().cloned().unwrap_or_default()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl FromStr for Resource {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_matches('/').to_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.endpoint() == name)
            .ok_or_else(|| ApiError::UnknownResource(s.to_string()))
    }
}

/// Item key for an arbitrary endpoint name
///
/// Known resources use their own key; anything else drops a trailing `s`
/// from the last path segment (`admin/jobs` -> `job`).
#[must_use]
pub fn item_key_for(endpoint: &str) -> String {
    if let Ok(resource) = endpoint.parse::<Resource>() {
        return resource.item_key().to_string();
    }
    let last = endpoint
        .trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    last.strip_suffix('s').unwrap_or(last).to_string()
}
