//! Credentials supplied to the transport

/// Source of the bearer token attached to outgoing requests
///
/// Passed explicitly into [`crate::HttpTransport`] so nothing reads
/// credentials from global state.
pub trait AuthContext: Send + Sync {
    /// Current token, if the caller is authenticated
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, typically the admin token from configuration
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl AuthContext for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}
