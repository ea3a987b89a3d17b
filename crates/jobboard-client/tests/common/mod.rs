#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;
use url::Url;

use jobboard_api::Params;
use jobboard_client::{Backend, ClientError, RawResponse, Transport};

pub const LOCAL: &str = "http://local.test";
pub const REMOTE: &str = "http://remote.test";

type Responder = Box<dyn Fn(&Url) -> Result<RawResponse, ClientError> + Send + Sync>;

/// Transport answering from a closure and recording every request
pub struct MockTransport {
    responder: Responder,
    calls: Mutex<Vec<(Url, Instant)>>,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&Url) -> Result<RawResponse, ClientError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Same reply for every request
    pub fn always(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| Ok(RawResponse::new(status, body.clone())))
    }

    /// Separate replies for the local and remote origins
    pub fn split(local: (u16, &str), remote: (u16, &str)) -> Arc<Self> {
        let local = (local.0, local.1.to_string());
        let remote = (remote.0, remote.1.to_string());
        Self::new(move |url| {
            let (status, body) = if is_remote(url) { &remote } else { &local };
            Ok(RawResponse::new(*status, body.clone()))
        })
    }

    pub fn urls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn local_calls(&self) -> usize {
        self.urls().iter().filter(|u| !is_remote(u)).count()
    }

    pub fn remote_calls(&self) -> usize {
        self.urls().iter().filter(|u| is_remote(u)).count()
    }

    /// Time between consecutive requests
    pub fn gaps(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        calls.windows(2).map(|w| w[1].1 - w[0].1).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url, _timeout: Duration) -> Result<RawResponse, ClientError> {
        self.calls.lock().unwrap().push((url.clone(), Instant::now()));
        (self.responder)(url)
    }
}

pub fn is_remote(url: &Url) -> bool {
    url.host_str() == Some("remote.test")
}

pub fn backend(mock: &Arc<MockTransport>) -> Backend {
    Backend::new(mock.clone(), LOCAL, REMOTE).unwrap()
}

pub fn params(value: Value) -> Params {
    value.as_object().cloned().unwrap()
}

/// Query pairs of a recorded URL
pub fn query_of(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Compare request gaps against expected milliseconds, allowing timer rounding
pub fn assert_gaps(actual: &[Duration], expected_ms: &[u64]) {
    assert_eq!(actual.len(), expected_ms.len(), "gaps: {actual:?}");
    for (gap, expected) in actual.iter().zip(expected_ms) {
        let expected = Duration::from_millis(*expected);
        assert!(
            *gap >= expected && *gap <= expected + Duration::from_millis(5),
            "gap {gap:?} differs from {expected:?} (all gaps: {actual:?})"
        );
    }
}
