//! Scripted port implementations for unit tests.

#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use sambharalu_domain::{
    request::{Header, Headers, RequestSpec},
    response::ResponseSpec,
};

use crate::ports::{Clock, HttpClient, HttpClientError};

const BASE: &str = "https://api.test/";

/// HTTP client that replays scripted answers in order and records every
/// request. Once the script runs out it answers 404.
pub struct StubHttpClient {
    script: Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn push(self, answer: Result<ResponseSpec, HttpClientError>) -> Self {
        self.script.lock().expect("Lock poisoned").push_back(answer);
        self
    }

    /// Queues a JSON answer.
    pub fn respond(self, status: u16, body: Value) -> Self {
        let headers: Headers = [Header::new("Content-Type", "application/json")]
            .into_iter()
            .collect();
        let bytes = serde_json::to_vec(&body).expect("JSON encodes");
        self.push(Ok(ResponseSpec::new(status, headers, bytes, Duration::ZERO)))
    }

    /// Queues a plain-text answer.
    pub fn respond_text(self, status: u16, body: &str) -> Self {
        let headers: Headers = [Header::new("Content-Type", "text/html")]
            .into_iter()
            .collect();
        self.push(Ok(ResponseSpec::new(
            status,
            headers,
            body.as_bytes().to_vec(),
            Duration::ZERO,
        )))
    }

    /// Queues a transport failure.
    pub fn fail(self, error: HttpClientError) -> Self {
        self.push(Err(error))
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().expect("Lock poisoned").clone()
    }

    /// Paths of the requests received so far, without base URL or query.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| {
                let path = r.url.strip_prefix(BASE).unwrap_or(&r.url);
                path.split('?').next().unwrap_or_default().to_string()
            })
            .collect()
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests
            .lock()
            .expect("Lock poisoned")
            .push(request.clone());
        let next = self.script.lock().expect("Lock poisoned").pop_front();
        next.unwrap_or_else(|| Ok(ResponseSpec::new(404, Headers::new(), Vec::new(), Duration::ZERO)))
    }
}

/// Clock frozen at one instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Frozen at `secs` seconds after the Unix epoch.
    pub fn at(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    /// Frozen at the Unix epoch.
    pub fn epoch() -> Self {
        Self::at(0)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
