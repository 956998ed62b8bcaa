//! Request transport
//!
//! Wraps the [`HttpClient`] port with the session's base URL and bearer
//! token. A transport never fails: when the adapter reports an error, the
//! caller gets a status `0` response describing it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use sambharalu_domain::{
    ApiResponse, Session,
    request::{ApiRequest, Header, Headers, RequestSpec, join_url},
};

use crate::ports::HttpClient;

/// Issues requests relative to a session's base URL.
#[derive(Clone)]
pub struct Transport {
    http: Arc<dyn HttpClient>,
    timeout: Duration,
}

impl Transport {
    /// Creates a transport over `http` with a fixed per-request timeout.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    /// Builds the absolute request for `request` under `session`.
    #[must_use]
    pub fn prepare(&self, session: &Session, request: ApiRequest) -> RequestSpec {
        let mut headers = Headers::new();
        headers.add(Header::new("Accept", "application/json"));
        if let Some(authorization) = session.authorization() {
            headers.add(Header::new("Authorization", authorization));
        }

        RequestSpec {
            method: request.method,
            url: join_url(session.base_url(), &request.path, &request.query),
            headers,
            body: request.body,
            timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Sends `request` and decodes the answer.
    pub async fn request(&self, session: &Session, request: ApiRequest) -> ApiResponse {
        let spec = self.prepare(session, request);

        match self.http.execute(&spec).await {
            Ok(response) => {
                debug!(
                    method = spec.method.as_str(),
                    url = %spec.url,
                    status = response.status,
                    elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
                    "response received"
                );
                response.decode()
            }
            Err(error) => {
                warn!(method = spec.method.as_str(), url = %spec.url, %error, "request failed");
                ApiResponse::transport_failure(error.to_string(), spec.url)
            }
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
