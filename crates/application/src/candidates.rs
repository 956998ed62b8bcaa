//! Endpoint-candidate fallback
//!
//! Tries an operation's candidates in order. The first usable answer wins.
//! A 401/403 ends the search for operations that stop on rejection, and
//! anything else moves on to the next candidate. When the list runs out, the error says why and lists every
//! attempt.

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use sambharalu_domain::{
    ApiResponse, EndpointCandidate, PayloadEncoding, ResponseBody, Session, request::ApiRequest,
};

use crate::endpoints::Operation;
use crate::error::ClientError;
use crate::transport::Transport;

/// One request made while walking the candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Status received, `0` when there was no answer
    pub status: u16,
    /// Candidate path
    pub path: &'static str,
    /// Payload encoding
    pub encoding: PayloadEncoding,
    /// Wire field names sent
    pub fields: Vec<String>,
}

impl Attempt {
    fn new(candidate: &EndpointCandidate, request: &ApiRequest) -> Self {
        let mut fields = request.body.field_names();
        fields.extend(request.query.iter().map(|(key, _)| key.clone()));
        Self {
            status: 0,
            path: candidate.path,
            encoding: candidate.shape.encoding,
            fields,
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} {})",
            self.status,
            self.path,
            self.encoding,
            self.fields.join(",")
        )
    }
}

/// Ordered list of attempts, displayed as `a | b | c`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tried(pub Vec<Attempt>);

impl Tried {
    /// Returns the attempted paths in order.
    #[must_use]
    pub fn paths(&self) -> Vec<&'static str> {
        self.0.iter().map(|a| a.path).collect()
    }

    /// Returns the number of attempts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was attempted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tried {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attempt) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{attempt}")?;
        }
        Ok(())
    }
}

/// What a single candidate's answer means for the search.
#[derive(Debug)]
enum CandidateOutcome<T> {
    Success(T),
    Rejected { status: u16, body: ResponseBody },
    TransportError(String),
    NotFound,
    Unusable { status: u16 },
}

impl<T> CandidateOutcome<T> {
    fn classify<F>(response: ApiResponse, extract: &F, stop_on_reject: bool) -> Self
    where
        F: Fn(&ApiResponse) -> Option<T>,
    {
        if let Some(value) = extract(&response) {
            return Self::Success(value);
        }
        if stop_on_reject && response.is_rejection() {
            return Self::Rejected {
                status: response.status,
                body: response.body,
            };
        }
        if response.status == 0 {
            return match response.body {
                ResponseBody::TransportFailure { error, .. } => Self::TransportError(error),
                _ => Self::TransportError(String::from("no response")),
            };
        }
        if response.is_not_found_class() {
            Self::NotFound
        } else {
            Self::Unusable {
                status: response.status,
            }
        }
    }
}

/// Runs `operation`'s candidates against the API until one succeeds.
///
/// `values` holds the operation's logical fields; each candidate renders
/// them into its own payload shape. `extract` is the success marker: it
/// returns a value only for an answer the operation can use.
///
/// # Errors
///
/// - [`ClientError::Rejected`] at the first 401/403 when the operation
///   stops on rejection; later candidates are not tried. Other operations
///   treat 401/403 as an unusable answer and keep going.
/// - [`ClientError::Unreachable`] when no candidate got an answer.
/// - [`ClientError::EndpointNotFound`] when every answer was 404/405.
/// - [`ClientError::Unrecognized`] otherwise.
pub async fn try_candidates<T, F>(
    transport: &Transport,
    session: &Session,
    operation: &Operation,
    values: &Map<String, Value>,
    extract: F,
) -> Result<T, ClientError>
where
    F: Fn(&ApiResponse) -> Option<T>,
{
    let mut tried = Vec::with_capacity(operation.candidates.len());

    for candidate in operation.candidates {
        let request = candidate.to_request(operation.method, values);
        let mut attempt = Attempt::new(candidate, &request);

        let response = transport.request(session, request).await;
        attempt.status = response.status;
        debug!(operation = operation.name, attempt = %attempt, "endpoint attempt");
        tried.push(attempt);

        match CandidateOutcome::classify(response, &extract, operation.stop_on_reject) {
            CandidateOutcome::Success(value) => return Ok(value),
            CandidateOutcome::Rejected { status, body } => {
                return Err(ClientError::Rejected {
                    operation: operation.name,
                    status,
                    body,
                    tried: Tried(tried),
                });
            }
            CandidateOutcome::TransportError(error) => {
                debug!(operation = operation.name, %error, "no answer, trying next candidate");
            }
            CandidateOutcome::NotFound => {}
            CandidateOutcome::Unusable { status } => {
                debug!(operation = operation.name, status, "unusable answer, trying next candidate");
            }
        }
    }

    Err(exhausted(operation.name, Tried(tried)))
}

fn exhausted(operation: &'static str, tried: Tried) -> ClientError {
    let statuses: Vec<u16> = tried.0.iter().map(|a| a.status).collect();

    if !statuses.is_empty() && statuses.iter().all(|s| *s == 0) {
        ClientError::Unreachable { operation, tried }
    } else if statuses.iter().all(|s| matches!(s, 0 | 404 | 405)) {
        ClientError::EndpointNotFound { operation, tried }
    } else {
        ClientError::Unrecognized { operation, tried }
    }
}

/// Success marker: 200/201 with a JSON object.
pub fn accepted_object(response: &ApiResponse) -> Option<Map<String, Value>> {
    if response.is_accepted() {
        response.body.as_object().cloned()
    } else {
        None
    }
}

/// Success marker: exactly 200 with a JSON object.
pub fn ok_object(response: &ApiResponse) -> Option<Map<String, Value>> {
    if response.status == 200 {
        response.body.as_object().cloned()
    } else {
        None
    }
}

/// Success marker: 200 with a list, bare or wrapped in `items`/`results`/`data`.
pub fn ok_list(response: &ApiResponse) -> Option<Vec<Value>> {
    if response.status == 200 {
        response.body.list_items().map(<[Value]>::to_vec)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::endpoints::{CATEGORIES, LOGIN};
    use crate::ports::HttpClientError;
    use crate::test_support::StubHttpClient;
    use pretty_assertions::assert_eq;
    use sambharalu_domain::AccessGrant;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn login_values() -> Map<String, Value> {
        let mut values = Map::new();
        values.insert("identifier".into(), json!("9876543210"));
        values.insert("password".into(), json!("pw"));
        values
    }

    fn grant(response: &ApiResponse) -> Option<AccessGrant> {
        accepted_object(response).and_then(|body| AccessGrant::from_body(&body))
    }

    async fn run(stub: &Arc<StubHttpClient>) -> Result<AccessGrant, ClientError> {
        let transport = Transport::new(stub.clone(), Duration::from_secs(5));
        let session = Session::new("https://api.test", false, None);
        try_candidates(&transport, &session, &LOGIN, &login_values(), grant).await
    }

    #[tokio::test]
    async fn test_nth_candidate_wins_and_later_ones_are_skipped() {
        let n = 5;
        let mut stub = StubHttpClient::new();
        for _ in 0..n - 1 {
            stub = stub.respond(404, json!({"detail": "Not Found"}));
        }
        stub = stub
            .respond(200, json!({"access_token": "tok"}))
            .respond(200, json!({"access_token": "never"}));
        let stub = Arc::new(stub);

        let result = run(&stub).await.unwrap();
        assert_eq!(result.access_token, "tok");
        assert_eq!(stub.requests().len(), n);
        let expected: Vec<&str> = LOGIN.candidates[..n].iter().map(|c| c.path).collect();
        assert_eq!(stub.paths(), expected);
    }

    #[tokio::test]
    async fn test_forbidden_skips_remaining_candidates() {
        let stub = Arc::new(
            StubHttpClient::new()
                .respond(403, json!({"detail": "bad credentials"}))
                .respond(200, json!({"access_token": "tok"})),
        );

        let error = run(&stub).await.unwrap_err();
        assert_eq!(stub.requests().len(), 1);
        match error {
            ClientError::Rejected { status, tried, .. } => {
                assert_eq!(status, 403);
                assert_eq!(tried.paths(), vec!["auth/login"]);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exhaustion_lists_every_path() {
        let stub = Arc::new(StubHttpClient::new());

        let error = run(&stub).await.unwrap_err();
        assert!(matches!(error, ClientError::EndpointNotFound { .. }));
        let message = error.to_string();
        for candidate in LOGIN.candidates {
            assert!(message.contains(candidate.path), "{message}");
        }
        assert!(message.contains("404 auth/login (json "), "{message}");
        assert!(
            message.contains("404 token (form username,password,grant_type)"),
            "{message}"
        );
        assert_eq!(stub.requests().len(), LOGIN.candidates.len());
    }

    #[tokio::test]
    async fn test_transport_errors_continue_like_not_found() {
        let stub = Arc::new(
            StubHttpClient::new()
                .fail(HttpClientError::Timeout { timeout_ms: 5000 })
                .respond(404, json!({}))
                .respond(201, json!({"data": {"token": "nested"}})),
        );

        let result = run(&stub).await.unwrap();
        assert_eq!(result.access_token, "nested");
        assert_eq!(stub.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_all_transport_errors_is_unreachable() {
        let mut stub = StubHttpClient::new();
        for _ in CATEGORIES.candidates {
            stub = stub.fail(HttpClientError::ConnectionFailed("reset".into()));
        }
        let stub = Arc::new(stub);
        let transport = Transport::new(stub.clone(), Duration::from_secs(5));
        let session = Session::new("https://api.test", false, None);

        let error = try_candidates(&transport, &session, &CATEGORIES, &Map::new(), ok_list)
            .await
            .unwrap_err();
        assert!(matches!(error, ClientError::Unreachable { .. }));
        assert!(error.to_string().contains("0 records/categories (none )"));
    }

    #[tokio::test]
    async fn test_listing_moves_past_unauthorized_candidate() {
        let stub = Arc::new(
            StubHttpClient::new()
                .respond(401, json!({"detail": "not authenticated"}))
                .respond(200, json!([{"id": 1, "name": "Festivals"}])),
        );
        let transport = Transport::new(stub.clone(), Duration::from_secs(5));
        let session = Session::new("https://api.test", false, Some("tok".into()));

        let items = try_candidates(&transport, &session, &CATEGORIES, &Map::new(), ok_list)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(stub.paths(), vec!["categories", "api/categories"]);
    }

    #[tokio::test]
    async fn test_listing_with_only_rejections_is_unrecognized() {
        let mut stub = StubHttpClient::new();
        for _ in CATEGORIES.candidates {
            stub = stub.respond(403, json!({}));
        }
        let stub = Arc::new(stub);
        let transport = Transport::new(stub.clone(), Duration::from_secs(5));
        let session = Session::new("https://api.test", false, None);

        let error = try_candidates(&transport, &session, &CATEGORIES, &Map::new(), ok_list)
            .await
            .unwrap_err();
        assert!(matches!(error, ClientError::Unrecognized { .. }));
        assert_eq!(stub.requests().len(), CATEGORIES.candidates.len());
    }

    #[tokio::test]
    async fn test_unusable_answers_are_unrecognized() {
        let stub = Arc::new(
            StubHttpClient::new()
                .respond(200, json!({"message": "no token here"}))
                .respond_text(502, "<html>Bad Gateway</html>"),
        );

        let error = run(&stub).await.unwrap_err();
        assert!(matches!(error, ClientError::Unrecognized { .. }));
        assert!(error.to_string().starts_with("Login"));
    }

    #[test]
    fn test_list_marker_requires_200() {
        let created = ApiResponse::new(201, ResponseBody::from_value(json!([1])));
        assert_eq!(ok_list(&created), None);
        let wrapped = ApiResponse::new(200, ResponseBody::from_value(json!({"items": [1, 2]})));
        assert_eq!(ok_list(&wrapped), Some(vec![json!(1), json!(2)]));
    }
}
