//! Request specification types

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::{Headers, HttpMethod, RequestBody};

/// A request relative to the API base URL.
///
/// This is what operations and endpoint candidates produce; the transport
/// turns it into an absolute [`RequestSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL
    pub path: String,
    /// Query parameters in order
    #[serde(default)]
    pub query: Vec<(String, String)>,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a GET request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Creates a POST request for `path` with `body`.
    #[must_use]
    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body,
        }
    }
}

/// Complete specification for an HTTP request, as handed to the client port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL including the query string
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
}

/// Joins a base URL and a path with exactly one `/` between them, then
/// appends `query` form-encoded.
///
/// Leading and trailing slashes of both segments are stripped first, so
/// `join_url("https://x/", "/records/", &[])` is `https://x/records`.
#[must_use]
pub fn join_url(base: &str, path: &str, query: &[(String, String)]) -> String {
    let base = base.trim_matches('/');
    let path = path.trim_matches('/');

    let mut url = if path.is_empty() {
        base.to_string()
    } else if base.is_empty() {
        path.to_string()
    } else {
        format!("{base}/{path}")
    };

    if !query.is_empty() {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }

    url
}
