//! Response specification types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ResponseBody;
use crate::request::Headers;

/// Raw HTTP response as returned by the client port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Undecoded response body
    #[serde(skip)]
    pub body: Vec<u8>,
    /// Response time
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: u16, headers: Headers, body: Vec<u8>, duration: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// Returns the declared `Content-Type`, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    /// Decodes the body according to its declared content type.
    #[must_use]
    pub fn decode(&self) -> ApiResponse {
        ApiResponse {
            status: self.status,
            body: ResponseBody::decode(self.content_type(), &self.body),
        }
    }
}

/// A response with its body decoded once at the transport boundary.
///
/// Status `0` means no answer was received; the body is then
/// [`ResponseBody::TransportFailure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code, or `0` when the request never got an answer
    pub status: u16,
    /// Decoded body
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Creates a decoded response.
    #[must_use]
    pub const fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// Creates the status-0 response used for transport failures.
    #[must_use]
    pub fn transport_failure(error: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            status: 0,
            body: ResponseBody::TransportFailure {
                error: error.into(),
                url: url.into(),
            },
        }
    }

    /// Returns true for 200 and 201.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Returns true for 401 and 403.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Returns true when the endpoint is absent or unreachable (0, 404, 405).
    #[must_use]
    pub const fn is_not_found_class(&self) -> bool {
        matches!(self.status, 0 | 404 | 405)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
