//! Endpoint candidates: guesses about where and how an operation is served.
//!
//! The remote API's exact routes are not known up front, so each operation
//! carries an ordered list of candidates. A candidate names a path and a
//! payload shape; the shape renames the operation's logical fields to the
//! wire names that particular guess expects.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::request::{ApiRequest, HttpMethod, RequestBody};

/// How a candidate encodes the operation's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    /// Values are not sent.
    None,
    /// JSON body
    Json,
    /// URL-encoded form body
    Form,
    /// Query string parameters
    Query,
}

impl PayloadEncoding {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Form => "form",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a payload: encoding, field renames and fixed extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadShape {
    /// Encoding of the rendered values
    pub encoding: PayloadEncoding,
    /// `(logical name, wire name)` renames; unlisted fields keep their name
    pub aliases: &'static [(&'static str, &'static str)],
    /// `(wire name, literal)` pairs appended to every rendering
    pub extras: &'static [(&'static str, &'static str)],
}

impl PayloadShape {
    /// Shape that sends nothing.
    pub const NONE: Self = Self {
        encoding: PayloadEncoding::None,
        aliases: &[],
        extras: &[],
    };

    /// JSON body with the given renames.
    #[must_use]
    pub const fn json(aliases: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            encoding: PayloadEncoding::Json,
            aliases,
            extras: &[],
        }
    }

    /// Form body with the given renames and extras.
    #[must_use]
    pub const fn form(
        aliases: &'static [(&'static str, &'static str)],
        extras: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            encoding: PayloadEncoding::Form,
            aliases,
            extras,
        }
    }

    /// Query string with the given renames.
    #[must_use]
    pub const fn query(aliases: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            encoding: PayloadEncoding::Query,
            aliases,
            extras: &[],
        }
    }

    /// Returns the wire name for a logical field.
    #[must_use]
    pub fn wire_name<'a>(&self, field: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(logical, _)| *logical == field)
            .map_or(field, |(_, wire)| *wire)
    }

    /// Renders `values` into a body and query parameters.
    #[must_use]
    pub fn render(&self, values: &Map<String, Value>) -> (RequestBody, Vec<(String, String)>) {
        match self.encoding {
            PayloadEncoding::None => (RequestBody::None, Vec::new()),
            PayloadEncoding::Json => {
                let mut object = Map::new();
                for (field, value) in values {
                    object.insert(self.wire_name(field).to_string(), value.clone());
                }
                for (wire, literal) in self.extras {
                    object.insert((*wire).to_string(), Value::String((*literal).to_string()));
                }
                (RequestBody::Json(Value::Object(object)), Vec::new())
            }
            PayloadEncoding::Form => (RequestBody::Form(self.pairs(values)), Vec::new()),
            PayloadEncoding::Query => (RequestBody::None, self.pairs(values)),
        }
    }

    fn pairs(&self, values: &Map<String, Value>) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = values
            .iter()
            .filter_map(|(field, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((self.wire_name(field).to_string(), text))
            })
            .collect();
        pairs.extend(
            self.extras
                .iter()
                .map(|(wire, literal)| ((*wire).to_string(), (*literal).to_string())),
        );
        pairs
    }
}

/// One guess at where an operation lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointCandidate {
    /// Path relative to the API base URL
    pub path: &'static str,
    /// Payload shape expected at that path
    pub shape: PayloadShape,
}

impl EndpointCandidate {
    /// Creates a candidate.
    #[must_use]
    pub const fn new(path: &'static str, shape: PayloadShape) -> Self {
        Self { path, shape }
    }

    /// Creates a candidate that sends no payload.
    #[must_use]
    pub const fn bare(path: &'static str) -> Self {
        Self {
            path,
            shape: PayloadShape::NONE,
        }
    }

    /// Builds the concrete request for this candidate.
    #[must_use]
    pub fn to_request(&self, method: HttpMethod, values: &Map<String, Value>) -> ApiRequest {
        let (body, query) = self.shape.render(values);
        ApiRequest {
            method,
            path: self.path.to_string(),
            query,
            body,
        }
    }
}
