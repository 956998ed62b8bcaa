//! Decoded response bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A response body, decoded once and tagged by shape.
///
/// Downstream code matches on the variant instead of re-inspecting JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResponseBody {
    /// JSON object
    JsonObject(Map<String, Value>),
    /// JSON array
    JsonArray(Vec<Value>),
    /// Any other JSON value (string, number, bool, null)
    JsonScalar(Value),
    /// Non-JSON text
    Text(String),
    /// The request never received an answer.
    TransportFailure {
        /// Error reported by the client
        error: String,
        /// URL that was attempted
        url: String,
    },
}

impl ResponseBody {
    /// Decodes `bytes` as JSON only if `content_type` declares
    /// `application/json`; anything else, or JSON that fails to parse, is
    /// kept as text.
    #[must_use]
    pub fn decode(content_type: Option<&str>, bytes: &[u8]) -> Self {
        let is_json = content_type
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

        if is_json {
            if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
                return Self::from_value(value);
            }
        }

        Self::Text(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Wraps an already parsed JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::JsonObject(map),
            Value::Array(items) => Self::JsonArray(items),
            other => Self::JsonScalar(other),
        }
    }

    /// Returns the object if this is a JSON object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::JsonObject(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the list carried by this body: a top-level array, or an
    /// array under `items`, `results` or `data`.
    #[must_use]
    pub fn list_items(&self) -> Option<&[Value]> {
        match self {
            Self::JsonArray(items) => Some(items.as_slice()),
            Self::JsonObject(map) => ["items", "results", "data"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array))
                .map(Vec::as_slice),
            _ => None,
        }
    }

    /// Converts back into a JSON value, for diagnostics and callers that
    /// want the raw payload.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::JsonObject(map) => Value::Object(map.clone()),
            Self::JsonArray(items) => Value::Array(items.clone()),
            Self::JsonScalar(value) => value.clone(),
            Self::Text(text) => Value::String(text.clone()),
            Self::TransportFailure { error, url } => {
                serde_json::json!({ "error": error, "url": url })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_content_type_decodes_object() {
        let body = ResponseBody::decode(Some("application/json"), br#"{"token":"t"}"#);
        assert_eq!(body.as_object().and_then(|o| o.get("token")), Some(&json!("t")));
    }

    #[test]
    fn test_json_bytes_without_json_content_type_stay_text() {
        let body = ResponseBody::decode(Some("text/html"), br#"{"token":"t"}"#);
        assert_eq!(body, ResponseBody::Text(r#"{"token":"t"}"#.to_string()));

        let body = ResponseBody::decode(None, b"[1,2]");
        assert_eq!(body, ResponseBody::Text("[1,2]".to_string()));
    }

    #[test]
    fn test_invalid_json_falls_back_to_text() {
        let body = ResponseBody::decode(Some("application/json"), b"<html>502</html>");
        assert_eq!(body, ResponseBody::Text("<html>502</html>".to_string()));
    }

    #[test]
    fn test_scalar_and_array() {
        assert_eq!(
            ResponseBody::decode(Some("application/json"), b"\"ok\""),
            ResponseBody::JsonScalar(json!("ok"))
        );
        let body = ResponseBody::decode(Some("application/json"), b"[1,2]");
        assert_eq!(body, ResponseBody::JsonArray(vec![json!(1), json!(2)]));
    }

    #[test]
    fn test_list_items_accepts_wrapped_lists() {
        let wrapped = ResponseBody::from_value(json!({"results": [{"id": 1}], "count": 1}));
        assert_eq!(wrapped.list_items().map(<[Value]>::len), Some(1));

        let bare = ResponseBody::from_value(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(bare.list_items().map(<[Value]>::len), Some(2));

        let neither = ResponseBody::from_value(json!({"count": 0}));
        assert!(neither.list_items().is_none());
    }

    #[test]
    fn test_transport_failure_to_value() {
        let body = ResponseBody::TransportFailure {
            error: "timed out".into(),
            url: "http://x/me".into(),
        };
        assert_eq!(body.to_value(), json!({"error": "timed out", "url": "http://x/me"}));
    }
}
