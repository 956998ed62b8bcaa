//! HTTP Request body types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A file carried inside a multipart body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePart {
    /// Form field name (e.g. `file`)
    pub field: String,
    /// File name reported to the server
    pub filename: String,
    /// MIME type of the bytes
    pub mime_type: String,
    /// Raw content
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Multipart form data: text fields plus at most one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartForm {
    /// Text fields in insertion order
    pub fields: Vec<(String, String)>,
    /// Optional file part
    pub file: Option<FilePart>,
}

impl MultipartForm {
    /// Creates an empty multipart form.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            file: None,
        }
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Sets the file part.
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }
}

/// HTTP request body.
///
/// A request carries exactly one encoding, so JSON and form bodies can
/// never be combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document
    Json(Value),
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
    /// `multipart/form-data`
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns the content type if applicable.
    ///
    /// Multipart bodies return `None`: the boundary is chosen by the
    /// adapter that serializes them.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::Form(_) => Some("application/x-www-form-urlencoded"),
            Self::None | Self::Multipart(_) => None,
        }
    }

    /// Returns the top-level field names carried by this body.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::Json(Value::Object(map)) => map.keys().cloned().collect(),
            Self::Json(_) => Vec::new(),
            Self::Form(pairs) => pairs.iter().map(|(k, _)| k.clone()).collect(),
            Self::Multipart(form) => {
                let mut names: Vec<String> = form.fields.iter().map(|(k, _)| k.clone()).collect();
                if let Some(file) = &form.file {
                    names.push(file.field.clone());
                }
                names
            }
        }
    }
}
