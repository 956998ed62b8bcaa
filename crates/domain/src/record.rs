//! Festival records and categories.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Language used when the contributor leaves the field blank.
pub const DEFAULT_LANGUAGE: &str = "telugu";

/// Release-rights choices offered to contributors.
pub const RELEASE_RIGHTS: &[&str] = &[
    "CC BY-SA 4.0",
    "CC BY 4.0",
    "Public Domain (CC0)",
    "All rights reserved",
];

/// A record category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-side identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Parses a category from a JSON value, accepting numeric or numeric
    /// string ids.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = match value.get("id")? {
            Value::Number(n) => n.as_i64()?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        let name = value.get("name")?.as_str()?;
        Some(Self::new(id, name))
    }
}

/// Geographic point attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Location {
    /// Creates a location, rejecting out-of-range coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidLocation`] when latitude is outside
    /// ±90 or longitude outside ±180.
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidLocation(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidLocation(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A record as submitted by a contributor.
///
/// Built by the caller, serialized once and never kept after sending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Category identifier
    pub category_id: i64,
    /// Content language
    pub language: String,
    /// Release rights label
    pub release_rights: String,
    /// Optional location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl RecordDraft {
    /// Creates a draft with the default language and the first release-rights option.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, category_id: i64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category_id,
            language: DEFAULT_LANGUAGE.to_string(),
            release_rights: RELEASE_RIGHTS[0].to_string(),
            location: None,
        }
    }

    /// Sets the language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the release rights.
    #[must_use]
    pub fn with_release_rights(mut self, rights: impl Into<String>) -> Self {
        self.release_rights = rights.into();
        self
    }

    /// Sets the location.
    #[must_use]
    pub const fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Trims text fields, defaults a blank language and checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] when the title or description
    /// is blank.
    pub fn normalized(mut self) -> DomainResult<Self> {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.language = self.language.trim().to_string();

        if self.title.is_empty() {
            return Err(DomainError::MissingField("Title"));
        }
        if self.description.is_empty() {
            return Err(DomainError::MissingField("Description"));
        }
        if self.language.is_empty() {
            self.language = DEFAULT_LANGUAGE.to_string();
        }
        Ok(self)
    }

    /// Returns the wire payload as a JSON object.
    #[must_use]
    pub fn to_payload(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// A record as listed by the catalog.
///
/// Servers disagree on record shape, so only the title and description are
/// picked out; everything else stays in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Identifier, if the server sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordSummary {
    /// Creates a summary with no extra fields.
    #[must_use]
    pub fn new(id: Value, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            description: description.into(),
            extra: Map::new(),
        }
    }

    /// Parses a listed record; non-objects are rejected.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Case-insensitive substring match over title and description.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// The server's answer to a record creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedRecord {
    /// Identifier assigned by the server, if reported
    pub id: Option<Value>,
    /// Full response object
    pub body: Map<String, Value>,
}

impl CreatedRecord {
    /// Wraps a creation response, picking out `id`.
    #[must_use]
    pub fn from_body(body: Map<String, Value>) -> Self {
        let id = body.get("id").filter(|v| !v.is_null()).cloned();
        Self { id, body }
    }

    /// Returns the echoed title, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.body.get("title").and_then(Value::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_draft_payload_uses_snake_case_and_omits_missing_location() {
        let draft = RecordDraft::new("Bathukamma Procession", "Flowers", 1)
            .with_release_rights("creator");
        let payload = draft.to_payload();
        assert_eq!(payload.get("category_id"), Some(&json!(1)));
        assert_eq!(payload.get("release_rights"), Some(&json!("creator")));
        assert_eq!(payload.get("language"), Some(&json!("telugu")));
        assert!(!payload.contains_key("location"));
    }

    #[test]
    fn test_draft_payload_nests_location() {
        let draft = RecordDraft::new("t", "d", 2).with_location(Location::new(17.38, 78.48).unwrap());
        assert_eq!(
            draft.to_payload().get("location"),
            Some(&json!({"latitude": 17.38, "longitude": 78.48}))
        );
    }

    #[test]
    fn test_normalized_trims_and_requires_fields() {
        let draft = RecordDraft::new("  Bonalu ", " Pots ", 1).with_language("  ");
        let draft = draft.normalized().unwrap();
        assert_eq!(draft.title, "Bonalu");
        assert_eq!(draft.language, DEFAULT_LANGUAGE);

        let missing = RecordDraft::new("   ", "d", 1).normalized();
        assert_eq!(missing, Err(DomainError::MissingField("Title")));

        let missing = RecordDraft::new("t", "", 1).normalized();
        assert_eq!(missing, Err(DomainError::MissingField("Description")));
    }

    #[test]
    fn test_location_rejects_out_of_range() {
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(0.0, -180.5).is_err());
        assert!(Location::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_category_from_value() {
        assert_eq!(
            Category::from_value(&json!({"id": "3", "name": "Cuisine"})),
            Some(Category::new(3, "Cuisine"))
        );
        assert_eq!(Category::from_value(&json!({"name": "no id"})), None);
    }

    #[test]
    fn test_summary_keeps_unknown_fields() {
        let summary =
            RecordSummary::from_value(&json!({"id": 7, "title": "Ugadi", "month": "March"})).unwrap();
        assert_eq!(summary.id, Some(json!(7)));
        assert_eq!(summary.description, "");
        assert_eq!(summary.extra.get("month"), Some(&json!("March")));
        assert!(RecordSummary::from_value(&json!("Ugadi")).is_none());
    }

    #[test]
    fn test_summary_matches_case_insensitively() {
        let summary = RecordSummary::new(json!(1), "Bonalu", "Offerings to Mahankali");
        assert!(summary.matches("BONALU"));
        assert!(summary.matches("mahankali"));
        assert!(summary.matches(""));
        assert!(!summary.matches("ugadi"));
    }

    #[test]
    fn test_created_record_picks_id() {
        let Value::Object(body) = json!({"id": 42, "title": "Bonalu"}) else {
            unreachable!()
        };
        let created = CreatedRecord::from_body(body);
        assert_eq!(created.id, Some(json!(42)));
        assert_eq!(created.title(), Some("Bonalu"));
    }
}
