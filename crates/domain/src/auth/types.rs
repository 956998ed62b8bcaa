//! Authentication result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names under which servers return an access token.
pub const TOKEN_ALIASES: &[&str] = &["access_token", "token", "jwt", "access", "key"];

/// Finds a non-empty access token in a login response.
///
/// Looks at [`TOKEN_ALIASES`] on the object itself, then inside a nested
/// `data` object.
#[must_use]
pub fn extract_access_token(body: &Map<String, Value>) -> Option<String> {
    let direct = |map: &Map<String, Value>| {
        TOKEN_ALIASES.iter().find_map(|alias| {
            map.get(*alias)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
        })
    };

    direct(body).or_else(|| body.get("data").and_then(Value::as_object).and_then(direct))
}

/// Profile of the signed-in user.
///
/// Servers disagree on the profile shape, so the raw object is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    /// Wraps a profile object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        ["full_name", "name", "username"]
            .iter()
            .find_map(|key| {
                self.0
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|name| !name.trim().is_empty())
            })
            .unwrap_or("User")
    }

    /// Returns a profile field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// A successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Bearer token to use on later requests
    pub access_token: String,
    /// Profile, when the login response carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl AccessGrant {
    /// Builds a grant from a login response, if it carries a token.
    #[must_use]
    pub fn from_body(body: &Map<String, Value>) -> Option<Self> {
        let access_token = extract_access_token(body)?;
        let user = body
            .get("user")
            .and_then(Value::as_object)
            .cloned()
            .map(UserProfile::new);
        Some(Self { access_token, user })
    }
}
