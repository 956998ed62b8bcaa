//! Client session state.

use serde::{Deserialize, Serialize};

/// Credential and mode state owned by a single client.
///
/// The token is only ever changed through [`Session::set_token`]; a
/// session never logs out on its own, dropping it is the logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    base_url: String,
    demo_mode: bool,
}

impl Session {
    /// Creates a session. Trailing slashes are stripped from `base_url`
    /// and a blank token counts as no token.
    #[must_use]
    pub fn new(base_url: &str, demo_mode: bool, token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            demo_mode,
        }
    }

    /// Returns the bearer token, if one is set.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true when all operations are served from canned data.
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        self.demo_mode
    }

    /// Returns true if a token is set.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replaces the token. A blank token clears it.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into()).filter(|t| !t.trim().is_empty());
    }

    /// Returns the `Authorization` header value for the current token.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }
}
