//! Client settings file model
//!
//! Optional overrides read from the settings file. Every field may be
//! absent; absent fields leave the built-in default (or the environment)
//! in charge.

use serde::{Deserialize, Serialize};

/// Contents of the optional settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Serve every operation from canned data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<bool>,

    /// Base URL of the records API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Token to start the session with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// OTP code accepted in demo mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_otp: Option<String>,

    /// Whether demo mode only returns a profile after login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_profile_requires_token: Option<bool>,
}
