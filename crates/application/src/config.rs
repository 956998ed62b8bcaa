//! Client configuration
//!
//! A [`ClientConfig`] is an explicit value handed to the client at
//! construction, so two clients with different modes can live side by
//! side. [`ClientConfig::resolve`] layers the sources:
//! built-in defaults, then the settings file, then the environment.

use std::time::Duration;

use sambharalu_domain::ClientSettings;

/// API used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "https://api.corpus.swecha.org";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// OTP code accepted in demo mode unless overridden.
pub const DEFAULT_DEMO_OTP: &str = "123456";

/// Environment variable switching demo mode.
pub const ENV_DEMO_MODE: &str = "DEMO_MODE";
/// Environment variable holding the API base URL.
pub const ENV_API_BASE: &str = "API_BASE";
/// Environment variable holding a token to start with.
pub const ENV_API_TOKEN: &str = "API_TOKEN";

const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Demo-mode behavior that differs between product variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    /// OTP code that verifies a signup
    pub otp_code: String,
    /// Only return a profile once a token is set
    pub profile_requires_token: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            otp_code: DEFAULT_DEMO_OTP.to_string(),
            profile_requires_token: true,
        }
    }
}

/// Everything a client needs to know before its first request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Serve every operation from canned data
    pub demo_mode: bool,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Token to seed the session with
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Demo-mode constants
    pub demo: DemoSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            demo_mode: true,
            base_url: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            demo: DemoSettings::default(),
        }
    }
}

impl ClientConfig {
    /// Offline configuration.
    #[must_use]
    pub fn demo() -> Self {
        Self::default()
    }

    /// Live configuration against `base_url`.
    #[must_use]
    pub fn live(base_url: &str) -> Self {
        Self {
            demo_mode: false,
            base_url: normalize_base(base_url),
            ..Self::default()
        }
    }

    /// Switches between demo and live mode.
    #[must_use]
    pub const fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }

    /// Sets the base URL; a trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base(base_url);
        self
    }

    /// Sets the seed token; blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = non_blank(token.into());
        self
    }

    /// Sets the timeout, clamped to at least one second.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    /// Layers the settings file and then the environment over the defaults.
    ///
    /// `env` looks up a variable by name; pass `|k| std::env::var(k).ok()`
    /// for the process environment.
    #[must_use]
    pub fn resolve<F>(settings: Option<&ClientSettings>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(settings) = settings {
            config.apply_settings(settings);
        }

        if let Some(flag) = env(ENV_DEMO_MODE) {
            config.demo_mode = is_truthy(&flag);
        }
        if let Some(base) = env(ENV_API_BASE).and_then(non_blank) {
            config.base_url = base;
        }
        if let Some(token) = env(ENV_API_TOKEN).and_then(non_blank) {
            config.token = Some(token);
        }

        config.base_url = normalize_base(&config.base_url);
        config.timeout = config.timeout.max(MIN_TIMEOUT);
        config
    }

    fn apply_settings(&mut self, settings: &ClientSettings) {
        if let Some(demo_mode) = settings.demo_mode {
            self.demo_mode = demo_mode;
        }
        if let Some(base) = settings.api_base.clone().and_then(non_blank) {
            self.base_url = base;
        }
        if let Some(token) = settings.api_token.clone().and_then(non_blank) {
            self.token = Some(token);
        }
        if let Some(secs) = settings.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(otp) = settings.demo_otp.clone().and_then(non_blank) {
            self.demo.otp_code = otp;
        }
        if let Some(strict) = settings.demo_profile_requires_token {
            self.demo.profile_requires_token = strict;
        }
    }
}

/// Returns true for `1`, `true`, `yes` and `on`, ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::resolve(None, env_of(&[]));
        assert!(config.demo_mode);
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.demo.otp_code, "123456");
        assert!(config.demo.profile_requires_token);
    }

    #[test]
    fn test_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "On"] {
            assert!(is_truthy(value), "{value}");
        }
        for value in ["0", "false", "", "enabled", "y"] {
            assert!(!is_truthy(value), "{value}");
        }
    }

    #[test]
    fn test_environment_overrides_settings() {
        let settings = ClientSettings {
            demo_mode: Some(true),
            api_base: Some("https://settings.example.org".into()),
            api_token: Some("from-file".into()),
            ..ClientSettings::default()
        };
        let env = env_of(&[
            ("DEMO_MODE", "off"),
            ("API_BASE", "https://env.example.org//"),
            ("API_TOKEN", "from-env"),
        ]);

        let config = ClientConfig::resolve(Some(&settings), env);
        assert!(!config.demo_mode);
        assert_eq!(config.base_url, "https://env.example.org");
        assert_eq!(config.token.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_settings_override_defaults_and_blank_env_is_ignored() {
        let settings = ClientSettings {
            demo_mode: Some(false),
            api_base: Some("https://settings.example.org/".into()),
            timeout_secs: Some(0),
            demo_otp: Some("000000".into()),
            demo_profile_requires_token: Some(false),
            ..ClientSettings::default()
        };
        let env = env_of(&[("API_BASE", "   "), ("API_TOKEN", "")]);

        let config = ClientConfig::resolve(Some(&settings), env);
        assert!(!config.demo_mode);
        assert_eq!(config.base_url, "https://settings.example.org");
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.demo.otp_code, "000000");
        assert!(!config.demo.profile_requires_token);
    }

    #[test]
    fn test_programmatic_constructors() {
        let live = ClientConfig::live("http://localhost:8000/").with_token("  ");
        assert!(!live.demo_mode);
        assert_eq!(live.base_url, "http://localhost:8000");
        assert_eq!(live.token, None);

        let demo = ClientConfig::demo().with_timeout(Duration::from_millis(10));
        assert!(demo.demo_mode);
        assert_eq!(demo.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides_on_a_resolved_config() {
        let config = ClientConfig::demo()
            .with_demo_mode(false)
            .with_base_url(" https://api.example.org/ ");
        assert!(!config.demo_mode);
        assert_eq!(config.base_url, "https://api.example.org");
    }
}
