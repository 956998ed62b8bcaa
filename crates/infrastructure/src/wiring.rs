//! Client construction from the settings file and the process environment.

use std::path::Path;
use std::sync::Arc;

use sambharalu_application::{ClientConfig, FestivalClient, HttpClientError};
use sambharalu_domain::DomainError;
use tracing::{debug, warn};

use crate::adapters::{ReqwestHttpClient, SystemClock};
use crate::persistence::SettingsRepository;

/// Error type for client construction.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] DomainError),

    /// The HTTP client could not be created.
    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] HttpClientError),
}

/// Resolves the client configuration.
///
/// Reads the settings file at `settings_path`, or the default location when
/// `None`, then layers the process environment on top. An unreadable
/// settings file is logged and skipped.
pub async fn load_client_config(settings_path: Option<&Path>) -> ClientConfig {
    let repository = match settings_path {
        Some(path) => Some(SettingsRepository::new(path)),
        None => SettingsRepository::default_location()
            .inspect_err(|e| debug!(error = %e, "no default settings location"))
            .ok(),
    };

    let settings = match repository {
        Some(repository) => match repository.load().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "ignoring settings file");
                None
            }
        },
        None => None,
    };

    ClientConfig::resolve(settings.as_ref(), |key| std::env::var(key).ok())
}

/// Builds a client backed by reqwest and the system clock.
///
/// # Errors
///
/// Returns an error if a live configuration has an unparseable base URL or
/// the HTTP client cannot be created.
pub fn build_client(config: ClientConfig) -> Result<FestivalClient, WiringError> {
    if !config.demo_mode {
        url::Url::parse(&config.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
    }

    let http = ReqwestHttpClient::new()?;
    debug!(demo = config.demo_mode, base = %config.base_url, "client ready");
    Ok(FestivalClient::new(
        config,
        Arc::new(http),
        Arc::new(SystemClock::new()),
    ))
}
