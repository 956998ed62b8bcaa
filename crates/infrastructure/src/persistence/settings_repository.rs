//! Client settings persistence.
//!
//! Settings live in the platform-specific config directory:
//! - Linux: ~/.config/sambharalu/settings.json
//! - macOS: ~/Library/Application Support/sambharalu/settings.json
//! - Windows: %APPDATA%/sambharalu/settings.json
//!
//! The file is optional. A missing file means "no overrides".

use std::path::{Path, PathBuf};

use sambharalu_domain::ClientSettings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_pretty};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Invalid settings file {path}: {source}")]
    Serialization {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: SerializationError,
    },

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Reads and writes one settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    /// Creates a repository for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository for the default settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoConfigDir`] when the platform has no
    /// config directory.
    pub fn default_location() -> Result<Self, SettingsError> {
        Self::default_path().map(Self::new).ok_or(SettingsError::NoConfigDir)
    }

    /// Returns the default settings path, if the platform has a config
    /// directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sambharalu").join("settings.json"))
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Option<ClientSettings>, SettingsError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file");
                return Ok(None);
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let settings = from_json_bytes(&content).map_err(|source| SettingsError::Serialization {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(settings))
    }

    /// Writes `settings`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let io_error = |source: std::io::Error| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let content = to_json_pretty(settings).map_err(|source| SettingsError::Serialization {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).await.map_err(io_error)?;

        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
