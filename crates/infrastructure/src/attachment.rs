//! Attachment loading.
//!
//! Reads a file from disk into an [`Attachment`], naming it after the
//! file and guessing its MIME type from the extension.

use std::path::Path;

use sambharalu_domain::Attachment;

/// Error type for attachment loading.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Requested path.
        path: String,
    },

    /// Failed to read file.
    #[error("Failed to read file: {message}")]
    FileReadError {
        /// Path and cause.
        message: String,
    },

    /// Path is not a regular file.
    #[error("Not a file: {path}")]
    NotAFile {
        /// Requested path.
        path: String,
    },
}

/// Reads `path` into an attachment.
///
/// Files with an unknown extension are sent as
/// `application/octet-stream`.
///
/// # Errors
///
/// Returns an error if the path is missing, is a directory, or cannot be
/// read.
pub async fn load_attachment(path: &Path) -> Result<Attachment, AttachmentError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AttachmentError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            AttachmentError::FileReadError {
                message: format!("{}: {e}", path.display()),
            }
        }
    })?;
    if !metadata.is_file() {
        return Err(AttachmentError::NotAFile {
            path: path.display().to_string(),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AttachmentError::FileReadError {
            message: format!("{}: {e}", path.display()),
        })?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let mime_type = mime_guess::from_path(path)
        .first_or(mime::APPLICATION_OCTET_STREAM)
        .to_string();

    Ok(Attachment::new(filename, mime_type, bytes))
}
