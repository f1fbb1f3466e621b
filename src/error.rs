//! Error types for droidsync operations.
//!
//! This module defines [`DroidsyncError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Detection never produces errors: missing build files read as empty text
//! - Template sync isolates per-file failures into progress events
//! - Scaffold generation fails before any write when its inputs are missing
//! - Use `anyhow::Error` (via `DroidsyncError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for droidsync operations.
#[derive(Debug, Error)]
pub enum DroidsyncError {
    /// A required argument is missing or malformed.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A sync request selected nothing that can be processed.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// No workspace is registered under the given id.
    #[error("Workspace not found: {id}")]
    WorkspaceNotFound { id: String },

    /// None of the candidate template roots exist.
    #[error("Template directory not found (searched: {searched})")]
    TemplateRootNotFound { searched: String },

    /// A required template asset is absent.
    #[error("Templates not found: {message}")]
    TemplatesNotFound { message: String },

    /// Sync mode string is not one of `missing`, `all`, `single`.
    #[error("Unsupported sync mode: {mode}")]
    UnsupportedSyncMode { mode: String },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The persisted workspace document could not be written.
    #[error("Store error at {path}: {message}")]
    Store { path: PathBuf, message: String },

    /// A scaffold template failed to render.
    #[error("Failed to render template '{template}': {message}")]
    Render { template: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DroidsyncError {
    /// Shorthand for [`DroidsyncError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for droidsync operations.
pub type Result<T> = std::result::Result<T, DroidsyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_displays_message() {
        let err = DroidsyncError::invalid_input("package name is required");
        assert!(err.to_string().contains("package name is required"));
    }

    #[test]
    fn workspace_not_found_displays_id() {
        let err = DroidsyncError::WorkspaceNotFound { id: "abc123".into() };
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn template_root_not_found_lists_locations() {
        let err = DroidsyncError::TemplateRootNotFound {
            searched: "/a/templates, /b/templates".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/a/templates"));
        assert!(msg.contains("/b/templates"));
    }

    #[test]
    fn unsupported_mode_displays_mode() {
        let err = DroidsyncError::UnsupportedSyncMode {
            mode: "some".into(),
        };
        assert!(err.to_string().contains("some"));
    }

    #[test]
    fn render_error_displays_template_and_message() {
        let err = DroidsyncError::Render {
            template: "app/build.gradle.kts.hbs".into(),
            message: "unclosed block".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("app/build.gradle.kts.hbs"));
        assert!(msg.contains("unclosed block"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DroidsyncError = io_err.into();
        assert!(matches!(err, DroidsyncError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(DroidsyncError::InvalidRequest {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
