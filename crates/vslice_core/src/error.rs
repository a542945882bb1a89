//! Error types for the core module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while writing a scaffold.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Anchor '{anchor}' not found in manifest {path}")]
    AnchorNotFound { anchor: String, path: PathBuf },

    #[error("Anchor '{anchor}' appears on {count} lines of manifest {path}; it must be unique")]
    DuplicateAnchor {
        anchor: String,
        path: PathBuf,
        count: usize,
    },

    #[error("Generated {section} line '{fragment}' contains anchor '{anchor}'")]
    FragmentContainsAnchor {
        anchor: String,
        section: String,
        fragment: String,
    },

    #[error("Path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error at {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] vslice_templates::TemplateError),
}

impl CoreError {
    /// Whether the error is a violated manifest precondition.
    pub fn is_manifest_precondition(&self) -> bool {
        matches!(
            self,
            CoreError::ManifestNotFound(_)
                | CoreError::AnchorNotFound { .. }
                | CoreError::DuplicateAnchor { .. }
                | CoreError::FragmentContainsAnchor { .. }
        )
    }

    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoreError::FileIo {
            path: path.into(),
            source,
        }
    }
}
