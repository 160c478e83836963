//! Error and warning types for indexing runs.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors, raised only before a run starts.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Root path does not exist.
    #[error("Root path not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The worker pool for parallel runs could not be created.
    #[error("Failed to build worker pool: {message}")]
    ThreadPool { message: String },
}

/// Failure reported by a path accessor for a single directory or file.
///
/// The engine never propagates these; each one becomes an empty listing or a
/// zero length, plus an optional [`WalkWarning`].
#[derive(Debug, Error)]
pub enum AccessError {
    /// The current user may not read the path.
    #[error("Permission denied: {path}")]
    AccessDenied { path: PathBuf },

    /// The path disappeared between listing and use.
    #[error("Vanished: {path}")]
    Vanished { path: PathBuf },

    /// The path is malformed or names the wrong kind of entry.
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Any other I/O failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AccessError {
    /// Create an access error with path context, classified by error kind.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            std::io::ErrorKind::NotFound => Self::Vanished { path },
            std::io::ErrorKind::InvalidInput | std::io::ErrorKind::NotADirectory => {
                Self::InvalidPath { path }
            }
            _ => Self::Io { path, source },
        }
    }

    /// Path the failure occurred at.
    pub fn path(&self) -> &Path {
        match self {
            Self::AccessDenied { path }
            | Self::Vanished { path }
            | Self::InvalidPath { path }
            | Self::Io { path, .. } => path,
        }
    }

    /// Warning category for this failure.
    pub fn kind(&self) -> WarningKind {
        match self {
            Self::AccessDenied { .. } => WarningKind::AccessDenied,
            Self::Vanished { .. } => WarningKind::Vanished,
            Self::InvalidPath { .. } => WarningKind::InvalidPath,
            Self::Io { .. } => WarningKind::ReadError,
        }
    }
}

/// Kind of walk warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    AccessDenied,
    /// Entry vanished while the walk was running.
    Vanished,
    /// Path was malformed.
    InvalidPath,
    /// Any other read error.
    ReadError,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AccessDenied => "access denied",
            Self::Vanished => "vanished",
            Self::InvalidPath => "invalid path",
            Self::ReadError => "read error",
        };
        f.write_str(label)
    }
}

/// Non-fatal warning emitted when a filesystem failure was contained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkWarning {
    /// Path where the failure occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Failure category.
    pub kind: WarningKind,
}

impl WalkWarning {
    /// Create a new walk warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }
}

impl From<&AccessError> for WalkWarning {
    fn from(err: &AccessError) -> Self {
        Self::new(err.path(), err.to_string(), err.kind())
    }
}

impl fmt::Display for WalkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path.display(), self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_io() {
        let err = AccessError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, AccessError::AccessDenied { .. }));
        assert_eq!(err.kind(), WarningKind::AccessDenied);

        let err = AccessError::io(
            "/test/gone",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, AccessError::Vanished { .. }));

        let err = AccessError::io("/test/other", std::io::Error::other("boom"));
        assert_eq!(err.kind(), WarningKind::ReadError);
        assert_eq!(err.path(), Path::new("/test/other"));
    }

    #[test]
    fn test_warning_from_access_error() {
        let err = AccessError::Vanished {
            path: PathBuf::from("/test/file.jpg"),
        };
        let warning = WalkWarning::from(&err);
        assert_eq!(warning.kind, WarningKind::Vanished);
        assert!(warning.to_string().contains("/test/file.jpg"));
        assert!(warning.to_string().contains("vanished"));
    }
}
