//! Error types for scanning operations.
//!
//! Failures come in two tiers: fatal [`ScanError`]s abort the scan and
//! produce no tree; soft [`ScanWarning`]s degrade a single node (size 0,
//! marked inaccessible or childless) and are accumulated alongside the tree.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for the root path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Root path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error on the root path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan was cancelled by the caller.
    #[error("Scan cancelled")]
    Cancelled,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl ScanError {
    /// Create an I/O error with path context, mapping the common kinds to
    /// their dedicated variants.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of soft error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// A directory's contents could not be listed.
    ReadDir,
    /// Metadata (size, type) could not be read.
    Metadata,
    /// A symlink target could not be resolved.
    DanglingSymlink,
    /// Size aggregation overflowed and was saturated.
    SizeOverflow,
}

/// Non-fatal, per-node failure recorded during a scan.
///
/// The node the warning refers to stays in the tree with size 0; the scan as
/// a whole still succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the failure occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of failure.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for an unlistable directory.
    pub fn read_dir(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        let kind = if error.kind() == std::io::ErrorKind::PermissionDenied {
            WarningKind::PermissionDenied
        } else {
            WarningKind::ReadDir
        };
        Self {
            message: format!("Cannot list {}: {error}", path.display()),
            path,
            kind,
        }
    }

    /// Create a warning for an unreadable metadata query.
    pub fn metadata(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot stat {}: {error}", path.display()),
            path,
            kind: WarningKind::Metadata,
        }
    }

    /// Create a warning for a symlink whose target cannot be resolved.
    pub fn dangling_symlink(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Dangling symlink {}: {error}", path.display()),
            path,
            kind: WarningKind::DanglingSymlink,
        }
    }

    /// Create a warning for a saturated size aggregation.
    pub fn size_overflow(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Size aggregation overflowed at {}", path.display()),
            path,
            kind: WarningKind::SizeOverflow,
        }
    }
}
