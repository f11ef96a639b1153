//! Error types for `dbox-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Configuration variants are fatal at startup; everything else is surfaced
/// to the user as a transient message and never stops the event loop.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A required credential is absent from the environment.
    #[error("{0} environment variable is required")]
    MissingCredential(&'static str),

    /// A remote path cannot be mapped under the local download root.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A remote store operation failed.
    #[error("remote error: {0}")]
    Remote(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Returns `true` for errors that must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingCredential(_) | Self::ConfigParse(_))
    }
}

/// Convenience alias used throughout `dbox-core`.
pub type CoreResult<T> = Result<T, CoreError>;
