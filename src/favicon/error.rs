//! Favicon error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or serving the icon
#[derive(Debug, Error)]
pub enum FaviconError {
    /// Missing or malformed configuration
    #[error("{0}")]
    Config(String),

    /// Configured path does not exist
    #[error("ENOENT, no such file or directory '{}'", path.display())]
    NotFound { path: PathBuf },

    /// Configured path is a directory
    #[error("EISDIR, illegal operation on directory '{}'", path.display())]
    IsDirectory { path: PathBuf },

    /// Reading the icon failed
    #[error("failed to read icon '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FaviconError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the underlying cause is a missing file
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Read { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::Config(_) | Self::IsDirectory { .. } => false,
        }
    }
}
