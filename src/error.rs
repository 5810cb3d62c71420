use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a single yaclum command.
///
/// Everything except [`YaclumError::Io`] is an expected condition:
/// the CLI prints it and exits normally.
#[derive(Debug, Error)]
pub enum YaclumError {
    #[error("Root folder is not set. Use '--set-root <path>' to set it.")]
    RootNotSet,

    #[error("Root folder '{}' does not exist.", .0.display())]
    RootMissing(PathBuf),

    #[error("Source file does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The sidecar file exists but could not be parsed.
    /// Nothing gets written so the original content can still be recovered by hand.
    #[error("Failed to parse metadata file {}: {source}", .path.display())]
    MalformedMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config file exists but could not be parsed.
    #[error("Failed to parse config file {}: {source}", .path.display())]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl YaclumError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the conditions the CLI reports without failing the process.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, YaclumError>;
