//! Error type shared by the provisioning operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while provisioning or re-pointing a fixture project.
///
/// Teardown never surfaces these; it logs them instead.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// The fixture source directory does not exist or is not a directory.
    #[error("Fixture source not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// Copying a file or directory failed.
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing a tracked path failed.
    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O error (temp dir creation, directory listing).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
