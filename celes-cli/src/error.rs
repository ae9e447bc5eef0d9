//! Error handling for the celes CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while running a celes command.
#[derive(Error, Debug)]
pub enum CelesError {
    /// The project manifest does not exist.
    #[error("could not find {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// The project manifest did not parse; the rendered diagnostics are
    /// included verbatim.
    #[error("error parsing {}:\n{diagnostics}", .path.display())]
    ManifestParse {
        /// Path of the manifest.
        path: PathBuf,
        /// Rendered diagnostics, one per line.
        diagnostics: String,
    },

    /// The manifest parsed but has no `[Build]` `Name` entry.
    #[error("no program name specified ({} needs a Name key in its [Build] table)", .0.display())]
    MissingName(PathBuf),

    /// Logging setup failed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// File operations on project sources failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other manifest failure (unreadable file, invalid UTF-8).
    #[error(transparent)]
    Toml(#[from] celes_toml::TomlError),
}

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CelesError>;
