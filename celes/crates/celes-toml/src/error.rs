//! Error types for the TOML reader.

use std::io;
use std::path::PathBuf;

use celes_util::Diagnostics;
use thiserror::Error;

/// Failure of [`open`](crate::open) or [`parse_str`](crate::parse_str).
///
/// A missing file is deliberately distinct from a parse failure so that
/// callers can treat an absent config as "use defaults" while still
/// failing loudly on a broken one.
#[derive(Error, Debug)]
pub enum TomlError {
    /// The file does not exist.
    #[error("file not found: {}", .path.display())]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be read (permissions, invalid UTF-8).
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The input was read but did not parse; the first diagnostic carries
    /// the offending row and column.
    #[error("{0}")]
    Parse(Diagnostics),
}

impl TomlError {
    /// The diagnostics of a parse failure, if this is one.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            TomlError::Parse(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }
}

/// Internal parse status. Every parser entry point returns one of these on
/// failure, after appending a positioned diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParseError {
    /// Input ended where more was required.
    Eof,
    /// A newline interrupted a construct that must stay on one line.
    Eol,
    /// A character that cannot start or continue the construct.
    UnexpectedText,
    /// A recognized TOML construct this parser does not support.
    Unimplemented,
    /// A dotted path crossed or collided with an incompatible entry.
    InvalidIdentifier,
    /// The terminal key of an assignment is already present.
    KeyAlreadyExists,
}
