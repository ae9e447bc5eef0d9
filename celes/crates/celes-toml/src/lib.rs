//! celes-toml - TOML configuration reader for the celes toolchain.
//!
//! A small, diagnostic-oriented TOML parser built on the [`celes_lex`]
//! base lexer. It recognizes the subset of TOML the toolchain needs for
//! project manifests: comments, dotted keys, `[table]` and `[[table]]`
//! headers, booleans, basic/literal/multi-line strings, and integers and
//! floats in all four bases with underscore groupings. Inline arrays and
//! tables, Unicode escapes, `inf`/`nan` and date-times are rejected with a
//! diagnostic rather than misparsed.
//!
//! # Example
//!
//! ```
//! let root = celes_toml::parse_str(
//!     "Project.toml",
//!     "[Build]\nName = \"demo\"\nJobs = 4\n",
//! )
//! .unwrap();
//!
//! assert_eq!(root.section_string("Build", "Name"), Some("demo"));
//! assert_eq!(root.section_int("Build", "Jobs"), Some(4));
//! ```

mod error;
mod parser;
mod value;

use std::io;
use std::path::Path;

use parser::TomlParser;

pub use error::TomlError;
pub use value::{TomlArray, TomlTable, TomlType, TomlValue};

/// Parse TOML text into its root table.
///
/// `file_name` is only used to label diagnostics. On failure the returned
/// [`TomlError::Parse`] carries every diagnostic recorded up to the first
/// hard error, positioned at the offending token.
pub fn parse_str(file_name: &str, source: &str) -> Result<TomlTable, TomlError> {
    let mut parser = TomlParser::new(file_name, source);
    match parser.parse_document() {
        Ok(()) => Ok(parser.into_root()),
        Err(_) => Err(TomlError::Parse(parser.into_diagnostics())),
    }
}

/// Read and parse a TOML file.
///
/// A missing file is reported as [`TomlError::FileNotFound`] so callers
/// can distinguish "no manifest" from "broken manifest". An empty file
/// yields an empty root table.
pub fn open(path: impl AsRef<Path>) -> Result<TomlTable, TomlError> {
    let path = path.as_ref();

    let source = match celes_util::read_utf8_file(path) {
        Ok(source) => source,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(TomlError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => {
            return Err(TomlError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    parse_str(&path.to_string_lossy(), &source)
}
