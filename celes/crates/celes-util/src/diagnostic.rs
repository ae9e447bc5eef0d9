//! Diagnostic reporting infrastructure.
//!
//! Parsers in this workspace never panic on bad input; they append
//! positioned [`Diagnostic`] records to a [`Diagnostics`] list and bail out
//! through their result types. The list can be rendered into a single
//! string for display, one `file (row, col): message` line per record.

use std::fmt;

/// Diagnostic severity level.
///
/// # Examples
///
/// ```
/// use celes_util::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert_eq!(format!("{}", Level::Warning), "warning");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A hard failure; the input cannot be used.
    Error,
    /// A suspicious construct that does not abort processing.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single positioned diagnostic record.
///
/// `row` and `col` are 1-based and point at the first character of the
/// offending token. All strings are owned copies; a diagnostic never
/// borrows from the source buffer it was produced from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the file (or pseudo-file) the diagnostic refers to.
    pub file: String,
    /// 1-based row of the offending token.
    pub row: u32,
    /// 1-based column of the offending token.
    pub col: u32,
    /// Severity.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
}

/// An append-only list of diagnostics.
///
/// # Examples
///
/// ```
/// use celes_util::{Diagnostics, Level};
///
/// let mut diags = Diagnostics::new();
/// diags.add("test.toml", 3, 7, Level::Error, "Unexpected text");
///
/// assert!(diags.has_errors());
/// assert_eq!(diags.to_string(), "test.toml (3, 7): Unexpected text\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic.
    pub fn add(
        &mut self,
        file: impl Into<String>,
        row: u32,
        col: u32,
        level: Level,
        message: impl Into<String>,
    ) {
        self.items.push(Diagnostic {
            file: file.into(),
            row,
            col,
            level,
            message: message.into(),
        });
    }

    /// Append a pre-built diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Number of diagnostics of the given level.
    pub fn count_of(&self, level: Level) -> usize {
        self.items.iter().filter(|d| d.level == level).count()
    }

    /// True if any error-level diagnostic has been recorded.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.level == Level::Error)
    }

    /// Total number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no diagnostics have been recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the recorded diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{} ({}, {}): {}", item.file, item.row, item.col, item.message)?;
        }
        Ok(())
    }
}
