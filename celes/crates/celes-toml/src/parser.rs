//! The recursive-descent TOML parser.
//!
//! The parser drives the base lexer with one-token lookahead (and the
//! occasional raw byte lookahead to tell `"` from `"""` and `0` from
//! `0x`). Grammar recognized:
//!
//! ```text
//! document     = { comment | table-header | key-pair }
//! comment      = "#" … newline
//! table-header = "[" dotted-key "]" | "[[" dotted-key "]]"
//! key-pair     = dotted-key "=" value
//! dotted-key   = segment { "." segment }
//! segment      = bareword | basic-string | literal-string
//! value        = "true" | "false" | string | number
//! ```
//!
//! Inline arrays/tables, Unicode escapes, `inf` and `nan` are recognized
//! and rejected with an *unimplemented* diagnostic. The first error aborts
//! the parse; there is no recovery.

use celes_lex::{BaseToken, BaseTokenKind, Lexer, WhitespaceKind, WhitespaceMode};
use celes_util::{Diagnostics, Level};

use crate::error::ParseError;
use crate::value::{TomlArray, TomlTable, TomlValue};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// A header-introduced table waiting to be attached into the root when the
/// next header (or end of input) arrives.
struct PendingTable {
    /// Dotted path from the header.
    path: Vec<String>,
    /// The table collecting this section's key-value pairs.
    table: TomlTable,
    /// True when introduced by `[[header]]`.
    is_array: bool,
    /// Position of the opening `[`, for attachment diagnostics.
    row: u32,
    col: u32,
}

/// Why an insertion walk over the tree refused.
enum InsertError {
    /// An intermediate path segment is occupied by an incompatible value.
    PathBlocked,
    /// The terminal key holds a table.
    OccupiedByTable,
    /// The terminal key holds a non-table value.
    OccupiedByValue,
}

/// Parser state for a single document.
pub(crate) struct TomlParser<'src> {
    file: String,
    lexer: Lexer<'src>,
    diagnostics: Diagnostics,
    root: TomlTable,
    pending: Option<PendingTable>,
}

impl<'src> TomlParser<'src> {
    pub(crate) fn new(file: impl Into<String>, source: &'src str) -> Self {
        Self {
            file: file.into(),
            lexer: Lexer::new(source),
            diagnostics: Diagnostics::new(),
            root: TomlTable::new(),
            pending: None,
        }
    }

    pub(crate) fn into_root(self) -> TomlTable {
        self.root
    }

    pub(crate) fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Parse the whole document into the root table.
    pub(crate) fn parse_document(&mut self) -> ParseResult<()> {
        while let Some(token) = self.lexer.peek_token(WhitespaceMode::Ignore) {
            if token.ch == Some('[') {
                self.parse_table_header()?;
            } else if token.ch == Some('#') {
                self.skip_comment();
            } else {
                self.parse_key_pair()?;
            }
        }

        self.attach_pending()
    }

    /* --------------------------------------------------------------- */
    /* diagnostics                                                     */

    fn report(&mut self, row: u32, col: u32, message: &str) {
        self.diagnostics
            .add(self.file.clone(), row, col, Level::Error, message);
    }

    fn error_eof(&mut self) -> ParseError {
        let (row, col) = (self.lexer.row(), self.lexer.col());
        self.report(row, col, "Unexpected end of file");
        ParseError::Eof
    }

    fn error_eol(&mut self, token: &BaseToken<'src>) -> ParseError {
        self.report(token.row, token.col, "Unexpected end of line");
        ParseError::Eol
    }

    fn error_unexpected(&mut self, token: &BaseToken<'src>) -> ParseError {
        self.report(token.row, token.col, "Unexpected text");
        ParseError::UnexpectedText
    }

    fn error_unimplemented(&mut self, token: &BaseToken<'src>, message: &str) -> ParseError {
        self.report(token.row, token.col, message);
        ParseError::Unimplemented
    }

    /* --------------------------------------------------------------- */
    /* low-level helpers                                               */

    /// True when the raw source at the token's position starts with `pat`.
    ///
    /// Base tokens split `"""` into three tokens and `0x` into a digit run
    /// and an alpha run; this peeks past the token boundary.
    fn source_starts_with(&self, token: &BaseToken<'src>, pat: &[u8]) -> bool {
        let bytes = self.lexer.source().as_bytes();
        bytes.get(token.offset..token.offset + pat.len()) == Some(pat)
    }

    /// Consume the trivia in front of the next token, leaving the cursor
    /// at the token itself. False at end of input.
    fn pass_leading_whitespace(&mut self) -> bool {
        match self.lexer.peek_token(WhitespaceMode::Ignore) {
            Some(token) => {
                self.lexer.reset_to(&token);
                true
            }
            None => false,
        }
    }

    /// Consume one token and require it to be the expected codepoint on
    /// the current line.
    fn expect_next_char(&mut self, expected: char, mode: WhitespaceMode) -> ParseResult<()> {
        let Some(token) = self.lexer.get_token(mode) else {
            return Err(self.error_eof());
        };
        if token.passed_newline {
            return Err(self.error_eol(&token));
        }
        if token.ch == Some(expected) {
            Ok(())
        } else {
            Err(self.error_unexpected(&token))
        }
    }

    /// Require the next codepoint to be a digit, without consuming it.
    fn next_char_is_digit(&mut self) -> ParseResult<()> {
        let Some(token) = self.lexer.peek_char() else {
            return Err(self.error_eof());
        };
        if token.kind != BaseTokenKind::Digit {
            return Err(self.error_unexpected(&token));
        }
        Ok(())
    }

    /* --------------------------------------------------------------- */
    /* strings                                                         */

    /// One escape sequence, the `\` already consumed.
    fn parse_escape(&mut self, out: &mut String) -> ParseResult<()> {
        let Some(token) = self.lexer.get_char() else {
            return Err(self.error_eof());
        };

        match token.ch {
            Some('b') => out.push('\u{0008}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('u') | Some('U') => {
                return Err(
                    self.error_unimplemented(&token, "Unicode escape codes are unsupported")
                );
            }
            _ => return Err(self.error_unexpected(&token)),
        }

        Ok(())
    }

    /// Basic string, cursor at the opening `"`. Promotes to the
    /// multi-line form when three quotes open it.
    fn parse_basic_string(&mut self) -> ParseResult<String> {
        let Some(open) = self.lexer.get_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };
        if self.source_starts_with(&open, b"\"\"\"") {
            return self.parse_multiline_basic_string();
        }

        let mut out = String::new();
        while let Some(token) = self.lexer.get_token(WhitespaceMode::Parse) {
            if token.ws_kind == WhitespaceKind::Newline {
                return Err(self.error_eol(&token));
            }
            if token.ch == Some('\\') {
                self.parse_escape(&mut out)?;
            } else if token.ch == Some('"') {
                return Ok(out);
            } else {
                out.push_str(token.text);
            }
        }

        Err(self.error_eof())
    }

    /// Multi-line basic string; the first of the three opening quotes has
    /// been consumed.
    fn parse_multiline_basic_string(&mut self) -> ParseResult<String> {
        let _ = self.lexer.get_token(WhitespaceMode::Parse); // second quote
        let _ = self.lexer.get_token(WhitespaceMode::Parse); // third quote

        let mut out = String::new();
        while let Some(token) = self.lexer.get_token(WhitespaceMode::Parse) {
            if token.ch == Some('\\') {
                self.parse_escape(&mut out)?;
            } else if token.ch == Some('"') && self.source_starts_with(&token, b"\"\"\"") {
                let _ = self.lexer.get_char();
                let _ = self.lexer.get_char();
                return Ok(out);
            } else {
                out.push_str(token.text);
            }
        }

        Err(self.error_eof())
    }

    /// Literal string, cursor at the opening `'`. No escape processing.
    fn parse_literal_string(&mut self) -> ParseResult<String> {
        let Some(open) = self.lexer.get_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };
        if self.source_starts_with(&open, b"'''") {
            return self.parse_multiline_literal_string();
        }

        let mut out = String::new();
        while let Some(token) = self.lexer.get_token(WhitespaceMode::Parse) {
            if token.ws_kind == WhitespaceKind::Newline {
                return Err(self.error_eol(&token));
            }
            if token.ch == Some('\'') {
                return Ok(out);
            }
            out.push_str(token.text);
        }

        Err(self.error_eof())
    }

    /// Multi-line literal string; the first opening `'` has been consumed.
    fn parse_multiline_literal_string(&mut self) -> ParseResult<String> {
        let _ = self.lexer.get_token(WhitespaceMode::Parse); // second quote
        let _ = self.lexer.get_token(WhitespaceMode::Parse); // third quote

        let mut out = String::new();
        while let Some(token) = self.lexer.get_token(WhitespaceMode::Parse) {
            if token.ch == Some('\'') && self.source_starts_with(&token, b"'''") {
                let _ = self.lexer.get_char();
                let _ = self.lexer.get_char();
                return Ok(out);
            }
            out.push_str(token.text);
        }

        Err(self.error_eof())
    }

    /* --------------------------------------------------------------- */
    /* numbers                                                         */

    /// A number literal: optional sign, optional base prefix, digits with
    /// underscore groupings, and in base 10 an optional fraction and
    /// exponent. Digits are normalised into a scratch buffer and converted
    /// at the end.
    fn parse_number(&mut self) -> ParseResult<TomlValue> {
        let Some(mut token) = self.lexer.peek_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };

        let mut buf = String::new();
        let mut found_decimal = false;
        let mut found_exponent = false;
        let mut found_number = false;

        if token.ch == Some('+') || token.ch == Some('-') {
            self.lexer.pass(&token);
            if token.ch == Some('-') {
                buf.push('-');
            }

            match self.lexer.peek_token(WhitespaceMode::Parse) {
                Some(next) => token = next,
                None => return Err(self.error_eof()),
            }
        }

        let mut base: u32 = 10;
        if self.source_starts_with_ci(&token, b"0b") {
            base = 2;
        } else if self.source_starts_with_ci(&token, b"0o") {
            base = 8;
        } else if self.source_starts_with_ci(&token, b"0x") {
            base = 16;
        }

        if base != 10 {
            self.lexer.pass(&token);
            let _ = self.lexer.get_char(); // the base letter
        } else if token.text == "inf" {
            return Err(self.error_unimplemented(&token, "inf is unsupported"));
        } else if token.text == "nan" {
            return Err(self.error_unimplemented(&token, "nan is unsupported"));
        }

        loop {
            let Some(token) = self.lexer.peek_char() else {
                break;
            };

            match token.kind {
                BaseTokenKind::Whitespace => {
                    if !buf.is_empty() {
                        break;
                    }
                }
                BaseTokenKind::Digit => {
                    found_number = true;
                    buf.push_str(token.text);

                    let digit = token.ch.and_then(|c| c.to_digit(10)).unwrap_or(0);
                    if digit >= base {
                        return Err(self.error_unexpected(&token));
                    }
                }
                BaseTokenKind::Alpha => {
                    let ch = token.ch.map(|c| c.to_ascii_lowercase());

                    if base == 10 && found_number && !found_exponent && ch == Some('e') {
                        found_exponent = true;
                        buf.push('e');
                        self.lexer.pass(&token);

                        let Some(sign) = self.lexer.peek_char() else {
                            return Err(self.error_eof());
                        };
                        if sign.ch == Some('+') || sign.ch == Some('-') {
                            self.lexer.pass(&sign);
                            buf.push_str(sign.text);
                        }

                        self.next_char_is_digit()?;
                        continue;
                    } else if base == 16 && matches!(ch, Some('a'..='f')) {
                        buf.push_str(token.text);
                    } else {
                        return Err(self.error_unexpected(&token));
                    }
                }
                BaseTokenKind::Other => {
                    if token.ch == Some('.')
                        && base == 10
                        && found_number
                        && !found_decimal
                        && !found_exponent
                    {
                        found_decimal = true;
                        buf.push('.');
                        self.lexer.pass(&token);

                        self.next_char_is_digit()?;
                        continue;
                    } else if token.ch == Some('_') {
                        // Groupings must sit between digits.
                        self.lexer.pass(&token);

                        self.next_char_is_digit()?;
                        continue;
                    } else {
                        return Err(self.error_unexpected(&token));
                    }
                }
            }

            self.lexer.pass(&token);
        }

        if buf.is_empty() {
            return Err(self.error_eof());
        }

        if found_decimal || found_exponent {
            Ok(TomlValue::Real(buf.parse::<f64>().unwrap_or(0.0)))
        } else {
            Ok(TomlValue::Integer(
                i64::from_str_radix(&buf, base).unwrap_or(0),
            ))
        }
    }

    /// Case-insensitive form of [`source_starts_with`] for base prefixes.
    fn source_starts_with_ci(&self, token: &BaseToken<'src>, pat: &[u8]) -> bool {
        let bytes = self.lexer.source().as_bytes();
        bytes
            .get(token.offset..token.offset + pat.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(pat))
    }

    /* --------------------------------------------------------------- */
    /* identifiers                                                     */

    /// One bareword or quoted key segment.
    fn parse_singular_identifier(&mut self, delimiter: char) -> ParseResult<String> {
        let Some(token) = self.lexer.peek_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };

        if token.ch == Some('"') {
            return self.parse_basic_string();
        } else if token.ch == Some('\'') {
            return self.parse_literal_string();
        }

        let mut id = String::new();
        let mut first = true;

        while let Some(token) = self.lexer.peek_token(WhitespaceMode::Ignore) {
            if token.passed_newline {
                return Err(self.error_eol(&token));
            }
            if !first && token.passed_whitespace {
                return Ok(id);
            }
            if token.ch == Some(delimiter) || token.ch == Some('.') {
                return Ok(id);
            }

            if token.kind != BaseTokenKind::Alpha
                && token.kind != BaseTokenKind::Digit
                && token.ch != Some('_')
                && token.ch != Some('-')
            {
                return Err(self.error_unexpected(&token));
            }

            first = false;
            self.lexer.pass(&token);
            id.push_str(token.text);
        }

        Err(self.error_eof())
    }

    /// A dotted key: one or more segments. `delimiter` is the character
    /// that legitimately ends the key (`=` for pairs, `]` for headers).
    fn parse_identifier(&mut self, delimiter: char) -> ParseResult<Vec<String>> {
        if delimiter == '=' && !self.pass_leading_whitespace() {
            return Err(self.error_eof());
        }

        let mut path = Vec::new();
        loop {
            path.push(self.parse_singular_identifier(delimiter)?);

            let Some(token) = self.lexer.peek_token(WhitespaceMode::Ignore) else {
                return Err(self.error_eof());
            };
            if token.passed_newline {
                return Err(self.error_eol(&token));
            }

            if token.ch == Some('.') {
                let _ = self.lexer.get_token(WhitespaceMode::Ignore);

                let Some(token) = self.lexer.peek_token(WhitespaceMode::Ignore) else {
                    return Err(self.error_eof());
                };
                if token.passed_newline {
                    return Err(self.error_eol(&token));
                }
            } else {
                if token.passed_whitespace && token.ch != Some(delimiter) {
                    return Err(self.error_unexpected(&token));
                }
                return Ok(path);
            }
        }
    }

    /* --------------------------------------------------------------- */
    /* values                                                          */

    fn parse_value(&mut self) -> ParseResult<TomlValue> {
        let Some(token) = self.lexer.peek_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };
        if token.passed_newline {
            return Err(self.error_eol(&token));
        }

        if token.text == "true" {
            self.lexer.pass(&token);
            Ok(TomlValue::Boolean(true))
        } else if token.text == "false" {
            self.lexer.pass(&token);
            Ok(TomlValue::Boolean(false))
        } else if token.ch == Some('[') {
            Err(self.error_unimplemented(&token, "Inline arrays are unsupported"))
        } else if token.ch == Some('{') {
            Err(self.error_unimplemented(&token, "Inline tables are unsupported"))
        } else if token.ch == Some('"') {
            Ok(TomlValue::String(self.parse_basic_string()?))
        } else if token.ch == Some('\'') {
            Ok(TomlValue::String(self.parse_literal_string()?))
        } else if token.ch == Some('+') || token.ch == Some('-') {
            self.parse_number()
        } else if token.text == "inf" {
            Err(self.error_unimplemented(&token, "inf is unsupported"))
        } else if token.text == "nan" {
            Err(self.error_unimplemented(&token, "nan is unsupported"))
        } else if token.kind == BaseTokenKind::Digit {
            self.parse_number()
        } else {
            Err(self.error_unexpected(&token))
        }
    }

    /* --------------------------------------------------------------- */
    /* statements                                                      */

    /// `dotted-key = value` into the current table.
    fn parse_key_pair(&mut self) -> ParseResult<()> {
        let path = self.parse_identifier('=')?;
        self.expect_next_char('=', WhitespaceMode::Ignore)?;

        let Some(ahead) = self.lexer.peek_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };
        if ahead.passed_newline {
            return Err(self.error_eol(&ahead));
        }
        let (row, col) = (ahead.row, ahead.col);

        let value = self.parse_value()?;

        let target = match self.pending.as_mut() {
            Some(pending) => &mut pending.table,
            None => &mut self.root,
        };

        match insert_key_value(target, &path, value) {
            Ok(()) => Ok(()),
            Err(InsertError::PathBlocked) => {
                self.report(row, col, "Invalid identifier, name already in use");
                Err(ParseError::InvalidIdentifier)
            }
            Err(InsertError::OccupiedByTable) => {
                self.report(row, col, "Invalid identifier, name already in use by a table");
                Err(ParseError::InvalidIdentifier)
            }
            Err(InsertError::OccupiedByValue) => {
                self.report(row, col, "Key already exists");
                Err(ParseError::KeyAlreadyExists)
            }
        }
    }

    /// `[dotted-key]` or `[[dotted-key]]`. Attaches the previous section
    /// and opens a fresh one.
    fn parse_table_header(&mut self) -> ParseResult<()> {
        let Some(open) = self.lexer.get_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };
        let (row, col) = (open.row, open.col);

        let Some(next) = self.lexer.peek_token(WhitespaceMode::Ignore) else {
            return Err(self.error_eof());
        };

        let mut is_array = false;
        if next.ch == Some('[') {
            is_array = true;
            self.lexer.pass(&next);
        }

        let path = self.parse_identifier(']')?;

        if is_array {
            self.expect_next_char(']', WhitespaceMode::Ignore)?;
        }
        self.expect_next_char(']', WhitespaceMode::Ignore)?;

        self.attach_pending()?;
        self.pending = Some(PendingTable {
            path,
            table: TomlTable::new(),
            is_array,
            row,
            col,
        });
        Ok(())
    }

    /// Attach the pending section table into the root under its header
    /// path. No-op when no header has been seen.
    fn attach_pending(&mut self) -> ParseResult<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let PendingTable {
            path,
            table,
            is_array,
            row,
            col,
        } = pending;

        match insert_header_table(&mut self.root, &path, table, is_array) {
            Ok(()) => Ok(()),
            Err(_) => {
                self.report(row, col, "Invalid table assignment, key already in use by non-table");
                Err(ParseError::InvalidIdentifier)
            }
        }
    }

    /// `#` through the end of the line.
    fn skip_comment(&mut self) {
        while let Some(token) = self.lexer.get_token(WhitespaceMode::Parse) {
            if token.ws_kind == WhitespaceKind::Newline {
                return;
            }
        }
    }
}

/* ------------------------------------------------------------------- */
/* insertion walks                                                     */

/// Walk a dotted path and insert `value` at its terminal key, creating
/// intermediate subtables as needed.
fn insert_key_value(
    table: &mut TomlTable,
    path: &[String],
    value: TomlValue,
) -> Result<(), InsertError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(InsertError::PathBlocked);
    };

    let mut cur = table;
    for segment in parents {
        let slot = cur
            .values
            .entry(segment.clone())
            .or_insert_with(|| TomlValue::Table(TomlTable::new()));
        match slot {
            TomlValue::Table(next) => cur = next,
            _ => return Err(InsertError::PathBlocked),
        }
    }

    match cur.values.get(last.as_str()) {
        Some(TomlValue::Table(_)) => Err(InsertError::OccupiedByTable),
        Some(_) => Err(InsertError::OccupiedByValue),
        None => {
            cur.values.insert(last.clone(), value);
            Ok(())
        }
    }
}

/// Attach a header-introduced table under its dotted path. Intermediate
/// segments holding a table-array target the array's last element; the
/// terminal segment either receives the table, or appends it when the
/// header was a table-array.
fn insert_header_table(
    root: &mut TomlTable,
    path: &[String],
    table: TomlTable,
    is_array: bool,
) -> Result<(), InsertError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(InsertError::PathBlocked);
    };

    let mut cur = root;
    for segment in parents {
        let slot = cur
            .values
            .entry(segment.clone())
            .or_insert_with(|| TomlValue::Table(TomlTable::new()));
        match slot {
            TomlValue::Table(next) => cur = next,
            TomlValue::Array(array) => match array.values.last_mut() {
                Some(TomlValue::Table(next)) => cur = next,
                _ => return Err(InsertError::PathBlocked),
            },
            _ => return Err(InsertError::PathBlocked),
        }
    }

    if is_array {
        match cur.values.get_mut(last.as_str()) {
            None => {
                cur.values.insert(
                    last.clone(),
                    TomlValue::Array(TomlArray {
                        values: vec![TomlValue::Table(table)],
                    }),
                );
                Ok(())
            }
            Some(TomlValue::Array(array))
                if matches!(array.values.first(), Some(TomlValue::Table(_))) =>
            {
                array.values.push(TomlValue::Table(table));
                Ok(())
            }
            Some(_) => Err(InsertError::OccupiedByValue),
        }
    } else {
        if cur.values.contains_key(last.as_str()) {
            return Err(InsertError::OccupiedByValue);
        }
        cur.values.insert(last.clone(), TomlValue::Table(table));
        Ok(())
    }
}
