//! The base lexer.
//!
//! [`Lexer`] walks a borrowed UTF-8 buffer and hands out [`BaseToken`]s.
//! It keeps only a byte offset and 1-based row/column; peeking never
//! mutates, so `peek_*` followed by `get_*` always yields the same token.

use crate::classify::{classify, is_newline, is_newline_pair, whitespace_kind};
use crate::token::{BaseToken, BaseTokenKind, WhitespaceKind};

/// Whether whitespace forms tokens or is skipped as trivia.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhitespaceMode {
    /// Whitespace surfaces as single-codepoint tokens.
    Parse,
    /// Whitespace is skipped; the next real token carries the
    /// `passed_whitespace` / `passed_newline` flags.
    Ignore,
}

/// Decode the codepoint at `offset`.
///
/// Returns the codepoint and the offset just past it. A NUL byte is
/// treated as end of input.
fn decode_at(source: &str, offset: usize) -> Option<(char, usize)> {
    let bytes = source.as_bytes();
    if offset >= bytes.len() || bytes[offset] == 0 {
        return None;
    }
    let ch = source[offset..].chars().next()?;
    Some((ch, offset + ch.len_utf8()))
}

/// A cursor over a borrowed source buffer producing base tokens.
///
/// # Example
///
/// ```
/// use celes_lex::{Lexer, WhitespaceMode};
///
/// let mut lexer = Lexer::new("abc 123");
/// assert_eq!(lexer.get_token(WhitespaceMode::Ignore).unwrap().text, "abc");
/// assert_eq!(lexer.get_token(WhitespaceMode::Ignore).unwrap().text, "123");
/// assert!(lexer.get_token(WhitespaceMode::Ignore).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    row: u32,
    col: u32,
}

impl<'src> Lexer<'src> {
    /// Create a lexer over `source`, positioned at row 1, column 1.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            row: 1,
            col: 1,
        }
    }

    /// The full source buffer.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset into the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current 1-based row.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Current 1-based column.
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Rewind to the start of the buffer.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.row = 1;
        self.col = 1;
    }

    /// Rewind the cursor to the start of `token`.
    ///
    /// After this, the next `get_token` re-reads `token` (with trivia
    /// flags cleared, since the trivia before it has been consumed).
    pub fn reset_to(&mut self, token: &BaseToken<'src>) {
        self.offset = token.offset;
        self.row = token.row;
        self.col = token.col;
    }

    /// Advance the cursor past `token`, as if it had been consumed with
    /// `get_token`.
    pub fn pass(&mut self, token: &BaseToken<'src>) {
        self.offset = token.next_offset;
        self.row = token.next_row;
        self.col = token.next_col;
    }

    /// Look at the next token without consuming it.
    pub fn peek_token(&self, mode: WhitespaceMode) -> Option<BaseToken<'src>> {
        self.scan_token(mode)
    }

    /// Consume and return the next token.
    pub fn get_token(&mut self, mode: WhitespaceMode) -> Option<BaseToken<'src>> {
        let token = self.scan_token(mode)?;
        self.pass(&token);
        Some(token)
    }

    /// Look at the next single codepoint without consuming it.
    ///
    /// Unlike `peek_token`, this never skips whitespace and never extends
    /// runs; it yields exactly one codepoint (a two-byte newline pair
    /// counts as one).
    pub fn peek_char(&self) -> Option<BaseToken<'src>> {
        self.scan_char()
    }

    /// Consume and return the next single codepoint.
    pub fn get_char(&mut self) -> Option<BaseToken<'src>> {
        let token = self.scan_char()?;
        self.pass(&token);
        Some(token)
    }

    /// Single forward scan producing the next token.
    ///
    /// The token carries the cursor state to restore on consumption, so
    /// peeking and getting share this one code path.
    fn scan_token(&self, mode: WhitespaceMode) -> Option<BaseToken<'src>> {
        let mut pos = self.offset;
        let mut row = self.row;
        let mut col = self.col;

        let mut token_start = None;
        let mut start_row = row;
        let mut start_col = col;
        let mut kind = None;
        let mut ws_kind = WhitespaceKind::Unknown;
        let mut first_ch = '\0';
        let mut count = 0usize;
        let mut passed_whitespace = false;
        let mut passed_newline = false;
        let mut stop = false;

        while !stop {
            let Some((ch, mut after)) = decode_at(self.source, pos) else {
                break;
            };
            let new_kind = classify(ch);

            match kind {
                None => {
                    let mut ignore = false;

                    if new_kind == BaseTokenKind::Whitespace {
                        passed_whitespace = true;
                        if is_newline(ch) {
                            passed_newline = true;
                        }

                        if mode == WhitespaceMode::Ignore {
                            ignore = true;
                        } else {
                            ws_kind = whitespace_kind(ch);
                        }
                    }

                    if !ignore {
                        first_ch = ch;
                        token_start = Some(pos);
                        kind = Some(new_kind);
                        start_row = row;
                        start_col = col;

                        // Only alpha and digit runs extend past one codepoint.
                        if new_kind != BaseTokenKind::Digit && new_kind != BaseTokenKind::Alpha {
                            stop = true;
                        }
                        count += 1;
                    }
                }
                // Classification change ends the run; leave the cursor
                // before the rejected codepoint.
                Some(kind) if kind != new_kind => break,
                Some(_) => count += 1,
            }

            if is_newline(ch) {
                if let Some(&next) = self.source.as_bytes().get(after) {
                    if is_newline_pair(ch, next) {
                        after += 1;
                    }
                }
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
            pos = after;
        }

        let start = token_start?;
        Some(BaseToken {
            text: &self.source[start..pos],
            ch: (count == 1).then_some(first_ch),
            kind: kind?,
            ws_kind,
            passed_whitespace,
            passed_newline,
            row: start_row,
            col: start_col,
            offset: start,
            next_offset: pos,
            next_row: row,
            next_col: col,
        })
    }

    /// Scan exactly one codepoint.
    fn scan_char(&self) -> Option<BaseToken<'src>> {
        let (ch, mut after) = decode_at(self.source, self.offset)?;

        let mut row = self.row;
        let mut col = self.col + 1;
        let kind = classify(ch);
        let mut ws_kind = WhitespaceKind::Unknown;

        if kind == BaseTokenKind::Whitespace {
            if is_newline(ch) {
                if let Some(&next) = self.source.as_bytes().get(after) {
                    if is_newline_pair(ch, next) {
                        after += 1;
                    }
                }
                ws_kind = WhitespaceKind::Newline;
                row += 1;
                col = 1;
            } else {
                ws_kind = whitespace_kind(ch);
            }
        }

        Some(BaseToken {
            text: &self.source[self.offset..after],
            ch: Some(ch),
            kind,
            ws_kind,
            passed_whitespace: false,
            passed_newline: false,
            row: self.row,
            col: self.col,
            offset: self.offset,
            next_offset: after,
            next_row: row,
            next_col: col,
        })
    }
}
