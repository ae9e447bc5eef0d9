//! Base token types.

/// Classification of a base token.
///
/// A base token is one of four things:
/// 1. a run of alpha characters,
/// 2. a run of digit characters,
/// 3. a single whitespace codepoint, when whitespace is not ignored,
/// 4. a single codepoint of any other kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseTokenKind {
    /// Run of letters (or any codepoint at or above U+0080).
    Alpha,
    /// Run of ASCII digits.
    Digit,
    /// A single whitespace codepoint.
    Whitespace,
    /// A single codepoint that is none of the above.
    Other,
}

/// Subclass of a whitespace token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhitespaceKind {
    /// Not a whitespace token, or an uncommon whitespace codepoint.
    Unknown,
    /// Horizontal tab.
    Tab,
    /// Space.
    Space,
    /// `\r`, `\n`, or a two-byte pair of the two.
    Newline,
}

/// A token produced by the base lexer.
///
/// The token's `text` borrows from the lexer's input; it stays valid for
/// the input's lifetime, independent of the lexer itself. Consumers that
/// need the bytes past that point copy them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseToken<'src> {
    /// The token's text, a slice of the input buffer.
    pub text: &'src str,

    /// The codepoint value when the token is a single codepoint
    /// (a two-byte newline pair counts as one), `None` for longer runs.
    pub ch: Option<char>,

    /// Token classification.
    pub kind: BaseTokenKind,

    /// Whitespace subclass; `Unknown` for non-whitespace tokens.
    pub ws_kind: WhitespaceKind,

    /// True when at least one whitespace codepoint was skipped between the
    /// previous token and this one, or when this token is itself
    /// whitespace.
    pub passed_whitespace: bool,

    /// Like `passed_whitespace`, but set only when a newline was involved.
    pub passed_newline: bool,

    /// 1-based row of the token's first character.
    pub row: u32,

    /// 1-based column of the token's first character.
    pub col: u32,

    /// Byte offset of the token's first character in the input.
    pub offset: usize,

    /// Cursor state to restore when the token is consumed.
    pub(crate) next_offset: usize,
    pub(crate) next_row: u32,
    pub(crate) next_col: u32,
}

impl<'src> BaseToken<'src> {
    /// Byte offset one past the token's last character (including a
    /// swallowed newline-pair half).
    pub fn end(&self) -> usize {
        self.next_offset
    }
}
