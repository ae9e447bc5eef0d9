//! Source token tree.

/// Kind of a source token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier: letters, digits and underscores.
    Ident,
    /// Numeric literal, including at most one decimal point.
    Number,
    /// A `'` or `"` delimited string, delimiters included.
    String,
    /// A `{}`, `()` or `[]` block; its contents are the children.
    Block,
    /// Any other single character.
    Other,
}

/// A source token.
///
/// `text` borrows from the source and spans the entire construct: for a
/// block that is everything from the opening bracket through the closing
/// one, for a string both delimiters and the content between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    /// Token kind.
    pub kind: TokenKind,
    /// The full text of the token.
    pub text: &'src str,
    /// 1-based row of the first character.
    pub row: u32,
    /// 1-based column of the first character.
    pub col: u32,
    /// Byte offset of the first character in the source.
    pub offset: usize,
    /// True when whitespace separated this token from the previous one.
    pub passed_whitespace: bool,
    /// Nested tokens of a block; empty for the other kinds.
    pub children: Vec<Token<'src>>,
}

impl<'src> Token<'src> {
    /// Byte offset one past the token's last character.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}
