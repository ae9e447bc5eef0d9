//! Token tree construction over the base lexer.

use celes_lex::{BaseToken, BaseTokenKind, Lexer, WhitespaceKind, WhitespaceMode};

use crate::token::{Token, TokenKind};

/// Tokenize a whole source file into top-level tokens.
///
/// Comments are stripped. An identifier or number cut off by the end of
/// input is kept; a string or block left open at the end of input is
/// dropped along with everything after it.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokenizer = Tokenizer {
        lexer: Lexer::new(source),
    };

    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        tokens.push(token);
    }
    tokens
}

struct Tokenizer<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Tokenizer<'src> {
    /// The next source token, skipping comments.
    fn next_token(&mut self) -> Option<Token<'src>> {
        let bt = self.lexer.peek_token(WhitespaceMode::Ignore)?;

        match bt.kind {
            BaseTokenKind::Alpha => self.ident(),
            BaseTokenKind::Digit => self.number(),
            // Ignore mode never yields whitespace tokens.
            BaseTokenKind::Whitespace => None,
            BaseTokenKind::Other => {
                let ch = bt.ch.unwrap_or('\0');
                let next_byte = self
                    .lexer
                    .source()
                    .as_bytes()
                    .get(bt.offset + 1)
                    .copied();

                if ch == '.' && next_byte.is_some_and(|b| b.is_ascii_digit()) {
                    self.number()
                } else if ch == '/' && next_byte == Some(b'/') {
                    self.skip_line_comment();
                    self.next_token()
                } else if ch == '/' && next_byte == Some(b'*') {
                    if self.skip_block_comment() {
                        self.next_token()
                    } else {
                        None
                    }
                } else if ch == '_' {
                    self.ident()
                } else if matches!(ch, '{' | '(' | '[') {
                    self.block()
                } else if ch == '\'' || ch == '"' {
                    self.string()
                } else {
                    self.other()
                }
            }
        }
    }

    /// Letters, digits and underscores, as long as they stay adjacent.
    fn ident(&mut self) -> Option<Token<'src>> {
        self.accumulate(TokenKind::Ident, |bt| {
            bt.kind == BaseTokenKind::Alpha
                || bt.kind == BaseTokenKind::Digit
                || bt.ch == Some('_')
        })
    }

    /// Like an identifier, plus at most one decimal point.
    fn number(&mut self) -> Option<Token<'src>> {
        let mut found_decimal = false;
        self.accumulate(TokenKind::Number, move |bt| {
            if bt.kind == BaseTokenKind::Alpha
                || bt.kind == BaseTokenKind::Digit
                || bt.ch == Some('_')
            {
                true
            } else if !found_decimal && bt.ch == Some('.') {
                found_decimal = true;
                true
            } else {
                false
            }
        })
    }

    /// Glue adjacent base tokens together while `continues` accepts them.
    fn accumulate(
        &mut self,
        kind: TokenKind,
        mut continues: impl FnMut(&BaseToken<'src>) -> bool,
    ) -> Option<Token<'src>> {
        let mut span: Option<(usize, usize)> = None;
        let mut row = 0;
        let mut col = 0;
        let mut passed_whitespace = false;

        while let Some(bt) = self.lexer.peek_token(WhitespaceMode::Ignore) {
            if !continues(&bt) {
                break;
            }

            match span {
                None => {
                    span = Some((bt.offset, bt.end()));
                    row = bt.row;
                    col = bt.col;
                    passed_whitespace = bt.passed_whitespace;
                }
                Some((start, _)) => {
                    if bt.passed_whitespace {
                        break;
                    }
                    span = Some((start, bt.end()));
                }
            }

            self.lexer.pass(&bt);
        }

        let (start, end) = span?;
        Some(Token {
            kind,
            text: &self.lexer.source()[start..end],
            row,
            col,
            offset: start,
            passed_whitespace,
            children: Vec::new(),
        })
    }

    /// A bracketed block; nested tokens become children, the matching
    /// closer ends the block without becoming a child.
    fn block(&mut self) -> Option<Token<'src>> {
        let open = self.lexer.get_token(WhitespaceMode::Ignore)?;
        let close = match open.ch {
            Some('{') => b'}',
            Some('[') => b']',
            _ => b')',
        };

        let start = open.offset;
        let mut token = Token {
            kind: TokenKind::Block,
            text: open.text,
            row: open.row,
            col: open.col,
            offset: start,
            passed_whitespace: open.passed_whitespace,
            children: Vec::new(),
        };

        while let Some(sub) = self.next_token() {
            token.text = &self.lexer.source()[start..sub.end()];

            if sub.text.as_bytes().first() == Some(&close) {
                return Some(token);
            }
            token.children.push(sub);
        }

        // Unterminated block.
        None
    }

    /// A quoted string; `\` shields the following base token.
    fn string(&mut self) -> Option<Token<'src>> {
        let open = self.lexer.get_token(WhitespaceMode::Ignore)?;
        let start = open.offset;
        let mut token = Token {
            kind: TokenKind::String,
            text: open.text,
            row: open.row,
            col: open.col,
            offset: start,
            passed_whitespace: open.passed_whitespace,
            children: Vec::new(),
        };

        while let Some(bt) = self.lexer.get_token(WhitespaceMode::Parse) {
            token.text = &self.lexer.source()[start..bt.end()];

            if bt.ch == open.ch {
                return Some(token);
            } else if bt.ch == Some('\\') {
                let escaped = self.lexer.get_token(WhitespaceMode::Parse)?;
                token.text = &self.lexer.source()[start..escaped.end()];
            }
        }

        // Unterminated string.
        None
    }

    /// A single leftover character.
    fn other(&mut self) -> Option<Token<'src>> {
        let bt = self.lexer.get_token(WhitespaceMode::Ignore)?;
        Some(Token {
            kind: TokenKind::Other,
            text: bt.text,
            row: bt.row,
            col: bt.col,
            offset: bt.offset,
            passed_whitespace: bt.passed_whitespace,
            children: Vec::new(),
        })
    }

    /// `//` through the end of the line.
    fn skip_line_comment(&mut self) {
        let _ = self.lexer.get_token(WhitespaceMode::Ignore); // '/'
        let _ = self.lexer.get_token(WhitespaceMode::Ignore); // '/'

        while let Some(bt) = self.lexer.get_token(WhitespaceMode::Parse) {
            if bt.ws_kind == WhitespaceKind::Newline {
                return;
            }
        }
    }

    /// `/*` through the matching `*/`, nesting recursively. False when
    /// the comment never closes.
    fn skip_block_comment(&mut self) -> bool {
        let _ = self.lexer.get_token(WhitespaceMode::Ignore); // '/'
        let _ = self.lexer.get_token(WhitespaceMode::Ignore); // '*'

        while let Some(bt) = self.lexer.peek_token(WhitespaceMode::Ignore) {
            if bt.kind == BaseTokenKind::Other {
                let bytes = self.lexer.source().as_bytes();

                if bytes.get(bt.offset..bt.offset + 2) == Some(b"/*".as_ref()) {
                    if !self.skip_block_comment() {
                        return false;
                    }
                    continue;
                } else if bytes.get(bt.offset..bt.offset + 2) == Some(b"*/".as_ref()) {
                    let _ = self.lexer.get_token(WhitespaceMode::Ignore); // '*'
                    let _ = self.lexer.get_token(WhitespaceMode::Ignore); // '/'
                    return true;
                }
            }

            self.lexer.pass(&bt);
        }

        false
    }
}
