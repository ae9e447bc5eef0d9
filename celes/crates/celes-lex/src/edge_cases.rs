//! Edge-case and property tests for the base lexer.

use proptest::prelude::*;

use crate::{BaseTokenKind, Lexer, WhitespaceMode};

/// The observable identity of a token, minus trivia flags (which by design
/// depend on whether preceding whitespace was consumed or skipped).
type TokenId = (String, BaseTokenKind, u32, u32, Option<char>);

fn ignore_stream(source: &str) -> Vec<TokenId> {
    let mut lexer = Lexer::new(source);
    let mut out = Vec::new();
    while let Some(t) = lexer.get_token(WhitespaceMode::Ignore) {
        out.push((t.text.to_string(), t.kind, t.row, t.col, t.ch));
    }
    out
}

/// Same stream, but explicitly draining whitespace tokens in parse mode
/// before each real token.
fn drained_stream(source: &str) -> Vec<TokenId> {
    let mut lexer = Lexer::new(source);
    let mut out = Vec::new();
    loop {
        while let Some(t) = lexer.peek_token(WhitespaceMode::Parse) {
            if t.kind != BaseTokenKind::Whitespace {
                break;
            }
            lexer.pass(&t);
        }
        match lexer.get_token(WhitespaceMode::Ignore) {
            Some(t) => out.push((t.text.to_string(), t.kind, t.row, t.col, t.ch)),
            None => break,
        }
    }
    out
}

/// Reference row/column walk: one step per codepoint, newline pairs
/// swallowed, NUL ends the input.
fn reference_positions(source: &str) -> Vec<(u32, u32)> {
    let bytes = source.as_bytes();
    let mut positions = Vec::new();
    let mut offset = 0;
    let mut row = 1u32;
    let mut col = 1u32;

    while offset < bytes.len() && bytes[offset] != 0 {
        let ch = match source[offset..].chars().next() {
            Some(ch) => ch,
            None => break,
        };
        positions.push((row, col));
        offset += ch.len_utf8();

        if ch == '\r' || ch == '\n' {
            if let Some(&next) = bytes.get(offset) {
                if (ch == '\r' && next == b'\n') || (ch == '\n' && next == b'\r') {
                    offset += 1;
                }
            }
            row += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    positions
}

proptest! {
    /// Peeking commits to nothing: peek, get, peek again all agree.
    #[test]
    fn prop_peek_get_idempotent(source in r#"[a-z0-9 \t\r\n=\[\]#._"'é-]{0,48}"#) {
        for mode in [WhitespaceMode::Ignore, WhitespaceMode::Parse] {
            let mut lexer = Lexer::new(&source);
            loop {
                let first = lexer.peek_token(mode);
                let second = lexer.peek_token(mode);
                prop_assert_eq!(&first, &second);
                match lexer.get_token(mode) {
                    Some(token) => prop_assert_eq!(Some(token), first),
                    None => {
                        prop_assert_eq!(first, None);
                        break;
                    }
                }
            }
        }
    }

    /// Consuming whitespace as tokens beforehand never changes the tokens
    /// a subsequent ignore-mode read returns.
    #[test]
    fn prop_whitespace_drain_invariant(source in r#"[a-z0-9 \t\r\n=\[\]#._"'é-]{0,48}"#) {
        prop_assert_eq!(ignore_stream(&source), drained_stream(&source));
    }

    /// Columns advance by exactly one per non-newline codepoint; newlines
    /// reset the column and bump the row once per line, whatever the
    /// `\r`/`\n` flavor.
    #[test]
    fn prop_char_positions(source in r#"[ab1 \t\r\né]{0,48}"#) {
        let expected = reference_positions(&source);
        let mut lexer = Lexer::new(&source);
        let mut actual = Vec::new();
        while let Some(t) = lexer.get_char() {
            actual.push((t.row, t.col));
        }
        prop_assert_eq!(actual, expected);
    }

    /// Alpha and digit runs never contain a classification change.
    #[test]
    fn prop_runs_are_homogeneous(source in r#"[a-z0-9_. ]{0,48}"#) {
        let mut lexer = Lexer::new(&source);
        while let Some(t) = lexer.get_token(WhitespaceMode::Ignore) {
            match t.kind {
                BaseTokenKind::Alpha => {
                    prop_assert!(t.text.chars().all(|c| c.is_ascii_alphabetic() || (c as u32) >= 0x80));
                }
                BaseTokenKind::Digit => {
                    prop_assert!(t.text.chars().all(|c| c.is_ascii_digit()));
                }
                _ => prop_assert_eq!(t.text.chars().count(), 1),
            }
        }
    }
}

#[test]
fn test_uncommon_whitespace_is_trivia() {
    let mut lexer = Lexer::new("a\x0B\x0Cb");
    lexer.get_token(WhitespaceMode::Ignore).unwrap();
    let b = lexer.get_token(WhitespaceMode::Ignore).unwrap();
    assert_eq!(b.text, "b");
    assert!(b.passed_whitespace);
    assert!(!b.passed_newline);
}

#[test]
fn test_trailing_newline_at_end_of_input() {
    let mut lexer = Lexer::new("a\r");
    lexer.get_token(WhitespaceMode::Ignore).unwrap();
    assert!(lexer.get_token(WhitespaceMode::Ignore).is_none());
    assert_eq!(lexer.row(), 1);
}

#[test]
fn test_mixed_script_run() {
    let mut lexer = Lexer::new("abcédef1");
    let run = lexer.get_token(WhitespaceMode::Ignore).unwrap();
    assert_eq!(run.text, "abcédef");
    let digits = lexer.get_token(WhitespaceMode::Ignore).unwrap();
    assert_eq!(digits.text, "1");
}
