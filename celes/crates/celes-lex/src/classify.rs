//! Codepoint classification.
//!
//! Classification is deliberately ASCII-centric: whitespace and digits are
//! the ASCII sets, and any codepoint at or above U+0080 counts as alpha.
//! This keeps token boundaries stable for config files regardless of the
//! platform's notion of Unicode character classes.

use crate::token::{BaseTokenKind, WhitespaceKind};

/// Classify a single codepoint into a base token kind.
pub(crate) fn classify(ch: char) -> BaseTokenKind {
    if is_whitespace(ch) {
        BaseTokenKind::Whitespace
    } else if ch.is_ascii_digit() {
        BaseTokenKind::Digit
    } else if ch.is_ascii_alphabetic() || (ch as u32) >= 0x80 {
        BaseTokenKind::Alpha
    } else {
        BaseTokenKind::Other
    }
}

/// ASCII whitespace, including vertical tab and form feed.
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// True for either newline codepoint.
pub(crate) fn is_newline(ch: char) -> bool {
    ch == '\r' || ch == '\n'
}

/// True when `second` is the other half of a two-byte newline pair
/// (`\r\n` or `\n\r`).
pub(crate) fn is_newline_pair(first: char, second: u8) -> bool {
    (first == '\r' && second == b'\n') || (first == '\n' && second == b'\r')
}

/// Whitespace subclass for a whitespace codepoint.
pub(crate) fn whitespace_kind(ch: char) -> WhitespaceKind {
    if is_newline(ch) {
        WhitespaceKind::Newline
    } else if ch == '\t' {
        WhitespaceKind::Tab
    } else if ch == ' ' {
        WhitespaceKind::Space
    } else {
        WhitespaceKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ascii() {
        assert_eq!(classify('a'), BaseTokenKind::Alpha);
        assert_eq!(classify('Z'), BaseTokenKind::Alpha);
        assert_eq!(classify('0'), BaseTokenKind::Digit);
        assert_eq!(classify('9'), BaseTokenKind::Digit);
        assert_eq!(classify(' '), BaseTokenKind::Whitespace);
        assert_eq!(classify('\t'), BaseTokenKind::Whitespace);
        assert_eq!(classify('\n'), BaseTokenKind::Whitespace);
        assert_eq!(classify('_'), BaseTokenKind::Other);
        assert_eq!(classify('='), BaseTokenKind::Other);
        assert_eq!(classify('['), BaseTokenKind::Other);
    }

    #[test]
    fn test_classify_non_ascii_is_alpha() {
        assert_eq!(classify('α'), BaseTokenKind::Alpha);
        assert_eq!(classify('é'), BaseTokenKind::Alpha);
        assert_eq!(classify('\u{3042}'), BaseTokenKind::Alpha);
    }

    #[test]
    fn test_newline_pairs() {
        assert!(is_newline_pair('\r', b'\n'));
        assert!(is_newline_pair('\n', b'\r'));
        assert!(!is_newline_pair('\n', b'\n'));
        assert!(!is_newline_pair('\r', b'\r'));
        assert!(!is_newline_pair('a', b'\n'));
    }

    #[test]
    fn test_whitespace_kinds() {
        assert_eq!(whitespace_kind('\n'), WhitespaceKind::Newline);
        assert_eq!(whitespace_kind('\r'), WhitespaceKind::Newline);
        assert_eq!(whitespace_kind('\t'), WhitespaceKind::Tab);
        assert_eq!(whitespace_kind(' '), WhitespaceKind::Space);
        assert_eq!(whitespace_kind('\x0C'), WhitespaceKind::Unknown);
    }
}
