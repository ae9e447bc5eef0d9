//! celes-lex - Character-oriented base lexer.
//!
//! This crate turns UTF-8 text into a lazy, peekable stream of *base
//! tokens*: alpha runs, digit runs, single whitespace codepoints (when
//! whitespace is not ignored), and single codepoints of anything else.
//! Higher-level parsers (the TOML reader, the source tokenizer) combine
//! base tokens into their own token shapes.
//!
//! Tokens borrow their text from the input buffer; nothing is copied at
//! this layer. Anything that must outlive the buffer is copied by the
//! layer above.
//!
//! # Example
//!
//! ```
//! use celes_lex::{BaseTokenKind, Lexer, WhitespaceMode};
//!
//! let mut lexer = Lexer::new("key = 42");
//!
//! let token = lexer.get_token(WhitespaceMode::Ignore).unwrap();
//! assert_eq!(token.text, "key");
//! assert_eq!(token.kind, BaseTokenKind::Alpha);
//!
//! let token = lexer.get_token(WhitespaceMode::Ignore).unwrap();
//! assert_eq!(token.ch, Some('='));
//! assert!(token.passed_whitespace);
//! ```

mod classify;
mod lexer;
mod token;

#[cfg(test)]
mod edge_cases;

pub use lexer::{Lexer, WhitespaceMode};
pub use token::{BaseToken, BaseTokenKind, WhitespaceKind};
