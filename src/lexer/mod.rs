//! Lexical analysis module.
//!
//! Converts source text into the token stream the parser consumes.
//! It handles:
//!
//! - Single-character operator-class tokens (multi-character operators are
//!   assembled later by the parser's operator matcher)
//! - String and character literals with escape sequences
//! - Integer and decimal literals, identifiers
//! - Line comments and whitespace
//! - Line/column tracking and a synthetic end-of-stream token

pub mod lexer;
pub mod tokens;
