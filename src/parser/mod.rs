//! Parser module for building the Abstract Syntax Tree.
//!
//! The parser is an operator-precedence climber over a transactional token
//! cursor. It handles:
//!
//! - Expression parsing with n-ary flattening of same-operator runs
//! - Greedy assembly of multi-character operators from single-character
//!   operator tokens
//! - Speculative parsing via nested save/restore on the cursor
//! - Primaries, postfix calls, blocks and `let` declarations
//!
//! Parse functions return best-effort nodes and record the failure on the
//! cursor; callers check `ParserState::is_failed` after every sub-parse.

pub mod expr;
pub mod parser;
pub mod stmt;
