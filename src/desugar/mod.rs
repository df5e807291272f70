//! Syntactic sugar removal.
//!
//! After parsing, `->` and `,` still exist as ordinary operator nodes. This
//! pass rewrites them into their structural forms:
//!
//! - `a, b, c` becomes a tuple value with three entries
//! - `a -> b -> body` becomes nested single-parameter function values
//!
//! The walk is children-first and in-place; running it on an already
//! desugared tree changes nothing.

pub mod desugar;
