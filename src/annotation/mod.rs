//! Scope management and type annotation.
//!
//! This module turns the raw, desugared tree into an annotated one. It:
//!
//! - Builds the lexical scope chain and registers declarations
//! - Binds variable references to declaration records (innermost first)
//! - Propagates the minimal result types and reports mismatches
//!
//! Mismatches are diagnostics, not failures: the walk always finishes and
//! coerces the offending type to a best-effort fallback.

pub mod annotator;
pub mod context;

#[cfg(test)]
mod tests;
