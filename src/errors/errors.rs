use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A single front-end error: what went wrong and where.
///
/// The parser cursor holds at most one of these at a time; `restore()` on
/// the cursor is the only operation that discards it. Semantic mismatches
/// are carried as a list of these on the annotator instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    position: Position,
}

impl Error {
    pub fn new(kind: ErrorKind, position: Position) -> Self {
        Error { kind, position }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn get_error_name(&self) -> &str {
        match &self.kind {
            ErrorKind::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorKind::UnknownEscape { .. } => "UnknownEscape",
            ErrorKind::MisleadingCharacter => "MisleadingCharacter",
            ErrorKind::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorKind::TypeMismatch { .. } => "TypeMismatch",
            ErrorKind::FatalInternal { .. } => "FatalInternal",
        }
    }

    /// True for semantic diagnostics that do not stop the pipeline.
    pub fn is_warning(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.is_null() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} (at {})", self.kind, self.position)
        }
    }
}

/// Every way the front end can fail, one variant per condition.
///
/// Lexical: `UnexpectedEndOfInput`, `UnknownEscape`, `MisleadingCharacter`,
/// `UnrecognisedCharacter`. Syntactic: `UnexpectedToken`. Semantic (warning
/// level): `TypeMismatch`. Internal: `FatalInternal`, reserved for grammar
/// productions that are intentionally not implemented.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("unexpected end of input: {message}")]
    UnexpectedEndOfInput { message: String },
    #[error("special character identifier '{escape}' does not exist")]
    UnknownEscape { escape: char },
    #[error(
        "character definition is misleading: whitespace and control \
         characters must be written as escape sequences (\\s \\t \\n \\r)"
    )]
    MisleadingCharacter,
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("<{expected}> expected, but <{found}> was given")]
    UnexpectedToken { expected: String, found: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("fatal internal error: {message}")]
    FatalInternal { message: String },
}
