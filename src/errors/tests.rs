//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorKind};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorKind::UnrecognisedCharacter { character: '`' },
        Position { line: 3, column: 7 },
    );

    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorKind::UnexpectedToken {
            expected: "identifier".to_string(),
            found: "integer(42)".to_string(),
        },
        Position { line: 1, column: 5 },
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.to_string(),
        "<identifier> expected, but <integer(42)> was given (at 1:5)"
    );
}

#[test]
fn test_type_mismatch_is_warning() {
    let error = Error::new(
        ErrorKind::TypeMismatch {
            expected: "integer".to_string(),
            received: "string".to_string(),
        },
        Position::null(),
    );

    assert!(error.is_warning());
    assert_eq!(error.get_error_name(), "TypeMismatch");
    // Null positions are omitted from the rendered message.
    assert!(!error.to_string().contains("at 0:0"));
}

#[test]
fn test_syntactic_errors_are_not_warnings() {
    let error = Error::new(
        ErrorKind::UnexpectedToken {
            expected: "value".to_string(),
            found: "eof".to_string(),
        },
        Position { line: 2, column: 1 },
    );

    assert!(!error.is_warning());
}

#[test]
fn test_fatal_internal_error() {
    let error = Error::new(
        ErrorKind::FatalInternal {
            message: "function 'parse_type' is not implemented".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "FatalInternal");
    assert!(error.to_string().contains("parse_type"));
}

#[test]
fn test_position_display() {
    assert_eq!(Position { line: 12, column: 4 }.to_string(), "12:4");
    assert!(Position::null().is_null());
    assert!(!Position { line: 1, column: 1 }.is_null());
}
