//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout tokenization,
//! parsing and annotation. It includes:
//!
//! - An error structure carrying a source position
//! - Specific error variants for each processing phase
//! - Error formatting and display functionality

pub mod errors;

#[cfg(test)]
mod tests;
