#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::ast::ast::{Node, NodeKind};
use crate::errors::errors::Error;

pub mod annotation;
pub mod ast;
pub mod desugar;
pub mod errors;
pub mod lexer;
pub mod parser;

extern crate regex;

/// A line/column pair inside one compilation unit. Lines and columns are
/// 1-based; `Position::null()` marks errors with no usable location
/// (semantic diagnostics raised on nodes rather than tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }

    pub fn is_null(&self) -> bool {
        self.line == 0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A fully processed compilation unit: the annotated module tree plus the
/// non-fatal semantic diagnostics collected during annotation.
#[derive(Debug)]
pub struct CompiledUnit {
    pub module: Node,
    pub diagnostics: Vec<Error>,
}

/// Runs the whole front end over one source string: tokenize, parse,
/// desugar, annotate. Lexical and syntactic failures abort with the first
/// error; semantic mismatches are returned alongside the annotated tree.
pub fn compile_unit(source: &str) -> Result<CompiledUnit, Error> {
    let tokens = lexer::lexer::tokenize(source)?;
    let mut module = parser::parser::parse(tokens);

    if let NodeKind::Module {
        has_errors, error, ..
    } = &module.kind
    {
        if *has_errors {
            if let Some(error) = error {
                return Err(error.clone());
            }
        }
    }

    desugar::desugar::desugar(&mut module);
    let diagnostics = annotation::annotator::annotate(&mut module);

    Ok(CompiledUnit {
        module,
        diagnostics,
    })
}
