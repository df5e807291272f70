//! AST (Abstract Syntax Tree) module.
//!
//! Submodules:
//! - ast: the node tree, result types and ownership model
//! - operators: the fixed operator table (part of the language surface)

pub mod ast;
pub mod operators;
