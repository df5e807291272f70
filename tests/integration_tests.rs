//! Integration tests for the end-to-end front end.
//!
//! These tests run the complete pipeline over source strings: tokenization,
//! parsing, desugaring and annotation, asserting on the final tree.

use akbit_lang::ast::ast::{resolved_record, EType, Node, NodeKind};
use akbit_lang::compile_unit;
use akbit_lang::errors::errors::ErrorKind;

// The module is kept whole so the global scope, and the declaration
// records behind the tree's weak references, stay alive.
fn compiled_module(source: &str) -> Node {
    compile_unit(source).unwrap().module
}

fn module_items(module: &Node) -> &[Node] {
    match &module.kind {
        NodeKind::Module { items, .. } => items,
        _ => panic!("compile did not produce a module"),
    }
}

#[test]
fn test_compile_simple_program() {
    let module = compiled_module("let x = 42");
    let items = module_items(&module);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].result_type, EType::Integer);
}

#[test]
fn test_compile_curried_function() {
    let source = "\
let add = (a, b) -> a + b
let partial = a -> b -> a + b
";
    let module = compiled_module(source);
    let items = module_items(&module);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].result_type, EType::Function);
    assert_eq!(items[1].result_type, EType::Function);

    // The second form curries into a function returning a function.
    match &items[1].kind {
        NodeKind::Declaration { value, .. } => {
            match &value.as_ref().unwrap().kind {
                NodeKind::ValueFunction { body, .. } => {
                    assert!(matches!(body.kind, NodeKind::ValueFunction { .. }));
                    assert_eq!(body.result_type, EType::Function);
                }
                other => panic!("expected a function value, got {}", other.name()),
            }
        }
        other => panic!("expected a declaration, got {}", other.name()),
    }
}

#[test]
fn test_compile_resolves_across_statements() {
    let source = "\
let greeting = \"hello\"
let shout = s -> s
shout(greeting)
";
    let module = compiled_module(source);
    let items = module_items(&module);

    assert_eq!(items.len(), 3);
    match &items[2].kind {
        NodeKind::FunctionCall {
            expression,
            arguments,
        } => {
            let callee = resolved_record(expression).unwrap();
            assert_eq!(callee.borrow().ty, EType::Function);

            match &arguments.kind {
                NodeKind::ValueTuple { entries } => {
                    let argument = resolved_record(&entries[0]).unwrap();
                    assert_eq!(argument.borrow().ty, EType::String);
                }
                other => panic!("expected tuple arguments, got {}", other.name()),
            }
        }
        other => panic!("expected a call, got {}", other.name()),
    }
    assert_eq!(items[2].result_type, EType::Any);
}

#[test]
fn test_compile_precedence_and_flattening() {
    let module = compiled_module("1 + 2 * 3 + 4");
    let items = module_items(&module);

    match &items[0].kind {
        NodeKind::BinaryOperation {
            operation,
            operands,
        } => {
            assert_eq!(operation.representation, "+");
            assert_eq!(operands.len(), 3);
        }
        other => panic!("expected addition at the root, got {}", other.name()),
    }
    assert_eq!(items[0].result_type, EType::Integer);
}

#[test]
fn test_compile_block_takes_last_statement_type() {
    let module = compiled_module("{ let x = 1 x }");
    let items = module_items(&module);

    assert_eq!(items[0].result_type, EType::Integer);
}

#[test]
fn test_compile_reports_mismatch_but_finishes() {
    let unit = compile_unit("let x: int = \"s\"\nlet y = x").unwrap();

    assert_eq!(unit.diagnostics.len(), 1);
    assert!(unit.diagnostics[0].is_warning());

    // Annotation carried on: `y` adopted the declared type of `x`.
    let items = match unit.module.kind {
        NodeKind::Module { items, .. } => items,
        _ => panic!("compile did not produce a module"),
    };
    assert_eq!(items[1].result_type, EType::Integer);
}

#[test]
fn test_compile_fails_on_lexical_error() {
    let error = compile_unit("let s = \"unterminated").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedEndOfInput");
}

#[test]
fn test_compile_fails_on_syntactic_error() {
    let error = compile_unit("let x = )").unwrap_err();

    assert!(matches!(
        error.get_kind(),
        ErrorKind::UnexpectedToken { .. }
    ));
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 9);
}

#[test]
fn test_compile_whole_unit() {
    let source = "\
// a small program exercising most of the surface
let scale: int = 2
let apply = (f, value) -> f(value)
let double = x -> x * x
apply(double, scale)
";
    let unit = compile_unit(source).unwrap();

    assert!(unit.diagnostics.is_empty());
    match &unit.module.kind {
        NodeKind::Module {
            items,
            global_scope,
            has_errors,
            ..
        } => {
            assert!(!has_errors);
            assert_eq!(items.len(), 4);
            let global_scope = global_scope.as_ref().unwrap().borrow();
            assert_eq!(global_scope.declarations.len(), 3);
        }
        _ => panic!("compile did not produce a module"),
    }
}

#[test]
fn test_compile_empty_source() {
    let unit = compile_unit("").unwrap();

    match &unit.module.kind {
        NodeKind::Module {
            items, has_errors, ..
        } => {
            assert!(items.is_empty());
            assert!(!has_errors);
        }
        _ => panic!("compile did not produce a module"),
    }
}
