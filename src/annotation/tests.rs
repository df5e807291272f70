//! Unit tests for scope management and type annotation.

use std::rc::Rc;

use crate::ast::ast::{resolved_record, EType, Node, NodeKind};
use crate::compile_unit;

use super::annotator::annotate;
use super::context::Scope;

// The module is returned whole: destructuring it would drop the global
// scope and with it every record the weak references point at.
fn compiled_module(source: &str) -> Node {
    let unit = compile_unit(source).unwrap();
    assert!(
        unit.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        unit.diagnostics
    );
    unit.module
}

fn module_items(module: &Node) -> &[Node] {
    match &module.kind {
        NodeKind::Module { items, .. } => items,
        _ => panic!("compile did not produce a module"),
    }
}

fn declaration_value(node: &Node) -> &Node {
    match &node.kind {
        NodeKind::Declaration { value, .. } => value.as_ref().unwrap(),
        other => panic!("expected a declaration, got {}", other.name()),
    }
}

fn integer_literal(value: &str) -> Node {
    Node::new(NodeKind::ValueInteger(value.to_string()))
}

#[test]
fn test_find_prefers_innermost_declarations() {
    let root = Scope::new_root();
    let child = Scope::child_of(&root);
    let outer = Scope::add(&root, "x", EType::String);
    let inner = Scope::add(&child, "x", EType::Integer);

    let matches = child.borrow().find("x");

    assert_eq!(matches.len(), 2);
    assert!(Rc::ptr_eq(&matches[0], &inner));
    assert!(Rc::ptr_eq(&matches[1], &outer));
}

#[test]
fn test_scope_ids_are_monotonic() {
    let module = compiled_module("let f = a -> b -> a");
    let items = module_items(&module);

    let outer = declaration_value(&items[0]);
    let (outer_scope, body) = match &outer.kind {
        NodeKind::ValueFunction {
            body, owned_scope, ..
        } => (owned_scope.as_ref().unwrap(), body),
        other => panic!("expected a function value, got {}", other.name()),
    };
    let inner_scope = match &body.kind {
        NodeKind::ValueFunction { owned_scope, .. } => owned_scope.as_ref().unwrap(),
        other => panic!("expected a nested function, got {}", other.name()),
    };

    let root_id = items[0].scope().unwrap().borrow().id;
    assert!(root_id < outer_scope.borrow().id);
    assert!(outer_scope.borrow().id < inner_scope.borrow().id);
}

#[test]
fn test_parameter_shadows_outer_declaration() {
    let module = compiled_module("let x = \"s\" let f = x -> x x");
    let items = module_items(&module);

    let function = declaration_value(&items[1]);
    let (parameters, body, owned_scope) = match &function.kind {
        NodeKind::ValueFunction {
            parameters,
            body,
            owned_scope,
        } => (parameters, body, owned_scope.as_ref().unwrap()),
        other => panic!("expected a function value, got {}", other.name()),
    };

    // Inside the body, `x` is the parameter's record, not the outer let.
    let parameter_record = resolved_record(&parameters[0]).unwrap();
    let body_record = resolved_record(body).unwrap();
    assert!(Rc::ptr_eq(&parameter_record, &body_record));
    assert_eq!(
        body_record.borrow().scope.upgrade().unwrap().borrow().id,
        owned_scope.borrow().id
    );

    // Outside the function, `x` is the outer declaration again.
    let outer_record = resolved_record(&items[2]).unwrap();
    assert!(!Rc::ptr_eq(&outer_record, &parameter_record));
    assert_eq!(outer_record.borrow().ty, EType::String);
    assert_eq!(items[2].result_type, EType::String);
}

#[test]
fn test_parameters_register_without_let() {
    let module = compiled_module("let f = (a, b) -> a + b");
    let items = module_items(&module);

    let function = declaration_value(&items[0]);
    match &function.kind {
        NodeKind::ValueFunction { owned_scope, .. } => {
            let scope = owned_scope.as_ref().unwrap().borrow();
            assert_eq!(scope.declarations.len(), 2);
            assert_eq!(scope.declarations[0].borrow().name, "a");
            assert_eq!(scope.declarations[1].borrow().name, "b");
        }
        other => panic!("expected a function value, got {}", other.name()),
    }
}

#[test]
fn test_declared_type_wins_a_mismatch() {
    let unit = compile_unit("let x: int = \"s\"").unwrap();

    assert_eq!(unit.diagnostics.len(), 1);
    assert_eq!(unit.diagnostics[0].get_error_name(), "TypeMismatch");
    assert!(unit.diagnostics[0].is_warning());

    let records = unit
        .module
        .scope()
        .map(|scope| scope.borrow().get("x"))
        .unwrap();
    assert_eq!(records[0].borrow().ty, EType::Integer);

    let items = match unit.module.kind {
        NodeKind::Module { items, .. } => items,
        _ => panic!("compile did not produce a module"),
    };
    assert_eq!(items[0].result_type, EType::Integer);
}

#[test]
fn test_declaration_adopts_initializer_type() {
    let module = compiled_module("let x = 3.5");
    let items = module_items(&module);

    assert_eq!(items[0].result_type, EType::Decimal);
}

#[test]
fn test_user_binding_defeats_type_tag() {
    // `int` resolves to the user declaration, so it no longer names the
    // primitive type and the annotation contributes nothing.
    let module = compiled_module("let int = 5 let x: int = \"s\"");
    let items = module_items(&module);

    assert_eq!(items[1].result_type, EType::String);
}

#[test]
fn test_function_value_has_function_type() {
    let module = compiled_module("let f = a -> a");
    let items = module_items(&module);

    assert_eq!(declaration_value(&items[0]).result_type, EType::Function);
    assert_eq!(items[0].result_type, EType::Function);

    let records = items[0].scope().unwrap().borrow().find("f");
    assert_eq!(records[0].borrow().ty, EType::Function);
}

#[test]
fn test_call_result_is_any() {
    let module = compiled_module("let f = a -> a f(1)");
    let items = module_items(&module);

    assert_eq!(items[1].result_type, EType::Any);
}

#[test]
fn test_binary_operands_must_agree() {
    let unit = compile_unit("1 + \"s\"").unwrap();

    assert_eq!(unit.diagnostics.len(), 1);
    let items = match unit.module.kind {
        NodeKind::Module { items, .. } => items,
        _ => panic!("compile did not produce a module"),
    };
    assert_eq!(items[0].result_type, EType::Any);
}

#[test]
fn test_binary_agreeing_operands_keep_their_type() {
    let module = compiled_module("1 + 2 + 3");
    let items = module_items(&module);

    assert_eq!(items[0].result_type, EType::Integer);
}

#[test]
fn unresolved_variable_is_permitted() {
    let unit = compile_unit("x").unwrap();

    assert!(unit.diagnostics.is_empty());
    let items = match unit.module.kind {
        NodeKind::Module { items, .. } => items,
        _ => panic!("compile did not produce a module"),
    };
    assert!(resolved_record(&items[0]).is_none());
    assert_eq!(items[0].result_type, EType::Unknown);
}

#[test]
fn test_condition_without_false_clause_is_any() {
    let mut node = Node::new(NodeKind::Condition {
        expression: Box::new(integer_literal("1")),
        clause_true: Box::new(integer_literal("2")),
        clause_false: None,
    });

    let diagnostics = annotate(&mut node);

    assert!(diagnostics.is_empty());
    assert_eq!(node.result_type, EType::Any);
}

#[test]
fn test_condition_with_agreeing_clauses() {
    let mut node = Node::new(NodeKind::Condition {
        expression: Box::new(integer_literal("1")),
        clause_true: Box::new(integer_literal("2")),
        clause_false: Some(Box::new(integer_literal("3"))),
    });

    annotate(&mut node);

    assert_eq!(node.result_type, EType::Integer);
}

#[test]
fn test_condition_with_disagreeing_clauses() {
    let mut node = Node::new(NodeKind::Condition {
        expression: Box::new(integer_literal("1")),
        clause_true: Box::new(integer_literal("2")),
        clause_false: Some(Box::new(Node::new(NodeKind::ValueString(
            "s".to_string(),
        )))),
    });

    annotate(&mut node);

    assert_eq!(node.result_type, EType::String);
}

#[test]
fn test_cast_target_is_not_registered() {
    // Even in registering position, the first operand of `:` is a use and
    // stays unbound; only the later operands inherit registering mode.
    let module = compiled_module("let f = (x: int) -> x");
    let items = module_items(&module);

    let function = declaration_value(&items[0]);
    match &function.kind {
        NodeKind::ValueFunction { owned_scope, .. } => {
            let scope = owned_scope.as_ref().unwrap().borrow();
            assert!(scope.get("x").is_empty());
            assert_eq!(scope.get("int").len(), 1);
        }
        other => panic!("expected a function value, got {}", other.name()),
    }
}
