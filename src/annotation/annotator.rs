use std::collections::HashMap;
use std::rc::Rc;

use lazy_static::lazy_static;

use crate::ast::ast::{EType, Node, NodeKind};
use crate::errors::errors::{Error, ErrorKind};
use crate::Position;

use super::context::{Scope, ScopeRef};

lazy_static! {
    /// Names accepted as primitive type tags in declaration annotations.
    /// A tag only applies when the name does not resolve to a declaration,
    /// so user bindings shadow the tags.
    static ref TYPE_TAGS: HashMap<&'static str, EType> = {
        let mut tags = HashMap::new();
        tags.insert("int", EType::Integer);
        tags.insert("float", EType::Decimal);
        tags.insert("string", EType::String);
        tags.insert("function", EType::Function);
        tags
    };
}

/// Annotates a module tree in place: builds the scope chain, binds
/// variables to their declarations and fills in result types. Returns the
/// semantic mismatch diagnostics; the walk itself never fails.
pub fn annotate(module: &mut Node) -> Vec<Error> {
    let root = Scope::new_root();
    if let NodeKind::Module { global_scope, .. } = &mut module.kind {
        *global_scope = Some(Rc::clone(&root));
    }

    let mut annotator = Annotator { diagnostics: vec![] };
    annotator.visit(module, &root, false);
    annotator.diagnostics
}

struct Annotator {
    diagnostics: Vec<Error>,
}

impl Annotator {
    fn report_mismatch(&mut self, expected: EType, received: EType) {
        self.diagnostics.push(Error::new(
            ErrorKind::TypeMismatch {
                expected: expected.to_string(),
                received: received.to_string(),
            },
            Position::null(),
        ));
    }

    /// One visit step. `register` makes unresolved bare variables declare
    /// themselves in `scope`; it is only ever raised for function
    /// parameters.
    fn visit(&mut self, node: &mut Node, scope: &ScopeRef, register: bool) {
        node.scope = Some(Rc::downgrade(scope));

        match &mut node.kind {
            NodeKind::Unknown => {}

            NodeKind::Module { items, .. } => {
                for item in items.iter_mut() {
                    self.visit(item, scope, register);
                }
            }

            NodeKind::Declaration {
                name,
                declared_type,
                value,
            } => {
                let mut declared = EType::Unknown;
                if let Some(declared_type) = declared_type {
                    self.visit(declared_type, scope, false);
                    declared = primitive_tag(declared_type);
                    declared_type.result_type = declared;
                }

                // Registered before the initializer runs, so a value may
                // refer to the binding it initializes.
                let record = Scope::add(scope, name, declared);

                let mut inferred = EType::Unknown;
                if let Some(value) = value {
                    self.visit(value, scope, register);
                    inferred = value.result_type;
                }

                let resolved = if declared == EType::Unknown {
                    inferred
                } else {
                    if inferred != EType::Unknown && inferred != declared {
                        self.report_mismatch(declared, inferred);
                    }
                    declared
                };

                record.borrow_mut().ty = resolved;
                node.result_type = resolved;
            }

            NodeKind::Condition {
                expression,
                clause_true,
                clause_false,
            } => {
                self.visit(expression, scope, register);
                self.visit(clause_true, scope, register);

                node.result_type = match clause_false {
                    Some(clause_false) => {
                        self.visit(clause_false, scope, register);
                        if clause_false.result_type == clause_true.result_type {
                            clause_true.result_type
                        } else {
                            clause_false.result_type
                        }
                    }
                    // The expression may bypass the clause entirely.
                    None => EType::Any,
                };
            }

            NodeKind::Block { code } => {
                for statement in code.iter_mut() {
                    self.visit(statement, scope, register);
                }
                node.result_type = match code.last() {
                    Some(last) => last.result_type,
                    None => EType::Unknown,
                };
            }

            NodeKind::UnaryOperation { expression, .. } => {
                self.visit(expression, scope, register);
                node.result_type = expression.result_type;
            }

            NodeKind::BinaryOperation {
                operation,
                operands,
            } => {
                // The first operand of a cast names a use, never a fresh
                // binding, whatever mode the caller is in.
                let is_cast = operation.representation == ":";
                let mut running = EType::Unknown;

                for (position, operand) in operands.iter_mut().enumerate() {
                    let operand_register = if is_cast && position == 0 {
                        false
                    } else {
                        register
                    };
                    self.visit(operand, scope, operand_register);

                    if position == 0 {
                        running = operand.result_type;
                        continue;
                    }

                    let ty = operand.result_type;
                    if ty != EType::Unknown && ty != EType::Any && ty != running {
                        self.report_mismatch(running, ty);
                        running = EType::Any;
                    }
                }

                node.result_type = running;
            }

            NodeKind::FunctionCall {
                expression,
                arguments,
            } => {
                self.visit(expression, scope, register);
                self.visit(arguments, scope, register);
                node.result_type = EType::Any;
            }

            NodeKind::ValueFunction {
                parameters,
                body,
                owned_scope,
            } => {
                let inner = Scope::child_of(scope);
                *owned_scope = Some(Rc::clone(&inner));

                for parameter in parameters.iter_mut() {
                    self.visit(parameter, &inner, true);
                }
                self.visit(body, &inner, register);

                node.result_type = EType::Function;
            }

            NodeKind::ValueTuple { entries } => {
                for entry in entries.iter_mut() {
                    self.visit(entry, scope, register);
                }
                node.result_type = EType::Tuple;
            }

            NodeKind::ValueVariable { name, record } => {
                let matches = scope.borrow().find(name);
                if let Some(nearest) = matches.first() {
                    *record = Some(Rc::downgrade(nearest));
                    node.result_type = nearest.borrow().ty;
                } else if register {
                    let created = Scope::add(scope, name, EType::Unknown);
                    *record = Some(Rc::downgrade(&created));
                }
                // An unresolved use outside registering mode stays unbound
                // with type Unknown; no diagnostic is raised for it.
            }

            NodeKind::ValueString(_) => node.result_type = EType::String,
            NodeKind::ValueCharacter(_) => node.result_type = EType::Character,
            NodeKind::ValueInteger(_) => node.result_type = EType::Integer,
            NodeKind::ValueDecimal(_) => node.result_type = EType::Decimal,
        }
    }
}

/// Maps a declared-type expression to a primitive type: a bare variable
/// named after a tag that did not resolve to a user declaration. Anything
/// else stays `Unknown`; there are no user-defined types yet.
fn primitive_tag(declared_type: &Node) -> EType {
    match &declared_type.kind {
        NodeKind::ValueVariable { name, record } if record.is_none() => {
            match TYPE_TAGS.get(name.as_str()) {
                Some(tag) => *tag,
                None => EType::Unknown,
            }
        }
        _ => EType::Unknown,
    }
}
