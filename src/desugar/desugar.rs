use crate::ast::ast::{coerce_to_tuple, Node, NodeKind};

/// Rewrites `->` and `,` operator nodes into function and tuple values,
/// children first so nested sugar is resolved before its parent.
pub fn desugar(node: &mut Node) {
    match &mut node.kind {
        NodeKind::Module { items, .. } => {
            for item in items {
                desugar(item);
            }
        }
        NodeKind::Declaration {
            declared_type,
            value,
            ..
        } => {
            if let Some(declared_type) = declared_type {
                desugar(declared_type);
            }
            if let Some(value) = value {
                desugar(value);
            }
        }
        NodeKind::Condition {
            expression,
            clause_true,
            clause_false,
        } => {
            desugar(expression);
            desugar(clause_true);
            if let Some(clause_false) = clause_false {
                desugar(clause_false);
            }
        }
        NodeKind::Block { code } => {
            for statement in code {
                desugar(statement);
            }
        }
        NodeKind::UnaryOperation { expression, .. } => desugar(expression),
        NodeKind::BinaryOperation { operands, .. } => {
            for operand in operands {
                desugar(operand);
            }
        }
        NodeKind::FunctionCall {
            expression,
            arguments,
        } => {
            desugar(expression);
            desugar(arguments);
        }
        NodeKind::ValueFunction {
            parameters, body, ..
        } => {
            for parameter in parameters {
                desugar(parameter);
            }
            desugar(body);
        }
        NodeKind::ValueTuple { entries } => {
            for entry in entries {
                desugar(entry);
            }
        }
        _ => {}
    }

    if let NodeKind::BinaryOperation {
        operation,
        operands,
    } = &mut node.kind
    {
        match operation.representation {
            "->" => {
                let mut operands = std::mem::take(operands);
                if let Some(mut body) = operands.pop() {
                    // Fold right-to-left: every operand but the last becomes
                    // the parameter list of one currying level.
                    while let Some(parameter) = operands.pop() {
                        body = Node::new(NodeKind::ValueFunction {
                            parameters: parameter_list(parameter),
                            body: Box::new(body),
                            owned_scope: None,
                        });
                    }
                    *node = body;
                }
            }
            "," => {
                let entries = std::mem::take(operands);
                *node = Node::new(NodeKind::ValueTuple { entries });
            }
            _ => {}
        }
    }
}

/// A parameter position always yields a list: a tuple contributes its
/// entries, anything else becomes the sole parameter.
fn parameter_list(parameter: Node) -> Vec<Node> {
    match coerce_to_tuple(parameter) {
        Node {
            kind: NodeKind::ValueTuple { entries },
            ..
        } => entries,
        other => vec![other],
    }
}
