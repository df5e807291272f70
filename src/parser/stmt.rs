use crate::ast::ast::{Node, NodeKind};
use crate::lexer::tokens::TokenSubKind;

use super::expr::{parse_expression, parse_expression_from};
use super::parser::ParserState;

/// A statement is either a `let` declaration or a bare expression.
pub fn parse_statement(state: &mut ParserState) -> Node {
    let token = state.peek();
    if token.sub_kind == TokenSubKind::Identifier && token.value == "let" {
        return parse_declaration(state);
    }

    parse_expression(state)
}

/// Parses `let <name> [: <type>] = <value>`.
///
/// The optional type annotation has no grammar of its own. A placeholder
/// node stands in as the left operand of an expression parse bounded just
/// below `=`: when the annotation is present the result comes back as a
/// 2-operand `:` application whose second operand is the type, and when it
/// is absent the `=` is rejected by the bound and the placeholder comes
/// back untouched with the cursor exactly where it started.
pub fn parse_declaration(state: &mut ParserState) -> Node {
    state.consume_exact(TokenSubKind::Identifier, "let");
    if state.is_failed() {
        return Node::new(NodeKind::Unknown);
    }

    let name = state.consume(TokenSubKind::Identifier);
    if state.is_failed() {
        return Node::new(NodeKind::Unknown);
    }

    let placeholder = Node::new(NodeKind::Unknown);
    let annotation = parse_expression_from(placeholder, state, 2);
    if state.is_failed() {
        return Node::new(NodeKind::Declaration {
            name: name.value,
            declared_type: None,
            value: None,
        });
    }

    let mut declared_type = None;
    if let NodeKind::BinaryOperation {
        operation,
        mut operands,
    } = annotation.kind
    {
        if operation.representation == ":" && operands.len() == 2 {
            if let Some(ty) = operands.pop() {
                declared_type = Some(Box::new(ty));
            }
        }
    }

    state.consume(TokenSubKind::Equal);
    if state.is_failed() {
        return Node::new(NodeKind::Declaration {
            name: name.value,
            declared_type,
            value: None,
        });
    }

    let value = parse_expression(state);
    Node::new(NodeKind::Declaration {
        name: name.value,
        declared_type,
        value: Some(Box::new(value)),
    })
}

/// Parses statements until the end of input or the first unrecovered
/// failure. The module is produced either way; a failure is recorded on it
/// rather than raised.
pub fn parse_module(state: &mut ParserState) -> Node {
    let mut items = vec![];
    while !state.is_eof() && !state.is_failed() {
        items.push(parse_statement(state));
    }

    Node::new(NodeKind::Module {
        items,
        global_scope: None,
        has_errors: state.is_failed(),
        error: state.error.clone(),
    })
}
