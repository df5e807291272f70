use crate::ast::ast::{coerce_to_tuple, make_binary_operation, Node, NodeKind};
use crate::ast::operators::{find_operator, unknown_operator, Operator};
use crate::errors::errors::{Error, ErrorKind};
use crate::lexer::tokens::{TokenKind, TokenSubKind};
use crate::Position;

use super::parser::ParserState;
use super::stmt::parse_statement;

/// Upper bound on the scanned representation during operator matching.
/// Nothing in the table is longer than two characters, so five leaves
/// room without letting a run of operator tokens scan unboundedly.
const MAX_OPERATOR_LENGTH: usize = 5;

/// Greedy longest-match operator scanner.
///
/// Coalesces consecutive single-character operator tokens into the longest
/// prefix that exactly matches a table entry, then rewinds the cursor to
/// just past the matched representation. With no operator-class token at
/// the cursor the unknown sentinel is returned, the cursor stays put and
/// the recorded error is left for the caller's save/restore to clear.
pub fn parse_operator(state: &mut ParserState) -> &'static Operator {
    state.save();
    state.consume_kind(TokenKind::Operator);
    if state.is_failed() {
        state.drop_save();
        return unknown_operator();
    }
    state.restore();

    let mut operation = unknown_operator();
    let mut representation = String::new();

    state.save();
    while state.peek().kind == TokenKind::Operator && representation.len() < MAX_OPERATOR_LENGTH {
        representation.push_str(&state.peek().value);
        state.advance();

        if let Some(matched) = find_operator(&representation) {
            operation = matched;
        }
    }
    state.restore();

    // Overshoot correction: re-consume exactly the matched length.
    for _ in 0..operation.representation.len() {
        state.advance();
    }

    operation
}

/// Parses one full expression starting from a fresh composite unit.
pub fn parse_expression(state: &mut ParserState) -> Node {
    let left_operand = parse_composite_unit(state);

    if state.is_failed() {
        return left_operand;
    }

    parse_expression_from(left_operand, state, 0)
}

/// Precedence climbing over `left_operand`, folding operators whose
/// precedence exceeds `base_priority`.
///
/// Runs of the same operator at equal precedence are flattened into one
/// node with three or more operands instead of a nested pair chain. A
/// strictly tighter-binding follower triggers a recursive climb on the
/// right operand; a trailing operator at or below `base_priority` is
/// un-consumed so the caller's own loop can pick it up.
pub fn parse_expression_from(
    mut left_operand: Node,
    state: &mut ParserState,
    base_priority: u32,
) -> Node {
    state.save();
    let mut operation = parse_operator(state);
    if operation == unknown_operator() || operation.precedence < base_priority {
        state.restore();
        return left_operand;
    }
    state.drop_save();

    let mut right_operand = parse_composite_unit(state);
    if state.is_failed() {
        return left_operand;
    }

    state.save();
    let mut next_operation = parse_operator(state);
    if state.is_failed() {
        state.restore();
    } else {
        state.drop_save();
    }

    while next_operation.precedence > base_priority {
        if next_operation.precedence > operation.precedence {
            // The follower binds tighter: un-consume it and let the right
            // operand absorb everything above this operator's precedence.
            state.rewind(next_operation.representation.len());
            right_operand = parse_expression_from(right_operand, state, operation.precedence);
            if state.is_failed() {
                return left_operand;
            }

            state.save();
            next_operation = parse_operator(state);
            if state.is_failed() {
                state.restore();
                break;
            }
            state.drop_save();

            if next_operation.precedence <= base_priority {
                break;
            }
        }

        left_operand = fold(left_operand, right_operand, operation);
        operation = next_operation;

        right_operand = parse_composite_unit(state);
        if state.is_failed() {
            return left_operand;
        }

        state.save();
        next_operation = parse_operator(state);
        if state.is_failed() {
            state.restore();
            break;
        }
        state.drop_save();
    }

    if next_operation.precedence <= base_priority {
        state.rewind(next_operation.representation.len());
    }

    fold(left_operand, right_operand, operation)
}

/// Appends `right` to `left` when `left` already is the same operator's
/// node (n-ary flattening), otherwise wraps both into a fresh 2-operand
/// node.
fn fold(left: Node, right: Node, operation: &'static Operator) -> Node {
    match left {
        Node {
            kind:
                NodeKind::BinaryOperation {
                    operation: existing,
                    mut operands,
                },
            ..
        } if existing == operation => {
            operands.push(right);
            Node::new(NodeKind::BinaryOperation {
                operation: existing,
                operands,
            })
        }
        left => make_binary_operation(left, right, operation),
    }
}

/// A primary unit extended with postfix application: `f(x)(y)` becomes
/// nested FunctionCall nodes, the argument always coerced into a tuple.
pub fn parse_composite_unit(state: &mut ParserState) -> Node {
    let mut unit = parse_unit(state);
    if state.is_failed() {
        return unit;
    }

    while state.peek().sub_kind == TokenSubKind::RoundLeft {
        let arguments = coerce_to_tuple(parse_unit(state));
        unit = Node::new(NodeKind::FunctionCall {
            expression: Box::new(unit),
            arguments: Box::new(arguments),
        });

        if state.is_failed() {
            return unit;
        }
    }

    unit
}

/// One primary unit: a parenthesized expression or empty tuple, a block,
/// a signed unit, or a plain value.
pub fn parse_unit(state: &mut ParserState) -> Node {
    if state.peek().sub_kind == TokenSubKind::RoundLeft {
        state.advance();

        if state.peek().sub_kind == TokenSubKind::RoundRight {
            state.advance();
            return Node::new(NodeKind::ValueTuple { entries: vec![] });
        }

        let result = parse_expression(state);
        if !state.is_failed() {
            state.consume(TokenSubKind::RoundRight);
        }
        return result;
    }

    if state.peek().sub_kind == TokenSubKind::CurlyLeft {
        state.advance();

        let mut code = vec![];
        while !state.is_eof()
            && !state.is_failed()
            && state.peek().sub_kind != TokenSubKind::CurlyRight
        {
            code.push(parse_statement(state));
        }
        if !state.is_failed() {
            state.consume(TokenSubKind::CurlyRight);
        }
        return Node::new(NodeKind::Block { code });
    }

    if state.peek().sub_kind == TokenSubKind::Dash || state.peek().sub_kind == TokenSubKind::Plus {
        let operation = parse_operator(state);
        let expression = parse_composite_unit(state);
        return Node::new(NodeKind::UnaryOperation {
            operation,
            expression: Box::new(expression),
        });
    }

    parse_value(state)
}

/// One literal or variable, tried speculatively in a fixed order. Each
/// attempt is wrapped in save/restore so a miss cannot move the cursor.
/// When nothing matches an explicit error is recorded; silently accepting
/// the token would hide invalid input.
pub fn parse_value(state: &mut ParserState) -> Node {
    state.save();
    let token = state.consume(TokenSubKind::Integer);
    if !state.is_failed() {
        state.drop_save();
        return Node::new(NodeKind::ValueInteger(token.value));
    }
    state.restore();

    state.save();
    let token = state.consume(TokenSubKind::Decimal);
    if !state.is_failed() {
        state.drop_save();
        return Node::new(NodeKind::ValueDecimal(token.value));
    }
    state.restore();

    state.save();
    let token = state.consume(TokenSubKind::Identifier);
    if !state.is_failed() {
        state.drop_save();
        return Node::new(NodeKind::ValueVariable {
            name: token.value,
            record: None,
        });
    }
    state.restore();

    state.save();
    let token = state.consume(TokenSubKind::String);
    if !state.is_failed() {
        state.drop_save();
        return Node::new(NodeKind::ValueString(token.value));
    }
    state.restore();

    state.save();
    let token = state.consume(TokenSubKind::Character);
    if !state.is_failed() {
        state.drop_save();
        let value = token.value.chars().next().unwrap_or('\0');
        return Node::new(NodeKind::ValueCharacter(value));
    }
    state.restore();

    let found = state.peek().describe();
    let position = Position {
        line: state.peek().line,
        column: state.peek().column,
    };
    state.error = Some(Error::new(
        ErrorKind::UnexpectedToken {
            expected: String::from("value"),
            found,
        },
        position,
    ));
    Node::new(NodeKind::Unknown)
}

/// A dedicated type grammar does not exist yet; declarations reuse the
/// expression grammar instead (see `parse_declaration`). Calling this is
/// reported with the fatal internal code.
pub fn parse_type(state: &mut ParserState) -> Node {
    let position = Position {
        line: state.peek().line,
        column: state.peek().column,
    };
    state.error = Some(Error::new(
        ErrorKind::FatalInternal {
            message: String::from("function 'parse_type' is not implemented"),
        },
        position,
    ));
    Node::new(NodeKind::Unknown)
}
