use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// One entry of the operator table. Operators are compared by id; the
/// entry at index 0 is the "unknown operator" sentinel returned by the
/// matcher when nothing in the table fits.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    pub id: u32,
    pub representation: &'static str,
    pub precedence: u32,
    pub associativity: Associativity,
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Operator {}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.representation)
    }
}

const fn op(
    id: u32,
    representation: &'static str,
    precedence: u32,
    associativity: Associativity,
) -> Operator {
    Operator {
        id,
        representation,
        precedence,
        associativity,
    }
}

use Associativity::{Left, Right};

/// The operator table is fixed and ordered; symbols, precedences and
/// associativities are part of the language surface and must not change.
pub static OPERATORS: [Operator; 22] = [
    op(0, "", 0, Left), //  0 - unknown
    //
    op(1, ".", 1000, Left), //  1 - member access
    //
    op(2, "^", 250, Right), //  2 - power
    //
    op(3, "*", 200, Left), //  3 - multiplication
    op(4, "/", 200, Left), //  4 - division
    op(5, "%", 200, Left), //  5 - modulus
    //
    op(6, "+", 100, Left), //  6 - addition
    op(7, "-", 100, Left), //  7 - subtraction
    //
    op(8, ">=", 50, Left), //  8 - greater or equal
    op(9, "<=", 50, Left), //  9 - less or equal
    op(10, ">", 50, Left), // 10 - greater than
    op(11, "<", 50, Left), // 11 - less than
    //
    op(12, "==", 40, Left), // 12 - equality
    op(13, "!=", 40, Left), // 13 - inequality
    //
    op(14, "&", 25, Left), // 14 - bitwise and
    op(15, "|", 20, Left), // 15 - bitwise or
    //
    op(16, "&&", 15, Left), // 16 - logical and
    op(17, "||", 10, Left), // 17 - logical or
    //
    op(18, "->", 4, Right), // 18 - lambda function
    op(19, ",", 3, Left),   // 19 - tupling
    //
    op(20, ":", 2, Left), // 20 - type cast
    //
    op(21, "=", 1, Right), // 21 - assignment
];

pub fn unknown_operator() -> &'static Operator {
    &OPERATORS[0]
}

pub fn find_operator(representation: &str) -> Option<&'static Operator> {
    OPERATORS
        .iter()
        .find(|op| !op.representation.is_empty() && op.representation == representation)
}
