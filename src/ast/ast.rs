use std::fmt::Display;
use std::rc::Weak;

use crate::annotation::context::{RecordRef, RecordWeak, ScopeRef, ScopeWeak};
use crate::errors::errors::Error;

use super::operators::Operator;

/// The result type attached to every node by the annotation walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EType {
    Unknown,

    String,
    Character,
    Integer,
    Decimal,

    Function,
    Tuple,

    Any,
}

impl Display for EType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EType::Unknown => "unknown",
            EType::String => "string",
            EType::Character => "character",
            EType::Integer => "integer",
            EType::Decimal => "decimal",
            EType::Function => "function",
            EType::Tuple => "tuple",
            EType::Any => "any",
        };
        write!(f, "{}", name)
    }
}

/// One AST node. The tree owns its children exclusively; `scope` is a
/// non-owning back-reference set exactly once during annotation.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub scope: Option<ScopeWeak>,
    pub result_type: EType,
}

impl Node {
    pub fn new(kind: NodeKind) -> Node {
        Node {
            kind,
            scope: None,
            result_type: EType::Unknown,
        }
    }

    /// The scope the annotator assigned to this node, if still alive.
    pub fn scope(&self) -> Option<ScopeRef> {
        self.scope.as_ref().and_then(Weak::upgrade)
    }
}

/// Every syntactic and value form of the language, one variant each.
///
/// Ownership: child edges are exclusive (`Box`/`Vec` by value). A `Module`
/// owns the global scope and a `ValueFunction` owns the scope shared by its
/// parameters and body; all other scope edges, and the variable→declaration
/// edge, are weak back-references so the scope graph stays acyclic.
#[derive(Debug)]
pub enum NodeKind {
    /// Placeholder used as the root of speculative sub-parses and as the
    /// best-effort payload where parsing failed.
    Unknown,

    Module {
        items: Vec<Node>,
        global_scope: Option<ScopeRef>,
        has_errors: bool,
        error: Option<Error>,
    },

    Declaration {
        name: String,
        declared_type: Option<Box<Node>>,
        value: Option<Box<Node>>,
    },
    Condition {
        expression: Box<Node>,
        clause_true: Box<Node>,
        clause_false: Option<Box<Node>>,
    },

    Block {
        code: Vec<Node>,
    },
    UnaryOperation {
        operation: &'static Operator,
        expression: Box<Node>,
    },
    /// Operator application with two or more operands: same-operator runs
    /// of equal precedence are flattened into one node.
    BinaryOperation {
        operation: &'static Operator,
        operands: Vec<Node>,
    },
    FunctionCall {
        expression: Box<Node>,
        arguments: Box<Node>,
    },

    ValueString(String),
    ValueCharacter(char),
    ValueInteger(String),
    ValueDecimal(String),

    ValueVariable {
        name: String,
        record: Option<RecordWeak>,
    },
    ValueFunction {
        parameters: Vec<Node>,
        body: Box<Node>,
        owned_scope: Option<ScopeRef>,
    },
    ValueTuple {
        entries: Vec<Node>,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Unknown => "unknown",
            NodeKind::Module { .. } => "module",
            NodeKind::Declaration { .. } => "declaration",
            NodeKind::Condition { .. } => "condition",
            NodeKind::Block { .. } => "block",
            NodeKind::UnaryOperation { .. } => "operation-unary",
            NodeKind::BinaryOperation { .. } => "operation-binary",
            NodeKind::FunctionCall { .. } => "call",
            NodeKind::ValueString(_) => "string",
            NodeKind::ValueCharacter(_) => "character",
            NodeKind::ValueInteger(_) => "integer",
            NodeKind::ValueDecimal(_) => "decimal",
            NodeKind::ValueVariable { .. } => "variable",
            NodeKind::ValueFunction { .. } => "function",
            NodeKind::ValueTuple { .. } => "tuple",
        }
    }
}

/// Wraps a node into a one-entry tuple unless it already is a tuple.
/// Function-call arguments and desugared parameter lists always go through
/// this so downstream passes see a tuple in both positions.
pub fn coerce_to_tuple(node: Node) -> Node {
    if let NodeKind::ValueTuple { .. } = node.kind {
        return node;
    }

    Node::new(NodeKind::ValueTuple {
        entries: vec![node],
    })
}

/// Resolves a variable node's declaration record, if it was bound.
pub fn resolved_record(node: &Node) -> Option<RecordRef> {
    match &node.kind {
        NodeKind::ValueVariable { record, .. } => record.as_ref().and_then(Weak::upgrade),
        _ => None,
    }
}

pub fn make_binary_operation(left: Node, right: Node, operation: &'static Operator) -> Node {
    Node::new(NodeKind::BinaryOperation {
        operation,
        operands: vec![left, right],
    })
}
