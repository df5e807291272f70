use crate::ast::ast::Node;
use crate::errors::errors::{Error, ErrorKind};
use crate::lexer::tokens::{kind_name, sub_kind_name, Token, TokenKind, TokenSubKind};
use crate::Position;

use super::stmt::parse_module;

/// Transactional cursor over the token stream.
///
/// Holds the current index, a stack of save points and at most one current
/// error. `consume` records a failure instead of raising it; speculative
/// productions wrap themselves in `save`/`restore` to roll position *and*
/// error back, which is the only way an error is ever cleared.
pub struct ParserState {
    tokens: Vec<Token>,
    pub index: usize,
    saves: Vec<usize>,
    pub error: Option<Error>,
}

impl ParserState {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            tokens.push(Token::eof(1, 1));
        }

        ParserState {
            tokens,
            index: 0,
            saves: vec![],
            error: None,
        }
    }

    /// Current token, never out of bounds: `advance` refuses to move past
    /// the synthetic eof token.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    pub fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Moves the cursor back by `count` tokens; used to un-consume a
    /// trailing operator whose precedence belongs to an outer call.
    pub fn rewind(&mut self, count: usize) {
        self.index -= count;
    }

    pub fn is_eof(&self) -> bool {
        self.index + 1 >= self.tokens.len()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    fn position(&self) -> Position {
        let token = self.peek();
        Position {
            line: token.line,
            column: token.column,
        }
    }

    fn fail_expecting(&mut self, expected: String) {
        let found = self.peek().describe();
        self.error = Some(Error::new(
            ErrorKind::UnexpectedToken { expected, found },
            self.position(),
        ));
    }

    /// Consumes the current token if its kind matches; otherwise records
    /// an unexpected-token error and leaves the cursor where it is. The
    /// token is returned either way.
    pub fn consume_kind(&mut self, kind: TokenKind) -> Token {
        let token = self.peek().clone();
        if token.kind != kind {
            self.fail_expecting(kind_name(kind).to_string());
            return token;
        }

        self.advance();
        token
    }

    pub fn consume(&mut self, sub_kind: TokenSubKind) -> Token {
        let token = self.peek().clone();
        if token.sub_kind != sub_kind {
            self.fail_expecting(sub_kind_name(sub_kind).to_string());
            return token;
        }

        self.advance();
        token
    }

    pub fn consume_exact(&mut self, sub_kind: TokenSubKind, value: &str) -> Token {
        let token = self.peek().clone();
        if token.sub_kind != sub_kind || token.value != value {
            self.fail_expecting(format!("{}({})", sub_kind_name(sub_kind), value));
            return token;
        }

        self.advance();
        token
    }

    /// Pushes a save point for a speculative parse.
    pub fn save(&mut self) {
        self.saves.push(self.index);
    }

    /// Commits a successful speculative parse: pops the save point without
    /// touching position or error.
    pub fn drop_save(&mut self) {
        self.saves.pop();
    }

    /// Aborts a speculative parse: pops the save point, resets the cursor
    /// to it and clears the current error.
    pub fn restore(&mut self) {
        if let Some(index) = self.saves.pop() {
            self.index = index;
        }
        self.error = None;
    }
}

/// Parses a whole token stream into a Module node. The module is returned
/// even on failure, with `has_errors` set and the most recent error
/// captured for reporting.
pub fn parse(tokens: Vec<Token>) -> Node {
    let mut state = ParserState::new(tokens);
    parse_module(&mut state)
}
