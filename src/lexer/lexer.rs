use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::{Error, ErrorKind};
use crate::Position;

use super::tokens::{character_sub_kind, Token, TokenKind, TokenSubKind};

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").unwrap();
    static ref NUMBER_RE: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?").unwrap();
}

pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Lexer<'src> {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    /// Skips whitespace and `//` line comments. Iterative on purpose: a
    /// comment running to the end of input terminates on the eof check.
    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(|c| c.is_whitespace()) {
                self.advance();
            }

            if self.remainder().starts_with("//") {
                while !self.at_eof() && self.peek() != Some('\n') {
                    self.advance();
                }
                continue;
            }

            return;
        }
    }

    fn scan_string(&mut self) -> Result<Token, Error> {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => {
                    return Err(Error::new(
                        ErrorKind::UnexpectedEndOfInput {
                            message: String::from("string was not closed"),
                        },
                        self.position(),
                    ))
                }
            };

            if c == '"' {
                self.advance();
                break;
            }

            if c == '\\' {
                self.advance();
                match self.peek() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('s') => value.push(' '),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some(other) => {
                        // Unknown escapes pass through verbatim.
                        value.push('\\');
                        value.push(other);
                    }
                    None => {
                        return Err(Error::new(
                            ErrorKind::UnexpectedEndOfInput {
                                message: String::from("string was not closed"),
                            },
                            self.position(),
                        ))
                    }
                }
                self.advance();
                continue;
            }

            value.push(c);
            self.advance();
        }

        Ok(Token {
            kind: TokenKind::String,
            sub_kind: TokenSubKind::String,
            value,
            line,
            column,
        })
    }

    fn scan_character(&mut self) -> Result<Token, Error> {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote

        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Err(Error::new(
                    ErrorKind::UnexpectedEndOfInput {
                        message: String::from("character literal was not closed"),
                    },
                    self.position(),
                ))
            }
        };

        if c.is_whitespace() || c.is_control() {
            return Err(Error::new(ErrorKind::MisleadingCharacter, self.position()));
        }

        let resolved = if c == '\\' {
            self.advance();
            match self.peek() {
                Some('r') => '\r',
                Some('n') => '\n',
                Some('t') => '\t',
                Some('s') => ' ',
                Some(other) => {
                    return Err(Error::new(
                        ErrorKind::UnknownEscape { escape: other },
                        self.position(),
                    ))
                }
                None => {
                    return Err(Error::new(
                        ErrorKind::UnexpectedEndOfInput {
                            message: String::from("character literal was not closed"),
                        },
                        self.position(),
                    ))
                }
            }
        } else {
            c
        };
        self.advance();

        if self.peek() != Some('\'') {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfInput {
                    message: String::from("character literal was not closed"),
                },
                self.position(),
            ));
        }
        self.advance();

        Ok(Token {
            kind: TokenKind::Character,
            sub_kind: TokenSubKind::Character,
            value: resolved.to_string(),
            line,
            column,
        })
    }

    fn scan_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        // The scanner only enters here on an ascii digit, so the pattern
        // always matches.
        let matched = NUMBER_RE
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        self.advance_n(matched.chars().count());

        let sub_kind = if matched.contains('.') {
            TokenSubKind::Decimal
        } else {
            TokenSubKind::Integer
        };

        Token {
            kind: TokenKind::Number,
            sub_kind,
            value: matched,
            line,
            column,
        }
    }

    fn scan_identifier(&mut self, matched: &str) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance_n(matched.chars().count());

        Token {
            kind: TokenKind::Identifier,
            sub_kind: TokenSubKind::Identifier,
            value: matched.to_string(),
            line,
            column,
        }
    }
}

/// Tokenizes one compilation unit. The returned stream always ends with a
/// synthetic eof token; the first lexical error aborts tokenization.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        lexer.skip_trivia();

        if lexer.at_eof() {
            tokens.push(Token::eof(lexer.line, lexer.column));
            return Ok(tokens);
        }

        let c = match lexer.peek() {
            Some(c) => c,
            None => continue,
        };

        let sub_kind = character_sub_kind(c);
        if sub_kind != TokenSubKind::Unknown {
            let token = Token {
                kind: TokenKind::Operator,
                sub_kind,
                value: c.to_string(),
                line: lexer.line,
                column: lexer.column,
            };
            lexer.advance();
            tokens.push(token);
            continue;
        }

        if c == '"' {
            tokens.push(lexer.scan_string()?);
            continue;
        }

        if c == '\'' {
            tokens.push(lexer.scan_character()?);
            continue;
        }

        if c.is_ascii_digit() {
            tokens.push(lexer.scan_number());
            continue;
        }

        if let Some(matched) = IDENTIFIER_RE.find(lexer.remainder()) {
            let matched = matched.as_str().to_string();
            tokens.push(lexer.scan_identifier(&matched));
            continue;
        }

        return Err(Error::new(
            ErrorKind::UnrecognisedCharacter { character: c },
            lexer.position(),
        ));
    }
}
