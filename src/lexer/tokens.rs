use std::fmt::Display;

/// Coarse token classification. The parser's operator matcher only looks at
/// `Operator`; everything else is matched on the subkind.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Unknown,

    Identifier,
    Number,
    String,
    Character,

    Operator,

    Eof,
}

/// Exact token classification. Every operator-class character gets its own
/// subkind so the grammar can coalesce adjacent characters into
/// multi-character operators without lexer involvement.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenSubKind {
    Unknown,

    Identifier,
    Integer,
    Decimal,
    String,
    Character,

    At,

    RoundLeft,
    RoundRight,
    SquareLeft,
    SquareRight,
    CurlyLeft,
    CurlyRight,

    Less,
    Greater,

    Plus,
    Dash,
    Tilde,
    Star,
    Slash,
    Backslash,
    Percent,
    Dot,
    Comma,

    VerticalBar,
    Ampersand,
    Caret,

    Equal,
    Exclamation,
    Question,

    Colon,
    Semicolon,

    Eof,
}

pub fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Unknown => "unknown",
        TokenKind::Identifier => "identifier",
        TokenKind::Number => "number",
        TokenKind::String => "string",
        TokenKind::Character => "character",
        TokenKind::Operator => "operator",
        TokenKind::Eof => "eof",
    }
}

pub fn sub_kind_name(sub_kind: TokenSubKind) -> &'static str {
    match sub_kind {
        TokenSubKind::Unknown => "unknown",
        TokenSubKind::Identifier => "identifier",
        TokenSubKind::Integer => "integer",
        TokenSubKind::Decimal => "decimal",
        TokenSubKind::String => "string",
        TokenSubKind::Character => "character",
        TokenSubKind::At => "at-sign",
        TokenSubKind::RoundLeft => "round-brace-left",
        TokenSubKind::RoundRight => "round-brace-right",
        TokenSubKind::SquareLeft => "square-brace-left",
        TokenSubKind::SquareRight => "square-brace-right",
        TokenSubKind::CurlyLeft => "curly-brace-left",
        TokenSubKind::CurlyRight => "curly-brace-right",
        TokenSubKind::Less => "less",
        TokenSubKind::Greater => "greater",
        TokenSubKind::Plus => "plus",
        TokenSubKind::Dash => "dash",
        TokenSubKind::Tilde => "tilde",
        TokenSubKind::Star => "star",
        TokenSubKind::Slash => "slash",
        TokenSubKind::Backslash => "backslash",
        TokenSubKind::Percent => "percent",
        TokenSubKind::Dot => "dot",
        TokenSubKind::Comma => "comma",
        TokenSubKind::VerticalBar => "vertical-bar",
        TokenSubKind::Ampersand => "ampersand",
        TokenSubKind::Caret => "caret",
        TokenSubKind::Equal => "equal",
        TokenSubKind::Exclamation => "exclamation-mark",
        TokenSubKind::Question => "question-mark",
        TokenSubKind::Colon => "colon",
        TokenSubKind::Semicolon => "semicolon",
        TokenSubKind::Eof => "eof",
    }
}

/// Maps a fixed single character to its operator-class subkind, or
/// `Unknown` when the character does not start an operator-class token.
pub fn character_sub_kind(c: char) -> TokenSubKind {
    match c {
        '@' => TokenSubKind::At,

        '(' => TokenSubKind::RoundLeft,
        ')' => TokenSubKind::RoundRight,
        '[' => TokenSubKind::SquareLeft,
        ']' => TokenSubKind::SquareRight,
        '<' => TokenSubKind::Less,
        '>' => TokenSubKind::Greater,
        '{' => TokenSubKind::CurlyLeft,
        '}' => TokenSubKind::CurlyRight,

        '+' => TokenSubKind::Plus,
        '-' => TokenSubKind::Dash,
        '~' => TokenSubKind::Tilde,
        '.' => TokenSubKind::Dot,
        ',' => TokenSubKind::Comma,

        '*' => TokenSubKind::Star,
        '/' => TokenSubKind::Slash,
        '\\' => TokenSubKind::Backslash,
        '%' => TokenSubKind::Percent,

        '|' => TokenSubKind::VerticalBar,
        '&' => TokenSubKind::Ampersand,
        '^' => TokenSubKind::Caret,

        '=' => TokenSubKind::Equal,
        '!' => TokenSubKind::Exclamation,
        '?' => TokenSubKind::Question,

        ':' => TokenSubKind::Colon,
        ';' => TokenSubKind::Semicolon,

        _ => TokenSubKind::Unknown,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub sub_kind: TokenSubKind,
    pub value: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn eof(line: u32, column: u32) -> Token {
        Token {
            kind: TokenKind::Eof,
            sub_kind: TokenSubKind::Eof,
            value: String::from("EOF"),
            line,
            column,
        }
    }

    /// Short description used in unexpected-token messages.
    pub fn describe(&self) -> String {
        format!("{}({})", sub_kind_name(self.sub_kind), self.value)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} ({})",
            kind_name(self.kind),
            sub_kind_name(self.sub_kind),
            self.value
        )
    }
}
