//! Token kinds, literal values and the keyword table.

use lox_core::text::TextSpan;
use serde::Serialize;
use std::fmt;

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum TokenKind {
    // Single-character punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

/// Every reserved word kind, in alphabetical order of its spelling.
pub const KEYWORDS: [TokenKind; 16] = [
    TokenKind::And,
    TokenKind::Class,
    TokenKind::Else,
    TokenKind::False,
    TokenKind::For,
    TokenKind::Fun,
    TokenKind::If,
    TokenKind::Nil,
    TokenKind::Or,
    TokenKind::Print,
    TokenKind::Return,
    TokenKind::Super,
    TokenKind::This,
    TokenKind::True,
    TokenKind::Var,
    TokenKind::While,
];

impl TokenKind {
    /// Whether this kind is a reserved word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= TokenKind::And as u8 && v <= TokenKind::While as u8
    }

    /// The spelling of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            TokenKind::And => Some("and"),
            TokenKind::Class => Some("class"),
            TokenKind::Else => Some("else"),
            TokenKind::False => Some("false"),
            TokenKind::For => Some("for"),
            TokenKind::Fun => Some("fun"),
            TokenKind::If => Some("if"),
            TokenKind::Nil => Some("nil"),
            TokenKind::Or => Some("or"),
            TokenKind::Print => Some("print"),
            TokenKind::Return => Some("return"),
            TokenKind::Super => Some("super"),
            TokenKind::This => Some("this"),
            TokenKind::True => Some("true"),
            TokenKind::Var => Some("var"),
            TokenKind::While => Some("while"),
            _ => None,
        }
    }

    /// Look up a keyword kind from an identifier lexeme. Matching is exact
    /// and case-sensitive.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "and" => Some(TokenKind::And),
            "class" => Some(TokenKind::Class),
            "else" => Some(TokenKind::Else),
            "false" => Some(TokenKind::False),
            "for" => Some(TokenKind::For),
            "fun" => Some(TokenKind::Fun),
            "if" => Some(TokenKind::If),
            "nil" => Some(TokenKind::Nil),
            "or" => Some(TokenKind::Or),
            "print" => Some(TokenKind::Print),
            "return" => Some(TokenKind::Return),
            "super" => Some(TokenKind::Super),
            "this" => Some(TokenKind::This),
            "true" => Some(TokenKind::True),
            "var" => Some(TokenKind::Var),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The decoded value of a string or number lexeme.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Literal {
    #[default]
    Absent,
    Text(String),
    Number(f64),
}

impl Literal {
    pub fn is_absent(&self) -> bool {
        matches!(self, Literal::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Absent => write!(f, "null"),
            Literal::Text(text) => write!(f, "{}", text),
            Literal::Number(value) => write!(f, "{}", value),
        }
    }
}

/// One scanned lexical unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The token category.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub lexeme: String,
    /// Decoded value, present only for strings and numbers.
    pub literal: Literal,
    /// 1-based line on which the token ends.
    pub line: usize,
    /// Byte range of the lexeme in the source text.
    pub span: TextSpan,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, span: TextSpan) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: Literal::Absent,
            line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = literal;
        self
    }

    /// The end-of-input token, placed at byte offset `end`.
    pub fn eof(line: usize, end: usize) -> Self {
        Self::new(TokenKind::Eof, "", line, TextSpan::from_offsets(end, end))
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.lexeme, self.literal)
    }
}
