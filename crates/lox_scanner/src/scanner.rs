//! The Lox scanner.
//!
//! Converts one complete source text into tokens in a single pass. Lexical
//! errors go to a [`DiagnosticSink`] and never stop the scan, so the result
//! always ends with exactly one [`TokenKind::Eof`] token.

use crate::char_codes::*;
use crate::error::ScanError;
use crate::token::{Literal, Token, TokenKind};
use lox_core::text::TextSpan;
use lox_diagnostics::DiagnosticSink;
use memchr::{memchr, memchr2};

/// A single-use scanner over one source text.
///
/// `start <= current <= source.len()` holds between steps, and both offsets
/// always sit on UTF-8 character boundaries.
pub struct Scanner<'a> {
    /// The source text being scanned.
    source: &'a str,
    /// Byte view of `source`.
    bytes: &'a [u8],
    /// Tokens produced so far.
    tokens: Vec<Token>,
    /// Start of the lexeme being scanned.
    start: usize,
    /// Next unconsumed byte.
    current: usize,
    /// 1-based line of `current`.
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scan the whole source, reporting lexical errors to `sink`.
    ///
    /// Consumes the scanner: a scanner is driven to completion exactly once.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.source.len()))]
    pub fn scan_tokens<S>(mut self, sink: &mut S) -> Vec<Token>
    where
        S: DiagnosticSink + ?Sized,
    {
        while !self.is_eof() {
            // We are at the beginning of the next lexeme.
            self.start = self.current;
            self.scan_token(sink);
        }

        self.tokens.push(Token::eof(self.line, self.bytes.len()));
        tracing::debug!(tokens = self.tokens.len(), lines = self.line, "scan finished");
        self.tokens
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.current >= self.bytes.len()
    }

    /// Consume and return the next byte. Callers check `is_eof` first.
    #[inline]
    fn advance(&mut self) -> u8 {
        let ch = self.bytes[self.current];
        self.current += 1;
        ch
    }

    /// Look at the next byte without consuming it.
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }

    /// Look one byte past `peek`.
    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.current + 1).copied()
    }

    /// Consume the next byte only if it is `expected`.
    #[inline]
    fn matches(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// The text of the current lexeme.
    #[inline]
    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    #[inline]
    fn lexeme_span(&self) -> TextSpan {
        TextSpan::from_offsets(self.start, self.current)
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal_token(kind, Literal::Absent);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        let token = Token::new(kind, self.lexeme(), self.line, self.lexeme_span())
            .with_literal(literal);
        self.tokens.push(token);
    }

    fn report<S>(&self, sink: &mut S, error: ScanError)
    where
        S: DiagnosticSink + ?Sized,
    {
        tracing::trace!(line = error.line(), %error, "lexical error");
        sink.report_diagnostic(error.into());
    }

    /// Scan one lexeme starting at `self.start`.
    fn scan_token<S>(&mut self, sink: &mut S)
    where
        S: DiagnosticSink + ?Sized,
    {
        let ch = self.advance();
        match ch {
            OPEN_PAREN => self.add_token(TokenKind::LeftParen),
            CLOSE_PAREN => self.add_token(TokenKind::RightParen),
            OPEN_BRACE => self.add_token(TokenKind::LeftBrace),
            CLOSE_BRACE => self.add_token(TokenKind::RightBrace),
            COMMA => self.add_token(TokenKind::Comma),
            DOT => self.add_token(TokenKind::Dot),
            MINUS => self.add_token(TokenKind::Minus),
            PLUS => self.add_token(TokenKind::Plus),
            SEMICOLON => self.add_token(TokenKind::Semicolon),
            ASTERISK => self.add_token(TokenKind::Star),

            EXCLAMATION => self.scan_with_equals(TokenKind::Bang, TokenKind::BangEqual),
            EQUALS => self.scan_with_equals(TokenKind::Equal, TokenKind::EqualEqual),
            LESS_THAN => self.scan_with_equals(TokenKind::Less, TokenKind::LessEqual),
            GREATER_THAN => self.scan_with_equals(TokenKind::Greater, TokenKind::GreaterEqual),

            SLASH => {
                if self.matches(SLASH) {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            _ if is_white_space_single_line(ch) => {}
            LINE_FEED => self.line += 1,

            DOUBLE_QUOTE => self.scan_string(sink),
            _ if is_digit(ch) => self.scan_number(),
            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => self.scan_unexpected_character(sink),
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// Emit `double` if the next byte is `=` (consuming it), else `single`.
    fn scan_with_equals(&mut self, single: TokenKind, double: TokenKind) {
        let kind = if self.matches(EQUALS) { double } else { single };
        self.add_token(kind);
    }

    /// Skip to the end of the line. The newline itself is left for the main
    /// loop so it is counted there.
    fn skip_line_comment(&mut self) {
        self.current = match memchr(LINE_FEED, &self.bytes[self.current..]) {
            Some(offset) => self.current + offset,
            None => self.bytes.len(),
        };
    }

    fn scan_string<S>(&mut self, sink: &mut S)
    where
        S: DiagnosticSink + ?Sized,
    {
        loop {
            match memchr2(DOUBLE_QUOTE, LINE_FEED, &self.bytes[self.current..]) {
                Some(offset) => {
                    self.current += offset;
                    if self.advance() == DOUBLE_QUOTE {
                        break;
                    }
                    self.line += 1;
                }
                None => {
                    self.current = self.bytes.len();
                    let error = ScanError::UnterminatedString {
                        line: self.line,
                        span: self.lexeme_span(),
                    };
                    self.report(sink, error);
                    return;
                }
            }
        }

        // Trim the surrounding quotes. No escape sequences exist in Lox.
        let value = &self.source[self.start + 1..self.current - 1];
        self.add_literal_token(TokenKind::String, Literal::Text(value.to_string()));
    }

    fn scan_number(&mut self) {
        self.scan_digits();

        // A fractional part needs at least one digit after the dot.
        if self.peek() == Some(DOT) && self.peek_next().is_some_and(is_digit) {
            self.current += 1;
            self.scan_digits();
        }

        // A run of ASCII digits with an optional fraction always parses.
        let value = self.lexeme().parse::<f64>().unwrap_or(f64::NAN);
        self.add_literal_token(TokenKind::Number, Literal::Number(value));
    }

    fn scan_digits(&mut self) {
        while self.peek().is_some_and(is_digit) {
            self.current += 1;
        }
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_part) {
            self.current += 1;
        }
        let kind = TokenKind::from_keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    /// Report and skip the character at `start`. Non-ASCII characters are
    /// skipped whole so the cursor stays on a character boundary.
    fn scan_unexpected_character<S>(&mut self, sink: &mut S)
    where
        S: DiagnosticSink + ?Sized,
    {
        let ch = self.source[self.start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.current = self.start + ch.len_utf8();
        let error = ScanError::UnexpectedCharacter {
            line: self.line,
            ch,
            span: self.lexeme_span(),
        };
        self.report(sink, error);
    }
}
