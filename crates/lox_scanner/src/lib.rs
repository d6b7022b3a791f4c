//! lox_scanner: Lexer for the Lox scripting language.
//!
//! Turns source text into an ordered token sequence with:
//! - maximal-munch punctuation and operators
//! - string and number literals
//! - the 16 reserved words
//! - `//` line comments
//! - non-fatal error reporting through a [`DiagnosticSink`]

mod char_codes;
mod error;
mod scanner;
mod token;

pub use error::ScanError;
pub use lox_diagnostics::{DiagnosticCollection, DiagnosticSink};
pub use scanner::Scanner;
pub use token::{Literal, Token, TokenKind, KEYWORDS};

use serde::Serialize;

/// Tokens and diagnostics from one complete scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub diagnostics: DiagnosticCollection,
}

impl ScanResult {
    /// Whether any error was reported while scanning.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Scan `source`, collecting diagnostics instead of reporting them to a
/// caller-owned sink.
pub fn scan(source: &str) -> ScanResult {
    let mut diagnostics = DiagnosticCollection::new();
    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
    ScanResult { tokens, diagnostics }
}
