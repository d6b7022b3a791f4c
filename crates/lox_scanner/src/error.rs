//! Lexical errors reported by the scanner.

use lox_core::text::TextSpan;
use lox_diagnostics::{messages, Diagnostic};
use thiserror::Error;

/// A non-fatal lexical error. The scanner never returns these; it converts
/// them into diagnostics and keeps scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A character that does not start any lexeme. It is skipped.
    #[error("Unexpected character: {ch}")]
    UnexpectedCharacter { line: usize, ch: char, span: TextSpan },

    /// A string literal still open at end of input. No token is produced and
    /// the span covers everything from the opening quote to the end.
    #[error("Unterminated string.")]
    UnterminatedString { line: usize, span: TextSpan },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { line, .. }
            | ScanError::UnterminatedString { line, .. } => *line,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            ScanError::UnexpectedCharacter { span, .. }
            | ScanError::UnterminatedString { span, .. } => *span,
        }
    }
}

impl From<ScanError> for Diagnostic {
    fn from(error: ScanError) -> Self {
        let diagnostic = match &error {
            ScanError::UnexpectedCharacter { line, ch, .. } => {
                let text = ch.to_string();
                Diagnostic::new(*line, &messages::UNEXPECTED_CHARACTER, &[text.as_str()])
            }
            ScanError::UnterminatedString { line, .. } => {
                Diagnostic::new(*line, &messages::UNTERMINATED_STRING, &[])
            }
        };
        diagnostic.with_span(error.span())
    }
}
