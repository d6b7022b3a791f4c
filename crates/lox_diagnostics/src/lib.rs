//! lox_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Diagnostics are non-fatal: the scanner hands them to a [`DiagnosticSink`]
//! and keeps going. Whether a diagnostic should stop later stages is up to
//! whoever owns the sink.

use lox_core::text::TextSpan;
use serde::Serialize;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "Error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 1-based source line the diagnostic is reported on.
    pub line: usize,
    /// The source text span the diagnostic covers, if known.
    pub span: Option<TextSpan>,
    /// The resolved message text.
    #[serde(rename = "message")]
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic on a line, without a span.
    pub fn new(line: usize, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a free-form error diagnostic, for sinks that only get a line
    /// and a message.
    pub fn plain(line: usize, message: &str) -> Self {
        Self {
            line,
            span: None,
            message_text: message.to_string(),
            code: 0,
            category: DiagnosticCategory::Error,
        }
    }

    /// Attach a source span.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// The code formatted for display, e.g. `LX1002`.
    pub fn code_text(&self) -> String {
        format!("LX{:04}", self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}] {}: {}",
            self.line, self.category, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Receiver for diagnostics produced during a scan.
///
/// A sink can only observe: nothing it does can stop the scan that is
/// reporting to it.
pub trait DiagnosticSink {
    /// Report a message on a 1-based line.
    fn report(&mut self, line: usize, message: &str);

    /// Report a fully realized diagnostic. Sinks that keep codes and spans
    /// override this; the default forwards the line and message text.
    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.report(diagnostic.line, &diagnostic.message_text);
    }
}

impl<F> DiagnosticSink for F
where
    F: FnMut(usize, &str),
{
    fn report(&mut self, line: usize, message: &str) {
        self(line, message)
    }
}

/// A collection of diagnostics accumulated during a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl DiagnosticSink for DiagnosticCollection {
    fn report(&mut self, line: usize, message: &str) {
        self.add(Diagnostic::plain(line, message));
    }

    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage =
        diag!(1001, Error, "Unexpected character: {0}");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, Error, "Unterminated string.");
}
