//! Printing scan results: tokens to stdout, diagnostics to stderr.

use lox_core::text::{LineAndColumn, LineMap};
use lox_diagnostics::Diagnostic;
use lox_scanner::{ScanResult, Token};
use miette::{LabeledSpan, NamedSource, SourceCode, SourceSpan};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

/// Token output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `Kind lexeme literal` line per token.
    #[default]
    Text,
    /// A JSON document with tokens and diagnostics.
    Json,
}

/// How diagnostics are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticStyle {
    /// `[line N] Error: message`
    Plain,
    /// miette report with a source snippet.
    Pretty,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    #[serde(flatten)]
    token: &'a Token,
    column: u32,
}

#[derive(Serialize)]
struct ScanRecord<'a> {
    name: &'a str,
    tokens: Vec<TokenRecord<'a>>,
    diagnostics: &'a [Diagnostic],
}

/// Write the tokens of one scan to `out`.
pub fn write_tokens<W: Write>(
    out: &mut W,
    format: OutputFormat,
    name: &str,
    source: &str,
    result: &ScanResult,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for token in &result.tokens {
                writeln!(out, "{}", token)?;
            }
        }
        OutputFormat::Json => {
            let map = LineMap::new(source);
            let tokens = result
                .tokens
                .iter()
                .map(|token| {
                    let LineAndColumn { column, .. } = map.line_and_column_of(token.span.start);
                    TokenRecord { token, column }
                })
                .collect();
            let record = ScanRecord {
                name,
                tokens,
                diagnostics: result.diagnostics.diagnostics(),
            };
            serde_json::to_writer_pretty(&mut *out, &record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Render the diagnostics of one scan.
pub fn write_diagnostics<W: Write>(
    err: &mut W,
    style: DiagnosticStyle,
    name: &str,
    source: &str,
    result: &ScanResult,
) -> io::Result<()> {
    for diagnostic in &result.diagnostics {
        match style {
            DiagnosticStyle::Plain => writeln!(err, "{}", diagnostic)?,
            DiagnosticStyle::Pretty => {
                let report = miette::Report::new(SourceDiagnostic::new(name, source, diagnostic));
                writeln!(err, "{:?}", report)?;
            }
        }
    }
    Ok(())
}

/// A scan diagnostic attached to its source text for miette rendering.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SourceDiagnostic {
    message: String,
    code: String,
    line: usize,
    src: NamedSource<String>,
    span: Option<SourceSpan>,
}

impl SourceDiagnostic {
    pub fn new(name: &str, source: &str, diagnostic: &Diagnostic) -> Self {
        Self {
            message: diagnostic.message_text.clone(),
            code: diagnostic.code_text(),
            line: diagnostic.line,
            src: NamedSource::new(name, source.to_string()),
            span: diagnostic
                .span
                .map(|span| SourceSpan::from((span.start as usize, span.length as usize))),
        }
    }
}

impl miette::Diagnostic for SourceDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_with_span(Some(format!("line {}", self.line)), span);
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_scanner::scan;

    fn render_tokens(format: OutputFormat, source: &str) -> String {
        let result = scan(source);
        let mut out = Vec::new();
        write_tokens(&mut out, format, "test.lox", source, &result).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_tokens() {
        let text = render_tokens(OutputFormat::Text, "var x = \"hi\";");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Var var null",
                "Identifier x null",
                "Equal = null",
                "String \"hi\" hi",
                "Semicolon ; null",
                "Eof  null",
            ]
        );
    }

    #[test]
    fn test_json_tokens() {
        let text = render_tokens(OutputFormat::Json, "print 1.5;\n@");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "test.lox");

        let tokens = value["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0]["kind"], "Print");
        assert_eq!(tokens[0]["literal"], serde_json::Value::Null);
        assert_eq!(tokens[1]["literal"], 1.5);
        assert_eq!(tokens[1]["column"], 7);
        assert_eq!(tokens[1]["span"]["start"], 6);
        assert_eq!(tokens[3]["kind"], "Eof");
        assert_eq!(tokens[3]["line"], 2);

        let diagnostics = value["diagnostics"].as_array().unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0]["message"], "Unexpected character: @");
        assert_eq!(diagnostics[0]["category"], "error");
    }

    #[test]
    fn test_plain_diagnostics() {
        let source = "\"open";
        let result = scan(source);
        let mut err = Vec::new();
        write_diagnostics(&mut err, DiagnosticStyle::Plain, "test.lox", source, &result).unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "[line 1] Error: Unterminated string.\n");
    }

    #[test]
    fn test_pretty_diagnostic_carries_code_and_label() {
        use miette::Diagnostic as _;

        let source = "a ? b";
        let result = scan(source);
        let first = &result.diagnostics.diagnostics()[0];
        let diagnostic = SourceDiagnostic::new("test.lox", source, first);
        assert_eq!(diagnostic.to_string(), "Unexpected character: ?");
        assert_eq!(diagnostic.code().unwrap().to_string(), "LX1001");

        let labels: Vec<LabeledSpan> = diagnostic.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 2);
        assert_eq!(labels[0].len(), 1);
        assert_eq!(labels[0].label(), Some("line 1"));
    }
}
