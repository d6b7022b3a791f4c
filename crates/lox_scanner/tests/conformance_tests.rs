//! Lox scanning conformance suite.
//!
//! Scans a table of small Lox programs, grouped by category, and checks the
//! token and diagnostic counts for each one.

use lox_scanner::{scan, TokenKind};

/// Test result for a single conformance case.
#[derive(Debug, Clone)]
struct TestResult {
    name: String,
    category: String,
    passed: bool,
    failure: Option<String>,
}

/// Scan one case. `tokens` counts every token including Eof.
fn run_test(
    name: &str,
    category: &str,
    source: &str,
    tokens: usize,
    diagnostics: usize,
) -> TestResult {
    let result = scan(source);
    let failure = if result.tokens.len() != tokens {
        Some(format!("expected {} tokens, got {}", tokens, result.tokens.len()))
    } else if result.diagnostics.len() != diagnostics {
        Some(format!(
            "expected {} diagnostics, got {}: {:?}",
            diagnostics,
            result.diagnostics.len(),
            result.diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>()
        ))
    } else {
        None
    };

    TestResult {
        name: name.to_string(),
        category: category.to_string(),
        passed: failure.is_none(),
        failure,
    }
}

/// Conformance test suite runner.
struct ConformanceTestSuite {
    tests: Vec<TestResult>,
}

impl ConformanceTestSuite {
    fn new() -> Self {
        Self { tests: Vec::new() }
    }

    fn add_test(
        &mut self,
        name: &str,
        category: &str,
        source: &str,
        tokens: usize,
        diagnostics: usize,
    ) {
        let result = run_test(name, category, source, tokens, diagnostics);
        self.tests.push(result);
    }

    /// Like `add_test`, but checks the full kind sequence (Eof included)
    /// and expects no diagnostics.
    fn add_kinds_test(&mut self, name: &str, category: &str, source: &str, kinds: &[TokenKind]) {
        let mut result = run_test(name, category, source, kinds.len(), 0);
        if result.passed {
            let actual: Vec<TokenKind> = scan(source).tokens.iter().map(|t| t.kind).collect();
            if actual != kinds {
                result.passed = false;
                result.failure = Some(format!("expected kinds {:?}, got {:?}", kinds, actual));
            }
        }
        self.tests.push(result);
    }

    fn failures(&self) -> Vec<&TestResult> {
        self.tests.iter().filter(|t| !t.passed).collect()
    }

    fn print_summary(&self) {
        let total = self.tests.len();
        let passed = self.tests.iter().filter(|t| t.passed).count();

        println!("\n=== Lox Scanner Conformance Summary ===");
        println!("Total tests: {}", total);
        println!("Passed: {}", passed);
        println!("Failed: {}", total - passed);

        let mut categories: std::collections::BTreeMap<&str, (usize, usize)> =
            std::collections::BTreeMap::new();
        for test in &self.tests {
            let entry = categories.entry(test.category.as_str()).or_insert((0, 0));
            if test.passed {
                entry.0 += 1;
            }
            entry.1 += 1;
        }

        println!("\n--- Results by Category ---");
        for (category, (passed_count, total_count)) in categories {
            println!("  {}: {}/{}", category, passed_count, total_count);
        }

        for failure in self.failures() {
            println!(
                "  [{}] {}: {}",
                failure.category,
                failure.name,
                failure.failure.as_deref().unwrap_or("unknown failure")
            );
        }
    }
}

// ============================================================================
// Test Cases
// ============================================================================

#[test]
fn test_lox_conformance() {
    let mut suite = ConformanceTestSuite::new();

    // ========================================================================
    // Category: Expressions
    // ========================================================================
    suite.add_test("arithmetic", "expressions", "1 + 2 * 3 - 4 / 5;", 11, 0);
    suite.add_test("grouping", "expressions", "(1 + 2) * -3;", 10, 0);
    suite.add_test("comparison", "expressions", "a <= b == !(c > d);", 12, 0);
    suite.add_test("logical", "expressions", "true and false or !nil;", 8, 0);
    suite.add_test("string_concat", "expressions", "\"a\" + \"b\";", 5, 0);

    // ========================================================================
    // Category: Statements
    // ========================================================================
    suite.add_test("var_decl", "statements", "var greeting = \"hi\";", 6, 0);
    suite.add_test("print", "statements", "print greeting;", 4, 0);
    suite.add_test("block", "statements", "{ var a = 1; { print a; } }", 13, 0);
    suite.add_kinds_test(
        "if_else",
        "statements",
        "if (x) print 1; else print 2;",
        &[
            TokenKind::If,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::Print,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Else,
            TokenKind::Print,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ],
    );
    suite.add_kinds_test(
        "while",
        "statements",
        "while (i < 10) i = i + 1;",
        &[
            TokenKind::While,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::Less,
            TokenKind::Number,
            TokenKind::RightParen,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ],
    );
    suite.add_test(
        "for",
        "statements",
        "for (var i = 0; i < 3; i = i + 1) print i;",
        21,
        0,
    );

    // ========================================================================
    // Category: Functions and classes
    // ========================================================================
    suite.add_test(
        "function",
        "declarations",
        "fun add(a, b) {\n  return a + b;\n}",
        15,
        0,
    );
    suite.add_test(
        "class",
        "declarations",
        "class Cake < Pastry {\n  init() { this.x = super.y; }\n}",
        20,
        0,
    );
    suite.add_test("call_chain", "declarations", "a.b(1).c();", 12, 0);

    // ========================================================================
    // Category: Trivia
    // ========================================================================
    suite.add_test("comment_only", "trivia", "// nothing here", 1, 0);
    suite.add_test("comment_after_code", "trivia", "print 1; // done", 4, 0);
    suite.add_test("crlf", "trivia", "print 1;\r\nprint 2;\r\n", 7, 0);
    suite.add_test("tabs", "trivia", "\tvar\tx\t=\t1;", 6, 0);

    // ========================================================================
    // Category: Errors
    // ========================================================================
    suite.add_test("unexpected_chars", "errors", "var a = 1 % 2 & 3;", 8, 2);
    suite.add_test("unterminated", "errors", "print \"never closed;\nprint 2;", 2, 1);
    suite.add_test("bracket", "errors", "list[0];", 4, 2);
    suite.add_test("unicode", "errors", "var π = 3.14;", 5, 1);

    suite.print_summary();

    let failures = suite.failures();
    assert!(failures.is_empty(), "{} conformance cases failed", failures.len());
}
