//! Findings of model validators
//!
//! Parse anomalies are recorded while a file is read
//! ([`BuildMessage`](crate::parser::BuildMessage)); diagnostics are produced
//! afterwards by validators that look at the finished model.

use std::sync::Arc;

use crate::base::FilePosition;
use crate::parser::{RobotToken, Severity};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the offending token, `None` for tokens added after parsing
    pub position: Option<FilePosition>,
    /// Length of the offending token in bytes
    pub len: usize,
    /// Severity level.
    pub severity: Severity,
    /// Diagnostic code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Optional suggestion
    pub hint: Option<Arc<str>>,
    /// Optional related information.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    pub position: Option<FilePosition>,
    /// The message.
    pub message: Arc<str>,
}

impl Diagnostic {
    fn at(token: &RobotToken, severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            position: token.position(),
            len: token.text().len(),
            severity,
            code: None,
            message: message.into(),
            hint: None,
            related: Vec::new(),
        }
    }

    /// Create a new error diagnostic on `token`.
    pub fn error(token: &RobotToken, message: impl Into<Arc<str>>) -> Self {
        Self::at(token, Severity::Error, message)
    }

    /// Create a new warning diagnostic on `token`.
    pub fn warning(token: &RobotToken, message: impl Into<Arc<str>>) -> Self {
        Self::at(token, Severity::Warning, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<Arc<str>>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// 1-based line, if the token came from the file
    pub fn line(&self) -> Option<usize> {
        self.position.map(|p| p.line)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes for model validation.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Errors Robot Framework reports when running the file
/// - **W0001-W0099**: Warnings (repeated old syntax, deprecated spellings)
///
/// Parse anomalies use the separate `E01xx`..`E09xx` families.
pub mod codes {
    // ========================================================================
    // ERRORS (E0001-E0099)
    // ========================================================================

    /// Suite setting given more than once.
    pub const DUPLICATED_SETTING: &str = "E0001";
    /// Keyword defined more than once.
    pub const DUPLICATED_KEYWORD: &str = "E0002";
    /// Library alias marker without a name after it.
    pub const ALIAS_WITHOUT_VALUE: &str = "E0003";
    /// `[..]` setting given more than once in one test case or keyword.
    pub const DUPLICATED_LOCAL_SETTING: &str = "E0004";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// Suite setting repeated in syntax older than Robot Framework 3.0.
    pub const OLD_SYNTAX_DUPLICATED_SETTING: &str = "W0001";
    /// Deprecated spelling.
    pub const DEPRECATED: &str = "W0002";
    /// Test case or task defined more than once.
    pub const DUPLICATED_TEST_CASE: &str = "W0003";
    /// `AS` used before Robot Framework 6.0, where it is a plain argument.
    pub const ALIAS_MARKER_UNAVAILABLE: &str = "W0004";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics while validators run.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a repeated definition, pointing back at the first one.
    pub fn duplicate(
        &mut self,
        diagnostic: Diagnostic,
        existing: &RobotToken,
    ) {
        self.add(diagnostic.with_related(RelatedInfo {
            position: existing.position(),
            message: Arc::from(format!("first defined as '{}'", existing.text())),
        }));
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics with the given code
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.has_code(code))
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get the collected diagnostics, deduplicated and in file order.
    pub fn finish(self) -> Vec<Diagnostic> {
        let mut seen = std::collections::HashSet::new();
        let mut diagnostics: Vec<Diagnostic> = self
            .diagnostics
            .into_iter()
            .filter(|d| {
                // Deduplicate by (position, code, message)
                let key = (d.position, d.code.clone(), d.message.clone());
                seen.insert(key)
            })
            .collect();
        diagnostics.sort_by_key(|d| d.position.map(|p| p.offset).unwrap_or(usize::MAX));
        diagnostics
    }
}
