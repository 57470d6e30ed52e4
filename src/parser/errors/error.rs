//! Parse anomaly type
//!
//! A [`BuildMessage`] records input the parser could not model with
//! confidence. Parsing never stops on one; it is collected in the
//! [`RobotFileOutput`](crate::model::RobotFileOutput).

use std::fmt;

use super::codes::ErrorCode;
use crate::base::{FilePosition, TextRange, TextSize};

/// Severity level for anomalies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "transfer", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// An informational note
    Info,
    /// Suspicious input that was still modelled
    Warning,
    /// Input that could not be modelled
    #[default]
    Error,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// One parse anomaly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMessage {
    /// Human-readable message
    pub message: String,
    /// Categorized error code
    pub code: ErrorCode,
    pub severity: Severity,
    /// Position of the offending token, if any
    pub position: Option<FilePosition>,
    /// Byte range of the offending token
    pub range: TextRange,
    /// Optional suggestion for fixing the input
    pub hint: Option<String>,
}

impl BuildMessage {
    /// Create an anomaly with the default severity of an error
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            severity: Severity::Error,
            position: None,
            range: TextRange::empty(TextSize::new(0)),
            hint: None,
        }
    }

    /// Create a builder for more complex message construction
    pub fn builder(code: ErrorCode) -> BuildMessageBuilder {
        BuildMessageBuilder::new(code)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    /// 1-based line of the offending token
    pub fn line(&self) -> Option<usize> {
        self.position.map(|p| p.line)
    }

    /// Format the message for display
    pub fn format(&self) -> String {
        let mut result = match self.position {
            Some(pos) => format!("{}:{}: {}: {}", pos.line, pos.column, self.code, self.message),
            None => format!("{}: {}", self.code, self.message),
        };
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

impl fmt::Display for BuildMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.as_str(), self.format())
    }
}

/// Builder for [`BuildMessage`]
pub struct BuildMessageBuilder {
    code: ErrorCode,
    message: Option<String>,
    severity: Severity,
    position: Option<FilePosition>,
    len: usize,
    hint: Option<String>,
}

impl BuildMessageBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            severity: Severity::Error,
            position: None,
            len: 0,
            hint: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Point at a token of `len` bytes starting at `position`
    pub fn at(mut self, position: Option<FilePosition>, len: usize) -> Self {
        self.position = position;
        self.len = len;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the message, falling back to the code's default text
    pub fn build(self) -> BuildMessage {
        BuildMessage {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            range: self
                .position
                .map(|p| p.range(self.len))
                .unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            code: self.code,
            severity: self.severity,
            position: self.position,
            hint: self.hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_message_new() {
        let msg = BuildMessage::new("unknown setting 'Foo'", ErrorCode::E0201);
        assert_eq!(msg.code, ErrorCode::E0201);
        assert_eq!(msg.severity, Severity::Error);
        assert!(msg.position.is_none());
        assert!(!msg.has_hint());
    }

    #[test]
    fn test_builder_defaults_to_code_message() {
        let msg = BuildMessage::builder(ErrorCode::E0203).build();
        assert_eq!(msg.message, "library alias without a value");
        assert_eq!(msg.range, TextRange::empty(TextSize::new(0)));
    }

    #[test]
    fn test_builder_with_position() {
        let msg = BuildMessage::builder(ErrorCode::E0901)
            .at(Some(FilePosition::new(3, 4, 40)), 5)
            .severity(Severity::Warning)
            .hint("indent the line")
            .build();
        assert_eq!(msg.line(), Some(3));
        assert_eq!(msg.range, TextRange::new(TextSize::new(40), TextSize::new(45)));
        assert!(msg.format().contains("3:4: E0901"));
        assert!(msg.format().contains("hint: indent the line"));
    }

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(Severity::Info < Severity::Error);
        assert_eq!(Severity::Info.as_str(), "info");
    }
}
