//! Error code definitions for parse anomalies
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Table structure errors (headers, stray content)
//! - E02xx: Settings table errors (imports, settings)
//! - E03xx: Variables table errors
//! - E04xx: Test case, task and keyword errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parse anomalies
///
/// Each error code represents a specific category of anomaly,
/// enabling filtering, documentation, and IDE integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "transfer", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Table structure errors
    // =========================================================================
    /// Content before the first table header
    E0101,
    /// Unknown table header
    E0102,
    /// Table header not supported by the Robot Framework version
    E0103,

    // =========================================================================
    // E02xx: Settings table errors
    // =========================================================================
    /// Unknown setting
    E0201,
    /// Import without a name or path
    E0202,
    /// Library alias without a value
    E0203,
    /// Arguments where none are allowed
    E0204,

    // =========================================================================
    // E03xx: Variables table errors
    // =========================================================================
    /// Invalid variable declaration
    E0301,
    /// Dictionary item without `=`
    E0302,

    // =========================================================================
    // E04xx: Test case, task and keyword errors
    // =========================================================================
    /// Unknown `[..]` setting
    E0401,
    /// Step outside of any test case, task or keyword
    E0402,
    /// Continuation without a previous element
    E0403,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Token could not be mapped in the current context
    E0901,
    /// Token matched more than one mapper
    E0902,
    /// Deprecated syntax
    E0903,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Structure
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            // Settings
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            // Variables
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            // Code tables
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            // Generic
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::E0903 => "E0903",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "table structure",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 => "settings",
            Self::E0301 | Self::E0302 => "variables",
            Self::E0401 | Self::E0402 | Self::E0403 => "test cases and keywords",
            Self::E0901 | Self::E0902 | Self::E0903 | Self::E0999 => "syntax",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "content before the first table header is ignored",
            Self::E0102 => "unknown table header",
            Self::E0103 => "table is not supported by this Robot Framework version",
            Self::E0201 => "unknown setting",
            Self::E0202 => "import without a name or path",
            Self::E0203 => "library alias without a value",
            Self::E0204 => "unexpected arguments",
            Self::E0301 => "invalid variable declaration",
            Self::E0302 => "dictionary item without '='",
            Self::E0401 => "unknown setting",
            Self::E0402 => "step outside of a test case or keyword",
            Self::E0403 => "continuation without a previous element",
            Self::E0901 => "token could not be mapped",
            Self::E0902 => "ambiguous token",
            Self::E0903 => "deprecated syntax",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this anomaly means part of the line was not modelled
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0101 | Self::E0102 | Self::E0402 | Self::E0403 | Self::E0901 | Self::E0902
        )
    }

    /// Check if this is a recoverable error (parsing can continue)
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::E0999)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
