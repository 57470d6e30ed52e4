//! # red-base
//!
//! Incremental parser and round-trip safe document model for Robot Framework
//! text files (plain text, pipe separated and TSV).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project    → Loading files and directory trees from disk
//!   ↓
//! validation → Version-gated checks over a finished model
//!   ↓
//! writer     → Model back to text, unchanged regions verbatim
//!   ↓
//! model      → RobotFile, tables, elements, joined setting views
//!   ↓
//! parser     → Separators, recognizers, state stack, mappers
//!   ↓
//! base       → Primitives (FilePosition, RobotVersion, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → model → writer → validation → project)
// ============================================================================

/// Foundation types: FilePosition, RobotVersion, TextRange
pub mod base;

/// Parser: separators, token recognizers, parsing states and mappers
pub mod parser;

/// Document model: RobotFile and its tables
pub mod model;

/// Writer: dumping a model back to text
pub mod writer;

/// Validation: checks applicable to a Robot Framework version
pub mod validation;

/// Project management: file and directory loading
pub mod project;

/// Element transfer format (JSON)
#[cfg(feature = "transfer")]
pub mod transfer;

// Re-export the common entry points
pub use model::{RobotFile, RobotFileOutput};
pub use parser::{parse, DumpConfig, ParserConfig};
pub use validation::validate_file;
pub use writer::dump;

// Re-export foundation types
pub use base::{FilePosition, RobotVersion, TextRange, TextSize, VersionRange};
