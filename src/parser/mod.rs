//! Incremental parser for Robot Framework text files
//!
//! Turns plain text, pipe-separated and TSV sources into the document model
//! while keeping every token's exact position, so unchanged regions can be
//! written back byte for byte.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lines → Cells (separators)
//!     ↓
//! Recognizers → RobotToken with candidate types
//!     ↓
//! ParsingStateStack + Mappers → typed tokens attached to elements
//!     ↓
//! Alias fixer (end of logical line)
//!     ↓
//! RobotFileOutput { RobotFile, anomalies }
//! ```

pub mod alias_fixer;
mod config;
pub mod errors;
pub mod lexer;
pub mod mapping;
pub mod recognizer;
mod separators;
pub mod state;
mod textual;
mod token;
mod token_type;

pub use config::{DumpConfig, ParserConfig, DEFAULT_VERSION};
pub use errors::{BuildMessage, ErrorCode, Severity};
pub use recognizer::{TokenRecognizer, RECOGNIZERS};
pub use separators::{split_line, Cell, FileFormat, LineSeparator, SplitLine};
pub use state::{ParsingState, ParsingStateStack};
pub use textual::{parse, parse_lines};
pub use token::{normalize, RobotToken, EMPTY_CELL};
pub use token_type::{Representation, RobotTokenType, TableKind};
