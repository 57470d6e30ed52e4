//! Foundation types for the RED parser.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FilePosition`] - Line, column and byte offset of a token
//! - [`RobotVersion`], [`VersionRange`] - Robot Framework versions
//! - [`TextRange`], [`TextSize`] - Byte ranges (re-exported from `text-size`)
//!
//! This module has NO dependencies on other red modules.

mod position;
mod version;

pub use position::FilePosition;
pub use version::{RobotVersion, VersionError, VersionRange};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
