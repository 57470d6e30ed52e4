//! Parse anomaly handling
//!
//! This module provides the anomalies collected while parsing:
//! - Categorized error codes for filtering and documentation
//! - Severity levels
//! - Hints for fixing the input
//! - Token positions and byte ranges

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{BuildMessage, BuildMessageBuilder, Severity};
