//! Reading and parsing single files

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::model::RobotFileOutput;
use crate::parser::{parse, FileFormat, ParserConfig};

/// Failure to turn a path into a parsed file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported file extension: '{0}'")]
    UnsupportedExtension(String),
    #[error("{} is not valid UTF-8", .0.display())]
    InvalidEncoding(PathBuf),
}

/// Get file extension from path
pub fn get_extension(path: &Path) -> Result<&str, LoadError> {
    path.extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| LoadError::UnsupportedExtension(String::new()))
}

/// Validate that the extension belongs to a Robot Framework file
pub fn validate_extension(path: &Path) -> Result<FileFormat, LoadError> {
    let ext = get_extension(path)?;
    FileFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedExtension(ext.to_string()))
}

/// Load file contents as UTF-8; a byte order mark is kept for the parser.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| LoadError::InvalidEncoding(path.to_path_buf()))
}

/// Parse `content` as if it was read from `path`.
///
/// The format comes from the configuration, else from the extension.
pub fn parse_content(content: &str, path: &Path, config: &ParserConfig) -> Result<RobotFileOutput, LoadError> {
    if config.format.is_none() {
        validate_extension(path)?;
    }
    let config = config.clone().with_format(config.format_for(path));
    Ok(parse(content, &config))
}

/// Loads and parses a Robot Framework file.
///
/// # Errors
///
/// Returns an error if:
/// - The file has an unsupported extension and no format is configured
/// - The file cannot be read
/// - The file is not UTF-8
pub fn load_and_parse(path: &Path, config: &ParserConfig) -> Result<RobotFileOutput, LoadError> {
    if config.format.is_none() {
        validate_extension(path)?;
    }
    let content = load_file(path)?;
    let output = parse_content(&content, path, config)?;
    debug!(
        path = %path.display(),
        version = %config.version,
        anomalies = output.messages().len(),
        "loaded robot file"
    );
    Ok(output)
}
