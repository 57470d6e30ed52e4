//! Parser configuration

use std::path::Path;

use super::separators::FileFormat;
use crate::base::RobotVersion;

/// Version assumed when none is declared.
pub const DEFAULT_VERSION: RobotVersion = RobotVersion::new(3, 0);

/// Options for one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Robot Framework version the file is written for
    pub version: RobotVersion,
    /// `None` means plain text unless the file path says otherwise
    pub format: Option<FileFormat>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            format: None,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: RobotVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The format to use for `path`: the configured one, else detected.
    pub fn format_for(&self, path: &Path) -> FileFormat {
        self.format
            .or_else(|| FileFormat::from_path(path))
            .unwrap_or_default()
    }
}

impl FileFormat {
    /// Detect the format from a file extension.
    ///
    /// Returns `None` for extensions that are not Robot Framework files.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "robot" | "txt" | "resource" => Some(Self::Txt),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Options for writing a model back to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpConfig {
    /// Separator for regenerated lines; the format default when `None`
    pub separator: Option<String>,
}

impl DumpConfig {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}
