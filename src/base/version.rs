//! Robot Framework versions and version ranges.
//!
//! Versions are compared numerically, and a version without a patch number
//! sorts before the same version with any patch (`1.2 < 1.2.0 < 1.2.1`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised when a version string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid Robot Framework version: '{0}'")]
    Invalid(String),
}

/// A Robot Framework version (`major.minor[.patch]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RobotVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl RobotVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
        }
    }

    pub const fn with_patch(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Parse a version like `3.0` or `3.1.2`.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::Invalid(text.to_string());
        let parts: Vec<&str> = text.trim().split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(invalid());
        }
        let number = |part: &str| part.parse::<u32>().map_err(|_| invalid());

        let major = number(parts[0])?;
        let minor = number(parts[1])?;
        let patch = match parts.get(2) {
            Some(part) => Some(number(part)?),
            None => None,
        };
        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    pub fn is_older_than(&self, other: &RobotVersion) -> bool {
        self < other
    }

    pub fn is_newer_or_equal_to(&self, other: &RobotVersion) -> bool {
        self >= other
    }
}

impl FromStr for RobotVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RobotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// Half-open range of versions: `from` inclusive, `to` exclusive.
///
/// A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
    pub from: Option<RobotVersion>,
    pub to: Option<RobotVersion>,
}

impl VersionRange {
    pub const fn all() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    pub const fn starting_from(version: RobotVersion) -> Self {
        Self {
            from: Some(version),
            to: None,
        }
    }

    pub const fn before(version: RobotVersion) -> Self {
        Self {
            from: None,
            to: Some(version),
        }
    }

    pub const fn between(from: RobotVersion, to: RobotVersion) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, version: &RobotVersion) -> bool {
        let after_start = self.from.is_none_or(|from| *version >= from);
        let before_end = self.to.is_none_or(|to| *version < to);
        after_start && before_end
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (None, None) => write!(f, "any version"),
            (Some(from), None) => write!(f, ">= {}", from),
            (None, Some(to)) => write!(f, "< {}", to),
            (Some(from), Some(to)) => write!(f, ">= {}, < {}", from, to),
        }
    }
}
