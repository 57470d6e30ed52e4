//! Model validation
//!
//! Validators inspect a parsed (or edited) [`RobotFile`] and report what
//! Robot Framework would reject or warn about. Each validator declares the
//! Robot Framework versions it applies to; [`validate_file`] runs exactly
//! those matching the file's version.
//!
//! ```text
//! RobotFile (version 2.9)
//!     ↓
//! VALIDATORS ── applicable_version_range() contains 2.9? ──→ validate()
//!     ↓
//! Vec<Diagnostic>
//! ```

mod diagnostics;
mod validators;

use once_cell::sync::Lazy;
use tracing::debug;

pub use diagnostics::{codes, Diagnostic, DiagnosticCollector, RelatedInfo};
pub use validators::{
    AsAliasValidator, DeprecatedSyntaxValidator, DuplicatedNameValidator, DuplicatedSettingValidator,
    LibraryAliasValidator, OldSyntaxDuplicatedSettingValidator,
};

use crate::base::{RobotVersion, VersionRange};
use crate::model::RobotFile;

/// A check over the whole model of one file.
pub trait ModelValidator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Robot Framework versions this check applies to
    fn applicable_version_range(&self) -> VersionRange;

    fn validate(&self, file: &RobotFile, diagnostics: &mut DiagnosticCollector);

    fn applies_to(&self, version: &RobotVersion) -> bool {
        self.applicable_version_range().contains(version)
    }
}

/// Every validator known to the crate
pub static VALIDATORS: Lazy<Vec<Box<dyn ModelValidator>>> = Lazy::new(|| {
    vec![
        Box::new(DuplicatedSettingValidator),
        Box::new(OldSyntaxDuplicatedSettingValidator),
        Box::new(DeprecatedSyntaxValidator),
        Box::new(LibraryAliasValidator),
        Box::new(AsAliasValidator),
        Box::new(DuplicatedNameValidator),
    ]
});

/// Validators applicable to `version`
pub fn applicable_validators(version: &RobotVersion) -> impl Iterator<Item = &'static dyn ModelValidator> + '_ {
    VALIDATORS
        .iter()
        .map(|v| v.as_ref())
        .filter(move |v| v.applies_to(version))
}

/// Run every applicable validator on `file`.
pub fn validate_file(file: &RobotFile) -> Vec<Diagnostic> {
    let version = file.version();
    let mut collector = DiagnosticCollector::new();
    for validator in applicable_validators(&version) {
        validator.validate(file, &mut collector);
    }
    let diagnostics = collector.finish();
    debug!(%version, count = diagnostics.len(), "validated robot file");
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn names(version: RobotVersion) -> Vec<&'static str> {
        applicable_validators(&version).map(|v| v.name()).collect()
    }

    #[rstest]
    #[case(RobotVersion::new(2, 9), true, false, true)]
    #[case(RobotVersion::new(3, 0), false, true, true)]
    #[case(RobotVersion::new(6, 0), false, true, false)]
    fn test_version_gating(
        #[case] version: RobotVersion,
        #[case] old_syntax: bool,
        #[case] duplicated: bool,
        #[case] as_alias: bool,
    ) {
        let names = names(version);
        assert_eq!(names.contains(&"old-syntax-duplicated-setting"), old_syntax);
        assert_eq!(names.contains(&"duplicated-setting"), duplicated);
        assert_eq!(names.contains(&"as-alias"), as_alias);
        assert!(names.contains(&"deprecated-syntax"));
    }
}
