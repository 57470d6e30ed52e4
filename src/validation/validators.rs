//! Validators over a finished model

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::diagnostics::{codes, Diagnostic, DiagnosticCollector};
use super::ModelValidator;
use crate::base::{RobotVersion, VersionRange};
use crate::model::{CodeKind, ModelElement, RobotFile};
use crate::parser::alias_fixer::is_alias_marker;
use crate::parser::{normalize, RobotToken, RobotTokenType};

const V3_0: RobotVersion = RobotVersion::new(3, 0);
const V6_0: RobotVersion = RobotVersion::new(6, 0);

type Occurrences<'a> = IndexMap<String, Vec<&'a RobotToken>, FxBuildHasher>;

/// Declarations of every suite setting given more than once
fn repeated_settings(file: &RobotFile, mut report: impl FnMut(&RobotToken, &RobotToken)) {
    for group in file.settings().groups() {
        let elements = group.elements();
        if let Some((first, rest)) = elements.split_first() {
            for element in rest {
                report(element.declaration(), first.declaration());
            }
        }
    }
}

/// A suite setting may be given once since Robot Framework 3.0.
///
/// Also covers `[..]` settings repeated in one test case, task or keyword.
pub struct DuplicatedSettingValidator;

impl ModelValidator for DuplicatedSettingValidator {
    fn name(&self) -> &'static str {
        "duplicated-setting"
    }

    fn applicable_version_range(&self) -> VersionRange {
        VersionRange::starting_from(V3_0)
    }

    fn validate(&self, file: &RobotFile, diagnostics: &mut DiagnosticCollector) {
        repeated_settings(file, |again, first| {
            let diagnostic = Diagnostic::error(again, format!("setting '{}' is allowed only once", again.text()))
                .with_code(codes::DUPLICATED_SETTING)
                .with_hint("merge the values into the first occurrence");
            diagnostics.duplicate(diagnostic, first);
        });

        for kind in [CodeKind::TestCases, CodeKind::Tasks, CodeKind::Keywords] {
            for holder in file.code_table(kind).holders() {
                let mut seen: IndexMap<_, &RobotToken, FxBuildHasher> = IndexMap::default();
                let settings = holder
                    .settings()
                    .filter(|e| e.model_type() != kind.unknown_setting_type());
                for setting in settings {
                    let declaration = setting.declaration();
                    match seen.get(&setting.model_type()) {
                        Some(first) => diagnostics.duplicate(
                            Diagnostic::error(
                                declaration,
                                format!(
                                    "setting '{}' is allowed only once in '{}'",
                                    declaration.text(),
                                    holder.name_text()
                                ),
                            )
                            .with_code(codes::DUPLICATED_LOCAL_SETTING),
                            first,
                        ),
                        None => {
                            seen.insert(setting.model_type(), declaration);
                        }
                    }
                }
            }
        }
    }
}

/// Before Robot Framework 3.0 a repeated suite setting was accepted.
pub struct OldSyntaxDuplicatedSettingValidator;

impl ModelValidator for OldSyntaxDuplicatedSettingValidator {
    fn name(&self) -> &'static str {
        "old-syntax-duplicated-setting"
    }

    fn applicable_version_range(&self) -> VersionRange {
        VersionRange::before(V3_0)
    }

    fn validate(&self, file: &RobotFile, diagnostics: &mut DiagnosticCollector) {
        repeated_settings(file, |again, first| {
            let diagnostic = Diagnostic::warning(
                again,
                format!(
                    "setting '{}' is repeated; Robot Framework 3.0 rejects this",
                    again.text()
                ),
            )
            .with_code(codes::OLD_SYNTAX_DUPLICATED_SETTING);
            diagnostics.duplicate(diagnostic, first);
        });
    }
}

/// Spellings deprecated in the file's Robot Framework version.
pub struct DeprecatedSyntaxValidator;

impl ModelValidator for DeprecatedSyntaxValidator {
    fn name(&self) -> &'static str {
        "deprecated-syntax"
    }

    fn applicable_version_range(&self) -> VersionRange {
        VersionRange::all()
    }

    fn validate(&self, file: &RobotFile, diagnostics: &mut DiagnosticCollector) {
        let version = file.version();
        file.for_each_element(|element| {
            for token in element.tokens().filter(|t| t.has_type(RobotTokenType::Deprecated)) {
                let mut diagnostic = Diagnostic::warning(token, format!("'{}' is deprecated", token.text()))
                    .with_code(codes::DEPRECATED);
                if let Some(current) = token.token_type().most_correct_representation(&version) {
                    diagnostic = diagnostic.with_hint(format!("use '{current}' instead"));
                }
                diagnostics.add(diagnostic);
            }
        });
    }
}

/// Library aliases that will not take effect.
pub struct LibraryAliasValidator;

impl ModelValidator for LibraryAliasValidator {
    fn name(&self) -> &'static str {
        "library-alias"
    }

    fn applicable_version_range(&self) -> VersionRange {
        VersionRange::all()
    }

    fn validate(&self, file: &RobotFile, diagnostics: &mut DiagnosticCollector) {
        let libraries = file.settings().libraries();
        for alias in libraries.filter_map(ModelElement::alias) {
            let empty = alias.value.as_ref().is_none_or(|v| v.text().trim().is_empty());
            if empty {
                diagnostics.add(
                    Diagnostic::error(
                        &alias.declaration,
                        format!("'{}' must be followed by a name", alias.declaration.text()),
                    )
                    .with_code(codes::ALIAS_WITHOUT_VALUE),
                );
            }
        }
    }
}

/// `AS` only names a library from Robot Framework 6.0 on.
pub struct AsAliasValidator;

impl ModelValidator for AsAliasValidator {
    fn name(&self) -> &'static str {
        "as-alias"
    }

    fn applicable_version_range(&self) -> VersionRange {
        VersionRange::before(V6_0)
    }

    fn validate(&self, file: &RobotFile, diagnostics: &mut DiagnosticCollector) {
        let version = file.version();
        for library in file.settings().libraries() {
            let args = library.arguments();
            let Some(marker) = args.iter().find(|t| t.text() == "AS") else {
                continue;
            };
            if is_alias_marker(marker.text(), &version) {
                continue;
            }
            diagnostics.add(
                Diagnostic::warning(marker, "'AS' is passed to the library as an argument")
                    .with_code(codes::ALIAS_MARKER_UNAVAILABLE)
                    .with_hint("use 'WITH NAME', 'AS' needs Robot Framework 6.0"),
            );
        }
    }
}

/// Test cases, tasks and keywords sharing a normalized name.
pub struct DuplicatedNameValidator;

impl ModelValidator for DuplicatedNameValidator {
    fn name(&self) -> &'static str {
        "duplicated-name"
    }

    fn applicable_version_range(&self) -> VersionRange {
        VersionRange::all()
    }

    fn validate(&self, file: &RobotFile, diagnostics: &mut DiagnosticCollector) {
        for kind in [CodeKind::TestCases, CodeKind::Tasks, CodeKind::Keywords] {
            let mut names: Occurrences<'_> = IndexMap::default();
            for holder in file.code_table(kind).holders() {
                let token = holder.name().declaration();
                names.entry(normalize(token.text())).or_default().push(token);
            }
            for tokens in names.values() {
                let Some((first, rest)) = tokens.split_first() else {
                    continue;
                };
                for again in rest {
                    let diagnostic = match kind {
                        CodeKind::Keywords => Diagnostic::error(
                            again,
                            format!("keyword '{}' is defined more than once", again.text()),
                        )
                        .with_code(codes::DUPLICATED_KEYWORD),
                        CodeKind::TestCases | CodeKind::Tasks => Diagnostic::warning(
                            again,
                            format!("'{}' is defined more than once", again.text()),
                        )
                        .with_code(codes::DUPLICATED_TEST_CASE),
                    };
                    diagnostics.duplicate(diagnostic, first);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParserConfig};

    fn check(validator: &dyn ModelValidator, text: &str, version: RobotVersion) -> Vec<Diagnostic> {
        let output = parse(text, &ParserConfig::default().with_version(version));
        let mut collector = DiagnosticCollector::new();
        validator.validate(output.file(), &mut collector);
        collector.finish()
    }

    #[test]
    fn test_repeated_force_tags() {
        let text = "*** Settings ***\nForce Tags    a\nForce Tags    b\n";
        let found = check(&DuplicatedSettingValidator, text, V3_0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line(), Some(3));
        assert_eq!(found[0].related[0].position.map(|p| p.line), Some(2));

        let old = check(&OldSyntaxDuplicatedSettingValidator, text, RobotVersion::new(2, 9));
        assert!(old[0].has_code(codes::OLD_SYNTAX_DUPLICATED_SETTING));
    }

    #[test]
    fn test_repeated_local_setting() {
        let text = "*** Keywords ***\nK\n    [Tags]    a\n    [Tags]    b\n    No Operation\n";
        let found = check(&DuplicatedSettingValidator, text, V3_0);
        assert_eq!(found.len(), 1);
        assert!(found[0].has_code(codes::DUPLICATED_LOCAL_SETTING));
    }

    #[test]
    fn test_deprecated_spelling_has_hint() {
        let text = "*** Settings ***\nDocument    old\n";
        let found = check(&DeprecatedSyntaxValidator, text, V3_0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].hint.as_deref(), Some("use 'Documentation' instead"));
    }

    #[test]
    fn test_as_before_six() {
        let text = "*** Settings ***\nLibrary    Foo    AS    Bar\n";
        let found = check(&AsAliasValidator, text, RobotVersion::new(5, 0));
        assert_eq!(found.len(), 1);
        assert!(found[0].has_code(codes::ALIAS_MARKER_UNAVAILABLE));
    }

    #[test]
    fn test_alias_emptied_after_parse() {
        let mut output = parse("*** Settings ***\nLibrary    Foo    WITH NAME    Bar\n", &ParserConfig::default());
        let mut collector = DiagnosticCollector::new();
        LibraryAliasValidator.validate(output.file(), &mut collector);
        assert!(collector.diagnostics().is_empty());

        let version = output.file().version();
        output.file_mut().settings_mut().imports_mut()[0]
            .set_alias("", &version)
            .unwrap();
        LibraryAliasValidator.validate(output.file(), &mut collector);
        assert_eq!(collector.with_code(codes::ALIAS_WITHOUT_VALUE).count(), 1);
    }

    #[test]
    fn test_duplicated_names_are_normalized() {
        let text = "*** Test Cases ***\nLogin\n    No Operation\nlog in\n    No Operation\n*** Keywords ***\nHelper\n    No Operation\nHELPER\n    No Operation\n";
        let found = check(&DuplicatedNameValidator, text, V3_0);
        assert_eq!(found.len(), 2);
        assert!(found[0].has_code(codes::DUPLICATED_TEST_CASE));
        assert!(found[1].has_code(codes::DUPLICATED_KEYWORD));
        assert!(found[1].severity.is_error());
    }
}
