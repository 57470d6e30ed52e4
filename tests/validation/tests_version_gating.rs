#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::model_helpers::{parse_text, parse_with_version};
use crate::helpers::source_fixtures::{FULL_SUITE, REPEATED_SETTINGS};
use red::validate_file;
use red::validation::codes;

#[rstest]
#[case(2, 5, codes::OLD_SYNTAX_DUPLICATED_SETTING, false)]
#[case(3, 0, codes::DUPLICATED_SETTING, true)]
#[case(7, 0, codes::DUPLICATED_SETTING, true)]
fn test_repeated_settings_by_version(
    #[case] major: u32,
    #[case] minor: u32,
    #[case] code: &str,
    #[case] is_error: bool,
) {
    let output = parse_with_version(REPEATED_SETTINGS, major, minor);
    let diagnostics = validate_file(output.file());
    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert!(diagnostics[0].has_code(code));
    assert_eq!(diagnostics[0].severity.is_error(), is_error);
    assert_eq!(diagnostics[0].line(), Some(4));
}

#[test]
fn test_full_suite_reports_repeated_force_tags() {
    let output = parse_text(FULL_SUITE);
    let diagnostics = validate_file(output.file());
    let found: Vec<(Option<&str>, Option<usize>)> = diagnostics
        .iter()
        .map(|d| (d.code.as_deref(), d.line()))
        .collect();
    assert_eq!(found, vec![(Some(codes::DUPLICATED_SETTING), Some(8))]);
}

#[test]
fn test_joined_setting_is_no_longer_repeated() {
    let output = parse_with_version(REPEATED_SETTINGS, 3, 0);
    output.file().force_tags_view().add_tag("x").unwrap();
    assert!(validate_file(output.file()).is_empty());
}

#[rstest]
#[case(5, 1, 1)]
#[case(6, 0, 0)]
fn test_as_marker_warning(#[case] major: u32, #[case] minor: u32, #[case] expected: usize) {
    let output = parse_with_version("*** Settings ***\nLibrary    Foo    AS    Bar\n", major, minor);
    let diagnostics = validate_file(output.file());
    let warnings = diagnostics
        .iter()
        .filter(|d| d.has_code(codes::ALIAS_MARKER_UNAVAILABLE))
        .count();
    assert_eq!(warnings, expected);
}

#[test]
fn test_deprecated_spelling_only_after_deprecation() {
    let text = "*** Settings ***\nSuite Precondition    Setup\n";
    let old = validate_file(parse_with_version(text, 2, 9).file());
    assert!(old.iter().all(|d| !d.has_code(codes::DEPRECATED)));

    let new = validate_file(parse_with_version(text, 3, 0).file());
    let deprecated: Vec<_> = new.iter().filter(|d| d.has_code(codes::DEPRECATED)).collect();
    assert_eq!(deprecated.len(), 1);
    assert_eq!(deprecated[0].hint.as_deref(), Some("use 'Suite Setup' instead"));
}

#[test]
fn test_unpositioned_elements_are_validated() {
    let mut output = parse_text("*** Keywords ***\nHelper\n    No Operation\n");
    output
        .file_mut()
        .keywords_mut()
        .add_holder("helper")
        .unwrap()
        .add_row(&["Log", "x"])
        .unwrap();
    let diagnostics = validate_file(output.file());
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].has_code(codes::DUPLICATED_KEYWORD));
    assert_eq!(diagnostics[0].position, None);
    assert_eq!(diagnostics[0].related[0].position.map(|p| p.line), Some(2));
}
