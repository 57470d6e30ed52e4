#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::model_helpers::{dump_file, parse_text, parse_with_version, texts};
use crate::helpers::source_fixtures::{FULL_SUITE, MALFORMED, PIPE_SUITE, REPEATED_SETTINGS};
use red::model::CodeKind;
use red::{dump, DumpConfig};

#[rstest]
#[case(FULL_SUITE)]
#[case(REPEATED_SETTINGS)]
#[case(PIPE_SUITE)]
#[case(MALFORMED)]
fn test_fixtures_round_trip(#[case] text: &str) {
    let output = parse_text(text);
    assert_eq!(dump_file(output.file()), text);
    let spaced = dump(output.file(), &DumpConfig::default().with_separator("  "));
    assert_eq!(spaced, text);
}

#[test]
fn test_joined_setting_is_written_once() {
    let output = parse_with_version(REPEATED_SETTINGS, 2, 9);
    output.file().force_tags_view().add_tag("e").unwrap();
    assert_eq!(
        dump_file(output.file()),
        "*** Settings ***\nForce Tags    a    b    c    e\nDefault Tags    d\n"
    );
}

#[test]
fn test_alias_edit_keeps_neighbours() {
    let mut output = parse_text(FULL_SUITE);
    let version = output.file().version();
    output.file_mut().settings_mut().imports_mut()[0]
        .set_alias("Chrome", &version)
        .unwrap();
    let written = dump_file(output.file());

    assert!(written.contains("\nLibrary    SeleniumLibrary    timeout=5    WITH NAME    Chrome\nResource         common.resource\n"));
    assert_eq!(written.lines().count(), FULL_SUITE.lines().count());
    let reparsed = parse_text(&written);
    let alias = reparsed.file().settings().imports()[0].alias().cloned().unwrap();
    assert_eq!(alias.value.unwrap().text(), "Chrome");
}

#[test]
fn test_new_alias_uses_marker_of_version() {
    let mut output = parse_with_version("*** Settings ***\nLibrary    Foo\n", 7, 0);
    let version = output.file().version();
    output.file_mut().settings_mut().imports_mut()[0]
        .set_alias("Bar", &version)
        .unwrap();
    assert_eq!(dump_file(output.file()), "*** Settings ***\nLibrary    Foo    AS    Bar\n");
}

#[test]
fn test_configured_separator_for_new_lines() {
    let mut output = parse_text("*** Settings ***\nLibrary    Foo\n");
    let version = output.file().version();
    output.file_mut().settings_mut().add_library("Bar", &version);
    let written = dump(output.file(), &DumpConfig::default().with_separator("  "));
    assert_eq!(written, "*** Settings ***\nLibrary    Foo\nLibrary  Bar\n");
}

#[test]
fn test_removed_test_case_leaves_comments() {
    let mut output = parse_text(FULL_SUITE);
    output.file_mut().test_cases_mut().remove_holder(0).unwrap();
    let written = dump_file(output.file());
    assert!(!written.contains("Valid Login"));
    assert!(!written.contains("Page Should Contain"));
    assert!(written.contains("*** Test Cases ***\n    # checked below\n\n*** Keywords ***"));
}

#[test]
fn test_copied_holder_is_appended_to_its_table() {
    let mut output = parse_text(FULL_SUITE);
    let keyword = output.file().keywords().holders()[0].clone();
    let keywords = output.file_mut().code_table_mut(CodeKind::Keywords);
    let mut copy = keyword.copy_without_position();
    copy.set_name("Login Again").unwrap();
    keywords.insert_holder(1, copy).unwrap();

    let written = dump_file(output.file());
    assert!(written.ends_with(
        "    ...    clear=True\nLogin Again\n    [Arguments]    ${user}\n    Input Text    id=user    ${user}    clear=True\n"
    ));
    let reparsed = parse_text(&written);
    assert_eq!(reparsed.file().keywords().holders().len(), 2);
}

#[test]
fn test_crlf_is_kept_for_new_lines() {
    let mut output = parse_text("*** Test Cases ***\r\nT\r\n    Log    x\r\n");
    output.file_mut().test_cases_mut().holders_mut()[0]
        .add_row(&["Log", "y"])
        .unwrap();
    assert_eq!(
        dump_file(output.file()),
        "*** Test Cases ***\r\nT\r\n    Log    x\r\n    Log    y\r\n"
    );
}

#[test]
fn test_edited_step_rewrites_only_its_line() {
    let mut output = parse_text(FULL_SUITE);
    let test = output.file_mut().test_cases_mut().holder_mut("Valid Login").unwrap();
    let step = test
        .body_mut()
        .iter_mut()
        .find(|e| e.name().is_some_and(|n| n.text() == "Login As"))
        .unwrap();
    step.set_argument(0, "bob").unwrap();
    assert_eq!(texts(step.call_arguments()), vec!["bob"]);

    let written = dump_file(output.file());
    let expected = FULL_SUITE.replace("Login As    ${name}", "Login As    bob");
    assert_eq!(written, expected);
}
