#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::model_helpers::{assert_no_anomalies, parse_text, parse_with_version, texts};
use crate::helpers::source_fixtures::{FULL_SUITE, PIPE_SUITE, TSV_SUITE};
use red::model::{ModelType, SettingKind};
use red::parser::{parse, FileFormat, ParserConfig, RobotTokenType};

#[test]
fn test_full_suite_structure() {
    let output = parse_text(FULL_SUITE);
    assert_no_anomalies(&output);
    let file = output.file();

    let settings = file.settings();
    assert_eq!(settings.libraries().count(), 1);
    assert_eq!(settings.resources().count(), 1);
    assert_eq!(settings.metadata().len(), 1);
    assert_eq!(settings.force_tags().len(), 2);
    assert_eq!(
        texts(settings.documentation().elements()[0].values()),
        vec!["Login tests", "for the web shop"]
    );

    let library = settings.libraries().next().unwrap();
    assert_eq!(library.name().unwrap().text(), "SeleniumLibrary");
    assert_eq!(texts(library.arguments()), vec!["timeout=5"]);

    let variables = file.variables().variables();
    assert_eq!(variables[0].model_type(), ModelType::ScalarVariable);
    assert_eq!(variables[1].model_type(), ModelType::ListVariable);
    assert_eq!(variables[2].model_type(), ModelType::DictionaryVariable);
    let items = variables[2].dictionary_items().unwrap();
    assert_eq!(items[0].key, "max");
    assert_eq!(items[0].value, Some("3"));

    let test = file.test_cases().holder("valid login").unwrap();
    assert_eq!(test.tags().len(), 1);
    let first_step = test.rows().next().unwrap();
    assert_eq!(first_step.assignments()[0].text(), "${name}=");
    assert_eq!(first_step.keyword_call().unwrap().text(), "Set Variable");

    let keyword = file.keywords().holder("Login As").unwrap();
    let input = keyword.rows().next().unwrap();
    assert_eq!(texts(input.call_arguments()), vec!["id=user", "${user}", "clear=True"]);
}

#[test]
fn test_variable_usage_type() {
    let output = parse_text(FULL_SUITE);
    let setup = output.file().settings().suite_setups().elements()[0].clone();
    let url = &setup.arguments()[0];
    assert!(url.has_type(RobotTokenType::VariableUsage));
    assert!(!setup.name().unwrap().has_type(RobotTokenType::VariableUsage));
}

#[test]
fn test_pipe_format() {
    let output = parse_text(PIPE_SUITE);
    assert_no_anomalies(&output);
    let test = &output.file().test_cases().holders()[0];
    assert_eq!(test.name_text(), "Listing");
    let step = test.rows().next().unwrap();
    assert_eq!(step.keyword_call().unwrap().text(), "List Directory");
}

#[test]
fn test_tsv_keeps_empty_cells() {
    let output = parse(TSV_SUITE, &ParserConfig::default().with_format(FileFormat::Tsv));
    let step = output.file().test_cases().holders()[0].rows().next().unwrap().clone();
    assert_eq!(texts(step.call_arguments()), vec!["", "x"]);
}

#[rstest]
#[case("Force Tags", SettingKind::ForceTags)]
#[case("force tags", SettingKind::ForceTags)]
#[case("ForceTags:", SettingKind::ForceTags)]
#[case("Suite Precondition", SettingKind::SuiteSetup)]
#[case("Test Postcondition", SettingKind::TestTeardown)]
#[case("Document", SettingKind::Documentation)]
fn test_setting_spellings(#[case] spelling: &str, #[case] kind: SettingKind) {
    let output = parse_text(&format!("*** Settings ***\n{spelling}    value\n"));
    assert_eq!(output.file().settings().group(kind).len(), 1, "{spelling}");
}

#[rstest]
#[case("*** Tasks ***", 3, 0, 0)]
#[case("*** Tasks ***", 3, 1, 1)]
#[case("*** Task ***", 4, 0, 1)]
fn test_tasks_table_by_version(#[case] header: &str, #[case] major: u32, #[case] minor: u32, #[case] tasks: usize) {
    let output = parse_with_version(&format!("{header}\nTask\n    Log    x\n"), major, minor);
    assert_eq!(output.file().tasks().holders().len(), tasks);
}

#[test]
fn test_comments_table_is_ignored() {
    let output = parse_text("*** Comments ***\nLibrary    Foo\n*** Settings ***\nLibrary    Bar\n");
    assert_no_anomalies(&output);
    let imports = output.file().settings().imports();
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].name().unwrap().text(), "Bar");
    assert_eq!(output.file().other_headers().len(), 1);
}

#[test]
fn test_header_columns_and_comment() {
    let output = parse_text("*** Test Cases ***    Action    Argument    # columns\nT    Log    x\n");
    let header = &output.file().test_cases().headers()[0];
    assert_eq!(texts(header.values()), vec!["Action", "Argument"]);
    assert!(header.values().iter().all(|t| t.token_type() == RobotTokenType::TableHeaderColumn));
    assert_eq!(header.comment_text(), "# columns");
}

#[test]
fn test_line_endings_are_recorded() {
    let output = parse_text("*** Settings ***\r\nLibrary    Foo\rResource    r.resource");
    let lines = output.file().lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].eol.as_str(), "\r\n");
    assert_eq!(lines[1].eol.as_str(), "\r");
    assert_eq!(lines[2].eol.as_str(), "");
    assert_eq!(output.file().settings().imports().len(), 2);
}
