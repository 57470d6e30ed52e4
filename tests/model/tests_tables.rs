#![allow(clippy::unwrap_used)]

use crate::helpers::model_helpers::{parse_text, texts};
use crate::helpers::source_fixtures::FULL_SUITE;
use red::model::{CodeKind, ModelError, ModelType};

#[test]
fn test_holder_lookup_ignores_case_and_spaces() {
    let output = parse_text(FULL_SUITE);
    let keywords = output.file().keywords();
    assert!(keywords.holder("login as").is_some());
    assert!(keywords.holder("LoginAs").is_some());
    assert!(keywords.holder("Logout").is_none());
}

#[test]
fn test_add_holder_rejects_blank_name() {
    let mut output = parse_text(FULL_SUITE);
    let keywords = output.file_mut().keywords_mut();
    assert_eq!(
        keywords.add_holder("  ").unwrap_err(),
        ModelError::MissingName(ModelType::UserKeyword)
    );
    let holder = keywords.add_holder("Logout").unwrap();
    holder.add_row(&["Close Browser"]).unwrap();
    assert_eq!(keywords.holders().len(), 2);
}

#[test]
fn test_local_settings_go_before_steps() {
    let mut output = parse_text(FULL_SUITE);
    let version = output.file().version();
    let test = output.file_mut().test_cases_mut().holder_mut("Valid Login").unwrap();

    let setup = test.add_setting(ModelType::TestCaseSetup, &version).unwrap();
    setup.set_name("Prepare").unwrap();
    assert_eq!(test.body()[1].model_type(), ModelType::TestCaseSetup);
    assert_eq!(test.body()[2].model_type(), ModelType::TestCaseExecutableRow);

    assert!(test.add_setting(ModelType::UserKeywordArguments, &version).is_err());
}

#[test]
fn test_insert_holder_copies_without_positions() {
    let mut output = parse_text(FULL_SUITE);
    let keyword = output.file().keywords().holders()[0].clone();

    let tasks = output.file_mut().code_table_mut(CodeKind::Tasks);
    tasks.insert_holder(0, keyword).unwrap();
    let inserted = &tasks.holders()[0];
    assert_eq!(inserted.kind(), CodeKind::Tasks);
    assert!(inserted.body().iter().all(|e| !e.is_positioned()));
    let again = inserted.clone();
    assert!(matches!(
        tasks.insert_holder(5, again),
        Err(ModelError::IndexOutOfBounds { index: 5, len: 1 })
    ));
}

#[test]
fn test_remove_holder() {
    let mut output = parse_text(FULL_SUITE);
    let tests = output.file_mut().test_cases_mut();
    let removed = tests.remove_holder(0).unwrap();
    assert_eq!(removed.name_text(), "Valid Login");
    assert!(tests.holders().is_empty());
    assert!(tests.remove_holder(0).is_err());
}

#[test]
fn test_holder_tags_collects_every_tags_setting() {
    let output = parse_text("*** Test Cases ***\nT\n    [Tags]    a\n    Log    x\n    [Tags]    b\n");
    let test = &output.file().test_cases().holders()[0];
    let tags: Vec<&str> = test.tags().iter().map(|t| t.text()).collect();
    assert_eq!(tags, vec!["a", "b"]);
    assert_eq!(test.settings().count(), 2);
    assert_eq!(test.rows().count(), 1);
}

#[test]
fn test_variables() {
    let mut output = parse_text(FULL_SUITE);
    let variables = output.file_mut().variables_mut();
    assert!(variables.variable("${URL}").is_some());
    assert!(variables.variable("${url} =").is_some());

    let added = variables.add_variable("@{EMPTY_LIST}");
    assert_eq!(added.model_type(), ModelType::ListVariable);
    assert!(variables.remove_variable(9).is_err());
}

#[test]
fn test_settings_table_edits() {
    let mut output = parse_text(FULL_SUITE);
    let version = output.file().version();
    let settings = output.file_mut().settings_mut();

    let library = settings.add_library("Collections", &version);
    library.add_argument("x").unwrap();
    assert_eq!(texts(library.arguments()), vec!["x"]);
    assert_eq!(settings.libraries().count(), 2);

    let metadata = settings.add_metadata("Version", &version);
    metadata.add_argument("1.0").unwrap();
    assert_eq!(settings.metadata().len(), 2);

    let removed = settings.remove_import(0).unwrap();
    assert_eq!(removed.name().unwrap().text(), "SeleniumLibrary");
    assert!(settings.remove_metadata(7).is_err());
}
