#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::model_helpers::{parse_text, texts};
use red::model::{ModelElement, ModelError, ModelType};
use red::parser::{RobotTokenType, EMPTY_CELL};
use red::RobotVersion;

fn setup_with_argument() -> ModelElement {
    let output = parse_text("*** Settings ***\nSuite Setup    Open Browser    chrome\n");
    output.file().settings().suite_setups().elements()[0].clone()
}

#[test]
fn test_set_argument_pads_with_empty_cells() {
    let mut setup = setup_with_argument();
    setup.set_argument(2, "x").unwrap();
    assert_eq!(texts(setup.arguments()), vec!["chrome", EMPTY_CELL, "x"]);
    setup.set_argument(3, "y").unwrap();
    assert_eq!(setup.arguments().len(), 4);
    assert!(setup.is_modified());
    assert!(
        setup
            .arguments()
            .iter()
            .all(|t| t.token_type() == RobotTokenType::SettingSuiteSetupKeywordArgument)
    );
}

#[test]
fn test_remove_argument_out_of_bounds() {
    let mut setup = setup_with_argument();
    let err = setup.remove_argument(5).unwrap_err();
    assert_eq!(err, ModelError::IndexOutOfBounds { index: 5, len: 1 });
    assert_eq!(setup.remove_argument(0).unwrap().text(), "chrome");
}

#[test]
fn test_copy_without_position() {
    let setup = setup_with_argument();
    let copy = setup.copy_without_position();
    assert!(copy.tokens().all(|t| t.position().is_none()));
    assert!(copy.is_modified());
    assert_eq!(texts(copy.arguments()), texts(setup.arguments()));

    let exact = setup.copy();
    assert_eq!(exact, setup);
    assert!(!exact.is_modified());
}

#[test]
fn test_step_with_assignment() {
    let output = parse_text("*** Test Cases ***\nT\n    ${a}    ${b}=    Get Pair    x\n");
    let step = output.file().test_cases().holders()[0].rows().next().unwrap().clone();
    let assigned: Vec<&str> = step.assignments().iter().map(|t| t.text()).collect();
    assert_eq!(assigned, vec!["${a}", "${b}="]);
    assert_eq!(step.keyword_call().unwrap().text(), "Get Pair");
    assert_eq!(texts(step.call_arguments()), vec!["x"]);
}

#[test]
fn test_renaming_step_keeps_assignments() {
    let mut row = ModelElement::create_row(ModelType::TestCaseExecutableRow, &["${x}=", "Get", "1"]).unwrap();
    row.set_name("Fetch").unwrap();
    assert_eq!(row.keyword_call().unwrap().text(), "Fetch");
    assert_eq!(row.assignments()[0].text(), "${x}=");
}

#[test]
fn test_create_row_rejects_non_rows() {
    assert!(ModelElement::create_row(ModelType::LibraryImport, &["Foo"]).is_err());
    assert_eq!(
        ModelElement::create_row(ModelType::UserKeywordExecutableRow, &[]).unwrap_err(),
        ModelError::MissingName(ModelType::UserKeywordExecutableRow)
    );
}

#[rstest]
#[case(ModelType::SuiteDocumentation, "Documentation")]
#[case(ModelType::ForceTags, "Force Tags")]
#[case(ModelType::LibraryImport, "Library")]
#[case(ModelType::TestCaseTags, "[Tags]")]
#[case(ModelType::UserKeywordArguments, "[Arguments]")]
fn test_created_declarations(#[case] model_type: ModelType, #[case] text: &str) {
    let element = ModelElement::create(model_type, &RobotVersion::new(3, 0));
    assert_eq!(element.declaration().text(), text);
    assert!(!element.is_positioned());
}

#[test]
fn test_comment_editing() {
    let mut setup = setup_with_argument();
    setup.set_comment("# first");
    setup.add_comment_part("second");
    assert_eq!(setup.comment_text(), "# first second");
    setup.clear_comment();
    assert!(setup.comments().is_empty());
}

#[test]
fn test_dictionary_items() {
    let output = parse_text("*** Variables ***\n&{D}    a=1    b\n");
    let dict = &output.file().variables().variables()[0];
    let items = dict.dictionary_items().unwrap();
    assert_eq!(items[0].key, "a");
    assert_eq!(items[0].value, Some("1"));
    assert_eq!(items[1].value, None);
    let scalar = ModelElement::create_named(ModelType::ScalarVariable, "${x}");
    assert!(scalar.dictionary_items().is_err());
}
