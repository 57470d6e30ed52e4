#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::model_helpers::{codes, parse_text, parse_with_version, texts};
use red::parser::{ErrorCode, RobotTokenType};

#[test]
fn test_alias_with_value() {
    let output = parse_text("*** Settings ***\nLibrary  Foo  WITH NAME  Bar\n");
    let library = &output.file().settings().imports()[0];
    let alias = library.alias().unwrap();
    assert_eq!(alias.declaration.text(), "WITH NAME");
    assert_eq!(alias.value.as_ref().unwrap().text(), "Bar");
    assert!(library.arguments().is_empty());
    assert!(output.messages().is_empty());
}

#[test]
fn test_alias_without_value_becomes_argument() {
    let output = parse_text("*** Settings ***\nLibrary  Foo  WITH NAME\n");
    let library = &output.file().settings().imports()[0];
    assert!(library.alias().is_none());
    assert_eq!(texts(library.arguments()), vec!["WITH NAME"]);
    assert_eq!(codes(&output), vec![ErrorCode::E0203]);
}

#[test]
fn test_two_aliases_demote_everything() {
    let output = parse_text("*** Settings ***\nLibrary  Foo  WITH NAME  a  WITH NAME  b\n");
    let library = &output.file().settings().imports()[0];
    assert!(library.alias().is_none());
    assert_eq!(texts(library.arguments()), vec!["WITH NAME", "a", "WITH NAME", "b"]);
    assert!(
        library
            .arguments()
            .iter()
            .all(|t| t.token_type() == RobotTokenType::SettingLibraryArgument)
    );
}

#[test]
fn test_alias_split_over_continuation() {
    let output = parse_text("*** Settings ***\nLibrary  Foo  WITH NAME\n...  Bar\n");
    let library = &output.file().settings().imports()[0];
    assert_eq!(library.alias().unwrap().value.as_ref().unwrap().text(), "Bar");
    assert!(output.messages().is_empty());
}

#[rstest]
#[case(5, 0, false)]
#[case(6, 0, true)]
#[case(7, 0, true)]
fn test_as_marker_by_version(#[case] major: u32, #[case] minor: u32, #[case] is_alias: bool) {
    let output = parse_with_version("*** Settings ***\nLibrary  Foo  AS  Bar\n", major, minor);
    let library = &output.file().settings().imports()[0];
    assert_eq!(library.alias().is_some(), is_alias);
    if !is_alias {
        assert_eq!(texts(library.arguments()), vec!["AS", "Bar"]);
    }
}

#[test]
fn test_with_name_is_deprecated_in_seven() {
    let output = parse_with_version("*** Settings ***\nLibrary  Foo  WITH NAME  Bar\n", 7, 0);
    let alias = output.file().settings().imports()[0].alias().cloned().unwrap();
    assert!(alias.declaration.has_type(RobotTokenType::Deprecated));
}
