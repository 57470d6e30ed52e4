#![allow(clippy::unwrap_used)]

use crate::helpers::model_helpers::{codes, parse_text};
use crate::helpers::source_fixtures::MALFORMED;
use red::parser::{ErrorCode, Severity};

#[test]
fn test_malformed_lines_do_not_stop_parsing() {
    let output = parse_text(MALFORMED);
    let file = output.file();

    assert_eq!(file.settings().imports().len(), 1);
    assert_eq!(file.test_cases().holders().len(), 1);
    assert_eq!(file.test_cases().holders()[0].name_text(), "Real Test");
    assert_eq!(file.test_cases().holders()[0].rows().count(), 1);

    let codes = codes(&output);
    assert!(codes.contains(&ErrorCode::E0101));
    assert!(codes.contains(&ErrorCode::E0102));
    assert!(codes.contains(&ErrorCode::E0402));
}

#[test]
fn test_step_outside_test_is_an_error() {
    let output = parse_text("*** Test Cases ***\n    Log    x\nT\n    Log    y\n");
    let orphan = output.messages_with(ErrorCode::E0402).next().unwrap();
    assert_eq!(orphan.severity, Severity::Error);
    assert_eq!(orphan.position.unwrap().line, 2);
    assert!(output.has_errors());
    assert_eq!(output.file().test_cases().holders()[0].rows().count(), 1);
}

#[test]
fn test_orphan_continuation() {
    let output = parse_text("*** Settings ***\n...    nothing\nLibrary    Foo\n");
    assert_eq!(codes(&output), vec![ErrorCode::E0403]);
    assert_eq!(output.file().settings().imports().len(), 1);
}

#[test]
fn test_unknown_settings_are_kept() {
    let output = parse_text("*** Settings ***\nLibary    Foo\n*** Keywords ***\nK\n    [Setup]    x\n");
    let file = output.file();
    assert_eq!(file.settings().unknown_settings().len(), 1);
    assert_eq!(file.keywords().holders()[0].body().len(), 1);
    assert_eq!(codes(&output), vec![ErrorCode::E0201, ErrorCode::E0401]);
}

#[test]
fn test_import_without_name() {
    let output = parse_text("*** Settings ***\nLibrary\nResource    a.resource\n");
    assert_eq!(codes(&output), vec![ErrorCode::E0202]);
}

#[test]
fn test_invalid_variable_is_unknown() {
    let output = parse_text("*** Variables ***\nNAME    value\n${OK}    1\n");
    let variables = output.file().variables().variables();
    assert_eq!(variables.len(), 2);
    assert_eq!(codes(&output), vec![ErrorCode::E0301]);
}
