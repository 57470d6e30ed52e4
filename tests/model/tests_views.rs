#![allow(clippy::unwrap_used)]

use crate::helpers::model_helpers::{parse_text, parse_with_version, texts};
use crate::helpers::source_fixtures::REPEATED_SETTINGS;
use red::model::SettingKind;

#[test]
fn test_reads_concatenate_without_joining() {
    let output = parse_with_version(REPEATED_SETTINGS, 2, 9);
    let file = output.file();
    let view = file.force_tags_view();

    assert!(view.is_present());
    assert_eq!(texts(&view.tags().unwrap()), vec!["a", "b", "c"]);
    assert_eq!(view.declaration().unwrap().line(), Some(2));
    assert!(!view.is_joined());
    assert_eq!(file.settings().force_tags().len(), 2);
}

#[test]
fn test_first_write_joins_once() {
    let output = parse_with_version(REPEATED_SETTINGS, 2, 9);
    let file = output.file();
    let view = file.force_tags_view();

    view.add_tag("d").unwrap();
    assert!(view.is_joined());
    assert_eq!(file.settings().force_tags().len(), 1);
    assert_eq!(texts(&view.tags().unwrap()), vec!["a", "b", "c", "d"]);

    view.remove_tag(0).unwrap();
    assert_eq!(file.settings().force_tags().len(), 1);
    let group = file.settings().force_tags();
    let joined = &group.elements()[0];
    assert_eq!(texts(joined.values()), vec!["b", "c", "d"]);
    assert_eq!(joined.declaration().line(), Some(2));
    assert!(joined.is_modified());
}

#[test]
fn test_write_on_absent_setting_creates_it() {
    let output = parse_text("*** Settings ***\nLibrary    Foo\n");
    let file = output.file();
    let view = file.setting_view(SettingKind::TestTimeout);
    assert!(!view.is_present());
    assert!(view.arguments().is_empty());

    view.set_name("1 minute").unwrap();
    assert!(view.is_present());
    assert_eq!(view.declaration().unwrap().text(), "Test Timeout");
    assert_eq!(view.name().unwrap().text(), "1 minute");
}

#[test]
fn test_single_occurrence_is_kept_as_is() {
    let output = parse_text("*** Settings ***\nSuite Setup    Open    a\n");
    let file = output.file();
    let view = file.suite_setup_view();
    view.set_argument(1, "b").unwrap();

    let group = file.settings().suite_setups();
    let element = &group.elements()[0];
    assert_eq!(texts(element.arguments()), vec!["a", "b"]);
    assert_eq!(element.declaration().line(), Some(2));
}

#[test]
fn test_tags_on_non_tag_setting_is_an_error() {
    let output = parse_text("*** Settings ***\nDocumentation    text\n");
    assert!(output.file().documentation_view().tags().is_err());
}

#[test]
fn test_comments_are_concatenated() {
    let output = parse_with_version(
        "*** Settings ***\nDefault Tags    a    # one\nDefault Tags    b    # two\n",
        2,
        9,
    );
    let view = output.file().default_tags_view();
    assert_eq!(texts(&view.comments()), vec!["# one", "# two"]);
}
