//! Property tests: unchanged files are written back byte for byte.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use crate::helpers::model_helpers::{dump_file, parse_text, token_snapshot};

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("  "), Just("    "), Just("\t"), Just("  \t ")]
}

fn eol() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n"), Just("\r")]
}

fn header() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*** Settings ***"),
        Just("*** Variables ***"),
        Just("*** Test Cases ***"),
        Just("*** Keywords ***"),
        Just("*** Comments ***"),
        Just("*Setting"),
        Just("*** Unknown ***"),
    ]
    .prop_map(str::to_string)
}

fn content_line() -> impl Strategy<Value = String> {
    let word = "[A-Za-z][A-Za-z0-9=]{0,8}";
    (separator(), word, word).prop_flat_map(|(sep, a, b)| {
        prop_oneof![
            Just(format!("Library{sep}{a}")),
            Just(format!("Library{sep}{a}{sep}WITH NAME{sep}{b}")),
            Just(format!("Force Tags{sep}{a}{sep}{b}")),
            Just(format!("Documentation{sep}{a} {b}")),
            Just(format!("${{{a}}}{sep}{b}")),
            Just(format!("@{{{a}}}{sep}{a}{sep}{b}")),
            Just(a.clone()),
            Just(format!("{sep}{a}{sep}{b}")),
            Just(format!("{sep}[Tags]{sep}{a}")),
            Just(format!("{sep}...{sep}{b}")),
            Just(format!("...{sep}{b}")),
            Just(format!("# {a} {b}")),
            Just(format!("{sep}# {a}")),
            Just(format!("{a}{sep}{b}{sep}# trailing")),
            Just(format!("| {a} | {b} |")),
            Just(format!("| | {a} | {b} |")),
            Just(String::new()),
            Just(sep.to_string()),
        ]
    })
}

fn document() -> impl Strategy<Value = String> {
    let line = prop_oneof![1 => header(), 4 => content_line()];
    (
        prop::collection::vec((line, eol()), 0..24),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(lines, bom, final_eol)| {
            let mut text = String::new();
            if bom {
                text.push('\u{feff}');
            }
            let count = lines.len();
            for (index, (line, eol)) in lines.into_iter().enumerate() {
                text.push_str(&line);
                if final_eol || index + 1 < count {
                    text.push_str(eol);
                }
            }
            text
        })
}

fn suite_tail() -> impl Strategy<Value = String> {
    prop::collection::vec(content_line(), 0..12).prop_map(|lines| {
        let mut text = String::from("*** Test Cases ***\n");
        for line in lines {
            text.push_str(&line);
            text.push('\n');
        }
        text
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_unchanged_file_round_trips(text in document()) {
        let output = parse_text(&text);
        prop_assert_eq!(dump_file(output.file()), text);
    }

    #[test]
    fn test_reparse_is_stable(text in document()) {
        let first = parse_text(&text);
        let second = parse_text(&dump_file(first.file()));
        prop_assert_eq!(token_snapshot(first.file()), token_snapshot(second.file()));
        prop_assert_eq!(first.messages().len(), second.messages().len());
    }

    #[test]
    fn test_renamed_import_survives_reparse(tail in suite_tail()) {
        let text = format!("*** Settings ***\nLibrary    Foo    arg\n{tail}");
        let mut output = parse_text(&text);
        let names: Vec<String> = output
            .file()
            .test_cases()
            .holders()
            .iter()
            .map(|h| h.name_text().to_string())
            .collect();

        output.file_mut().settings_mut().imports_mut()[0].set_name("Renamed").unwrap();
        let written = dump_file(output.file());
        let reparsed = parse_text(&written);

        let library = &reparsed.file().settings().imports()[0];
        prop_assert_eq!(library.name().unwrap().text(), "Renamed");
        prop_assert_eq!(library.arguments().len(), 1);
        let reparsed_names: Vec<String> = reparsed
            .file()
            .test_cases()
            .holders()
            .iter()
            .map(|h| h.name_text().to_string())
            .collect();
        prop_assert_eq!(names, reparsed_names);
        prop_assert!(written.ends_with(&tail));
    }
}
