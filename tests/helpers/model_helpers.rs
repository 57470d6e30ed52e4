//! Parsing shortcuts and model assertions.

use red::base::{FilePosition, RobotVersion};
use red::model::RobotFile;
use red::parser::{parse, ErrorCode, ParserConfig, RobotToken, RobotTokenType};
use red::{RobotFileOutput, dump, DumpConfig};

pub fn parse_text(text: &str) -> RobotFileOutput {
    parse(text, &ParserConfig::default())
}

pub fn parse_with_version(text: &str, major: u32, minor: u32) -> RobotFileOutput {
    parse(text, &ParserConfig::default().with_version(RobotVersion::new(major, minor)))
}

pub fn dump_file(file: &RobotFile) -> String {
    dump(file, &DumpConfig::default())
}

pub fn texts(tokens: &[RobotToken]) -> Vec<String> {
    tokens.iter().map(|t| t.text().to_string()).collect()
}

/// Every token of the file as (text, types, position), elements in file order
pub fn token_snapshot(file: &RobotFile) -> Vec<(String, Vec<RobotTokenType>, Option<FilePosition>)> {
    let mut snapshot = Vec::new();
    file.for_each_element(|element| {
        for token in element.tokens() {
            snapshot.push((token.text().to_string(), token.types().to_vec(), token.position()));
        }
    });
    snapshot
}

pub fn codes(output: &RobotFileOutput) -> Vec<ErrorCode> {
    output.messages().iter().map(|m| m.code).collect()
}

/// Assert parsing produced no anomalies.
pub fn assert_no_anomalies(output: &RobotFileOutput) {
    assert!(
        output.messages().is_empty(),
        "Expected no anomalies, got:\n{}",
        output
            .messages()
            .iter()
            .map(|m| format!("  {} line {:?}: {}", m.code, m.position.map(|p| p.line), m.message))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
