//! Line-driven parser for the plain text, pipe and TSV formats
//!
//! ```text
//! text ─▶ lines (EOL kept) ─▶ cells ─▶ recognizers ─▶ mappers ─▶ RobotFile
//! ```
//!
//! A logical line is a physical line plus the `...` lines continuing it.
//! Empty and comment-only lines in between do not end it. Everything the
//! mappers could not place is reported and skipped.

use tracing::debug;

use super::alias_fixer;
use super::config::ParserConfig;
use super::errors::{ErrorCode, Severity};
use super::lexer;
use super::mapping::{MappingContext, MAPPERS};
use super::recognizer::{is_table_header_shaped, RECOGNIZERS};
use super::separators::{split_line, Cell, FileFormat, SplitLine};
use super::state::ParsingState;
use super::{RobotToken, RobotTokenType};
use crate::base::{FilePosition, RobotVersion};
use crate::model::{CodeKind, EndOfLine, HeaderSlot, ModelElement, ModelType, RobotFile, RobotFileOutput, RobotLine};

const BOM: char = '\u{feff}';
const CONTINUATION: &str = "...";

/// Parse a whole file.
///
/// Never fails: input that cannot be modelled is reported in
/// [`RobotFileOutput::messages`].
pub fn parse(text: &str, config: &ParserConfig) -> RobotFileOutput {
    let format = config.format.unwrap_or_default();
    let (has_bom, body) = match text.strip_prefix(BOM) {
        Some(body) => (true, body),
        None => (false, text),
    };

    let mut lines = split_lines(body);
    let mut parser = TextualParser::new(RobotFile::new(config.version, format), format);
    for line in &mut lines {
        parser.read_line(line);
    }
    let output = parser.finish(lines, has_bom);

    debug!(
        lines = output.file().lines().len(),
        version = %config.version,
        anomalies = output.messages().len(),
        "parsed robot file"
    );
    output
}

/// Parse a file given as separate lines joined by `\n`.
pub fn parse_lines(lines: &[&str], config: &ParserConfig) -> RobotFileOutput {
    parse(&lines.join("\n"), config)
}

/// Split text into lines, keeping each line's terminator
pub(crate) fn split_lines(text: &str) -> Vec<RobotLine> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut idx = 0;
    let mut push = |start: usize, end: usize, eol: EndOfLine| {
        lines.push(RobotLine {
            number: lines.len() + 1,
            text: text[start..end].to_string(),
            eol,
            offset: start,
            separator: None,
            owned: false,
            tokens: 0,
        });
    };
    while idx < bytes.len() {
        match bytes[idx] {
            b'\n' => {
                push(start, idx, EndOfLine::Lf);
                idx += 1;
                start = idx;
            }
            b'\r' if bytes.get(idx + 1) == Some(&b'\n') => {
                push(start, idx, EndOfLine::CrLf);
                idx += 2;
                start = idx;
            }
            b'\r' => {
                push(start, idx, EndOfLine::Cr);
                idx += 1;
                start = idx;
            }
            _ => idx += 1,
        }
    }
    if start < bytes.len() {
        push(start, bytes.len(), EndOfLine::Eof);
    }
    lines
}

struct TextualParser {
    ctx: MappingContext,
    format: FileFormat,
    reported_preamble: bool,
    continuation_lines: Vec<usize>,
}

impl TextualParser {
    fn new(file: RobotFile, format: FileFormat) -> Self {
        Self {
            ctx: MappingContext::new(file),
            format,
            reported_preamble: false,
            continuation_lines: Vec::new(),
        }
    }

    fn version(&self) -> RobotVersion {
        self.ctx.version
    }

    fn read_line(&mut self, line: &mut RobotLine) {
        let split = split_line(&line.text, self.format);
        if split.is_empty() {
            return;
        }
        line.separator = Some(split.separator);

        let first = split.cells[0];
        if !split.indented && is_table_header_shaped(first.text) {
            self.read_header(line, &split);
            return;
        }
        if first.text.starts_with('#') {
            // comment-only lines belong to no element
            return;
        }

        match self.ctx.stack.table() {
            None => {
                self.report_preamble(line, first);
                return;
            }
            Some(ParsingState::Trash) => return,
            Some(_) => {}
        }

        let continuation = first.text == CONTINUATION;
        if continuation {
            if self.ctx.current.is_none() {
                let token = RobotToken::positioned(first.text, position(line, first));
                self.ctx.record(
                    ErrorCode::E0403,
                    Severity::Warning,
                    &token,
                    "'...' does not continue anything",
                );
                return;
            }
            self.continuation_lines.push(line.number);
        } else {
            alias_fixer::end_of_line(&mut self.ctx);
            self.ctx.stack.reset_to_line_start(split.indented);
            self.ctx.current = None;
        }

        self.ctx.indented = split.indented;
        let mut mapped_any = false;
        let mut comment: Option<usize> = None;
        for (idx, cell) in split.cells.iter().enumerate().skip(usize::from(continuation)) {
            let at = position(line, *cell);
            if comment.is_some() || cell.text.starts_with('#') {
                let first_part = comment.is_none();
                comment = Some(idx);
                if mapped_any || continuation {
                    self.attach_comment(RobotToken::positioned(cell.text, at), first_part);
                }
                continue;
            }
            self.ctx.first_cell = idx == 0;
            let token = RECOGNIZERS.recognize(cell.text, at, &self.version());
            MAPPERS.map(&mut self.ctx, token);
            mapped_any = true;
        }
    }

    fn attach_comment(&mut self, mut token: RobotToken, first_part: bool) {
        token.set_type(if first_part {
            RobotTokenType::StartHashComment
        } else {
            RobotTokenType::CommentContinue
        });
        if let Some(element) = self.ctx.current_element_mut() {
            element.push_comment(token);
        }
    }

    fn report_preamble(&mut self, line: &RobotLine, first: Cell<'_>) {
        if self.reported_preamble {
            return;
        }
        self.reported_preamble = true;
        let token = RobotToken::positioned(first.text, position(line, first));
        self.ctx.record(
            ErrorCode::E0101,
            Severity::Info,
            &token,
            "content before the first table header is ignored",
        );
    }

    fn read_header(&mut self, line: &RobotLine, split: &SplitLine<'_>) {
        alias_fixer::end_of_line(&mut self.ctx);
        self.ctx.stack.clear();
        self.ctx.current = None;
        self.ctx.holder = None;

        let first = split.cells[0];
        let mut token = RECOGNIZERS.recognize(first.text, position(line, first), &self.version());
        let header_type = token.types().iter().copied().find(|t| t.is_table_header());
        let (slot, state) = match header_type {
            Some(RobotTokenType::SettingsTableHeader) => (HeaderSlot::Settings, ParsingState::SettingTableHeader),
            Some(RobotTokenType::VariablesTableHeader) => (HeaderSlot::Variables, ParsingState::VariableTableHeader),
            Some(RobotTokenType::TestCasesTableHeader) => (
                HeaderSlot::Code(CodeKind::TestCases),
                ParsingState::TestCaseTableHeader,
            ),
            Some(RobotTokenType::TasksTableHeader) => (
                HeaderSlot::Code(CodeKind::Tasks),
                ParsingState::TaskTableHeader,
            ),
            Some(RobotTokenType::KeywordsTableHeader) => (
                HeaderSlot::Code(CodeKind::Keywords),
                ParsingState::KeywordTableHeader,
            ),
            Some(_) => (HeaderSlot::Other, ParsingState::Trash),
            None => {
                self.report_unknown_header(&token);
                (HeaderSlot::Other, ParsingState::Trash)
            }
        };
        token.set_type(header_type.unwrap_or(RobotTokenType::UserOwnTableHeader));

        let mut header = ModelElement::new(ModelType::TableHeader, token);
        let mut in_comment = false;
        for cell in &split.cells[1..] {
            let mut cell_token = RobotToken::positioned(cell.text, position(line, *cell));
            if in_comment || cell.text.starts_with('#') {
                cell_token.set_type(if in_comment {
                    RobotTokenType::CommentContinue
                } else {
                    RobotTokenType::StartHashComment
                });
                in_comment = true;
                header.push_comment(cell_token);
            } else {
                cell_token.set_type(RobotTokenType::TableHeaderColumn);
                header.push_value(cell_token);
            }
        }
        self.ctx.file.push_header(slot, header);
        self.ctx.stack.push(state);
    }

    fn report_unknown_header(&mut self, token: &RobotToken) {
        let newest = RobotVersion::new(u32::MAX, 0);
        let known_later = RECOGNIZERS
            .recognize(token.text(), token.position().unwrap_or(FilePosition::new(1, 0, 0)), &newest)
            .types()
            .iter()
            .any(|t| t.is_table_header());
        if known_later {
            self.ctx.record(
                ErrorCode::E0103,
                Severity::Warning,
                token,
                format!(
                    "table '{}' is not supported by Robot Framework {}",
                    token.text(),
                    self.version()
                ),
            );
        } else {
            self.ctx.record(
                ErrorCode::E0102,
                Severity::Warning,
                token,
                format!("unknown table '{}', its content is ignored", token.text()),
            );
        }
    }

    fn report_nameless_imports(&mut self) {
        let nameless: Vec<RobotToken> = self
            .ctx
            .file
            .settings()
            .imports()
            .iter()
            .filter(|import| import.name().is_none())
            .map(|import| import.declaration().clone())
            .collect();
        for declaration in nameless {
            self.ctx.record(
                ErrorCode::E0202,
                Severity::Warning,
                &declaration,
                format!("'{}' needs a name or path", declaration.text()),
            );
        }
    }

    fn finish(mut self, mut lines: Vec<RobotLine>, has_bom: bool) -> RobotFileOutput {
        alias_fixer::end_of_line(&mut self.ctx);
        self.report_nameless_imports();

        let mut owned = vec![false; lines.len() + 1];
        let mut counts = vec![0; lines.len() + 1];
        for number in &self.continuation_lines {
            owned[*number] = true;
        }
        self.ctx.file.for_each_element_mut(|element| {
            for token in element.tokens_mut() {
                if let Some(line) = token.line() {
                    owned[line] = true;
                    counts[line] += 1;
                }
                if lexer::contains_variable(token.text()) {
                    token.add_type(RobotTokenType::VariableUsage);
                }
            }
        });
        for line in &mut lines {
            line.owned = owned[line.number];
            line.tokens = counts[line.number];
        }

        let MappingContext {
            mut file, messages, ..
        } = self.ctx;
        file.set_lines(lines, has_bom);
        RobotFileOutput::new(file, messages)
    }
}

fn position(line: &RobotLine, cell: Cell<'_>) -> FilePosition {
    FilePosition::new(line.number, cell.column, line.offset + cell.column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SettingKind;

    fn parse_v(text: &str, version: RobotVersion) -> RobotFileOutput {
        parse(text, &ParserConfig::new().with_version(version))
    }

    #[test]
    fn test_split_lines_keeps_terminators() {
        let lines = split_lines("a\r\nb\rc\nd");
        let eols: Vec<_> = lines.iter().map(|l| l.eol).collect();
        assert_eq!(
            eols,
            vec![EndOfLine::CrLf, EndOfLine::Cr, EndOfLine::Lf, EndOfLine::Eof]
        );
        assert_eq!(lines[2].offset, 5);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_settings_with_continuation_and_comment() {
        let text = "*** Settings ***\nForce Tags    a    b\n...    c    # later\nLibrary    Collections\n";
        let output = parse_v(text, RobotVersion::new(3, 0));
        assert!(output.messages().is_empty(), "{:?}", output.messages());

        let file = output.file();
        let tags = file.settings().force_tags().elements();
        let texts: Vec<_> = tags[0].values().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(tags[0].comment_text(), "# later");
        assert!(file.line(3).unwrap().owned);
        assert_eq!(file.settings().libraries().count(), 1);
    }

    #[test]
    fn test_content_before_header_reported_once() {
        let output = parse_v("hello\nworld\n*** Keywords ***\n", RobotVersion::new(3, 0));
        let codes: Vec<_> = output.messages().iter().map(|m| m.code).collect();
        assert_eq!(codes, vec![ErrorCode::E0101]);
        assert!(!output.file().line(1).unwrap().owned);
    }

    #[test]
    fn test_tasks_header_depends_on_version() {
        let old = parse_v("*** Tasks ***\nDo It\n    Log    x\n", RobotVersion::new(3, 0));
        assert_eq!(old.messages()[0].code, ErrorCode::E0103);
        assert!(old.file().tasks().holders().is_empty());

        let new = parse_v("*** Tasks ***\nDo It\n    Log    x\n", RobotVersion::new(3, 1));
        assert!(new.messages().is_empty());
        assert_eq!(new.file().tasks().holders()[0].rows().count(), 1);
    }

    #[test]
    fn test_user_table_is_ignored() {
        let output = parse_v("*** My Table ***\nanything    goes\n", RobotVersion::new(3, 0));
        assert_eq!(output.messages()[0].code, ErrorCode::E0102);
        assert_eq!(output.file().other_headers().len(), 1);
        assert_eq!(output.messages().len(), 1);
    }

    #[test]
    fn test_name_and_step_on_one_line() {
        let output = parse_v(
            "*** Test Cases ***\nLogin    Open Browser    url\n    Close Browser\n",
            RobotVersion::new(3, 0),
        );
        let holder = &output.file().test_cases().holders()[0];
        assert_eq!(holder.name_text(), "Login");
        let actions: Vec<_> = holder
            .rows()
            .map(|r| r.keyword_call().unwrap().text().to_string())
            .collect();
        assert_eq!(actions, vec!["Open Browser", "Close Browser"]);
    }

    #[test]
    fn test_variable_usage_marker() {
        let output = parse_v(
            "*** Keywords ***\nGreet\n    Log    Hello ${name}\n",
            RobotVersion::new(3, 0),
        );
        let row = output.file().keywords().holders()[0].rows().next().unwrap();
        assert!(row.arguments()[0].has_type(RobotTokenType::VariableUsage));
        assert!(!row.declaration().has_type(RobotTokenType::VariableUsage));
    }

    #[test]
    fn test_repeated_settings_are_kept_apart() {
        let output = parse_v(
            "*** Settings ***\nForce Tags    a\nForce Tags    b\n",
            RobotVersion::new(2, 9),
        );
        assert_eq!(output.file().settings().group(SettingKind::ForceTags).len(), 2);
    }

    #[test]
    fn test_bom_is_detected() {
        let output = parse_v("\u{feff}*** Settings ***\n", RobotVersion::new(3, 0));
        assert!(output.file().has_bom());
        assert_eq!(output.file().settings().headers().len(), 1);
    }
}
