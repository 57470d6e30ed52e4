//! Cell separators
//!
//! Splits one physical line into cells. Plain text files separate cells with
//! two or more spaces or a tab, lines starting with `| ` use pipes, and TSV
//! files use every tab.

use once_cell::sync::Lazy;
use regex::Regex;

/// Text format of a whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "transfer", derive(serde::Serialize, serde::Deserialize))]
pub enum FileFormat {
    #[default]
    Txt,
    Tsv,
}

/// Separator style used by one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSeparator {
    Spaces,
    Pipe,
    Tab,
}

/// A non-separator piece of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    pub text: &'a str,
    /// Byte column of the first character
    pub column: usize,
}

/// A line split into cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub separator: LineSeparator,
    /// The line starts with an empty cell
    pub indented: bool,
    pub cells: Vec<Cell<'a>>,
}

impl SplitLine<'_> {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

static TXT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" *\t[ \t]*| {2,}[ \t]*").expect("valid separator regex"));

static PIPE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+\|(?:[ \t]|$)").expect("valid pipe regex"));

static PIPE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|(?:[ \t]|$)").expect("valid pipe regex"));

/// Split a line (without its line terminator) into cells.
pub fn split_line(line: &str, format: FileFormat) -> SplitLine<'_> {
    if PIPE_START.is_match(line) {
        return split_pipe(line);
    }
    match format {
        FileFormat::Txt => split_txt(line),
        FileFormat::Tsv => split_tsv(line),
    }
}

fn split_txt(line: &str) -> SplitLine<'_> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for sep in TXT_SEPARATOR.find_iter(line) {
        pieces.push((start, &line[start..sep.start()]));
        start = sep.end();
    }
    pieces.push((start, &line[start..]));

    let indented = matches!(pieces.first(), Some((_, text)) if text.is_empty()) && pieces.len() > 1;
    let cells = pieces
        .into_iter()
        .filter_map(|(column, text)| trimmed_cell(text, column))
        .collect();

    SplitLine {
        separator: LineSeparator::Spaces,
        indented,
        cells,
    }
}

fn split_tsv(line: &str) -> SplitLine<'_> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in line.match_indices('\t') {
        pieces.push((start, &line[start..idx]));
        start = idx + 1;
    }
    pieces.push((start, &line[start..]));
    SplitLine {
        separator: LineSeparator::Tab,
        ..keep_interior_empty_cells(pieces)
    }
}

fn split_pipe(line: &str) -> SplitLine<'_> {
    // skip the leading "|" and the whitespace after it
    let body_start = 1 + line[1..].len() - line[1..].trim_start_matches([' ', '\t']).len();
    let body = &line[body_start..];

    let mut pieces = Vec::new();
    let mut start = 0;
    if body.starts_with('|') {
        // "|  | Log" starts with an empty cell
        pieces.push((body_start, ""));
        start = 1;
    }
    for sep in PIPE_SEPARATOR.find_iter(body) {
        if sep.start() < start {
            continue;
        }
        pieces.push((body_start + start, &body[start..sep.start()]));
        start = sep.end();
    }
    pieces.push((body_start + start, &body[start.min(body.len())..]));

    SplitLine {
        separator: LineSeparator::Pipe,
        ..keep_interior_empty_cells(pieces)
    }
}

/// Leading empty cells mark indentation, trailing ones are dropped and
/// interior ones are kept as empty cells.
fn keep_interior_empty_cells(pieces: Vec<(usize, &str)>) -> SplitLine<'_> {
    let cells: Vec<Cell<'_>> = pieces
        .into_iter()
        .map(|(column, text)| {
            trimmed_cell(text, column).unwrap_or(Cell {
                text: "",
                column: column + text.len(),
            })
        })
        .collect();

    let leading = cells.iter().take_while(|c| c.text.is_empty()).count();
    let trailing = cells.iter().rev().take_while(|c| c.text.is_empty()).count();
    if leading == cells.len() {
        return SplitLine {
            separator: LineSeparator::Tab,
            indented: false,
            cells: Vec::new(),
        };
    }

    SplitLine {
        separator: LineSeparator::Tab,
        indented: leading > 0,
        cells: cells[leading..cells.len() - trailing].to_vec(),
    }
}

fn trimmed_cell(text: &str, column: usize) -> Option<Cell<'_>> {
    let trimmed_start = text.trim_start_matches([' ', '\t']);
    let skipped = text.len() - trimmed_start.len();
    let trimmed = trimmed_start.trim_end_matches([' ', '\t']);
    if trimmed.is_empty() {
        return None;
    }
    Some(Cell {
        text: trimmed,
        column: column + skipped,
    })
}
