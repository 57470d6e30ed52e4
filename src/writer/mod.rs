//! Writing a model back to text
//!
//! Text is produced by splicing: every element is placed on the lines its
//! tokens were read from, overlapping placements merge into regions, and
//! only regions holding a changed element are rebuilt. Everything else,
//! including comments, blank lines and content of ignored tables, is copied
//! from the parsed source.
//!
//! ```text
//! source lines     regions          output
//! ------------     -------          ------
//! *** Settings *** [1] clean   ->   copied
//! Library  Foo     [2-3] dirty ->   rebuilt from the element
//! ...  arg
//! # comment        (unowned)   ->   copied
//!                  new element ->   inserted after its predecessor
//! ```

mod layout;
mod regions;

use std::borrow::Cow;
use std::collections::BTreeMap;

use parking_lot::MappedRwLockReadGuard;
use tracing::debug;

use self::layout::{element_cells, LineStyle};
use self::regions::{element_span, merge, Placed, Region};
use crate::model::{new_header, CodeKind, EndOfLine, ModelElement, RobotFile, RobotLine, SettingGroup};
use crate::parser::{DumpConfig, RobotTokenType};

const BOM: char = '\u{feff}';

/// Elements of one table in the order they are written.
struct Section<'a> {
    header_type: RobotTokenType,
    has_header: bool,
    elements: Vec<&'a ModelElement>,
}

/// Write `file` back to text.
///
/// A file that was parsed and not modified is reproduced byte for byte.
pub fn dump(file: &RobotFile, config: &DumpConfig) -> String {
    let groups: Vec<MappedRwLockReadGuard<'_, [ModelElement]>> =
        file.settings().groups().iter().map(SettingGroup::elements).collect();
    let sections = sections(file, &groups);

    let mut writer = Writer::new(file, config);
    writer.write(&sections);
    debug!(
        lines = file.lines().len(),
        bytes = writer.out.len(),
        "dumped robot file"
    );
    writer.out
}

fn first_line(element: &ModelElement) -> Option<usize> {
    element.tokens().filter_map(|t| t.line()).min()
}

fn sections<'a>(file: &'a RobotFile, groups: &'a [MappedRwLockReadGuard<'_, [ModelElement]>]) -> Vec<Section<'a>> {
    let mut sections = Vec::new();

    let settings = file.settings();
    let mut elements: Vec<&ModelElement> = settings
        .headers()
        .iter()
        .chain(settings.imports())
        .chain(settings.metadata())
        .chain(settings.unknown_settings())
        .chain(groups.iter().flat_map(|group| group.iter()))
        .collect();
    // settings live in several containers; file order is their only common order
    elements.sort_by_key(|e| first_line(e).unwrap_or(usize::MAX));
    sections.push(Section {
        header_type: RobotTokenType::SettingsTableHeader,
        has_header: !settings.headers().is_empty(),
        elements,
    });

    let variables = file.variables();
    sections.push(Section {
        header_type: RobotTokenType::VariablesTableHeader,
        has_header: !variables.headers().is_empty(),
        elements: variables.headers().iter().chain(variables.variables()).collect(),
    });

    for kind in [CodeKind::TestCases, CodeKind::Tasks, CodeKind::Keywords] {
        let table = file.code_table(kind);
        let holders = table
            .holders()
            .iter()
            .flat_map(|holder| std::iter::once(holder.name()).chain(holder.body()));
        sections.push(Section {
            header_type: kind.header_type(),
            has_header: !table.headers().is_empty(),
            elements: table.headers().iter().chain(holders).collect(),
        });
    }

    sections.push(Section {
        header_type: RobotTokenType::UserOwnTableHeader,
        has_header: true,
        elements: file.other_headers().iter().collect(),
    });
    sections
}

struct Writer<'a> {
    file: &'a RobotFile,
    config: &'a DumpConfig,
    eol: &'static str,
    /// Last written line has no terminator
    open_line: bool,
    out: String,
}

impl<'a> Writer<'a> {
    fn new(file: &'a RobotFile, config: &'a DumpConfig) -> Self {
        let eol = file
            .lines()
            .iter()
            .map(|line| line.eol)
            .find(|eol| *eol != EndOfLine::Eof)
            .map_or("\n", EndOfLine::as_str);
        Self {
            file,
            config,
            eol,
            open_line: false,
            out: String::new(),
        }
    }

    fn write(&mut self, sections: &[Section<'a>]) {
        let lines = self.file.lines();
        let format = self.file.format();
        let version = self.file.version();

        let mut placed = Vec::new();
        let mut anchored: BTreeMap<usize, Vec<Cow<'a, ModelElement>>> = BTreeMap::new();
        let mut appended: Vec<Cow<'a, ModelElement>> = Vec::new();
        let mut counts = vec![0usize; lines.len() + 1];

        for section in sections {
            let mut anchor: Option<usize> = None;
            let mut missing_header = !section.has_header;
            for element in &section.elements {
                for line in element.tokens().filter_map(|t| t.line()) {
                    if let Some(count) = counts.get_mut(line) {
                        *count += 1;
                    }
                }
                if let Some(span) = element_span(element, lines, format) {
                    placed.push(Placed { element, span });
                    anchor = Some(anchor.map_or(span.end, |line| line.max(span.end)));
                    continue;
                }
                let pending = match anchor {
                    Some(line) => anchored.entry(line).or_default(),
                    None => &mut appended,
                };
                if missing_header {
                    pending.push(Cow::Owned(new_header(section.header_type, &version)));
                    missing_header = false;
                }
                pending.push(Cow::Borrowed(*element));
            }
        }

        let mut regions = merge(placed);
        // a line that lost tokens to a removal must be rebuilt
        for region in &mut regions {
            region.dirty |= region
                .span
                .lines()
                .any(|n| lines.get(n - 1).is_some_and(|line| line.tokens != counts[n]));
        }

        if self.file.has_bom() {
            self.out.push(BOM);
        }
        let mut regions = regions.iter().peekable();
        let mut number = 1;
        while number <= lines.len() {
            if let Some(region) = regions.next_if(|r| r.span.start == number) {
                self.write_region(region, lines);
                for pending in anchored.range(region.span.lines()).map(|(_, p)| p) {
                    self.write_new(pending);
                }
                number = region.span.end + 1;
                continue;
            }
            let line = &lines[number - 1];
            // owned lines outside every region belonged to removed elements
            if !line.owned {
                self.copy_line(line);
            }
            number += 1;
        }
        self.write_new(&appended);
    }

    fn write_region(&mut self, region: &Region<'a>, lines: &[RobotLine]) {
        for number in region.span.lines() {
            let Some(line) = lines.get(number - 1) else {
                continue;
            };
            if !region.dirty {
                self.copy_line(line);
                continue;
            }
            let mut members = region.starting_at(number);
            match members.next() {
                Some(first) => {
                    let mut cells = element_cells(first);
                    for element in members {
                        cells.extend(element_cells(element));
                    }
                    let style = match line.separator {
                        Some(separator) => LineStyle::new(separator, self.config),
                        None => LineStyle::for_format(self.file.format(), self.config),
                    };
                    let text = style.render(first.model_type().is_body_element(), &cells);
                    self.push_line(&text, line.eol.as_str());
                }
                None if !line.owned => self.copy_line(line),
                None => {}
            }
        }
    }

    fn write_new(&mut self, elements: &[Cow<'a, ModelElement>]) {
        let style = LineStyle::for_format(self.file.format(), self.config);
        for element in elements {
            if self.open_line {
                self.out.push_str(self.eol);
            }
            let text = style.render(element.model_type().is_body_element(), &element_cells(element));
            self.push_line(&text, self.eol);
        }
    }

    fn copy_line(&mut self, line: &RobotLine) {
        self.push_line(&line.text, line.eol.as_str());
    }

    fn push_line(&mut self, text: &str, eol: &str) {
        self.out.push_str(text);
        self.out.push_str(eol);
        self.open_line = eol.is_empty();
    }
}
