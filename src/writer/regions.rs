//! Line regions owned by model elements

use crate::model::{ModelElement, RobotLine};
use crate::parser::{split_line, FileFormat};

const CONTINUATION: &str = "...";

/// Inclusive range of 1-based line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn lines(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Lines covered by `element`, including trailing `...` lines without tokens.
///
/// Blank and comment-only lines are only covered when a continuation
/// follows them.
pub(crate) fn element_span(element: &ModelElement, lines: &[RobotLine], format: FileFormat) -> Option<LineSpan> {
    let mut numbers = element.tokens().filter_map(|t| t.line());
    let first = numbers.next()?;
    let (start, mut end) = numbers.fold((first, first), |(lo, hi), n| (lo.min(n), hi.max(n)));

    for line in lines.iter().skip(end) {
        let split = split_line(&line.text, format);
        match split.cells.first() {
            None => continue,
            Some(cell) if cell.text.starts_with('#') => continue,
            Some(cell) if cell.text == CONTINUATION => end = line.number,
            Some(_) => break,
        }
    }
    Some(LineSpan { start, end })
}

/// One element placed on the lines it came from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placed<'a> {
    pub element: &'a ModelElement,
    pub span: LineSpan,
}

/// Overlapping element spans merged together.
///
/// A clean region is copied from the source text, a dirty one is rebuilt
/// from its elements.
#[derive(Debug, Clone)]
pub(crate) struct Region<'a> {
    pub span: LineSpan,
    pub dirty: bool,
    pub members: Vec<Placed<'a>>,
}

impl<'a> Region<'a> {
    /// Members whose first line is `line`, in source order
    pub fn starting_at(&self, line: usize) -> impl Iterator<Item = &'a ModelElement> + '_ {
        self.members
            .iter()
            .filter(move |p| p.span.start == line)
            .map(|p| p.element)
    }
}

/// Merge the placed elements into disjoint regions ordered by line.
pub(crate) fn merge<'a>(mut placed: Vec<Placed<'a>>) -> Vec<Region<'a>> {
    placed.sort_by_key(|p| (p.span.start, p.span.end));
    let mut regions: Vec<Region<'a>> = Vec::new();
    for p in placed {
        match regions.last_mut() {
            Some(region) if p.span.start <= region.span.end => {
                region.span.end = region.span.end.max(p.span.end);
                region.dirty |= p.element.is_modified();
                region.members.push(p);
            }
            _ => regions.push(Region {
                span: p.span,
                dirty: p.element.is_modified(),
                members: vec![p],
            }),
        }
    }
    regions
}
