//! Cell layout of regenerated lines

use crate::model::ModelElement;
use crate::parser::{DumpConfig, FileFormat, LineSeparator, EMPTY_CELL};

const SPACES: &str = "    ";

/// How the cells of one regenerated line are joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineStyle {
    separator: LineSeparator,
    spaces: String,
}

impl LineStyle {
    pub fn new(separator: LineSeparator, config: &DumpConfig) -> Self {
        Self {
            separator,
            spaces: config.separator.clone().unwrap_or_else(|| SPACES.to_string()),
        }
    }

    /// Style for lines that did not exist in the file
    pub fn for_format(format: FileFormat, config: &DumpConfig) -> Self {
        let separator = match format {
            FileFormat::Txt => LineSeparator::Spaces,
            FileFormat::Tsv => LineSeparator::Tab,
        };
        Self::new(separator, config)
    }

    /// Join `cells`, starting with an empty cell when `indented`
    pub fn render(&self, indented: bool, cells: &[&str]) -> String {
        let cells = cells.iter().map(|cell| if cell.is_empty() { EMPTY_CELL } else { cell });
        match self.separator {
            LineSeparator::Spaces => join_indented(indented, cells, &self.spaces, &self.spaces),
            LineSeparator::Tab => join_indented(indented, cells, "\t", "\t"),
            LineSeparator::Pipe => {
                let mut line = String::from("| ");
                if indented {
                    line.push_str(" | ");
                }
                line.push_str(&cells.collect::<Vec<_>>().join(" | "));
                line.push_str(" |");
                line
            }
        }
    }
}

fn join_indented<'a>(indented: bool, cells: impl Iterator<Item = &'a str>, indent: &str, separator: &str) -> String {
    let body = cells.collect::<Vec<_>>().join(separator);
    if indented {
        format!("{indent}{body}")
    } else {
        body
    }
}

/// Cell texts of `element` in the order they are written
pub(crate) fn element_cells(element: &ModelElement) -> Vec<&str> {
    element.element_tokens().into_iter().map(|t| t.text()).collect()
}
