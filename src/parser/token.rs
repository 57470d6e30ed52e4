//! The smallest unit of the document model.

use smol_str::SmolStr;

use super::token_type::RobotTokenType;
use crate::base::{FilePosition, TextRange};

/// Text of an explicitly empty cell.
pub const EMPTY_CELL: &str = "\\";

/// A cell of Robot Framework source with its semantic types.
///
/// `raw` is the text as read from the file and never changes; `text` is the
/// current value. Tokens created through the API have no position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotToken {
    text: SmolStr,
    raw: SmolStr,
    types: Vec<RobotTokenType>,
    position: Option<FilePosition>,
}

impl RobotToken {
    /// An unpositioned token of unknown type
    pub fn new(text: impl Into<SmolStr>) -> Self {
        let text = text.into();
        Self {
            raw: text.clone(),
            text,
            types: vec![RobotTokenType::Unknown],
            position: None,
        }
    }

    /// An unpositioned token of the given type
    pub fn create(text: impl Into<SmolStr>, token_type: RobotTokenType) -> Self {
        let mut token = Self::new(text);
        token.types = vec![token_type];
        token
    }

    /// A token read from the file at `position`
    pub fn positioned(text: impl Into<SmolStr>, position: FilePosition) -> Self {
        let mut token = Self::new(text);
        token.position = Some(position);
        token
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Lowercase text without spaces and underscores, as Robot Framework
    /// compares names
    pub fn normalized_text(&self) -> String {
        normalize(&self.text)
    }

    pub fn set_text(&mut self, text: impl Into<SmolStr>) {
        self.text = text.into();
    }

    /// Whether the current text differs from what was read from the file
    pub fn is_dirty(&self) -> bool {
        self.position.is_none() || self.text != self.raw
    }

    pub fn is_empty_cell(&self) -> bool {
        self.text.is_empty() || self.text == EMPTY_CELL
    }

    pub fn types(&self) -> &[RobotTokenType] {
        &self.types
    }

    /// The primary type
    pub fn token_type(&self) -> RobotTokenType {
        self.types.first().copied().unwrap_or(RobotTokenType::Unknown)
    }

    pub fn has_type(&self, token_type: RobotTokenType) -> bool {
        self.types.contains(&token_type)
    }

    /// Replace the primary and candidate types, keeping marker types.
    pub fn set_type(&mut self, token_type: RobotTokenType) {
        self.types.retain(|t| t.is_marker() && *t != token_type);
        self.types.insert(0, token_type);
    }

    /// Add a candidate or marker type, keeping the primary type first.
    pub fn add_type(&mut self, token_type: RobotTokenType) {
        if self.has_type(token_type) {
            return;
        }
        if self.types == [RobotTokenType::Unknown] && !token_type.is_marker() {
            self.types[0] = token_type;
        } else {
            self.types.push(token_type);
        }
    }

    pub fn remove_type(&mut self, token_type: RobotTokenType) {
        self.types.retain(|t| *t != token_type);
        if self.types.is_empty() {
            self.types.push(RobotTokenType::Unknown);
        }
    }

    pub fn position(&self) -> Option<FilePosition> {
        self.position
    }

    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }

    pub fn line(&self) -> Option<usize> {
        self.position.map(|p| p.line)
    }

    pub fn start_column(&self) -> Option<usize> {
        self.position.map(|p| p.column)
    }

    pub fn end_column(&self) -> Option<usize> {
        self.position.map(|p| p.column + self.raw.len())
    }

    pub fn start_offset(&self) -> Option<usize> {
        self.position.map(|p| p.offset)
    }

    pub fn end_offset(&self) -> Option<usize> {
        self.position.map(|p| p.offset + self.raw.len())
    }

    /// Byte range of the raw text in the file
    pub fn range(&self) -> Option<TextRange> {
        self.position.map(|p| p.range(self.raw.len()))
    }

    /// Forget the file position; the token becomes synthetic.
    pub fn clear_position(&mut self) {
        self.position = None;
        self.raw = self.text.clone();
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn copy_without_position(&self) -> Self {
        let mut copy = self.clone();
        copy.clear_position();
        copy
    }
}

/// Robot Framework name normalization: case, spaces and underscores are ignored.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
