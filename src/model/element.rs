//! Model elements
//!
//! One struct carries every construct: a declaration token, ordered value
//! tokens, an optional library alias and trailing comment tokens. Field
//! accessors check the element's [`ModelType`] and fail with
//! [`ModelError::FieldNotApplicable`] instead of touching fields the
//! construct does not have.

use smol_str::SmolStr;
use thiserror::Error;

use super::model_type::{ModelType, ValueLayout};
use crate::base::RobotVersion;
use crate::parser::{lexer, RobotToken, RobotTokenType, EMPTY_CELL};

/// Contract violations when querying or editing the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{field} is not applicable to {model_type:?}")]
    FieldNotApplicable {
        field: &'static str,
        model_type: ModelType,
    },
    #[error("index {index} is out of bounds for {len} element(s)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("{0:?} needs a non-empty name")]
    MissingName(ModelType),
}

/// `WITH NAME` / `AS` part of a library import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAlias {
    pub declaration: RobotToken,
    pub value: Option<RobotToken>,
}

impl ImportAlias {
    pub fn is_complete(&self) -> bool {
        self.value.is_some()
    }
}

/// `key=value` item of a dictionary variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryItem<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

/// A setting, variable, test case/keyword name, local setting or step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelElement {
    model_type: ModelType,
    declaration: RobotToken,
    values: Vec<RobotToken>,
    alias: Option<ImportAlias>,
    comments: Vec<RobotToken>,
    modified: bool,
}

impl ModelElement {
    /// An element read from a file, starting with its declaration token
    pub fn new(model_type: ModelType, declaration: RobotToken) -> Self {
        Self {
            model_type,
            declaration,
            values: Vec::new(),
            alias: None,
            comments: Vec::new(),
            modified: false,
        }
    }

    /// A new element with the declaration spelling preferred by `version`
    pub fn create(model_type: ModelType, version: &RobotVersion) -> Self {
        let text = model_type
            .declaration_type()
            .and_then(|t| t.most_correct_representation(version))
            .unwrap_or(EMPTY_CELL);
        Self::create_named(model_type, text)
    }

    /// A new element whose declaration reads `text`
    pub fn create_named(model_type: ModelType, text: impl Into<SmolStr>) -> Self {
        let token_type = model_type
            .declaration_type()
            .or(match model_type.layout() {
                ValueLayout::Row { action, .. } => Some(action),
                _ => None,
            })
            .unwrap_or(RobotTokenType::Unknown);
        let mut element = Self::new(model_type, RobotToken::create(text, token_type));
        element.modified = true;
        element
    }

    /// A new executable row from its cells
    pub fn create_row(model_type: ModelType, cells: &[&str]) -> Result<Self, ModelError> {
        if !model_type.is_executable_row() {
            return Err(ModelError::FieldNotApplicable {
                field: "cells",
                model_type,
            });
        }
        let (first, rest) = cells
            .split_first()
            .ok_or(ModelError::MissingName(model_type))?;
        let mut row = Self::create_named(model_type, *first);
        for cell in rest {
            row.values.push(RobotToken::new(*cell));
        }
        row.retype_row();
        Ok(row)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn declaration(&self) -> &RobotToken {
        &self.declaration
    }

    pub fn values(&self) -> &[RobotToken] {
        &self.values
    }

    pub fn comments(&self) -> &[RobotToken] {
        &self.comments
    }

    pub fn alias(&self) -> Option<&ImportAlias> {
        self.alias.as_ref()
    }

    /// Comment text, cells joined with single spaces
    pub fn comment_text(&self) -> String {
        self.comments
            .iter()
            .map(RobotToken::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the element was changed since it was read
    pub fn is_modified(&self) -> bool {
        self.modified || self.tokens().any(RobotToken::is_dirty)
    }

    /// Whether the element is declared in the text
    pub fn is_present(&self) -> bool {
        !self.declaration.text().is_empty()
    }

    /// Whether any token still carries a file position
    pub fn is_positioned(&self) -> bool {
        self.tokens().any(RobotToken::is_positioned)
    }

    /// Tokens in structural order: declaration, values, alias, comments
    pub fn tokens(&self) -> impl Iterator<Item = &RobotToken> {
        let alias = self
            .alias
            .iter()
            .flat_map(|alias| std::iter::once(&alias.declaration).chain(alias.value.iter()));
        std::iter::once(&self.declaration)
            .chain(self.values.iter())
            .chain(alias)
            .chain(self.comments.iter())
    }

    /// All tokens of the element in source order.
    ///
    /// Tokens read from the file are ordered by offset; once tokens without a
    /// position exist the structural order is used.
    pub fn element_tokens(&self) -> Vec<&RobotToken> {
        let mut tokens: Vec<&RobotToken> = self.tokens().collect();
        if tokens.iter().all(|t| t.is_positioned()) {
            tokens.sort_by_key(|t| t.start_offset());
        }
        tokens
    }

    /// Name value: library name, keyword of a setup, metadata key, action of
    /// a step, or the name of a test case or keyword.
    pub fn name(&self) -> Option<&RobotToken> {
        match self.model_type.layout() {
            ValueLayout::Named { .. } => self.values.first(),
            ValueLayout::Row { .. } => self.keyword_call(),
            ValueLayout::None => Some(&self.declaration),
            ValueLayout::Flat(_) => None,
        }
    }

    pub fn arguments(&self) -> &[RobotToken] {
        match self.model_type.layout() {
            ValueLayout::Named { .. } => self.values.get(1..).unwrap_or(&[]),
            ValueLayout::Flat(_) => &self.values,
            ValueLayout::Row { .. } => self.values.get(self.action_index()..).unwrap_or(&[]),
            ValueLayout::None => &[],
        }
    }

    pub fn tags(&self) -> Result<&[RobotToken], ModelError> {
        self.require_tags()?;
        Ok(&self.values)
    }

    /// Leading `${var}=` cells of a step
    pub fn assignments(&self) -> Vec<&RobotToken> {
        if !self.model_type.is_executable_row() {
            return Vec::new();
        }
        std::iter::once(&self.declaration)
            .chain(self.values.iter())
            .take(self.action_index())
            .collect()
    }

    /// Keyword called by a step
    pub fn keyword_call(&self) -> Option<&RobotToken> {
        if !self.model_type.is_executable_row() {
            return None;
        }
        std::iter::once(&self.declaration)
            .chain(self.values.iter())
            .nth(self.action_index())
    }

    /// Arguments of the keyword called by a step
    pub fn call_arguments(&self) -> &[RobotToken] {
        if self.model_type.is_executable_row() {
            self.arguments()
        } else {
            &[]
        }
    }

    /// Items of a dictionary variable, split on the first `=`
    pub fn dictionary_items(&self) -> Result<Vec<DictionaryItem<'_>>, ModelError> {
        if self.model_type != ModelType::DictionaryVariable {
            return Err(self.not_applicable("dictionary items"));
        }
        Ok(self
            .values
            .iter()
            .map(|token| match token.text().split_once('=') {
                Some((key, value)) => DictionaryItem {
                    key,
                    value: Some(value),
                },
                None => DictionaryItem {
                    key: token.text(),
                    value: None,
                },
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn set_name(&mut self, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        let text = text.into();
        match self.model_type.layout() {
            ValueLayout::None => self.declaration.set_text(text),
            ValueLayout::Named { name, .. } => match self.values.first_mut() {
                Some(token) => token.set_text(text),
                None => self.values.push(RobotToken::create(text, name)),
            },
            ValueLayout::Row { .. } => {
                match self.action_index() {
                    0 => self.declaration.set_text(text),
                    action => match self.values.get_mut(action - 1) {
                        Some(token) => token.set_text(text),
                        None => self.values.push(RobotToken::new(text)),
                    },
                }
                self.retype_row();
            }
            ValueLayout::Flat(_) => return Err(self.not_applicable("name")),
        }
        self.modified = true;
        Ok(())
    }

    /// Set the argument at `index`, padding skipped slots with `\` cells.
    pub fn set_argument(&mut self, index: usize, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        let offset = self.argument_offset()?;
        self.set_value(offset + index, text.into());
        Ok(())
    }

    pub fn add_argument(&mut self, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        let offset = self.argument_offset()?;
        let index = offset.max(self.values.len());
        self.set_value(index, text.into());
        Ok(())
    }

    pub fn remove_argument(&mut self, index: usize) -> Result<RobotToken, ModelError> {
        let offset = self.argument_offset()?;
        let len = self.arguments().len();
        if index >= len {
            return Err(ModelError::IndexOutOfBounds { index, len });
        }
        let removed = self.values.remove(offset + index);
        self.after_values_changed();
        Ok(removed)
    }

    pub fn add_tag(&mut self, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        self.require_tags()?;
        let index = self.values.len();
        self.set_value(index, text.into());
        Ok(())
    }

    pub fn set_tag(&mut self, index: usize, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        self.require_tags()?;
        self.set_value(index, text.into());
        Ok(())
    }

    pub fn remove_tag(&mut self, index: usize) -> Result<RobotToken, ModelError> {
        self.require_tags()?;
        if index >= self.values.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                len: self.values.len(),
            });
        }
        self.modified = true;
        Ok(self.values.remove(index))
    }

    /// Append one comment cell; the first one gets a leading `#` if missing.
    pub fn add_comment_part(&mut self, text: impl Into<SmolStr>) {
        let text: SmolStr = text.into();
        let token = if self.comments.is_empty() {
            let text = if text.starts_with('#') {
                text
            } else {
                SmolStr::new(format!("# {text}"))
            };
            RobotToken::create(text, RobotTokenType::StartHashComment)
        } else {
            RobotToken::create(text, RobotTokenType::CommentContinue)
        };
        self.comments.push(token);
        self.modified = true;
    }

    /// Replace the whole comment with one cell
    pub fn set_comment(&mut self, text: impl Into<SmolStr>) {
        self.comments.clear();
        self.add_comment_part(text);
    }

    pub fn clear_comment(&mut self) {
        if !self.comments.is_empty() {
            self.comments.clear();
            self.modified = true;
        }
    }

    /// Remove the cell at `index`, counting the values then the comments.
    pub fn remove_element_token(&mut self, index: usize) -> Result<RobotToken, ModelError> {
        let len = self.values.len() + self.comments.len();
        if index >= len {
            return Err(ModelError::IndexOutOfBounds { index, len });
        }
        let removed = if index < self.values.len() {
            let token = self.values.remove(index);
            self.after_values_changed();
            token
        } else {
            let token = self.comments.remove(index - self.values.len());
            if let Some(first) = self.comments.first_mut() {
                first.set_type(RobotTokenType::StartHashComment);
            }
            token
        };
        self.modified = true;
        Ok(removed)
    }

    /// Set the cell at `index` (values then comments) to `text`.
    ///
    /// Missing cells are padded with `\`. A cell starting with `#` turns
    /// itself and every later cell into the comment.
    pub fn update_token(&mut self, index: usize, text: impl Into<SmolStr>) {
        let mut cells: Vec<RobotToken> = self.values.drain(..).chain(self.comments.drain(..)).collect();
        while cells.len() <= index {
            cells.push(RobotToken::new(EMPTY_CELL));
        }
        cells[index].set_text(text);

        let split = cells
            .iter()
            .position(|t| t.text().starts_with('#'))
            .unwrap_or(cells.len());
        self.comments = cells.split_off(split);
        self.values = cells;
        for (idx, comment) in self.comments.iter_mut().enumerate() {
            comment.set_type(if idx == 0 {
                RobotTokenType::StartHashComment
            } else {
                RobotTokenType::CommentContinue
            });
        }
        self.after_values_changed();
    }

    /// Set the alias of a library import, creating the marker if needed.
    pub fn set_alias(&mut self, text: impl Into<SmolStr>, version: &RobotVersion) -> Result<(), ModelError> {
        if self.model_type != ModelType::LibraryImport {
            return Err(self.not_applicable("alias"));
        }
        let value = RobotToken::create(text, RobotTokenType::SettingLibraryAliasValue);
        match &mut self.alias {
            Some(alias) => match &mut alias.value {
                Some(existing) => existing.set_text(value.text()),
                None => alias.value = Some(value),
            },
            None => {
                let marker = RobotTokenType::SettingLibraryAlias
                    .most_correct_representation(version)
                    .unwrap_or("WITH NAME");
                self.alias = Some(ImportAlias {
                    declaration: RobotToken::create(marker, RobotTokenType::SettingLibraryAlias),
                    value: Some(value),
                });
            }
        }
        self.modified = true;
        Ok(())
    }

    pub fn remove_alias(&mut self) -> Result<Option<ImportAlias>, ModelError> {
        if self.model_type != ModelType::LibraryImport {
            return Err(self.not_applicable("alias"));
        }
        let removed = self.alias.take();
        if removed.is_some() {
            self.modified = true;
        }
        Ok(removed)
    }

    /// Structurally identical clone keeping file positions
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Structurally identical clone detached from any file
    pub fn copy_without_position(&self) -> Self {
        let mut copy = self.clone();
        copy.declaration.clear_position();
        for token in copy.values.iter_mut().chain(copy.comments.iter_mut()) {
            token.clear_position();
        }
        if let Some(alias) = &mut copy.alias {
            alias.declaration.clear_position();
            if let Some(value) = &mut alias.value {
                value.clear_position();
            }
        }
        copy.modified = true;
        copy
    }

    // ------------------------------------------------------------------
    // Parse-time construction
    // ------------------------------------------------------------------

    pub(crate) fn push_value(&mut self, token: RobotToken) {
        self.values.push(token);
    }

    pub(crate) fn push_comment(&mut self, token: RobotToken) {
        self.comments.push(token);
    }

    pub(crate) fn alias_mut(&mut self) -> &mut Option<ImportAlias> {
        &mut self.alias
    }

    pub(crate) fn declaration_mut(&mut self) -> &mut RobotToken {
        &mut self.declaration
    }

    pub(crate) fn tokens_mut(&mut self) -> impl Iterator<Item = &mut RobotToken> {
        let alias = self.alias.iter_mut().flat_map(|alias| {
            std::iter::once(&mut alias.declaration).chain(alias.value.iter_mut())
        });
        std::iter::once(&mut self.declaration)
            .chain(self.values.iter_mut())
            .chain(alias)
            .chain(self.comments.iter_mut())
    }

    /// Assemble an element from parts, marking it modified
    pub(crate) fn from_parts(
        model_type: ModelType,
        declaration: RobotToken,
        values: Vec<RobotToken>,
        alias: Option<ImportAlias>,
        comments: Vec<RobotToken>,
    ) -> Self {
        Self {
            model_type,
            declaration,
            values,
            alias,
            comments,
            modified: true,
        }
    }

    pub(crate) fn mark_modified(&mut self) {
        self.modified = true;
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn not_applicable(&self, field: &'static str) -> ModelError {
        ModelError::FieldNotApplicable {
            field,
            model_type: self.model_type,
        }
    }

    fn require_tags(&self) -> Result<(), ModelError> {
        if self.model_type.is_tags() {
            Ok(())
        } else {
            Err(self.not_applicable("tags"))
        }
    }

    /// Index in `values` of the first argument
    fn argument_offset(&self) -> Result<usize, ModelError> {
        match self.model_type.layout() {
            ValueLayout::Named { .. } => Ok(1),
            ValueLayout::Flat(_) => Ok(0),
            ValueLayout::Row { .. } => Ok(self.action_index()),
            ValueLayout::None => Err(self.not_applicable("arguments")),
        }
    }

    /// Index of the action among `[declaration] + values`
    fn action_index(&self) -> usize {
        std::iter::once(&self.declaration)
            .chain(self.values.iter())
            .take_while(|t| t.has_type(RobotTokenType::Assignment))
            .count()
    }

    fn set_value(&mut self, index: usize, text: SmolStr) {
        let layout = self.model_type.layout();
        while self.values.len() < index {
            let pad = self.values.len();
            self.values
                .push(RobotToken::create(EMPTY_CELL, layout.value_type(pad)));
        }
        match self.values.get_mut(index) {
            Some(token) => token.set_text(text),
            None => self
                .values
                .push(RobotToken::create(text, layout.value_type(index))),
        }
        self.after_values_changed();
    }

    fn after_values_changed(&mut self) {
        match self.model_type.layout() {
            ValueLayout::Row { .. } => self.retype_row(),
            layout => {
                for (idx, token) in self.values.iter_mut().enumerate() {
                    let expected = layout.value_type(idx);
                    if token.token_type() != expected {
                        token.set_type(expected);
                    }
                }
            }
        }
        self.modified = true;
    }

    /// Type the cells of a step: assignments, then the action, then arguments.
    pub(crate) fn retype_row(&mut self) {
        let ValueLayout::Row { action, argument } = self.model_type.layout() else {
            return;
        };
        let mut in_assignments = true;
        for token in std::iter::once(&mut self.declaration).chain(self.values.iter_mut()) {
            let token_type = if in_assignments && lexer::declared_variable(token.text()).is_some() {
                RobotTokenType::Assignment
            } else if in_assignments {
                in_assignments = false;
                action
            } else {
                argument
            };
            if token.token_type() != token_type {
                token.set_type(token_type);
            }
        }
    }
}
