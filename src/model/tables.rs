//! Tables of a Robot Framework file
//!
//! Tables hold elements in file order. Duplicates are legal here; whether a
//! repeated setting is an error is a validation concern.

use smol_str::SmolStr;

use super::element::{ModelElement, ModelError};
use super::model_type::{CodeKind, ModelType, SettingKind};
use super::views::SettingGroup;
use crate::base::RobotVersion;
use crate::parser::{normalize, RobotToken, RobotTokenType};

/// `*** Settings ***` table.
#[derive(Debug, Clone)]
pub struct SettingTable {
    headers: Vec<ModelElement>,
    imports: Vec<ModelElement>,
    metadata: Vec<ModelElement>,
    unknown: Vec<ModelElement>,
    groups: Vec<SettingGroup>,
}

impl Default for SettingTable {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            imports: Vec::new(),
            metadata: Vec::new(),
            unknown: Vec::new(),
            groups: SettingKind::ALL.into_iter().map(SettingGroup::new).collect(),
        }
    }
}

impl SettingTable {
    pub fn headers(&self) -> &[ModelElement] {
        &self.headers
    }

    /// Whether the table is declared in the file
    pub fn is_present(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Library, resource and variables imports in file order
    pub fn imports(&self) -> &[ModelElement] {
        &self.imports
    }

    pub fn imports_mut(&mut self) -> &mut [ModelElement] {
        &mut self.imports
    }

    pub fn libraries(&self) -> impl Iterator<Item = &ModelElement> {
        self.imports_of(ModelType::LibraryImport)
    }

    pub fn resources(&self) -> impl Iterator<Item = &ModelElement> {
        self.imports_of(ModelType::ResourceImport)
    }

    pub fn variables_imports(&self) -> impl Iterator<Item = &ModelElement> {
        self.imports_of(ModelType::VariablesImport)
    }

    fn imports_of(&self, model_type: ModelType) -> impl Iterator<Item = &ModelElement> {
        self.imports.iter().filter(move |e| e.model_type() == model_type)
    }

    pub fn metadata(&self) -> &[ModelElement] {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut [ModelElement] {
        &mut self.metadata
    }

    pub fn unknown_settings(&self) -> &[ModelElement] {
        &self.unknown
    }

    /// Occurrences of a repeatable setting
    pub fn group(&self, kind: SettingKind) -> &SettingGroup {
        &self.groups[Self::group_index(kind)]
    }

    pub fn group_mut(&mut self, kind: SettingKind) -> &mut SettingGroup {
        &mut self.groups[Self::group_index(kind)]
    }

    pub fn groups(&self) -> &[SettingGroup] {
        &self.groups
    }

    fn group_index(kind: SettingKind) -> usize {
        SettingKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    }

    pub fn force_tags(&self) -> &SettingGroup {
        self.group(SettingKind::ForceTags)
    }

    pub fn default_tags(&self) -> &SettingGroup {
        self.group(SettingKind::DefaultTags)
    }

    pub fn documentation(&self) -> &SettingGroup {
        self.group(SettingKind::Documentation)
    }

    pub fn suite_setups(&self) -> &SettingGroup {
        self.group(SettingKind::SuiteSetup)
    }

    pub fn suite_teardowns(&self) -> &SettingGroup {
        self.group(SettingKind::SuiteTeardown)
    }

    pub fn test_setups(&self) -> &SettingGroup {
        self.group(SettingKind::TestSetup)
    }

    pub fn test_teardowns(&self) -> &SettingGroup {
        self.group(SettingKind::TestTeardown)
    }

    pub fn test_templates(&self) -> &SettingGroup {
        self.group(SettingKind::TestTemplate)
    }

    pub fn test_timeouts(&self) -> &SettingGroup {
        self.group(SettingKind::TestTimeout)
    }

    /// Add a library import
    pub fn add_library(&mut self, name: impl Into<SmolStr>, version: &RobotVersion) -> &mut ModelElement {
        self.add_import(ModelType::LibraryImport, name, version)
    }

    pub fn add_resource(&mut self, path: impl Into<SmolStr>, version: &RobotVersion) -> &mut ModelElement {
        self.add_import(ModelType::ResourceImport, path, version)
    }

    pub fn add_variables_import(
        &mut self,
        path: impl Into<SmolStr>,
        version: &RobotVersion,
    ) -> &mut ModelElement {
        self.add_import(ModelType::VariablesImport, path, version)
    }

    fn add_import(
        &mut self,
        model_type: ModelType,
        name: impl Into<SmolStr>,
        version: &RobotVersion,
    ) -> &mut ModelElement {
        let mut element = ModelElement::create(model_type, version);
        // imports always have a name slot
        let _ = element.set_name(name);
        self.imports.push(element);
        let last = self.imports.len() - 1;
        &mut self.imports[last]
    }

    pub fn remove_import(&mut self, index: usize) -> Result<ModelElement, ModelError> {
        remove_at(&mut self.imports, index)
    }

    pub fn add_metadata(&mut self, key: impl Into<SmolStr>, version: &RobotVersion) -> &mut ModelElement {
        let mut element = ModelElement::create(ModelType::Metadata, version);
        let _ = element.set_name(key);
        self.metadata.push(element);
        let last = self.metadata.len() - 1;
        &mut self.metadata[last]
    }

    pub fn remove_metadata(&mut self, index: usize) -> Result<ModelElement, ModelError> {
        remove_at(&mut self.metadata, index)
    }

    /// Add another occurrence of a repeatable setting
    pub fn add_setting(&mut self, kind: SettingKind, version: &RobotVersion) {
        self.group_mut(kind)
            .push(ModelElement::create(kind.model_type(), version));
    }

    pub(crate) fn push_header(&mut self, header: ModelElement) {
        self.headers.push(header);
    }

    /// Create the header of a table missing from the file
    pub fn ensure_header(&mut self, version: &RobotVersion) {
        if self.headers.is_empty() {
            self.headers
                .push(new_header(RobotTokenType::SettingsTableHeader, version));
        }
    }

    pub(crate) fn headers_mut(&mut self) -> &mut Vec<ModelElement> {
        &mut self.headers
    }

    pub(crate) fn push_import(&mut self, element: ModelElement) -> usize {
        self.imports.push(element);
        self.imports.len() - 1
    }

    pub(crate) fn push_metadata(&mut self, element: ModelElement) -> usize {
        self.metadata.push(element);
        self.metadata.len() - 1
    }

    pub(crate) fn push_unknown(&mut self, element: ModelElement) -> usize {
        self.unknown.push(element);
        self.unknown.len() - 1
    }

    pub(crate) fn unknown_mut(&mut self) -> &mut Vec<ModelElement> {
        &mut self.unknown
    }
}

/// `*** Variables ***` table.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    headers: Vec<ModelElement>,
    variables: Vec<ModelElement>,
}

impl VariableTable {
    pub fn headers(&self) -> &[ModelElement] {
        &self.headers
    }

    pub fn is_present(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn variables(&self) -> &[ModelElement] {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut [ModelElement] {
        &mut self.variables
    }

    /// Find a variable by its declaration, ignoring the trailing `=`
    pub fn variable(&self, name: &str) -> Option<&ModelElement> {
        let wanted = variable_key(name);
        self.variables
            .iter()
            .find(|v| variable_key(v.declaration().text()) == wanted)
    }

    /// Add a variable declared as `name` (`${x}`, `@{x}`, `&{x}`)
    pub fn add_variable(&mut self, name: impl Into<SmolStr>) -> &mut ModelElement {
        let name: SmolStr = name.into();
        let model_type = match name.chars().next() {
            Some('$') => ModelType::ScalarVariable,
            Some('@') => ModelType::ListVariable,
            Some('&') => ModelType::DictionaryVariable,
            _ => ModelType::UnknownVariable,
        };
        self.variables
            .push(ModelElement::create_named(model_type, name));
        let last = self.variables.len() - 1;
        &mut self.variables[last]
    }

    pub fn remove_variable(&mut self, index: usize) -> Result<ModelElement, ModelError> {
        remove_at(&mut self.variables, index)
    }

    pub fn ensure_header(&mut self, version: &RobotVersion) {
        if self.headers.is_empty() {
            self.headers
                .push(new_header(RobotTokenType::VariablesTableHeader, version));
        }
    }

    pub(crate) fn headers_mut(&mut self) -> &mut Vec<ModelElement> {
        &mut self.headers
    }

    pub(crate) fn push_variable(&mut self, element: ModelElement) -> usize {
        self.variables.push(element);
        self.variables.len() - 1
    }
}

fn variable_key(text: &str) -> String {
    normalize(text.trim_end().trim_end_matches('='))
}

/// A test case, task or keyword: its name and body in file order.
#[derive(Debug, Clone)]
pub struct CodeHolder {
    kind: CodeKind,
    name: ModelElement,
    body: Vec<ModelElement>,
}

impl CodeHolder {
    pub(crate) fn new(kind: CodeKind, name: ModelElement) -> Self {
        Self {
            kind,
            name,
            body: Vec::new(),
        }
    }

    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    /// The name element; its declaration is the name token
    pub fn name(&self) -> &ModelElement {
        &self.name
    }

    pub fn name_mut(&mut self) -> &mut ModelElement {
        &mut self.name
    }

    pub fn name_text(&self) -> &str {
        self.name.declaration().text()
    }

    pub fn set_name(&mut self, name: impl Into<SmolStr>) -> Result<(), ModelError> {
        let name: SmolStr = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::MissingName(self.kind.holder_type()));
        }
        self.name.set_name(name)
    }

    /// Local settings and steps in file order
    pub fn body(&self) -> &[ModelElement] {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut [ModelElement] {
        &mut self.body
    }

    pub fn settings(&self) -> impl Iterator<Item = &ModelElement> {
        self.body.iter().filter(|e| e.model_type().is_local_setting())
    }

    pub fn rows(&self) -> impl Iterator<Item = &ModelElement> {
        self.body.iter().filter(|e| e.model_type().is_executable_row())
    }

    /// Local settings of one kind, e.g. every `[Tags]`
    pub fn settings_of(&self, model_type: ModelType) -> impl Iterator<Item = &ModelElement> {
        self.body.iter().filter(move |e| e.model_type() == model_type)
    }

    /// Tags of every `[Tags]` setting
    pub fn tags(&self) -> Vec<&RobotToken> {
        self.settings()
            .filter(|e| e.model_type().is_tags())
            .flat_map(|e| e.values())
            .collect()
    }

    /// Add a step from its cells
    pub fn add_row(&mut self, cells: &[&str]) -> Result<&mut ModelElement, ModelError> {
        let row = ModelElement::create_row(self.kind.row_type(), cells)?;
        self.body.push(row);
        let last = self.body.len() - 1;
        Ok(&mut self.body[last])
    }

    /// Add a `[..]` setting allowed in this kind of holder
    pub fn add_setting(
        &mut self,
        model_type: ModelType,
        version: &RobotVersion,
    ) -> Result<&mut ModelElement, ModelError> {
        let allowed = model_type
            .declaration_type()
            .and_then(|t| self.kind.local_setting(t))
            == Some(model_type);
        if !allowed {
            return Err(ModelError::FieldNotApplicable {
                field: "local setting",
                model_type,
            });
        }
        // settings go before the first step
        let at = self
            .body
            .iter()
            .position(|e| e.model_type().is_executable_row())
            .unwrap_or(self.body.len());
        self.body.insert(at, ModelElement::create(model_type, version));
        Ok(&mut self.body[at])
    }

    pub fn remove_body_element(&mut self, index: usize) -> Result<ModelElement, ModelError> {
        remove_at(&mut self.body, index)
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn copy_without_position(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name.copy_without_position(),
            body: self.body.iter().map(ModelElement::copy_without_position).collect(),
        }
    }

    pub(crate) fn push_body(&mut self, element: ModelElement) -> usize {
        self.body.push(element);
        self.body.len() - 1
    }

    pub(crate) fn body_vec_mut(&mut self) -> &mut Vec<ModelElement> {
        &mut self.body
    }
}

/// `*** Test Cases ***`, `*** Tasks ***` or `*** Keywords ***` table.
#[derive(Debug, Clone)]
pub struct CodeTable {
    kind: CodeKind,
    headers: Vec<ModelElement>,
    holders: Vec<CodeHolder>,
}

impl CodeTable {
    pub fn new(kind: CodeKind) -> Self {
        Self {
            kind,
            headers: Vec::new(),
            holders: Vec::new(),
        }
    }

    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    pub fn headers(&self) -> &[ModelElement] {
        &self.headers
    }

    pub fn is_present(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn holders(&self) -> &[CodeHolder] {
        &self.holders
    }

    pub fn holders_mut(&mut self) -> &mut [CodeHolder] {
        &mut self.holders
    }

    /// Find a holder by name, as Robot Framework matches names
    pub fn holder(&self, name: &str) -> Option<&CodeHolder> {
        let wanted = normalize(name);
        self.holders.iter().find(|h| normalize(h.name_text()) == wanted)
    }

    pub fn holder_mut(&mut self, name: &str) -> Option<&mut CodeHolder> {
        let wanted = normalize(name);
        self.holders
            .iter_mut()
            .find(|h| normalize(h.name_text()) == wanted)
    }

    pub fn add_holder(&mut self, name: impl Into<SmolStr>) -> Result<&mut CodeHolder, ModelError> {
        let name: SmolStr = name.into();
        let holder_type = self.kind.holder_type();
        if name.trim().is_empty() {
            return Err(ModelError::MissingName(holder_type));
        }
        let element = ModelElement::create_named(holder_type, name);
        self.holders.push(CodeHolder::new(self.kind, element));
        let last = self.holders.len() - 1;
        Ok(&mut self.holders[last])
    }

    /// Insert a copy of a holder taken from elsewhere
    pub fn insert_holder(&mut self, index: usize, holder: CodeHolder) -> Result<(), ModelError> {
        if index > self.holders.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                len: self.holders.len(),
            });
        }
        let mut holder = holder.copy_without_position();
        holder.kind = self.kind;
        self.holders.insert(index, holder);
        Ok(())
    }

    pub fn remove_holder(&mut self, index: usize) -> Result<CodeHolder, ModelError> {
        let len = self.holders.len();
        if index >= len {
            return Err(ModelError::IndexOutOfBounds { index, len });
        }
        Ok(self.holders.remove(index))
    }

    pub fn ensure_header(&mut self, version: &RobotVersion) {
        if self.headers.is_empty() {
            self.headers.push(new_header(self.kind.header_type(), version));
        }
    }

    pub(crate) fn headers_mut(&mut self) -> &mut Vec<ModelElement> {
        &mut self.headers
    }

    pub(crate) fn push_holder(&mut self, holder: CodeHolder) -> usize {
        self.holders.push(holder);
        self.holders.len() - 1
    }
}

pub(crate) fn new_header(header_type: RobotTokenType, version: &RobotVersion) -> ModelElement {
    let name = header_type.most_correct_representation(version).unwrap_or("Settings");
    let token = RobotToken::create(format!("*** {name} ***"), header_type);
    let mut header = ModelElement::new(ModelType::TableHeader, token);
    header.mark_modified();
    header
}

fn remove_at(elements: &mut Vec<ModelElement>, index: usize) -> Result<ModelElement, ModelError> {
    if index >= elements.len() {
        return Err(ModelError::IndexOutOfBounds {
            index,
            len: elements.len(),
        });
    }
    Ok(elements.remove(index))
}
