//! The root of the document model

use super::element::ModelElement;
use super::model_type::{CodeKind, SettingKind};
use super::tables::{CodeTable, SettingTable, VariableTable};
use super::views::SettingView;
use crate::base::RobotVersion;
use crate::parser::errors::{BuildMessage, ErrorCode, Severity};
use crate::parser::{FileFormat, LineSeparator};

/// Line terminator of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndOfLine {
    Lf,
    CrLf,
    Cr,
    /// Last line without a terminator
    Eof,
}

impl EndOfLine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::Eof => "",
        }
    }
}

/// One physical line of the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotLine {
    /// 1-based line number
    pub number: usize,
    /// Text without the terminator
    pub text: String,
    pub eol: EndOfLine,
    /// Byte offset of the first character
    pub offset: usize,
    /// Separator style, `None` for empty lines
    pub separator: Option<LineSeparator>,
    /// The line carries tokens of a model element
    pub owned: bool,
    /// Number of element tokens read from the line
    pub tokens: usize,
}

/// Header row of a table the model does not hold content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderSlot {
    Settings,
    Variables,
    Code(CodeKind),
    /// Comments tables and user tables
    Other,
}

/// Address of one element inside a [`RobotFile`].
///
/// Used while parsing to keep extending the element a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Header(HeaderSlot, usize),
    Import(usize),
    Metadata(usize),
    UnknownSetting(usize),
    Grouped(SettingKind, usize),
    Variable(usize),
    HolderName(CodeKind, usize),
    HolderBody(CodeKind, usize, usize),
}

/// A parsed (or newly built) Robot Framework file.
#[derive(Debug, Clone)]
pub struct RobotFile {
    version: RobotVersion,
    format: FileFormat,
    has_bom: bool,
    lines: Vec<RobotLine>,
    settings: SettingTable,
    variables: VariableTable,
    test_cases: CodeTable,
    tasks: CodeTable,
    keywords: CodeTable,
    other_headers: Vec<ModelElement>,
}

impl RobotFile {
    /// An empty file for the given version
    pub fn new(version: RobotVersion, format: FileFormat) -> Self {
        Self {
            version,
            format,
            has_bom: false,
            lines: Vec::new(),
            settings: SettingTable::default(),
            variables: VariableTable::default(),
            test_cases: CodeTable::new(CodeKind::TestCases),
            tasks: CodeTable::new(CodeKind::Tasks),
            keywords: CodeTable::new(CodeKind::Keywords),
            other_headers: Vec::new(),
        }
    }

    pub fn version(&self) -> RobotVersion {
        self.version
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn has_bom(&self) -> bool {
        self.has_bom
    }

    pub fn lines(&self) -> &[RobotLine] {
        &self.lines
    }

    pub fn line(&self, number: usize) -> Option<&RobotLine> {
        number.checked_sub(1).and_then(|idx| self.lines.get(idx))
    }

    pub fn settings(&self) -> &SettingTable {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingTable {
        &mut self.settings
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableTable {
        &mut self.variables
    }

    pub fn test_cases(&self) -> &CodeTable {
        &self.test_cases
    }

    pub fn test_cases_mut(&mut self) -> &mut CodeTable {
        &mut self.test_cases
    }

    pub fn tasks(&self) -> &CodeTable {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut CodeTable {
        &mut self.tasks
    }

    pub fn keywords(&self) -> &CodeTable {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut CodeTable {
        &mut self.keywords
    }

    pub fn code_table(&self, kind: CodeKind) -> &CodeTable {
        match kind {
            CodeKind::TestCases => &self.test_cases,
            CodeKind::Tasks => &self.tasks,
            CodeKind::Keywords => &self.keywords,
        }
    }

    pub fn code_table_mut(&mut self, kind: CodeKind) -> &mut CodeTable {
        match kind {
            CodeKind::TestCases => &mut self.test_cases,
            CodeKind::Tasks => &mut self.tasks,
            CodeKind::Keywords => &mut self.keywords,
        }
    }

    /// Headers of comments tables and user tables
    pub fn other_headers(&self) -> &[ModelElement] {
        &self.other_headers
    }

    // ------------------------------------------------------------------
    // Dialect views
    // ------------------------------------------------------------------

    /// Every occurrence of `kind` presented as one setting
    pub fn setting_view(&self, kind: SettingKind) -> SettingView<'_> {
        SettingView::new(self.settings.group(kind), self.version)
    }

    pub fn documentation_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::Documentation)
    }

    pub fn suite_setup_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::SuiteSetup)
    }

    pub fn suite_teardown_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::SuiteTeardown)
    }

    pub fn test_setup_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::TestSetup)
    }

    pub fn test_teardown_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::TestTeardown)
    }

    pub fn test_template_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::TestTemplate)
    }

    pub fn test_timeout_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::TestTimeout)
    }

    pub fn force_tags_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::ForceTags)
    }

    pub fn default_tags_view(&self) -> SettingView<'_> {
        self.setting_view(SettingKind::DefaultTags)
    }

    // ------------------------------------------------------------------
    // Element addressing
    // ------------------------------------------------------------------

    pub fn element(&self, at: ElementRef) -> Option<&ModelElement> {
        match at {
            ElementRef::Header(slot, idx) => self.headers(slot).get(idx),
            ElementRef::Import(idx) => self.settings.imports().get(idx),
            ElementRef::Metadata(idx) => self.settings.metadata().get(idx),
            ElementRef::UnknownSetting(idx) => self.settings.unknown_settings().get(idx),
            // a read guard cannot outlive this call
            ElementRef::Grouped(..) => None,
            ElementRef::Variable(idx) => self.variables.variables().get(idx),
            ElementRef::HolderName(kind, h) => self.code_table(kind).holders().get(h).map(|h| h.name()),
            ElementRef::HolderBody(kind, h, e) => self
                .code_table(kind)
                .holders()
                .get(h)
                .and_then(|h| h.body().get(e)),
        }
    }

    pub fn element_mut(&mut self, at: ElementRef) -> Option<&mut ModelElement> {
        match at {
            ElementRef::Header(slot, idx) => self.headers_mut(slot).get_mut(idx),
            ElementRef::Import(idx) => self.settings.imports_mut().get_mut(idx),
            ElementRef::Metadata(idx) => self.settings.metadata_mut().get_mut(idx),
            ElementRef::UnknownSetting(idx) => self.settings.unknown_mut().get_mut(idx),
            ElementRef::Grouped(kind, idx) => self.settings.group_mut(kind).elements_mut().get_mut(idx),
            ElementRef::Variable(idx) => self.variables.variables_mut().get_mut(idx),
            ElementRef::HolderName(kind, h) => self
                .code_table_mut(kind)
                .holders_mut()
                .get_mut(h)
                .map(|h| h.name_mut()),
            ElementRef::HolderBody(kind, h, e) => self
                .code_table_mut(kind)
                .holders_mut()
                .get_mut(h)
                .and_then(|h| h.body_mut().get_mut(e)),
        }
    }

    fn headers(&self, slot: HeaderSlot) -> &[ModelElement] {
        match slot {
            HeaderSlot::Settings => self.settings.headers(),
            HeaderSlot::Variables => self.variables.headers(),
            HeaderSlot::Code(kind) => self.code_table(kind).headers(),
            HeaderSlot::Other => &self.other_headers,
        }
    }

    fn headers_mut(&mut self, slot: HeaderSlot) -> &mut Vec<ModelElement> {
        match slot {
            HeaderSlot::Settings => self.settings.headers_mut(),
            HeaderSlot::Variables => self.variables.headers_mut(),
            HeaderSlot::Code(kind) => self.code_table_mut(kind).headers_mut(),
            HeaderSlot::Other => &mut self.other_headers,
        }
    }

    pub(crate) fn push_header(&mut self, slot: HeaderSlot, header: ModelElement) -> ElementRef {
        let headers = self.headers_mut(slot);
        headers.push(header);
        ElementRef::Header(slot, headers.len() - 1)
    }

    /// Run `visit` on every element without joining setting groups
    pub fn for_each_element(&self, mut visit: impl FnMut(&ModelElement)) {
        let settings = &self.settings;
        settings
            .headers()
            .iter()
            .chain(settings.imports())
            .chain(settings.metadata())
            .chain(settings.unknown_settings())
            .for_each(&mut visit);
        for group in settings.groups() {
            group.elements().iter().for_each(&mut visit);
        }
        self.variables
            .headers()
            .iter()
            .chain(self.variables.variables())
            .for_each(&mut visit);
        for table in [&self.test_cases, &self.tasks, &self.keywords] {
            table.headers().iter().for_each(&mut visit);
            for holder in table.holders() {
                visit(holder.name());
                holder.body().iter().for_each(&mut visit);
            }
        }
        self.other_headers.iter().for_each(&mut visit);
    }

    /// Run `visit` on every element, tables in file order
    pub(crate) fn for_each_element_mut(&mut self, mut visit: impl FnMut(&mut ModelElement)) {
        let settings = &mut self.settings;
        settings.headers_mut().iter_mut().for_each(&mut visit);
        settings.imports_mut().iter_mut().for_each(&mut visit);
        settings.metadata_mut().iter_mut().for_each(&mut visit);
        settings.unknown_mut().iter_mut().for_each(&mut visit);
        for kind in SettingKind::ALL {
            settings.group_mut(kind).elements_mut().iter_mut().for_each(&mut visit);
        }
        self.variables.headers_mut().iter_mut().for_each(&mut visit);
        self.variables.variables_mut().iter_mut().for_each(&mut visit);
        for table in [&mut self.test_cases, &mut self.tasks, &mut self.keywords] {
            table.headers_mut().iter_mut().for_each(&mut visit);
            for holder in table.holders_mut() {
                visit(holder.name_mut());
                holder.body_mut().iter_mut().for_each(&mut visit);
            }
        }
        self.other_headers.iter_mut().for_each(&mut visit);
    }

    pub(crate) fn set_lines(&mut self, lines: Vec<RobotLine>, has_bom: bool) {
        self.lines = lines;
        self.has_bom = has_bom;
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [RobotLine] {
        &mut self.lines
    }
}

/// Result of parsing one file: the model and every anomaly met on the way.
#[derive(Debug, Clone)]
pub struct RobotFileOutput {
    file: RobotFile,
    messages: Vec<BuildMessage>,
}

impl RobotFileOutput {
    pub fn new(file: RobotFile, messages: Vec<BuildMessage>) -> Self {
        Self { file, messages }
    }

    pub fn file(&self) -> &RobotFile {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut RobotFile {
        &mut self.file
    }

    pub fn messages(&self) -> &[BuildMessage] {
        &self.messages
    }

    /// Anomalies with the given code
    pub fn messages_with(&self, code: ErrorCode) -> impl Iterator<Item = &BuildMessage> {
        self.messages.iter().filter(move |m| m.code == code)
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    pub fn into_parts(self) -> (RobotFile, Vec<BuildMessage>) {
        (self.file, self.messages)
    }
}
