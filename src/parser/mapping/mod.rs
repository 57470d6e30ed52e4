//! Mapping layer
//!
//! A mapper attaches one recognized token to the document model. For every
//! cell the parser asks each mapper whether it can take the token given the
//! state on top of the [`ParsingStateStack`]; exactly one must answer yes.
//! The chosen mapper fixes the token's final type, appends it to the right
//! element (creating the element when the token declares one) and pushes the
//! state the grammar is left in.

mod code;
mod settings;
mod values;
mod variables;

use once_cell::sync::Lazy;
use tracing::warn;

use super::errors::{BuildMessage, ErrorCode, Severity};
use super::state::{ParsingState, ParsingStateStack};
use super::token::RobotToken;
use crate::base::RobotVersion;
use crate::model::{CodeKind, ElementRef, ModelElement, ModelType, RobotFile};

pub use code::{CodeHolderNameMapper, ExecutableRowMapper, LocalSettingDeclarationMapper, UnknownLocalSettingMapper};
pub use settings::{LibraryAliasDeclarationMapper, LibraryAliasValueMapper, SettingDeclarationMapper, UnknownSettingMapper};
pub use values::ValueMapper;
pub use variables::VariableDeclarationMapper;

/// Everything a mapper may read or change while one file is parsed.
pub struct MappingContext {
    pub file: RobotFile,
    pub stack: ParsingStateStack,
    /// Element the current logical line extends
    pub current: Option<ElementRef>,
    /// Test case, task or keyword the current lines belong to
    pub holder: Option<(CodeKind, usize)>,
    pub version: RobotVersion,
    pub messages: Vec<BuildMessage>,
    /// The token is the first cell of its physical line
    pub first_cell: bool,
    /// The physical line starts with an empty cell
    pub indented: bool,
}

impl MappingContext {
    pub fn new(file: RobotFile) -> Self {
        let version = file.version();
        Self {
            file,
            stack: ParsingStateStack::new(),
            current: None,
            holder: None,
            version,
            messages: Vec::new(),
            first_cell: false,
            indented: false,
        }
    }

    pub fn top(&self) -> Option<ParsingState> {
        self.stack.top()
    }

    /// Code table whose content is being read
    pub fn code_kind(&self) -> Option<CodeKind> {
        match self.stack.table()? {
            ParsingState::TestCaseTableInside => Some(CodeKind::TestCases),
            ParsingState::TaskTableInside => Some(CodeKind::Tasks),
            ParsingState::KeywordTableInside => Some(CodeKind::Keywords),
            _ => None,
        }
    }

    pub fn current_element_mut(&mut self) -> Option<&mut ModelElement> {
        let at = self.current?;
        self.file.element_mut(at)
    }

    /// Record an anomaly at `token`
    pub fn record(&mut self, code: ErrorCode, severity: Severity, token: &RobotToken, message: impl Into<String>) {
        let message = BuildMessage::builder(code)
            .message(message)
            .severity(severity)
            .at(token.position(), token.raw_text().len())
            .build();
        self.messages.push(message);
    }

    /// Append `token` to the current element, or record an internal error
    pub(crate) fn push_value(&mut self, token: RobotToken) {
        match self.current_element_mut() {
            Some(element) => element.push_value(token),
            None => self.record(
                ErrorCode::E0999,
                Severity::Error,
                &token,
                format!("no element to attach '{}' to", token.text()),
            ),
        }
    }
}

/// Decides whether a token fits the current grammar position and maps it.
pub trait ParsingMapper: Send + Sync {
    /// Pure predicate over the parsing state and the token
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool;

    /// Type the token, attach it to the model and push the next state
    fn map(&self, ctx: &mut MappingContext, token: RobotToken);
}

/// Mappers in the order they are consulted.
pub struct Mappers {
    mappers: Vec<Box<dyn ParsingMapper>>,
}

impl Mappers {
    fn new() -> Self {
        Self {
            mappers: vec![
                Box::new(SettingDeclarationMapper),
                Box::new(UnknownSettingMapper),
                Box::new(LibraryAliasDeclarationMapper),
                Box::new(LibraryAliasValueMapper),
                Box::new(VariableDeclarationMapper),
                Box::new(CodeHolderNameMapper),
                Box::new(LocalSettingDeclarationMapper),
                Box::new(UnknownLocalSettingMapper),
                Box::new(ExecutableRowMapper),
                Box::new(ValueMapper),
            ],
        }
    }

    /// Map `token` with the single mapper that accepts it.
    ///
    /// A token no mapper accepts, or more than one does, stays unknown and
    /// is recorded as an anomaly; parsing goes on with the next cell.
    pub fn map(&self, ctx: &mut MappingContext, token: RobotToken) {
        let mut candidates = self
            .mappers
            .iter()
            .filter(|mapper| mapper.check_if_can_be_mapped(ctx, &token));
        match (candidates.next(), candidates.next()) {
            (Some(mapper), None) => mapper.map(ctx, token),
            (None, _) => unmapped(ctx, token),
            (Some(_), Some(_)) => {
                warn!(text = token.text(), line = ?token.line(), state = ?ctx.top(), "ambiguous token");
                ctx.record(
                    ErrorCode::E0902,
                    Severity::Warning,
                    &token,
                    format!("'{}' matches more than one construct here", token.text()),
                );
            }
        }
    }
}

/// Fallback for tokens no mapper accepted
fn unmapped(ctx: &mut MappingContext, token: RobotToken) {
    warn!(text = token.text(), line = ?token.line(), state = ?ctx.top(), "unmapped token");
    let outside_holder = ctx.code_kind().is_some()
        && ctx.top().is_some_and(ParsingState::is_table_inside)
        && ctx.indented;
    if outside_holder {
        ctx.record(
            ErrorCode::E0402,
            Severity::Error,
            &token,
            format!("'{}' is not inside a test case, task or keyword", token.text()),
        );
    } else {
        ctx.record(
            ErrorCode::E0901,
            Severity::Warning,
            &token,
            format!("'{}' cannot be used here", token.text()),
        );
    }
}

/// The shared mapper set.
pub static MAPPERS: Lazy<Mappers> = Lazy::new(Mappers::new);

/// State a freshly declared element leaves the grammar in.
pub(crate) fn declaration_state(model_type: ModelType) -> ParsingState {
    use ModelType::*;
    use ParsingState as S;
    match model_type {
        LibraryImport => S::SettingLibraryImport,
        ResourceImport => S::SettingResourceImport,
        VariablesImport => S::SettingVariableImport,
        SuiteDocumentation => S::SettingDocumentation,
        Metadata => S::SettingMetadata,
        SuiteSetup => S::SettingSuiteSetup,
        SuiteTeardown => S::SettingSuiteTeardown,
        TestSetup => S::SettingTestSetup,
        TestTeardown => S::SettingTestTeardown,
        TestTemplate => S::SettingTestTemplate,
        TestTimeout => S::SettingTestTimeout,
        ForceTags => S::SettingForceTags,
        DefaultTags => S::SettingDefaultTags,
        SettingsUnknown => S::SettingUnknown,
        ScalarVariable => S::ScalarVariableDeclaration,
        ListVariable => S::ListVariableDeclaration,
        DictionaryVariable => S::DictionaryVariableDeclaration,
        UnknownVariable => S::VariableUnknown,
        TestCase | Task => S::TestCaseDeclaration,
        UserKeyword => S::KeywordDeclaration,
        TestCaseDocumentation => S::TestCaseSettingDocumentation,
        TestCaseTags => S::TestCaseSettingTags,
        TestCaseSetup => S::TestCaseSettingSetup,
        TestCaseTeardown => S::TestCaseSettingTeardown,
        TestCaseTemplate => S::TestCaseSettingTemplate,
        TestCaseTimeout => S::TestCaseSettingTimeout,
        TestCaseSettingUnknown => S::TestCaseSettingUnknown,
        TestCaseExecutableRow => S::TestCaseInsideActions,
        UserKeywordDocumentation => S::KeywordSettingDocumentation,
        UserKeywordTags => S::KeywordSettingTags,
        UserKeywordArguments => S::KeywordSettingArguments,
        UserKeywordReturn => S::KeywordSettingReturn,
        UserKeywordTeardown => S::KeywordSettingTeardown,
        UserKeywordTimeout => S::KeywordSettingTimeout,
        UserKeywordSettingUnknown => S::KeywordSettingUnknown,
        UserKeywordExecutableRow => S::KeywordInsideActions,
        TableHeader => S::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FilePosition;
    use crate::parser::{FileFormat, RECOGNIZERS};

    fn context_in(table: ParsingState) -> MappingContext {
        let mut ctx = MappingContext::new(RobotFile::new(RobotVersion::new(3, 0), FileFormat::Txt));
        ctx.stack.push(table);
        ctx
    }

    fn cell(ctx: &MappingContext, text: &str, column: usize) -> RobotToken {
        RECOGNIZERS.recognize(text, FilePosition::new(2, column, 20 + column), &ctx.version)
    }

    #[test]
    fn test_unmapped_token_is_recorded() {
        let mut ctx = context_in(ParsingState::TestCaseTableInside);
        ctx.indented = true;
        ctx.first_cell = true;
        let token = cell(&ctx, "Log", 4);
        MAPPERS.map(&mut ctx, token);
        assert_eq!(ctx.messages.len(), 1);
        assert_eq!(ctx.messages[0].code, ErrorCode::E0402);
    }

    #[test]
    fn test_exactly_one_mapper_per_setting_cell() {
        let mut ctx = context_in(ParsingState::SettingTableInside);
        ctx.first_cell = true;
        let library = cell(&ctx, "Library", 0);
        MAPPERS.map(&mut ctx, library);
        ctx.first_cell = false;
        let name = cell(&ctx, "Collections", 11);
        MAPPERS.map(&mut ctx, name);

        assert!(ctx.messages.is_empty());
        assert_eq!(ctx.top(), Some(ParsingState::SettingLibraryNameOrPath));
        let lib = &ctx.file.settings().imports()[0];
        assert_eq!(lib.name().unwrap().text(), "Collections");
    }

    #[test]
    fn test_declaration_states() {
        assert_eq!(
            declaration_state(ModelType::UserKeywordReturn),
            ParsingState::KeywordSettingReturn
        );
        assert_eq!(
            declaration_state(ModelType::Task),
            ParsingState::TestCaseDeclaration
        );
    }
}
