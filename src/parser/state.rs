//! Parsing state machine
//!
//! [`ParsingState`] names a position in the grammar; [`ParsingStateStack`]
//! is the per-parse stack of those positions. Mappers look at the top of the
//! stack to decide whether they may consume a token, and push the state they
//! leave the grammar in.

use tracing::trace;

use super::token_type::TableKind;

/// A named position in the Robot Framework grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsingState {
    Unknown,
    /// Content that is read but not modelled (user tables, comments table)
    Trash,

    SettingTableHeader,
    SettingTableInside,
    VariableTableHeader,
    VariableTableInside,
    TestCaseTableHeader,
    TestCaseTableInside,
    TaskTableHeader,
    TaskTableInside,
    KeywordTableHeader,
    KeywordTableInside,

    // Settings table
    SettingLibraryImport,
    SettingLibraryNameOrPath,
    SettingLibraryArguments,
    SettingLibraryImportAlias,
    SettingLibraryImportAliasValue,
    SettingVariableImport,
    SettingVariableImportPath,
    SettingVariableArguments,
    SettingResourceImport,
    SettingResourceImportPath,
    SettingResourceUnwantedArguments,
    SettingDocumentation,
    SettingDocumentationText,
    SettingMetadata,
    SettingMetadataKey,
    SettingMetadataValue,
    SettingSuiteSetup,
    SettingSuiteSetupKeyword,
    SettingSuiteSetupKeywordArgument,
    SettingSuiteTeardown,
    SettingSuiteTeardownKeyword,
    SettingSuiteTeardownKeywordArgument,
    SettingTestSetup,
    SettingTestSetupKeyword,
    SettingTestSetupKeywordArgument,
    SettingTestTeardown,
    SettingTestTeardownKeyword,
    SettingTestTeardownKeywordArgument,
    SettingTestTemplate,
    SettingTestTemplateKeyword,
    SettingTestTemplateKeywordUnwantedArguments,
    SettingTestTimeout,
    SettingTestTimeoutValue,
    SettingTestTimeoutMessageArguments,
    SettingForceTags,
    SettingForceTagsTagName,
    SettingDefaultTags,
    SettingDefaultTagsTagName,
    SettingUnknown,
    SettingUnknownTrashElement,

    // Variables table
    ScalarVariableDeclaration,
    ScalarVariableValue,
    ListVariableDeclaration,
    ListVariableValue,
    DictionaryVariableDeclaration,
    DictionaryVariableValue,
    VariableUnknown,
    VariableUnknownValue,

    // Test cases and tasks
    TestCaseDeclaration,
    TestCaseInsideActions,
    TestCaseInsideActionsArguments,
    TestCaseSettingDocumentation,
    TestCaseSettingDocumentationText,
    TestCaseSettingTags,
    TestCaseSettingTagsTagName,
    TestCaseSettingSetup,
    TestCaseSettingSetupKeyword,
    TestCaseSettingSetupKeywordArgument,
    TestCaseSettingTeardown,
    TestCaseSettingTeardownKeyword,
    TestCaseSettingTeardownKeywordArgument,
    TestCaseSettingTemplate,
    TestCaseSettingTemplateKeyword,
    TestCaseSettingTemplateKeywordUnwantedArguments,
    TestCaseSettingTimeout,
    TestCaseSettingTimeoutValue,
    TestCaseSettingTimeoutMessageArguments,
    TestCaseSettingUnknown,
    TestCaseSettingUnknownArguments,

    // Keywords
    KeywordDeclaration,
    KeywordInsideActions,
    KeywordInsideActionsArguments,
    KeywordSettingDocumentation,
    KeywordSettingDocumentationText,
    KeywordSettingTags,
    KeywordSettingTagsTagName,
    KeywordSettingArguments,
    KeywordSettingArgumentsArgument,
    KeywordSettingReturn,
    KeywordSettingReturnValue,
    KeywordSettingTeardown,
    KeywordSettingTeardownKeyword,
    KeywordSettingTeardownKeywordArgument,
    KeywordSettingTimeout,
    KeywordSettingTimeoutValue,
    KeywordSettingTimeoutMessageArguments,
    KeywordSettingUnknown,
    KeywordSettingUnknownArguments,
}

impl ParsingState {
    /// The table this state can only occur in, if any.
    pub fn table(self) -> Option<TableKind> {
        use ParsingState::*;
        let table = match self {
            Unknown | Trash => return None,
            SettingTableHeader | SettingTableInside => TableKind::Settings,
            VariableTableHeader | VariableTableInside => TableKind::Variables,
            TestCaseTableHeader | TestCaseTableInside => TableKind::TestCases,
            TaskTableHeader | TaskTableInside => TableKind::Tasks,
            KeywordTableHeader | KeywordTableInside => TableKind::Keywords,
            ScalarVariableDeclaration
            | ScalarVariableValue
            | ListVariableDeclaration
            | ListVariableValue
            | DictionaryVariableDeclaration
            | DictionaryVariableValue
            | VariableUnknown
            | VariableUnknownValue => TableKind::Variables,
            // tasks share the test case states, the stack base tells them apart
            s if s.is_test_case_state() => TableKind::TestCases,
            s if s.is_keyword_state() => TableKind::Keywords,
            _ => TableKind::Settings,
        };
        Some(table)
    }

    fn is_test_case_state(self) -> bool {
        use ParsingState::*;
        matches!(
            self,
            TestCaseDeclaration
                | TestCaseInsideActions
                | TestCaseInsideActionsArguments
                | TestCaseSettingDocumentation
                | TestCaseSettingDocumentationText
                | TestCaseSettingTags
                | TestCaseSettingTagsTagName
                | TestCaseSettingSetup
                | TestCaseSettingSetupKeyword
                | TestCaseSettingSetupKeywordArgument
                | TestCaseSettingTeardown
                | TestCaseSettingTeardownKeyword
                | TestCaseSettingTeardownKeywordArgument
                | TestCaseSettingTemplate
                | TestCaseSettingTemplateKeyword
                | TestCaseSettingTemplateKeywordUnwantedArguments
                | TestCaseSettingTimeout
                | TestCaseSettingTimeoutValue
                | TestCaseSettingTimeoutMessageArguments
                | TestCaseSettingUnknown
                | TestCaseSettingUnknownArguments
        )
    }

    fn is_keyword_state(self) -> bool {
        use ParsingState::*;
        matches!(
            self,
            KeywordDeclaration
                | KeywordInsideActions
                | KeywordInsideActionsArguments
                | KeywordSettingDocumentation
                | KeywordSettingDocumentationText
                | KeywordSettingTags
                | KeywordSettingTagsTagName
                | KeywordSettingArguments
                | KeywordSettingArgumentsArgument
                | KeywordSettingReturn
                | KeywordSettingReturnValue
                | KeywordSettingTeardown
                | KeywordSettingTeardownKeyword
                | KeywordSettingTeardownKeywordArgument
                | KeywordSettingTimeout
                | KeywordSettingTimeoutValue
                | KeywordSettingTimeoutMessageArguments
                | KeywordSettingUnknown
                | KeywordSettingUnknownArguments
        )
    }

    pub fn is_table_header(self) -> bool {
        use ParsingState::*;
        matches!(
            self,
            SettingTableHeader
                | VariableTableHeader
                | TestCaseTableHeader
                | TaskTableHeader
                | KeywordTableHeader
        )
    }

    pub fn is_table_inside(self) -> bool {
        use ParsingState::*;
        matches!(
            self,
            SettingTableInside
                | VariableTableInside
                | TestCaseTableInside
                | TaskTableInside
                | KeywordTableInside
        )
    }

    /// Test case, task or keyword name
    pub fn is_holder_declaration(self) -> bool {
        matches!(self, Self::TestCaseDeclaration | Self::KeywordDeclaration)
    }

    /// The `Inside` state following a header state.
    pub fn inside(self) -> Self {
        use ParsingState::*;
        match self {
            SettingTableHeader => SettingTableInside,
            VariableTableHeader => VariableTableInside,
            TestCaseTableHeader => TestCaseTableInside,
            TaskTableHeader => TaskTableInside,
            KeywordTableHeader => KeywordTableInside,
            other => other,
        }
    }

    pub fn is_library_alias(self) -> bool {
        matches!(
            self,
            Self::SettingLibraryImportAlias | Self::SettingLibraryImportAliasValue
        )
    }
}

/// Stack of [`ParsingState`]s for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsingStateStack {
    states: Vec<ParsingState>,
}

impl ParsingStateStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `state` unless it is already on top.
    pub fn push(&mut self, state: ParsingState) {
        if self.top() != Some(state) {
            trace!(?state, depth = self.states.len(), "push parsing state");
            self.states.push(state);
        }
    }

    pub fn pop(&mut self) -> Option<ParsingState> {
        self.states.pop()
    }

    pub fn top(&self) -> Option<ParsingState> {
        self.states.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn contains(&self, state: ParsingState) -> bool {
        self.states.contains(&state)
    }

    pub fn states(&self) -> &[ParsingState] {
        &self.states
    }

    /// Table of the section being read, from the bottom of the stack.
    pub fn table(&self) -> Option<ParsingState> {
        self.states
            .first()
            .map(|state| state.inside())
            .filter(|state| state.is_table_inside() || *state == ParsingState::Trash)
    }

    /// Remove the most recent entries matching `kinds`.
    ///
    /// Entries are removed from the top down to the first state that does not
    /// match; everything below it stays untouched. Returns how many entries
    /// were removed.
    pub fn remove_most_recent(&mut self, kinds: &[ParsingState]) -> usize {
        let before = self.states.len();
        while self.top().is_some_and(|top| kinds.contains(&top)) {
            self.states.pop();
        }
        let removed = before - self.states.len();
        if removed > 0 {
            trace!(removed, ?kinds, "stripped parsing states");
        }
        removed
    }

    /// Drop everything above the last table or test case/keyword state.
    ///
    /// A table header state turns into its `Inside` state, so the line after
    /// a header reads table content.
    pub fn reset_to_line_start(&mut self, keep_holder: bool) {
        let anchor = self.states.iter().rposition(|state| {
            state.is_table_inside()
                || state.is_table_header()
                || *state == ParsingState::Trash
                || (keep_holder && state.is_holder_declaration())
        });
        match anchor {
            Some(idx) => {
                self.states.truncate(idx + 1);
                if let Some(last) = self.states.last_mut() {
                    *last = last.inside();
                }
            }
            None => self.states.clear(),
        }
    }
}
