//! Model element kinds
//!
//! Every element of the document model shares one shape (declaration,
//! values, comments). [`ModelType`] says which construct it is and
//! [`ValueLayout`] says how its values are typed.

use crate::parser::{RobotTokenType, TableKind};

/// How the value tokens of an element are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueLayout {
    /// No values (test case and keyword names)
    None,
    /// Every value has the same type
    Flat(RobotTokenType),
    /// First value is a name, the rest are arguments
    Named {
        name: RobotTokenType,
        argument: RobotTokenType,
    },
    /// Leading assignments, an action, then its arguments
    Row {
        action: RobotTokenType,
        argument: RobotTokenType,
    },
}

impl ValueLayout {
    /// Type of the value at `index` for non-row layouts.
    pub fn value_type(self, index: usize) -> RobotTokenType {
        match self {
            Self::None => RobotTokenType::Unknown,
            Self::Flat(value) => value,
            Self::Named { name, .. } if index == 0 => name,
            Self::Named { argument, .. } => argument,
            Self::Row { argument, .. } => argument,
        }
    }

    /// Type of arguments, where the layout has arguments
    pub fn argument_type(self) -> Option<RobotTokenType> {
        match self {
            Self::None => None,
            Self::Flat(value) => Some(value),
            Self::Named { argument, .. } | Self::Row { argument, .. } => Some(argument),
        }
    }
}

/// Test case, task or keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "transfer", derive(serde::Serialize, serde::Deserialize))]
pub enum CodeKind {
    TestCases,
    Tasks,
    Keywords,
}

impl CodeKind {
    pub fn header_type(self) -> RobotTokenType {
        match self {
            Self::TestCases => RobotTokenType::TestCasesTableHeader,
            Self::Tasks => RobotTokenType::TasksTableHeader,
            Self::Keywords => RobotTokenType::KeywordsTableHeader,
        }
    }

    pub fn holder_type(self) -> ModelType {
        match self {
            Self::TestCases => ModelType::TestCase,
            Self::Tasks => ModelType::Task,
            Self::Keywords => ModelType::UserKeyword,
        }
    }

    pub fn row_type(self) -> ModelType {
        match self {
            Self::TestCases | Self::Tasks => ModelType::TestCaseExecutableRow,
            Self::Keywords => ModelType::UserKeywordExecutableRow,
        }
    }

    pub fn unknown_setting_type(self) -> ModelType {
        match self {
            Self::TestCases | Self::Tasks => ModelType::TestCaseSettingUnknown,
            Self::Keywords => ModelType::UserKeywordSettingUnknown,
        }
    }

    pub fn table(self) -> TableKind {
        match self {
            Self::TestCases => TableKind::TestCases,
            Self::Tasks => TableKind::Tasks,
            Self::Keywords => TableKind::Keywords,
        }
    }

    /// Local setting declared by `token_type` in this kind of table.
    pub fn local_setting(self, token_type: RobotTokenType) -> Option<ModelType> {
        use RobotTokenType as T;
        let model_type = match (self, token_type) {
            (Self::Keywords, T::KeywordSettingDocumentation) => ModelType::UserKeywordDocumentation,
            (Self::Keywords, T::KeywordSettingTags) => ModelType::UserKeywordTags,
            (Self::Keywords, T::KeywordSettingArguments) => ModelType::UserKeywordArguments,
            (Self::Keywords, T::KeywordSettingReturn) => ModelType::UserKeywordReturn,
            (Self::Keywords, T::KeywordSettingTeardown) => ModelType::UserKeywordTeardown,
            (Self::Keywords, T::KeywordSettingTimeout) => ModelType::UserKeywordTimeout,
            (Self::Keywords, _) => return None,
            (_, T::TestCaseSettingDocumentation) => ModelType::TestCaseDocumentation,
            (_, T::TestCaseSettingTagsDeclaration) => ModelType::TestCaseTags,
            (_, T::TestCaseSettingSetup) => ModelType::TestCaseSetup,
            (_, T::TestCaseSettingTeardown) => ModelType::TestCaseTeardown,
            (_, T::TestCaseSettingTemplate) => ModelType::TestCaseTemplate,
            (_, T::TestCaseSettingTimeout) => ModelType::TestCaseTimeout,
            _ => return None,
        };
        Some(model_type)
    }
}

/// Settings that may be repeated in old Robot Framework versions and are
/// presented through a joining view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Documentation,
    SuiteSetup,
    SuiteTeardown,
    TestSetup,
    TestTeardown,
    TestTemplate,
    TestTimeout,
    ForceTags,
    DefaultTags,
}

impl SettingKind {
    pub const ALL: [SettingKind; 9] = [
        Self::Documentation,
        Self::SuiteSetup,
        Self::SuiteTeardown,
        Self::TestSetup,
        Self::TestTeardown,
        Self::TestTemplate,
        Self::TestTimeout,
        Self::ForceTags,
        Self::DefaultTags,
    ];

    pub fn model_type(self) -> ModelType {
        match self {
            Self::Documentation => ModelType::SuiteDocumentation,
            Self::SuiteSetup => ModelType::SuiteSetup,
            Self::SuiteTeardown => ModelType::SuiteTeardown,
            Self::TestSetup => ModelType::TestSetup,
            Self::TestTeardown => ModelType::TestTeardown,
            Self::TestTemplate => ModelType::TestTemplate,
            Self::TestTimeout => ModelType::TestTimeout,
            Self::ForceTags => ModelType::ForceTags,
            Self::DefaultTags => ModelType::DefaultTags,
        }
    }

    pub fn from_model_type(model_type: ModelType) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.model_type() == model_type)
    }
}

/// Kind of a model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "transfer", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelType {
    TableHeader,

    LibraryImport,
    ResourceImport,
    VariablesImport,
    SuiteDocumentation,
    Metadata,
    SuiteSetup,
    SuiteTeardown,
    TestSetup,
    TestTeardown,
    TestTemplate,
    TestTimeout,
    ForceTags,
    DefaultTags,
    SettingsUnknown,

    ScalarVariable,
    ListVariable,
    DictionaryVariable,
    UnknownVariable,

    TestCase,
    Task,
    TestCaseDocumentation,
    TestCaseTags,
    TestCaseSetup,
    TestCaseTeardown,
    TestCaseTemplate,
    TestCaseTimeout,
    TestCaseSettingUnknown,
    TestCaseExecutableRow,

    UserKeyword,
    UserKeywordDocumentation,
    UserKeywordTags,
    UserKeywordArguments,
    UserKeywordReturn,
    UserKeywordTeardown,
    UserKeywordTimeout,
    UserKeywordSettingUnknown,
    UserKeywordExecutableRow,
}

impl ModelType {
    /// Type of the declaration token, for elements with a fixed declaration.
    pub fn declaration_type(self) -> Option<RobotTokenType> {
        use ModelType::*;
        use RobotTokenType as T;
        let token_type = match self {
            TableHeader | TestCaseExecutableRow | UserKeywordExecutableRow => return None,
            LibraryImport => T::SettingLibraryDeclaration,
            ResourceImport => T::SettingResourceDeclaration,
            VariablesImport => T::SettingVariablesDeclaration,
            SuiteDocumentation => T::SettingDocumentationDeclaration,
            Metadata => T::SettingMetadataDeclaration,
            SuiteSetup => T::SettingSuiteSetupDeclaration,
            SuiteTeardown => T::SettingSuiteTeardownDeclaration,
            TestSetup => T::SettingTestSetupDeclaration,
            TestTeardown => T::SettingTestTeardownDeclaration,
            TestTemplate => T::SettingTestTemplateDeclaration,
            TestTimeout => T::SettingTestTimeoutDeclaration,
            ForceTags => T::SettingForceTagsDeclaration,
            DefaultTags => T::SettingDefaultTagsDeclaration,
            SettingsUnknown => T::SettingUnknownDeclaration,
            ScalarVariable => T::VariablesScalarDeclaration,
            ListVariable => T::VariablesListDeclaration,
            DictionaryVariable => T::VariablesDictionaryDeclaration,
            UnknownVariable => T::VariablesUnknownDeclaration,
            TestCase | Task => T::TestCaseName,
            TestCaseDocumentation => T::TestCaseSettingDocumentation,
            TestCaseTags => T::TestCaseSettingTagsDeclaration,
            TestCaseSetup => T::TestCaseSettingSetup,
            TestCaseTeardown => T::TestCaseSettingTeardown,
            TestCaseTemplate => T::TestCaseSettingTemplate,
            TestCaseTimeout => T::TestCaseSettingTimeout,
            TestCaseSettingUnknown => T::TestCaseSettingUnknownDeclaration,
            UserKeyword => T::KeywordName,
            UserKeywordDocumentation => T::KeywordSettingDocumentation,
            UserKeywordTags => T::KeywordSettingTags,
            UserKeywordArguments => T::KeywordSettingArguments,
            UserKeywordReturn => T::KeywordSettingReturn,
            UserKeywordTeardown => T::KeywordSettingTeardown,
            UserKeywordTimeout => T::KeywordSettingTimeout,
            UserKeywordSettingUnknown => T::KeywordSettingUnknownDeclaration,
        };
        Some(token_type)
    }

    pub fn layout(self) -> ValueLayout {
        use ModelType::*;
        use RobotTokenType as T;
        use ValueLayout::{Flat, Named, Row};
        match self {
            TestCase | Task | UserKeyword => ValueLayout::None,
            TableHeader => Flat(T::TableHeaderColumn),
            LibraryImport => Named {
                name: T::SettingLibraryName,
                argument: T::SettingLibraryArgument,
            },
            ResourceImport => Named {
                name: T::SettingResourceFileName,
                argument: T::SettingResourceUnwantedArgument,
            },
            VariablesImport => Named {
                name: T::SettingVariablesFileName,
                argument: T::SettingVariablesArgument,
            },
            SuiteDocumentation => Flat(T::SettingDocumentationText),
            Metadata => Named {
                name: T::SettingMetadataKey,
                argument: T::SettingMetadataValue,
            },
            SuiteSetup => Named {
                name: T::SettingSuiteSetupKeywordName,
                argument: T::SettingSuiteSetupKeywordArgument,
            },
            SuiteTeardown => Named {
                name: T::SettingSuiteTeardownKeywordName,
                argument: T::SettingSuiteTeardownKeywordArgument,
            },
            TestSetup => Named {
                name: T::SettingTestSetupKeywordName,
                argument: T::SettingTestSetupKeywordArgument,
            },
            TestTeardown => Named {
                name: T::SettingTestTeardownKeywordName,
                argument: T::SettingTestTeardownKeywordArgument,
            },
            TestTemplate => Named {
                name: T::SettingTestTemplateKeywordName,
                argument: T::SettingTestTemplateKeywordUnwantedArgument,
            },
            TestTimeout => Named {
                name: T::SettingTestTimeoutValue,
                argument: T::SettingTestTimeoutMessage,
            },
            ForceTags => Flat(T::SettingForceTag),
            DefaultTags => Flat(T::SettingDefaultTag),
            SettingsUnknown => Flat(T::SettingUnknownArgument),
            ScalarVariable | ListVariable | UnknownVariable => Flat(T::VariablesVariableValue),
            DictionaryVariable => Flat(T::VariablesDictionaryValue),
            TestCaseDocumentation => Flat(T::TestCaseSettingDocumentationText),
            TestCaseTags => Flat(T::TestCaseSettingTag),
            TestCaseSetup => Named {
                name: T::TestCaseSettingSetupKeywordName,
                argument: T::TestCaseSettingSetupKeywordArgument,
            },
            TestCaseTeardown => Named {
                name: T::TestCaseSettingTeardownKeywordName,
                argument: T::TestCaseSettingTeardownKeywordArgument,
            },
            TestCaseTemplate => Named {
                name: T::TestCaseSettingTemplateKeywordName,
                argument: T::TestCaseSettingTemplateKeywordUnwantedArgument,
            },
            TestCaseTimeout => Named {
                name: T::TestCaseSettingTimeoutValue,
                argument: T::TestCaseSettingTimeoutMessage,
            },
            TestCaseSettingUnknown => Flat(T::TestCaseSettingUnknownArgument),
            TestCaseExecutableRow => Row {
                action: T::TestCaseActionName,
                argument: T::TestCaseActionArgument,
            },
            UserKeywordDocumentation => Flat(T::KeywordSettingDocumentationText),
            UserKeywordTags => Flat(T::KeywordSettingTag),
            UserKeywordArguments => Flat(T::KeywordSettingArgument),
            UserKeywordReturn => Flat(T::KeywordSettingReturnValue),
            UserKeywordTeardown => Named {
                name: T::KeywordSettingTeardownKeywordName,
                argument: T::KeywordSettingTeardownKeywordArgument,
            },
            UserKeywordTimeout => Named {
                name: T::KeywordSettingTimeoutValue,
                argument: T::KeywordSettingTimeoutMessage,
            },
            UserKeywordSettingUnknown => Flat(T::KeywordSettingUnknownArgument),
            UserKeywordExecutableRow => Row {
                action: T::KeywordActionName,
                argument: T::KeywordActionArgument,
            },
        }
    }

    /// Settings-table element declared by `token_type`.
    pub fn for_setting_declaration(token_type: RobotTokenType) -> Option<Self> {
        use RobotTokenType as T;
        let model_type = match token_type {
            T::SettingLibraryDeclaration => Self::LibraryImport,
            T::SettingResourceDeclaration => Self::ResourceImport,
            T::SettingVariablesDeclaration => Self::VariablesImport,
            T::SettingDocumentationDeclaration => Self::SuiteDocumentation,
            T::SettingMetadataDeclaration => Self::Metadata,
            T::SettingSuiteSetupDeclaration => Self::SuiteSetup,
            T::SettingSuiteTeardownDeclaration => Self::SuiteTeardown,
            T::SettingTestSetupDeclaration => Self::TestSetup,
            T::SettingTestTeardownDeclaration => Self::TestTeardown,
            T::SettingTestTemplateDeclaration => Self::TestTemplate,
            T::SettingTestTimeoutDeclaration => Self::TestTimeout,
            T::SettingForceTagsDeclaration => Self::ForceTags,
            T::SettingDefaultTagsDeclaration => Self::DefaultTags,
            _ => return None,
        };
        Some(model_type)
    }

    pub fn is_import(self) -> bool {
        matches!(
            self,
            Self::LibraryImport | Self::ResourceImport | Self::VariablesImport
        )
    }

    pub fn is_variable(self) -> bool {
        matches!(
            self,
            Self::ScalarVariable | Self::ListVariable | Self::DictionaryVariable | Self::UnknownVariable
        )
    }

    pub fn is_holder(self) -> bool {
        matches!(self, Self::TestCase | Self::Task | Self::UserKeyword)
    }

    pub fn is_executable_row(self) -> bool {
        matches!(
            self,
            Self::TestCaseExecutableRow | Self::UserKeywordExecutableRow
        )
    }

    /// `[..]` settings inside test cases, tasks and keywords
    pub fn is_local_setting(self) -> bool {
        self.declaration_type().is_some_and(|t| {
            t.is_test_case_setting_declaration() || t.is_keyword_setting_declaration()
        })
    }

    /// Elements whose values are tags
    pub fn is_tags(self) -> bool {
        matches!(
            self,
            Self::ForceTags | Self::DefaultTags | Self::TestCaseTags | Self::UserKeywordTags
        )
    }

    /// Lines of this element are written indented
    pub fn is_body_element(self) -> bool {
        self.is_local_setting() || self.is_executable_row()
    }
}
