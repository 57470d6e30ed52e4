//! Token types and their textual representations
//!
//! Every semantic token kind the parser can assign lives here, together with
//! the spellings that introduce it (`Library`, `[Tags]`, `*** Settings ***`)
//! and the Robot Framework versions in which each spelling is available,
//! deprecated or removed.

use crate::base::RobotVersion;

/// Table a token type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Settings,
    Variables,
    TestCases,
    Tasks,
    Keywords,
    Comments,
    /// Token types that may appear in any table
    NotStrictlyBelongs,
}

/// One spelling of a token type with its version availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Representation {
    pub text: &'static str,
    pub available_from: Option<RobotVersion>,
    pub deprecated_from: Option<RobotVersion>,
    pub removed_from: Option<RobotVersion>,
}

impl Representation {
    const fn plain(text: &'static str) -> Self {
        Self {
            text,
            available_from: None,
            deprecated_from: None,
            removed_from: None,
        }
    }

    const fn deprecated(text: &'static str, from: RobotVersion) -> Self {
        Self {
            text,
            available_from: None,
            deprecated_from: Some(from),
            removed_from: None,
        }
    }

    const fn since(text: &'static str, from: RobotVersion) -> Self {
        Self {
            text,
            available_from: Some(from),
            deprecated_from: None,
            removed_from: None,
        }
    }

    /// Whether the spelling is recognised by the given version
    pub fn is_available(&self, version: &RobotVersion) -> bool {
        let introduced = self.available_from.is_none_or(|from| *version >= from);
        let not_removed = self.removed_from.is_none_or(|removed| *version < removed);
        introduced && not_removed
    }

    /// Whether the spelling still works but is deprecated in the given version
    pub fn is_deprecated(&self, version: &RobotVersion) -> bool {
        self.is_available(version) && self.deprecated_from.is_some_and(|from| *version >= from)
    }
}

const V2_9: RobotVersion = RobotVersion::new(2, 9);
const V3_0: RobotVersion = RobotVersion::new(3, 0);
const V3_1: RobotVersion = RobotVersion::new(3, 1);
const V6_0: RobotVersion = RobotVersion::new(6, 0);
const V7_0: RobotVersion = RobotVersion::new(7, 0);

// ============================================================================
// REPRESENTATIONS
// ============================================================================

const SETTINGS_HEADER: &[Representation] = &[
    Representation::plain("Settings"),
    Representation::plain("Setting"),
    Representation::deprecated("Metadata", V3_0),
];
const VARIABLES_HEADER: &[Representation] = &[
    Representation::plain("Variables"),
    Representation::plain("Variable"),
];
const TEST_CASES_HEADER: &[Representation] = &[
    Representation::plain("Test Cases"),
    Representation::plain("Test Case"),
];
const TASKS_HEADER: &[Representation] = &[
    Representation::since("Tasks", V3_1),
    Representation::since("Task", V3_1),
];
const KEYWORDS_HEADER: &[Representation] = &[
    Representation::plain("Keywords"),
    Representation::plain("Keyword"),
    Representation::plain("User Keywords"),
    Representation::deprecated("User Keyword", V3_0),
];
const COMMENTS_HEADER: &[Representation] = &[
    Representation::plain("Comments"),
    Representation::plain("Comment"),
];

const HASH: &[Representation] = &[Representation::plain("#")];
const CONTINUE: &[Representation] = &[Representation::plain("...")];
const EMPTY_CELL: &[Representation] = &[Representation::plain("\\")];
const ASSIGNMENT: &[Representation] = &[Representation::plain("=")];

const LIBRARY: &[Representation] = &[Representation::plain("Library")];
const LIBRARY_ALIAS: &[Representation] = &[
    Representation::since("AS", V6_0),
    Representation::deprecated("WITH NAME", V7_0),
];
const VARIABLES: &[Representation] = &[Representation::plain("Variables")];
const RESOURCE: &[Representation] = &[Representation::plain("Resource")];
const DOCUMENTATION: &[Representation] = &[
    Representation::plain("Documentation"),
    Representation::deprecated("Document", V3_0),
];
const METADATA: &[Representation] = &[
    Representation::plain("Metadata"),
    Representation::deprecated("Meta", V3_0),
];
const SUITE_SETUP: &[Representation] = &[
    Representation::plain("Suite Setup"),
    Representation::deprecated("Suite Precondition", V3_0),
];
const SUITE_TEARDOWN: &[Representation] = &[
    Representation::plain("Suite Teardown"),
    Representation::deprecated("Suite Postcondition", V3_0),
];
const FORCE_TAGS: &[Representation] = &[Representation::plain("Force Tags")];
const DEFAULT_TAGS: &[Representation] = &[Representation::plain("Default Tags")];
const TEST_SETUP: &[Representation] = &[
    Representation::plain("Test Setup"),
    Representation::deprecated("Test Precondition", V3_0),
];
const TEST_TEARDOWN: &[Representation] = &[
    Representation::plain("Test Teardown"),
    Representation::deprecated("Test Postcondition", V3_0),
];
const TEST_TEMPLATE: &[Representation] = &[Representation::plain("Test Template")];
const TEST_TIMEOUT: &[Representation] = &[Representation::plain("Test Timeout")];

const LOCAL_DOCUMENTATION: &[Representation] = &[
    Representation::plain("[Documentation]"),
    Representation::deprecated("[Document]", V3_0),
];
const LOCAL_TAGS: &[Representation] = &[Representation::plain("[Tags]")];
const LOCAL_SETUP: &[Representation] = &[
    Representation::plain("[Setup]"),
    Representation::deprecated("[Precondition]", V3_0),
];
const LOCAL_TEARDOWN: &[Representation] = &[
    Representation::plain("[Teardown]"),
    Representation::deprecated("[Postcondition]", V3_0),
];
const LOCAL_TEMPLATE: &[Representation] = &[Representation::plain("[Template]")];
const LOCAL_TIMEOUT: &[Representation] = &[Representation::plain("[Timeout]")];
const LOCAL_ARGUMENTS: &[Representation] = &[Representation::plain("[Arguments]")];
const LOCAL_RETURN: &[Representation] = &[Representation::plain("[Return]")];

const DICTIONARY_DECLARATION: &[Representation] = &[Representation::since("&{}", V2_9)];

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Semantic kind of a [`RobotToken`](super::RobotToken).
///
/// A token may carry several types at once; the first one is its primary
/// type, the others are candidates or markers ([`Self::Deprecated`],
/// [`Self::VariableUsage`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "transfer", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotTokenType {
    Unknown,
    /// Marker: the token contains `${..}`-like variable usages
    VariableUsage,
    /// Marker: the matched spelling is deprecated in the active version
    Deprecated,
    Assignment,
    EmptyCell,
    PreviousLineContinue,
    StartHashComment,
    CommentContinue,

    // Table headers
    SettingsTableHeader,
    VariablesTableHeader,
    TestCasesTableHeader,
    TasksTableHeader,
    KeywordsTableHeader,
    CommentsTableHeader,
    UserOwnTableHeader,
    TableHeaderColumn,

    // Settings table
    SettingLibraryDeclaration,
    SettingLibraryName,
    SettingLibraryArgument,
    SettingLibraryAlias,
    SettingLibraryAliasValue,
    SettingVariablesDeclaration,
    SettingVariablesFileName,
    SettingVariablesArgument,
    SettingResourceDeclaration,
    SettingResourceFileName,
    SettingResourceUnwantedArgument,
    SettingDocumentationDeclaration,
    SettingDocumentationText,
    SettingMetadataDeclaration,
    SettingMetadataKey,
    SettingMetadataValue,
    SettingSuiteSetupDeclaration,
    SettingSuiteSetupKeywordName,
    SettingSuiteSetupKeywordArgument,
    SettingSuiteTeardownDeclaration,
    SettingSuiteTeardownKeywordName,
    SettingSuiteTeardownKeywordArgument,
    SettingForceTagsDeclaration,
    SettingForceTag,
    SettingDefaultTagsDeclaration,
    SettingDefaultTag,
    SettingTestSetupDeclaration,
    SettingTestSetupKeywordName,
    SettingTestSetupKeywordArgument,
    SettingTestTeardownDeclaration,
    SettingTestTeardownKeywordName,
    SettingTestTeardownKeywordArgument,
    SettingTestTemplateDeclaration,
    SettingTestTemplateKeywordName,
    SettingTestTemplateKeywordUnwantedArgument,
    SettingTestTimeoutDeclaration,
    SettingTestTimeoutValue,
    SettingTestTimeoutMessage,
    SettingUnknownDeclaration,
    SettingUnknownArgument,

    // Variables table
    VariablesScalarDeclaration,
    VariablesListDeclaration,
    VariablesDictionaryDeclaration,
    VariablesUnknownDeclaration,
    VariablesVariableValue,
    VariablesDictionaryValue,

    // Test cases and tasks
    TestCaseName,
    TestCaseActionName,
    TestCaseActionArgument,
    TestCaseSettingDocumentation,
    TestCaseSettingDocumentationText,
    TestCaseSettingTagsDeclaration,
    TestCaseSettingTag,
    TestCaseSettingSetup,
    TestCaseSettingSetupKeywordName,
    TestCaseSettingSetupKeywordArgument,
    TestCaseSettingTeardown,
    TestCaseSettingTeardownKeywordName,
    TestCaseSettingTeardownKeywordArgument,
    TestCaseSettingTemplate,
    TestCaseSettingTemplateKeywordName,
    TestCaseSettingTemplateKeywordUnwantedArgument,
    TestCaseSettingTimeout,
    TestCaseSettingTimeoutValue,
    TestCaseSettingTimeoutMessage,
    TestCaseSettingUnknownDeclaration,
    TestCaseSettingUnknownArgument,

    // Keywords
    KeywordName,
    KeywordActionName,
    KeywordActionArgument,
    KeywordSettingDocumentation,
    KeywordSettingDocumentationText,
    KeywordSettingTags,
    KeywordSettingTag,
    KeywordSettingArguments,
    KeywordSettingArgument,
    KeywordSettingReturn,
    KeywordSettingReturnValue,
    KeywordSettingTeardown,
    KeywordSettingTeardownKeywordName,
    KeywordSettingTeardownKeywordArgument,
    KeywordSettingTimeout,
    KeywordSettingTimeoutValue,
    KeywordSettingTimeoutMessage,
    KeywordSettingUnknownDeclaration,
    KeywordSettingUnknownArgument,
}

impl RobotTokenType {
    /// Spellings introducing this token type, most preferred first.
    pub fn representations(self) -> &'static [Representation] {
        use RobotTokenType::*;
        match self {
            SettingsTableHeader => SETTINGS_HEADER,
            VariablesTableHeader => VARIABLES_HEADER,
            TestCasesTableHeader => TEST_CASES_HEADER,
            TasksTableHeader => TASKS_HEADER,
            KeywordsTableHeader => KEYWORDS_HEADER,
            CommentsTableHeader => COMMENTS_HEADER,
            StartHashComment => HASH,
            PreviousLineContinue => CONTINUE,
            EmptyCell => EMPTY_CELL,
            Assignment => ASSIGNMENT,
            SettingLibraryDeclaration => LIBRARY,
            SettingLibraryAlias => LIBRARY_ALIAS,
            SettingVariablesDeclaration => VARIABLES,
            SettingResourceDeclaration => RESOURCE,
            SettingDocumentationDeclaration => DOCUMENTATION,
            SettingMetadataDeclaration => METADATA,
            SettingSuiteSetupDeclaration => SUITE_SETUP,
            SettingSuiteTeardownDeclaration => SUITE_TEARDOWN,
            SettingForceTagsDeclaration => FORCE_TAGS,
            SettingDefaultTagsDeclaration => DEFAULT_TAGS,
            SettingTestSetupDeclaration => TEST_SETUP,
            SettingTestTeardownDeclaration => TEST_TEARDOWN,
            SettingTestTemplateDeclaration => TEST_TEMPLATE,
            SettingTestTimeoutDeclaration => TEST_TIMEOUT,
            VariablesDictionaryDeclaration => DICTIONARY_DECLARATION,
            TestCaseSettingDocumentation | KeywordSettingDocumentation => LOCAL_DOCUMENTATION,
            TestCaseSettingTagsDeclaration | KeywordSettingTags => LOCAL_TAGS,
            TestCaseSettingSetup => LOCAL_SETUP,
            TestCaseSettingTeardown | KeywordSettingTeardown => LOCAL_TEARDOWN,
            TestCaseSettingTemplate => LOCAL_TEMPLATE,
            TestCaseSettingTimeout | KeywordSettingTimeout => LOCAL_TIMEOUT,
            KeywordSettingArguments => LOCAL_ARGUMENTS,
            KeywordSettingReturn => LOCAL_RETURN,
            _ => &[],
        }
    }

    /// The spelling to use when creating a new token of this type.
    ///
    /// Prefers the first spelling that is available and not deprecated in
    /// `version`, then any available one, then the first one listed.
    pub fn most_correct_representation(self, version: &RobotVersion) -> Option<&'static str> {
        let reprs = self.representations();
        reprs
            .iter()
            .find(|r| r.is_available(version) && !r.is_deprecated(version))
            .or_else(|| reprs.iter().find(|r| r.is_available(version)))
            .or_else(|| reprs.first())
            .map(|r| r.text)
    }

    pub fn table(self) -> TableKind {
        use RobotTokenType::*;
        match self {
            Unknown | VariableUsage | Deprecated | Assignment | EmptyCell | PreviousLineContinue
            | StartHashComment | CommentContinue | UserOwnTableHeader | TableHeaderColumn => {
                TableKind::NotStrictlyBelongs
            }
            SettingsTableHeader => TableKind::Settings,
            VariablesTableHeader => TableKind::Variables,
            TestCasesTableHeader => TableKind::TestCases,
            TasksTableHeader => TableKind::Tasks,
            KeywordsTableHeader => TableKind::Keywords,
            CommentsTableHeader => TableKind::Comments,
            SettingLibraryDeclaration
            | SettingLibraryName
            | SettingLibraryArgument
            | SettingLibraryAlias
            | SettingLibraryAliasValue
            | SettingVariablesDeclaration
            | SettingVariablesFileName
            | SettingVariablesArgument
            | SettingResourceDeclaration
            | SettingResourceFileName
            | SettingResourceUnwantedArgument
            | SettingDocumentationDeclaration
            | SettingDocumentationText
            | SettingMetadataDeclaration
            | SettingMetadataKey
            | SettingMetadataValue
            | SettingSuiteSetupDeclaration
            | SettingSuiteSetupKeywordName
            | SettingSuiteSetupKeywordArgument
            | SettingSuiteTeardownDeclaration
            | SettingSuiteTeardownKeywordName
            | SettingSuiteTeardownKeywordArgument
            | SettingForceTagsDeclaration
            | SettingForceTag
            | SettingDefaultTagsDeclaration
            | SettingDefaultTag
            | SettingTestSetupDeclaration
            | SettingTestSetupKeywordName
            | SettingTestSetupKeywordArgument
            | SettingTestTeardownDeclaration
            | SettingTestTeardownKeywordName
            | SettingTestTeardownKeywordArgument
            | SettingTestTemplateDeclaration
            | SettingTestTemplateKeywordName
            | SettingTestTemplateKeywordUnwantedArgument
            | SettingTestTimeoutDeclaration
            | SettingTestTimeoutValue
            | SettingTestTimeoutMessage
            | SettingUnknownDeclaration
            | SettingUnknownArgument => TableKind::Settings,
            VariablesScalarDeclaration
            | VariablesListDeclaration
            | VariablesDictionaryDeclaration
            | VariablesUnknownDeclaration
            | VariablesVariableValue
            | VariablesDictionaryValue => TableKind::Variables,
            TestCaseName
            | TestCaseActionName
            | TestCaseActionArgument
            | TestCaseSettingDocumentation
            | TestCaseSettingDocumentationText
            | TestCaseSettingTagsDeclaration
            | TestCaseSettingTag
            | TestCaseSettingSetup
            | TestCaseSettingSetupKeywordName
            | TestCaseSettingSetupKeywordArgument
            | TestCaseSettingTeardown
            | TestCaseSettingTeardownKeywordName
            | TestCaseSettingTeardownKeywordArgument
            | TestCaseSettingTemplate
            | TestCaseSettingTemplateKeywordName
            | TestCaseSettingTemplateKeywordUnwantedArgument
            | TestCaseSettingTimeout
            | TestCaseSettingTimeoutValue
            | TestCaseSettingTimeoutMessage
            | TestCaseSettingUnknownDeclaration
            | TestCaseSettingUnknownArgument => TableKind::TestCases,
            KeywordName
            | KeywordActionName
            | KeywordActionArgument
            | KeywordSettingDocumentation
            | KeywordSettingDocumentationText
            | KeywordSettingTags
            | KeywordSettingTag
            | KeywordSettingArguments
            | KeywordSettingArgument
            | KeywordSettingReturn
            | KeywordSettingReturnValue
            | KeywordSettingTeardown
            | KeywordSettingTeardownKeywordName
            | KeywordSettingTeardownKeywordArgument
            | KeywordSettingTimeout
            | KeywordSettingTimeoutValue
            | KeywordSettingTimeoutMessage
            | KeywordSettingUnknownDeclaration
            | KeywordSettingUnknownArgument => TableKind::Keywords,
        }
    }

    /// Marker types survive [`RobotToken::set_type`](super::RobotToken::set_type).
    pub fn is_marker(self) -> bool {
        matches!(self, Self::Deprecated | Self::VariableUsage)
    }

    pub fn is_table_header(self) -> bool {
        matches!(
            self,
            Self::SettingsTableHeader
                | Self::VariablesTableHeader
                | Self::TestCasesTableHeader
                | Self::TasksTableHeader
                | Self::KeywordsTableHeader
                | Self::CommentsTableHeader
                | Self::UserOwnTableHeader
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Self::StartHashComment | Self::CommentContinue)
    }

    /// Declarations of settings in the settings table
    pub fn is_setting_declaration(self) -> bool {
        use RobotTokenType::*;
        matches!(
            self,
            SettingLibraryDeclaration
                | SettingVariablesDeclaration
                | SettingResourceDeclaration
                | SettingDocumentationDeclaration
                | SettingMetadataDeclaration
                | SettingSuiteSetupDeclaration
                | SettingSuiteTeardownDeclaration
                | SettingForceTagsDeclaration
                | SettingDefaultTagsDeclaration
                | SettingTestSetupDeclaration
                | SettingTestTeardownDeclaration
                | SettingTestTemplateDeclaration
                | SettingTestTimeoutDeclaration
        )
    }

    /// Declarations of `[..]` settings inside test cases and tasks
    pub fn is_test_case_setting_declaration(self) -> bool {
        use RobotTokenType::*;
        matches!(
            self,
            TestCaseSettingDocumentation
                | TestCaseSettingTagsDeclaration
                | TestCaseSettingSetup
                | TestCaseSettingTeardown
                | TestCaseSettingTemplate
                | TestCaseSettingTimeout
                | TestCaseSettingUnknownDeclaration
        )
    }

    /// Declarations of `[..]` settings inside user keywords
    pub fn is_keyword_setting_declaration(self) -> bool {
        use RobotTokenType::*;
        matches!(
            self,
            KeywordSettingDocumentation
                | KeywordSettingTags
                | KeywordSettingArguments
                | KeywordSettingReturn
                | KeywordSettingTeardown
                | KeywordSettingTimeout
                | KeywordSettingUnknownDeclaration
        )
    }
}
