//! Value cells following a declaration

use super::{MappingContext, ParsingMapper};
use crate::parser::errors::{ErrorCode, Severity};
use crate::parser::state::ParsingState;
use crate::parser::{RobotToken, RobotTokenType};

/// Where a value cell leads from a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    pub token_type: RobotTokenType,
    pub next: ParsingState,
    /// Values that are kept but reported
    pub anomaly: Option<ErrorCode>,
}

const fn to(token_type: RobotTokenType, next: ParsingState) -> Transition {
    Transition {
        token_type,
        next,
        anomaly: None,
    }
}

const fn unwanted(token_type: RobotTokenType, next: ParsingState) -> Transition {
    Transition {
        token_type,
        next,
        anomaly: Some(ErrorCode::E0204),
    }
}

/// Transition table for value cells.
pub(crate) fn value_transition(state: ParsingState) -> Option<Transition> {
    use ParsingState as S;
    use RobotTokenType as T;
    let transition = match state {
        S::SettingLibraryImport => to(T::SettingLibraryName, S::SettingLibraryNameOrPath),
        S::SettingLibraryNameOrPath | S::SettingLibraryArguments => {
            to(T::SettingLibraryArgument, S::SettingLibraryArguments)
        }
        S::SettingVariableImport => to(T::SettingVariablesFileName, S::SettingVariableImportPath),
        S::SettingVariableImportPath | S::SettingVariableArguments => {
            to(T::SettingVariablesArgument, S::SettingVariableArguments)
        }
        S::SettingResourceImport => to(T::SettingResourceFileName, S::SettingResourceImportPath),
        S::SettingResourceImportPath | S::SettingResourceUnwantedArguments => unwanted(
            T::SettingResourceUnwantedArgument,
            S::SettingResourceUnwantedArguments,
        ),
        S::SettingDocumentation | S::SettingDocumentationText => {
            to(T::SettingDocumentationText, S::SettingDocumentationText)
        }
        S::SettingMetadata => to(T::SettingMetadataKey, S::SettingMetadataKey),
        S::SettingMetadataKey | S::SettingMetadataValue => {
            to(T::SettingMetadataValue, S::SettingMetadataValue)
        }
        S::SettingSuiteSetup => to(T::SettingSuiteSetupKeywordName, S::SettingSuiteSetupKeyword),
        S::SettingSuiteSetupKeyword | S::SettingSuiteSetupKeywordArgument => to(
            T::SettingSuiteSetupKeywordArgument,
            S::SettingSuiteSetupKeywordArgument,
        ),
        S::SettingSuiteTeardown => {
            to(T::SettingSuiteTeardownKeywordName, S::SettingSuiteTeardownKeyword)
        }
        S::SettingSuiteTeardownKeyword | S::SettingSuiteTeardownKeywordArgument => to(
            T::SettingSuiteTeardownKeywordArgument,
            S::SettingSuiteTeardownKeywordArgument,
        ),
        S::SettingTestSetup => to(T::SettingTestSetupKeywordName, S::SettingTestSetupKeyword),
        S::SettingTestSetupKeyword | S::SettingTestSetupKeywordArgument => to(
            T::SettingTestSetupKeywordArgument,
            S::SettingTestSetupKeywordArgument,
        ),
        S::SettingTestTeardown => {
            to(T::SettingTestTeardownKeywordName, S::SettingTestTeardownKeyword)
        }
        S::SettingTestTeardownKeyword | S::SettingTestTeardownKeywordArgument => to(
            T::SettingTestTeardownKeywordArgument,
            S::SettingTestTeardownKeywordArgument,
        ),
        S::SettingTestTemplate => {
            to(T::SettingTestTemplateKeywordName, S::SettingTestTemplateKeyword)
        }
        S::SettingTestTemplateKeyword | S::SettingTestTemplateKeywordUnwantedArguments => unwanted(
            T::SettingTestTemplateKeywordUnwantedArgument,
            S::SettingTestTemplateKeywordUnwantedArguments,
        ),
        S::SettingTestTimeout => to(T::SettingTestTimeoutValue, S::SettingTestTimeoutValue),
        S::SettingTestTimeoutValue | S::SettingTestTimeoutMessageArguments => to(
            T::SettingTestTimeoutMessage,
            S::SettingTestTimeoutMessageArguments,
        ),
        S::SettingForceTags | S::SettingForceTagsTagName => {
            to(T::SettingForceTag, S::SettingForceTagsTagName)
        }
        S::SettingDefaultTags | S::SettingDefaultTagsTagName => {
            to(T::SettingDefaultTag, S::SettingDefaultTagsTagName)
        }
        S::SettingUnknown | S::SettingUnknownTrashElement => {
            to(T::SettingUnknownArgument, S::SettingUnknownTrashElement)
        }

        S::ScalarVariableDeclaration | S::ScalarVariableValue => {
            to(T::VariablesVariableValue, S::ScalarVariableValue)
        }
        S::ListVariableDeclaration | S::ListVariableValue => {
            to(T::VariablesVariableValue, S::ListVariableValue)
        }
        S::DictionaryVariableDeclaration | S::DictionaryVariableValue => {
            to(T::VariablesDictionaryValue, S::DictionaryVariableValue)
        }
        S::VariableUnknown | S::VariableUnknownValue => {
            to(T::VariablesVariableValue, S::VariableUnknownValue)
        }

        S::TestCaseSettingDocumentation | S::TestCaseSettingDocumentationText => to(
            T::TestCaseSettingDocumentationText,
            S::TestCaseSettingDocumentationText,
        ),
        S::TestCaseSettingTags | S::TestCaseSettingTagsTagName => {
            to(T::TestCaseSettingTag, S::TestCaseSettingTagsTagName)
        }
        S::TestCaseSettingSetup => to(
            T::TestCaseSettingSetupKeywordName,
            S::TestCaseSettingSetupKeyword,
        ),
        S::TestCaseSettingSetupKeyword | S::TestCaseSettingSetupKeywordArgument => to(
            T::TestCaseSettingSetupKeywordArgument,
            S::TestCaseSettingSetupKeywordArgument,
        ),
        S::TestCaseSettingTeardown => to(
            T::TestCaseSettingTeardownKeywordName,
            S::TestCaseSettingTeardownKeyword,
        ),
        S::TestCaseSettingTeardownKeyword | S::TestCaseSettingTeardownKeywordArgument => to(
            T::TestCaseSettingTeardownKeywordArgument,
            S::TestCaseSettingTeardownKeywordArgument,
        ),
        S::TestCaseSettingTemplate => to(
            T::TestCaseSettingTemplateKeywordName,
            S::TestCaseSettingTemplateKeyword,
        ),
        S::TestCaseSettingTemplateKeyword | S::TestCaseSettingTemplateKeywordUnwantedArguments => {
            unwanted(
                T::TestCaseSettingTemplateKeywordUnwantedArgument,
                S::TestCaseSettingTemplateKeywordUnwantedArguments,
            )
        }
        S::TestCaseSettingTimeout => {
            to(T::TestCaseSettingTimeoutValue, S::TestCaseSettingTimeoutValue)
        }
        S::TestCaseSettingTimeoutValue | S::TestCaseSettingTimeoutMessageArguments => to(
            T::TestCaseSettingTimeoutMessage,
            S::TestCaseSettingTimeoutMessageArguments,
        ),
        S::TestCaseSettingUnknown | S::TestCaseSettingUnknownArguments => to(
            T::TestCaseSettingUnknownArgument,
            S::TestCaseSettingUnknownArguments,
        ),

        S::KeywordSettingDocumentation | S::KeywordSettingDocumentationText => to(
            T::KeywordSettingDocumentationText,
            S::KeywordSettingDocumentationText,
        ),
        S::KeywordSettingTags | S::KeywordSettingTagsTagName => {
            to(T::KeywordSettingTag, S::KeywordSettingTagsTagName)
        }
        S::KeywordSettingArguments | S::KeywordSettingArgumentsArgument => {
            to(T::KeywordSettingArgument, S::KeywordSettingArgumentsArgument)
        }
        S::KeywordSettingReturn | S::KeywordSettingReturnValue => {
            to(T::KeywordSettingReturnValue, S::KeywordSettingReturnValue)
        }
        S::KeywordSettingTeardown => to(
            T::KeywordSettingTeardownKeywordName,
            S::KeywordSettingTeardownKeyword,
        ),
        S::KeywordSettingTeardownKeyword | S::KeywordSettingTeardownKeywordArgument => to(
            T::KeywordSettingTeardownKeywordArgument,
            S::KeywordSettingTeardownKeywordArgument,
        ),
        S::KeywordSettingTimeout => {
            to(T::KeywordSettingTimeoutValue, S::KeywordSettingTimeoutValue)
        }
        S::KeywordSettingTimeoutValue | S::KeywordSettingTimeoutMessageArguments => to(
            T::KeywordSettingTimeoutMessage,
            S::KeywordSettingTimeoutMessageArguments,
        ),
        S::KeywordSettingUnknown | S::KeywordSettingUnknownArguments => to(
            T::KeywordSettingUnknownArgument,
            S::KeywordSettingUnknownArguments,
        ),
        _ => return None,
    };
    Some(transition)
}

/// Arguments, tags, documentation text and the like.
pub struct ValueMapper;

impl ParsingMapper for ValueMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool {
        let Some(state) = ctx.top() else {
            return false;
        };
        let alias_position = matches!(
            state,
            ParsingState::SettingLibraryNameOrPath | ParsingState::SettingLibraryArguments
        );
        value_transition(state).is_some()
            && !(alias_position && token.has_type(RobotTokenType::SettingLibraryAlias))
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        let Some(transition) = ctx.top().and_then(value_transition) else {
            return;
        };
        token.set_type(transition.token_type);
        if let Some(code) = transition.anomaly {
            ctx.record(
                code,
                Severity::Warning,
                &token,
                format!("'{}' is ignored by Robot Framework", token.text()),
            );
        }
        if transition.token_type == RobotTokenType::VariablesDictionaryValue && !token.text().contains('=') {
            ctx.record(
                ErrorCode::E0302,
                Severity::Warning,
                &token,
                format!("dictionary item '{}' has no '='", token.text()),
            );
        }
        ctx.push_value(token);
        ctx.stack.push(transition.next);
    }
}
