//! Token recognizers
//!
//! A recognizer looks at one cell and answers whether its pattern matches.
//! Recognizers are stateless and independent: several of them may claim the
//! same cell, in which case the token carries every claimed type and the
//! mapping layer picks the one that fits the current parsing state.

use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

use super::lexer::{self, VariableKind};
use super::token::RobotToken;
use super::token_type::{Representation, RobotTokenType};
use crate::base::{FilePosition, RobotVersion};

/// A stateless classifier for one token type.
pub trait TokenRecognizer: Send + Sync {
    /// The type this recognizer assigns.
    fn token_type(&self) -> RobotTokenType;

    /// Recognize `text` read at `position`, producing a token of
    /// [`Self::token_type`] when the pattern matches.
    fn recognize(
        &self,
        text: &str,
        position: FilePosition,
        version: &RobotVersion,
    ) -> Option<RobotToken>;
}

/// How a [`Representation`] is turned into a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternStyle {
    /// `Suite Setup`, `suitesetup`, `SUITE SETUP:`
    Setting,
    /// `[Tags]`, `[ tags ]`
    LocalSetting,
    /// `*** Settings ***`, `*Setting`
    TableHeader,
    /// Exact, case-sensitive text (`WITH NAME`, `...`)
    Exact,
}

/// Recognizer built from the representations of a token type.
pub struct PatternRecognizer {
    token_type: RobotTokenType,
    patterns: Vec<(Regex, Representation)>,
}

impl PatternRecognizer {
    fn new(token_type: RobotTokenType, style: PatternStyle) -> Self {
        let patterns = token_type
            .representations()
            .iter()
            .map(|repr| (build_pattern(repr.text, style), *repr))
            .collect();
        Self {
            token_type,
            patterns,
        }
    }
}

impl TokenRecognizer for PatternRecognizer {
    fn token_type(&self) -> RobotTokenType {
        self.token_type
    }

    fn recognize(
        &self,
        text: &str,
        position: FilePosition,
        version: &RobotVersion,
    ) -> Option<RobotToken> {
        let (_, repr) = self
            .patterns
            .iter()
            .find(|(regex, repr)| repr.is_available(version) && regex.is_match(text))?;

        let mut token = RobotToken::positioned(text, position);
        token.set_type(self.token_type);
        if repr.is_deprecated(version) {
            token.add_type(RobotTokenType::Deprecated);
        }
        Some(token)
    }
}

fn build_pattern(text: &str, style: PatternStyle) -> Regex {
    let words = |t: &str| {
        t.split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(" ?")
    };
    let pattern = match style {
        PatternStyle::Setting => format!(r"(?i)^{}\s*:?$", words(text)),
        PatternStyle::LocalSetting => {
            let inner = text.trim_start_matches('[').trim_end_matches(']');
            format!(r"(?i)^\[\s*{}\s*\]$", words(inner))
        }
        PatternStyle::TableHeader => format!(r"(?i)^\*+\s*{}\s*\**$", words(text)),
        PatternStyle::Exact => format!("^{}$", regex::escape(text)),
    };
    Regex::new(&pattern).expect("escaped representation is a valid regex")
}

/// Recognizes `${scalar}`, `@{list}` and `&{dict}` declarations
pub struct VariableDeclarationRecognizer {
    kind: VariableKind,
}

impl TokenRecognizer for VariableDeclarationRecognizer {
    fn token_type(&self) -> RobotTokenType {
        match self.kind {
            VariableKind::List => RobotTokenType::VariablesListDeclaration,
            VariableKind::Dictionary => RobotTokenType::VariablesDictionaryDeclaration,
            _ => RobotTokenType::VariablesScalarDeclaration,
        }
    }

    fn recognize(
        &self,
        text: &str,
        position: FilePosition,
        version: &RobotVersion,
    ) -> Option<RobotToken> {
        if lexer::declared_variable(text) != Some(self.kind) {
            return None;
        }
        let available = self
            .token_type()
            .representations()
            .iter()
            .all(|repr| repr.is_available(version));
        if !available {
            return None;
        }
        let mut token = RobotToken::positioned(text, position);
        token.set_type(self.token_type());
        Some(token)
    }
}

/// Recognizes comment starts: any cell whose text begins with `#`
pub struct CommentRecognizer;

impl TokenRecognizer for CommentRecognizer {
    fn token_type(&self) -> RobotTokenType {
        RobotTokenType::StartHashComment
    }

    fn recognize(&self, text: &str, position: FilePosition, _: &RobotVersion) -> Option<RobotToken> {
        text.starts_with('#').then(|| {
            let mut token = RobotToken::positioned(text, position);
            token.set_type(RobotTokenType::StartHashComment);
            token
        })
    }
}

static LOCAL_SETTING_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[.*\]$").expect("valid local setting regex"));

/// Whether the cell looks like a `[..]` local setting.
pub fn is_local_setting_shaped(text: &str) -> bool {
    LOCAL_SETTING_SHAPE.is_match(text)
}

/// Whether the cell starts a table header.
pub fn is_table_header_shaped(text: &str) -> bool {
    text.starts_with('*')
}

/// The full recognizer set, in priority order.
pub struct Recognizers {
    recognizers: Vec<Box<dyn TokenRecognizer>>,
}

impl Recognizers {
    fn new() -> Self {
        use PatternStyle::*;
        use RobotTokenType::*;

        let mut recognizers: Vec<Box<dyn TokenRecognizer>> = Vec::new();
        let mut add = |token_type, style| {
            recognizers.push(Box::new(PatternRecognizer::new(token_type, style)));
        };

        for header in [
            SettingsTableHeader,
            VariablesTableHeader,
            TestCasesTableHeader,
            TasksTableHeader,
            KeywordsTableHeader,
            CommentsTableHeader,
        ] {
            add(header, TableHeader);
        }

        for setting in [
            SettingLibraryDeclaration,
            SettingVariablesDeclaration,
            SettingResourceDeclaration,
            SettingDocumentationDeclaration,
            SettingMetadataDeclaration,
            SettingSuiteSetupDeclaration,
            SettingSuiteTeardownDeclaration,
            SettingForceTagsDeclaration,
            SettingDefaultTagsDeclaration,
            SettingTestSetupDeclaration,
            SettingTestTeardownDeclaration,
            SettingTestTemplateDeclaration,
            SettingTestTimeoutDeclaration,
        ] {
            add(setting, Setting);
        }

        for local in [
            TestCaseSettingDocumentation,
            TestCaseSettingTagsDeclaration,
            TestCaseSettingSetup,
            TestCaseSettingTeardown,
            TestCaseSettingTemplate,
            TestCaseSettingTimeout,
            KeywordSettingDocumentation,
            KeywordSettingTags,
            KeywordSettingArguments,
            KeywordSettingReturn,
            KeywordSettingTeardown,
            KeywordSettingTimeout,
        ] {
            add(local, LocalSetting);
        }

        add(SettingLibraryAlias, Exact);
        add(PreviousLineContinue, Exact);
        add(EmptyCell, Exact);

        recognizers.push(Box::new(CommentRecognizer));
        for kind in [
            VariableKind::Scalar,
            VariableKind::List,
            VariableKind::Dictionary,
        ] {
            recognizers.push(Box::new(VariableDeclarationRecognizer { kind }));
        }

        Self { recognizers }
    }

    /// Build the token for one cell with every type claimed by a recognizer,
    /// or [`RobotTokenType::Unknown`] when nothing matched.
    pub fn recognize(
        &self,
        text: &str,
        position: FilePosition,
        version: &RobotVersion,
    ) -> RobotToken {
        let mut token = RobotToken::positioned(SmolStr::new(text), position);
        for recognizer in &self.recognizers {
            if let Some(found) = recognizer.recognize(text, position, version) {
                for token_type in found.types() {
                    token.add_type(*token_type);
                }
            }
        }
        token
    }
}

/// The shared recognizer set.
pub static RECOGNIZERS: Lazy<Recognizers> = Lazy::new(Recognizers::new);
