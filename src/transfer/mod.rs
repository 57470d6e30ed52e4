//! Versioned transfer form of model elements.
//!
//! Used to move elements between files or tables (copy/paste, drag and
//! drop). Positions are never transferred: a decoded element is new to the
//! file it is inserted into and is written out when the file is dumped.
//!
//! ```json
//! {
//!   "formatVersion": 1,
//!   "modelType": "LibraryImport",
//!   "declaration": { "text": "Library", "types": ["SettingLibraryDeclaration"] },
//!   "values": [{ "text": "Collections", "types": ["SettingLibraryName"] }]
//! }
//! ```

mod error;

pub use error::TransferError;

use serde::{Deserialize, Serialize};

use crate::model::{ImportAlias, ModelElement, ModelType};
use crate::parser::{RobotToken, RobotTokenType};

/// Version written by [`ElementTransfer::from_element`].
pub const FORMAT_VERSION: u32 = 1;

/// Text and types of one token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<RobotTokenType>,
}

impl TokenTransfer {
    fn from_token(token: &RobotToken) -> Self {
        Self {
            text: token.text().to_string(),
            types: token.types().to_vec(),
        }
    }

    fn into_token(self) -> RobotToken {
        let mut types = self.types.into_iter();
        let mut token = RobotToken::create(self.text, types.next().unwrap_or(RobotTokenType::Unknown));
        for extra in types {
            token.add_type(extra);
        }
        token
    }
}

/// Library alias of a transferred import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AliasTransfer {
    pub declaration: TokenTransfer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<TokenTransfer>,
}

/// One model element in transfer form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementTransfer {
    #[serde(rename = "formatVersion")]
    pub format_version: u32,
    #[serde(rename = "modelType")]
    pub model_type: ModelType,
    pub declaration: TokenTransfer,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<TokenTransfer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<TokenTransfer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<AliasTransfer>,
}

impl ElementTransfer {
    pub fn from_element(element: &ModelElement) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model_type: element.model_type(),
            declaration: TokenTransfer::from_token(element.declaration()),
            values: element.values().iter().map(TokenTransfer::from_token).collect(),
            comments: element.comments().iter().map(TokenTransfer::from_token).collect(),
            alias: element.alias().map(|alias| AliasTransfer {
                declaration: TokenTransfer::from_token(&alias.declaration),
                value: alias.value.as_ref().map(TokenTransfer::from_token),
            }),
        }
    }

    /// Rebuild the element without any file position.
    pub fn into_element(self) -> Result<ModelElement, TransferError> {
        if self.format_version != FORMAT_VERSION {
            return Err(TransferError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        let alias = self.alias.map(|alias| ImportAlias {
            declaration: alias.declaration.into_token(),
            value: alias.value.map(TokenTransfer::into_token),
        });
        Ok(ModelElement::from_parts(
            self.model_type,
            self.declaration.into_token(),
            self.values.into_iter().map(TokenTransfer::into_token).collect(),
            alias,
            self.comments.into_iter().map(TokenTransfer::into_token).collect(),
        ))
    }

    pub fn to_json(&self) -> Result<String, TransferError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TransferError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Encode `elements` for the clipboard.
pub fn encode(elements: &[&ModelElement]) -> Result<String, TransferError> {
    let payload: Vec<ElementTransfer> = elements.iter().map(|e| ElementTransfer::from_element(e)).collect();
    Ok(serde_json::to_string(&payload)?)
}

/// Decode elements written by [`encode`].
pub fn decode(json: &str) -> Result<Vec<ModelElement>, TransferError> {
    let payload: Vec<ElementTransfer> = serde_json::from_str(json)?;
    payload.into_iter().map(ElementTransfer::into_element).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParserConfig};

    const SUITE: &str = "*** Settings ***\nLibrary    Foo    a    WITH NAME    Bar    # note\n";

    #[test]
    fn test_decoded_element_has_no_position() {
        let output = parse(SUITE, &ParserConfig::default());
        let library = &output.file().settings().imports()[0];
        let json = ElementTransfer::from_element(library).to_json().unwrap();
        let decoded = ElementTransfer::from_json(&json).unwrap().into_element().unwrap();

        assert!(!decoded.is_positioned());
        assert!(decoded.is_modified());
        assert_eq!(decoded.model_type(), ModelType::LibraryImport);
        assert_eq!(decoded.name().unwrap().text(), "Foo");
        assert_eq!(decoded.arguments()[0].text(), "a");
        assert_eq!(decoded.alias().unwrap().value.as_ref().unwrap().text(), "Bar");
        assert_eq!(decoded.comment_text(), "# note");
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let output = parse(SUITE, &ParserConfig::default());
        let mut transfer = ElementTransfer::from_element(&output.file().settings().imports()[0]);
        transfer.format_version = 7;
        let json = transfer.to_json().unwrap();
        let err = ElementTransfer::from_json(&json).unwrap().into_element().unwrap_err();
        assert!(matches!(err, TransferError::UnsupportedVersion { found: 7, .. }));
    }

    #[test]
    fn test_bundle_round_trip() {
        let output = parse("*** Test Cases ***\nT\n    [Tags]    a\n    Log    x\n", &ParserConfig::default());
        let holder = &output.file().test_cases().holders()[0];
        let body: Vec<&ModelElement> = holder.body().iter().collect();
        let decoded = decode(&encode(&body).unwrap()).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].keyword_call().unwrap().text(), "Log");
        assert!(matches!(decode("{"), Err(TransferError::Json(_))));
    }
}
