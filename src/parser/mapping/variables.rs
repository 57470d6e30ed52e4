//! Variables table mapper

use super::{declaration_state, MappingContext, ParsingMapper};
use crate::model::{ElementRef, ModelElement, ModelType};
use crate::parser::errors::{ErrorCode, Severity};
use crate::parser::state::ParsingState;
use crate::parser::{RobotToken, RobotTokenType};

/// First cell of a variables line: `${scalar}`, `@{list}`, `&{dict}`.
///
/// Anything else, including `&{dict}` before dictionaries existed, is kept
/// as an unknown variable.
pub struct VariableDeclarationMapper;

impl ParsingMapper for VariableDeclarationMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, _: &RobotToken) -> bool {
        ctx.top() == Some(ParsingState::VariableTableInside)
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        let (model_type, token_type) = if token.has_type(RobotTokenType::VariablesScalarDeclaration) {
            (ModelType::ScalarVariable, RobotTokenType::VariablesScalarDeclaration)
        } else if token.has_type(RobotTokenType::VariablesListDeclaration) {
            (ModelType::ListVariable, RobotTokenType::VariablesListDeclaration)
        } else if token.has_type(RobotTokenType::VariablesDictionaryDeclaration) {
            (ModelType::DictionaryVariable, RobotTokenType::VariablesDictionaryDeclaration)
        } else {
            ctx.record(
                ErrorCode::E0301,
                Severity::Error,
                &token,
                format!("'{}' is not a valid variable declaration", token.text()),
            );
            (ModelType::UnknownVariable, RobotTokenType::VariablesUnknownDeclaration)
        };
        token.set_type(token_type);
        let idx = ctx
            .file
            .variables_mut()
            .push_variable(ModelElement::new(model_type, token));
        ctx.current = Some(ElementRef::Variable(idx));
        ctx.stack.push(declaration_state(model_type));
    }
}
