//! Test case, task and keyword mappers

use super::{declaration_state, MappingContext, ParsingMapper};
use crate::model::{CodeHolder, CodeKind, ElementRef, ModelElement, ModelType};
use crate::parser::errors::{ErrorCode, Severity};
use crate::parser::recognizer::is_local_setting_shaped;
use crate::parser::state::ParsingState;
use crate::parser::{RobotToken, RobotTokenType};

fn at_holder_declaration(ctx: &MappingContext) -> bool {
    ctx.top().is_some_and(ParsingState::is_holder_declaration)
}

/// Local setting type claimed by `token` that `kind` accepts
fn local_setting(kind: CodeKind, token: &RobotToken) -> Option<(RobotTokenType, ModelType)> {
    token
        .types()
        .iter()
        .find_map(|t| kind.local_setting(*t).map(|model_type| (*t, model_type)))
}

fn push_body(ctx: &mut MappingContext, element: ModelElement) {
    let Some((kind, holder)) = ctx.holder else {
        return;
    };
    let model_type = element.model_type();
    let Some(body) = ctx
        .file
        .code_table_mut(kind)
        .holders_mut()
        .get_mut(holder)
        .map(|h| h.push_body(element))
    else {
        return;
    };
    ctx.current = Some(ElementRef::HolderBody(kind, holder, body));
    ctx.stack.push(declaration_state(model_type));
}

/// Non-indented first cell: the name of a new test case, task or keyword.
pub struct CodeHolderNameMapper;

impl ParsingMapper for CodeHolderNameMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, _: &RobotToken) -> bool {
        ctx.code_kind().is_some()
            && ctx.top().is_some_and(ParsingState::is_table_inside)
            && ctx.first_cell
            && !ctx.indented
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        let Some(kind) = ctx.code_kind() else {
            return;
        };
        let holder_type = kind.holder_type();
        token.set_type(match kind {
            CodeKind::Keywords => RobotTokenType::KeywordName,
            CodeKind::TestCases | CodeKind::Tasks => RobotTokenType::TestCaseName,
        });
        let holder = CodeHolder::new(kind, ModelElement::new(holder_type, token));
        let idx = ctx.file.code_table_mut(kind).push_holder(holder);
        ctx.holder = Some((kind, idx));
        ctx.current = Some(ElementRef::HolderName(kind, idx));
        ctx.stack.push(declaration_state(holder_type));
    }
}

/// `[Tags]`, `[Arguments]`, ... allowed in the current kind of table.
pub struct LocalSettingDeclarationMapper;

impl ParsingMapper for LocalSettingDeclarationMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool {
        at_holder_declaration(ctx)
            && ctx
                .code_kind()
                .is_some_and(|kind| local_setting(kind, token).is_some())
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        let Some((token_type, model_type)) = ctx.code_kind().and_then(|kind| local_setting(kind, &token)) else {
            return;
        };
        token.set_type(token_type);
        push_body(ctx, ModelElement::new(model_type, token));
    }
}

/// A `[..]` cell that is not a setting of the current kind of table.
pub struct UnknownLocalSettingMapper;

impl ParsingMapper for UnknownLocalSettingMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool {
        at_holder_declaration(ctx)
            && is_local_setting_shaped(token.text())
            && ctx
                .code_kind()
                .is_some_and(|kind| local_setting(kind, token).is_none())
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        let Some(kind) = ctx.code_kind() else {
            return;
        };
        ctx.record(
            ErrorCode::E0401,
            Severity::Warning,
            &token,
            format!("unknown setting '{}'", token.text()),
        );
        token.set_type(match kind {
            CodeKind::Keywords => RobotTokenType::KeywordSettingUnknownDeclaration,
            CodeKind::TestCases | CodeKind::Tasks => RobotTokenType::TestCaseSettingUnknownDeclaration,
        });
        push_body(ctx, ModelElement::new(kind.unknown_setting_type(), token));
    }
}

/// Steps: assignments, the keyword call and its arguments.
pub struct ExecutableRowMapper;

impl ParsingMapper for ExecutableRowMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool {
        let continues_row = matches!(
            ctx.top(),
            Some(
                ParsingState::TestCaseInsideActions
                    | ParsingState::TestCaseInsideActionsArguments
                    | ParsingState::KeywordInsideActions
                    | ParsingState::KeywordInsideActionsArguments
            )
        );
        continues_row || (at_holder_declaration(ctx) && !is_local_setting_shaped(token.text()))
    }

    fn map(&self, ctx: &mut MappingContext, token: RobotToken) {
        if at_holder_declaration(ctx) {
            let Some(kind) = ctx.code_kind() else {
                return;
            };
            let mut row = ModelElement::new(kind.row_type(), token);
            row.retype_row();
            push_body(ctx, row);
            return;
        }
        if let Some(row) = ctx.current_element_mut() {
            row.push_value(token);
            row.retype_row();
        }
        let next = match ctx.top() {
            Some(ParsingState::KeywordInsideActions | ParsingState::KeywordInsideActionsArguments) => {
                ParsingState::KeywordInsideActionsArguments
            }
            _ => ParsingState::TestCaseInsideActionsArguments,
        };
        ctx.stack.push(next);
    }
}
