//! Settings table mappers

use super::{declaration_state, MappingContext, ParsingMapper};
use crate::model::{ElementRef, ImportAlias, ModelElement, ModelType, SettingKind};
use crate::parser::alias_fixer;
use crate::parser::errors::{ErrorCode, Severity};
use crate::parser::state::ParsingState;
use crate::parser::{RobotToken, RobotTokenType};

fn setting_declaration(token: &RobotToken) -> Option<RobotTokenType> {
    token
        .types()
        .iter()
        .copied()
        .find(|t| t.is_setting_declaration())
}

/// `Library`, `Force Tags`, `Suite Setup`, ... at the start of a line.
pub struct SettingDeclarationMapper;

impl ParsingMapper for SettingDeclarationMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool {
        ctx.top() == Some(ParsingState::SettingTableInside) && setting_declaration(token).is_some()
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        let Some(declaration) = setting_declaration(&token) else {
            return;
        };
        let Some(model_type) = ModelType::for_setting_declaration(declaration) else {
            return;
        };
        token.set_type(declaration);

        let element = ModelElement::new(model_type, token);
        let settings = ctx.file.settings_mut();
        let at = if model_type.is_import() {
            ElementRef::Import(settings.push_import(element))
        } else if model_type == ModelType::Metadata {
            ElementRef::Metadata(settings.push_metadata(element))
        } else if let Some(kind) = SettingKind::from_model_type(model_type) {
            let group = settings.group_mut(kind);
            group.push(element);
            ElementRef::Grouped(kind, group.len() - 1)
        } else {
            return;
        };
        ctx.current = Some(at);
        ctx.stack.push(declaration_state(model_type));
    }
}

/// Any other first cell of a settings line.
pub struct UnknownSettingMapper;

impl ParsingMapper for UnknownSettingMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool {
        ctx.top() == Some(ParsingState::SettingTableInside) && setting_declaration(token).is_none()
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        ctx.record(
            ErrorCode::E0201,
            Severity::Warning,
            &token,
            format!("unknown setting '{}'", token.text()),
        );
        token.set_type(RobotTokenType::SettingUnknownDeclaration);
        let element = ModelElement::new(ModelType::SettingsUnknown, token);
        let idx = ctx.file.settings_mut().push_unknown(element);
        ctx.current = Some(ElementRef::UnknownSetting(idx));
        ctx.stack.push(ParsingState::SettingUnknown);
    }
}

/// `WITH NAME` / `AS` after a library name or its arguments.
///
/// The marker is only provisional; [`alias_fixer`] decides once the next
/// cell or the end of the line is seen.
pub struct LibraryAliasDeclarationMapper;

impl ParsingMapper for LibraryAliasDeclarationMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, token: &RobotToken) -> bool {
        matches!(
            ctx.top(),
            Some(ParsingState::SettingLibraryNameOrPath | ParsingState::SettingLibraryArguments)
        ) && token.has_type(RobotTokenType::SettingLibraryAlias)
    }

    fn map(&self, ctx: &mut MappingContext, mut token: RobotToken) {
        token.set_type(RobotTokenType::SettingLibraryAlias);
        match ctx.current_element_mut() {
            Some(library) => {
                *library.alias_mut() = Some(ImportAlias {
                    declaration: token,
                    value: None,
                });
                ctx.stack.push(ParsingState::SettingLibraryImportAlias);
            }
            None => ctx.record(
                ErrorCode::E0999,
                Severity::Error,
                &token,
                "library alias without a library",
            ),
        }
    }
}

/// Any cell after a provisional library alias.
pub struct LibraryAliasValueMapper;

impl ParsingMapper for LibraryAliasValueMapper {
    fn check_if_can_be_mapped(&self, ctx: &MappingContext, _: &RobotToken) -> bool {
        ctx.top().is_some_and(ParsingState::is_library_alias)
    }

    fn map(&self, ctx: &mut MappingContext, token: RobotToken) {
        alias_fixer::accept_value(ctx, token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FilePosition, RobotVersion};
    use crate::model::RobotFile;
    use crate::parser::{FileFormat, RECOGNIZERS};

    fn settings_context() -> MappingContext {
        let mut ctx = MappingContext::new(RobotFile::new(RobotVersion::new(2, 9), FileFormat::Txt));
        ctx.stack.push(ParsingState::SettingTableInside);
        ctx
    }

    fn token(ctx: &MappingContext, text: &str) -> RobotToken {
        RECOGNIZERS.recognize(text, FilePosition::new(1, 0, 0), &ctx.version)
    }

    #[test]
    fn test_repeated_setting_goes_to_its_group() {
        let mut ctx = settings_context();
        for _ in 0..2 {
            ctx.stack.reset_to_line_start(false);
            let t = token(&ctx, "Force Tags");
            assert!(SettingDeclarationMapper.check_if_can_be_mapped(&ctx, &t));
            SettingDeclarationMapper.map(&mut ctx, t);
        }
        assert_eq!(ctx.file.settings().force_tags().len(), 2);
        assert_eq!(ctx.current, Some(ElementRef::Grouped(SettingKind::ForceTags, 1)));
        assert_eq!(ctx.top(), Some(ParsingState::SettingForceTags));
    }

    #[test]
    fn test_unknown_setting_is_kept() {
        let mut ctx = settings_context();
        let t = token(&ctx, "Sutie Setup");
        assert!(!SettingDeclarationMapper.check_if_can_be_mapped(&ctx, &t));
        assert!(UnknownSettingMapper.check_if_can_be_mapped(&ctx, &t));
        UnknownSettingMapper.map(&mut ctx, t);
        assert_eq!(ctx.file.settings().unknown_settings().len(), 1);
        assert_eq!(ctx.messages[0].code, ErrorCode::E0201);
    }

    #[test]
    fn test_alias_marker_only_after_library_name() {
        let mut ctx = settings_context();
        let marker = token(&ctx, "WITH NAME");
        assert!(!LibraryAliasDeclarationMapper.check_if_can_be_mapped(&ctx, &marker));
        ctx.stack.push(ParsingState::SettingLibraryImport);
        assert!(!LibraryAliasDeclarationMapper.check_if_can_be_mapped(&ctx, &marker));
        ctx.stack.push(ParsingState::SettingLibraryNameOrPath);
        assert!(LibraryAliasDeclarationMapper.check_if_can_be_mapped(&ctx, &marker));
    }
}
