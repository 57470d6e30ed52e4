//! Library alias resolution
//!
//! `WITH NAME` (or `AS`) only makes a library alias when exactly one value
//! follows it and nothing comes after that value. While a line is read the
//! marker is kept provisionally in the element's alias slot. Each later cell
//! either confirms the latest pairing or demotes what was collected to plain
//! library arguments:
//!
//! ```text
//! Library  Foo  WITH NAME               marker demoted at end of line
//! Library  Foo  WITH NAME  Bar          alias Bar
//! Library  Foo  WITH NAME  WITH NAME  B first marker demoted, alias B
//! Library  Foo  WITH NAME  a  WITH NAME b   everything demoted
//! Library  Foo  WITH NAME  a  b         everything demoted
//! ```

use tracing::trace;

use super::errors::{ErrorCode, Severity};
use super::mapping::MappingContext;
use super::state::ParsingState;
use super::{RobotToken, RobotTokenType};
use crate::base::RobotVersion;
use crate::model::ImportAlias;

const ALIAS_STATES: [ParsingState; 2] = [
    ParsingState::SettingLibraryImportAlias,
    ParsingState::SettingLibraryImportAliasValue,
];

/// Whether `text` spells an alias marker available in `version`
pub fn is_alias_marker(text: &str, version: &RobotVersion) -> bool {
    RobotTokenType::SettingLibraryAlias
        .representations()
        .iter()
        .any(|repr| repr.text == text && repr.is_available(version))
}

fn as_argument(mut token: RobotToken) -> RobotToken {
    token.set_type(RobotTokenType::SettingLibraryArgument);
    token
}

/// Take the cell following a provisional alias marker.
pub(crate) fn accept_value(ctx: &mut MappingContext, mut token: RobotToken) {
    let version = ctx.version;
    let top = ctx.top();
    let Some(library) = ctx.current_element_mut() else {
        return;
    };
    let Some(alias) = library.alias_mut().take() else {
        return;
    };

    match (top, alias.value) {
        (Some(ParsingState::SettingLibraryImportAlias), None) => {
            token.set_type(RobotTokenType::SettingLibraryAliasValue);
            *library.alias_mut() = Some(ImportAlias {
                declaration: alias.declaration,
                value: Some(token),
            });
            ctx.stack.push(ParsingState::SettingLibraryImportAliasValue);
        }
        (_, Some(mut value)) if is_alias_marker(value.text(), &version) => {
            trace!(line = ?token.line(), "alias value is a marker, moving alias right");
            library.push_value(as_argument(alias.declaration));
            value.set_type(RobotTokenType::SettingLibraryAlias);
            token.set_type(RobotTokenType::SettingLibraryAliasValue);
            *library.alias_mut() = Some(ImportAlias {
                declaration: value,
                value: Some(token),
            });
        }
        (_, value) => {
            trace!(line = ?token.line(), "cells after alias value, demoting alias");
            library.push_value(as_argument(alias.declaration));
            if let Some(value) = value {
                library.push_value(as_argument(value));
            }
            library.push_value(as_argument(token));
            ctx.stack.remove_most_recent(&ALIAS_STATES);
            ctx.stack.push(ParsingState::SettingLibraryArguments);
        }
    }
}

/// Settle a provisional alias when its logical line ends.
///
/// A marker that never got a value becomes a trailing argument.
pub(crate) fn end_of_line(ctx: &mut MappingContext) {
    if !ctx.top().is_some_and(ParsingState::is_library_alias) {
        return;
    }
    let Some(library) = ctx.current_element_mut() else {
        return;
    };
    let demoted = match library.alias_mut().take() {
        Some(ImportAlias {
            declaration,
            value: None,
        }) => declaration,
        complete => {
            *library.alias_mut() = complete;
            return;
        }
    };
    trace!(line = ?demoted.line(), "alias marker without value, demoting");
    library.push_value(as_argument(demoted.clone()));
    ctx.stack.remove_most_recent(&ALIAS_STATES);
    ctx.record(
        ErrorCode::E0203,
        Severity::Warning,
        &demoted,
        format!("'{}' has no alias after it and is passed as an argument", demoted.text()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FilePosition;
    use crate::model::RobotFile;
    use crate::parser::mapping::MAPPERS;
    use crate::parser::{FileFormat, RECOGNIZERS};

    /// Map one settings line cell by cell, then end it
    fn library_line(cells: &[&str]) -> MappingContext {
        let version = RobotVersion::new(3, 0);
        let mut ctx = MappingContext::new(RobotFile::new(version, FileFormat::Txt));
        ctx.stack.push(ParsingState::SettingTableInside);
        let mut column = 0;
        for (idx, text) in cells.iter().enumerate() {
            ctx.first_cell = idx == 0;
            let token = RECOGNIZERS.recognize(text, FilePosition::new(1, column, column), &version);
            MAPPERS.map(&mut ctx, token);
            column += text.len() + 4;
        }
        end_of_line(&mut ctx);
        ctx
    }

    fn arguments(ctx: &MappingContext) -> Vec<String> {
        ctx.file.settings().imports()[0]
            .arguments()
            .iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_alias_with_value() {
        let ctx = library_line(&["Library", "Foo", "WITH NAME", "Bar"]);
        let lib = &ctx.file.settings().imports()[0];
        let alias = lib.alias().unwrap();
        assert_eq!(alias.value.as_ref().unwrap().text(), "Bar");
        assert!(lib.arguments().is_empty());
        assert!(ctx.messages.is_empty());
    }

    #[test]
    fn test_marker_without_value_is_demoted() {
        let ctx = library_line(&["Library", "Foo", "WITH NAME"]);
        let lib = &ctx.file.settings().imports()[0];
        assert!(lib.alias().is_none());
        assert_eq!(arguments(&ctx), vec!["WITH NAME"]);
        assert_eq!(
            lib.arguments()[0].token_type(),
            RobotTokenType::SettingLibraryArgument
        );
        assert!(!ctx.stack.states().iter().any(|s| s.is_library_alias()));
        assert_eq!(ctx.messages[0].code, ErrorCode::E0203);
    }

    #[test]
    fn test_two_aliases_demote_everything() {
        let ctx = library_line(&["Library", "Foo", "WITH NAME", "a", "WITH NAME", "b"]);
        assert!(ctx.file.settings().imports()[0].alias().is_none());
        assert_eq!(arguments(&ctx), vec!["WITH NAME", "a", "WITH NAME", "b"]);
    }

    #[test]
    fn test_nested_marker_moves_alias_right() {
        let ctx = library_line(&["Library", "Foo", "x", "WITH NAME", "WITH NAME", "Bar"]);
        let lib = &ctx.file.settings().imports()[0];
        let alias = lib.alias().unwrap();
        assert_eq!(alias.declaration.token_type(), RobotTokenType::SettingLibraryAlias);
        assert_eq!(alias.value.as_ref().unwrap().text(), "Bar");
        assert_eq!(arguments(&ctx), vec!["x", "WITH NAME"]);
    }

    #[test]
    fn test_cells_after_alias_value_demote() {
        let ctx = library_line(&["Library", "Foo", "WITH NAME", "a", "b"]);
        assert!(ctx.file.settings().imports()[0].alias().is_none());
        assert_eq!(arguments(&ctx), vec!["WITH NAME", "a", "b"]);
    }

    #[test]
    fn test_markers_follow_version() {
        assert!(is_alias_marker("WITH NAME", &RobotVersion::new(3, 0)));
        assert!(!is_alias_marker("AS", &RobotVersion::new(5, 0)));
        assert!(is_alias_marker("AS", &RobotVersion::new(6, 1)));
        assert!(!is_alias_marker("with name", &RobotVersion::new(3, 0)));
    }
}
