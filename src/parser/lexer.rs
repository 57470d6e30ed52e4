//! Logos-based lexer for variable usages inside cells
//!
//! Finds `${scalar}`, `@{list}`, `&{dict}` and `%{env}` usages, honouring
//! backslash escapes and nested braces (`${a${b}}`).

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Kind of variable, from its identifier character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Scalar,
    List,
    Dictionary,
    Environment,
}

impl VariableKind {
    pub fn identifier(self) -> char {
        match self {
            Self::Scalar => '$',
            Self::List => '@',
            Self::Dictionary => '&',
            Self::Environment => '%',
        }
    }
}

/// A variable usage found in a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableUse<'a> {
    pub kind: VariableKind,
    /// Full text including identifier and braces
    pub text: &'a str,
    /// Name between the braces
    pub name: &'a str,
    pub range: TextRange,
}

/// Logos token enum for the variable lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[token("${")]
    ScalarStart,
    #[token("@{")]
    ListStart,
    #[token("&{")]
    DictStart,
    #[token("%{")]
    EnvStart,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[regex(r"\\.", allow_greedy = true)]
    Escaped,
    #[regex(r"[^$@&%{}\\]+")]
    Text,
    #[regex(r"[$@&%\\]")]
    Lone,
}

/// Collect the outermost variable usages of `text`.
pub fn find_variable_usages(text: &str) -> Vec<VariableUse<'_>> {
    let mut lexer = LogosToken::lexer(text);
    let mut usages = Vec::new();
    // (kind, start offset) of the usage being read and its brace depth
    let mut open: Option<(VariableKind, usize)> = None;
    let mut depth = 0usize;

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let Ok(token) = token else {
            continue;
        };
        let start_kind = match token {
            LogosToken::ScalarStart => Some(VariableKind::Scalar),
            LogosToken::ListStart => Some(VariableKind::List),
            LogosToken::DictStart => Some(VariableKind::Dictionary),
            LogosToken::EnvStart => Some(VariableKind::Environment),
            _ => None,
        };

        match (open, start_kind, token) {
            (None, Some(kind), _) => {
                open = Some((kind, span.start));
                depth = 1;
            }
            (Some(_), Some(_), _) | (Some(_), None, LogosToken::OpenBrace) => depth += 1,
            (Some((kind, start)), None, LogosToken::CloseBrace) => {
                depth -= 1;
                if depth == 0 {
                    let end = span.end;
                    usages.push(VariableUse {
                        kind,
                        text: &text[start..end],
                        name: &text[start + 2..end - 1],
                        range: TextRange::new(
                            TextSize::new(start as u32),
                            TextSize::new(end as u32),
                        ),
                    });
                    open = None;
                }
            }
            _ => {}
        }
    }

    usages
}

/// Whether the cell contains at least one variable usage
pub fn contains_variable(text: &str) -> bool {
    !find_variable_usages(text).is_empty()
}

/// If the whole cell is one variable (optionally followed by `=`), its kind.
///
/// Used to classify declarations in the variables table and assignments in
/// executable rows.
pub fn declared_variable(text: &str) -> Option<VariableKind> {
    let trimmed = text.trim_end();
    let body = trimmed
        .strip_suffix('=')
        .map(str::trim_end)
        .unwrap_or(trimmed);
    let usages = find_variable_usages(body);
    match usages.as_slice() {
        [single] if single.text.len() == body.len() && !single.name.is_empty() => Some(single.kind),
        _ => None,
    }
}
