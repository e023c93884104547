//! Completion target extraction.
//!
//! This module contains the logic for pulling the token in front of the
//! caret out of the current line and deciding what kind of completion it
//! asks for: a qualified function name (`geo::dis`) or a field-access
//! chain (`route->from->`).

/// Qualified-name separator.
pub const QUALIFIED_SEPARATOR: &str = "::";

/// Field-access operator.
pub const FIELD_ACCESS: &str = "->";

/// A variable followed by the field names accessed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessChain {
    /// The variable at the root of the chain (e.g. `"route"`).
    pub variable: String,
    /// Field names after the variable; the last one is the partial name
    /// being typed and may be empty.
    pub fields: Vec<String>,
}

impl AccessChain {
    /// Split a token on `->`, trimming each element and dropping any
    /// `[index]` or `{key}` subscript suffix.
    pub fn parse(token: &str) -> Self {
        let mut elements = token.split(FIELD_ACCESS).map(trim_chain_element);
        let variable = elements.next().unwrap_or_default();
        AccessChain {
            variable,
            fields: elements.collect(),
        }
    }
}

fn trim_chain_element(element: &str) -> String {
    let element = element.trim();
    let end = element.find(['[', '{']).unwrap_or(element.len());
    element[..end].to_string()
}

/// What the token before the caret asks to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionTarget {
    /// `module::prefix`, with any leading `@` type marker removed.
    QualifiedName(String),
    /// `var->field->...`.
    FieldChain(AccessChain),
}

/// Convert an LSP column (UTF-16 code units) into a character count.
///
/// A column that lands inside a surrogate pair counts the whole
/// character; a column past the end of the line is clamped.
pub fn utf16_to_char_column(line: &str, utf16_column: usize) -> usize {
    let mut units = 0;
    let mut chars = 0;
    for ch in line.chars() {
        if units >= utf16_column {
            break;
        }
        units += ch.len_utf16();
        chars += 1;
    }
    chars
}

/// Extract the token immediately before the caret.
///
/// `column` counts characters, not bytes.  The token is the last
/// whitespace-separated word before the caret, cut after its last `(` so
/// that `geo::dist(route->` yields `route->`.
pub fn extract_last_token(line: &str, column: usize) -> String {
    let before: String = line.chars().take(column).collect();
    let word = before.split(char::is_whitespace).next_back().unwrap_or_default();
    let token = word.rsplit('(').next().unwrap_or_default();
    token.trim().to_string()
}

/// Classify a token, returning `None` when it asks for nothing.
pub fn classify_token(token: &str) -> Option<CompletionTarget> {
    if token.contains(QUALIFIED_SEPARATOR) {
        Some(CompletionTarget::QualifiedName(
            token.trim_start_matches('@').to_string(),
        ))
    } else if token.contains(FIELD_ACCESS) {
        Some(CompletionTarget::FieldChain(AccessChain::parse(token)))
    } else {
        None
    }
}
