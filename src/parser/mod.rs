/// Lexical extraction of nianiolang declarations.
///
/// There is no nianiolang grammar here.  Declarations are located with
/// regular expressions over the raw module text and their bodies are sliced
/// out with the delimiter matcher.  The submodules cover the two shapes the
/// completion engine needs:
///
/// - **records**: splitting a `ptd::rec({...})` definition into fields
/// - **functions**: listing `def module::name` declarations by prefix
///
/// This module itself resolves a qualified type name to its normalized
/// type definition text.
pub mod functions;
pub mod records;

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::delimiter::find_matching_close;
use crate::module_locator::read_module;
use crate::types::{ResolveContext, ResolveError};

pub const SCALAR_PREFIX: &str = "ptd::sim";
pub const RECORD_PREFIX: &str = "ptd::rec";
pub const ARRAY_PREFIX: &str = "ptd::arr";
pub const HASH_PREFIX: &str = "ptd::hash";

/// `return` as a standalone keyword; identifiers containing it survive.
static RETURN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\b").expect("valid regex"));

/// The four structural forms a type definition can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeForm {
    Scalar,
    Record,
    Array,
    Hash,
}

impl TypeForm {
    /// Classify normalized type definition text by its prefix.
    pub fn classify(type_def: &str) -> Option<TypeForm> {
        if type_def.starts_with(SCALAR_PREFIX) {
            Some(TypeForm::Scalar)
        } else if type_def.starts_with(RECORD_PREFIX) {
            Some(TypeForm::Record)
        } else if type_def.starts_with(ARRAY_PREFIX) {
            Some(TypeForm::Array)
        } else if type_def.starts_with(HASH_PREFIX) {
            Some(TypeForm::Hash)
        } else {
            None
        }
    }
}

/// Split `module::name` (or `module::priv::name`) into its module part.
pub(crate) fn module_of(qualified: &str) -> &str {
    qualified.split(':').next().unwrap_or_default()
}

/// Build a regex matching the start of `def <name>` up to and including the
/// first `{` after it.
fn declaration_regex(name: &str) -> Result<Regex, ResolveError> {
    let pattern = format!(r"def\s+{}\b[^{{]*\{{", regex::escape(name));
    Regex::new(&pattern).map_err(|_| ResolveError::DeclarationNotFound {
        name: name.to_string(),
    })
}

/// Resolve a qualified function or type name to its type definition text.
///
/// The module file is located and read, line breaks are removed, and the
/// block following `def <name>` is sliced out.  The `return` keyword and
/// all whitespace are dropped and the outer braces are trimmed, leaving
/// something like `ptd::rec({x=>ptd::sim(),y=>ptd::sim()});`.
pub fn resolve_type_definition(
    ctx: &ResolveContext,
    qualified: &str,
) -> Result<String, ResolveError> {
    let source = read_module(ctx, module_of(qualified))?;
    extract_type_definition(&source, qualified)
}

/// The text-only half of [`resolve_type_definition`].
pub fn extract_type_definition(source: &str, qualified: &str) -> Result<String, ResolveError> {
    let flattened = source.replace(['\n', '\r'], "");
    let declaration = declaration_regex(qualified)?;

    let Some(found) = declaration.find(&flattened) else {
        return Err(ResolveError::DeclarationNotFound {
            name: qualified.to_string(),
        });
    };

    let open = found.end() - 1;
    let close = find_matching_close(&flattened, open)?;
    let block = &flattened[open..=close];

    let without_return = RETURN_KEYWORD.replace_all(block, "");
    let compact: String = without_return
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let type_def = compact.trim_start_matches('{').trim_end_matches('}');
    trace!(name = qualified, type_def, "resolved type definition");
    Ok(type_def.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEO: &str = concat!(
        "def geo::Point() {\n",
        "    return ptd::rec({\n",
        "        x => ptd::sim(),\n",
        "        y => ptd::sim(),\n",
        "    });\n",
        "}\n",
        "\n",
        "def geo::PointList() {\n",
        "\treturn ptd::arr(@geo::Point);\n",
        "}\n",
    );

    #[test]
    fn test_classify_forms() {
        assert_eq!(TypeForm::classify("ptd::sim()"), Some(TypeForm::Scalar));
        assert_eq!(TypeForm::classify("ptd::rec({})"), Some(TypeForm::Record));
        assert_eq!(TypeForm::classify("ptd::arr(ptd::sim())"), Some(TypeForm::Array));
        assert_eq!(TypeForm::classify("ptd::hash(ptd::sim())"), Some(TypeForm::Hash));
        assert_eq!(TypeForm::classify("ptd::var({})"), None);
        assert_eq!(TypeForm::classify(""), None);
    }

    #[test]
    fn test_extract_record_definition() {
        let def = extract_type_definition(GEO, "geo::Point").unwrap();
        assert_eq!(def, "ptd::rec({x=>ptd::sim(),y=>ptd::sim(),});");
    }

    #[test]
    fn test_name_is_word_bounded() {
        let def = extract_type_definition(GEO, "geo::PointList").unwrap();
        assert_eq!(def, "ptd::arr(@geo::Point);");

        let source = "def geo::PointList() { return ptd::sim(); }";
        assert!(matches!(
            extract_type_definition(source, "geo::Point"),
            Err(ResolveError::DeclarationNotFound { .. })
        ));
    }

    #[test]
    fn test_return_inside_identifier_survives() {
        let source = "def m::T() { return ptd::rec({returned => ptd::sim()}); }";
        let def = extract_type_definition(source, "m::T").unwrap();
        assert_eq!(def, "ptd::rec({returned=>ptd::sim()});");
    }

    #[test]
    fn test_missing_declaration() {
        let err = extract_type_definition(GEO, "geo::Line").unwrap_err();
        assert!(matches!(err, ResolveError::DeclarationNotFound { ref name } if name == "geo::Line"));
    }

    #[test]
    fn test_unbalanced_block() {
        let source = "def m::T() { return ptd::rec({a => ptd::sim()});";
        assert!(matches!(
            extract_type_definition(source, "m::T"),
            Err(ResolveError::UnbalancedDelimiters { .. })
        ));
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "def m::T()\r\n{\r\n  return ptd::sim();\r\n}\r\n";
        assert_eq!(extract_type_definition(source, "m::T").unwrap(), "ptd::sim();");
    }

    #[test]
    fn test_idempotent() {
        let first = extract_type_definition(GEO, "geo::Point").unwrap();
        let second = extract_type_definition(GEO, "geo::Point").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_module_of() {
        assert_eq!(module_of("geo::Point"), "geo");
        assert_eq!(module_of("geo::priv::helper"), "geo");
        assert_eq!(module_of(""), "");
    }
}
