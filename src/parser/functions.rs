/// Function name lookup for qualified-name completion.
///
/// Completing `geo::dis` lists every `def geo::dis...` declared in the
/// `geo` module file.  The module is always the text before the first `:`
/// and the prefix the text after the last one, so `geo::`, `geo::dis` and
/// `geo::priv:dis` are all understood.
use regex::Regex;
use tracing::debug;

use crate::module_locator::read_module;
use crate::parser::module_of;
use crate::types::{CompletionCandidate, ResolveContext, ResolveError};

/// Split a qualified-name token into `(module, prefix)`.
pub fn split_qualified_token(token: &str) -> (&str, &str) {
    let token = token.trim_start_matches('@');
    let module = module_of(token);
    let prefix = token.rsplit(':').next().unwrap_or_default();
    (module, prefix)
}

/// Find functions in the token's module whose name starts with its prefix.
pub fn find_functions(
    ctx: &ResolveContext,
    token: &str,
) -> Result<Vec<CompletionCandidate>, ResolveError> {
    let (module, prefix) = split_qualified_token(token);
    let source = read_module(ctx, module)?;
    let names = function_names(&source, module, prefix);
    debug!(module, prefix, count = names.len(), "function candidates");
    Ok(names.into_iter().map(CompletionCandidate::function).collect())
}

/// List the names (without the module qualifier) of all `def module::...`
/// declarations starting with `prefix`, in source order and deduplicated.
pub fn function_names(source: &str, module: &str, prefix: &str) -> Vec<String> {
    let pattern = format!(
        r"def\s+{}::({}[^(\s]*)",
        regex::escape(module),
        regex::escape(prefix)
    );
    let Ok(declaration) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::new();
    for captures in declaration.captures_iter(source) {
        let name = &captures[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
