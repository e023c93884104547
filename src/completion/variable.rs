/// Declared-type lookup for the variable at the root of an access chain.
///
/// nianiolang declares types inline, either in a parameter list
/// (`def geo::len(route : @geo::Route) {`) or on a local
/// (`var p : @geo::Point = ...;`).  The nearest declaration above the
/// caret wins.  The scan starts on the caret's own line and stops at the
/// enclosing `def` line, which is still checked for parameters.
use regex::Regex;
use tracing::trace;

use crate::types::ResolveError;

/// Find the type name declared for `variable`, looking upward from the
/// 1-based `line_number`.
///
/// Returns the type name without its `@` marker (e.g. `"geo::Point"`).
pub fn find_variable_type(
    buffer: &str,
    line_number: usize,
    variable: &str,
) -> Result<String, ResolveError> {
    let not_declared = || ResolveError::VariableNotDeclared {
        name: variable.to_string(),
    };

    if variable.is_empty() {
        return Err(not_declared());
    }

    let pattern = format!(r"\b{}\s*:\s+@?([A-Za-z0-9:_]*)", regex::escape(variable));
    let declaration = Regex::new(&pattern).map_err(|_| not_declared())?;

    let lines: Vec<&str> = buffer.lines().take(line_number).collect();
    for (index, line) in lines.iter().enumerate().rev() {
        let line = line.trim();
        if let Some(captures) = declaration.captures(line) {
            let type_name = &captures[1];
            trace!(variable, line = index + 1, type_name, "variable declaration");
            if type_name.is_empty() {
                return Err(not_declared());
            }
            return Ok(type_name.to_string());
        }
        if line.starts_with("def ") {
            break;
        }
    }

    Err(not_declared())
}
