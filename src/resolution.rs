/// Field chain resolution.
///
/// Walks a structural type definition along an access chain such as
/// `point->coords->` (chain `["coords", ""]` once the variable is
/// stripped) and returns the fields of the record reached at the last
/// step.
///
/// The walk is driven by the type's form:
///
/// - **record, one step left**: every field of the record is a candidate
/// - **record, more steps**: descend into the field named by the next step
/// - **array / hash**: unwrap to the element type without consuming a step
/// - **scalar**: nothing further to complete
/// - **`@module::Name`**: load the named definition, again without
///   consuming a step
///
/// Named field types (`@module::Name`) are resolved from disk only when the
/// walk descends into them.  Every descent or unwrap counts against
/// `ResolveContext::max_depth`, so self-referential types cannot loop.
use tracing::trace;

use crate::delimiter::find_matching_close;
use crate::parser::records::{REFERENCE_MARKER, extract_fields};
use crate::parser::{TypeForm, resolve_type_definition};
use crate::types::{FieldDescriptor, FieldValue, ResolveContext, ResolveError};

/// Resolve the field set reached by following `chain` from `type_def`.
///
/// `chain` holds the field names after the variable; its last element is
/// the (possibly empty) partial field name being typed.
pub fn resolve_chain(
    ctx: &ResolveContext,
    type_def: &str,
    chain: &[String],
) -> Result<Vec<FieldDescriptor>, ResolveError> {
    resolve_chain_at(ctx, type_def, chain, 0)
}

fn resolve_chain_at(
    ctx: &ResolveContext,
    type_def: &str,
    chain: &[String],
    depth: usize,
) -> Result<Vec<FieldDescriptor>, ResolveError> {
    if depth > ctx.max_depth {
        return Err(ResolveError::RecursionLimit {
            depth: ctx.max_depth,
        });
    }
    let Some((next, rest)) = chain.split_first() else {
        return Ok(Vec::new());
    };

    trace!(depth, type_def, next = %next, "resolving chain step");

    // `ptd::arr(@geo::Point)` unwraps to a bare reference
    if let Some(name) = type_def.strip_prefix(REFERENCE_MARKER) {
        let name = name.trim_end_matches(';');
        let referenced = resolve_type_definition(ctx, name)?;
        return resolve_chain_at(ctx, &referenced, chain, depth + 1);
    }

    match TypeForm::classify(type_def) {
        Some(TypeForm::Record) if rest.is_empty() => Ok(extract_fields(type_def)),
        Some(TypeForm::Scalar) => Ok(Vec::new()),
        Some(TypeForm::Array | TypeForm::Hash) => {
            let inner = unwrap_aggregate(type_def)?;
            resolve_chain_at(ctx, inner, chain, depth + 1)
        }
        Some(TypeForm::Record) => {
            let fields = extract_fields(type_def);
            let field = fields
                .iter()
                .find(|f| &f.key == next)
                .ok_or_else(|| ResolveError::FieldNotFound {
                    field: next.clone(),
                })?;
            let field_def = field_definition(ctx, &field.value)?;
            resolve_chain_at(ctx, &field_def, rest, depth + 1)
        }
        None => Err(ResolveError::UnrecognizedTypeForm {
            text: type_def.to_string(),
        }),
    }
}

/// Return the element type text strictly inside an aggregate's parentheses.
pub fn unwrap_aggregate(type_def: &str) -> Result<&str, ResolveError> {
    let open = type_def
        .find('(')
        .ok_or_else(|| ResolveError::UnrecognizedTypeForm {
            text: type_def.to_string(),
        })?;
    let close = find_matching_close(type_def, open)?;
    Ok(&type_def[open + 1..close])
}

/// Turn a field's value into type definition text, loading named types.
pub fn field_definition(ctx: &ResolveContext, value: &FieldValue) -> Result<String, ResolveError> {
    match value {
        FieldValue::Inline(text) => Ok(text.clone()),
        FieldValue::Reference(name) => resolve_type_definition(ctx, name),
    }
}
