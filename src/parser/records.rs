/// Record field extraction.
///
/// Splits a normalized `ptd::rec({key=>value,...})` definition into an
/// ordered list of [`FieldDescriptor`]s.  Three value shapes are handled:
///
/// - `@module::Name` — a named type reference, kept unresolved
/// - `ptd::arr(...)` and friends — an inline definition, sliced with the
///   delimiter matcher so nested commas stay inside the value
/// - `ptd::sim` — a bare token without parentheses, running to the next
///   comma or the end of the record body
///
/// Malformed input produces whatever fields were recognised before the
/// problem; it never fails.
use tracing::trace;

use crate::delimiter::find_matching_close;
use crate::parser::RECORD_PREFIX;
use crate::types::{FieldDescriptor, FieldValue};

/// Separator between a field's key and its value.
const KEY_VALUE_SEPARATOR: &str = "=>";

/// Marker introducing a named type reference.
pub(crate) const REFERENCE_MARKER: char = '@';

/// Extract the fields of a record type definition, in declaration order.
pub fn extract_fields(record_def: &str) -> Vec<FieldDescriptor> {
    let Some(body) = record_body(record_def) else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let Some(key_len) = body[pos..].find(KEY_VALUE_SEPARATOR) else {
            break;
        };
        let key = body[pos..pos + key_len].trim().to_string();
        pos += key_len + KEY_VALUE_SEPARATOR.len();

        let rest = &body[pos..];
        let value_start = rest.len() - rest.trim_start().len();
        pos += value_start;
        let rest = &body[pos..];

        let comma = rest.find(',');
        let paren = rest.find('(');

        let field = if let Some(reference) = rest.strip_prefix(REFERENCE_MARKER) {
            let end = comma.unwrap_or(rest.len());
            let raw = rest[..end].trim();
            let name = reference[..end - 1].trim().trim_end_matches(';');
            pos += end + 1;
            FieldDescriptor {
                key,
                value: FieldValue::Reference(name.to_string()),
                type_text: raw.to_string(),
            }
        } else if let Some(paren) = paren.filter(|&p| comma.is_none_or(|c| p < c)) {
            let Ok(close) = find_matching_close(rest, paren) else {
                break;
            };
            let value = &rest[..=close];
            pos += close + 1;
            pos += body[pos..].find(',').map_or(body.len() - pos, |c| c + 1);
            FieldDescriptor {
                key,
                value: FieldValue::Inline(value.to_string()),
                type_text: value[..paren].trim().to_string(),
            }
        } else {
            let end = comma.unwrap_or(rest.len());
            let value = rest[..end].trim();
            if value.is_empty() {
                break;
            }
            pos += end + 1;
            FieldDescriptor {
                key,
                value: FieldValue::Inline(value.to_string()),
                type_text: value.to_string(),
            }
        };

        trace!(key = %field.key, type_text = %field.type_text, "record field");
        fields.push(field);
    }

    fields
}

/// Return the text strictly inside the braces of `ptd::rec({ ... })`.
///
/// An unclosed body runs to the end of the text so that the fields seen so
/// far are still reported.
fn record_body(record_def: &str) -> Option<&str> {
    let rest = record_def.strip_prefix(RECORD_PREFIX)?;
    let open = RECORD_PREFIX.len() + rest.find('{')?;
    match find_matching_close(record_def, open) {
        Ok(close) => Some(&record_def[open + 1..close]),
        Err(_) => Some(&record_def[open + 1..]),
    }
}
