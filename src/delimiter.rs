/// Balanced bracket matching.
///
/// Every lexical scan in the resolver slices type definitions by matching
/// brackets rather than parsing them.  All three bracket pairs are ASCII, so
/// offsets are byte offsets into the original `&str` and always land on a
/// character boundary.
use crate::types::ResolveError;

/// Return the closing counterpart of an opening bracket.
fn closing_for(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        _ => None,
    }
}

/// Find the index of the bracket that closes the one at `open`.
///
/// Only the bracket kind found at `open` is counted; other kinds are
/// ignored.  When the byte at `open` is not an opening bracket there is
/// nothing to match and `open` itself is returned.
///
/// Returns `UnbalancedDelimiters` when `open` is out of range or the
/// bracket is never closed.
pub fn find_matching_close(text: &str, open: usize) -> Result<usize, ResolveError> {
    let bytes = text.as_bytes();
    let Some(&opening) = bytes.get(open) else {
        return Err(ResolveError::UnbalancedDelimiters { offset: open });
    };
    let Some(closing) = closing_for(opening) else {
        return Ok(open);
    };

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == opening {
            depth += 1;
        } else if b == closing {
            depth -= 1;
            if depth == 0 {
                return Ok(i);
            }
        }
    }

    Err(ResolveError::UnbalancedDelimiters { offset: open })
}
