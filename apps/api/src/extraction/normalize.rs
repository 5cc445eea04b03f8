//! Printable-ASCII normalization applied to scanned byte streams.

/// Replaces every character outside printable ASCII with whitespace,
/// collapses whitespace runs (including newlines) into a single space, and
/// trims both ends, all in one pass.
///
/// Invariants of the output: only printable ASCII, no newlines, never two
/// consecutive spaces, no leading or trailing space.
pub fn normalize_scanned_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ('!'..='~').contains(&ch) {
            if pending_separator && !out.is_empty() {
                out.push(' ');
            }
            pending_separator = false;
            out.push(ch);
        } else {
            // space, newline, control bytes, and everything non-ASCII all
            // collapse into one separator
            pending_separator = true;
        }
    }

    out
}
