//! Identifier formatting.

/// Turn a raw schema identifier into a valid code identifier.
///
/// Strips every character outside `[A-Za-z0-9_]`; when `capitalize` is set,
/// the first remaining character is upper-cased. Both front-ends route every
/// generated name through here so names stay consistent and collision-free
/// across backends.
pub fn format_ident(raw: &str, capitalize: bool) -> String {
    let mut out: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if capitalize {
        if let Some(first) = out.chars().next() {
            let upper = first.to_ascii_uppercase();
            out.replace_range(..first.len_utf8(), upper.encode_utf8(&mut [0; 4]));
        }
    }
    out
}

/// Remove the first occurrence of `exclude` from `raw`.
///
/// An empty `exclude` removes nothing.
pub(crate) fn strip_once(raw: &str, exclude: &str) -> String {
    if exclude.is_empty() {
        raw.to_string()
    } else {
        raw.replacen(exclude, "", 1)
    }
}
