use std::collections::HashSet;

/// Canonicalizes a raw tag string into a hash-prefixed, space-joined tag line.
///
/// Tokens are split on any run of whitespace, prefixed with `#` unless they
/// already carry one, and deduplicated keeping the first occurrence.
pub fn normalize_tags(raw: &str) -> String {
    let mut seen = HashSet::new();
    raw.split_whitespace()
        .map(|token| {
            if token.starts_with('#') {
                token.to_string()
            } else {
                format!("#{}", token)
            }
        })
        .filter(|tag| seen.insert(tag.clone()))
        .collect::<Vec<_>>()
        .join(" ")
}
