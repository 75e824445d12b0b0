//! Text Normalizer: lowercase, strip punctuation, collapse whitespace.
//!
//! `+`, `#` and `-` survive so tokens like `c++`, `c#` and `ci-cd` keep their identity.

/// Returns `true` for characters that survive normalization as themselves.
fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '+' | '#')
}

/// Normalizes raw text for keyword extraction and TF-IDF.
///
/// Every character outside `[a-z0-9\s\-+#]` (after lowercasing) becomes a space,
/// then whitespace runs collapse to a single space and the result is trimmed.
/// Empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
