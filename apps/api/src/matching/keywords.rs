//! Keyword Extractor — frequency-ranked keywords with a fixed stop-word set.

use std::collections::HashMap;

/// Words never reported as resume/JD keywords.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "for", "to", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "this", "that", "these",
    "those", "i", "you", "he", "she", "it", "we", "they", "what", "which", "who", "when", "where",
    "why", "how", "as", "if", "because", "so", "than", "such", "no", "not", "only", "own", "same",
    "some", "other", "more", "most", "very", "just", "my", "your", "his", "her",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// A token qualifies as a keyword if it is not a stop word, is longer than two
/// characters, and is not purely numeric.
fn is_keyword_candidate(token: &str) -> bool {
    token.chars().count() > 2
        && !is_stop_word(token)
        && !token.chars().all(|c| c.is_ascii_digit())
}

/// Returns the `n` most frequent keyword tokens of already-normalized text.
///
/// Ties keep first-encountered order (stable sort on descending count), so the
/// result is a pure function of `text` and `n`.
pub fn extract_keywords(text: &str, n: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in text.split_whitespace().filter(|t| is_keyword_candidate(t)) {
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(token, _)| token.to_string())
        .collect()
}
