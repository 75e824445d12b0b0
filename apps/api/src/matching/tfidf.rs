//! TF-IDF vector space over a two-document corpus (resume, job description).
//!
//! Mirrors the classic vectorizer configuration: tokens of two or more word
//! characters, English stop words removed, unigrams + bigrams, vocabulary capped
//! at the most frequent `max_features` terms, smoothed idf and L2-normalized rows.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// English stop-word list applied before n-gram generation.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn english_stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Vectorizer settings. `Default` is the configuration used by the match scorer.
#[derive(Debug, Clone)]
pub struct TfidfConfig {
    pub max_features: usize,
    /// Inclusive n-gram range, e.g. `(1, 2)` for unigrams + bigrams.
    pub ngram_range: (usize, usize),
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: 100,
            ngram_range: (1, 2),
        }
    }
}

/// Splits text into runs of alphanumeric characters at least two long,
/// dropping English stop words.
fn tokenize(text: &str) -> Vec<String> {
    let stop = english_stop_words();
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2 && !stop.contains(t))
        .map(str::to_string)
        .collect()
}

/// Term counts for one document, n-grams joined with a single space.
fn term_counts(text: &str, config: &TfidfConfig) -> BTreeMap<String, f64> {
    let tokens = tokenize(text);
    let (min_n, max_n) = config.ngram_range;
    let mut counts = BTreeMap::new();

    for n in min_n.max(1)..=max_n {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0.0) += 1.0;
        }
    }
    counts
}

/// Builds the capped vocabulary: most frequent terms across the corpus,
/// ties broken alphabetically.
fn build_vocabulary(docs: &[BTreeMap<String, f64>], max_features: usize) -> Vec<String> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for doc in docs {
        for (term, count) in doc {
            *totals.entry(term.as_str()).or_insert(0.0) += count;
        }
    }

    // BTreeMap iteration is alphabetical; a stable sort keeps that order for ties.
    let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(max_features)
        .map(|(term, _)| term.to_string())
        .collect()
}

/// Fits a TF-IDF model on `docs` and returns one L2-normalized row per document.
///
/// Returns `None` when the vocabulary is empty (every token was a stop word or
/// too short), which callers treat as "no lexical similarity".
pub fn fit_transform(docs: &[&str], config: &TfidfConfig) -> Option<Vec<Vec<f64>>> {
    let counts: Vec<BTreeMap<String, f64>> =
        docs.iter().map(|d| term_counts(d, config)).collect();
    let vocabulary = build_vocabulary(&counts, config.max_features);
    if vocabulary.is_empty() {
        return None;
    }

    let n_docs = docs.len() as f64;
    let idf: Vec<f64> = vocabulary
        .iter()
        .map(|term| {
            let df = counts.iter().filter(|c| c.contains_key(term)).count() as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    let rows = counts
        .iter()
        .map(|doc| {
            let mut row: Vec<f64> = vocabulary
                .iter()
                .zip(&idf)
                .map(|(term, w)| doc.get(term).copied().unwrap_or(0.0) * w)
                .collect();
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|v| *v /= norm);
            }
            row
        })
        .collect();

    Some(rows)
}

/// Cosine similarity of two equal-length vectors. Zero vectors score 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// TF-IDF cosine similarity of two texts in `[0, 1]`.
///
/// Any numerical failure (empty vocabulary, NaN) yields 0.
pub fn tfidf_similarity(a: &str, b: &str) -> f64 {
    let Some(rows) = fit_transform(&[a, b], &TfidfConfig::default()) else {
        return 0.0;
    };
    let similarity = cosine_similarity(&rows[0], &rows[1]);
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stop_words_and_single_chars() {
        assert_eq!(
            tokenize("we are looking for a c developer with rust"),
            vec!["looking", "developer", "rust"]
        );
    }

    #[test]
    fn test_tokenize_splits_on_symbols() {
        assert_eq!(tokenize("c++ ci-cd node#js"), vec!["ci", "cd", "node", "js"]);
    }

    #[test]
    fn test_term_counts_include_bigrams() {
        let counts = term_counts("python developer python", &TfidfConfig::default());
        assert_eq!(counts.get("python"), Some(&2.0));
        assert_eq!(counts.get("python developer"), Some(&1.0));
        assert_eq!(counts.get("developer python"), Some(&1.0));
    }

    #[test]
    fn test_vocabulary_capped_by_frequency() {
        let docs = vec![term_counts("alpha alpha beta gamma", &TfidfConfig { max_features: 1, ngram_range: (1, 1) })];
        assert_eq!(build_vocabulary(&docs, 1), vec!["alpha".to_string()]);
    }

    #[test]
    fn test_identical_texts_similarity_is_one() {
        let text = "python developer docker aws kubernetes";
        let sim = tfidf_similarity(text, text);
        assert!((sim - 1.0).abs() < 1e-9, "got {sim}");
    }

    #[test]
    fn test_disjoint_texts_similarity_is_zero() {
        let sim = tfidf_similarity("python django", "welding forklift");
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_empty_vocabulary_is_zero() {
        assert!(fit_transform(&["the and of", "a an"], &TfidfConfig::default()).is_none());
        assert_eq!(tfidf_similarity("the and of", "a an"), 0.0);
        assert_eq!(tfidf_similarity("", ""), 0.0);
    }

    #[test]
    fn test_partial_overlap_between_zero_and_one() {
        let sim = tfidf_similarity(
            "experienced python developer skilled docker",
            "looking python developer aws docker experience",
        );
        assert!(sim > 0.0 && sim < 1.0, "got {sim}");
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let rows = fit_transform(&["rust tokio axum", "rust serde"], &TfidfConfig::default()).unwrap();
        for row in rows {
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
