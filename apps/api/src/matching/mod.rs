//! Resume ↔ job-description matching: normalization, keyword extraction,
//! TF-IDF similarity and suggestion generation.

pub mod handlers;
pub mod keywords;
pub mod normalize;
pub mod scorer;
pub mod suggestions;
pub mod tfidf;
