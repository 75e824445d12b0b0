//! Similarity Scorer — blends TF-IDF cosine similarity with keyword overlap
//! into a single 0–100 match score.
//!
//! `calculate_match_score` is pure: identical inputs always produce identical
//! output. `analyze_with_enrichment` builds on it, adding the best-effort
//! collaborator suggestion, and never fails.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::prompts::build_match_suggestion_prompt;
use crate::llm_client::{generate_or_skip, GenerationOptions, TextGenerator};
use crate::matching::keywords::extract_keywords;
use crate::matching::normalize::normalize;
use crate::matching::suggestions::{build_suggestions, MAX_SUGGESTIONS};
use crate::matching::tfidf::tfidf_similarity;

/// Keywords taken from the resume text.
pub const RESUME_KEYWORDS: usize = 20;
/// Keywords taken from the job description.
pub const JD_KEYWORDS: usize = 25;
/// Weight of the TF-IDF term; the keyword ratio gets the remainder.
/// Empirical, tunable.
pub const SIMILARITY_WEIGHT: f64 = 0.4;
pub const KEYWORD_WEIGHT: f64 = 0.6;
/// Cap on each reported keyword list.
pub const MAX_REPORTED_KEYWORDS: usize = 10;
/// Keywords of each kind passed into the collaborator prompt.
const PROMPT_KEYWORDS: usize = 5;

pub const MISSING_INPUT_SUGGESTION: &str = "Please provide both resume and job description";

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: u32,                  // 0 – 100
    pub missing_keywords: Vec<String>,     // sorted, ≤ 10
    pub overlapping_keywords: Vec<String>, // sorted, ≤ 10
    pub suggestions: Vec<String>,          // ≤ 5
}

impl MatchResult {
    fn missing_input() -> Self {
        Self {
            match_score: 0,
            missing_keywords: Vec::new(),
            overlapping_keywords: Vec::new(),
            suggestions: vec![MISSING_INPUT_SUGGESTION.to_string()],
        }
    }
}

/// Intermediate keyword analysis shared by the pure scorer and the enriched path.
struct KeywordAnalysis {
    missing: BTreeSet<String>,
    overlapping: BTreeSet<String>,
    score: u32,
}

fn analyze(resume_text: &str, jd_text: &str) -> KeywordAnalysis {
    let resume_clean = normalize(resume_text);
    let jd_clean = normalize(jd_text);

    let resume_keywords: BTreeSet<String> =
        extract_keywords(&resume_clean, RESUME_KEYWORDS).into_iter().collect();
    let jd_keywords: BTreeSet<String> =
        extract_keywords(&jd_clean, JD_KEYWORDS).into_iter().collect();

    let overlapping: BTreeSet<String> =
        resume_keywords.intersection(&jd_keywords).cloned().collect();
    let missing: BTreeSet<String> = jd_keywords.difference(&resume_keywords).cloned().collect();

    let similarity = tfidf_similarity(&resume_clean, &jd_clean);
    let keyword_score = if jd_keywords.is_empty() {
        0.0
    } else {
        overlapping.len() as f64 / jd_keywords.len() as f64 * 100.0
    };

    let score = blend_score(similarity, keyword_score);
    debug!(
        similarity,
        keyword_score,
        score,
        missing = missing.len(),
        overlapping = overlapping.len(),
        "Match score computed"
    );

    KeywordAnalysis {
        missing,
        overlapping,
        score,
    }
}

/// `round(0.4 × similarity×100 + 0.6 × keyword_score)` clamped to `[0, 100]`.
pub fn blend_score(similarity: f64, keyword_score: f64) -> u32 {
    let raw = SIMILARITY_WEIGHT * similarity * 100.0 + KEYWORD_WEIGHT * keyword_score;
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u32
}

fn first_n(set: &BTreeSet<String>, n: usize) -> Vec<String> {
    set.iter().take(n).cloned().collect()
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Scores `resume_text` against `jd_text` without any external call.
pub fn calculate_match_score(resume_text: &str, jd_text: &str) -> MatchResult {
    if is_blank(resume_text) || is_blank(jd_text) {
        return MatchResult::missing_input();
    }

    let analysis = analyze(resume_text, jd_text);
    MatchResult {
        match_score: analysis.score,
        missing_keywords: first_n(&analysis.missing, MAX_REPORTED_KEYWORDS),
        overlapping_keywords: first_n(&analysis.overlapping, MAX_REPORTED_KEYWORDS),
        suggestions: build_suggestions(&analysis.missing, &analysis.overlapping, None),
    }
}

/// [`calculate_match_score`] plus one best-effort suggestion from the
/// text-generation collaborator, appended while there is room. Collaborator
/// failures and timeouts leave the pure result untouched.
pub async fn analyze_with_enrichment(
    resume_text: &str,
    jd_text: &str,
    generator: &dyn TextGenerator,
    timeout: Duration,
) -> MatchResult {
    let mut result = calculate_match_score(resume_text, jd_text);
    if is_blank(resume_text) || is_blank(jd_text) || result.suggestions.len() >= MAX_SUGGESTIONS {
        return result;
    }

    fn top(keywords: &[String]) -> Vec<&str> {
        keywords.iter().take(PROMPT_KEYWORDS).map(String::as_str).collect()
    }
    let prompt = build_match_suggestion_prompt(
        resume_text,
        jd_text,
        &top(&result.missing_keywords),
        &top(&result.overlapping_keywords),
    );

    if let Some(extra) = generate_or_skip(
        generator,
        &prompt,
        GenerationOptions::SUGGESTION,
        timeout,
        "match suggestion",
    )
    .await
    {
        result.suggestions.push(extra);
    }
    result
}
