//! Suggestion Generator — turns keyword gaps into ranked, human-readable advice.

use std::collections::BTreeSet;

/// Maximum suggestions returned to callers.
pub const MAX_SUGGESTIONS: usize = 5;

/// Added to the coverage denominator so two empty sets don't divide by zero.
const COVERAGE_EPSILON: f64 = 0.1;

/// Fraction of job keywords covered by the resume, `found / (found + missing + ε)`.
pub fn coverage_ratio(missing: usize, found: usize) -> f64 {
    found as f64 / (found as f64 + missing as f64 + COVERAGE_EPSILON)
}

fn top(set: &BTreeSet<String>, n: usize) -> String {
    set.iter().take(n).map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Builds the suggestion list in its fixed order, appending the optional
/// collaborator suggestion before truncating to [`MAX_SUGGESTIONS`].
///
/// `BTreeSet` iteration order provides the sorted "top N" selections.
pub fn build_suggestions(
    missing: &BTreeSet<String>,
    found: &BTreeSet<String>,
    enrichment: Option<String>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !missing.is_empty() {
        suggestions.push(format!(
            "Add experience or mention these key skills: {}",
            top(missing, 5)
        ));
    }

    if !found.is_empty() {
        suggestions.push(format!("Highlight your expertise in: {}", top(found, 5)));
    }

    if missing.len() > found.len() {
        suggestions.push(format!(
            "Increase coverage of job description requirements. You're missing {} key terms.",
            missing.len()
        ));
    }

    if !missing.is_empty() {
        suggestions.push(format!(
            "Incorporate industry-specific terms like: {} in your work experience descriptions",
            top(missing, 3)
        ));
    }

    let coverage = coverage_ratio(missing.len(), found.len());
    if coverage < 0.5 {
        suggestions.push(
            "Your resume covers less than 50% of job requirements. \
             Consider adding more relevant experience or certifications."
                .to_string(),
        );
    } else {
        suggestions.push(format!(
            "Great! Your resume matches {}% of the job requirements.",
            (coverage * 100.0) as u32
        ));
    }

    if let Some(extra) = enrichment.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        suggestions.push(extra);
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
