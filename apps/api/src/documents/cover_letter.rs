//! Cover Letter Generator — a tailored letter from the profile and a job target.

use std::time::Duration;

use crate::documents::{or_default, GeneratedDocument};
use crate::llm_client::prompts::{build_cover_letter_prompt, JobTarget};
use crate::llm_client::{generate_or_skip, GenerationOptions, TextGenerator};
use crate::models::profile::ProfileSnapshot;

pub const DEFAULT_POSITION: &str = "Your Target Position";
pub const DEFAULT_COMPANY: &str = "the Company";
const DEFAULT_SUMMARY: &str =
    "I am a dedicated professional with a passion for delivering quality work and continuous learning.";

/// The letter used when the generator is unavailable or returns nothing.
pub fn template_cover_letter(profile: &ProfileSnapshot, job: &JobTarget<'_>) -> String {
    format!(
        "Dear Hiring Manager,\n\n\
         I am writing to express my strong interest in the {position} position at {company}.\n\n\
         {summary}\n\n\
         I am excited about the opportunity to contribute to {company} and would welcome the \
         chance to discuss how I can add value to your team.\n\n\
         Best regards,\n{name}",
        position = job.position,
        company = job.company,
        summary = or_default(&profile.summary, DEFAULT_SUMMARY),
        name = profile.name.trim(),
    )
}

/// Blank position and company are replaced by generic wording before either
/// path sees them.
pub async fn generate_cover_letter(
    profile: &ProfileSnapshot,
    position: &str,
    company: &str,
    description: &str,
    generator: &dyn TextGenerator,
    timeout: Duration,
) -> GeneratedDocument {
    let job = JobTarget {
        position: or_default(position, DEFAULT_POSITION),
        company: or_default(company, DEFAULT_COMPANY),
        description: description.trim(),
    };

    let prompt = build_cover_letter_prompt(profile, &job);
    match generate_or_skip(generator, &prompt, GenerationOptions::DOCUMENT, timeout, "cover letter").await {
        Some(text) => GeneratedDocument::ai(text),
        None => GeneratedDocument::template(template_cover_letter(profile, &job)),
    }
}
