// Prompt templates for the text-generation collaborator.
// Placeholders are substituted with `str::replace`.

use crate::models::profile::{split_entries, ProfileSnapshot};

/// Longest resume / job-description excerpt sent to the model, in characters.
pub const EXCERPT_CHARS: usize = 500;
/// Job descriptions in document prompts are cut here.
pub const DESCRIPTION_CHARS: usize = 4000;

pub const MATCH_SUGGESTION_TEMPLATE: &str = "\
Based on this job description and resume, provide one specific, actionable suggestion \
to improve the resume's match.\n\
\n\
Job Description:\n\
{jd_excerpt}...\n\
\n\
Resume:\n\
{resume_excerpt}...\n\
\n\
Missing keywords: {missing}\n\
Found keywords: {found}\n\
\n\
Give a concise, professional suggestion (1-2 sentences) on how to improve the resume.";

pub const COVER_LETTER_TEMPLATE: &str = "\
You are a professional cover letter writer specializing in ATS-optimized applications.\n\
\n\
Write a compelling, professional cover letter that highlights the candidate's strengths \
and matches the job requirements.\n\
\n\
RULES:\n\
- Do NOT invent qualifications. Use only the data provided.\n\
- Write in a professional, engaging tone with action verbs.\n\
- Use relevant keywords from the job description.\n\
- Keep it concise (3-4 paragraphs).\n\
- Output ONLY the cover letter, without commentary.\n\
\n\
CANDIDATE:\n\
Name: {name}\n\
Headline: {headline}\n\
Summary: {summary}\n\
Skills: {skills}\n\
Experience: {experience}\n\
\n\
JOB:\n\
Position: {position}\n\
Company: {company}\n\
Description: {description}\n\
\n\
Now write the cover letter.";

pub const PORTFOLIO_TEMPLATE: &str = "\
You are a professional portfolio website copywriter.\n\
\n\
Write content for a personal developer portfolio website with these sections:\n\
- Hero Introduction\n\
- About Me\n\
- Skills Overview\n\
- Featured Projects\n\
- Experience Summary\n\
- Contact Section\n\
\n\
Keep the tone modern, confident and professional. Do NOT fabricate information.\n\
\n\
USER DATA:\n\
Name: {name}\n\
Headline: {headline}\n\
Summary: {summary}\n\
Skills: {skills}\n\
Projects: {projects}\n\
Experience: {experience}\n\
Education: {education}";

/// Returns at most `max_chars` characters of `text`, never splitting a code point.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Builds the single-suggestion prompt from texts and keyword lists.
pub fn build_match_suggestion_prompt(
    resume_text: &str,
    jd_text: &str,
    missing: &[&str],
    found: &[&str],
) -> String {
    MATCH_SUGGESTION_TEMPLATE
        .replace("{jd_excerpt}", excerpt(jd_text, EXCERPT_CHARS))
        .replace("{resume_excerpt}", excerpt(resume_text, EXCERPT_CHARS))
        .replace("{missing}", &missing.join(", "))
        .replace("{found}", &found.join(", "))
}

/// Job fields of a cover-letter prompt.
pub struct JobTarget<'a> {
    pub position: &'a str,
    pub company: &'a str,
    pub description: &'a str,
}

pub fn build_cover_letter_prompt(profile: &ProfileSnapshot, job: &JobTarget<'_>) -> String {
    COVER_LETTER_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{headline}", &profile.headline)
        .replace("{summary}", &profile.summary)
        .replace("{skills}", &skill_list(&profile.skills))
        .replace("{experience}", &entry_list(&profile.experience))
        .replace("{position}", job.position)
        .replace("{company}", job.company)
        .replace("{description}", excerpt(job.description, DESCRIPTION_CHARS))
}

pub fn build_portfolio_prompt(profile: &ProfileSnapshot) -> String {
    PORTFOLIO_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{headline}", &profile.headline)
        .replace("{summary}", &profile.summary)
        .replace("{skills}", &skill_list(&profile.skills))
        .replace("{projects}", &entry_list(&profile.projects))
        .replace("{experience}", &entry_list(&profile.experience))
        .replace("{education}", &entry_list(&profile.education))
}

/// Comma-separated skills, trimmed and re-joined.
fn skill_list(skills: &str) -> String {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn entry_list(field: &str) -> String {
    split_entries(field).join(" | ")
}
