//! Portfolio Generator — website copy for a personal portfolio.

use std::time::Duration;

use crate::documents::GeneratedDocument;
use crate::llm_client::prompts::build_portfolio_prompt;
use crate::llm_client::{generate_or_skip, GenerationOptions, TextGenerator};
use crate::models::profile::ProfileSnapshot;

const EMPTY_PROFILE_NOTE: &str = "Note: Please complete your profile to showcase your projects \
and skills in a comprehensive portfolio.\n";

/// Plain portfolio assembled from the profile sections that carry text.
pub fn template_portfolio(profile: &ProfileSnapshot) -> String {
    let name = profile.name.trim();
    let title = format!("{name}'s Portfolio");
    let mut out = format!("{title}\n{}\n\n", "=".repeat(title.chars().count()));

    let mut sections = Vec::new();
    let headline = profile.headline.trim();
    if !headline.is_empty() {
        sections.push(format!("Headline: {headline}"));
    }
    for (label, value) in [
        ("About Me", &profile.summary),
        ("Projects", &profile.projects),
        ("Skills", &profile.skills),
    ] {
        let value = value.trim();
        if !value.is_empty() {
            sections.push(format!("{label}:\n{value}"));
        }
    }

    if sections.is_empty() {
        out.push_str(EMPTY_PROFILE_NOTE);
    }
    for section in sections {
        out.push_str(&section);
        out.push_str("\n\n");
    }

    out.push_str(&format!("Contact: {}\n", profile.email.trim()));
    out
}

/// With `use_ai` off the generator is never called.
pub async fn generate_portfolio(
    profile: &ProfileSnapshot,
    use_ai: bool,
    generator: &dyn TextGenerator,
    timeout: Duration,
) -> GeneratedDocument {
    if use_ai {
        let prompt = build_portfolio_prompt(profile);
        if let Some(text) =
            generate_or_skip(generator, &prompt, GenerationOptions::DOCUMENT, timeout, "portfolio").await
        {
            return GeneratedDocument::ai(text);
        }
    }
    GeneratedDocument::template(template_portfolio(profile))
}
