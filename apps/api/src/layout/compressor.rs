//! Content Compressor — shrinks resume text under line/word budgets.
//!
//! Every operation is a pure `&str -> String` function. Inputs already within
//! budget come back unchanged.

use crate::models::profile::{split_entries, ProfileSnapshot};

/// Summaries at or under this many lines are left alone.
pub const SUMMARY_MAX_LINES: usize = 3;
/// Word count above which the summary is cut at a sentence boundary instead.
pub const SUMMARY_LONG_WORDS: usize = 60;
/// Minimum words kept before a sentence boundary may end the cut.
pub const SUMMARY_MIN_WORDS: usize = 40;

pub const MAX_PROJECTS: usize = 4;
pub const MAX_BULLETS_PER_PROJECT: usize = 2;

pub const SKILLS_MAX_LINES: usize = 3;
/// A skills line shorter than this may absorb the next uncategorized line.
pub const SKILLS_MERGE_WIDTH: usize = 80;

fn is_bullet(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('-') || trimmed.starts_with('•')
}

/// Keeps a summary to three lines.
///
/// Long summaries (more than 60 words) are instead cut after the first
/// sentence end that falls at or beyond the 40th word.
pub fn compress_summary(summary: &str) -> String {
    let lines: Vec<&str> = summary.trim().split('\n').collect();
    if lines.len() <= SUMMARY_MAX_LINES {
        return summary.to_string();
    }

    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() <= SUMMARY_LONG_WORDS {
        return lines[..SUMMARY_MAX_LINES].join("\n");
    }

    let mut taken: Vec<&str> = Vec::new();
    for word in words {
        taken.push(word);
        if taken.len() >= SUMMARY_MIN_WORDS && word.ends_with(['.', '!', '?']) {
            break;
        }
    }
    taken.join(" ")
}

/// Keeps at most four titles and two bullets under each.
///
/// Entries are split the way the template splits them (newlines, or `|` on a
/// single line) and come back newline-separated. Non-bulleted entries are
/// titles; `-`/`•` entries are bullets. Bullets before the first title, and
/// bullets belonging to dropped titles, are dropped.
pub fn compress_projects(projects: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut titles = 0usize;
    let mut bullets = 0usize;
    let mut keeping = false;

    for line in split_entries(projects) {
        if is_bullet(&line) {
            if keeping && bullets < MAX_BULLETS_PER_PROJECT {
                kept.push(line);
                bullets += 1;
            }
        } else {
            keeping = titles < MAX_PROJECTS;
            if keeping {
                kept.push(line);
                titles += 1;
                bullets = 0;
            }
        }
    }

    kept.join("\n")
}

/// Experience entries follow the same title/bullet budget as projects.
pub fn compress_experience(experience: &str) -> String {
    compress_projects(experience)
}

/// Condenses skills to three lines.
///
/// Lines carrying a `Category:` marker always start a new line; other lines
/// are appended to the previous line while it is shorter than 80 characters.
pub fn compress_skills(skills: &str) -> String {
    let lines: Vec<&str> = skills
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() <= SKILLS_MAX_LINES {
        return skills.to_string();
    }

    let mut condensed: Vec<String> = Vec::new();
    for line in lines {
        match condensed.last_mut() {
            Some(last) if !line.contains(':') && last.chars().count() < SKILLS_MERGE_WIDTH => {
                last.push(' ');
                last.push_str(line);
            }
            _ => condensed.push(line.to_string()),
        }
    }

    condensed.truncate(SKILLS_MAX_LINES);
    condensed.join("\n")
}

/// Applies every compressor to the matching profile field.
pub fn compress_profile(profile: &ProfileSnapshot) -> ProfileSnapshot {
    ProfileSnapshot {
        summary: compress_summary(&profile.summary),
        projects: compress_projects(&profile.projects),
        experience: compress_experience(&profile.experience),
        skills: compress_skills(&profile.skills),
        ..profile.clone()
    }
}
