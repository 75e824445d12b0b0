use serde::{Deserialize, Serialize};

/// External profile links. Only the label is printed on the resume, never the URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileLinks {
    pub linkedin: String,
    pub github: String,
    pub leetcode: String,
    /// Free-form extra links, one per line.
    pub other: String,
}

/// Read-only snapshot of a user profile, passed by value into the core.
///
/// Every field may be empty. Multi-entry fields (`projects`, `experience`,
/// `education`) accept either newline- or `|`-separated entries; `skills` is
/// comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSnapshot {
    pub name: String,
    pub email: String,
    pub headline: String,
    pub summary: String,
    pub skills: String,
    pub projects: String,
    pub experience: String,
    pub education: String,
    pub phone: String,
    pub links: ProfileLinks,
    /// `YYYY-MM-DD` when well-formed; printed verbatim otherwise.
    pub dob: String,
    pub languages: String,
    pub hobbies: String,
}

impl ProfileSnapshot {
    /// Assembles the plain resume text used when a scoring request carries no
    /// explicit resume. Empty fields still contribute their label line.
    pub fn resume_text(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Headline: {}", self.headline),
            format!("Summary: {}", self.summary),
            format!("Skills: {}", self.skills),
            format!("Projects: {}", self.projects),
            format!("Education: {}", self.education),
        ]
        .join("\n")
    }

    /// True when at least one content field carries text.
    pub fn has_content(&self) -> bool {
        [
            &self.headline,
            &self.summary,
            &self.skills,
            &self.projects,
            &self.experience,
            &self.education,
        ]
        .iter()
        .any(|f| !f.trim().is_empty())
    }
}

/// Splits a multi-entry field into trimmed, non-empty lines.
///
/// Newlines take precedence; a single-line field is split on `|` instead.
pub fn split_entries(field: &str) -> Vec<String> {
    let separator = if field.contains('\n') { '\n' } else { '|' };
    field
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entries_pipe_separated() {
        assert_eq!(
            split_entries("B.Tech CSE | Class XII"),
            vec!["B.Tech CSE".to_string(), "Class XII".to_string()]
        );
    }

    #[test]
    fn test_split_entries_newlines_win_over_pipes() {
        let entries = split_entries("Acme | Engineer\n- shipped a thing");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], "Acme | Engineer");
    }

    #[test]
    fn test_split_entries_empty() {
        assert!(split_entries("   ").is_empty());
    }

    #[test]
    fn test_resume_text_contains_labels() {
        let profile = ProfileSnapshot {
            name: "Ada".to_string(),
            skills: "Rust, Python".to_string(),
            ..Default::default()
        };
        let text = profile.resume_text();
        assert!(text.starts_with("Name: Ada"));
        assert!(text.contains("Skills: Rust, Python"));
    }

    #[test]
    fn test_has_content_ignores_contact_fields() {
        let profile = ProfileSnapshot {
            name: "Ada".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        };
        assert!(!profile.has_content());
    }

    #[test]
    fn test_deserialize_partial_profile() {
        let profile: ProfileSnapshot =
            serde_json::from_str(r#"{"summary": "Builder", "links": {"github": "gh/ada"}}"#).unwrap();
        assert_eq!(profile.summary, "Builder");
        assert_eq!(profile.links.github, "gh/ada");
        assert!(profile.headline.is_empty());
    }
}
