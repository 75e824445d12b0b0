//! Resume Template — turns a `ProfileSnapshot` into a structured document and
//! renders it as plain text or HTML.
//!
//! All six templates share one section order; they differ in typography only.
//! The PDF path consumes the structured form directly (see `blocks`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::profile::{split_entries, ProfileSnapshot};

const DEFAULT_NAME: &str = "[Your Name]";
const DEFAULT_HEADLINE: &str = "Professional Developer";
const DEFAULT_PHONE: &str = "[Your Phone]";
const DEFAULT_EMAIL: &str = "[Your Email]";
const SECTION_DIVIDER_WIDTH: usize = 70;
/// Un-separated project lines shorter than this are read as titles.
const PROJECT_TITLE_MAX_CHARS: usize = 80;
/// Lines opening with these verbs are descriptions, never titles.
const DESCRIPTION_VERBS: &[&str] = &["developed", "built", "created"];

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeTemplate {
    #[default]
    Professional,
    Modern,
    Simple,
    Technical,
    Academic,
    Detailed,
}

/// Public description of a template, as listed by `GET /api/v1/templates`.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDescriptor {
    pub id: ResumeTemplate,
    pub name: &'static str,
    pub description: &'static str,
    pub font: &'static str,
    pub size: u8,
    pub line_spacing: f32,
}

impl ResumeTemplate {
    pub const ALL: [ResumeTemplate; 6] = [
        ResumeTemplate::Professional,
        ResumeTemplate::Modern,
        ResumeTemplate::Simple,
        ResumeTemplate::Technical,
        ResumeTemplate::Academic,
        ResumeTemplate::Detailed,
    ];

    /// Case-insensitive lookup by id, e.g. `"Modern"` → `Modern`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.descriptor().name.eq_ignore_ascii_case(name))
    }

    pub fn descriptor(self) -> TemplateDescriptor {
        let (name, description, font, size, line_spacing) = match self {
            ResumeTemplate::Professional => {
                ("Professional", "Formal, traditional resume layout", "Calibri", 11, 1.15)
            }
            ResumeTemplate::Modern => (
                "Modern",
                "Contemporary design with visual elements",
                "Segoe UI",
                11,
                1.15,
            ),
            ResumeTemplate::Simple => (
                "Simple",
                "Clean, minimalist ATS-optimized format",
                "Arial",
                10,
                1.0,
            ),
            ResumeTemplate::Technical => (
                "Technical",
                "Skills-focused for tech professionals",
                "Consolas",
                10,
                1.0,
            ),
            ResumeTemplate::Academic => {
                ("Academic", "CV-style for academic purposes", "Times New Roman", 12, 1.5)
            }
            ResumeTemplate::Detailed => (
                "Detailed",
                "Comprehensive layout with all sections",
                "Garamond",
                11,
                1.15,
            ),
        };
        TemplateDescriptor {
            id: self,
            name,
            description,
            font,
            size,
            line_spacing,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Education,
    Skills,
    Projects,
    Experience,
    PersonalDetails,
}

impl SectionKind {
    /// Upper-case heading used in the plain-text rendering.
    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Summary => "PROFESSIONAL SUMMARY",
            SectionKind::Education => "EDUCATION",
            SectionKind::Skills => "SKILLS",
            SectionKind::Projects => "PROJECTS & ACHIEVEMENTS",
            SectionKind::Experience => "PROFESSIONAL EXPERIENCE",
            SectionKind::PersonalDetails => "PERSONAL DETAILS",
        }
    }

    /// Mixed-case title used in the HTML and PDF renderings.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Summary => "Professional Summary",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects & Achievements",
            SectionKind::Experience => "Professional Experience",
            SectionKind::PersonalDetails => "Personal Details",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionLine {
    Text { text: String },
    Title { text: String },
    Bullet { text: String },
    Skills { label: String, items: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub kind: SectionKind,
    pub lines: Vec<SectionLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeHeader {
    /// Upper-cased full name.
    pub name: String,
    pub headline: String,
    /// Phone, email, then the labels of whichever profile links are set.
    pub contact: Vec<String>,
    pub additional_links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub template: ResumeTemplate,
    pub header: ResumeHeader,
    pub sections: Vec<ResumeSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Building
// ────────────────────────────────────────────────────────────────────────────

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['•', '-', '*', ' ']).trim()
}

fn build_header(profile: &ProfileSnapshot) -> ResumeHeader {
    let mut contact = vec![
        or_default(&profile.phone, DEFAULT_PHONE).to_string(),
        or_default(&profile.email, DEFAULT_EMAIL).to_string(),
    ];
    for (url, label) in [
        (&profile.links.linkedin, "LinkedIn"),
        (&profile.links.github, "GitHub"),
        (&profile.links.leetcode, "LeetCode"),
    ] {
        if !url.trim().is_empty() {
            contact.push(label.to_string());
        }
    }

    ResumeHeader {
        name: or_default(&profile.name, DEFAULT_NAME).to_uppercase(),
        headline: or_default(&profile.headline, DEFAULT_HEADLINE).to_string(),
        contact,
        additional_links: profile
            .links
            .other
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Comma-separated skills, de-duplicated case-insensitively (first spelling wins).
pub fn merge_skills(skills: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skills
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Splits project entries into titles and bullets.
///
/// `Title - description` yields a title and a bullet. Lines already bulleted
/// stay bullets. Other short lines are titles unless they open with a
/// description verb.
pub fn project_lines(projects: &str) -> Vec<SectionLine> {
    let mut lines = Vec::new();
    for entry in split_entries(projects) {
        let was_bulleted = entry.starts_with(['•', '-', '*']);
        let clean = strip_bullet(&entry);
        if clean.is_empty() {
            continue;
        }

        if let Some((title, description)) = clean.split_once(" - ") {
            lines.push(SectionLine::Title {
                text: title.trim().to_string(),
            });
            let description = description.trim();
            if !description.is_empty() {
                lines.push(SectionLine::Bullet {
                    text: capitalize_first(description),
                });
            }
            continue;
        }

        let lower = clean.to_lowercase();
        let looks_like_title = !was_bulleted
            && clean.chars().count() < PROJECT_TITLE_MAX_CHARS
            && !DESCRIPTION_VERBS.iter().any(|v| lower.starts_with(v));

        if looks_like_title {
            lines.push(SectionLine::Title {
                text: clean.to_string(),
            });
        } else {
            lines.push(SectionLine::Bullet {
                text: capitalize_first(clean),
            });
        }
    }
    lines
}

fn experience_lines(experience: &str) -> Vec<SectionLine> {
    split_entries(experience)
        .iter()
        .map(|entry| strip_bullet(entry))
        .filter(|clean| !clean.is_empty())
        .map(|clean| SectionLine::Bullet {
            text: capitalize_first(clean),
        })
        .collect()
}

/// `YYYY-MM-DD` → `DD Month YYYY`; anything else is returned trimmed.
pub fn format_dob(dob: &str) -> String {
    let dob = dob.trim();
    match NaiveDate::parse_from_str(dob, "%Y-%m-%d") {
        Ok(date) => date.format("%d %B %Y").to_string(),
        Err(_) => dob.to_string(),
    }
}

fn personal_details(profile: &ProfileSnapshot) -> Vec<SectionLine> {
    let mut lines = Vec::new();
    if !profile.dob.trim().is_empty() {
        lines.push(SectionLine::Text {
            text: format!("Date of Birth: {}", format_dob(&profile.dob)),
        });
    }
    if !profile.languages.trim().is_empty() {
        lines.push(SectionLine::Text {
            text: format!("Languages: {}", profile.languages.trim()),
        });
    }
    if !profile.hobbies.trim().is_empty() {
        lines.push(SectionLine::Text {
            text: format!("Hobbies: {}", profile.hobbies.trim()),
        });
    }
    lines
}

/// Builds the structured resume for `profile`. Empty sections are omitted.
pub fn build_document(profile: &ProfileSnapshot, template: ResumeTemplate) -> ResumeDocument {
    let mut sections = Vec::new();
    let mut push = |kind: SectionKind, lines: Vec<SectionLine>| {
        if !lines.is_empty() {
            sections.push(ResumeSection { kind, lines });
        }
    };

    push(
        SectionKind::Summary,
        profile
            .summary
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| SectionLine::Text {
                text: l.to_string(),
            })
            .collect(),
    );
    push(
        SectionKind::Education,
        split_entries(&profile.education)
            .into_iter()
            .map(|text| SectionLine::Text { text })
            .collect(),
    );

    let skills = merge_skills(&profile.skills);
    push(
        SectionKind::Skills,
        if skills.is_empty() {
            Vec::new()
        } else {
            vec![SectionLine::Skills {
                label: "Technical Skills:".to_string(),
                items: skills,
            }]
        },
    );
    push(SectionKind::Projects, project_lines(&profile.projects));
    push(SectionKind::Experience, experience_lines(&profile.experience));
    push(SectionKind::PersonalDetails, personal_details(profile));

    ResumeDocument {
        template,
        header: build_header(profile),
        sections,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl ResumeDocument {
    /// ATS-friendly plain text: upper-case headings over a rule of `─`.
    pub fn to_plain_text(&self) -> String {
        let divider = "─".repeat(SECTION_DIVIDER_WIDTH);
        let mut out = vec![
            self.header.name.clone(),
            self.header.headline.clone(),
            self.header.contact.join(" | "),
        ];
        if !self.header.additional_links.is_empty() {
            out.push(format!(
                "Additional Links: {}",
                self.header.additional_links.join(" | ")
            ));
        }

        for section in &self.sections {
            out.push(String::new());
            out.push(section.kind.heading().to_string());
            out.push(divider.clone());
            for line in &section.lines {
                out.push(match line {
                    SectionLine::Text { text } | SectionLine::Title { text } => text.clone(),
                    SectionLine::Bullet { text } => format!("• {text}"),
                    SectionLine::Skills { label, items } => {
                        format!("{label} {}", items.join(", "))
                    }
                });
            }
        }

        out.join("\n")
    }

    /// Standalone HTML page styled with the template's font.
    pub fn to_html(&self) -> String {
        let descriptor = self.template.descriptor();
        let mut body = String::new();

        body.push_str(&format!(
            "<header>\n<h1>{}</h1>\n<p class=\"headline\">{}</p>\n<p class=\"contact\">{}</p>\n",
            escape_html(&self.header.name),
            escape_html(&self.header.headline),
            escape_html(&self.header.contact.join(" | "))
        ));
        if !self.header.additional_links.is_empty() {
            body.push_str(&format!(
                "<p class=\"links\">Additional Links: {}</p>\n",
                escape_html(&self.header.additional_links.join(" | "))
            ));
        }
        body.push_str("</header>\n");

        for section in &self.sections {
            body.push_str(&format!(
                "<section>\n<h2>{}</h2>\n",
                escape_html(section.kind.title())
            ));
            let mut in_list = false;
            for line in &section.lines {
                let is_bullet = matches!(line, SectionLine::Bullet { .. });
                if is_bullet && !in_list {
                    body.push_str("<ul>\n");
                } else if !is_bullet && in_list {
                    body.push_str("</ul>\n");
                }
                in_list = is_bullet;

                match line {
                    SectionLine::Text { text } => {
                        body.push_str(&format!("<p>{}</p>\n", escape_html(text)))
                    }
                    SectionLine::Title { text } => {
                        body.push_str(&format!("<h3>{}</h3>\n", escape_html(text)))
                    }
                    SectionLine::Bullet { text } => {
                        body.push_str(&format!("<li>{}</li>\n", escape_html(text)))
                    }
                    SectionLine::Skills { label, items } => body.push_str(&format!(
                        "<p><strong>{}</strong> {}</p>\n",
                        escape_html(label),
                        escape_html(&items.join(", "))
                    )),
                }
            }
            if in_list {
                body.push_str("</ul>\n");
            }
            body.push_str("</section>\n");
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>\n\
             body {{ font-family: '{font}', sans-serif; font-size: {size}pt; line-height: {spacing}; \
             max-width: 8.5in; margin: 0.5in auto; color: #000; }}\n\
             header {{ text-align: center; }}\n\
             h1 {{ color: #1F4E79; margin-bottom: 4px; }}\n\
             h2 {{ color: #1F4E79; border-bottom: 1px solid #1F4E79; font-size: 1.1em; }}\n\
             h3 {{ font-size: 1em; margin: 6px 0 2px; }}\n\
             </style>\n</head>\n<body>\n{body}</body>\n</html>\n",
            title = escape_html(&self.header.name),
            font = descriptor.font,
            size = descriptor.size,
            spacing = descriptor.line_spacing,
            body = body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ProfileLinks;

    fn sample_profile() -> ProfileSnapshot {
        ProfileSnapshot {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            summary: "Engineer who ships.".to_string(),
            skills: "Rust, Python, rust, Docker".to_string(),
            projects: "Folio - resume builder in rust\nLedger\n- double-entry engine".to_string(),
            experience: "built payment rails | led migration".to_string(),
            education: "B.Tech CSE | Class XII".to_string(),
            links: ProfileLinks {
                github: "github.com/ada".to_string(),
                other: "ada.dev\n\nblog.ada.dev".to_string(),
                ..Default::default()
            },
            dob: "1990-12-10".to_string(),
            languages: "English".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_template_lookup_case_insensitive() {
        assert_eq!(ResumeTemplate::from_name("Modern"), Some(ResumeTemplate::Modern));
        assert_eq!(ResumeTemplate::from_name(" technical "), Some(ResumeTemplate::Technical));
        assert_eq!(ResumeTemplate::from_name("fancy"), None);
    }

    #[test]
    fn test_all_templates_have_descriptors() {
        let names: Vec<&str> = ResumeTemplate::ALL.iter().map(|t| t.descriptor().name).collect();
        assert_eq!(
            names,
            vec!["Professional", "Modern", "Simple", "Technical", "Academic", "Detailed"]
        );
        assert_eq!(ResumeTemplate::Academic.descriptor().font, "Times New Roman");
    }

    #[test]
    fn test_header_defaults_and_link_labels() {
        let doc = build_document(&ProfileSnapshot::default(), ResumeTemplate::Simple);
        assert_eq!(doc.header.name, "[YOUR NAME]");
        assert_eq!(doc.header.headline, "Professional Developer");
        assert_eq!(doc.header.contact, vec!["[Your Phone]", "[Your Email]"]);
        assert!(doc.sections.is_empty());

        let doc = build_document(&sample_profile(), ResumeTemplate::Simple);
        assert_eq!(doc.header.contact, vec!["555-0100", "ada@example.com", "GitHub"]);
        assert_eq!(doc.header.additional_links, vec!["ada.dev", "blog.ada.dev"]);
    }

    #[test]
    fn test_section_order() {
        let doc = build_document(&sample_profile(), ResumeTemplate::Professional);
        let kinds: Vec<SectionKind> = doc.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Summary,
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Projects,
                SectionKind::Experience,
                SectionKind::PersonalDetails,
            ]
        );
    }

    #[test]
    fn test_merge_skills_dedupes_case_insensitively() {
        assert_eq!(merge_skills("Rust, Python, rust, , Docker"), vec!["Rust", "Python", "Docker"]);
    }

    #[test]
    fn test_project_lines_split_titles_and_bullets() {
        let lines = project_lines("Folio - resume builder\nLedger\n- double-entry engine\nbuilt a CLI");
        assert_eq!(
            lines,
            vec![
                SectionLine::Title { text: "Folio".to_string() },
                SectionLine::Bullet { text: "Resume builder".to_string() },
                SectionLine::Title { text: "Ledger".to_string() },
                SectionLine::Bullet { text: "Double-entry engine".to_string() },
                SectionLine::Bullet { text: "Built a CLI".to_string() },
            ]
        );
    }

    #[test]
    fn test_experience_lines_are_capitalized_bullets() {
        assert_eq!(
            experience_lines("built payment rails | • led migration"),
            vec![
                SectionLine::Bullet { text: "Built payment rails".to_string() },
                SectionLine::Bullet { text: "Led migration".to_string() },
            ]
        );
    }

    #[test]
    fn test_format_dob() {
        assert_eq!(format_dob("1990-12-10"), "10 December 1990");
        assert_eq!(format_dob("10/12/1990"), "10/12/1990");
    }

    #[test]
    fn test_plain_text_layout() {
        let text = build_document(&sample_profile(), ResumeTemplate::Professional).to_plain_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ADA LOVELACE");
        assert_eq!(lines[2], "555-0100 | ada@example.com | GitHub");
        assert_eq!(lines[3], "Additional Links: ada.dev | blog.ada.dev");
        assert!(text.contains("SKILLS\n──────"));
        assert!(text.contains("Technical Skills: Rust, Python, Docker"));
        assert!(text.contains("• Built payment rails"));
        assert!(text.contains("Date of Birth: 10 December 1990"));
    }

    #[test]
    fn test_html_escapes_and_uses_template_font() {
        let profile = ProfileSnapshot {
            name: "<script>".to_string(),
            experience: "a & b".to_string(),
            ..Default::default()
        };
        let html = build_document(&profile, ResumeTemplate::Technical).to_html();
        assert!(html.contains("&lt;SCRIPT&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<li>A &amp; b</li>"));
        assert!(html.contains("Consolas"));
    }
}
