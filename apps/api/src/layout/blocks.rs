//! Rendered blocks — one positioned paragraph per resume line, sized with the
//! static font metrics.
//!
//! Height of a text block = wrapped lines × leading + space before + space after.
//! Blocks are stacked top-down; `y_offset` is measured from the top of the frame.

use serde::{Deserialize, Serialize};

use crate::layout::fitter::LayoutParameters;
use crate::layout::font_metrics::{get_metrics, FontFamily, PageConfig};
use crate::layout::template::{ResumeDocument, SectionKind, SectionLine};

const NAME_FONT_SIZE: f32 = 16.0;
const NAME_LEADING: f32 = 19.0;
const HEADLINE_FONT_SIZE: f32 = 12.0;
const HEADLINE_LEADING: f32 = 14.0;
const HEADER_SPACER_PT: f32 = 7.0;
const RULE_THICKNESS_PT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Name,
    Headline,
    Contact,
    Spacer,
    Heading,
    Rule,
    Summary,
    Normal,
    ProjectTitle,
    ProjectBullet,
    Bullet,
}

/// Typographic style of one block kind at the current parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub font: FontFamily,
    pub font_size: f32,
    pub leading: f32,
    pub indent: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl BlockKind {
    pub fn style(self, params: &LayoutParameters) -> BlockStyle {
        let body = BlockStyle {
            font: FontFamily::TimesRoman,
            font_size: params.font_size,
            leading: params.leading,
            indent: 0.0,
            space_before: 0.0,
            space_after: 0.0,
        };
        match self {
            BlockKind::Name => BlockStyle {
                font: FontFamily::TimesBold,
                font_size: NAME_FONT_SIZE,
                leading: NAME_LEADING,
                space_after: 6.0,
                ..body
            },
            BlockKind::Headline => BlockStyle {
                font_size: HEADLINE_FONT_SIZE,
                leading: HEADLINE_LEADING,
                space_after: 4.0,
                ..body
            },
            BlockKind::Contact => body,
            BlockKind::Spacer => BlockStyle {
                space_after: HEADER_SPACER_PT,
                ..body
            },
            BlockKind::Heading => BlockStyle {
                font: FontFamily::TimesBold,
                font_size: params.font_size + 1.0,
                leading: params.leading + 1.0,
                space_before: params.section_spacing,
                space_after: 3.0,
                ..body
            },
            BlockKind::Rule => BlockStyle {
                space_after: 2.0,
                ..body
            },
            BlockKind::Summary => BlockStyle {
                space_after: 3.0,
                ..body
            },
            BlockKind::Normal => BlockStyle {
                space_after: 2.0,
                ..body
            },
            BlockKind::ProjectTitle => BlockStyle {
                font: FontFamily::TimesBold,
                space_before: 4.0,
                space_after: 2.0,
                ..body
            },
            BlockKind::ProjectBullet => BlockStyle {
                indent: 12.0,
                space_after: 3.0,
                ..body
            },
            BlockKind::Bullet => BlockStyle {
                font_size: params.font_size - 1.0,
                leading: params.leading - 1.0,
                indent: 15.0,
                space_after: 1.0,
                ..body
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedBlock {
    pub kind: BlockKind,
    pub text: String,
    pub font: FontFamily,
    pub font_size: f32,
    pub leading: f32,
    pub indent: f32,
    pub space_before: f32,
    pub space_after: f32,
    /// Wrapped lines as they would be set on the page.
    pub lines: Vec<String>,
    pub height: f32,
    pub y_offset: f32,
}

impl RenderedBlock {
    fn new(kind: BlockKind, text: String, params: &LayoutParameters, page: &PageConfig) -> Self {
        let style = kind.style(params);
        let (lines, body_height) = match kind {
            BlockKind::Spacer => (Vec::new(), 0.0),
            BlockKind::Rule => (Vec::new(), RULE_THICKNESS_PT),
            _ => {
                let lines = get_metrics(&style.font).wrap_lines(
                    &text,
                    style.font_size,
                    page.frame_width() - style.indent,
                );
                let height = lines.len() as f32 * style.leading;
                (lines, height)
            }
        };

        RenderedBlock {
            kind,
            text,
            font: style.font,
            font_size: style.font_size,
            leading: style.leading,
            indent: style.indent,
            space_before: style.space_before,
            space_after: style.space_after,
            lines,
            height: style.space_before + body_height + style.space_after,
            y_offset: 0.0,
        }
    }
}

/// "ADA LOVELACE" → "Ada Lovelace".
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lays out `doc` at `params`, returning blocks in reading order with offsets.
pub fn render_blocks(
    doc: &ResumeDocument,
    params: &LayoutParameters,
    page: &PageConfig,
) -> Vec<RenderedBlock> {
    let mut blocks = Vec::new();
    let mut push = |kind: BlockKind, text: String| {
        blocks.push(RenderedBlock::new(kind, text, params, page));
    };

    push(BlockKind::Name, title_case(&doc.header.name));
    push(BlockKind::Headline, doc.header.headline.clone());
    push(BlockKind::Contact, doc.header.contact.join(" | "));
    push(BlockKind::Spacer, String::new());

    if !doc.header.additional_links.is_empty() {
        push(
            BlockKind::Normal,
            format!("Additional Links: {}", doc.header.additional_links.join(" | ")),
        );
    }

    for section in &doc.sections {
        push(BlockKind::Heading, section.kind.title().to_string());
        push(BlockKind::Rule, String::new());

        for line in &section.lines {
            match (section.kind, line) {
                (SectionKind::Summary, SectionLine::Text { text }) => {
                    push(BlockKind::Summary, text.clone())
                }
                (_, SectionLine::Text { text }) => push(BlockKind::Normal, text.clone()),
                (_, SectionLine::Title { text }) => push(BlockKind::ProjectTitle, text.clone()),
                (SectionKind::Projects, SectionLine::Bullet { text }) => {
                    push(BlockKind::ProjectBullet, format!("• {text}"))
                }
                (_, SectionLine::Bullet { text }) => push(BlockKind::Bullet, format!("• {text}")),
                (_, SectionLine::Skills { label, items }) => {
                    push(BlockKind::Normal, format!("{label} {}", items.join(", ")))
                }
            }
        }
    }

    let mut y = 0.0_f32;
    for block in &mut blocks {
        block.y_offset = y;
        y += block.height;
    }
    blocks
}

/// Sum of all block heights.
pub fn total_height(blocks: &[RenderedBlock]) -> f32 {
    blocks.iter().map(|b| b.height).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;
    use crate::layout::template::{build_document, ResumeTemplate};
    use crate::models::profile::ProfileSnapshot;

    fn profile() -> ProfileSnapshot {
        ProfileSnapshot {
            name: "ada lovelace".to_string(),
            summary: "Engineer.".to_string(),
            projects: "Folio - resume builder".to_string(),
            experience: "shipped things".to_string(),
            ..Default::default()
        }
    }

    fn blocks_for(profile: &ProfileSnapshot) -> Vec<RenderedBlock> {
        let doc = build_document(profile, ResumeTemplate::Professional);
        render_blocks(&doc, &LayoutParameters::default(), &default_page_config())
    }

    #[test]
    fn test_header_blocks_come_first() {
        let blocks = blocks_for(&profile());
        let kinds: Vec<BlockKind> = blocks.iter().take(4).map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Name, BlockKind::Headline, BlockKind::Contact, BlockKind::Spacer]
        );
        assert_eq!(blocks[0].text, "Ada Lovelace");
    }

    #[test]
    fn test_block_kinds_follow_sections() {
        let blocks = blocks_for(&profile());
        let kinds: Vec<BlockKind> = blocks.iter().skip(4).map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading,
                BlockKind::Rule,
                BlockKind::Summary,
                BlockKind::Heading,
                BlockKind::Rule,
                BlockKind::ProjectTitle,
                BlockKind::ProjectBullet,
                BlockKind::Heading,
                BlockKind::Rule,
                BlockKind::Bullet,
            ]
        );
    }

    #[test]
    fn test_height_includes_spacing() {
        let blocks = blocks_for(&profile());
        let name = &blocks[0];
        assert_eq!(name.lines.len(), 1);
        assert_eq!(name.height, 19.0 + 6.0);

        let spacer = &blocks[3];
        assert_eq!(spacer.height, 7.0);

        let heading = &blocks[4];
        // font 12, leading 15, before 6, after 3
        assert_eq!(heading.height, 15.0 + 6.0 + 3.0);

        let rule = &blocks[5];
        assert_eq!(rule.height, 2.5);
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let blocks = blocks_for(&profile());
        let mut expected = 0.0;
        for block in &blocks {
            assert_eq!(block.y_offset, expected);
            expected += block.height;
        }
        assert_eq!(total_height(&blocks), expected);
    }

    #[test]
    fn test_long_paragraph_wraps() {
        let long = ProfileSnapshot {
            summary: "experienced engineer ".repeat(40),
            ..Default::default()
        };
        let blocks = blocks_for(&long);
        let summary = blocks.iter().find(|b| b.kind == BlockKind::Summary).unwrap();
        assert!(summary.lines.len() > 1);
        assert_eq!(summary.height, summary.lines.len() as f32 * 14.0 + 3.0);
    }

    #[test]
    fn test_smaller_parameters_never_increase_height() {
        let doc = build_document(&profile(), ResumeTemplate::Professional);
        let page = default_page_config();
        let big = total_height(&render_blocks(&doc, &LayoutParameters::default(), &page));
        let small = LayoutParameters {
            font_size: 9.0,
            leading: 10.5,
            section_spacing: 2.0,
        };
        assert!(total_height(&render_blocks(&doc, &small, &page)) < big);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ADA  LOVELACE"), "Ada Lovelace");
        assert_eq!(title_case(""), "");
    }
}
