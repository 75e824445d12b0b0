//! PDF writer — draws a fitted layout onto one page with the base-14 Times fonts.
//!
//! Block positions come straight from the fitter, so the page matches what was
//! measured. `y_offset` is measured down from the top of the frame; PDF space
//! grows upward from the bottom edge.

use anyhow::anyhow;
use pdf_oxide::writer::{DocumentBuilder, DocumentMetadata, PageSize};

use crate::layout::blocks::{BlockKind, RenderedBlock};
use crate::layout::fitter::FitOutcome;
use crate::layout::font_metrics::{FontFamily, PageConfig};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

fn base_font(font: FontFamily) -> &'static str {
    match font {
        FontFamily::TimesRoman => "Times-Roman",
        FontFamily::TimesBold => "Times-Bold",
    }
}

/// Baseline of each wrapped line, in PDF coordinates.
fn line_baselines(block: &RenderedBlock, frame_top: f32) -> impl Iterator<Item = f32> + '_ {
    let first_line_top = frame_top - block.y_offset - block.space_before;
    (0..block.lines.len()).map(move |i| first_line_top - i as f32 * block.leading - block.font_size)
}

/// `resume_ada_lovelace.pdf`. Characters that could break the header are dropped.
pub fn download_filename(name: &str) -> String {
    let stem: String = name
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    format!("resume_{stem}.pdf")
}

/// Renders `outcome` to PDF bytes on a page of `page`'s size.
pub fn render_pdf(outcome: &FitOutcome, page: &PageConfig) -> anyhow::Result<Vec<u8>> {
    let title = match outcome.profile.name.trim() {
        "" => "Resume".to_string(),
        name => format!("{name} - Resume"),
    };
    let mut doc = DocumentBuilder::new()
        .metadata(DocumentMetadata::new().title(title).creator("folio-api"));

    let frame_top = page.page_height_pt - page.margin_pt;
    let mut canvas = doc.page(PageSize::Custom(page.page_width_pt, page.page_height_pt));

    for block in &outcome.blocks {
        let x = page.margin_pt + block.indent;
        canvas = canvas.font(base_font(block.font), block.font_size);
        match block.kind {
            BlockKind::Spacer => {}
            BlockKind::Rule => {
                // The rule is drawn half a font size above the cursor.
                let rule_y = frame_top - block.y_offset - block.space_before;
                canvas = canvas.at(x, rule_y - block.font_size * 0.5).horizontal_rule();
            }
            _ => {
                for (line, baseline) in block.lines.iter().zip(line_baselines(block, frame_top)) {
                    canvas = canvas.at(x, baseline).text(line);
                }
            }
        }
    }
    canvas.done();

    doc.build().map_err(|e| anyhow!("PDF build failed: {e}"))
}
