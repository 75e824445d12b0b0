//! Layout Fitter — shrinks typography, then content, until the resume fits one page.
//!
//! # Architecture
//! - `fit_to_page` is a bounded loop (`MAX_ITERATIONS`) of measure → degrade.
//! - Degradations are an ordered list (`DEGRADATION_ORDER`); each iteration applies
//!   the first step that still has room, so the order alone decides priority.
//! - Parameters only ever decrease. Content compression is one-shot per step.
//! - The loop is CPU-bound; HTTP callers run it inside `tokio::task::spawn_blocking`.
//!
//! The fitter never fails: when the budget runs out it returns the last measured
//! layout with an `Overflow` verdict.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::layout::blocks::{render_blocks, total_height, RenderedBlock};
use crate::layout::compressor::{compress_projects, compress_summary};
use crate::layout::font_metrics::PageConfig;
use crate::layout::template::{build_document, ResumeTemplate};
use crate::models::profile::ProfileSnapshot;

pub const MAX_ITERATIONS: u32 = 10;
pub const STEP_PT: f32 = 0.5;
pub const MIN_SECTION_SPACING: f32 = 2.0;
pub const MIN_FONT_SIZE: f32 = 8.0;
/// Leading never drops below `font_size + LEADING_FLOOR_OFFSET`.
pub const LEADING_FLOOR_OFFSET: f32 = 1.0;
/// Leading after a font-size step is capped at `font_size + LEADING_RESET_OFFSET`.
pub const LEADING_RESET_OFFSET: f32 = 1.5;
pub const IDEAL_UTILIZATION: f32 = 0.95;
pub const GOOD_UTILIZATION: f32 = 0.90;

// ────────────────────────────────────────────────────────────────────────────
// Parameters
// ────────────────────────────────────────────────────────────────────────────

/// Typographic settings owned by one fitting run, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    pub font_size: f32,
    pub leading: f32,
    pub section_spacing: f32,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            leading: 14.0,
            section_spacing: 6.0,
        }
    }
}

impl LayoutParameters {
    /// True when no field of `self` exceeds the matching field of `previous`.
    pub fn is_within(&self, previous: &LayoutParameters) -> bool {
        self.font_size <= previous.font_size
            && self.leading <= previous.leading
            && self.section_spacing <= previous.section_spacing
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Degradation steps
// ────────────────────────────────────────────────────────────────────────────

/// Mutable state a degradation step may act on.
#[derive(Debug, Clone)]
pub struct FitState {
    pub parameters: LayoutParameters,
    pub profile: ProfileSnapshot,
    pub summary_compressed: bool,
    pub projects_compressed: bool,
}

impl FitState {
    pub fn new(profile: ProfileSnapshot) -> Self {
        Self {
            parameters: LayoutParameters::default(),
            profile,
            summary_compressed: false,
            projects_compressed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationStep {
    TightenSectionSpacing,
    TightenLeading,
    ShrinkFont,
    CompressSummary,
    CompressProjects,
}

/// Priority order: whitespace first, then type, then content.
pub const DEGRADATION_ORDER: [DegradationStep; 5] = [
    DegradationStep::TightenSectionSpacing,
    DegradationStep::TightenLeading,
    DegradationStep::ShrinkFont,
    DegradationStep::CompressSummary,
    DegradationStep::CompressProjects,
];

impl DegradationStep {
    /// Applies the step if it still has room. Returns `false` when exhausted.
    pub fn apply(self, state: &mut FitState) -> bool {
        let p = &mut state.parameters;
        match self {
            DegradationStep::TightenSectionSpacing => {
                if p.section_spacing > MIN_SECTION_SPACING {
                    p.section_spacing -= STEP_PT;
                    return true;
                }
                false
            }
            DegradationStep::TightenLeading => {
                if p.leading > p.font_size + LEADING_FLOOR_OFFSET {
                    p.leading -= STEP_PT;
                    return true;
                }
                false
            }
            DegradationStep::ShrinkFont => {
                if p.font_size > MIN_FONT_SIZE {
                    p.font_size -= STEP_PT;
                    p.leading = p.leading.min(p.font_size + LEADING_RESET_OFFSET);
                    return true;
                }
                false
            }
            DegradationStep::CompressSummary => {
                if state.summary_compressed || state.profile.summary.trim().is_empty() {
                    return false;
                }
                state.summary_compressed = true;
                replace_if_changed(&mut state.profile.summary, compress_summary)
            }
            DegradationStep::CompressProjects => {
                if state.projects_compressed || state.profile.projects.trim().is_empty() {
                    return false;
                }
                state.projects_compressed = true;
                replace_if_changed(&mut state.profile.projects, compress_projects)
            }
        }
    }
}

/// Compression that leaves the text as it was does not count as a step.
fn replace_if_changed(field: &mut String, compress: fn(&str) -> String) -> bool {
    let compressed = compress(field);
    if compressed == *field {
        return false;
    }
    *field = compressed;
    true
}

/// Applies the first step in `DEGRADATION_ORDER` that has room.
pub fn degrade_once(state: &mut FitState) -> Option<DegradationStep> {
    DEGRADATION_ORDER.into_iter().find(|step| step.apply(state))
}

// ────────────────────────────────────────────────────────────────────────────
// Outcome
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitVerdict {
    /// Fits with ≥ 95% of the page used.
    Ideal,
    /// Fits with 90–95% used.
    Good,
    /// Fits but leaves more than 10% whitespace. Spacing is never grown back.
    Underfilled,
    /// Still taller than the page after the budget ran out.
    Overflow,
}

impl FitVerdict {
    pub fn classify(total_height: f32, page_height: f32) -> Self {
        if total_height > page_height {
            return FitVerdict::Overflow;
        }
        let utilization = total_height / page_height;
        if utilization >= IDEAL_UTILIZATION {
            FitVerdict::Ideal
        } else if utilization >= GOOD_UTILIZATION {
            FitVerdict::Good
        } else {
            FitVerdict::Underfilled
        }
    }

    pub fn fits(self) -> bool {
        !matches!(self, FitVerdict::Overflow)
    }

    /// Fits with at least [`GOOD_UTILIZATION`] of the page used. Anything else
    /// keeps degrading; spacing is never grown back to fill whitespace.
    pub fn is_accepted(self) -> bool {
        matches!(self, FitVerdict::Ideal | FitVerdict::Good)
    }
}

/// One measured iteration, plus the step applied after it (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u32,
    pub parameters: LayoutParameters,
    pub total_height: f32,
    pub utilization: f32,
    pub applied: Option<DegradationStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOutcome {
    pub template: ResumeTemplate,
    pub parameters: LayoutParameters,
    pub blocks: Vec<RenderedBlock>,
    pub total_height: f32,
    pub page_height: f32,
    pub utilization: f32,
    pub iterations: u32,
    pub verdict: FitVerdict,
    pub summary_compressed: bool,
    pub projects_compressed: bool,
    pub history: Vec<IterationRecord>,
    /// The profile as finally laid out, after any compression.
    pub profile: ProfileSnapshot,
}

// ────────────────────────────────────────────────────────────────────────────
// Fitting loop
// ────────────────────────────────────────────────────────────────────────────

/// Fits `profile` onto a single page of `page`.
///
/// Each iteration renders and measures; a fit using at least 90% of the page
/// ends the loop, otherwise exactly one degradation step is applied. An
/// underfilled fit keeps degrading like an overflow. Stops early when no
/// step has room left.
pub fn fit_to_page(
    profile: ProfileSnapshot,
    template: ResumeTemplate,
    page: &PageConfig,
) -> FitOutcome {
    let page_height = page.frame_height();
    let mut state = FitState::new(profile);
    let mut history: Vec<IterationRecord> = Vec::new();

    let mut iteration = 0;
    let (blocks, total, verdict) = loop {
        iteration += 1;

        let doc = build_document(&state.profile, template);
        let blocks = render_blocks(&doc, &state.parameters, page);
        let total = total_height(&blocks);
        let verdict = FitVerdict::classify(total, page_height);

        debug!(
            iteration,
            font_size = state.parameters.font_size,
            leading = state.parameters.leading,
            section_spacing = state.parameters.section_spacing,
            total_height = total,
            page_height,
            "Layout fit iteration"
        );

        let mut record = IterationRecord {
            iteration,
            parameters: state.parameters,
            total_height: total,
            utilization: total / page_height,
            applied: None,
        };

        if verdict.is_accepted() || iteration >= MAX_ITERATIONS {
            history.push(record);
            break (blocks, total, verdict);
        }

        record.applied = degrade_once(&mut state);
        debug_assert!(state.parameters.is_within(&record.parameters));
        let exhausted = record.applied.is_none();
        history.push(record);

        if exhausted {
            break (blocks, total, verdict);
        }
    };

    let utilization = total / page_height;
    if verdict.fits() {
        info!(
            iterations = iteration,
            utilization,
            ?verdict,
            "Resume fitted to one page"
        );
    } else {
        warn!(
            iterations = iteration,
            total_height = total,
            page_height,
            "Resume still overflows one page after degradation budget"
        );
    }

    FitOutcome {
        template,
        parameters: state.parameters,
        blocks,
        total_height: total,
        page_height,
        utilization,
        iterations: iteration,
        verdict,
        summary_compressed: state.summary_compressed,
        projects_compressed: state.projects_compressed,
        history,
        profile: state.profile,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
