use crate::poller::PollState;
use crate::report::ScoreDetail;
use crate::score::{self, Band};

/// Shown when a score has no positives and no negatives to break down.
pub const NO_BREAKDOWN_FALLBACK: &str = "No breakdown available for this score.";

/// The positives/negatives grouping of a score, borrowed from the detail.
#[derive(Debug, Clone, Copy)]
pub struct ScoreBreakdown<'a> {
    pub positives: &'a [String],
    pub negatives: &'a [String],
}

/// Whether a score has any breakdown worth showing.
///
/// Gates the detail affordance: when this is false the view renders
/// [`NO_BREAKDOWN_FALLBACK`] instead of an empty section.
pub fn has_detail(detail: &ScoreDetail) -> bool {
    !detail.positives.is_empty() || !detail.negatives.is_empty()
}

/// The breakdown to render, or `None` when the fallback applies.
pub fn breakdown(detail: &ScoreDetail) -> Option<ScoreBreakdown<'_>> {
    has_detail(detail).then_some(ScoreBreakdown {
        positives: &detail.positives,
        negatives: &detail.negatives,
    })
}

/// Display label for a score.
///
/// Server-supplied labels are display text only; when absent the band label
/// recomputed via [`score::classify`] stands in. Colors and thresholds never
/// come from the server label.
pub fn score_label(detail: &ScoreDetail) -> &str {
    match detail.level.as_deref() {
        Some(level) if !level.is_empty() => level,
        _ => band_of(detail).label(),
    }
}

/// The recomputed band for a score. The one threshold source.
pub fn band_of(detail: &ScoreDetail) -> Band {
    score::classify(detail.score)
}

/// Human-readable message for a lifecycle state, shown while waiting.
pub fn status_message(state: PollState) -> &'static str {
    match state {
        PollState::Idle => "Idle.",
        PollState::Starting => "Submitting analysis request...",
        PollState::Queued => "Analysis queued...",
        PollState::Deferred => "Analysis deferred, waiting for a worker...",
        PollState::Started => "Analyzing profile (this may take a minute)...",
        PollState::Finished => "Analysis complete!",
        PollState::Failed => "Analysis failed.",
        PollState::PollingError => "Lost track of the analysis job.",
    }
}
