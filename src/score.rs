use serde::{Deserialize, Serialize};

/// Qualitative band derived from a numeric 0-100 score.
///
/// This is the single source of truth for score thresholds. Every surface
/// that colors or labels a score (tables, badges, breakdown headers) must go
/// through [`classify`] rather than carrying its own copy of the cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
        }
    }
}

/// Classify a score into its band.
///
/// Total over 0..=100 and monotonic non-decreasing: `>= 80` is high,
/// `50..=79` is medium, everything below is low.
pub fn classify(score: u8) -> Band {
    if score >= 80 {
        Band::High
    } else if score >= 50 {
        Band::Medium
    } else {
        Band::Low
    }
}
