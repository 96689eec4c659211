use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A scored metric with its qualitative breakdown.
///
/// `level` is a service-supplied display label (e.g. "Good",
/// "Production-Grade"). It is carried for display only; band decisions are
/// always recomputed from `score` via [`crate::score::classify`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreDetail {
    /// Numeric score in 0..=100
    pub score: u8,
    /// Optional descriptive label from the service (display text only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// What the analyzer liked, in report order
    #[serde(default)]
    pub positives: Vec<String>,
    /// What the analyzer flagged, in report order
    #[serde(default)]
    pub negatives: Vec<String>,
}

/// A single analyzed repository from the report details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Repository description, if any
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language, if detected
    #[serde(default)]
    pub language: Option<String>,
    /// Stargazer count
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count
    #[serde(default)]
    pub forks_count: u64,
    /// When the repository was last updated
    pub updated_at: DateTime<Utc>,
    /// Link to the repository
    pub html_url: String,
    /// Whether a CI pipeline was detected
    #[serde(default)]
    pub has_ci: bool,
    /// Whether a Dockerfile or compose setup was detected
    #[serde(default)]
    pub has_docker: bool,
    /// Whether a test suite was detected
    #[serde(default)]
    pub has_tests: bool,
    /// Whether a license file was detected
    #[serde(default)]
    pub has_license: bool,
    /// Detected dependency names
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    /// Production-readiness score
    #[serde(default)]
    pub maturity_score: ScoreDetail,
    /// Documentation quality score
    #[serde(default)]
    pub docs_score: ScoreDetail,
    /// Code hygiene score
    #[serde(default)]
    pub hygiene_score: ScoreDetail,
    /// Maturity classification label (e.g. "Production-Grade", "Hobby")
    #[serde(default)]
    pub maturity_label: Option<String>,
    /// Per-repository improvement recommendations, in priority order
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Severity of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// An actionable suggestion for the profile as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggestion category (e.g. "Profile", "Documentation")
    pub category: String,
    /// How urgent the suggestion is
    pub severity: Severity,
    /// The suggestion text (may contain markdown)
    pub message: String,
}

/// One numbered step of the career roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapStep {
    /// Step number; sequence order is meaningful
    pub step: u32,
    /// What to do in this step
    pub description: String,
}

/// Detail section of an analysis report.
///
/// Keys the service sends beyond the known ones are preserved in `extra`
/// (insertion order kept) so a JSON export round-trips the full response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Number of repositories scanned
    #[serde(default)]
    pub repo_count: usize,
    /// Analyzed repositories
    #[serde(default)]
    pub repositories: Vec<Repository>,
    /// Suggested career roadmap, in step order
    #[serde(default)]
    pub career_roadmap: Vec<RoadmapStep>,
    /// Any additional detail keys the service included
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// The final report produced by a finished analysis job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The analyzed username
    pub username: String,
    /// Overall profile score
    pub overall_score: ScoreDetail,
    /// Profile health score (bio, README, socials)
    pub profile_score: ScoreDetail,
    /// Average repository documentation score
    pub docs_score: ScoreDetail,
    /// Repository standards score
    pub repo_quality_score: ScoreDetail,
    /// Average code hygiene score
    pub hygiene_score: ScoreDetail,
    /// Human-readable summary (may contain markdown)
    #[serde(default)]
    pub summary: String,
    /// Profile-level suggestions
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    /// Detailed findings
    #[serde(default)]
    pub details: AnalysisDetails,
}
