use chrono::{DateTime, Months, Utc};

use crate::report::Repository;

/// How many ranked repositories presentation surfaces show.
pub const DISPLAY_REPO_LIMIT: usize = 6;

/// How many recommendations are shown per repository.
pub const DISPLAY_RECOMMENDATION_LIMIT: usize = 3;

/// A repository with its derived ranking flags.
#[derive(Debug, Clone)]
pub struct RankedRepository {
    pub repository: Repository,
    /// No update in over one calendar year
    pub is_ghost: bool,
    /// Maturity score strictly above 80
    pub is_top_quality: bool,
}

impl RankedRepository {
    /// The recommendations presentation surfaces show (first 3).
    ///
    /// Display truncation only; the full list stays available on
    /// `repository.recommendations`.
    pub fn display_recommendations(&self) -> &[String] {
        let limit = DISPLAY_RECOMMENDATION_LIMIT.min(self.repository.recommendations.len());
        &self.repository.recommendations[..limit]
    }
}

/// Rank repositories for presentation.
///
/// Returns a new sequence sorted descending by maturity score; ties keep
/// their input order (stable sort). The input is not mutated. `now` is
/// passed explicitly so ghost detection is reproducible in tests.
pub fn rank(repositories: &[Repository], now: DateTime<Utc>) -> Vec<RankedRepository> {
    // "One year ago" is calendar-month arithmetic, not 365 * 86400 seconds,
    // so Feb 29 clamps to Feb 28 rather than drifting a day.
    let ghost_cutoff = now.checked_sub_months(Months::new(12)).unwrap_or(now);

    let mut ranked: Vec<RankedRepository> = repositories
        .iter()
        .map(|repo| RankedRepository {
            is_ghost: repo.updated_at <= ghost_cutoff,
            is_top_quality: repo.maturity_score.score > 80,
            repository: repo.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.repository
            .maturity_score
            .score
            .cmp(&a.repository.maturity_score.score)
    });

    ranked
}

/// The ranked repositories presentation surfaces show (first 6).
pub fn display_window(ranked: &[RankedRepository]) -> &[RankedRepository] {
    let limit = DISPLAY_REPO_LIMIT.min(ranked.len());
    &ranked[..limit]
}
