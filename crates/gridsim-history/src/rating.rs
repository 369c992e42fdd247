//! Composite driver rating.
//!
//! Four sub-scores are derived from [`DriverStatistics`], each min-max normalized
//! across the current driver population:
//!
//! | Sub-score          | Raw value              | Weight |
//! |--------------------|------------------------|--------|
//! | `norm_points`      | `avg_points`           | 0.40   |
//! | `norm_finish`      | `1 / avg_finish`       | 0.25   |
//! | `norm_consistency` | `1 / std_finish`       | 0.20   |
//! | `norm_reliability` | `1 - dnf_rate`         | 0.15   |
//!
//! The rating is their weighted sum, a convex combination that stays in `[0, 1]`.
//!
//! # Degenerate Inputs
//!
//! - A constant sub-score across the population maps to 0.5 for every driver.
//! - `std_finish` undefined (fewer than two classified finishes): `norm_consistency` is 0.5.
//! - `std_finish == 0`: the raw consistency is the largest finite consistency in the
//!   population (1.0 if there is none) instead of an infinite value.
//! - No classified finish at all: the raw finish quality is 0.
//!
//! Ratings are a snapshot of the statistics they were built from; rebuild them whenever
//! the population changes.

use std::collections::BTreeMap;

use gridsim_stats::{
    descriptive,
    normalize::{normalize_min_max, normalize_min_max_partial},
};
use serde::{Deserialize, Serialize};

use crate::statistics::DriverStatistics;

/// Weights of the four sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingWeights {
    pub points: f64,
    pub finish: f64,
    pub consistency: f64,
    pub reliability: f64,
}

impl RatingWeights {
    pub const STANDARD: Self = Self {
        points: 0.40,
        finish: 0.25,
        consistency: 0.20,
        reliability: 0.15,
    };

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.points + self.finish + self.consistency + self.reliability
    }
}

/// A driver's statistics together with the normalized sub-scores and composite rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRating {
    #[serde(flatten)]
    pub stats: DriverStatistics,
    /// `1 / avg_finish` (0 when never classified)
    pub finish_quality: f64,
    /// `1 / std_finish` after the degenerate-case policy, `None` when undefined
    pub consistency: Option<f64>,
    pub norm_points: f64,
    pub norm_finish: f64,
    pub norm_consistency: f64,
    pub norm_reliability: f64,
    pub rating: f64,
}

/// Rates every driver and returns them sorted by rating, best first.
///
/// Drivers with equal ratings keep their input order.
///
/// # Examples
///
/// ```
/// use gridsim_history::{rating::build_driver_rating, statistics::DriverStatistics};
///
/// let stats = |driver: &str, avg_points, avg_finish, dnf_rate| DriverStatistics {
///     driver: driver.to_owned(),
///     team: "Team".to_owned(),
///     avg_points,
///     avg_finish: Some(avg_finish),
///     std_finish: Some(2.0),
///     total_races: 10,
///     wins: 0,
///     podiums: 0,
///     dnf_count: 0,
///     dnf_rate,
/// };
/// let ratings = build_driver_rating(vec![
///     stats("SLOW", 2.0, 12.0, 0.2),
///     stats("FAST", 20.0, 2.0, 0.0),
/// ]);
/// assert_eq!(ratings[0].stats.driver, "FAST");
/// assert!((ratings[0].rating - 0.9).abs() < 1e-9);
/// assert!((ratings[1].rating - 0.1).abs() < 1e-9);
/// ```
#[must_use]
pub fn build_driver_rating(stats: Vec<DriverStatistics>) -> Vec<DriverRating> {
    build_driver_rating_with(stats, &RatingWeights::STANDARD)
}

/// Like [`build_driver_rating`], with explicit sub-score weights.
#[must_use]
pub fn build_driver_rating_with(
    stats: Vec<DriverStatistics>,
    weights: &RatingWeights,
) -> Vec<DriverRating> {
    let finish_quality = stats
        .iter()
        .map(|s| s.avg_finish.map_or(0.0, |avg| 1.0 / avg))
        .collect::<Vec<_>>();
    let consistency = consistency_scores(&stats);

    let norm_points = normalize_min_max(&stats.iter().map(|s| s.avg_points).collect::<Vec<_>>());
    let norm_finish = normalize_min_max(&finish_quality);
    let norm_consistency = normalize_min_max_partial(&consistency);
    let norm_reliability =
        normalize_min_max(&stats.iter().map(|s| 1.0 - s.dnf_rate).collect::<Vec<_>>());

    let mut ratings = stats
        .into_iter()
        .enumerate()
        .map(|(i, stats)| {
            let rating = weights.points * norm_points[i]
                + weights.finish * norm_finish[i]
                + weights.consistency * norm_consistency[i]
                + weights.reliability * norm_reliability[i];
            DriverRating {
                stats,
                finish_quality: finish_quality[i],
                consistency: consistency[i],
                norm_points: norm_points[i],
                norm_finish: norm_finish[i],
                norm_consistency: norm_consistency[i],
                norm_reliability: norm_reliability[i],
                rating: rating.clamp(0.0, 1.0),
            }
        })
        .collect::<Vec<_>>();

    // stable: equal ratings keep input order
    ratings.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    tracing::debug!(drivers = ratings.len(), "built driver ratings");
    ratings
}

/// Mean rating of each team's drivers, keyed by team.
///
/// Used as a team strength prior when no explicit baseline is supplied.
#[must_use]
pub fn team_mean_ratings(ratings: &[DriverRating]) -> BTreeMap<String, f64> {
    let mut by_team = BTreeMap::<&str, Vec<f64>>::new();
    for rating in ratings {
        by_team
            .entry(&rating.stats.team)
            .or_default()
            .push(rating.rating);
    }
    by_team
        .into_iter()
        .filter_map(|(team, values)| Some((team.to_owned(), descriptive::mean(values)?)))
        .collect()
}

fn consistency_scores(stats: &[DriverStatistics]) -> Vec<Option<f64>> {
    let raw = stats
        .iter()
        .map(|s| s.std_finish.map(|std| if std > 0.0 { 1.0 / std } else { f64::INFINITY }))
        .collect::<Vec<_>>();
    let cap = raw
        .iter()
        .flatten()
        .copied()
        .filter(|c| c.is_finite())
        .max_by(f64::total_cmp)
        .unwrap_or(1.0);
    raw.into_iter()
        .map(|c| c.map(|c| if c.is_finite() { c } else { cap }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(
        driver: &str,
        avg_points: f64,
        avg_finish: f64,
        std_finish: Option<f64>,
        dnf_rate: f64,
    ) -> DriverStatistics {
        DriverStatistics {
            driver: driver.to_owned(),
            team: format!("{driver} Racing"),
            avg_points,
            avg_finish: Some(avg_finish),
            std_finish,
            total_races: 20,
            wins: 0,
            podiums: 0,
            dnf_count: 0,
            dnf_rate,
        }
    }

    fn population() -> Vec<DriverStatistics> {
        vec![
            stats("AAA", 18.0, 2.5, Some(1.5), 0.05),
            stats("BBB", 4.0, 9.0, Some(4.0), 0.20),
            stats("CCC", 11.0, 5.0, Some(0.0), 0.10),
            stats("DDD", 0.5, 14.0, None, 0.50),
            stats("EEE", 8.0, 7.0, Some(3.0), 0.0),
        ]
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((RatingWeights::STANDARD.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scores_within_unit_interval() {
        for r in build_driver_rating(population()) {
            for v in [
                r.norm_points,
                r.norm_finish,
                r.norm_consistency,
                r.norm_reliability,
                r.rating,
            ] {
                assert!(
                    (0.0..=1.0).contains(&v),
                    "{v} out of range for {}",
                    r.stats.driver
                );
            }
        }
    }

    #[test]
    fn test_sorted_by_rating_descending() {
        let ratings = build_driver_rating(population());
        assert!(ratings.is_sorted_by(|a, b| a.rating >= b.rating));
        assert_eq!(ratings[0].stats.driver, "AAA");
        assert_eq!(ratings.last().unwrap().stats.driver, "DDD");
    }

    #[test]
    fn test_zero_std_finish_takes_population_maximum() {
        let ratings = build_driver_rating(population());
        let ccc = ratings.iter().find(|r| r.stats.driver == "CCC").unwrap();
        let aaa = ratings.iter().find(|r| r.stats.driver == "AAA").unwrap();
        assert_eq!(ccc.consistency, Some(1.0 / 1.5));
        assert_eq!(ccc.consistency, aaa.consistency);
        assert_eq!(ccc.norm_consistency, 1.0);
    }

    #[test]
    fn test_undefined_std_finish_is_neutral() {
        let ratings = build_driver_rating(population());
        let ddd = ratings.iter().find(|r| r.stats.driver == "DDD").unwrap();
        assert_eq!(ddd.consistency, None);
        assert_eq!(ddd.norm_consistency, 0.5);
        assert!(ddd.rating.is_finite());
    }

    #[test]
    fn test_all_zero_std_finish_is_constant() {
        let ratings = build_driver_rating(vec![
            stats("AAA", 10.0, 3.0, Some(0.0), 0.0),
            stats("BBB", 5.0, 6.0, Some(0.0), 0.0),
        ]);
        for r in &ratings {
            assert_eq!(r.consistency, Some(1.0));
            assert_eq!(r.norm_consistency, 0.5);
            assert_eq!(r.norm_reliability, 0.5);
        }
    }

    #[test]
    fn test_single_driver_is_neutral() {
        let ratings = build_driver_rating(vec![stats("AAA", 10.0, 3.0, Some(1.0), 0.1)]);
        assert!((ratings[0].rating - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ratings = build_driver_rating(vec![
            stats("ZZZ", 10.0, 3.0, Some(1.0), 0.1),
            stats("AAA", 10.0, 3.0, Some(1.0), 0.1),
        ]);
        assert_eq!(ratings[0].stats.driver, "ZZZ");
        assert_eq!(ratings[1].stats.driver, "AAA");
    }

    #[test]
    fn test_never_classified_driver_has_worst_finish_quality() {
        let mut never = stats("NNN", 0.0, 1.0, None, 1.0);
        never.avg_finish = None;
        let ratings = build_driver_rating(vec![stats("AAA", 10.0, 3.0, Some(1.0), 0.0), never]);
        let nnn = ratings.iter().find(|r| r.stats.driver == "NNN").unwrap();
        assert_eq!(nnn.finish_quality, 0.0);
        assert_eq!(nnn.norm_finish, 0.0);
        assert_eq!(nnn.rating, 0.2 * 0.5);
    }

    #[test]
    fn test_team_mean_ratings() {
        let mut ratings = build_driver_rating(population());
        for r in &mut ratings {
            r.stats.team = "Shared".to_owned();
        }
        let teams = team_mean_ratings(&ratings);
        let mean = ratings.iter().map(|r| r.rating).sum::<f64>() / ratings.len() as f64;
        assert_eq!(teams.len(), 1);
        assert!((teams["Shared"] - mean).abs() < 1e-12);
    }
}
