use std::collections::BTreeMap;

use gridsim_stats::descriptive::{self, DescriptiveStats};
use serde::{Deserialize, Serialize};

use crate::record::DriverRecord;

/// Aggregate historical statistics of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStatistics {
    pub driver: String,
    /// Team of the driver's most recent race
    pub team: String,
    pub avg_points: f64,
    /// Mean classified finishing position, `None` if never classified
    pub avg_finish: Option<f64>,
    /// Sample standard deviation of classified finishing positions,
    /// `None` with fewer than two classified finishes
    pub std_finish: Option<f64>,
    pub total_races: usize,
    pub wins: u32,
    pub podiums: u32,
    pub dnf_count: usize,
    /// `dnf_count / total_races`
    pub dnf_rate: f64,
}

/// Groups rows by driver and computes [`DriverStatistics`] for each.
///
/// The result is ordered by driver identifier.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn compute_driver_statistics(records: &[DriverRecord]) -> Vec<DriverStatistics> {
    let mut by_driver = BTreeMap::<&str, Vec<&DriverRecord>>::new();
    for record in records {
        by_driver.entry(&record.driver).or_default().push(record);
    }

    by_driver
        .into_iter()
        .map(|(driver, rows)| {
            let total_races = rows.len();
            let positions = rows.iter().filter_map(|r| r.finish_position);
            let finishes = DescriptiveStats::new(positions.map(f64::from));
            let dnf_count = rows.iter().filter(|r| !r.is_classified()).count();
            let latest = rows
                .iter()
                .max_by_key(|r| r.race_key())
                .expect("driver group is never empty");

            DriverStatistics {
                driver: driver.to_owned(),
                team: latest.team.clone(),
                avg_points: descriptive::mean(rows.iter().map(|r| r.points)).unwrap_or(0.0),
                avg_finish: finishes.as_ref().map(|s| s.mean),
                std_finish: finishes.as_ref().and_then(|s| s.sample_std_dev),
                total_races,
                wins: count_u32(rows.iter().filter(|r| r.is_win())),
                podiums: count_u32(rows.iter().filter(|r| r.is_podium())),
                dnf_count,
                dnf_rate: dnf_count as f64 / total_races as f64,
            }
        })
        .collect()
}

fn count_u32<I>(iter: I) -> u32
where
    I: Iterator,
{
    u32::try_from(iter.count()).unwrap_or(u32::MAX)
}
