//! Per-driver, per-race derived signals.
//!
//! The deriver enriches each [`DriverRecord`] into a [`DerivedRaceRow`] in five stages:
//!
//! 1. [`add_basic_flags`] - win / podium / top-5 flags
//! 2. [`add_cumulative_features`] - season-to-date points, wins and podiums
//! 3. [`add_rolling_features`] - trailing points momentum and average finish
//! 4. [`add_consistency_score`] - trailing average finish over a longer window
//! 5. [`add_championship_gap`] - points behind the leader of each race instance
//!
//! Every stage is a pure transform over the row slice. Stages that work per driver sort
//! the rows by `(driver, year, round)` first, so the result does not depend on the input
//! order. Stage 2 reads the flags of stage 1, and stage 5 reads the cumulative points of
//! stage 2; [`derive_features`] runs all stages in the required order.
//!
//! # Example
//!
//! ```
//! use gridsim_history::{features::{FeatureWindows, derive_features}, record::DriverRecord};
//!
//! let record = |round, points| DriverRecord {
//!     year: 2024,
//!     round,
//!     gp: format!("Round {round}"),
//!     driver: "VER".to_owned(),
//!     team: "Red Bull Racing".to_owned(),
//!     finish_position: Some(1),
//!     points,
//!     avg_lap_time: None,
//!     fastest_lap: None,
//!     laps_completed: None,
//! };
//! // Deliberately out of order
//! let records = [record(3, 5.0), record(1, 10.0), record(2, 0.0)];
//!
//! let rows = derive_features(&records, &FeatureWindows::default());
//! let cumulative = rows.iter().map(|r| r.cumulative_points).collect::<Vec<_>>();
//! assert_eq!(cumulative, vec![10.0, 10.0, 15.0]);
//! assert_eq!(rows[2].points_momentum, 5.0);
//! ```

use std::{collections::HashMap, num::NonZeroUsize};

use gridsim_stats::rolling;
use serde::{Deserialize, Serialize};

use crate::record::{DriverRecord, RaceKey};

/// Window sizes for the trailing-mean features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureWindows {
    /// Window for `points_momentum` and `avg_finish_last_n`
    pub momentum: NonZeroUsize,
    /// Window for `consistency_score`
    pub consistency: NonZeroUsize,
}

impl FeatureWindows {
    pub const DEFAULT_MOMENTUM: NonZeroUsize = NonZeroUsize::new(3).unwrap();
    pub const DEFAULT_CONSISTENCY: NonZeroUsize = NonZeroUsize::new(5).unwrap();
}

impl Default for FeatureWindows {
    fn default() -> Self {
        Self {
            momentum: Self::DEFAULT_MOMENTUM,
            consistency: Self::DEFAULT_CONSISTENCY,
        }
    }
}

/// A [`DriverRecord`] plus its derived features.
///
/// Derived columns start at zero / `false` / `None` and are filled in by the stage
/// functions of this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRaceRow {
    pub year: u16,
    pub round: u32,
    pub gp: String,
    pub driver: String,
    pub team: String,
    pub finish_position: Option<u32>,
    pub points: f64,
    pub avg_lap_time: Option<f64>,
    pub fastest_lap: Option<f64>,
    pub laps_completed: Option<u32>,

    pub is_win: bool,
    pub is_podium: bool,
    pub is_top5: bool,
    pub cumulative_points: f64,
    pub cumulative_wins: u32,
    pub cumulative_podiums: u32,
    pub points_momentum: f64,
    pub avg_finish_last_n: Option<f64>,
    pub consistency_score: Option<f64>,
    pub points_gap_to_leader: f64,
}

impl From<DriverRecord> for DerivedRaceRow {
    fn from(record: DriverRecord) -> Self {
        let DriverRecord {
            year,
            round,
            gp,
            driver,
            team,
            finish_position,
            points,
            avg_lap_time,
            fastest_lap,
            laps_completed,
        } = record;
        Self {
            year,
            round,
            gp,
            driver,
            team,
            finish_position,
            points,
            avg_lap_time,
            fastest_lap,
            laps_completed,
            is_win: false,
            is_podium: false,
            is_top5: false,
            cumulative_points: 0.0,
            cumulative_wins: 0,
            cumulative_podiums: 0,
            points_momentum: 0.0,
            avg_finish_last_n: None,
            consistency_score: None,
            points_gap_to_leader: 0.0,
        }
    }
}

impl DerivedRaceRow {
    #[must_use]
    pub fn race_key(&self) -> RaceKey {
        RaceKey {
            year: self.year,
            round: self.round,
        }
    }

    fn finish_as_f64(&self) -> Option<f64> {
        self.finish_position.map(f64::from)
    }
}

/// Runs every stage in order and returns rows sorted by `(driver, year, round)`.
#[must_use]
pub fn derive_features(records: &[DriverRecord], windows: &FeatureWindows) -> Vec<DerivedRaceRow> {
    let mut rows = records
        .iter()
        .cloned()
        .map(DerivedRaceRow::from)
        .collect::<Vec<_>>();
    add_basic_flags(&mut rows);
    add_cumulative_features(&mut rows);
    add_rolling_features(&mut rows, windows.momentum);
    add_consistency_score(&mut rows, windows.consistency);
    add_championship_gap(&mut rows);
    tracing::debug!(rows = rows.len(), "derived race features");
    rows
}

/// Sets `is_win`, `is_podium` and `is_top5`. DNF rows get `false` for all three.
pub fn add_basic_flags(rows: &mut [DerivedRaceRow]) {
    for row in rows {
        let position = row.finish_position;
        row.is_win = position == Some(crate::record::WIN_POSITION);
        row.is_podium = position.is_some_and(|p| p <= crate::record::PODIUM_POSITIONS);
        row.is_top5 = position.is_some_and(|p| p <= crate::record::TOP5_POSITIONS);
    }
}

/// Sorts the rows and sets per-driver, season-to-date running sums of points, wins and
/// podiums. The sums restart at the first race of every season.
pub fn add_cumulative_features(rows: &mut [DerivedRaceRow]) {
    sort_by_driver(rows);
    for driver_rows in rows.chunk_by_mut(|a, b| a.driver == b.driver && a.year == b.year) {
        let mut points = 0.0;
        let mut wins = 0;
        let mut podiums = 0;
        for row in driver_rows {
            points += row.points;
            wins += u32::from(row.is_win);
            podiums += u32::from(row.is_podium);
            row.cumulative_points = points;
            row.cumulative_wins = wins;
            row.cumulative_podiums = podiums;
        }
    }
}

/// Sorts the rows and sets `points_momentum` and `avg_finish_last_n`.
///
/// The window runs over the driver's races in order and carries across seasons.
pub fn add_rolling_features(rows: &mut [DerivedRaceRow], window: NonZeroUsize) {
    for driver_rows in sorted_driver_chunks(rows) {
        let points = driver_rows
            .iter()
            .map(|r| Some(r.points))
            .collect::<Vec<_>>();
        let finishes = driver_rows
            .iter()
            .map(DerivedRaceRow::finish_as_f64)
            .collect::<Vec<_>>();
        let momentum = rolling::trailing_mean(&points, window);
        let avg_finish = rolling::trailing_mean(&finishes, window);
        for ((row, momentum), avg_finish) in driver_rows.iter_mut().zip(momentum).zip(avg_finish) {
            row.points_momentum = momentum.unwrap_or(0.0);
            row.avg_finish_last_n = avg_finish;
        }
    }
}

/// Sorts the rows and sets `consistency_score` (trailing mean finish position).
pub fn add_consistency_score(rows: &mut [DerivedRaceRow], window: NonZeroUsize) {
    for driver_rows in sorted_driver_chunks(rows) {
        let finishes = driver_rows
            .iter()
            .map(DerivedRaceRow::finish_as_f64)
            .collect::<Vec<_>>();
        let consistency = rolling::trailing_mean(&finishes, window);
        for (row, score) in driver_rows.iter_mut().zip(consistency) {
            row.consistency_score = score;
        }
    }
}

/// Sets `points_gap_to_leader` from the cumulative points of each race instance.
pub fn add_championship_gap(rows: &mut [DerivedRaceRow]) {
    let mut leader_points = HashMap::<RaceKey, f64>::new();
    for row in rows.iter() {
        leader_points
            .entry(row.race_key())
            .and_modify(|max| *max = f64::max(*max, row.cumulative_points))
            .or_insert(row.cumulative_points);
    }
    for row in rows {
        let leader = leader_points[&row.race_key()];
        row.points_gap_to_leader = (leader - row.cumulative_points).max(0.0);
    }
}

fn sort_by_driver(rows: &mut [DerivedRaceRow]) {
    rows.sort_by(|a, b| {
        a.driver
            .cmp(&b.driver)
            .then_with(|| a.race_key().cmp(&b.race_key()))
    });
}

fn sorted_driver_chunks(
    rows: &mut [DerivedRaceRow],
) -> impl Iterator<Item = &mut [DerivedRaceRow]> {
    sort_by_driver(rows);
    rows.chunk_by_mut(|a, b| a.driver == b.driver)
}
