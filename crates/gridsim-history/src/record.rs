//! Historical race-result rows.
//!
//! A [`DriverRecord`] is one driver's result in one race. Rows are produced by
//! [`season::build_race_summary`](crate::season::build_race_summary) from a session
//! source, or loaded from a historical dataset file whose columns are the field names
//! of this struct:
//!
//! ```text
//! year,round,gp,driver,team,finish_position,points,avg_lap_time,fastest_lap,laps_completed
//! 2024,1,Bahrain Grand Prix,VER,Red Bull Racing,1,26,97.3,92.6,57
//! 2024,1,Bahrain Grand Prix,ALB,Williams,,0,98.9,95.0,12
//! ```
//!
//! An empty `finish_position` marks a DNF (not classified). That is a normal state,
//! not a data error.

use serde::{Deserialize, Serialize};

/// Finishing position of a race winner.
pub const WIN_POSITION: u32 = 1;
/// Worst finishing position that still counts as a podium.
pub const PODIUM_POSITIONS: u32 = 3;
/// Worst finishing position that still counts as a top-5 result.
pub const TOP5_POSITIONS: u32 = 5;

/// Identifies one race instance: a season and its round index.
///
/// Ordering is chronological (season first, then round).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RaceKey {
    pub year: u16,
    pub round: u32,
}

/// One driver's result in one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    /// Season year
    pub year: u16,
    /// Round index within the season (monotonic)
    pub round: u32,
    /// Event name
    pub gp: String,
    pub driver: String,
    pub team: String,
    /// Classified finishing position, `None` for a DNF
    pub finish_position: Option<u32>,
    /// Points scored under the official scoring table
    pub points: f64,
    /// Mean lap time in seconds
    #[serde(default)]
    pub avg_lap_time: Option<f64>,
    /// Fastest lap time in seconds
    #[serde(default)]
    pub fastest_lap: Option<f64>,
    #[serde(default)]
    pub laps_completed: Option<u32>,
}

impl DriverRecord {
    /// Returns the race instance this row belongs to.
    #[must_use]
    pub fn race_key(&self) -> RaceKey {
        RaceKey {
            year: self.year,
            round: self.round,
        }
    }

    /// Returns `true` if the driver was classified (not a DNF).
    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.finish_position.is_some()
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.finish_position == Some(WIN_POSITION)
    }

    #[must_use]
    pub fn is_podium(&self) -> bool {
        self.finish_position.is_some_and(|p| p <= PODIUM_POSITIONS)
    }

    #[must_use]
    pub fn is_top5(&self) -> bool {
        self.finish_position.is_some_and(|p| p <= TOP5_POSITIONS)
    }
}
