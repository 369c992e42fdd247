//! Raw race-session data supplied by an external provider.
//!
//! The rating pipeline never talks to a data provider directly. Anything that can list
//! a season's events and hand back the classified results (and optionally the lap
//! table) of one race implements [`SessionDataSource`]; the
//! [`season`](crate::season) module turns those tables into [`DriverRecord`]s.
//!
//! Sessions are plain `serde` types so file-backed fixtures can be loaded as JSON:
//!
//! ```json
//! {
//!   "results": [
//!     { "driver": "VER", "team": "Red Bull Racing", "position": 1, "points": 26.0 },
//!     { "driver": "ALB", "team": "Williams", "position": null, "points": 0.0 }
//!   ],
//!   "laps": [
//!     { "driver": "VER", "lap_time": 97.284 },
//!     { "driver": "VER", "lap_time": null }
//!   ]
//! }
//! ```
//!
//! [`DriverRecord`]: crate::record::DriverRecord

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supplies race sessions for historical dataset construction.
///
/// Implementations own any caching or network state; callers only see the tables.
pub trait SessionDataSource {
    /// Error returned when a schedule or session cannot be fetched.
    type Error: fmt::Display + fmt::Debug;

    /// Lists the events of a season in round order.
    fn event_schedule(&self, year: u16) -> Result<Vec<EventInfo>, Self::Error>;

    /// Fetches the race session of one event.
    fn race_session(&self, year: u16, event: &EventInfo) -> Result<RaceSession, Self::Error>;
}

/// Weekend format of a scheduled event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    #[default]
    Conventional,
    Sprint,
    Testing,
}

/// One entry in a season's event schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub round: u32,
    pub name: String,
    #[serde(default)]
    pub format: EventFormat,
}

/// Result and lap tables of one race session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceSession {
    pub results: Vec<SessionResult>,
    #[serde(default)]
    pub laps: Vec<SessionLap>,
}

/// One row of the classified results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub driver: String,
    /// Team name, when the provider reports one
    #[serde(default)]
    pub team: Option<String>,
    /// Classified position, `None` when not classified
    pub position: Option<u32>,
    pub points: f64,
}

/// One lap of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLap {
    pub driver: String,
    /// Lap time in seconds, `None` when the lap was not timed
    pub lap_time: Option<f64>,
}
