//! Historical dataset construction from a [`SessionDataSource`].
//!
//! [`build_race_summary`] flattens one race session into one [`DriverRecord`] per
//! classified-or-retired driver, enriching it with lap statistics when the lap table
//! has entries for that driver. [`build_season_dataset`] repeats this for every
//! conventional event of a season.
//!
//! # Failure Policy
//!
//! A season is a batch of independent fetches. When one event fails, it is logged,
//! recorded in [`SeasonDataset::skipped`] and left out of the rows; the remaining events
//! are still processed. Only a failure to fetch the schedule itself aborts the batch.

use gridsim_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{
    record::DriverRecord,
    source::{EventFormat, EventInfo, RaceSession, SessionDataSource},
};

/// Team name used when the provider does not report one.
pub const UNKNOWN_TEAM: &str = "Unknown";

/// Rows of one season plus the events that could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDataset {
    pub year: u16,
    pub records: Vec<DriverRecord>,
    pub skipped: Vec<SkippedEvent>,
}

/// An event left out of a [`SeasonDataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEvent {
    pub round: u32,
    pub name: String,
    /// Rendered fetch error
    pub reason: String,
}

/// Flattens one race session into per-driver rows.
///
/// Rows follow the order of the session's results table. A reported position of 0 is
/// not a classified finish and is stored as `None`.
#[must_use]
pub fn build_race_summary(
    year: u16,
    event: &EventInfo,
    session: &RaceSession,
) -> Vec<DriverRecord> {
    session
        .results
        .iter()
        .map(|result| {
            let laps = session
                .laps
                .iter()
                .filter(|lap| lap.driver == result.driver)
                .collect::<Vec<_>>();
            let lap_stats = DescriptiveStats::new(laps.iter().filter_map(|lap| lap.lap_time));
            let laps_completed = u32::try_from(laps.len()).unwrap_or(u32::MAX);

            DriverRecord {
                year,
                round: event.round,
                gp: event.name.clone(),
                driver: result.driver.clone(),
                team: result
                    .team
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_TEAM.to_owned()),
                finish_position: result.position.filter(|&p| p > 0),
                points: result.points,
                avg_lap_time: lap_stats.as_ref().map(|s| s.mean),
                fastest_lap: lap_stats.as_ref().map(|s| s.min),
                laps_completed: (!laps.is_empty()).then_some(laps_completed),
            }
        })
        .collect()
}

/// Builds the historical dataset of one season.
///
/// Only [`EventFormat::Conventional`] events are included. Per-event failures are
/// skipped (see the module documentation); a schedule failure is returned as an error.
pub fn build_season_dataset<S>(source: &S, year: u16) -> Result<SeasonDataset, S::Error>
where
    S: SessionDataSource + ?Sized,
{
    let schedule = source.event_schedule(year)?;
    let events = schedule
        .iter()
        .filter(|event| event.format == EventFormat::Conventional)
        .collect::<Vec<_>>();
    tracing::info!(year, events = events.len(), "building season dataset");

    let mut records = vec![];
    let mut skipped = vec![];
    for event in events {
        match source.race_session(year, event) {
            Ok(session) => {
                let rows = build_race_summary(year, event, &session);
                tracing::debug!(
                    year,
                    round = event.round,
                    rows = rows.len(),
                    "loaded {}",
                    event.name
                );
                records.extend(rows);
            }
            Err(err) => {
                tracing::warn!(year, round = event.round, "failed {}: {err}", event.name);
                skipped.push(SkippedEvent {
                    round: event.round,
                    name: event.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(SeasonDataset {
        year,
        records,
        skipped,
    })
}
