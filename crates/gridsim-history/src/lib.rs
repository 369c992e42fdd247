//! Historical race data and driver ratings for season projection
//!
//! This crate turns raw per-race results into the driver rating table that the
//! simulators consume.
//!
//! # Overview
//!
//! ```text
//! SessionDataSource (external provider)
//!     ↓ season::build_season_dataset
//! DriverRecord rows (one per driver per race)
//!     ├─ features::derive_features  → DerivedRaceRow (flags, cumulative, rolling, gap)
//!     └─ statistics::compute_driver_statistics → DriverStatistics
//!            ↓ rating::build_driver_rating
//!        DriverRating (sorted by composite rating)
//! ```
//!
//! # Modules
//!
//! - [`record`]: Historical result rows and race identifiers
//! - [`source`]: The [`source::SessionDataSource`] trait and raw session tables
//! - [`season`]: Race summaries and batch season dataset construction
//! - [`features`]: Per-driver derived race features
//! - [`statistics`]: Per-driver aggregate statistics
//! - [`rating`]: Normalized composite rating
//! - [`dataset`]: CSV reading and writing of result and feature rows
//!
//! # Missing Finish Positions
//!
//! A result without a finish position is a DNF. It is carried as `None` through every
//! stage: flags are `false`, rolling finish means skip it, and it counts toward the
//! driver's DNF rate.
//!
//! # Example
//!
//! ```
//! use gridsim_history::{
//!     rating::build_driver_rating, record::DriverRecord, statistics::compute_driver_statistics,
//! };
//!
//! let row = |driver: &str, round, finish_position, points| DriverRecord {
//!     year: 2024,
//!     round,
//!     gp: format!("Round {round}"),
//!     driver: driver.to_owned(),
//!     team: "Team".to_owned(),
//!     finish_position,
//!     points,
//!     avg_lap_time: None,
//!     fastest_lap: None,
//!     laps_completed: None,
//! };
//! let records = [
//!     row("AAA", 1, Some(1), 25.0),
//!     row("BBB", 1, Some(2), 18.0),
//!     row("AAA", 2, Some(2), 18.0),
//!     row("BBB", 2, None, 0.0),
//! ];
//!
//! let stats = compute_driver_statistics(&records);
//! let ratings = build_driver_rating(stats);
//! assert_eq!(ratings[0].stats.driver, "AAA");
//! assert!(ratings.iter().all(|r| (0.0..=1.0).contains(&r.rating)));
//! ```

pub mod dataset;
pub mod features;
pub mod rating;
pub mod record;
pub mod season;
pub mod source;
pub mod statistics;
