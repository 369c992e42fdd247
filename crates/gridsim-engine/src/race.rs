//! Single-race simulation.
//!
//! A race is resolved in four steps:
//!
//! 1. Each driver draws `performance = skill + team_strength + N(0, noise_std)`
//! 2. Each driver independently retires with probability `dnf_rate`
//! 3. Finishers are ranked by performance (best first), then retirements are appended
//!    in grid order
//! 4. Positions are converted to points with the [`PointsTable`]
//!
//! Exact performance ties keep grid order. All randomness comes from the generator the
//! caller passes in.

use std::cmp::Ordering;

use derive_more::{Display, Error};
use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use serde::{Deserialize, Serialize};

use crate::PointsTable;

#[derive(Debug, Clone, Copy, PartialEq, Display, Error)]
#[display("noise standard deviation must be finite and non-negative, got {noise_std}")]
pub struct InvalidNoiseError {
    pub noise_std: f64,
}

/// One grid slot of a race.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceEntry {
    /// Driver skill for this race
    pub skill: f64,
    /// Team strength for this race (0 when teams are not modelled)
    pub team_strength: f64,
    pub dnf_rate: f64,
}

/// Outcome of one driver in one simulated race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    /// Index of the driver in the grid passed to [`RaceSimulator::simulate`]
    pub entrant: usize,
    pub performance_score: f64,
    pub dnf: bool,
    /// 1-based, unique within the race
    pub position: usize,
    pub points: u32,
}

/// Draws randomized race outcomes.
#[derive(Debug, Clone)]
pub struct RaceSimulator {
    noise: Normal<f64>,
    points: PointsTable,
}

impl RaceSimulator {
    /// Creates a simulator with the given performance noise and points table.
    ///
    /// A `noise_std` of 0 makes the ranking deterministic apart from retirements.
    pub fn new(noise_std: f64, points: PointsTable) -> Result<Self, InvalidNoiseError> {
        if !noise_std.is_finite() || noise_std < 0.0 {
            return Err(InvalidNoiseError { noise_std });
        }
        let noise = Normal::new(0.0, noise_std).map_err(|_| InvalidNoiseError { noise_std })?;
        Ok(Self { noise, points })
    }

    #[must_use]
    pub fn points(&self) -> &PointsTable {
        &self.points
    }

    /// Simulates one race and returns the results sorted by position.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridsim_engine::{PointsTable, RaceEntry, RaceSimulator};
    /// use rand::SeedableRng as _;
    /// use rand_pcg::Pcg64;
    ///
    /// let simulator = RaceSimulator::new(0.0, PointsTable::default()).unwrap();
    /// let grid = [
    ///     RaceEntry { skill: 0.1, team_strength: 0.0, dnf_rate: 0.0 },
    ///     RaceEntry { skill: 0.9, team_strength: 0.0, dnf_rate: 0.0 },
    /// ];
    /// let results = simulator.simulate(&grid, &mut Pcg64::seed_from_u64(0));
    /// assert_eq!((results[0].entrant, results[0].points), (1, 25));
    /// assert_eq!((results[1].entrant, results[1].points), (0, 18));
    /// ```
    pub fn simulate<R>(&self, grid: &[RaceEntry], rng: &mut R) -> Vec<RaceResult>
    where
        R: Rng + ?Sized,
    {
        let scores = grid
            .iter()
            .map(|entry| entry.skill + entry.team_strength + self.noise.sample(rng))
            .collect::<Vec<_>>();
        let dnf = grid
            .iter()
            .map(|entry| rng.random::<f64>() < entry.dnf_rate)
            .collect::<Vec<_>>();

        // stable sort: finishers by score, retirements in grid order
        let mut order = (0..grid.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| match (dnf[a], dnf[b]) {
            (false, false) => scores[b].total_cmp(&scores[a]),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => Ordering::Equal,
        });

        order
            .into_iter()
            .enumerate()
            .map(|(rank, entrant)| {
                let position = rank + 1;
                RaceResult {
                    entrant,
                    performance_score: scores[entrant],
                    dnf: dnf[entrant],
                    position,
                    points: self.points.points_for(position),
                }
            })
            .collect()
    }
}
