use gridsim_engine::{Population, SimulationSeed};
use serde::{Deserialize, Serialize};

/// Probability of one driver finishing the championship at a given position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverProbability {
    pub driver: String,
    pub probability: f64,
}

/// Empirical distribution over drivers for one championship position.
///
/// Every driver of the population appears once; entries are sorted by probability,
/// most likely first, with equal probabilities in population order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankDistribution {
    /// 1-based championship position
    pub position: usize,
    pub drivers: Vec<DriverProbability>,
}

/// Per-driver averages over all trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverProjection {
    pub driver: String,
    pub team: String,
    pub mean_points: f64,
    pub mean_position: f64,
}

/// Aggregated outcome of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub seed: SimulationSeed,
    pub n_sims: usize,
    /// One distribution per tracked position, in position order
    pub ranks: Vec<RankDistribution>,
    /// Population order
    pub drivers: Vec<DriverProjection>,
}

impl Projection {
    /// Probability that `driver` finishes at 1-based `position`.
    ///
    /// Returns `None` for untracked positions and unknown drivers.
    #[must_use]
    pub fn probability(&self, position: usize, driver: &str) -> Option<f64> {
        self.ranks
            .iter()
            .find(|r| r.position == position)?
            .drivers
            .iter()
            .find(|d| d.driver == driver)
            .map(|d| d.probability)
    }
}

impl RankDistribution {
    pub(crate) fn new(position: usize, population: &Population, probabilities: &[f64]) -> Self {
        let mut drivers = population
            .entrants()
            .iter()
            .zip(probabilities)
            .map(|(entrant, &probability)| DriverProbability {
                driver: entrant.driver.clone(),
                probability,
            })
            .collect::<Vec<_>>();
        drivers.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Self { position, drivers }
    }

    /// Sum of all probabilities; 1 up to rounding.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.drivers.iter().map(|d| d.probability).sum()
    }
}
