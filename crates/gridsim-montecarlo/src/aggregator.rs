//! Parallel Monte Carlo aggregation of simulated seasons.
//!
//! Trials are split into contiguous index ranges, one per worker thread. Each trial
//! draws from its own generator, [`SimulationSeed::trial_rng`] of its index, and each
//! worker counts outcomes into a private [`Tally`]. Tallies hold integer counts, so
//! merging them is exact and order-independent: a run's [`Projection`] depends on the
//! seed and the configuration, never on the number of workers.

use std::{num::NonZeroUsize, ops::Range, thread, time::Instant};

use gridsim_engine::{
    PointsTable, Population, SeasonOutcome, SeasonSimulator, SimulationError, SimulationMode,
    SimulationSeed, TeamBaseline, TeamModel,
};
use gridsim_stats::frequency::FrequencyTable;

use crate::{
    config::{ConfigError, SimulationConfig},
    projection::{DriverProjection, Projection, RankDistribution},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum MonteCarloError {
    #[display("invalid simulation config")]
    Config(ConfigError),
    #[display("invalid simulation setup")]
    Simulation(SimulationError),
}

/// Runs many independent season trials and tabulates championship outcomes.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    season: SeasonSimulator,
    n_sims: usize,
    top_k: usize,
}

impl MonteCarloSimulator {
    /// Validates the configuration and prepares the season simulator.
    ///
    /// With `team_baselines` the run uses skill-plus-team mode, otherwise pure-skill
    /// mode. Every configuration problem is reported here, before any trial runs.
    pub fn new(
        config: &SimulationConfig,
        population: Population,
        team_baselines: Option<Vec<TeamBaseline>>,
    ) -> Result<Self, MonteCarloError> {
        config
            .validate(population.len())
            .map_err(MonteCarloError::Config)?;
        let mode = match team_baselines {
            None => SimulationMode::PureSkill,
            Some(baselines) => SimulationMode::SkillPlusTeam(TeamModel {
                baselines,
                shock_std: config.shock_std,
            }),
        };
        let season = SeasonSimulator::new(
            population,
            &mode,
            config.n_races,
            config.noise_std,
            PointsTable::default(),
        )
        .map_err(MonteCarloError::Simulation)?;
        Ok(Self {
            season,
            n_sims: config.n_sims,
            top_k: config.top_k,
        })
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        self.season.population()
    }

    /// Runs all trials on up to `workers` threads.
    #[must_use]
    pub fn run(&self, seed: SimulationSeed, workers: NonZeroUsize) -> Projection {
        let population = self.population();
        let ranges = trial_ranges(self.n_sims, workers);
        tracing::info!(
            %seed,
            n_sims = self.n_sims,
            n_races = self.season.n_races(),
            drivers = population.len(),
            workers = ranges.len(),
            "starting Monte Carlo run"
        );
        let started = Instant::now();

        let mut tallies = vec![Tally::new(population.len(), self.top_k); ranges.len()];
        thread::scope(|s| {
            for (tally, trials) in tallies.iter_mut().zip(ranges) {
                s.spawn(move || self.run_trials(seed, trials, tally));
            }
        });
        let tally = tallies.iter().fold(
            Tally::new(population.len(), self.top_k),
            |mut acc, tally| {
                acc.merge(tally);
                acc
            },
        );

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis(),
            "Monte Carlo run finished"
        );
        self.projection(seed, &tally)
    }

    fn run_trials(&self, seed: SimulationSeed, trials: Range<usize>, tally: &mut Tally) {
        let first = trials.start;
        for trial in trials.clone() {
            let mut rng = seed.trial_rng(trial as u64);
            let outcome = self.season.simulate_season(&mut rng);
            tally.record(&outcome);
        }
        tracing::debug!(first, end = trials.end, "worker finished trials");
    }

    #[expect(clippy::cast_precision_loss)]
    fn projection(&self, seed: SimulationSeed, tally: &Tally) -> Projection {
        let population = self.population();
        let n = self.n_sims as f64;
        let ranks = tally
            .ranks
            .iter()
            .enumerate()
            .map(|(i, table)| RankDistribution::new(i + 1, population, &table.probabilities()))
            .collect();
        let drivers = population
            .entrants()
            .iter()
            .zip(tally.points.iter().zip(&tally.positions))
            .map(|(entrant, (&points, &positions))| DriverProjection {
                driver: entrant.driver.clone(),
                team: entrant.team.clone(),
                mean_points: points as f64 / n,
                mean_position: positions as f64 / n,
            })
            .collect();
        Projection {
            seed,
            n_sims: self.n_sims,
            ranks,
            drivers,
        }
    }
}

/// Outcome counts of a set of trials.
#[derive(Debug, Clone)]
struct Tally {
    /// One table per tracked position, categories are entrant indices
    ranks: Vec<FrequencyTable>,
    points: Vec<u64>,
    positions: Vec<usize>,
}

impl Tally {
    fn new(drivers: usize, top_k: usize) -> Self {
        Self {
            ranks: vec![FrequencyTable::new(drivers); top_k],
            points: vec![0; drivers],
            positions: vec![0; drivers],
        }
    }

    fn record(&mut self, outcome: &SeasonOutcome) {
        for (table, standing) in self.ranks.iter_mut().zip(&outcome.standings) {
            table.record(standing.entrant);
        }
        for standing in &outcome.standings {
            self.points[standing.entrant] += standing.total_points;
            self.positions[standing.entrant] += standing.final_position;
        }
    }

    fn merge(&mut self, other: &Self) {
        for (table, other) in self.ranks.iter_mut().zip(&other.ranks) {
            table.merge(other);
        }
        for (sum, other) in self.points.iter_mut().zip(&other.points) {
            *sum += other;
        }
        for (sum, other) in self.positions.iter_mut().zip(&other.positions) {
            *sum += other;
        }
    }
}

/// Splits `0..n_sims` into at most `workers` contiguous, non-empty ranges.
fn trial_ranges(n_sims: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    let chunk = n_sims.div_ceil(workers.get()).max(1);
    (0..n_sims)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(n_sims))
        .collect()
}

#[cfg(test)]
mod tests {
    use gridsim_engine::{Entrant, PopulationError};

    use super::*;
    use crate::{config::SimulationPreset, entrants::tests::ratings, population_from_ratings};

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn seed() -> SimulationSeed {
        SimulationSeed::from_bytes([42; 16])
    }

    fn entrant(driver: &str, team: &str, skill: f64, dnf_rate: f64) -> Entrant {
        Entrant {
            driver: driver.to_owned(),
            team: team.to_owned(),
            skill,
            dnf_rate,
        }
    }

    fn field() -> Result<Population, PopulationError> {
        Population::new(vec![
            entrant("AAA", "Alpha", 0.80, 0.05),
            entrant("BBB", "Alpha", 0.78, 0.05),
            entrant("CCC", "Gamma", 0.75, 0.10),
            entrant("DDD", "Gamma", 0.70, 0.10),
            entrant("EEE", "Delta", 0.50, 0.20),
        ])
    }

    #[test]
    fn test_trial_ranges_cover_all_trials() {
        for (n_sims, n_workers) in [(1, 1), (10, 3), (3, 8), (100, 4), (7, 7)] {
            let ranges = trial_ranges(n_sims, workers(n_workers));
            assert!(ranges.len() <= n_workers);
            assert!(ranges.iter().all(|r| !r.is_empty()));
            let covered = ranges.into_iter().flatten().collect::<Vec<_>>();
            assert_eq!(covered, (0..n_sims).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_rank_distributions_sum_to_one() {
        let config = SimulationConfig {
            n_sims: 200,
            n_races: 5,
            ..SimulationConfig::preset(SimulationPreset::Podium)
        };
        let simulator = MonteCarloSimulator::new(&config, field().unwrap(), None).unwrap();
        let projection = simulator.run(seed(), workers(4));

        assert_eq!(projection.ranks.len(), 3);
        for (i, rank) in projection.ranks.iter().enumerate() {
            assert_eq!(rank.position, i + 1);
            assert_eq!(rank.drivers.len(), 5);
            assert!((rank.total() - 1.0).abs() < 1e-9);
            assert!(
                rank.drivers
                    .iter()
                    .all(|d| (0.0..=1.0).contains(&d.probability))
            );
            assert!(
                rank.drivers
                    .windows(2)
                    .all(|w| w[0].probability >= w[1].probability)
            );
        }
    }

    #[test]
    fn test_results_do_not_depend_on_worker_count() {
        let config = SimulationConfig {
            n_sims: 60,
            n_races: 4,
            top_k: 3,
            ..SimulationConfig::default()
        };
        let baselines = vec![
            TeamBaseline {
                team: "Alpha".to_owned(),
                team_base_rating: 0.3,
            },
            TeamBaseline {
                team: "Gamma".to_owned(),
                team_base_rating: 0.4,
            },
            TeamBaseline {
                team: "Delta".to_owned(),
                team_base_rating: 0.1,
            },
        ];
        let simulator =
            MonteCarloSimulator::new(&config, field().unwrap(), Some(baselines)).unwrap();
        let single = simulator.run(seed(), workers(1));
        for n in [2, 3, 7, 64] {
            assert_eq!(simulator.run(seed(), workers(n)), single);
        }
    }

    #[test]
    fn test_dominant_driver_always_wins() {
        let population = Population::new(vec![
            entrant("AAA", "Alpha", 0.1, 0.0),
            entrant("BBB", "Beta", 10.0, 0.0),
            entrant("CCC", "Gamma", 0.2, 0.0),
        ])
        .unwrap();
        let config = SimulationConfig {
            n_sims: 20,
            n_races: 3,
            ..SimulationConfig::default()
        };
        let simulator = MonteCarloSimulator::new(&config, population, None).unwrap();
        let projection = simulator.run(seed(), workers(2));

        assert_eq!(projection.probability(1, "BBB"), Some(1.0));
        assert_eq!(projection.probability(1, "AAA"), Some(0.0));
        assert_eq!(projection.probability(2, "BBB"), None);
        assert_eq!(projection.ranks[0].drivers[0].driver, "BBB");

        let bbb = &projection.drivers[1];
        assert_eq!(bbb.driver, "BBB");
        assert!((bbb.mean_points - 75.0).abs() < 1e-9);
        assert!((bbb.mean_position - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_setup_errors_surface_before_running() {
        let config = SimulationConfig {
            top_k: 6,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            MonteCarloSimulator::new(&config, field().unwrap(), None),
            Err(MonteCarloError::Config(
                ConfigError::TooManyTrackedPositions { .. }
            ))
        ));

        let missing_team = vec![TeamBaseline {
            team: "Alpha".to_owned(),
            team_base_rating: 0.3,
        }];
        assert!(matches!(
            MonteCarloSimulator::new(
                &SimulationConfig::default(),
                field().unwrap(),
                Some(missing_team),
            ),
            Err(MonteCarloError::Simulation(SimulationError::TeamModel(_)))
        ));
    }

    #[test]
    fn test_run_from_rating_table() {
        let ratings = ratings();
        let population = population_from_ratings(&ratings).unwrap();
        let baselines = crate::team_baselines_from_ratings(&ratings);
        let config = SimulationConfig {
            n_sims: 30,
            ..SimulationConfig::preset(SimulationPreset::Podium)
        };
        let simulator = MonteCarloSimulator::new(&config, population, Some(baselines)).unwrap();
        let projection = simulator.run(seed(), workers(3));
        assert_eq!(projection.n_sims, 30);
        assert_eq!(projection.drivers.len(), 4);
        let mean_position_total = projection
            .drivers
            .iter()
            .map(|d| d.mean_position)
            .sum::<f64>();
        assert!((mean_position_total - 10.0).abs() < 1e-9);
    }
}
