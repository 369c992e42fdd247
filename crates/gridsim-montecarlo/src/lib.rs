//! Monte Carlo projection of championship outcomes.
//!
//! This crate runs many independent simulated seasons and turns their final standings
//! into probabilities.
//!
//! # How a Run Works
//!
//! 1. **Population** - Build entrants from a rating table ([`population_from_ratings`])
//! 2. **Mode** - Optionally attach team baselines ([`team_baselines_from_ratings`] or a
//!    supplied table) to simulate skill plus team strength
//! 3. **Validation** - [`MonteCarloSimulator::new`] checks the [`SimulationConfig`]
//!    against the population before any trial runs
//! 4. **Trials** - Each trial simulates one season from its own seeded generator
//! 5. **Aggregation** - Worker tallies are merged into per-position probability tables
//!    and per-driver averages ([`Projection`])
//!
//! # Architecture
//!
//! ```text
//! DriverRating table (gridsim-history)
//!     ↓ population_from_ratings
//! Population ──────────────┐
//! SimulationConfig ────────┤ MonteCarloSimulator::new
//! TeamBaseline (optional) ─┘
//!     ↓ run(seed, workers)
//! SeasonSimulator × n_sims (gridsim-engine), split across worker threads
//!     ↓ merge tallies
//! Projection
//! ```
//!
//! # Presets
//!
//! - **Championship** - 100 trials, noise 0.07, champion only
//! - **Podium** - 500 trials, noise 0.15, top three positions
//!
//! Both simulate 24-race seasons with a team shock standard deviation of 0.8.
//!
//! # Reproducibility
//!
//! Trial `i` always draws from [`SimulationSeed::trial_rng`]`(i)`, so the same seed and
//! configuration produce the same [`Projection`] for any worker count.
//!
//! [`SimulationSeed::trial_rng`]: gridsim_engine::SimulationSeed::trial_rng

pub use self::{aggregator::*, config::*, entrants::*, projection::*};

mod aggregator;
mod config;
mod entrants;
mod projection;
