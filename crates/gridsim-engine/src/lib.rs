//! Stochastic race and season simulation.
//!
//! A [`Population`] of entrants is raced by a [`RaceSimulator`]: every race draws a noisy
//! performance score per driver, retires drivers according to their DNF rate, ranks the
//! field and awards points from a [`PointsTable`]. A [`SeasonSimulator`] repeats this for
//! a season and ranks the accumulated totals.
//!
//! Nothing here holds a global random state. Every simulation call takes the generator
//! it draws from, and [`SimulationSeed::trial_rng`] derives an independent stream per
//! Monte Carlo trial.

pub use self::{mode::*, points::*, population::*, race::*, season::*, seed::*};

mod mode;
mod points;
mod population;
mod race;
mod season;
mod seed;
