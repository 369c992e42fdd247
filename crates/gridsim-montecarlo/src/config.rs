//! Simulation configuration, presets and validation.

use gridsim_engine::{DEFAULT_RACES_PER_SEASON, DEFAULT_SHOCK_STD};
use serde::{Deserialize, Serialize};

/// Named starting points for [`SimulationConfig`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum SimulationPreset {
    /// Champion probabilities only, low race noise
    #[default]
    Championship,
    /// Probabilities for the top three championship positions, higher race noise
    Podium,
}

/// Parameters of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent season trials
    pub n_sims: usize,
    /// Races per simulated season
    pub n_races: usize,
    /// Standard deviation of per-race performance noise
    pub noise_std: f64,
    /// Standard deviation of the per-season team shock (team mode only)
    pub shock_std: f64,
    /// Number of championship positions to tabulate
    pub top_k: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::preset(SimulationPreset::default())
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("n_sims must be at least 1")]
    NoTrials,
    #[display("n_races must be at least 1")]
    NoRaces,
    #[display("noise_std must be finite and positive, got {noise_std}")]
    InvalidNoise { noise_std: f64 },
    #[display("shock_std must be finite and non-negative, got {shock_std}")]
    InvalidShock { shock_std: f64 },
    #[display("top_k must be at least 1")]
    NoTrackedPositions,
    #[display("top_k ({top_k}) exceeds the number of drivers ({drivers})")]
    TooManyTrackedPositions { top_k: usize, drivers: usize },
}

impl SimulationConfig {
    #[must_use]
    pub fn preset(preset: SimulationPreset) -> Self {
        match preset {
            SimulationPreset::Championship => Self {
                n_sims: 100,
                n_races: DEFAULT_RACES_PER_SEASON,
                noise_std: 0.07,
                shock_std: DEFAULT_SHOCK_STD,
                top_k: 1,
            },
            SimulationPreset::Podium => Self {
                n_sims: 500,
                n_races: DEFAULT_RACES_PER_SEASON,
                noise_std: 0.15,
                shock_std: DEFAULT_SHOCK_STD,
                top_k: 3,
            },
        }
    }

    /// Checks every parameter against a population of `drivers` entrants.
    pub fn validate(&self, drivers: usize) -> Result<(), ConfigError> {
        let Self {
            n_sims,
            n_races,
            noise_std,
            shock_std,
            top_k,
        } = *self;
        if n_sims == 0 {
            return Err(ConfigError::NoTrials);
        }
        if n_races == 0 {
            return Err(ConfigError::NoRaces);
        }
        if !noise_std.is_finite() || noise_std <= 0.0 {
            return Err(ConfigError::InvalidNoise { noise_std });
        }
        if !shock_std.is_finite() || shock_std < 0.0 {
            return Err(ConfigError::InvalidShock { shock_std });
        }
        if top_k == 0 {
            return Err(ConfigError::NoTrackedPositions);
        }
        if top_k > drivers {
            return Err(ConfigError::TooManyTrackedPositions { top_k, drivers });
        }
        Ok(())
    }
}
