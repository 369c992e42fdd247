use std::{num::NonZeroUsize, path::PathBuf, thread};

use anyhow::Context as _;
use chrono::Utc;
use gridsim_engine::SimulationSeed;
use gridsim_montecarlo::{
    MonteCarloSimulator, Projection, SimulationConfig, SimulationPreset, population_from_ratings,
    team_baselines_from_ratings,
};
use rand::Rng as _;

use crate::{
    schema::ProjectionRecord,
    util::{self, Output},
};

/// Drivers listed per championship position in the summary.
const SUMMARY_DRIVERS: usize = 5;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Rating table JSON file written by `gridsim rate`
    #[arg(long)]
    ratings: PathBuf,
    /// Starting configuration (championship or podium)
    #[arg(long, default_value = "championship")]
    preset: SimulationPreset,
    /// Number of season trials
    #[arg(long)]
    n_sims: Option<usize>,
    /// Races per season
    #[arg(long)]
    n_races: Option<usize>,
    /// Standard deviation of per-race performance noise
    #[arg(long)]
    noise_std: Option<f64>,
    /// Standard deviation of the per-season team shock
    #[arg(long)]
    shock_std: Option<f64>,
    /// Number of championship positions to tabulate
    #[arg(long)]
    top_k: Option<usize>,
    /// Add team strength, using each team's mean driver rating as its baseline
    #[arg(long)]
    team_mode: bool,
    /// Team baselines JSON file (implies --team-mode)
    #[arg(long)]
    team_baselines: Option<PathBuf>,
    /// Master seed as 32 hexadecimal digits (random if omitted)
    #[arg(long)]
    seed: Option<SimulationSeed>,
    /// Worker threads (available parallelism if omitted)
    #[arg(long)]
    workers: Option<NonZeroUsize>,
    /// Output JSON file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SimulateArg {
    fn config(&self) -> SimulationConfig {
        let preset = SimulationConfig::preset(self.preset);
        SimulationConfig {
            n_sims: self.n_sims.unwrap_or(preset.n_sims),
            n_races: self.n_races.unwrap_or(preset.n_races),
            noise_std: self.noise_std.unwrap_or(preset.noise_std),
            shock_std: self.shock_std.unwrap_or(preset.shock_std),
            top_k: self.top_k.unwrap_or(preset.top_k),
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let table = util::read_ratings_file(&arg.ratings)?;
    let population = population_from_ratings(&table.drivers)
        .with_context(|| format!("Invalid rating table: {}", arg.ratings.display()))?;

    let team_baselines = match &arg.team_baselines {
        Some(path) => Some(util::read_team_baselines_file(path)?),
        None if arg.team_mode => Some(team_baselines_from_ratings(&table.drivers)),
        None => None,
    };

    let config = arg.config();
    let simulator = MonteCarloSimulator::new(&config, population, team_baselines.clone())
        .context("Invalid simulation configuration")?;

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let workers = arg
        .workers
        .or_else(|| thread::available_parallelism().ok())
        .unwrap_or(NonZeroUsize::MIN);
    eprintln!(
        "Simulating {} seasons of {} races ({} mode, seed {seed})",
        config.n_sims,
        config.n_races,
        if team_baselines.is_some() {
            "skill+team"
        } else {
            "pure skill"
        }
    );
    let projection = simulator.run(seed, workers);
    print_summary(&projection);

    let record = ProjectionRecord {
        simulated_at: Utc::now(),
        config,
        team_baselines,
        projection,
    };
    Output::save_json(&record, arg.output.clone())?;
    Ok(())
}

fn print_summary(projection: &Projection) {
    for rank in &projection.ranks {
        eprintln!("  P{}:", rank.position);
        for driver in rank
            .drivers
            .iter()
            .filter(|d| d.probability > 0.0)
            .take(SUMMARY_DRIVERS)
        {
            let percent = driver.probability * 100.0;
            eprintln!("    {:<8} {percent:>6.1}%", driver.driver);
        }
    }
}
