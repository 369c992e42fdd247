use clap::{Parser, Subcommand};

use self::{
    build_dataset::BuildDatasetArg, features::FeaturesArg, rate::RateArg, simulate::SimulateArg,
};

mod build_dataset;
mod features;
mod rate;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build a historical results dataset from session files
    BuildDataset(#[clap(flatten)] BuildDatasetArg),
    /// Derive per-race features from a historical dataset
    Features(#[clap(flatten)] FeaturesArg),
    /// Build the driver rating table from a historical dataset
    Rate(#[clap(flatten)] RateArg),
    /// Project championship outcomes by Monte Carlo simulation
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::BuildDataset(arg) => build_dataset::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
        Mode::Rate(arg) => rate::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
