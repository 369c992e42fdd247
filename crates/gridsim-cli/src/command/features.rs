use std::{num::NonZeroUsize, path::PathBuf};

use gridsim_history::features::{FeatureWindows, derive_features};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FeaturesArg {
    /// Historical dataset CSV file
    #[arg(long)]
    input: PathBuf,
    /// Trailing window of the points momentum and recent-finish means
    #[arg(long, default_value_t = FeatureWindows::DEFAULT_MOMENTUM)]
    momentum_window: NonZeroUsize,
    /// Trailing window of the consistency score
    #[arg(long, default_value_t = FeatureWindows::DEFAULT_CONSISTENCY)]
    consistency_window: NonZeroUsize,
    /// Output CSV file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let FeaturesArg {
        input,
        momentum_window,
        consistency_window,
        output,
    } = arg;
    let records = util::read_records_file(input)?;
    eprintln!("Loaded {} rows from {}", records.len(), input.display());

    let windows = FeatureWindows {
        momentum: *momentum_window,
        consistency: *consistency_window,
    };
    let rows = derive_features(&records, &windows);
    Output::save_csv(&rows, output.clone())?;
    Ok(())
}
