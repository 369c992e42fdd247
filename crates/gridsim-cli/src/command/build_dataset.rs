use std::path::PathBuf;

use anyhow::Context as _;
use gridsim_history::season::build_season_dataset;

use crate::{source::DirectorySessionSource, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BuildDatasetArg {
    /// Directory holding `<year>/schedule.json` and `<year>/<round>.json` session files
    #[arg(long)]
    root: PathBuf,
    /// Seasons to include
    #[arg(long = "season", required = true, num_args = 1..)]
    seasons: Vec<u16>,
    /// Output CSV file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BuildDatasetArg) -> anyhow::Result<()> {
    let BuildDatasetArg {
        root,
        seasons,
        output,
    } = arg;
    let source = DirectorySessionSource::new(root);

    let mut records = vec![];
    for &year in seasons {
        let dataset = build_season_dataset(&source, year).with_context(|| {
            format!(
                "Failed to load {year} schedule from {}",
                source.root().display()
            )
        })?;
        eprintln!(
            "Season {year}: {} rows, {} events skipped",
            dataset.records.len(),
            dataset.skipped.len()
        );
        for skipped in &dataset.skipped {
            eprintln!(
                "  skipped round {} ({}): {}",
                skipped.round, skipped.name, skipped.reason
            );
        }
        records.extend(dataset.records);
    }

    Output::save_csv(&records, output.clone())?;
    Ok(())
}
