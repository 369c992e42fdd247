use std::{collections::BTreeSet, path::PathBuf};

use chrono::Utc;
use gridsim_history::{
    rating::{DriverRating, build_driver_rating},
    record::DriverRecord,
    statistics::compute_driver_statistics,
};

use crate::{
    schema::RatingTable,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RateArg {
    /// Historical dataset CSV file
    #[arg(long)]
    input: PathBuf,
    /// Output JSON file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RateArg) -> anyhow::Result<()> {
    let RateArg { input, output } = arg;
    let records = util::read_records_file(input)?;
    anyhow::ensure!(
        !records.is_empty(),
        "{} has no result rows",
        input.display()
    );

    let table = rating_table(&records);
    eprintln!(
        "Rated {} drivers over {} races",
        table.drivers.len(),
        table.races
    );
    print_ratings(&table.drivers);

    Output::save_json(&table, output.clone())?;
    Ok(())
}

pub(super) fn rating_table(records: &[DriverRecord]) -> RatingTable {
    let races = records
        .iter()
        .map(DriverRecord::race_key)
        .collect::<BTreeSet<_>>()
        .len();
    let drivers = build_driver_rating(compute_driver_statistics(records));
    RatingTable {
        rated_at: Utc::now(),
        races,
        drivers,
    }
}

fn print_ratings(ratings: &[DriverRating]) {
    eprintln!(
        "  {:<4} {:<8} {:<24} {:>6} {:>6} {:>5}",
        "#", "Driver", "Team", "Rating", "Pts", "DNF"
    );
    for (i, r) in ratings.iter().enumerate() {
        eprintln!(
            "  {:<4} {:<8} {:<24} {:>6.3} {:>6.2} {:>5.2}",
            i + 1,
            r.stats.driver,
            r.stats.team,
            r.rating,
            r.stats.avg_points,
            r.stats.dnf_rate
        );
    }
}
