//! Conversion of a rating table into simulation inputs.

use gridsim_engine::{Entrant, Population, PopulationError, TeamBaseline};
use gridsim_history::rating::{DriverRating, team_mean_ratings};

/// Builds a population whose skill is each driver's composite rating.
///
/// Entrants keep the order of `ratings`, which is the tie-break order of every
/// simulation.
pub fn population_from_ratings(ratings: &[DriverRating]) -> Result<Population, PopulationError> {
    let entrants = ratings
        .iter()
        .map(|r| Entrant {
            driver: r.stats.driver.clone(),
            team: r.stats.team.clone(),
            skill: r.rating,
            dnf_rate: r.stats.dnf_rate,
        })
        .collect();
    Population::new(entrants)
}

/// Default team baselines: the mean rating of each team's drivers.
#[must_use]
pub fn team_baselines_from_ratings(ratings: &[DriverRating]) -> Vec<TeamBaseline> {
    team_mean_ratings(ratings)
        .into_iter()
        .map(|(team, team_base_rating)| TeamBaseline {
            team,
            team_base_rating,
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use gridsim_history::{
        rating::build_driver_rating, record::DriverRecord, statistics::compute_driver_statistics,
    };

    use super::*;

    pub(crate) fn ratings() -> Vec<DriverRating> {
        let row = |driver: &str, team: &str, round, finish_position, points| DriverRecord {
            year: 2024,
            round,
            gp: format!("Round {round}"),
            driver: driver.to_owned(),
            team: team.to_owned(),
            finish_position,
            points,
            avg_lap_time: None,
            fastest_lap: None,
            laps_completed: None,
        };
        let records = [
            row("AAA", "Alpha", 1, Some(1), 25.0),
            row("BBB", "Alpha", 1, Some(2), 18.0),
            row("CCC", "Gamma", 1, Some(3), 15.0),
            row("DDD", "Gamma", 1, None, 0.0),
            row("AAA", "Alpha", 2, Some(2), 18.0),
            row("BBB", "Alpha", 2, Some(1), 25.0),
            row("CCC", "Gamma", 2, None, 0.0),
            row("DDD", "Gamma", 2, Some(3), 15.0),
        ];
        build_driver_rating(compute_driver_statistics(&records))
    }

    #[test]
    fn test_population_follows_rating_order() {
        let ratings = ratings();
        let population = population_from_ratings(&ratings).unwrap();
        assert_eq!(population.len(), 4);
        for (entrant, rating) in population.entrants().iter().zip(&ratings) {
            assert_eq!(entrant.driver, rating.stats.driver);
            assert!((entrant.skill - rating.rating).abs() < f64::EPSILON);
            assert!((entrant.dnf_rate - rating.stats.dnf_rate).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_empty_ratings_are_rejected() {
        assert_eq!(population_from_ratings(&[]), Err(PopulationError::Empty));
    }

    #[test]
    fn test_team_baselines_average_driver_ratings() {
        let ratings = ratings();
        let baselines = team_baselines_from_ratings(&ratings);
        let teams = baselines
            .iter()
            .map(|b| b.team.as_str())
            .collect::<Vec<_>>();
        assert_eq!(teams, vec!["Alpha", "Gamma"]);

        let mean = |team: &str| {
            let team_ratings = ratings
                .iter()
                .filter(|r| r.stats.team == team)
                .map(|r| r.rating)
                .collect::<Vec<_>>();
            team_ratings.iter().sum::<f64>() / 2.0
        };
        assert!((baselines[0].team_base_rating - mean("Alpha")).abs() < 1e-12);
        assert!((baselines[1].team_base_rating - mean("Gamma")).abs() < 1e-12);
    }
}
