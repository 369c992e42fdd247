use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    InvalidNoiseError, PointsTable, Population, RaceEntry, RaceSimulator, SimulationMode,
    TeamField, TeamModelError,
};

/// Default number of races in a simulated season.
pub const DEFAULT_RACES_PER_SEASON: usize = 24;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("a season needs at least one race")]
    NoRaces,
    #[display("invalid race noise")]
    Noise(InvalidNoiseError),
    #[display("invalid team model")]
    TeamModel(TeamModelError),
}

/// Final championship standing of one entrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStanding {
    /// Index of the entrant in the population
    pub entrant: usize,
    pub total_points: u64,
    /// 1-based championship position
    pub final_position: usize,
}

/// Result of one simulated season, sorted by final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonOutcome {
    pub standings: Vec<SeasonStanding>,
}

impl SeasonOutcome {
    /// Entrant index at a 1-based championship position.
    #[must_use]
    pub fn entrant_at(&self, position: usize) -> Option<usize> {
        position
            .checked_sub(1)
            .and_then(|i| self.standings.get(i))
            .map(|s| s.entrant)
    }
}

/// Simulates full seasons for a fixed population.
#[derive(Debug, Clone)]
pub struct SeasonSimulator {
    population: Population,
    race: RaceSimulator,
    n_races: usize,
    teams: Option<TeamField>,
}

impl SeasonSimulator {
    pub fn new(
        population: Population,
        mode: &SimulationMode,
        n_races: usize,
        noise_std: f64,
        points: PointsTable,
    ) -> Result<Self, SimulationError> {
        if n_races == 0 {
            return Err(SimulationError::NoRaces);
        }
        let race = RaceSimulator::new(noise_std, points).map_err(SimulationError::Noise)?;
        let teams = match mode {
            SimulationMode::PureSkill => None,
            SimulationMode::SkillPlusTeam(model) => Some(
                model
                    .resolve(&population)
                    .map_err(SimulationError::TeamModel)?,
            ),
        };
        tracing::debug!(
            drivers = population.len(),
            n_races,
            noise_std,
            team_mode = teams.is_some(),
            "season simulator ready"
        );
        Ok(Self {
            population,
            race,
            n_races,
            teams,
        })
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn n_races(&self) -> usize {
        self.n_races
    }

    /// Simulates one season.
    ///
    /// In team mode the team shocks are drawn once, before the first race, and shared by
    /// every race of the season.
    pub fn simulate_season<R>(&self, rng: &mut R) -> SeasonOutcome
    where
        R: Rng + ?Sized,
    {
        let grid = self.season_grid(rng);
        let mut totals = vec![0_u64; grid.len()];
        for _ in 0..self.n_races {
            for result in self.race.simulate(&grid, rng) {
                totals[result.entrant] += u64::from(result.points);
            }
        }
        rank_standings(&totals)
    }

    fn season_grid<R>(&self, rng: &mut R) -> Vec<RaceEntry>
    where
        R: Rng + ?Sized,
    {
        let team_strengths = match &self.teams {
            Some(field) => {
                let ratings = field.draw_season_team_ratings(rng);
                field.entrant_strengths(&ratings)
            }
            None => vec![0.0; self.population.len()],
        };
        self.population
            .entrants()
            .iter()
            .zip(team_strengths)
            .map(|(entrant, team_strength)| RaceEntry {
                skill: entrant.skill,
                team_strength,
                dnf_rate: entrant.dnf_rate,
            })
            .collect()
    }
}

/// Ranks season totals, most points first. Equal totals keep population order.
fn rank_standings(totals: &[u64]) -> SeasonOutcome {
    let mut order = (0..totals.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| totals[b].cmp(&totals[a]));
    let standings = order
        .into_iter()
        .enumerate()
        .map(|(rank, entrant)| SeasonStanding {
            entrant,
            total_points: totals[entrant],
            final_position: rank + 1,
        })
        .collect();
    SeasonOutcome { standings }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::{Entrant, TeamBaseline, TeamModel, population::tests::entrant};

    fn population(entrants: Vec<Entrant>) -> Population {
        Population::new(entrants).unwrap()
    }

    fn pure_skill(population: Population, n_races: usize, noise_std: f64) -> SeasonSimulator {
        SeasonSimulator::new(
            population,
            &SimulationMode::PureSkill,
            n_races,
            noise_std,
            PointsTable::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_setup_errors() {
        let drivers = || population(vec![entrant("AAA", 0.5, 0.0)]);
        let pure = &SimulationMode::PureSkill;
        assert_eq!(
            SeasonSimulator::new(drivers(), pure, 0, 0.1, PointsTable::default()).unwrap_err(),
            SimulationError::NoRaces
        );
        assert!(matches!(
            SeasonSimulator::new(drivers(), pure, 3, -0.1, PointsTable::default()),
            Err(SimulationError::Noise(_))
        ));

        let team_mode = SimulationMode::SkillPlusTeam(TeamModel {
            baselines: vec![],
            shock_std: 0.8,
        });
        assert!(matches!(
            SeasonSimulator::new(drivers(), &team_mode, 3, 0.1, PointsTable::default()),
            Err(SimulationError::TeamModel(TeamModelError::MissingBaseline { .. }))
        ));
    }

    #[test]
    fn test_noiseless_season_totals() {
        let simulator = pure_skill(
            population(vec![entrant("AAA", 0.9, 0.0), entrant("BBB", 0.1, 0.0)]),
            24,
            0.0,
        );
        let outcome = simulator.simulate_season(&mut Pcg64::seed_from_u64(0));
        assert_eq!(
            outcome.standings,
            vec![
                SeasonStanding {
                    entrant: 0,
                    total_points: 25 * 24,
                    final_position: 1,
                },
                SeasonStanding {
                    entrant: 1,
                    total_points: 18 * 24,
                    final_position: 2,
                },
            ]
        );
        assert_eq!(outcome.entrant_at(1), Some(0));
        assert_eq!(outcome.entrant_at(3), None);
    }

    #[test]
    fn test_totals_are_the_sum_of_race_draws() {
        let drivers = population(
            (0..12)
                .map(|i| entrant(&format!("D{i:02}"), f64::from(i) / 12.0, 0.1))
                .collect(),
        );
        let simulator = pure_skill(drivers.clone(), 7, 0.15);
        let outcome = simulator.simulate_season(&mut Pcg64::seed_from_u64(11));

        // replay the same draws race by race
        let race = RaceSimulator::new(0.15, PointsTable::default()).unwrap();
        let grid = drivers
            .entrants()
            .iter()
            .map(|e| RaceEntry {
                skill: e.skill,
                team_strength: 0.0,
                dnf_rate: e.dnf_rate,
            })
            .collect::<Vec<_>>();
        let mut rng = Pcg64::seed_from_u64(11);
        let mut expected = vec![0; drivers.len()];
        for _ in 0..7 {
            for result in race.simulate(&grid, &mut rng) {
                expected[result.entrant] += u64::from(result.points);
            }
        }

        for standing in &outcome.standings {
            assert_eq!(standing.total_points, expected[standing.entrant]);
        }
    }

    #[test]
    fn test_final_positions_are_a_permutation() {
        let drivers = population(
            (0..20)
                .map(|i| entrant(&format!("D{i:02}"), 0.5, 0.2))
                .collect(),
        );
        let simulator = pure_skill(drivers, 5, 0.1);
        let mut rng = Pcg64::seed_from_u64(12);
        for _ in 0..20 {
            let outcome = simulator.simulate_season(&mut rng);
            let positions = outcome
                .standings
                .iter()
                .map(|s| s.final_position)
                .collect::<Vec<_>>();
            assert_eq!(positions, (1..=20).collect::<Vec<_>>());
            assert!(
                outcome
                    .standings
                    .windows(2)
                    .all(|w| w[0].total_points >= w[1].total_points)
            );
        }
    }

    #[test]
    fn test_equal_totals_keep_population_order() {
        let outcome = rank_standings(&[10, 30, 10, 30]);
        let order = outcome
            .standings
            .iter()
            .map(|s| s.entrant)
            .collect::<Vec<_>>();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_totals_beyond_u32_are_ranked() {
        let big = u64::from(u32::MAX) + 25;
        let outcome = rank_standings(&[u64::from(u32::MAX), big]);
        assert_eq!(outcome.entrant_at(1), Some(1));
        assert_eq!(outcome.standings[0].total_points, big);
    }

    #[test]
    fn test_team_strength_decides_equal_drivers() {
        let with_team = |driver: &str, team: &str| Entrant {
            team: team.to_owned(),
            ..entrant(driver, 0.5, 0.0)
        };
        let drivers = population(vec![with_team("AAA", "Slow"), with_team("BBB", "Fast")]);
        let mode = SimulationMode::SkillPlusTeam(TeamModel {
            baselines: vec![
                TeamBaseline {
                    team: "Slow".to_owned(),
                    team_base_rating: 0.0,
                },
                TeamBaseline {
                    team: "Fast".to_owned(),
                    team_base_rating: 1.0,
                },
            ],
            shock_std: 0.0,
        });
        let simulator =
            SeasonSimulator::new(drivers, &mode, 3, 0.0, PointsTable::default()).unwrap();
        let outcome = simulator.simulate_season(&mut Pcg64::seed_from_u64(13));
        assert_eq!(outcome.entrant_at(1), Some(1));
        assert_eq!(outcome.standings[0].total_points, 75);
    }
}
