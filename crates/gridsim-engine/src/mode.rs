//! Pure-skill and skill-plus-team simulation modes.
//!
//! In [`SimulationMode::PureSkill`] a driver's race performance is built from their own
//! skill alone. In [`SimulationMode::SkillPlusTeam`] every team additionally has a base
//! strength, and each simulated season draws one *regulation shock* per team from
//! `N(0, shock_std)`. The shocked team rating is held fixed for every race of that
//! season and added to the performance of each of the team's drivers.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use serde::{Deserialize, Serialize};

use crate::Population;

/// Default standard deviation of the per-season team shock.
pub const DEFAULT_SHOCK_STD: f64 = 0.8;

/// Strength prior of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBaseline {
    pub team: String,
    pub team_base_rating: f64,
}

/// Team strength model used in [`SimulationMode::SkillPlusTeam`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamModel {
    pub baselines: Vec<TeamBaseline>,
    /// Standard deviation of the once-per-season team shock
    pub shock_std: f64,
}

/// How race performance is composed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SimulationMode {
    /// Driver skill only
    #[default]
    PureSkill,
    /// Driver skill plus a shocked team rating
    SkillPlusTeam(TeamModel),
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TeamModelError {
    #[display("shock standard deviation must be finite and non-negative, got {shock_std}")]
    InvalidShockStd { shock_std: f64 },
    #[display("team '{team}' has non-finite base rating {rating}")]
    NonFiniteBaseline { team: String, rating: f64 },
    #[display("team '{team}' has more than one baseline")]
    DuplicateBaseline { team: String },
    #[display("no baseline for team '{team}' of driver '{driver}'")]
    MissingBaseline { driver: String, team: String },
}

/// A [`TeamModel`] resolved against a population.
#[derive(Debug, Clone)]
pub struct TeamField {
    teams: Vec<String>,
    base_ratings: Vec<f64>,
    /// Team index of every entrant
    team_of: Vec<usize>,
    shock: Normal<f64>,
}

impl TeamModel {
    /// Validates the model and assigns every entrant to its team's baseline.
    pub fn resolve(&self, population: &Population) -> Result<TeamField, TeamModelError> {
        let shock_std = self.shock_std;
        if !shock_std.is_finite() || shock_std < 0.0 {
            return Err(TeamModelError::InvalidShockStd { shock_std });
        }
        let shock = Normal::new(0.0, shock_std)
            .map_err(|_| TeamModelError::InvalidShockStd { shock_std })?;

        let mut index_of = BTreeMap::new();
        for (i, baseline) in self.baselines.iter().enumerate() {
            if !baseline.team_base_rating.is_finite() {
                return Err(TeamModelError::NonFiniteBaseline {
                    team: baseline.team.clone(),
                    rating: baseline.team_base_rating,
                });
            }
            if index_of.insert(baseline.team.as_str(), i).is_some() {
                return Err(TeamModelError::DuplicateBaseline {
                    team: baseline.team.clone(),
                });
            }
        }

        let team_of = population
            .entrants()
            .iter()
            .map(|entrant| {
                index_of.get(entrant.team.as_str()).copied().ok_or_else(|| {
                    TeamModelError::MissingBaseline {
                        driver: entrant.driver.clone(),
                        team: entrant.team.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TeamField {
            teams: self.baselines.iter().map(|b| b.team.clone()).collect(),
            base_ratings: self.baselines.iter().map(|b| b.team_base_rating).collect(),
            team_of,
            shock,
        })
    }
}

impl TeamField {
    /// Draws this season's team ratings: base rating plus one shock per team.
    ///
    /// The result is indexed like the model's baselines (see [`Self::teams`]).
    pub fn draw_season_team_ratings<R>(&self, rng: &mut R) -> Vec<f64>
    where
        R: Rng + ?Sized,
    {
        self.base_ratings
            .iter()
            .map(|base| base + self.shock.sample(rng))
            .collect()
    }

    /// Spreads per-team ratings onto entrants.
    #[must_use]
    pub fn entrant_strengths(&self, team_ratings: &[f64]) -> Vec<f64> {
        self.team_of
            .iter()
            .map(|&team| team_ratings[team])
            .collect()
    }

    #[must_use]
    pub fn teams(&self) -> &[String] {
        &self.teams
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::{Entrant, population::tests::entrant};

    fn baseline(team: &str, rating: f64) -> TeamBaseline {
        TeamBaseline {
            team: team.to_owned(),
            team_base_rating: rating,
        }
    }

    fn population() -> Population {
        let with_team = |driver: &str, team: &str| Entrant {
            team: team.to_owned(),
            ..entrant(driver, 0.5, 0.0)
        };
        Population::new(vec![
            with_team("AAA", "Red"),
            with_team("BBB", "Blue"),
            with_team("CCC", "Red"),
        ])
        .unwrap()
    }

    #[test]
    fn test_entrants_share_their_team_rating() {
        let model = TeamModel {
            baselines: vec![baseline("Red", 1.0), baseline("Blue", 0.2)],
            shock_std: 0.8,
        };
        let field = model.resolve(&population()).unwrap();
        let mut rng = Pcg64::seed_from_u64(0);
        let ratings = field.draw_season_team_ratings(&mut rng);
        assert_eq!(ratings.len(), 2);

        let strengths = field.entrant_strengths(&ratings);
        assert_eq!(strengths, vec![ratings[0], ratings[1], ratings[0]]);
    }

    #[test]
    fn test_zero_shock_keeps_base_ratings() {
        let model = TeamModel {
            baselines: vec![baseline("Red", 1.0), baseline("Blue", 0.2)],
            shock_std: 0.0,
        };
        let field = model.resolve(&population()).unwrap();
        let ratings = field.draw_season_team_ratings(&mut Pcg64::seed_from_u64(1));
        assert_eq!(ratings, vec![1.0, 0.2]);
    }

    #[test]
    fn test_missing_baseline_is_rejected() {
        let model = TeamModel {
            baselines: vec![baseline("Red", 1.0)],
            shock_std: 0.8,
        };
        let err = model.resolve(&population()).unwrap_err();
        assert_eq!(
            err,
            TeamModelError::MissingBaseline {
                driver: "BBB".to_owned(),
                team: "Blue".to_owned(),
            }
        );
    }

    #[test]
    fn test_invalid_model_is_rejected() {
        let negative = TeamModel {
            baselines: vec![baseline("Red", 1.0), baseline("Blue", 0.2)],
            shock_std: -1.0,
        };
        assert!(matches!(
            negative.resolve(&population()),
            Err(TeamModelError::InvalidShockStd { .. })
        ));

        let duplicate = TeamModel {
            baselines: vec![baseline("Red", 1.0), baseline("Red", 0.2)],
            shock_std: 0.8,
        };
        assert!(matches!(
            duplicate.resolve(&population()),
            Err(TeamModelError::DuplicateBaseline { .. })
        ));
    }
}
