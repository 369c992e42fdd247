use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One driver taking part in simulated races.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub driver: String,
    pub team: String,
    /// Base skill scalar (typically the composite rating)
    pub skill: f64,
    /// Per-race probability of not finishing, in `[0, 1]`
    pub dnf_rate: f64,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PopulationError {
    #[display("population has no drivers")]
    Empty,
    #[display("driver '{driver}' appears more than once")]
    DuplicateDriver { driver: String },
    #[display("driver '{driver}' has non-finite skill {skill}")]
    NonFiniteSkill { driver: String, skill: f64 },
    #[display("driver '{driver}' has DNF rate {dnf_rate} outside [0, 1]")]
    InvalidDnfRate { driver: String, dnf_rate: f64 },
}

/// A validated, ordered set of entrants.
///
/// The order is meaningful: simulators break exact ties by it, and results refer to
/// entrants by their index in this population.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    entrants: Vec<Entrant>,
}

impl Population {
    /// Validates and wraps the entrants.
    pub fn new(entrants: Vec<Entrant>) -> Result<Self, PopulationError> {
        if entrants.is_empty() {
            return Err(PopulationError::Empty);
        }
        let mut seen = HashSet::new();
        for entrant in &entrants {
            if !seen.insert(entrant.driver.as_str()) {
                return Err(PopulationError::DuplicateDriver {
                    driver: entrant.driver.clone(),
                });
            }
            if !entrant.skill.is_finite() {
                return Err(PopulationError::NonFiniteSkill {
                    driver: entrant.driver.clone(),
                    skill: entrant.skill,
                });
            }
            if !(0.0..=1.0).contains(&entrant.dnf_rate) {
                return Err(PopulationError::InvalidDnfRate {
                    driver: entrant.driver.clone(),
                    dnf_rate: entrant.dnf_rate,
                });
            }
        }
        Ok(Self { entrants })
    }

    #[must_use]
    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    #[must_use]
    pub fn entrant(&self, index: usize) -> &Entrant {
        &self.entrants[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    /// Never `true` for a population built by [`Self::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }
}
