use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Master seed for reproducible simulation runs.
///
/// This is a 128-bit (16-byte) seed. Each Monte Carlo trial derives a private
/// generator from it with [`Self::trial_rng`], so a run's results depend only on the
/// master seed and the trial indices, not on how trials are distributed over workers.
///
/// Seeds serialize as a 32-character hexadecimal string and parse from the same format.
///
/// # Example
///
/// ```
/// use gridsim_engine::SimulationSeed;
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: SimulationSeed = rand::rng().random();
///
/// // Same seed and trial index: same stream
/// let a: u64 = seed.trial_rng(7).random();
/// let b: u64 = seed.trial_rng(7).random();
/// assert_eq!(a, b);
///
/// let parsed: SimulationSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// assert_eq!(parsed.to_string(), "0123456789abcdeffedcba9876543210");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed: {reason}")]
pub struct ParseSeedError {
    reason: String,
}

impl SimulationSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the generator of one Monte Carlo trial.
    ///
    /// Every trial index selects a distinct PCG stream starting from the master seed.
    #[must_use]
    pub fn trial_rng(&self, trial: u64) -> Pcg64 {
        Pcg64::new(u128::from_be_bytes(self.0), u128::from(trial))
    }
}

impl fmt::Display for SimulationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SimulationSeed {
    type Err = ParseSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 hex characters, got {}", hex_str.len()),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParseSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SimulationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SimulationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SimulationSeed` values using the standard random distribution.
impl Distribution<SimulationSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SimulationSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value_sequential_bytes() {
        let seed = SimulationSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: SimulationSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_parse_uppercase_hex() {
        let seed: SimulationSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("abc".parse::<SimulationSeed>().is_err());
        assert!(serde_json::from_str::<SimulationSeed>("\"00\"").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let err = "zz23456789abcdeffedcba9876543210"
            .parse::<SimulationSeed>()
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid seed:"));
    }

    #[test]
    fn test_distinct_trials_have_distinct_streams() {
        let seed = SimulationSeed::from_bytes([7; 16]);
        let a: [u64; 4] = seed.trial_rng(0).random();
        let b: [u64; 4] = seed.trial_rng(1).random();
        assert_ne!(a, b);
    }
}
