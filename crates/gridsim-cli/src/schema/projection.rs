use chrono::{DateTime, Utc};
use gridsim_engine::TeamBaseline;
use gridsim_montecarlo::{Projection, SimulationConfig};
use serde::{Deserialize, Serialize};

/// Monte Carlo projection with the inputs needed to reproduce it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRecord {
    /// Timestamp when the simulation finished (ISO 8601 format)
    pub simulated_at: DateTime<Utc>,
    pub config: SimulationConfig,
    /// Team baselines used in skill-plus-team mode, absent in pure-skill mode
    pub team_baselines: Option<Vec<TeamBaseline>>,
    #[serde(flatten)]
    pub projection: Projection,
}
