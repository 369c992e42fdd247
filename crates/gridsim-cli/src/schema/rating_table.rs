use chrono::{DateTime, Utc};
use gridsim_history::rating::DriverRating;
use serde::{Deserialize, Serialize};

/// Driver rating table produced by `gridsim rate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingTable {
    /// Timestamp when the table was built (ISO 8601 format)
    pub rated_at: DateTime<Utc>,
    /// Historical races the ratings were computed from
    pub races: usize,
    /// Ratings sorted by composite rating, best first
    pub drivers: Vec<DriverRating>,
}
