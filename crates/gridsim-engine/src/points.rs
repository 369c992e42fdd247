use serde::{Deserialize, Serialize};

/// Points awarded to positions 1 through 10 under the current championship rules.
pub const F1_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points awarded per finishing position.
///
/// Position `p` (1-based) scores `table[p - 1]`; positions beyond the table score 0.
///
/// # Example
///
/// ```
/// use gridsim_engine::PointsTable;
///
/// let table = PointsTable::default();
/// assert_eq!(table.points_for(1), 25);
/// assert_eq!(table.points_for(10), 1);
/// assert_eq!(table.points_for(11), 0);
/// assert_eq!(table.total_awarded(3), 25 + 18 + 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable(Vec<u32>);

impl Default for PointsTable {
    fn default() -> Self {
        Self(F1_POINTS.to_vec())
    }
}

impl PointsTable {
    #[must_use]
    pub fn new(points: Vec<u32>) -> Self {
        Self(points)
    }

    /// Points for a 1-based finishing position.
    #[must_use]
    pub fn points_for(&self, position: usize) -> u32 {
        position
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Total points handed out in a race with `field_size` finishers.
    #[must_use]
    pub fn total_awarded(&self, field_size: usize) -> u32 {
        self.0.iter().take(field_size).sum()
    }

    /// Number of scoring positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
