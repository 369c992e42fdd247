/// Occurrence counts over a fixed set of categories, identified by index.
///
/// Tables with the same number of categories can be merged, and merging is
/// order-independent, which lets independent workers each fill a private table and
/// combine them afterwards.
///
/// # Examples
///
/// ```
/// use gridsim_stats::frequency::FrequencyTable;
///
/// let mut table = FrequencyTable::new(3);
/// table.record(0);
/// table.record(2);
/// table.record(2);
/// table.record(2);
/// assert_eq!(table.total(), 4);
/// assert_eq!(table.probability(2), Some(0.75));
/// assert_eq!(table.probability(1), Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<u64>,
    total: u64,
}

impl FrequencyTable {
    /// Creates an empty table over `categories` categories.
    #[must_use]
    pub fn new(categories: usize) -> Self {
        Self {
            counts: vec![0; categories],
            total: 0,
        }
    }

    /// Records one occurrence of `category`.
    ///
    /// # Panics
    ///
    /// Panics if `category` is out of range.
    pub fn record(&mut self, category: usize) {
        self.counts[category] += 1;
        self.total += 1;
    }

    /// Adds every count of `other` into this table.
    ///
    /// # Panics
    ///
    /// Panics if the tables have different numbers of categories.
    pub fn merge(&mut self, other: &Self) {
        assert_eq!(self.counts.len(), other.counts.len());
        for (count, other) in self.counts.iter_mut().zip(&other.counts) {
            *count += other;
        }
        self.total += other.total;
    }

    /// Number of occurrences recorded in total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Raw occurrence counts, indexed by category.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Empirical probability of `category`, or `None` when nothing was recorded.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn probability(&self, category: usize) -> Option<f64> {
        (self.total > 0).then(|| self.counts[category] as f64 / self.total as f64)
    }

    /// Empirical probabilities for every category (all zero when nothing was recorded).
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|i| self.probability(i).unwrap_or(0.0))
            .collect()
    }
}
