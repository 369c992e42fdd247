/// Descriptive statistics summarizing a dataset.
///
/// This structure contains the measures the rating pipeline needs: count, range,
/// arithmetic mean and the sample (Bessel-corrected) standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The sample variance (divides by `n - 1`).
    ///
    /// `None` when the dataset has fewer than two values.
    pub sample_variance: Option<f64>,
    /// The sample standard deviation.
    ///
    /// `None` when the dataset has fewer than two values.
    pub sample_std_dev: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in any order.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridsim_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 9.0);
    /// assert_eq!(stats.mean, 5.0);
    /// assert!((stats.sample_std_dev.unwrap() - 2.138_089_935).abs() < 1e-6);
    ///
    /// let single = DescriptiveStats::new([3.0]).unwrap();
    /// assert_eq!(single.sample_std_dev, None);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let count = values.len();
        let min = values.iter().copied().min_by(f64::total_cmp)?;
        let max = values.iter().copied().max_by(f64::total_cmp)?;
        let mean = values.iter().sum::<f64>() / count as f64;

        let sample_variance = (count >= 2).then(|| {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        });
        let sample_std_dev = sample_variance.map(f64::sqrt);

        Some(Self {
            count,
            min,
            max,
            mean,
            sample_variance,
            sample_std_dev,
        })
    }
}

/// Arithmetic mean of the values, or `None` for an empty input.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
