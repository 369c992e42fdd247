//! Min-max normalization.
//!
//! Maps a series of values onto `[0, 1]` relative to the smallest and largest value in
//! the series. A degenerate series (all values equal, including a single value) has no
//! spread to scale against, so every element maps to the neutral value [`NEUTRAL`].

/// Value assigned to every element of a series that has no spread.
pub const NEUTRAL: f64 = 0.5;

/// Min-max scales `values` onto `[0, 1]`.
///
/// The output has the same length and order as the input. Values must be finite.
///
/// # Examples
///
/// ```
/// use gridsim_stats::normalize::normalize_min_max;
///
/// assert_eq!(normalize_min_max(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalize_min_max(&[7.0, 7.0]), vec![0.5, 0.5]);
/// assert!(normalize_min_max(&[]).is_empty());
/// ```
#[must_use]
pub fn normalize_min_max(values: &[f64]) -> Vec<f64> {
    debug_assert!(values.iter().all(|v| v.is_finite()), "non-finite value");

    let Some(min) = values.iter().copied().min_by(f64::total_cmp) else {
        return vec![];
    };
    let max = values.iter().copied().fold(min, f64::max);
    let range = max - min;

    if range == 0.0 {
        return vec![NEUTRAL; values.len()];
    }
    values
        .iter()
        .map(|v| ((v - min) / range).clamp(0.0, 1.0))
        .collect()
}

/// Like [`normalize_min_max`], but for a series with missing entries.
///
/// Present values are scaled against each other; missing entries map to [`NEUTRAL`].
#[must_use]
pub fn normalize_min_max_partial(values: &[Option<f64>]) -> Vec<f64> {
    let present = values.iter().flatten().copied().collect::<Vec<_>>();
    let mut scaled = normalize_min_max(&present).into_iter();
    values
        .iter()
        .map(|v| match v {
            Some(_) => scaled.next().unwrap_or(NEUTRAL),
            None => NEUTRAL,
        })
        .collect()
}
