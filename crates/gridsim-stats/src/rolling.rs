use std::num::NonZeroUsize;

use crate::descriptive;

/// Trailing mean over the last `window` observations, allowing partial windows.
///
/// Element `i` of the output is the mean of `values[i + 1 - window ..= i]` (clipped at
/// the start of the series), so the first element equals the first value. Missing
/// observations still occupy a slot in the window but do not contribute to the mean;
/// a window that contains no present value yields `None`.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use gridsim_stats::rolling::trailing_mean;
///
/// let window = NonZeroUsize::new(3).unwrap();
/// let means = trailing_mean(&[Some(10.0), Some(0.0), Some(5.0), Some(1.0)], window);
/// assert_eq!(means, vec![Some(10.0), Some(5.0), Some(5.0), Some(2.0)]);
/// ```
#[must_use]
pub fn trailing_mean(values: &[Option<f64>], window: NonZeroUsize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window.get());
            descriptive::mean(values[start..=i].iter().flatten().copied())
        })
        .collect()
}
