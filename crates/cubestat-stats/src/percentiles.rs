use serde::Serialize;

/// Precomputed percentile values for a dataset.
///
/// # Examples
///
/// ```
/// use cubestat_stats::percentiles::Percentiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(6.0));
/// assert_eq!(percentiles.get(25.0), Some(3.0));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Percentiles {
    /// (percentile, value) pairs in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Computes percentiles from unsorted values.
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Gets the value at a precomputed percentile, or `None` if it was not requested.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values
            .iter()
            .find(|(p, _)| (*p - percentile).abs() < f64::EPSILON)
            .map(|(_, value)| *value)
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses the nearest-rank method: for `n` values the k-th percentile is the
/// value at index `floor(n * k / 100)`, clamped to the last element.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use cubestat_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&values, 50.0), 3.0);
/// assert_eq!(compute_percentile(&values, 25.0), 2.0);
/// assert_eq!(compute_percentile(&values, 100.0), 5.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let idx = ((sorted_values.len() as f64 * percentile) / 100.0) as usize;
    let idx = idx.min(sorted_values.len() - 1);
    sorted_values[idx]
}

/// Percentage of `sorted_values` that are less than or equal to `value`.
///
/// This is the empirical counterpart of a CDF lookup. Returns `f64::NAN` for
/// an empty sample.
///
/// # Examples
///
/// ```
/// use cubestat_stats::percentiles::percentile_rank;
///
/// let values = vec![10.0, 20.0, 30.0, 40.0];
/// assert_eq!(percentile_rank(&values, 20.0), 50.0);
/// assert_eq!(percentile_rank(&values, 5.0), 0.0);
/// assert_eq!(percentile_rank(&values, 99.0), 100.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentile_rank(sorted_values: &[f64], value: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let at_or_below = sorted_values.partition_point(|v| *v <= value);
    at_or_below as f64 * 100.0 / sorted_values.len() as f64
}
