use std::ops::Range;

use serde::Serialize;

/// An equal-width histogram of a dataset.
///
/// Bins span `[min, max]` of the data. Every bin is half-open except the
/// last, which also includes `max`, so each value lands in exactly one bin.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// A single histogram bin.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// Values covered by this bin.
    pub range: Range<f64>,
    /// The number of values that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins.
    ///
    /// Non-finite values are ignored. An empty input or `num_bins == 0`
    /// yields a histogram with no bins. When every value is equal the data
    /// range is widened to one unit around that value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cubestat_stats::histogram::Histogram;
    /// let histogram = Histogram::new([1.0, 2.0, 2.5, 4.0], 3);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, vec![1, 2, 1]);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max - min < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }
        let width = (max - min) / num_bins as f64;

        // Edges are recomputed from the index to avoid accumulating rounding error
        let edge = |idx: usize| {
            if idx == num_bins {
                max
            } else {
                min + width * idx as f64
            }
        };
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: edge(idx)..edge(idx + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for value in values {
            let idx = (((value - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// The largest single-bin count, useful for scaling bar charts.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}
