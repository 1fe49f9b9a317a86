//! Result pools: the flat numeric samples a distribution is fitted to.

use cubestat_stats::{descriptive::DescriptiveStats, histogram::Histogram};
use serde::Serialize;

use crate::{
    event::{Category, EventId, UnknownCategoryError, UnknownEventError},
    table::ResultTable,
};

/// The values of one category of one event, gathered from a result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pool {
    pub event: EventId,
    pub category: Category,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PoolError {
    #[display("{_0}")]
    UnknownEvent(#[error(not(source))] UnknownEventError),
    #[display("{_0}")]
    UnknownCategory(#[error(not(source))] UnknownCategoryError),
}

impl Pool {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A copy of this pool holding only actual results (drops DNF, DNS and
    /// empty attempts).
    ///
    /// # Examples
    ///
    /// ```
    /// use cubestat_results::{event::{Category, EventId}, pool::Pool};
    ///
    /// let pool = Pool {
    ///     event: EventId::Cube3,
    ///     category: Category::Single,
    ///     values: vec![812.0, -1.0, 901.0, 0.0, -2.0],
    /// };
    /// assert_eq!(pool.valid_only().values, vec![812.0, 901.0]);
    /// ```
    #[must_use]
    pub fn valid_only(&self) -> Self {
        Self {
            event: self.event,
            category: self.category,
            values: self.values.iter().copied().filter(|v| *v > 0.0).collect(),
        }
    }

    /// The pool values sorted ascending.
    #[must_use]
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    /// Descriptive statistics of the pool, or `None` when it is empty.
    #[must_use]
    pub fn summary(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::from_sorted(&self.sorted_values())
    }

    #[must_use]
    pub fn histogram(&self, num_bins: usize) -> Histogram {
        Histogram::new(self.values.iter().copied(), num_bins)
    }
}

impl ResultTable {
    /// Builds the pool of `category` values for `event`.
    ///
    /// For [`Category::Single`] the five attempt columns of every matching row
    /// are concatenated (`value1..value5` per row, rows in table order), giving
    /// up to five samples per row. The other categories take one column.
    /// Missing cells are skipped; invalid results are kept.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn pool(&self, event: EventId, category: Category) -> Pool {
        let values = self
            .rows_for_event(event)
            .flat_map(|row| row.category_values(category))
            .map(|value| value as f64)
            .collect::<Vec<_>>();
        log::debug!(
            "pooled {} {category} values for event {event}",
            values.len()
        );
        Pool {
            event,
            category,
            values,
        }
    }

    /// Builds a pool from textual keys, as found in configuration or on the
    /// command line.
    ///
    /// Unrecognised keys are reported through the log and no pool is built.
    ///
    /// # Examples
    ///
    /// ```
    /// use cubestat_results::table::ResultTable;
    ///
    /// let table = ResultTable::default();
    /// assert!(table.gen_pool("333", "best").unwrap().is_empty());
    /// assert!(table.gen_pool("999", "best").is_err());
    /// assert!(table.gen_pool("333", "worst").is_err());
    /// ```
    pub fn gen_pool(&self, event_key: &str, category_key: &str) -> Result<Pool, PoolError> {
        match parse_keys(event_key, category_key) {
            Ok((event, category)) => Ok(self.pool(event, category)),
            Err(err) => {
                log::warn!("cannot build pool: {err}");
                Err(err)
            }
        }
    }
}

fn parse_keys(event_key: &str, category_key: &str) -> Result<(EventId, Category), PoolError> {
    let event = event_key.parse::<EventId>()?;
    let category = category_key.parse::<Category>()?;
    Ok((event, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::sample_table;

    #[test]
    fn test_best_pool_has_one_value_per_row() {
        let table = sample_table();
        let pool = table.gen_pool("333", "best").unwrap();
        assert_eq!(pool.len(), table.rows_for_event(EventId::Cube3).count());
        assert_eq!(pool.values, vec![812.0, 1003.0, 790.0]);
    }

    #[test]
    fn test_average_pool() {
        let table = sample_table();
        let pool = table.gen_pool("333", "average").unwrap();
        assert_eq!(pool.values, vec![905.0, 1100.0, 880.0]);
        assert_eq!(pool.category, Category::Average);
    }

    #[test]
    fn test_single_pool_concatenates_attempts() {
        let table = sample_table();
        let pool = table.gen_pool("333", "single").unwrap();
        assert_eq!(pool.len(), 5 * 3);
        assert_eq!(
            &pool.values[..7],
            &[950.0, 812.0, 901.0, 864.0, 1020.0, 1003.0, 1150.0]
        );
    }

    #[test]
    fn test_invalid_results_are_pooled_but_filterable() {
        let table = sample_table();
        let pool = table.gen_pool("333bf", "single").unwrap();
        assert_eq!(pool.values, vec![-1.0, 4512.0, -1.0, 0.0, 0.0]);
        assert_eq!(pool.valid_only().values, vec![4512.0]);
    }

    #[test]
    fn test_unknown_keys() {
        let table = sample_table();
        assert_eq!(
            table.gen_pool("333mts", "best"),
            Err(PoolError::UnknownEvent(UnknownEventError {
                key: "333mts".to_owned()
            }))
        );
        assert!(matches!(
            table.gen_pool("333", "mean"),
            Err(PoolError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_pool_error_is_not_chained() {
        use std::error::Error as _;

        let table = sample_table();
        let err = table.gen_pool("333mts", "best").unwrap_err();
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            UnknownEventError {
                key: "333mts".to_owned()
            }
            .to_string()
        );

        let err = table.gen_pool("333", "mean").unwrap_err();
        assert!(err.source().is_none());
    }

    #[test]
    fn test_recognised_event_without_rows() {
        let table = sample_table();
        let pool = table.gen_pool("sq1", "single").unwrap();
        assert!(pool.is_empty());
        assert!(pool.summary().is_none());
        assert!(pool.histogram(10).bins.is_empty());
    }

    #[test]
    fn test_summary() {
        let table = sample_table();
        let summary = table.pool(EventId::Cube3, Category::Best).summary().unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 790.0);
        assert_eq!(summary.max, 1003.0);
        assert_eq!(summary.median, 812.0);
    }
}
