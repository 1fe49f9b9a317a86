//! Gaussian estimation of result pools.

use cubestat_stats::normal::{FittedNormal, NormalParams};
use serde::Serialize;

use crate::{
    event::{Category, EventId},
    pool::Pool,
};

/// A pool together with the normal distribution fitted to it.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub pool: Pool,
    /// `(mean, std_dev)` of the fit.
    pub params: NormalParams,
    /// The fitted distribution, for percentile and rank queries.
    pub rv: FittedNormal,
}

/// Serializable summary of an [`Estimate`], without the pooled values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateRecord {
    pub event: EventId,
    pub category: Category,
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
}

/// Fits a normal distribution to the values of `pool`.
///
/// No validation of the sample is done: an empty pool gets `NaN` parameters
/// and a pool of identical values a standard deviation of zero.
///
/// # Examples
///
/// ```
/// use cubestat_results::{estimate::get_estimate, event::{Category, EventId}, pool::Pool};
///
/// let pool = Pool {
///     event: EventId::Skewb,
///     category: Category::Single,
///     values: vec![1.0, 2.0, 3.0, 4.0, 5.0],
/// };
/// let estimate = get_estimate(pool);
/// assert_eq!(estimate.params.mean, 3.0);
/// ```
#[must_use]
pub fn get_estimate(pool: Pool) -> Estimate {
    let rv = FittedNormal::fit(&pool.values);
    let params = rv.params();
    log::debug!(
        "fitted {} {} over {} values: mean={:.2} std={:.2}",
        pool.event,
        pool.category,
        pool.len(),
        params.mean,
        params.std_dev
    );
    Estimate { pool, params, rv }
}

impl Estimate {
    #[must_use]
    pub fn event(&self) -> EventId {
        self.pool.event
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.pool.category
    }

    #[must_use]
    pub fn to_record(&self) -> EstimateRecord {
        EstimateRecord {
            event: self.event(),
            category: self.category(),
            samples: self.pool.len(),
            mean: self.params.mean,
            std_dev: self.params.std_dev,
        }
    }
}
