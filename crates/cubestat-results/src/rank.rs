//! Rank thresholds derived from a fitted distribution.
//!
//! Smaller results are better. A rank level `L` (in percent) has the
//! threshold below which the fastest `L`% of the fitted distribution lies, so
//! a result at or below the threshold of level 5 is a "top 5%" result.

use cubestat_stats::normal::NormalParams;
use serde::Serialize;

use crate::{
    estimate::Estimate,
    event::{Category, EventId},
};

/// Rank levels used when none are given.
pub const DEFAULT_LEVELS: [f64; 7] = [1.0, 5.0, 10.0, 25.0, 50.0, 75.0, 90.0];

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum RankError {
    #[display("rank level {level} is outside the open interval (0, 100)")]
    InvalidLevel {
        #[error(not(source))]
        level: f64,
    },
    #[display("no rank levels given")]
    NoLevels,
}

/// One rank level and its result threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankLevel {
    /// Share of the distribution, in percent, at or below `threshold`.
    pub top_percent: f64,
    pub threshold: f64,
}

/// Rank thresholds of one event and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankTable {
    pub event: EventId,
    pub category: Category,
    pub params: NormalParams,
    /// Levels sorted by `top_percent`, ascending.
    pub levels: Vec<RankLevel>,
}

/// Computes the result thresholds of `levels` for a fitted distribution.
///
/// Levels are percentages in `(0, 100)`; they are sorted and deduplicated.
///
/// # Examples
///
/// ```
/// use cubestat_results::{
///     estimate::get_estimate, event::{Category, EventId}, pool::Pool, rank::gen_rank,
/// };
///
/// let pool = Pool {
///     event: EventId::Cube2,
///     category: Category::Average,
///     values: vec![300.0, 400.0, 500.0, 600.0, 700.0],
/// };
/// let rank = gen_rank(&get_estimate(pool), &[50.0, 10.0]).unwrap();
/// assert_eq!(rank.levels[0].top_percent, 10.0);
/// assert!((rank.levels[1].threshold - 500.0).abs() < 1e-9);
/// ```
pub fn gen_rank(estimate: &Estimate, levels: &[f64]) -> Result<RankTable, RankError> {
    let levels = normalize_levels(levels)?;
    let levels = levels
        .into_iter()
        .map(|top_percent| RankLevel {
            top_percent,
            threshold: estimate.rv.quantile(top_percent / 100.0),
        })
        .collect();
    Ok(RankTable {
        event: estimate.event(),
        category: estimate.category(),
        params: estimate.params,
        levels,
    })
}

/// Validates, sorts and deduplicates rank levels.
pub fn normalize_levels(levels: &[f64]) -> Result<Vec<f64>, RankError> {
    if levels.is_empty() {
        return Err(RankError::NoLevels);
    }
    if let Some(&level) = levels.iter().find(|l| !(**l > 0.0 && **l < 100.0)) {
        return Err(RankError::InvalidLevel { level });
    }
    let mut levels = levels.to_vec();
    levels.sort_by(f64::total_cmp);
    levels.dedup();
    Ok(levels)
}

impl RankTable {
    /// The tightest level whose threshold the result meets, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use cubestat_results::{
    ///     estimate::get_estimate, event::{Category, EventId}, pool::Pool, rank::gen_rank,
    /// };
    ///
    /// let pool = Pool {
    ///     event: EventId::Cube3,
    ///     category: Category::Single,
    ///     values: vec![800.0, 900.0, 1000.0, 1100.0, 1200.0],
    /// };
    /// let rank = gen_rank(&get_estimate(pool), &[10.0, 50.0, 90.0]).unwrap();
    /// assert_eq!(rank.level_for(700.0), Some(10.0));
    /// assert_eq!(rank.level_for(990.0), Some(50.0));
    /// assert_eq!(rank.level_for(1500.0), None);
    /// ```
    #[must_use]
    pub fn level_for(&self, result: f64) -> Option<f64> {
        self.levels
            .iter()
            .find(|level| result <= level.threshold)
            .map(|level| level.top_percent)
    }
}
