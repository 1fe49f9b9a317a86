//! Maximum-likelihood normal fit and queries against the fitted model.
//!
//! The fit is the closed-form MLE: the sample mean and the population
//! standard deviation (divisor `n`). No sample-size or domain validation is
//! done, so degenerate samples produce degenerate models:
//!
//! - an empty sample has `NaN` parameters and every query returns `NaN`;
//! - a sample whose values are all equal has a standard deviation of zero and
//!   is treated as a point mass at the mean.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Location and scale of a fitted normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy)]
enum Model {
    Normal(Normal),
    PointMass,
    Undefined,
}

/// A normal distribution fitted to a sample.
#[derive(Debug, Clone, Copy)]
pub struct FittedNormal {
    params: NormalParams,
    model: Model,
}

impl FittedNormal {
    /// Fits a normal distribution to `values` by maximum likelihood.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cubestat_stats::normal::FittedNormal;
    /// let fitted = FittedNormal::fit(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// assert_eq!(fitted.mean(), 3.0);
    /// assert!((fitted.std_dev() - 2.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::from_params(f64::NAN, f64::NAN);
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self::from_params(mean, variance.sqrt())
    }

    /// Builds the distribution for known parameters.
    ///
    /// A zero (or negative) standard deviation with a finite mean gives a
    /// point mass; any non-finite parameter gives an undefined model.
    #[must_use]
    pub fn from_params(mean: f64, std_dev: f64) -> Self {
        let model = if !mean.is_finite() || !std_dev.is_finite() {
            Model::Undefined
        } else if std_dev <= 0.0 {
            Model::PointMass
        } else {
            Normal::new(mean, std_dev).map_or(Model::Undefined, Model::Normal)
        };
        Self {
            params: NormalParams { mean, std_dev },
            model,
        }
    }

    #[must_use]
    pub fn params(&self) -> NormalParams {
        self.params
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.params.mean
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.params.std_dev
    }

    /// Whether the fit has a positive, finite standard deviation.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !matches!(self.model, Model::Normal(_))
    }

    /// Probability that a draw is less than or equal to `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cubestat_stats::normal::FittedNormal;
    /// let fitted = FittedNormal::from_params(10.0, 2.0);
    /// assert!((fitted.cdf(10.0) - 0.5).abs() < 1e-12);
    /// assert!(fitted.cdf(4.0) < 0.01);
    /// ```
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        match self.model {
            Model::Normal(normal) => normal.cdf(x),
            Model::PointMass => {
                if x >= self.params.mean {
                    1.0
                } else {
                    0.0
                }
            }
            Model::Undefined => f64::NAN,
        }
    }

    /// Probability that a draw is greater than `x`.
    #[must_use]
    pub fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Inverse of [`cdf`](Self::cdf): the value below which a fraction `p` of
    /// the distribution lies.
    ///
    /// Returns `NaN` when `p` is outside `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cubestat_stats::normal::FittedNormal;
    /// let fitted = FittedNormal::from_params(0.0, 1.0);
    /// assert!((fitted.quantile(0.975) - 1.959_964).abs() < 1e-5);
    /// assert!(fitted.quantile(1.5).is_nan());
    /// ```
    #[must_use]
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        match self.model {
            Model::Normal(normal) => normal.inverse_cdf(p),
            Model::PointMass => self.params.mean,
            Model::Undefined => f64::NAN,
        }
    }

    /// Number of standard deviations `x` lies from the mean.
    #[must_use]
    pub fn z_score(&self, x: f64) -> f64 {
        (x - self.params.mean) / self.params.std_dev
    }
}
