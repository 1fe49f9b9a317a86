//! Statistical utilities for competition result analysis.
//!
//! This crate provides the generic numeric building blocks used by
//! `cubestat-results`. It knows nothing about events or competitors:
//!
//! - **Descriptive statistics**: min, max, mean, median, variance, standard deviation
//! - **Percentiles**: nearest-rank percentiles of an empirical sample
//! - **Histogram generation**: equal-width frequency distributions
//! - **Normal fitting**: maximum-likelihood Gaussian fit and the fitted distribution
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`normal`]: Gaussian fit and percentile queries against the fitted model
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use cubestat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Fitting a normal distribution
//!
//! ```
//! use cubestat_stats::normal::FittedNormal;
//!
//! let fitted = FittedNormal::fit(&[1.0, 2.0, 3.0, 4.0, 5.0]);
//! assert_eq!(fitted.mean(), 3.0);
//! assert!((fitted.cdf(3.0) - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use cubestat_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(values, 5);
//! assert_eq!(histogram.total(), 10);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod normal;
pub mod percentiles;
