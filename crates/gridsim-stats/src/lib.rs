//! Statistical utilities for the gridsim project.
//!
//! This crate provides the small set of numeric tools the rating and simulation
//! pipeline is built on:
//!
//! - **Descriptive statistics**: mean, range and sample standard deviation
//! - **Normalization**: min-max scaling onto `[0, 1]` with a neutral value for degenerate series
//! - **Rolling windows**: trailing means with partial windows and missing observations
//! - **Frequency tables**: mergeable occurrence counts and empirical probabilities
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`normalize`]: Min-max normalization
//! - [`rolling`]: Trailing-window means
//! - [`frequency`]: Frequency tables for Monte Carlo aggregation
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use gridsim_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Normalizing a series
//!
//! ```
//! use gridsim_stats::normalize::normalize_min_max;
//!
//! let norm = normalize_min_max(&[10.0, 20.0, 15.0]);
//! assert_eq!(norm, vec![0.0, 1.0, 0.5]);
//! ```

pub mod descriptive;
pub mod frequency;
pub mod normalize;
pub mod rolling;
