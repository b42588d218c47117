// ABOUTME: Descriptive statistics for one gas-exchange channel (VO2, VCO2 or RER)
// ABOUTME: Histogram-peak mode, population standard deviation and normal-approximation 95% CI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Two choices here look unusual and are kept for compatibility with
//! existing assessment reports:
//!
//! - the mode is the midpoint of the fullest bin of a 10-bin histogram over
//!   the sample range, since cart readings are continuous and rarely repeat
//! - the standard deviation divides by `n`, not `n - 1`
#![allow(clippy::suboptimal_flops)] // Safe: unfused arithmetic reproduces existing report values

use metabolic_core::constants::statistics::{MODE_HISTOGRAM_BINS, Z_95};
use metabolic_core::errors::{MetabolicError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Summary of one numeric series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Median (mean of the two middle values for even counts)
    pub median: f64,
    /// Midpoint of the fullest histogram bin
    pub mode: f64,
    /// Population standard deviation
    pub stdev: f64,
    /// `stdev / mean * 100`, or 0 when the mean is 0
    pub coefficient_of_variation: f64,
    /// Number of samples
    pub sample_size: usize,
    /// `1.96 * stdev / sqrt(n)`, or 0 for a single sample
    pub ci_95_halfwidth: f64,
    /// Lower 95% confidence bound of the mean
    pub ci_lower: f64,
    /// Upper 95% confidence bound of the mean
    pub ci_upper: f64,
}

impl SeriesStatistics {
    /// Compute statistics for a non-empty series
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::InsufficientData` when `samples` is empty
    pub fn from_samples(samples: &[f64]) -> PipelineResult<Self> {
        if samples.is_empty() {
            return Err(MetabolicError::insufficient_data(
                "no samples to summarize",
            ));
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let stdev = variance.sqrt();

        let coefficient_of_variation = if mean == 0.0 {
            0.0
        } else {
            stdev / mean * 100.0
        };

        let ci_95_halfwidth = if samples.len() > 1 {
            Z_95 * (stdev / n.sqrt())
        } else {
            0.0
        };

        Ok(Self {
            mean,
            median: median(samples),
            mode: histogram_mode(samples),
            stdev,
            coefficient_of_variation,
            sample_size: samples.len(),
            ci_95_halfwidth,
            ci_lower: mean - ci_95_halfwidth,
            ci_upper: mean + ci_95_halfwidth,
        })
    }
}

fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Midpoint of the fullest equal-width bin; ties go to the lowest bin.
///
/// Bin assignment follows the usual half-open `[lo, hi)` rule with the
/// maximum landing in the last bin. A constant series returns its value.
fn histogram_mode(samples: &[f64]) -> f64 {
    let lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        return lo;
    }

    let bins = MODE_HISTOGRAM_BINS;
    let span = hi - lo;
    let step = span / bins as f64;
    let edge = |i: usize| if i == bins { hi } else { (i as f64) * step + lo };

    let mut counts = [0_usize; MODE_HISTOGRAM_BINS];
    for &value in samples {
        let mut index = (((value - lo) / span) * bins as f64) as usize;
        index = index.min(bins - 1);
        if index > 0 && value < edge(index) {
            index -= 1;
        } else if index < bins - 1 && value >= edge(index + 1) {
            index += 1;
        }
        counts[index] += 1;
    }

    let mut peak = 0;
    for (index, &count) in counts.iter().enumerate() {
        if count > counts[peak] {
            peak = index;
        }
    }
    (edge(peak) + edge(peak + 1)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_single_sample_collapses_interval() {
        let stats = SeriesStatistics::from_samples(&[245.0]).unwrap();
        assert_eq!(stats.sample_size, 1);
        assert!((stats.ci_lower - 245.0).abs() < EPS);
        assert!((stats.ci_upper - 245.0).abs() < EPS);
        assert!(stats.ci_95_halfwidth.abs() < EPS);
    }

    #[test]
    fn test_constant_series() {
        let stats = SeriesStatistics::from_samples(&[0.82; 6]).unwrap();
        assert!((stats.mean - 0.82).abs() < EPS);
        assert!((stats.median - 0.82).abs() < EPS);
        assert!((stats.mode - 0.82).abs() < EPS);
        assert!(stats.stdev.abs() < EPS);
        assert!(stats.coefficient_of_variation.abs() < EPS);
        assert!((stats.ci_lower - stats.ci_upper).abs() < EPS);
    }

    #[test]
    fn test_population_stdev_and_interval() {
        let stats = SeriesStatistics::from_samples(&[250.0, 260.0, 270.0]).unwrap();
        let stdev = (200.0_f64 / 3.0).sqrt();
        assert!((stats.mean - 260.0).abs() < EPS);
        assert!((stats.median - 260.0).abs() < EPS);
        assert!((stats.stdev - stdev).abs() < EPS);
        assert!((stats.coefficient_of_variation - stdev / 260.0 * 100.0).abs() < EPS);

        let half = 1.96 * stdev / 3.0_f64.sqrt();
        assert!((stats.ci_95_halfwidth - half).abs() < EPS);
        assert!(stats.ci_lower <= stats.mean && stats.mean <= stats.ci_upper);
    }

    #[test]
    fn test_even_median() {
        let stats = SeriesStatistics::from_samples(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!((stats.median - 2.5).abs() < EPS);
    }

    #[test]
    fn test_mode_is_fullest_bin_midpoint() {
        // Range 0..10, bin width 1; three values fall in [7, 8)
        let samples = [0.0, 7.2, 7.5, 7.9, 3.0, 10.0];
        let stats = SeriesStatistics::from_samples(&samples).unwrap();
        assert!((stats.mode - 7.5).abs() < EPS);
    }

    #[test]
    fn test_mode_tie_prefers_lowest_bin() {
        // Two values in the first bin, two in the last
        let samples = [0.0, 0.5, 9.5, 10.0];
        let stats = SeriesStatistics::from_samples(&samples).unwrap();
        assert!((stats.mode - 0.5).abs() < EPS);
    }

    #[test]
    fn test_zero_mean_reports_zero_cv() {
        let stats = SeriesStatistics::from_samples(&[-1.0, 1.0]).unwrap();
        assert!(stats.coefficient_of_variation.abs() < EPS);
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        assert!(matches!(
            SeriesStatistics::from_samples(&[]),
            Err(MetabolicError::InsufficientData { .. })
        ));
    }
}
