// ABOUTME: Resting metabolic rate calculator using the Weir equation over averaged gas exchange
// ABOUTME: Derives substrate oxidation, confidence-bounded ranges and predicted-RMR comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::suboptimal_flops)] // Safe: unfused arithmetic reproduces existing report values

//! # Metabolic Calculator
//!
//! All inputs are ml/min averages; all outputs are per day.
//!
//! ```text
//! rmr            = (3.941 x VO2 + 1.106 x VCO2) x 1.44      kcal/day
//! fat_oxidation  = 1.67 x (VO2 - VCO2) x 1.44               g/day
//! carb_oxidation = (4.55 x VCO2 - 3.21 x VO2) x 1.44        g/day
//! ```
//!
//! Range bounds pair opposite confidence limits so the range is the widest
//! the VO2/VCO2 intervals allow. RMR bounds vary VO2 only.

use crate::algorithms::RmrPrediction;
use crate::gas_exchange::SampleExtraction;
use crate::statistics::SeriesStatistics;
use crate::tabular;
use metabolic_core::constants::calorimetry::{
    CARB_VCO2_COEF, CARB_VO2_COEF, DAILY_SCALE, FAT_OXIDATION_COEF, WEIR_VCO2_COEF,
    WEIR_VO2_COEF,
};
use metabolic_core::errors::{MetabolicError, PipelineResult};
use metabolic_core::models::ClientAnthropometrics;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Weir-equation energy expenditure (kcal/day) from VO2/VCO2 in ml/min
#[must_use]
pub fn weir_rmr(vo2_ml_min: f64, vco2_ml_min: f64) -> f64 {
    (WEIR_VO2_COEF * vo2_ml_min + WEIR_VCO2_COEF * vco2_ml_min) * DAILY_SCALE
}

/// Fat oxidation (g/day)
#[must_use]
pub fn fat_oxidation(vo2_ml_min: f64, vco2_ml_min: f64) -> f64 {
    FAT_OXIDATION_COEF * (vo2_ml_min - vco2_ml_min) * DAILY_SCALE
}

/// Carbohydrate oxidation (g/day)
#[must_use]
pub fn carb_oxidation(vo2_ml_min: f64, vco2_ml_min: f64) -> f64 {
    (CARB_VCO2_COEF * vco2_ml_min - CARB_VO2_COEF * vo2_ml_min) * DAILY_SCALE
}

/// Lower and upper ends of a derived estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateBounds {
    /// Lower end
    pub lower: f64,
    /// Upper end
    pub upper: f64,
}

/// Output of one calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicResult {
    /// Measured resting metabolic rate (kcal/day)
    pub rmr_kcal_day: f64,
    /// Fat oxidation (g/day)
    pub fat_oxidation_g_day: f64,
    /// Carbohydrate oxidation (g/day)
    pub carb_oxidation_g_day: f64,
    /// RMR range from the VO2 confidence interval
    pub rmr_bounds: EstimateBounds,
    /// Fat oxidation range
    pub fat_oxidation_bounds: EstimateBounds,
    /// Carbohydrate oxidation range
    pub carb_oxidation_bounds: EstimateBounds,
    /// Predictive-equation comparison, present when anthropometrics were supplied
    pub prediction: Option<RmrPrediction>,
    /// VO2 statistics
    pub vo2: SeriesStatistics,
    /// VCO2 statistics
    pub vco2: SeriesStatistics,
    /// RER statistics
    pub rer: SeriesStatistics,
}

impl MetabolicResult {
    /// Average of the predictive equations, 0 without anthropometrics
    #[must_use]
    pub fn predicted_rmr_kcal_day(&self) -> f64 {
        self.prediction.map_or(0.0, |p| p.average)
    }

    /// Measured RMR as a percentage of predicted, 0 without anthropometrics
    #[must_use]
    pub fn rmr_percent_predicted(&self) -> f64 {
        self.prediction.map_or(0.0, |p| p.percent_of_predicted)
    }
}

/// A calculation over CSV text together with the samples it used
#[derive(Debug, Clone, PartialEq)]
pub struct CsvCalculation {
    /// Calculated metrics
    pub result: MetabolicResult,
    /// Accepted samples and the skipped-row count
    pub extraction: SampleExtraction,
}

/// Stateless metabolic calculator
pub struct MetabolicCalculator;

impl MetabolicCalculator {
    /// Calculate RMR, substrate oxidation and statistics from channel series
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::InsufficientData` if any series is empty, or
    /// `MetabolicError::InvalidInput` if supplied anthropometrics are invalid
    pub fn calculate(
        vo2: &[f64],
        vco2: &[f64],
        rer: &[f64],
        anthropometrics: Option<&ClientAnthropometrics>,
    ) -> PipelineResult<MetabolicResult> {
        let vo2 = channel_statistics("VO2", vo2)?;
        let vco2 = channel_statistics("VCO2", vco2)?;
        let rer = channel_statistics("RER", rer)?;

        let rmr_kcal_day = weir_rmr(vo2.mean, vco2.mean);
        let rmr_bounds = EstimateBounds {
            lower: weir_rmr(vo2.ci_lower, vco2.mean),
            upper: weir_rmr(vo2.ci_upper, vco2.mean),
        };
        let fat_oxidation_bounds = EstimateBounds {
            lower: fat_oxidation(vo2.ci_lower, vco2.ci_upper),
            upper: fat_oxidation(vo2.ci_upper, vco2.ci_lower),
        };
        let carb_oxidation_bounds = EstimateBounds {
            lower: carb_oxidation(vo2.ci_upper, vco2.ci_lower),
            upper: carb_oxidation(vo2.ci_lower, vco2.ci_upper),
        };

        let prediction = anthropometrics
            .map(|client| RmrPrediction::compare(rmr_kcal_day, client))
            .transpose()?;

        Ok(MetabolicResult {
            rmr_kcal_day,
            fat_oxidation_g_day: fat_oxidation(vo2.mean, vco2.mean),
            carb_oxidation_g_day: carb_oxidation(vo2.mean, vco2.mean),
            rmr_bounds,
            fat_oxidation_bounds,
            carb_oxidation_bounds,
            prediction,
            vo2,
            vco2,
            rer,
        })
    }

    /// Parse CSV text, extract samples and calculate.
    ///
    /// Every row after the header is a candidate sample; a units row that is
    /// still present fails numeric conversion and is counted as skipped.
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::Parse` for untokenizable text,
    /// `MetabolicError::MissingColumn` when Time, VO2, VCO2 or RER is absent,
    /// and `MetabolicError::InsufficientData` when no row survives numeric
    /// filtering
    pub fn calculate_from_csv(
        csv_text: &str,
        anthropometrics: Option<&ClientAnthropometrics>,
    ) -> PipelineResult<CsvCalculation> {
        let rows = tabular::parse(csv_text)?;
        let extraction = SampleExtraction::from_rows(&rows)?;
        if extraction.samples.is_empty() {
            return Err(MetabolicError::insufficient_data(format!(
                "no valid data rows remain after numeric filtering ({} skipped)",
                extraction.skipped_rows
            )));
        }

        let result = Self::calculate(
            &extraction.vo2_series(),
            &extraction.vco2_series(),
            &extraction.rer_series(),
            anthropometrics,
        )?;

        info!(
            samples = extraction.samples.len(),
            skipped_rows = extraction.skipped_rows,
            rmr_kcal_day = result.rmr_kcal_day,
            predicted = result.prediction.is_some(),
            "Calculated resting metabolic rate"
        );

        Ok(CsvCalculation { result, extraction })
    }
}

fn channel_statistics(channel: &str, samples: &[f64]) -> PipelineResult<SeriesStatistics> {
    if samples.is_empty() {
        return Err(MetabolicError::insufficient_data(format!(
            "no valid {channel} samples"
        )));
    }
    SeriesStatistics::from_samples(samples)
}
