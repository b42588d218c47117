// ABOUTME: HTTP handlers for the CSV cleaning steps and the RMR report
// ABOUTME: Thin adapter that feeds request text to the calculation core and rounds the output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metabolic assessment routes
//!
//! `POST /api/process-csv` runs one pipeline step per request so the lab
//! client can show the cleaned table between steps:
//!
//! - step 1 strips the units row
//! - step 2 trims the warm-up minutes
//! - step 3 calculates the RMR report
//!
//! `POST /api/calculate-rmr` runs the calculation directly. Values are kept
//! unrounded in the core and rounded here, at the edge.

use super::payload::{json_body, optional_number, ClientDataPayload, NumberOrString};
use crate::config::ServerConfig;
use crate::constants::api_paths;
use crate::errors::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use metabolic_intelligence::{
    filters, CsvCalculation, MetabolicCalculator, RmrPrediction, SeriesStatistics,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

const STATUS_SUCCESS: &str = "success";

/// Options accepted by the step-2 trim
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOptions {
    /// Warm-up minutes to drop
    #[serde(default)]
    pub minutes_to_remove: Option<NumberOrString>,
}

/// Body of `POST /api/process-csv`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCsvRequest {
    /// Pipeline step, 1 when omitted
    #[serde(default = "default_step")]
    pub step: i64,
    /// Raw or partially cleaned CSV text
    #[serde(default)]
    pub csv_data: Option<String>,
    /// Step options
    #[serde(default)]
    pub options: ProcessOptions,
    /// Client fields for predicted RMR
    #[serde(default)]
    pub client_data: ClientDataPayload,
}

const fn default_step() -> i64 {
    1
}

/// Body of `POST /api/calculate-rmr`
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRmrRequest {
    /// CSV text
    #[serde(default)]
    pub csv_data: Option<String>,
    /// Client fields for predicted RMR
    #[serde(default)]
    pub client_data: ClientDataPayload,
}

/// Result of a cleaning step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    /// Always `success`
    pub status: String,
    /// Step that ran
    pub step: i64,
    /// CSV text after the step
    pub processed_data: String,
    /// Human-readable outcome
    pub message: String,
}

/// Per-channel statistics as reported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Histogram mode
    pub mode: f64,
    /// Population standard deviation
    pub stdev: f64,
    /// Coefficient of variation (%)
    pub cv: f64,
    /// Sample count
    pub sample_size: usize,
    /// Half-width of the 95% confidence interval
    pub ci_95: f64,
    /// Lower 95% limit
    pub lower_bound_95_ci: f64,
    /// Upper 95% limit
    pub upper_bound_95_ci: f64,
}

impl ChannelStats {
    fn rounded(stats: &SeriesStatistics, decimals: i32) -> Self {
        Self {
            mean: round_to(stats.mean, decimals),
            median: round_to(stats.median, decimals),
            mode: round_to(stats.mode, decimals),
            stdev: round_to(stats.stdev, decimals),
            cv: round_to(stats.coefficient_of_variation, 2),
            sample_size: stats.sample_size,
            ci_95: round_to(stats.ci_95_halfwidth, decimals),
            lower_bound_95_ci: round_to(stats.ci_lower, decimals),
            upper_bound_95_ci: round_to(stats.ci_upper, decimals),
        }
    }
}

/// RMR range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmrRange {
    /// Lower RMR bound (kcal/day)
    pub lower_bound_95_ci_kcal_day: f64,
    /// Upper RMR bound (kcal/day)
    pub upper_bound_95_ci_kcal_day: f64,
}

/// Substrate oxidation ranges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstrateRange {
    /// Lower carbohydrate bound (g/day)
    pub lower_bound_95_ci_glucose_g_day: f64,
    /// Upper carbohydrate bound (g/day)
    pub upper_bound_95_ci_glucose_g_day: f64,
    /// Lower fat bound (g/day)
    pub lower_bound_95_ci_fat_g_day: f64,
    /// Upper fat bound (g/day)
    pub upper_bound_95_ci_fat_g_day: f64,
}

/// Statistics block of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStats {
    /// VO2 statistics (ml/min)
    pub vo2: ChannelStats,
    /// VCO2 statistics (ml/min)
    pub vco2: ChannelStats,
    /// RER statistics
    pub rer: ChannelStats,
    /// RMR range
    pub rmr: RmrRange,
    /// Substrate ranges
    pub substrate: SubstrateRange,
}

/// Accepted samples for charting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawData {
    /// Time labels, one per accepted sample
    pub time_points: Vec<String>,
    /// VO2 (ml/min)
    pub vo2_values: Vec<f64>,
    /// VCO2 (ml/min)
    pub vco2_values: Vec<f64>,
    /// RER
    pub rer_values: Vec<f64>,
    /// VO2 per kg (ml/kg/min), null where the export has none
    pub vo2_kg_values: Vec<Option<f64>>,
    /// VCO2 per kg (ml/kg/min), null where the export has none
    pub vco2_kg_values: Vec<Option<f64>>,
}

/// One predictive equation's estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationEstimate {
    /// Equation identifier
    pub name: String,
    /// Formula shown next to the estimate
    pub formula: String,
    /// Estimate (kcal/day)
    pub rmr_kcal_day: f64,
}

/// RMR report returned by step 3 and `calculate-rmr`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmrReport {
    /// Always `success`
    pub status: String,
    /// Measured RMR (kcal/day)
    pub rmr_kcal_day: f64,
    /// Mean VO2 (ml/min)
    pub vo2_avg: f64,
    /// Mean VCO2 (ml/min)
    pub vco2_avg: f64,
    /// Mean RER
    pub rer_avg: f64,
    /// Average predicted RMR, 0 without client data
    pub predicted_rmr: f64,
    /// Measured as a percentage of predicted, 0 without client data
    pub rmr_percent_predicted: f64,
    /// Fat oxidation (g/day)
    pub fat_oxidation: f64,
    /// Carbohydrate oxidation (g/day)
    pub carb_oxidation: f64,
    /// Cunningham estimate, 0 without client data
    pub cunningham_rmr: f64,
    /// Mifflin-St Jeor estimate, 0 without client data
    pub mifflin_rmr: f64,
    /// Harris-Benedict estimate, 0 without client data
    pub harris_benedict_rmr: f64,
    /// Every equation with its formula, empty without client data
    pub predictive_equations: Vec<EquationEstimate>,
    /// Rows excluded for unparseable values
    pub skipped_rows: usize,
    /// Channel statistics and ranges
    pub stats: ReportStats,
    /// Accepted samples
    pub raw_data: RawData,
}

impl From<&CsvCalculation> for RmrReport {
    fn from(calculation: &CsvCalculation) -> Self {
        let result = &calculation.result;
        let extraction = &calculation.extraction;
        let prediction = result.prediction;

        Self {
            status: STATUS_SUCCESS.to_owned(),
            rmr_kcal_day: round_to(result.rmr_kcal_day, 2),
            vo2_avg: round_to(result.vo2.mean, 2),
            vco2_avg: round_to(result.vco2.mean, 2),
            rer_avg: round_to(result.rer.mean, 3),
            predicted_rmr: round_to(result.predicted_rmr_kcal_day(), 2),
            rmr_percent_predicted: round_to(result.rmr_percent_predicted(), 2),
            fat_oxidation: round_to(result.fat_oxidation_g_day, 2),
            carb_oxidation: round_to(result.carb_oxidation_g_day, 2),
            cunningham_rmr: round_to(prediction.map_or(0.0, |p| p.cunningham), 2),
            mifflin_rmr: round_to(prediction.map_or(0.0, |p| p.mifflin_st_jeor), 2),
            harris_benedict_rmr: round_to(prediction.map_or(0.0, |p| p.harris_benedict), 2),
            predictive_equations: prediction
                .iter()
                .flat_map(RmrPrediction::estimates)
                .map(|(equation, rmr)| EquationEstimate {
                    name: equation.name().to_owned(),
                    formula: equation.formula().to_owned(),
                    rmr_kcal_day: round_to(rmr, 2),
                })
                .collect(),
            skipped_rows: extraction.skipped_rows,
            stats: ReportStats {
                vo2: ChannelStats::rounded(&result.vo2, 2),
                vco2: ChannelStats::rounded(&result.vco2, 2),
                rer: ChannelStats::rounded(&result.rer, 3),
                rmr: RmrRange {
                    lower_bound_95_ci_kcal_day: round_to(result.rmr_bounds.lower, 2),
                    upper_bound_95_ci_kcal_day: round_to(result.rmr_bounds.upper, 2),
                },
                substrate: SubstrateRange {
                    lower_bound_95_ci_glucose_g_day: round_to(
                        result.carb_oxidation_bounds.lower,
                        2,
                    ),
                    upper_bound_95_ci_glucose_g_day: round_to(
                        result.carb_oxidation_bounds.upper,
                        2,
                    ),
                    lower_bound_95_ci_fat_g_day: round_to(result.fat_oxidation_bounds.lower, 2),
                    upper_bound_95_ci_fat_g_day: round_to(result.fat_oxidation_bounds.upper, 2),
                },
            },
            raw_data: RawData {
                time_points: extraction.time_labels(),
                vo2_values: extraction.vo2_series(),
                vco2_values: extraction.vco2_series(),
                rer_values: extraction.rer_series(),
                vo2_kg_values: extraction.vo2_per_kg_series(),
                vco2_kg_values: extraction.vco2_per_kg_series(),
            },
        }
    }
}

/// Round half away from zero to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

/// Metabolic assessment routes
pub struct MetabolicRoutes;

impl MetabolicRoutes {
    /// Create the CSV processing and RMR routes
    pub fn routes(config: Arc<ServerConfig>) -> Router {
        Router::new()
            .route(api_paths::PROCESS_CSV, post(Self::handle_process_csv))
            .route(api_paths::CALCULATE_RMR, post(Self::handle_calculate_rmr))
            .with_state(config)
    }

    /// Handle one step of the cleaning pipeline
    async fn handle_process_csv(
        State(config): State<Arc<ServerConfig>>,
        payload: Result<Json<ProcessCsvRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        let request = json_body(payload)?;
        let csv_text = required_csv(request.csv_data.as_deref(), "csvData")?;
        debug!(step = request.step, bytes = csv_text.len(), "Processing CSV step");

        match request.step {
            1 => {
                let processed_data = filters::strip_units_row_text(csv_text)?;
                Ok(Json(step_response(1, processed_data, "Units row removed successfully"))
                    .into_response())
            }
            2 => {
                let minutes = optional_number(
                    request.options.minutes_to_remove.as_ref(),
                    "minutesToRemove",
                )?
                .unwrap_or(config.pipeline.default_trim_minutes);
                let processed_data = filters::trim_leading_minutes_text(csv_text, minutes)?;
                Ok(Json(step_response(
                    2,
                    processed_data,
                    &format!("First {minutes} minutes removed successfully"),
                ))
                .into_response())
            }
            3 => {
                let report = calculate_report(csv_text, &request.client_data)?;
                Ok(Json(report).into_response())
            }
            other => {
                debug!(step = other, "Rejected unknown processing step");
                Err(AppError::invalid_input("Invalid processing step"))
            }
        }
    }

    /// Handle a one-shot RMR calculation
    async fn handle_calculate_rmr(
        payload: Result<Json<CalculateRmrRequest>, JsonRejection>,
    ) -> AppResult<Json<RmrReport>> {
        let request = json_body(payload)?;
        let csv_text = required_csv(request.csv_data.as_deref(), "csv_data")?;
        Ok(Json(calculate_report(csv_text, &request.client_data)?))
    }
}

fn required_csv<'a>(csv_data: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    csv_data
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}

fn step_response(step: i64, processed_data: String, message: &str) -> StepResponse {
    StepResponse {
        status: STATUS_SUCCESS.to_owned(),
        step,
        processed_data,
        message: message.to_owned(),
    }
}

fn calculate_report(csv_text: &str, client_data: &ClientDataPayload) -> AppResult<RmrReport> {
    let anthropometrics = client_data.anthropometrics()?;
    let calculation = MetabolicCalculator::calculate_from_csv(csv_text, anthropometrics.as_ref())?;
    let report = RmrReport::from(&calculation);
    info!(
        rmr_kcal_day = report.rmr_kcal_day,
        samples = report.stats.vo2.sample_size,
        skipped_rows = report.skipped_rows,
        "RMR report generated"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert!((round_to(1809.9648, 2) - 1809.96).abs() < 1e-9);
        assert!((round_to(0.8051, 3) - 0.805).abs() < 1e-9);
        assert!((round_to(2.5, 0) - 3.0).abs() < 1e-9);
        assert!((round_to(-2.5, 0) + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_request_defaults() {
        let request: ProcessCsvRequest =
            serde_json::from_value(serde_json::json!({ "csvData": "a,b" })).unwrap();
        assert_eq!(request.step, 1);
        assert!(request.options.minutes_to_remove.is_none());
        assert_eq!(request.client_data, ClientDataPayload::default());
    }

    #[test]
    fn test_required_csv_rejects_blank() {
        assert!(required_csv(Some("  \n"), "csvData").is_err());
        assert!(required_csv(None, "csvData").is_err());
        assert_eq!(required_csv(Some("Time"), "csvData").unwrap(), "Time");
    }
}
