// ABOUTME: HTTP handler for the body composition summary
// ABOUTME: Accepts metric or imperial measurements and reports BMI, mass split and body water
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::metabolic::round_to;
use super::payload::{json_body, optional_number, NumberOrString};
use crate::constants::api_paths;
use crate::errors::{AppError, AppResult};
use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use metabolic_intelligence::body_composition::{inches_to_cm, lbs_to_kg, BodyCompositionSummary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body of `POST /api/body-composition`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BodyCompositionRequest {
    /// Weight (kg); takes precedence over `weight_lbs`
    #[serde(default)]
    pub weight_kg: Option<NumberOrString>,
    /// Weight (lbs)
    #[serde(default)]
    pub weight_lbs: Option<NumberOrString>,
    /// Height (cm); takes precedence over `height_in`
    #[serde(default)]
    pub height_cm: Option<NumberOrString>,
    /// Height (inches)
    #[serde(default)]
    pub height_in: Option<NumberOrString>,
    /// Body fat from a DEXA or similar scan (%)
    #[serde(default)]
    pub body_fat_scan: Option<NumberOrString>,
    /// Body fat from ultrasound (%)
    #[serde(default)]
    pub body_fat_ultrasound: Option<NumberOrString>,
    /// Body fat from a lab method (%)
    #[serde(default)]
    pub body_fat_lab: Option<NumberOrString>,
    /// Total body water, device 1 (L)
    #[serde(default)]
    pub water_liters1: Option<NumberOrString>,
    /// Total body water, device 2 (L)
    #[serde(default)]
    pub water_liters2: Option<NumberOrString>,
    /// Total body water, device 3 (L)
    #[serde(default)]
    pub water_liters3: Option<NumberOrString>,
}

/// Body composition summary, rounded to one decimal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyCompositionResponse {
    /// Always `success`
    pub status: String,
    /// Weight used (kg)
    pub weight_kg: f64,
    /// Height used (cm)
    pub height_cm: f64,
    /// Body mass index
    pub bmi: f64,
    /// BMI classification label
    pub bmi_category: String,
    /// Mean of the positive body-fat estimates
    pub body_fat_percent: Option<f64>,
    /// Fat mass (kg)
    pub fat_mass_kg: Option<f64>,
    /// Fat mass (lbs)
    pub fat_mass_lbs: Option<f64>,
    /// Fat-free mass (kg)
    pub ffm_kg: Option<f64>,
    /// Fat-free mass (lbs)
    pub ffm_lbs: Option<f64>,
    /// Mean of the positive body water readings (L)
    pub water_liters_avg: Option<f64>,
}

impl BodyCompositionResponse {
    fn new(weight_kg: f64, height_cm: f64, summary: &BodyCompositionSummary) -> Self {
        let split = summary.mass_partition;
        Self {
            status: "success".to_owned(),
            weight_kg: round_to(weight_kg, 1),
            height_cm: round_to(height_cm, 1),
            bmi: round_to(summary.bmi, 1),
            bmi_category: summary.bmi_category.label().to_owned(),
            body_fat_percent: summary.average_body_fat_percent.map(|v| round_to(v, 1)),
            fat_mass_kg: split.map(|s| round_to(s.fat_mass_kg, 1)),
            fat_mass_lbs: split.map(|s| round_to(s.fat_mass_lbs, 1)),
            ffm_kg: split.map(|s| round_to(s.fat_free_mass_kg, 1)),
            ffm_lbs: split.map(|s| round_to(s.fat_free_mass_lbs, 1)),
            water_liters_avg: summary.average_total_body_water_l.map(|v| round_to(v, 1)),
        }
    }
}

/// Body composition routes
pub struct BodyCompositionRoutes;

impl BodyCompositionRoutes {
    /// Create the body composition route
    pub fn routes() -> Router {
        Router::new().route(api_paths::BODY_COMPOSITION, post(Self::handle_body_composition))
    }

    async fn handle_body_composition(
        payload: Result<Json<BodyCompositionRequest>, JsonRejection>,
    ) -> AppResult<Json<BodyCompositionResponse>> {
        let request = json_body(payload)?;

        let weight_kg = metric_or_imperial(
            optional_number(request.weight_kg.as_ref(), "weight_kg")?,
            optional_number(request.weight_lbs.as_ref(), "weight_lbs")?,
            lbs_to_kg,
        )
        .ok_or_else(|| AppError::missing_field("weight_kg"))?;
        let height_cm = metric_or_imperial(
            optional_number(request.height_cm.as_ref(), "height_cm")?,
            optional_number(request.height_in.as_ref(), "height_in")?,
            inches_to_cm,
        )
        .ok_or_else(|| AppError::missing_field("height_cm"))?;

        let body_fat = collect_numbers(&[
            (request.body_fat_scan.as_ref(), "body_fat_scan"),
            (request.body_fat_ultrasound.as_ref(), "body_fat_ultrasound"),
            (request.body_fat_lab.as_ref(), "body_fat_lab"),
        ])?;
        let water = collect_numbers(&[
            (request.water_liters1.as_ref(), "water_liters1"),
            (request.water_liters2.as_ref(), "water_liters2"),
            (request.water_liters3.as_ref(), "water_liters3"),
        ])?;

        let summary = BodyCompositionSummary::calculate(weight_kg, height_cm, &body_fat, &water)?;
        debug!(
            bmi = summary.bmi,
            category = %summary.bmi_category,
            "Body composition calculated"
        );

        Ok(Json(BodyCompositionResponse::new(weight_kg, height_cm, &summary)))
    }
}

fn metric_or_imperial(
    metric: Option<f64>,
    imperial: Option<f64>,
    convert: fn(f64) -> f64,
) -> Option<f64> {
    metric
        .filter(|v| *v > 0.0)
        .or_else(|| imperial.filter(|v| *v > 0.0).map(convert))
}

fn collect_numbers(fields: &[(Option<&NumberOrString>, &str)]) -> AppResult<Vec<f64>> {
    let mut values = Vec::with_capacity(fields.len());
    for (value, name) in fields {
        if let Some(number) = optional_number(*value, name)? {
            values.push(number);
        }
    }
    Ok(values)
}
