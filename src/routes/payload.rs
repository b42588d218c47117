// ABOUTME: Shared request payload helpers for the lab client's loosely typed JSON
// ABOUTME: Accepts numbers or numeric strings and maps JSON rejections to the error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult, ErrorCode};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use http::StatusCode;
use metabolic_core::models::{ClientAnthropometrics, Gender};
use serde::{Deserialize, Serialize};

/// A form value sent either as a JSON number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    /// JSON number
    Number(f64),
    /// JSON string, parsed on use
    Text(String),
}

impl NumberOrString {
    /// Numeric value; blank text is treated as absent
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` when the text is not a number
    pub fn to_f64(&self, field: &str) -> AppResult<Option<f64>> {
        match self {
            Self::Number(value) => Ok(Some(*value)),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => text.trim().parse().map(Some).map_err(|_| {
                AppError::invalid_input(format!("{field} must be numeric, got '{text}'"))
            }),
        }
    }
}

/// Parse an optional form value
///
/// # Errors
///
/// Returns `ErrorCode::InvalidInput` when a supplied value is not numeric
pub fn optional_number(value: Option<&NumberOrString>, field: &str) -> AppResult<Option<f64>> {
    value.map_or(Ok(None), |v| v.to_f64(field))
}

/// Unwrap a JSON body, rendering extractor failures in the error envelope
///
/// # Errors
///
/// Returns `ErrorCode::PayloadTooLarge` for oversized bodies and
/// `ErrorCode::InvalidFormat` for anything else the extractor rejected
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        let code = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ErrorCode::PayloadTooLarge
        } else {
            ErrorCode::InvalidFormat
        };
        AppError::new(code, rejection.body_text())
    })
}

/// Client fields sent with an RMR calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDataPayload {
    /// Age in years
    #[serde(default)]
    pub age: Option<NumberOrString>,
    /// `MALE` or `FEMALE`
    #[serde(default)]
    pub gender: Option<String>,
    /// Body weight (kg)
    #[serde(default)]
    pub weight_kg: Option<NumberOrString>,
    /// Height (cm)
    #[serde(default)]
    pub height_cm: Option<NumberOrString>,
    /// Lean body mass (kg)
    #[serde(default)]
    pub lean_body_mass: Option<NumberOrString>,
}

impl ClientDataPayload {
    /// Anthropometrics for the predictive equations.
    ///
    /// `None` unless age, gender and weight are all present and non-zero.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` for non-numeric values, an unknown
    /// gender, or values that fail anthropometric validation
    pub fn anthropometrics(&self) -> AppResult<Option<ClientAnthropometrics>> {
        let age = optional_number(self.age.as_ref(), "age")?;
        let weight_kg = optional_number(self.weight_kg.as_ref(), "weight_kg")?;
        let gender = self
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty());

        let (Some(age), Some(gender), Some(weight_kg)) = (age, gender, weight_kg) else {
            return Ok(None);
        };
        if age == 0.0 || weight_kg == 0.0 {
            return Ok(None);
        }
        if !age.is_finite() || age < 1.0 {
            return Err(AppError::invalid_input(format!(
                "age must be at least 1 year, got {age}"
            )));
        }

        let gender: Gender = gender.parse()?;
        let mut client = ClientAnthropometrics::new(age.trunc() as u32, gender, weight_kg);
        if let Some(height_cm) = optional_number(self.height_cm.as_ref(), "height_cm")? {
            client = client.with_height_cm(height_cm);
        }
        if let Some(lbm) = optional_number(self.lean_body_mass.as_ref(), "lean_body_mass")? {
            client = client.with_lean_body_mass_kg(lbm);
        }
        client.resolve()?;
        Ok(Some(client))
    }
}
