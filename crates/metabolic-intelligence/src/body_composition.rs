// ABOUTME: Body composition helpers: BMI classification, fat/fat-free mass and unit conversion
// ABOUTME: Averages body-fat and body-water readings across measurement methods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Body-fat percentages are inputs here; this module never derives them from
//! body density.

use metabolic_core::constants::bmi::{
    NORMAL_MAX, OBESITY_II_MAX, OBESITY_I_MAX, OVERWEIGHT_MAX, UNDERWEIGHT_MAX,
};
use metabolic_core::constants::units::{CM_PER_INCH, KG_PER_LB, LBS_PER_KG};
use metabolic_core::errors::{MetabolicError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pounds to kilograms
#[must_use]
pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * KG_PER_LB
}

/// Kilograms to pounds
#[must_use]
pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

/// Inches to centimetres
#[must_use]
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Centimetres to inches
#[must_use]
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

/// Body mass index (kg/m²)
///
/// # Errors
///
/// Returns `MetabolicError::InvalidInput` if weight or height is not a
/// positive finite number
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> PipelineResult<f64> {
    let weight_kg = positive("weight_kg", weight_kg)?;
    let height_m = positive("height_cm", height_cm)? / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// WHO BMI classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 to below 25
    NormalWeight,
    /// 25 to below 30
    Overweight,
    /// 30 to below 35
    ObesityClassI,
    /// 35 to below 40
    ObesityClassII,
    /// 40 and above
    ObesityClassIII,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_MAX {
            Self::Underweight
        } else if bmi < NORMAL_MAX {
            Self::NormalWeight
        } else if bmi < OVERWEIGHT_MAX {
            Self::Overweight
        } else if bmi < OBESITY_I_MAX {
            Self::ObesityClassI
        } else if bmi < OBESITY_II_MAX {
            Self::ObesityClassII
        } else {
            Self::ObesityClassIII
        }
    }

    /// Label shown on client reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::ObesityClassI => "Obesity Class I",
            Self::ObesityClassII => "Obesity Class II",
            Self::ObesityClassIII => "Obesity Class III",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Split of body weight into fat and fat-free mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassPartition {
    /// Body-fat percentage the split was derived from
    pub body_fat_percent: f64,
    /// Fat mass (kg)
    pub fat_mass_kg: f64,
    /// Fat mass (lbs)
    pub fat_mass_lbs: f64,
    /// Fat-free mass (kg)
    pub fat_free_mass_kg: f64,
    /// Fat-free mass (lbs)
    pub fat_free_mass_lbs: f64,
}

impl MassPartition {
    /// Partition `weight_kg` using a body-fat percentage in `[0, 100)`
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::InvalidInput` for a non-positive weight or an
    /// out-of-range percentage
    pub fn from_body_fat(weight_kg: f64, body_fat_percent: f64) -> PipelineResult<Self> {
        let weight_kg = positive("weight_kg", weight_kg)?;
        if !(0.0..100.0).contains(&body_fat_percent) {
            return Err(MetabolicError::invalid_input(
                "body_fat_percent",
                format!("must be within [0, 100), got {body_fat_percent}"),
            ));
        }

        let fat_mass_kg = weight_kg * (body_fat_percent / 100.0);
        let fat_free_mass_kg = weight_kg - fat_mass_kg;
        Ok(Self {
            body_fat_percent,
            fat_mass_kg,
            fat_mass_lbs: kg_to_lbs(fat_mass_kg),
            fat_free_mass_kg,
            fat_free_mass_lbs: kg_to_lbs(fat_free_mass_kg),
        })
    }
}

/// Mean of the strictly positive body-fat estimates, if any
#[must_use]
pub fn average_body_fat(estimates: &[f64]) -> Option<f64> {
    positive_mean(estimates)
}

/// Mean of the strictly positive total body water readings (litres), if any
#[must_use]
pub fn average_total_body_water(readings_liters: &[f64]) -> Option<f64> {
    positive_mean(readings_liters)
}

/// Everything the body-composition report shows for one client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionSummary {
    /// Body mass index
    pub bmi: f64,
    /// BMI classification
    pub bmi_category: BmiCategory,
    /// Mean of the supplied positive body-fat estimates
    pub average_body_fat_percent: Option<f64>,
    /// Fat / fat-free split at the average body fat
    pub mass_partition: Option<MassPartition>,
    /// Mean of the supplied positive body water readings (litres)
    pub average_total_body_water_l: Option<f64>,
}

impl BodyCompositionSummary {
    /// Build the summary from measurements
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::InvalidInput` for non-positive weight or
    /// height, or when the averaged body fat is 100% or more
    pub fn calculate(
        weight_kg: f64,
        height_cm: f64,
        body_fat_estimates: &[f64],
        water_readings_l: &[f64],
    ) -> PipelineResult<Self> {
        let bmi = calculate_bmi(weight_kg, height_cm)?;
        let average_body_fat_percent = average_body_fat(body_fat_estimates);
        let mass_partition = average_body_fat_percent
            .map(|body_fat| MassPartition::from_body_fat(weight_kg, body_fat))
            .transpose()?;

        Ok(Self {
            bmi,
            bmi_category: BmiCategory::from_bmi(bmi),
            average_body_fat_percent,
            mass_partition,
            average_total_body_water_l: average_total_body_water(water_readings_l),
        })
    }
}

fn positive_mean(values: &[f64]) -> Option<f64> {
    let positives: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if positives.is_empty() {
        None
    } else {
        Some(positives.iter().sum::<f64>() / positives.len() as f64)
    }
}

fn positive(field: &'static str, value: f64) -> PipelineResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MetabolicError::invalid_input(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_unit_conversions() {
        assert!((lbs_to_kg(100.0) - 45.3592).abs() < EPS);
        assert!((kg_to_lbs(10.0) - 22.0462).abs() < EPS);
        assert!((inches_to_cm(10.0) - 25.4).abs() < EPS);
        assert!((cm_to_inches(25.4) - 10.0).abs() < EPS);
    }

    #[test]
    fn test_bmi_and_category() {
        let bmi = calculate_bmi(80.0, 180.0).unwrap();
        assert!((bmi - 80.0 / (1.8 * 1.8)).abs() < EPS);
        assert_eq!(BmiCategory::from_bmi(bmi), BmiCategory::NormalWeight);
        assert!(calculate_bmi(80.0, 0.0).is_err());
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::ObesityClassI);
        assert_eq!(BmiCategory::from_bmi(35.0), BmiCategory::ObesityClassII);
        assert_eq!(BmiCategory::from_bmi(40.0), BmiCategory::ObesityClassIII);
        assert_eq!(BmiCategory::ObesityClassI.to_string(), "Obesity Class I");
    }

    #[test]
    fn test_mass_partition() {
        let split = MassPartition::from_body_fat(80.0, 20.0).unwrap();
        assert!((split.fat_mass_kg - 16.0).abs() < EPS);
        assert!((split.fat_free_mass_kg - 64.0).abs() < EPS);
        assert!((split.fat_mass_lbs - 16.0 * 2.20462).abs() < EPS);
        assert!(MassPartition::from_body_fat(80.0, 100.0).is_err());
        assert!(MassPartition::from_body_fat(80.0, -1.0).is_err());
    }

    #[test]
    fn test_averages_ignore_missing_methods() {
        assert_eq!(average_body_fat(&[18.0, 0.0, 22.0]), Some(20.0));
        assert_eq!(average_body_fat(&[0.0, -3.0]), None);
        assert_eq!(average_total_body_water(&[40.0, 42.0, 0.0]), Some(41.0));
        assert_eq!(average_total_body_water(&[]), None);
    }

    #[test]
    fn test_summary() {
        let summary = BodyCompositionSummary::calculate(80.0, 180.0, &[20.0, 0.0], &[45.0]).unwrap();
        assert_eq!(summary.bmi_category, BmiCategory::NormalWeight);
        assert_eq!(summary.average_body_fat_percent, Some(20.0));
        assert!((summary.mass_partition.unwrap().fat_mass_kg - 16.0).abs() < EPS);
        assert_eq!(summary.average_total_body_water_l, Some(45.0));
    }
}
