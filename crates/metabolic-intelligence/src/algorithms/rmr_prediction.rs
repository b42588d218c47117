// ABOUTME: Predictive resting metabolic rate equations from client anthropometrics
// ABOUTME: Averages three models and compares the measured RMR against that prediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::suboptimal_flops)] // Safe: unfused arithmetic reproduces existing report values

use metabolic_core::constants::predictive::{
    CUNNINGHAM_BASE, CUNNINGHAM_LBM_COEF, HB_FEMALE_AGE_COEF, HB_FEMALE_BASE,
    HB_FEMALE_HEIGHT_COEF, HB_FEMALE_WEIGHT_COEF, HB_MALE_AGE_COEF, HB_MALE_BASE,
    HB_MALE_HEIGHT_COEF, HB_MALE_WEIGHT_COEF, MSJ_AGE_COEF, MSJ_FEMALE_CONSTANT,
    MSJ_HEIGHT_COEF, MSJ_MALE_CONSTANT, MSJ_WEIGHT_COEF,
};
use metabolic_core::errors::PipelineResult;
use metabolic_core::models::{ClientAnthropometrics, Gender, ResolvedAnthropometrics};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Predictive RMR equation
///
/// - `Cunningham`: lean-mass based, suited to trained clients
/// - `MifflinStJeor`: weight, height and age; the usual clinical default
/// - `HarrisBenedict`: revised 1984 coefficients
///
/// # Scientific References
///
/// - Cunningham, J.J. (1980). *Am J Clin Nutr*, 33(11), 2372-2374.
/// - Mifflin, M.D. et al. (1990). *Am J Clin Nutr*, 51(2), 241-247.
/// - Roza, A.M. & Shizgal, H.M. (1984). *Am J Clin Nutr*, 40(1), 168-182.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PredictiveEquation {
    /// 500 + 22 x LBM
    Cunningham,
    /// 10 x W + 6.25 x H - 5 x age + (5 | -161)
    MifflinStJeor,
    /// Revised Harris-Benedict, gender-specific coefficients
    HarrisBenedict,
}

impl PredictiveEquation {
    /// Every equation, in report order
    pub const ALL: [Self; 3] = [Self::Cunningham, Self::MifflinStJeor, Self::HarrisBenedict];

    /// Estimate RMR (kcal/day) from resolved anthropometrics
    #[must_use]
    pub fn estimate(&self, client: &ResolvedAnthropometrics) -> f64 {
        let age = f64::from(client.age);
        let weight = client.weight_kg;
        let height = client.height_cm;

        match (self, client.gender) {
            (Self::Cunningham, _) => CUNNINGHAM_BASE + CUNNINGHAM_LBM_COEF * client.lean_body_mass_kg,
            (Self::MifflinStJeor, gender) => {
                let constant = match gender {
                    Gender::Male => MSJ_MALE_CONSTANT,
                    Gender::Female => MSJ_FEMALE_CONSTANT,
                };
                MSJ_WEIGHT_COEF * weight + MSJ_HEIGHT_COEF * height - MSJ_AGE_COEF * age + constant
            }
            (Self::HarrisBenedict, Gender::Male) => {
                HB_MALE_BASE + HB_MALE_WEIGHT_COEF * weight + HB_MALE_HEIGHT_COEF * height
                    - HB_MALE_AGE_COEF * age
            }
            (Self::HarrisBenedict, Gender::Female) => {
                HB_FEMALE_BASE + HB_FEMALE_WEIGHT_COEF * weight + HB_FEMALE_HEIGHT_COEF * height
                    - HB_FEMALE_AGE_COEF * age
            }
        }
    }

    /// Get algorithm name for logging and reports
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cunningham => "cunningham",
            Self::MifflinStJeor => "mifflin_st_jeor",
            Self::HarrisBenedict => "harris_benedict",
        }
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::Cunningham => "500 + 22 x LBM",
            Self::MifflinStJeor => "10 x W + 6.25 x H - 5 x age + 5 (male) / - 161 (female)",
            Self::HarrisBenedict => {
                "88.362 + 13.397 x W + 4.799 x H - 5.677 x age (male); \
                 447.593 + 9.247 x W + 3.098 x H - 4.330 x age (female)"
            }
        }
    }
}

/// Predicted RMR from all three equations and the measured comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RmrPrediction {
    /// Cunningham estimate (kcal/day)
    pub cunningham: f64,
    /// Mifflin-St Jeor estimate (kcal/day)
    pub mifflin_st_jeor: f64,
    /// Harris-Benedict estimate (kcal/day)
    pub harris_benedict: f64,
    /// Mean of the three estimates (kcal/day)
    pub average: f64,
    /// Measured RMR as a percentage of `average`, 0 when `average` is not positive
    pub percent_of_predicted: f64,
}

impl RmrPrediction {
    /// Run every equation and compare against the measured RMR
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::InvalidInput` if the anthropometrics fail
    /// validation
    pub fn compare(
        measured_rmr_kcal_day: f64,
        anthropometrics: &ClientAnthropometrics,
    ) -> PipelineResult<Self> {
        let client = anthropometrics.resolve()?;
        let cunningham = PredictiveEquation::Cunningham.estimate(&client);
        let mifflin_st_jeor = PredictiveEquation::MifflinStJeor.estimate(&client);
        let harris_benedict = PredictiveEquation::HarrisBenedict.estimate(&client);
        let average = (cunningham + mifflin_st_jeor + harris_benedict) / 3.0;

        let percent_of_predicted = if average > 0.0 {
            measured_rmr_kcal_day / average * 100.0
        } else {
            0.0
        };

        debug!(
            cunningham,
            mifflin_st_jeor,
            harris_benedict,
            average,
            percent_of_predicted,
            "Computed predicted RMR"
        );

        Ok(Self {
            cunningham,
            mifflin_st_jeor,
            harris_benedict,
            average,
            percent_of_predicted,
        })
    }

    /// Estimate for one equation
    #[must_use]
    pub const fn estimate_for(&self, equation: PredictiveEquation) -> f64 {
        match equation {
            PredictiveEquation::Cunningham => self.cunningham,
            PredictiveEquation::MifflinStJeor => self.mifflin_st_jeor,
            PredictiveEquation::HarrisBenedict => self.harris_benedict,
        }
    }

    /// Each equation paired with its estimate, in report order
    pub fn estimates(&self) -> impl Iterator<Item = (PredictiveEquation, f64)> + '_ {
        PredictiveEquation::ALL
            .into_iter()
            .map(|equation| (equation, self.estimate_for(equation)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn male_client() -> ClientAnthropometrics {
        ClientAnthropometrics::new(30, Gender::Male, 80.0).with_height_cm(180.0)
    }

    #[test]
    fn test_male_equations() {
        let client = male_client().resolve().unwrap();
        // 800 + 1125 - 150 + 5
        assert!((PredictiveEquation::MifflinStJeor.estimate(&client) - 1780.0).abs() < EPS);
        // 88.362 + 1071.76 + 863.82 - 170.31
        assert!((PredictiveEquation::HarrisBenedict.estimate(&client) - 1853.632).abs() < EPS);
        // 500 + 22 x 68 (85% of 80 kg)
        assert!((PredictiveEquation::Cunningham.estimate(&client) - 1996.0).abs() < EPS);
    }

    #[test]
    fn test_female_equations_use_defaults() {
        let client = ClientAnthropometrics::new(40, Gender::Female, 60.0)
            .resolve()
            .unwrap();
        // 600 + 1000 - 200 - 161
        assert!((PredictiveEquation::MifflinStJeor.estimate(&client) - 1239.0).abs() < EPS);
        // 447.593 + 554.82 + 495.68 - 173.2
        assert!((PredictiveEquation::HarrisBenedict.estimate(&client) - 1324.893).abs() < EPS);
        // 500 + 22 x 45
        assert!((PredictiveEquation::Cunningham.estimate(&client) - 1490.0).abs() < EPS);
    }

    #[test]
    fn test_compare_averages_models() {
        let prediction = RmrPrediction::compare(1876.544, &male_client()).unwrap();
        let average = (1996.0 + 1780.0 + 1853.632) / 3.0;
        assert!((prediction.average - average).abs() < EPS);
        assert!((prediction.percent_of_predicted - 1876.544 / average * 100.0).abs() < EPS);
        assert!(
            (prediction.estimate_for(PredictiveEquation::Cunningham) - prediction.cunningham).abs()
                < EPS
        );
    }

    #[test]
    fn test_compare_rejects_invalid_client() {
        let client = ClientAnthropometrics::new(30, Gender::Male, 0.0);
        assert!(RmrPrediction::compare(1800.0, &client).is_err());
    }

    #[test]
    fn test_estimates_follow_report_order() {
        let prediction = RmrPrediction::compare(1800.0, &male_client()).unwrap();
        let estimates: Vec<_> = prediction
            .estimates()
            .map(|(equation, rmr)| (equation.name(), rmr))
            .collect();

        assert_eq!(estimates.len(), 3);
        assert_eq!(estimates[0], ("cunningham", 1996.0));
        assert_eq!(estimates[1], ("mifflin_st_jeor", 1780.0));
        assert_eq!(estimates[2].0, "harris_benedict");
        assert!((estimates[2].1 - 1853.632).abs() < EPS);
    }

    #[test]
    fn test_name_matches_serde_tag() {
        for equation in PredictiveEquation::ALL {
            let tag = serde_json::to_value(equation).unwrap();
            assert_eq!(tag, equation.name());
            assert!(!equation.formula().is_empty());
        }
    }
}
