// ABOUTME: Client anthropometric inputs for predictive RMR equations
// ABOUTME: Applies gender-based defaults for missing height and lean body mass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::anthropometric_defaults::{
    FEMALE_HEIGHT_CM, FEMALE_LBM_FRACTION, MALE_HEIGHT_CM, MALE_LBM_FRACTION,
};
use crate::errors::{MetabolicError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by the predictive equations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    /// Male coefficients and defaults
    #[serde(alias = "male", alias = "Male", alias = "M")]
    Male,
    /// Female coefficients and defaults
    #[serde(alias = "female", alias = "Female", alias = "F")]
    Female,
}

impl Gender {
    /// Canonical upper-case label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// Default height when the client did not supply one
    #[must_use]
    pub const fn default_height_cm(self) -> f64 {
        match self {
            Self::Male => MALE_HEIGHT_CM,
            Self::Female => FEMALE_HEIGHT_CM,
        }
    }

    /// Fraction of body weight assumed to be lean mass
    #[must_use]
    pub const fn lean_mass_fraction(self) -> f64 {
        match self {
            Self::Male => MALE_LBM_FRACTION,
            Self::Female => FEMALE_LBM_FRACTION,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = MetabolicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MALE" | "M" => Ok(Self::Male),
            "FEMALE" | "F" => Ok(Self::Female),
            other => Err(MetabolicError::invalid_input(
                "gender",
                format!("expected MALE or FEMALE, got '{other}'"),
            )),
        }
    }
}

/// Client measurements supplied alongside a gas-exchange test.
///
/// Height and lean body mass are optional; [`ClientAnthropometrics::resolve`]
/// fills them from gender defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClientAnthropometrics {
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub gender: Gender,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm), defaulted by gender when absent
    pub height_cm: Option<f64>,
    /// Lean body mass (kg), defaulted to a fraction of weight when absent
    pub lean_body_mass_kg: Option<f64>,
}

/// Anthropometrics with every default applied and every value validated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResolvedAnthropometrics {
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub gender: Gender,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Lean body mass (kg)
    pub lean_body_mass_kg: f64,
}

impl ClientAnthropometrics {
    /// Create anthropometrics with only the required fields
    #[must_use]
    pub const fn new(age: u32, gender: Gender, weight_kg: f64) -> Self {
        Self {
            age,
            gender,
            weight_kg,
            height_cm: None,
            lean_body_mass_kg: None,
        }
    }

    /// Set the measured height
    #[must_use]
    pub fn with_height_cm(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    /// Set the measured lean body mass
    #[must_use]
    pub fn with_lean_body_mass_kg(mut self, lean_body_mass_kg: f64) -> Self {
        self.lean_body_mass_kg = Some(lean_body_mass_kg);
        self
    }

    /// Validate inputs and apply gender defaults
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::InvalidInput` if age is zero or any supplied
    /// mass or length is not a positive finite number
    pub fn resolve(&self) -> PipelineResult<ResolvedAnthropometrics> {
        if self.age == 0 {
            return Err(MetabolicError::invalid_input(
                "age",
                "must be greater than zero",
            ));
        }
        let weight_kg = positive("weight_kg", self.weight_kg)?;
        let height_cm = match self.height_cm {
            Some(height) => positive("height_cm", height)?,
            None => self.gender.default_height_cm(),
        };
        let lean_body_mass_kg = match self.lean_body_mass_kg {
            Some(lbm) => positive("lean_body_mass_kg", lbm)?,
            None => weight_kg * self.gender.lean_mass_fraction(),
        };

        Ok(ResolvedAnthropometrics {
            age: self.age,
            gender: self.gender,
            weight_kg,
            height_cm,
            lean_body_mass_kg,
        })
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
