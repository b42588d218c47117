// ABOUTME: Physiological constants for indirect calorimetry and predictive RMR equations
// ABOUTME: Weir coefficients, substrate factors, confidence z-score, and unit conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants used by the metabolic calculator.
//!
//! Values match the coefficients used by existing assessment reports and must
//! not be altered without a deliberate compatibility break.

/// Weir equation and substrate oxidation coefficients
///
/// References:
/// - Weir, J.B. (1949). New methods for calculating metabolic rate with special
///   reference to protein metabolism. *J Physiol*, 109(1-2), 1-9.
/// - Frayn, K.N. (1983). Calculation of substrate oxidation rates in vivo from
///   gaseous exchange. *J Appl Physiol*, 55(2), 628-634.
pub mod calorimetry {
    /// kcal per litre of O2 consumed
    pub const WEIR_VO2_COEF: f64 = 3.941;
    /// kcal per litre of CO2 produced
    pub const WEIR_VCO2_COEF: f64 = 1.106;
    /// ml/min to l/day (1440 min / 1000 ml)
    pub const DAILY_SCALE: f64 = 1.44;
    /// Fat oxidation per unit of (VO2 - VCO2)
    pub const FAT_OXIDATION_COEF: f64 = 1.67;
    /// Carbohydrate oxidation VCO2 weight
    pub const CARB_VCO2_COEF: f64 = 4.55;
    /// Carbohydrate oxidation VO2 weight
    pub const CARB_VO2_COEF: f64 = 3.21;
}

/// Descriptive statistics parameters
pub mod statistics {
    /// Two-sided 95% z-score (normal approximation)
    pub const Z_95: f64 = 1.96;
    /// Histogram bins used for the approximate mode
    pub const MODE_HISTOGRAM_BINS: usize = 10;
}

/// Predictive resting metabolic rate equation coefficients
///
/// References:
/// - Cunningham, J.J. (1980). A reanalysis of the factors influencing basal
///   metabolic rate in normal adults. *Am J Clin Nutr*, 33(11), 2372-2374.
/// - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
///   expenditure in healthy individuals. *Am J Clin Nutr*, 51(2), 241-247.
/// - Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation
///   reevaluated. *Am J Clin Nutr*, 40(1), 168-182.
pub mod predictive {
    /// Cunningham intercept
    pub const CUNNINGHAM_BASE: f64 = 500.0;
    /// Cunningham kcal per kg lean body mass
    pub const CUNNINGHAM_LBM_COEF: f64 = 22.0;

    /// Mifflin-St Jeor weight coefficient
    pub const MSJ_WEIGHT_COEF: f64 = 10.0;
    /// Mifflin-St Jeor height coefficient
    pub const MSJ_HEIGHT_COEF: f64 = 6.25;
    /// Mifflin-St Jeor age coefficient
    pub const MSJ_AGE_COEF: f64 = 5.0;
    /// Mifflin-St Jeor male constant
    pub const MSJ_MALE_CONSTANT: f64 = 5.0;
    /// Mifflin-St Jeor female constant
    pub const MSJ_FEMALE_CONSTANT: f64 = -161.0;

    /// Revised Harris-Benedict male intercept
    pub const HB_MALE_BASE: f64 = 88.362;
    /// Revised Harris-Benedict male weight coefficient
    pub const HB_MALE_WEIGHT_COEF: f64 = 13.397;
    /// Revised Harris-Benedict male height coefficient
    pub const HB_MALE_HEIGHT_COEF: f64 = 4.799;
    /// Revised Harris-Benedict male age coefficient
    pub const HB_MALE_AGE_COEF: f64 = 5.677;
    /// Revised Harris-Benedict female intercept
    pub const HB_FEMALE_BASE: f64 = 447.593;
    /// Revised Harris-Benedict female weight coefficient
    pub const HB_FEMALE_WEIGHT_COEF: f64 = 9.247;
    /// Revised Harris-Benedict female height coefficient
    pub const HB_FEMALE_HEIGHT_COEF: f64 = 3.098;
    /// Revised Harris-Benedict female age coefficient
    pub const HB_FEMALE_AGE_COEF: f64 = 4.330;
}

/// Anthropometric defaults applied when optional client fields are absent
pub mod anthropometric_defaults {
    /// Default male height (cm)
    pub const MALE_HEIGHT_CM: f64 = 170.0;
    /// Default female height (cm)
    pub const FEMALE_HEIGHT_CM: f64 = 160.0;
    /// Estimated male lean body mass fraction of weight
    pub const MALE_LBM_FRACTION: f64 = 0.85;
    /// Estimated female lean body mass fraction of weight
    pub const FEMALE_LBM_FRACTION: f64 = 0.75;
}

/// Unit conversion factors
pub mod units {
    /// Pounds per kilogram
    pub const LBS_PER_KG: f64 = 2.20462;
    /// Kilograms per pound
    pub const KG_PER_LB: f64 = 0.453_592;
    /// Centimetres per inch
    pub const CM_PER_INCH: f64 = 2.54;
}

/// BMI category upper bounds (kg/m²), WHO classification
pub mod bmi {
    /// Below this value: underweight
    pub const UNDERWEIGHT_MAX: f64 = 18.5;
    /// Below this value: normal weight
    pub const NORMAL_MAX: f64 = 25.0;
    /// Below this value: overweight
    pub const OVERWEIGHT_MAX: f64 = 30.0;
    /// Below this value: obesity class I
    pub const OBESITY_I_MAX: f64 = 35.0;
    /// Below this value: obesity class II
    pub const OBESITY_II_MAX: f64 = 40.0;
}
