// ABOUTME: Algorithm selection for predictive resting metabolic rate estimation
// ABOUTME: Enum-based dispatch over the Cunningham, Mifflin-St Jeor and Harris-Benedict equations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Predictive equations are enums, not strings, so a report can name the
//! model that produced each number.
//!
//! ```rust,no_run
//! use metabolic_core::models::{ClientAnthropometrics, Gender};
//! use metabolic_intelligence::algorithms::PredictiveEquation;
//!
//! let client = ClientAnthropometrics::new(30, Gender::Male, 80.0).resolve()?;
//! let mifflin = PredictiveEquation::MifflinStJeor.estimate(&client);
//! # Ok::<(), metabolic_core::errors::MetabolicError>(())
//! ```

/// Cunningham, Mifflin-St Jeor and Harris-Benedict RMR equations
pub mod rmr_prediction;

pub use rmr_prediction::{PredictiveEquation, RmrPrediction};
