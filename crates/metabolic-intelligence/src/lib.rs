// ABOUTME: Gas-exchange analysis engine for resting metabolic rate assessments
// ABOUTME: CSV cleaning, sample extraction, descriptive statistics, RMR and body composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Metabolic Intelligence
//!
//! Pure, synchronous calculation engine. Raw device CSV flows through
//! [`tabular`] and [`filters`], is turned into typed samples by
//! [`gas_exchange`], summarized by [`statistics`], and combined into a
//! [`calculator::MetabolicResult`]. Nothing here performs I/O or holds shared
//! state, so every function is safe to call from concurrent request handlers.

/// Predictive resting metabolic rate equations
pub mod algorithms;
/// Body mass index, mass partitioning and unit conversions
pub mod body_composition;
/// Weir-equation RMR, substrate oxidation and confidence bounds
pub mod calculator;
/// Units-row stripping and warm-up trimming
pub mod filters;
/// Typed gas-exchange samples and column layout
pub mod gas_exchange;
/// Mean, median, histogram mode, population stdev and 95% CI
pub mod statistics;
/// CSV tokenizing, writing and header lookup
pub mod tabular;

pub use algorithms::{PredictiveEquation, RmrPrediction};
pub use calculator::{CsvCalculation, EstimateBounds, MetabolicCalculator, MetabolicResult};
pub use gas_exchange::{ColumnLayout, GasExchangeSample, SampleExtraction};
pub use statistics::SeriesStatistics;
