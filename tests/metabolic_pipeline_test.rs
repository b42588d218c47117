// ABOUTME: Integration tests for the CSV cleaning and calculation pipeline
// ABOUTME: Runs strip, trim and calculate in sequence the way the lab client does
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::cart_csv;
use metabolic_core::errors::MetabolicError;
use metabolic_core::models::{ClientAnthropometrics, Gender};
use metabolic_intelligence::filters::{strip_units_row_text, trim_leading_minutes_text};
use metabolic_intelligence::MetabolicCalculator;

#[test]
fn test_pipeline_steps_compose() {
    let raw = cart_csv::steady_state(10);
    let stripped = strip_units_row_text(&raw).unwrap();
    let trimmed = trim_leading_minutes_text(&stripped, 3.0).unwrap();

    let calculation = MetabolicCalculator::calculate_from_csv(&trimmed, None).unwrap();

    // minutes 3..=9, two samples each
    assert_eq!(calculation.extraction.samples.len(), 14);
    assert_eq!(calculation.extraction.skipped_rows, 0);
    assert_eq!(calculation.extraction.time_labels()[0], "3:00");
    assert!((calculation.result.vo2.mean - 250.0).abs() < 1e-9);
    assert!((calculation.result.rer.mean - 0.82).abs() < 0.01);
}

#[test]
fn test_units_row_is_skipped_without_strip_step() {
    let raw = cart_csv::steady_state(4);
    let with_units = MetabolicCalculator::calculate_from_csv(&raw, None).unwrap();
    let stripped = strip_units_row_text(&raw).unwrap();
    let without_units = MetabolicCalculator::calculate_from_csv(&stripped, None).unwrap();

    assert_eq!(with_units.extraction.skipped_rows, 1);
    assert_eq!(without_units.extraction.skipped_rows, 0);
    assert!((with_units.result.rmr_kcal_day - without_units.result.rmr_kcal_day).abs() < 1e-9);
}

#[test]
fn test_confidence_bounds_bracket_estimates() {
    let calculation = MetabolicCalculator::calculate_from_csv(&cart_csv::steady_state(10), None)
        .unwrap()
        .result;

    assert!(calculation.rmr_bounds.lower <= calculation.rmr_kcal_day);
    assert!(calculation.rmr_kcal_day <= calculation.rmr_bounds.upper);
    assert!(calculation.fat_oxidation_bounds.lower <= calculation.fat_oxidation_g_day);
    assert!(calculation.fat_oxidation_g_day <= calculation.fat_oxidation_bounds.upper);
    assert!(calculation.carb_oxidation_bounds.lower <= calculation.carb_oxidation_g_day);
    assert!(calculation.carb_oxidation_g_day <= calculation.carb_oxidation_bounds.upper);
}

#[test]
fn test_prediction_attached_with_client() {
    let client = ClientAnthropometrics::new(30, Gender::Male, 80.0).with_height_cm(180.0);
    let result = MetabolicCalculator::calculate_from_csv(&cart_csv::three_samples(), Some(&client))
        .unwrap()
        .result;

    let prediction = result.prediction.unwrap();
    assert!((prediction.average - 1876.544).abs() < 1e-6);
    assert!((result.rmr_percent_predicted() - 96.452_030_967).abs() < 1e-6);
}

#[test]
fn test_trim_everything_leaves_no_samples() {
    let raw = cart_csv::three_samples();
    let trimmed = trim_leading_minutes_text(&raw, 30.0).unwrap();

    let err = MetabolicCalculator::calculate_from_csv(&trimmed, None).unwrap_err();
    assert!(matches!(err, MetabolicError::InsufficientData { .. }));
}

#[test]
fn test_missing_columns_reported_together() {
    let err = MetabolicCalculator::calculate_from_csv("Time,VO2\n0:30,250\n", None).unwrap_err();
    match err {
        MetabolicError::MissingColumn { missing } => {
            assert_eq!(missing, vec!["VCO2".to_owned(), "RER".to_owned()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}
