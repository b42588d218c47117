// ABOUTME: Row filters applied to metabolic cart exports before calculation
// ABOUTME: Drops the units annotation row and trims warm-up minutes by elapsed time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Both filters are no-ops on inputs they cannot safely transform. A no-op is
//! logged at `warn`, never reported as an error.

use crate::tabular::{self, find_column_ignore_case, Row};
use metabolic_core::errors::PipelineResult;
use tracing::{debug, warn};

/// Header of the elapsed-time column (matched case-insensitively)
pub const TIME_HEADER: &str = "Time";

/// Position of the units annotation row in a device export
const UNITS_ROW_INDEX: usize = 1;

/// Remove the units annotation row (the second row).
///
/// Inputs with fewer than three rows are returned unchanged, so callers must
/// not assume the row was removed without checking the count.
#[must_use]
pub fn strip_units_row(mut rows: Vec<Row>) -> Vec<Row> {
    if rows.len() < 3 {
        warn!(
            rows = rows.len(),
            "Too few rows to strip a units row, leaving input unchanged"
        );
        return rows;
    }
    rows.remove(UNITS_ROW_INDEX);
    debug!(rows = rows.len(), "Stripped units row");
    rows
}

/// Drop data rows whose elapsed minute is below `minutes`.
///
/// The header is always kept. Time values are read as `M:SS`; a row whose
/// time cannot be read, or that is too short to hold a time cell, is kept.
/// A non-positive threshold or a missing Time column leaves the rows as-is.
#[must_use]
pub fn trim_leading_minutes(rows: Vec<Row>, minutes: f64) -> Vec<Row> {
    if minutes.is_nan() || minutes <= 0.0 || rows.len() < 2 {
        return rows;
    }
    let Some(time_index) = rows
        .first()
        .and_then(|header| find_column_ignore_case(header, TIME_HEADER))
    else {
        warn!("No Time column found, skipping time-based trimming");
        return rows;
    };

    let before = rows.len();
    let kept: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .filter(|(index, row)| *index == 0 || keep_row(row, time_index, minutes))
        .map(|(_, row)| row)
        .collect();
    debug!(
        removed = before - kept.len(),
        minutes, "Trimmed leading minutes"
    );
    kept
}

/// Text form of [`strip_units_row`]; unchanged input is returned verbatim
///
/// # Errors
///
/// Returns `MetabolicError::Parse` if the text cannot be tokenized
pub fn strip_units_row_text(csv_text: &str) -> PipelineResult<String> {
    let rows = tabular::parse(csv_text)?;
    if rows.len() < 3 {
        warn!(
            rows = rows.len(),
            "Too few rows to strip a units row, leaving input unchanged"
        );
        return Ok(csv_text.to_owned());
    }
    tabular::write(&strip_units_row(rows))
}

/// Text form of [`trim_leading_minutes`]; unchanged input is returned verbatim
///
/// # Errors
///
/// Returns `MetabolicError::Parse` if the text cannot be tokenized
pub fn trim_leading_minutes_text(csv_text: &str, minutes: f64) -> PipelineResult<String> {
    if minutes.is_nan() || minutes <= 0.0 {
        return Ok(csv_text.to_owned());
    }
    let rows = tabular::parse(csv_text)?;
    let before = rows.len();
    let trimmed = trim_leading_minutes(rows, minutes);
    if trimmed.len() == before {
        return Ok(csv_text.to_owned());
    }
    tabular::write(&trimmed)
}

/// Whole minutes of an `M:SS` label, or `None` if it does not have that shape
#[must_use]
pub fn elapsed_minutes(time_label: &str) -> Option<i64> {
    let mut parts = time_label.split(':');
    let (Some(minute), Some(_seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    minute.trim().parse().ok()
}

fn keep_row(row: &[String], time_index: usize, minutes: f64) -> bool {
    match row.get(time_index).and_then(|cell| elapsed_minutes(cell)) {
        Some(elapsed) => elapsed as f64 >= minutes,
        None => true,
    }
}
