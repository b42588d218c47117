// ABOUTME: Comma-separated text tokenizer and writer for metabolic cart exports
// ABOUTME: Rows are plain string vectors; width and type checks belong to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use csv::{Position, ReaderBuilder, WriterBuilder};
use metabolic_core::errors::{MetabolicError, PipelineResult};

/// One tokenized CSV line
pub type Row = Vec<String>;

/// Tokenize CSV text into rows.
///
/// Quoted fields may contain commas and line breaks. Rows may differ in
/// width; blank lines are dropped by the tokenizer.
///
/// # Errors
///
/// Returns `MetabolicError::Parse` when the text cannot be tokenized, for
/// example when it is not valid UTF-8 inside a quoted field.
pub fn parse(text: &str) -> PipelineResult<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(&e))?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

/// Write rows back to CSV text, quoting fields that need it
///
/// # Errors
///
/// Returns `MetabolicError::Serialize` if the writer fails to flush
pub fn write(rows: &[Row]) -> PipelineResult<String> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| serialize_error(&e))?;
    }
    let bytes = writer.into_inner().map_err(|e| MetabolicError::Serialize {
        message: e.error().to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| MetabolicError::Serialize {
        message: e.to_string(),
    })
}

/// Exact, case-sensitive header lookup
#[must_use]
pub fn find_column(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|cell| cell.trim() == name)
}

/// Case-insensitive header lookup
#[must_use]
pub fn find_column_ignore_case(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell.trim().eq_ignore_ascii_case(name))
}

fn parse_error(error: &csv::Error) -> MetabolicError {
    MetabolicError::Parse {
        line: error.position().map_or(0, Position::line),
        message: error.to_string(),
    }
}

fn serialize_error(error: &csv::Error) -> MetabolicError {
    MetabolicError::Serialize {
        message: error.to_string(),
    }
}
