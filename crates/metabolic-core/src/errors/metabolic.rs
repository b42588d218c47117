// ABOUTME: Error taxonomy for the gas-exchange CSV pipeline and metabolic calculations
// ABOUTME: Structural failures abort a calculation; per-row failures never reach this type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use serde_json::json;
use thiserror::Error;

/// Structural failures of the metabolic pipeline.
///
/// A data row with an unparseable numeric cell is not represented here: it is
/// skipped, logged, and counted on the calculation result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetabolicError {
    /// Input text cannot be tokenized into rows
    #[error("CSV could not be parsed at line {line}: {message}")]
    Parse {
        /// 1-based line where the tokenizer gave up (0 when unknown)
        line: u64,
        /// Tokenizer message
        message: String,
    },

    /// One or more required headers are absent
    #[error("Required columns not found in CSV: {}. Needs: Time, VO2, VCO2, RER", .missing.join(", "))]
    MissingColumn {
        /// Header names that were not found
        missing: Vec<String>,
    },

    /// Zero valid samples remain for a required channel
    #[error("Insufficient data: {reason}")]
    InsufficientData {
        /// What was missing
        reason: String,
    },

    /// Filtered rows could not be written back as CSV text
    #[error("CSV could not be written: {message}")]
    Serialize {
        /// Writer message
        message: String,
    },

    /// Anthropometric or body-composition input failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

impl MetabolicError {
    /// Create an insufficient-data error
    #[must_use]
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    /// Create an invalid-input error for a named field
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Error code used when this error crosses into [`AppError`]
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Parse { .. } => ErrorCode::InvalidFormat,
            Self::MissingColumn { .. } => ErrorCode::MissingRequiredField,
            Self::InsufficientData { .. } => ErrorCode::InsufficientData,
            Self::Serialize { .. } => ErrorCode::SerializationError,
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
        }
    }
}

/// Result alias for pipeline operations
pub type PipelineResult<T> = Result<T, MetabolicError>;

impl From<MetabolicError> for AppError {
    fn from(error: MetabolicError) -> Self {
        let app_error = Self::new(error.error_code(), error.to_string());
        match &error {
            MetabolicError::MissingColumn { missing } => {
                app_error.with_details(json!({ "missing_columns": missing }))
            }
            MetabolicError::Parse { line, .. } => app_error.with_details(json!({ "line": line })),
            MetabolicError::InvalidInput { field, .. } => {
                app_error.with_details(json!({ "field": field }))
            }
            MetabolicError::InsufficientData { .. } | MetabolicError::Serialize { .. } => app_error,
        }
    }
}
