// ABOUTME: Typed gas-exchange samples extracted from tokenized metabolic cart rows
// ABOUTME: Resolves the column layout once and reports skipped rows as explicit outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::filters::TIME_HEADER;
use crate::tabular::{find_column, find_column_ignore_case, Row};
use metabolic_core::errors::{MetabolicError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Oxygen uptake header (case-sensitive)
pub const VO2_HEADER: &str = "VO2";
/// Carbon dioxide output header (case-sensitive)
pub const VCO2_HEADER: &str = "VCO2";
/// Respiratory exchange ratio header (case-sensitive)
pub const RER_HEADER: &str = "RER";

/// One accepted measurement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasExchangeSample {
    /// Elapsed time as exported, e.g. "3:15"
    pub time_label: String,
    /// Oxygen uptake (ml/min)
    pub vo2_ml_min: f64,
    /// Carbon dioxide output (ml/min)
    pub vco2_ml_min: f64,
    /// Respiratory exchange ratio
    pub rer: f64,
    /// Weight-normalized oxygen uptake (ml/kg/min), when exported
    pub vo2_ml_kg_min: Option<f64>,
    /// Weight-normalized carbon dioxide output (ml/kg/min), when exported
    pub vco2_ml_kg_min: Option<f64>,
}

/// Column positions resolved from the header row.
///
/// Devices export the per-kg variant of a channel in the column right after
/// it. That column is only trusted when its header is blank or mentions `kg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Elapsed time column
    pub time: usize,
    /// VO2 column
    pub vo2: usize,
    /// VCO2 column
    pub vco2: usize,
    /// RER column
    pub rer: usize,
    /// VO2 per kg column
    pub vo2_per_kg: Option<usize>,
    /// VCO2 per kg column
    pub vco2_per_kg: Option<usize>,
}

impl ColumnLayout {
    /// Resolve required and optional columns from a header row
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::MissingColumn` naming every required header
    /// that is absent
    pub fn locate(header: &[String]) -> PipelineResult<Self> {
        let time = find_column_ignore_case(header, TIME_HEADER);
        let vo2 = find_column(header, VO2_HEADER);
        let vco2 = find_column(header, VCO2_HEADER);
        let rer = find_column(header, RER_HEADER);

        if let (Some(time), Some(vo2), Some(vco2), Some(rer)) = (time, vo2, vco2, rer) {
            return Ok(Self {
                time,
                vo2,
                vco2,
                rer,
                vo2_per_kg: per_kg_column(header, vo2),
                vco2_per_kg: per_kg_column(header, vco2),
            });
        }

        let missing = [
            (TIME_HEADER, time),
            (VO2_HEADER, vo2),
            (VCO2_HEADER, vco2),
            (RER_HEADER, rer),
        ]
        .into_iter()
        .filter(|(_, index)| index.is_none())
        .map(|(name, _)| name.to_owned())
        .collect();
        Err(MetabolicError::MissingColumn { missing })
    }

    /// Minimum row width that holds every required cell
    #[must_use]
    pub fn required_width(&self) -> usize {
        self.time.max(self.vo2).max(self.vco2).max(self.rer) + 1
    }
}

fn per_kg_column(header: &[String], parent: usize) -> Option<usize> {
    let index = parent + 1;
    let label = header.get(index)?.trim();
    (label.is_empty() || label.to_ascii_lowercase().contains("kg")).then_some(index)
}

/// Why a data row was left out of the sample set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Row ends before a required cell
    TooShort {
        /// Cells present
        width: usize,
        /// Cells needed
        required: usize,
    },
    /// A required cell is not a usable number
    Unparseable {
        /// Header of the offending column
        column: &'static str,
        /// Cell text
        value: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { width, required } => {
                write!(f, "row has {width} cells, {required} required")
            }
            Self::Unparseable { column, value } => {
                write!(f, "{column} value '{value}' is not a valid measurement")
            }
        }
    }
}

/// Result of reading one data row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Row produced a sample
    Accepted(GasExchangeSample),
    /// Row was excluded
    Skipped(SkipReason),
}

impl GasExchangeSample {
    /// Read one data row against a resolved layout
    #[must_use]
    pub fn from_row(row: &[String], layout: &ColumnLayout) -> RowOutcome {
        let required = layout.required_width();
        if row.len() < required {
            return RowOutcome::Skipped(SkipReason::TooShort {
                width: row.len(),
                required,
            });
        }

        let fields = (
            measurement(row, layout.vo2, VO2_HEADER, true),
            measurement(row, layout.vco2, VCO2_HEADER, true),
            measurement(row, layout.rer, RER_HEADER, false),
        );
        match fields {
            (Ok(vo2_ml_min), Ok(vco2_ml_min), Ok(rer)) => RowOutcome::Accepted(Self {
                time_label: row
                    .get(layout.time)
                    .map_or_else(String::new, |cell| cell.trim().to_owned()),
                vo2_ml_min,
                vco2_ml_min,
                rer,
                vo2_ml_kg_min: layout.vo2_per_kg.and_then(|i| optional_number(row, i)),
                vco2_ml_kg_min: layout.vco2_per_kg.and_then(|i| optional_number(row, i)),
            }),
            (Err(reason), _, _) | (_, Err(reason), _) | (_, _, Err(reason)) => {
                RowOutcome::Skipped(reason)
            }
        }
    }
}

fn measurement(
    row: &[String],
    index: usize,
    column: &'static str,
    non_negative: bool,
) -> Result<f64, SkipReason> {
    let cell = row.get(index).map_or("", |cell| cell.trim());
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() && (!non_negative || value >= 0.0) => Ok(value),
        _ => Err(SkipReason::Unparseable {
            column,
            value: cell.to_owned(),
        }),
    }
}

fn optional_number(row: &[String], index: usize) -> Option<f64> {
    row.get(index)
        .and_then(|cell| cell.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Samples accepted from a document plus the count of rows left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleExtraction {
    /// Accepted samples in document order
    pub samples: Vec<GasExchangeSample>,
    /// Data rows that were skipped
    pub skipped_rows: usize,
}

impl SampleExtraction {
    /// Read every row after the header
    ///
    /// # Errors
    ///
    /// Returns `MetabolicError::InsufficientData` for a document with no
    /// header, or `MetabolicError::MissingColumn` when required headers are
    /// absent
    pub fn from_rows(rows: &[Row]) -> PipelineResult<Self> {
        let Some((header, data)) = rows.split_first() else {
            return Err(MetabolicError::insufficient_data("CSV contains no rows"));
        };
        let layout = ColumnLayout::locate(header)?;

        let mut extraction = Self::default();
        for (offset, row) in data.iter().enumerate() {
            match GasExchangeSample::from_row(row, &layout) {
                RowOutcome::Accepted(sample) => extraction.samples.push(sample),
                RowOutcome::Skipped(reason) => {
                    warn!(row = offset + 2, %reason, "Skipping gas-exchange row");
                    extraction.skipped_rows += 1;
                }
            }
        }
        debug!(
            accepted = extraction.samples.len(),
            skipped = extraction.skipped_rows,
            "Extracted gas-exchange samples"
        );
        Ok(extraction)
    }

    /// VO2 series (ml/min)
    #[must_use]
    pub fn vo2_series(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.vo2_ml_min).collect()
    }

    /// VCO2 series (ml/min)
    #[must_use]
    pub fn vco2_series(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.vco2_ml_min).collect()
    }

    /// VO2 per kg series (ml/kg/min), `None` where the export has no value
    #[must_use]
    pub fn vo2_per_kg_series(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.vo2_ml_kg_min).collect()
    }

    /// VCO2 per kg series (ml/kg/min)
    #[must_use]
    pub fn vco2_per_kg_series(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.vco2_ml_kg_min).collect()
    }

    /// RER series
    #[must_use]
    pub fn rer_series(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.rer).collect()
    }

    /// Time labels aligned with [`Self::samples`]
    #[must_use]
    pub fn time_labels(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.time_label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::parse;

    fn header(cells: &[&str]) -> Row {
        cells.iter().map(|c| (*c).to_owned()).collect()
    }

    #[test]
    fn test_locate_reports_all_missing_columns() {
        let err = ColumnLayout::locate(&header(&["time", "VO2"])).unwrap_err();
        assert_eq!(
            err,
            MetabolicError::MissingColumn {
                missing: vec!["VCO2".to_owned(), "RER".to_owned()]
            }
        );
    }

    #[test]
    fn test_locate_validates_per_kg_neighbours() {
        let layout =
            ColumnLayout::locate(&header(&["Time", "VO2", "VO2/kg", "VCO2", "RER"])).unwrap();
        assert_eq!(layout.vo2_per_kg, Some(2));
        assert_eq!(layout.vco2_per_kg, None);

        let blank = ColumnLayout::locate(&header(&["TIME", "VO2", "", "VCO2", " ", "RER"])).unwrap();
        assert_eq!(blank.vo2_per_kg, Some(2));
        assert_eq!(blank.vco2_per_kg, Some(4));
    }

    #[test]
    fn test_extraction_skips_bad_rows() {
        let rows = parse(
            "Time,VO2,VO2/kg,VCO2,RER\n\
             min,ml/min,ml/kg/min,ml/min,\n\
             0:15,250,3.1,200,0.80\n\
             0:30,n/a,3.2,210,0.81\n\
             0:45,270,,220,0.81\n\
             1:00,-5,0.1,220,0.81\n\
             1:15,280\n",
        )
        .unwrap();
        let extraction = SampleExtraction::from_rows(&rows).unwrap();

        assert_eq!(extraction.skipped_rows, 4);
        assert_eq!(extraction.time_labels(), vec!["0:15", "0:45"]);
        assert_eq!(extraction.vo2_series(), vec![250.0, 270.0]);
        assert_eq!(extraction.vo2_per_kg_series(), vec![Some(3.1), None]);
        assert_eq!(extraction.vco2_per_kg_series(), vec![None, None]);
    }

    #[test]
    fn test_non_finite_values_are_unparseable() {
        let layout = ColumnLayout::locate(&header(&["Time", "VO2", "VCO2", "RER"])).unwrap();
        let outcome = GasExchangeSample::from_row(&header(&["0:10", "250", "inf", "0.8"]), &layout);
        assert_eq!(
            outcome,
            RowOutcome::Skipped(SkipReason::Unparseable {
                column: "VCO2",
                value: "inf".to_owned()
            })
        );
    }

    #[test]
    fn test_empty_document_is_insufficient() {
        assert!(matches!(
            SampleExtraction::from_rows(&[]),
            Err(MetabolicError::InsufficientData { .. })
        ));
    }
}
