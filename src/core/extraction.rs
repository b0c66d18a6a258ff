//! Pulls the trip matrix and its target margins out of an imported dataset.
//!
//! Two import shapes are supported. The flat form carries the zone list,
//! matrix, and restriction vectors as parallel collections and only needs
//! reassembly. The table-slice form is a single labeled table from which
//! the trips block and the two restriction slices are cut by configured
//! label ranges.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::matrix::{BalanceError, Restrictions, TripMatrix};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("label {label} not found among table {axis} labels")]
    MissingLabel { axis: &'static str, label: String },
    #[error("slice {start}..={end} over table {axis} labels is empty")]
    EmptySlice {
        axis: &'static str,
        start: String,
        end: String,
    },
    #[error("sliced row zones {rows:?} do not match sliced column zones {columns:?}")]
    ZoneMismatch {
        rows: Vec<String>,
        columns: Vec<String>,
    },
    #[error(transparent)]
    Invalid(#[from] BalanceError),
}

/// Flat import shape: parallel zone list, raw matrix, and restrictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatDataset {
    pub zones: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub restrictions: RawRestrictions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRestrictions {
    pub origins: Vec<f64>,
    pub destinies: Vec<f64>,
}

/// Table-slice import shape: one labeled value table holding the trips
/// block plus the restriction row and column somewhere inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Label ranges that locate the trips block and the restriction slices
/// inside a labeled table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceRanges {
    /// First zone label of the trips block, on both axes
    pub zone_start: String,
    /// Last zone label of the trips block, on both axes
    pub zone_end: String,
    /// Column holding the per-zone origin targets
    pub origins_column: String,
    /// Row holding the per-zone destination targets
    pub destinies_row: String,
}

impl Default for SliceRanges {
    fn default() -> Self {
        Self {
            zone_start: "001".to_string(),
            zone_end: "999".to_string(),
            origins_column: "origins".to_string(),
            destinies_row: "destinies".to_string(),
        }
    }
}

/// Assemble core types from the flat form.
pub fn extract_flat(dataset: FlatDataset) -> Result<(TripMatrix, Restrictions), ExtractionError> {
    let matrix = TripMatrix::new(dataset.zones, dataset.matrix)?;
    let restrictions = Restrictions::new(
        dataset.restrictions.origins,
        dataset.restrictions.destinies,
    )?;
    Ok((matrix, restrictions))
}

/// Cut the trips block and the two restriction slices out of a labeled
/// table. Labels are matched exactly; the zone range must select the same
/// labels on both axes.
pub fn extract_slices(
    table: &LabeledTable,
    ranges: &SliceRanges,
) -> Result<(TripMatrix, Restrictions), ExtractionError> {
    let row_span = label_span(&table.row_labels, "row", &ranges.zone_start, &ranges.zone_end)?;
    let col_span = label_span(
        &table.column_labels,
        "column",
        &ranges.zone_start,
        &ranges.zone_end,
    )?;

    let row_zones: Vec<String> = table.row_labels[row_span.clone()].to_vec();
    let col_zones: Vec<String> = table.column_labels[col_span.clone()].to_vec();
    if row_zones != col_zones {
        return Err(ExtractionError::ZoneMismatch {
            rows: row_zones,
            columns: col_zones,
        });
    }

    let origins_col = find_label(&table.column_labels, "column", &ranges.origins_column)?;
    let destinies_row = find_label(&table.row_labels, "row", &ranges.destinies_row)?;

    debug!(
        "Slicing {} zones ({}..={}), origins column {:?}, destinies row {:?}",
        row_zones.len(),
        ranges.zone_start,
        ranges.zone_end,
        ranges.origins_column,
        ranges.destinies_row
    );

    let cells: Vec<Vec<f64>> = table.values[row_span.clone()]
        .iter()
        .map(|row| row[col_span.clone()].to_vec())
        .collect();

    let origins: Vec<f64> = table.values[row_span]
        .iter()
        .map(|row| row[origins_col])
        .collect();
    let destinies: Vec<f64> = table.values[destinies_row][col_span].to_vec();

    let matrix = TripMatrix::new(row_zones, cells)?;
    let restrictions = Restrictions::new(origins, destinies)?;
    Ok((matrix, restrictions))
}

fn find_label(
    labels: &[String],
    axis: &'static str,
    label: &str,
) -> Result<usize, ExtractionError> {
    labels
        .iter()
        .position(|l| l == label)
        .ok_or_else(|| ExtractionError::MissingLabel {
            axis,
            label: label.to_string(),
        })
}

fn label_span(
    labels: &[String],
    axis: &'static str,
    start: &str,
    end: &str,
) -> Result<std::ops::RangeInclusive<usize>, ExtractionError> {
    let start_idx = find_label(labels, axis, start)?;
    let end_idx = find_label(labels, axis, end)?;
    if start_idx > end_idx {
        return Err(ExtractionError::EmptySlice {
            axis,
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(start_idx..=end_idx)
}
