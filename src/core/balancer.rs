//! Two-pass proportional rescaling of a trip matrix toward target margins.
//!
//! The balancer runs a row (origin) pass and then a column (destination)
//! pass, rounding every cell to a whole trip count after each pass. This is
//! a single deterministic sweep, not an iterate-to-convergence Furness loop:
//! the column pass works on already-rounded, origin-scaled data, so the
//! final column sums only approximate their targets.

use tracing::{debug, info};

use crate::core::matrix::{BalanceError, Restrictions, TripMatrix};

/// Rescale `matrix` so its margins approach the target `restrictions`.
///
/// Runs the row pass and then the column pass, in that fixed order. The
/// input matrix is never modified; a freshly allocated matrix is returned.
/// Rounding ties resolve half away from zero (`f64::round`).
pub fn balance(matrix: &TripMatrix, restrictions: &Restrictions) -> Result<TripMatrix, BalanceError> {
    if restrictions.len() != matrix.len() {
        return Err(BalanceError::ShapeMismatch(format!(
            "{} zones in matrix but {} target pairs",
            matrix.len(),
            restrictions.len()
        )));
    }

    let row_scaled = scale_rows(matrix, restrictions.origins())?;
    let balanced = scale_columns(&row_scaled, restrictions.destinies())?;

    info!(
        "Balanced {} zones: origin margins {:?}, destination margins {:?}",
        balanced.len(),
        balanced.row_sums(),
        balanced.column_sums()
    );

    Ok(balanced)
}

/// Row (origin) pass: scale each row by `target / row_sum`, then round.
///
/// A zero row sum against a non-zero target has no defined scale factor and
/// is reported as `DegenerateRow`; a zero row sum against a zero target
/// passes the all-zero row through unchanged.
pub fn scale_rows(matrix: &TripMatrix, targets: &[f64]) -> Result<TripMatrix, BalanceError> {
    let sums = matrix.row_sums();
    let mut cells = Vec::with_capacity(matrix.len());

    for (i, row) in matrix.rows().iter().enumerate() {
        if sums[i] == 0.0 {
            if targets[i] != 0.0 {
                return Err(BalanceError::DegenerateRow {
                    zone: matrix.zones()[i].clone(),
                    target: targets[i],
                });
            }
            cells.push(row.clone());
            continue;
        }

        let factor = targets[i] / sums[i];
        debug!("Row {}: sum {} target {} factor {}", matrix.zones()[i], sums[i], targets[i], factor);
        cells.push(row.iter().map(|value| (value * factor).round()).collect());
    }

    Ok(TripMatrix::from_validated(matrix.zones().to_vec(), cells))
}

/// Column (destination) pass: scale each column by `target / column_sum`,
/// then round. Same zero-guard as the row pass, reported as
/// `DegenerateColumn`.
pub fn scale_columns(matrix: &TripMatrix, targets: &[f64]) -> Result<TripMatrix, BalanceError> {
    let sums = matrix.column_sums();
    let mut factors = Vec::with_capacity(matrix.len());

    for (j, &sum) in sums.iter().enumerate() {
        if sum == 0.0 {
            if targets[j] != 0.0 {
                return Err(BalanceError::DegenerateColumn {
                    zone: matrix.zones()[j].clone(),
                    target: targets[j],
                });
            }
            factors.push(1.0);
            continue;
        }
        let factor = targets[j] / sum;
        debug!("Column {}: sum {} target {} factor {}", matrix.zones()[j], sum, targets[j], factor);
        factors.push(factor);
    }

    let cells = matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(&factors)
                .map(|(value, factor)| (value * factor).round())
                .collect()
        })
        .collect();

    Ok(TripMatrix::from_validated(matrix.zones().to_vec(), cells))
}
