use thiserror::Error;

/// Errors produced while building or balancing a trip matrix
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// Matrix/target index sets do not line up
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// Negative or non-finite entry in the matrix or a target vector
    #[error("invalid value {value} in {location}")]
    InvalidValue { location: String, value: f64 },
    /// A row sums to zero while its origin target is non-zero
    #[error("row sum for zone {zone} is zero but its origin target is {target}")]
    DegenerateRow { zone: String, target: f64 },
    /// A column sums to zero while its destination target is non-zero
    #[error("column sum for zone {zone} is zero but its destination target is {target}")]
    DegenerateColumn { zone: String, target: f64 },
}

/// A square origin-by-destination trip table.
///
/// Rows and columns are both indexed by the same ordered zone list;
/// `cells[i][j]` holds the trips from zone `i` to zone `j`. Entries are
/// validated to be finite and non-negative at construction time, so a
/// `TripMatrix` that exists is always safe to balance.
#[derive(Debug, Clone, PartialEq)]
pub struct TripMatrix {
    zones: Vec<String>,
    cells: Vec<Vec<f64>>,
}

impl TripMatrix {
    /// Build a matrix from a zone list and row-major cells, rejecting
    /// non-square data and negative or non-finite entries.
    pub fn new(zones: Vec<String>, cells: Vec<Vec<f64>>) -> Result<Self, BalanceError> {
        if cells.len() != zones.len() {
            return Err(BalanceError::ShapeMismatch(format!(
                "{} matrix rows for {} zones",
                cells.len(),
                zones.len()
            )));
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != zones.len() {
                return Err(BalanceError::ShapeMismatch(format!(
                    "row {} has {} columns, expected {}",
                    zones[i],
                    row.len(),
                    zones.len()
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                if !(value >= 0.0) || !value.is_finite() {
                    return Err(BalanceError::InvalidValue {
                        location: format!("cell {} -> {}", zones[i], zones[j]),
                        value,
                    });
                }
            }
        }
        Ok(Self { zones, cells })
    }

    /// Construct from cells already known to satisfy the invariants.
    /// Used by the balancer, whose passes only rescale validated data.
    pub(crate) fn from_validated(zones: Vec<String>, cells: Vec<Vec<f64>>) -> Self {
        Self { zones, cells }
    }

    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// Current margin totals per origin zone
    pub fn row_sums(&self) -> Vec<f64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    /// Current margin totals per destination zone
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.zones.len()];
        for row in &self.cells {
            for (j, value) in row.iter().enumerate() {
                sums[j] += value;
            }
        }
        sums
    }
}

/// Target margin totals the balancer tries to approach: one desired row
/// sum and one desired column sum per zone, aligned to the matrix order.
#[derive(Debug, Clone, PartialEq)]
pub struct Restrictions {
    origins: Vec<f64>,
    destinies: Vec<f64>,
}

impl Restrictions {
    pub fn new(origins: Vec<f64>, destinies: Vec<f64>) -> Result<Self, BalanceError> {
        if origins.len() != destinies.len() {
            return Err(BalanceError::ShapeMismatch(format!(
                "{} origin targets but {} destination targets",
                origins.len(),
                destinies.len()
            )));
        }
        for (name, values) in [("origin targets", &origins), ("destination targets", &destinies)] {
            for (i, &value) in values.iter().enumerate() {
                if !(value >= 0.0) || !value.is_finite() {
                    return Err(BalanceError::InvalidValue {
                        location: format!("{} at index {}", name, i),
                        value,
                    });
                }
            }
        }
        Ok(Self { origins, destinies })
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn origins(&self) -> &[f64] {
        &self.origins
    }

    pub fn destinies(&self) -> &[f64] {
        &self.destinies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|z| z.to_string()).collect()
    }

    #[test]
    fn test_new_accepts_square_matrix() {
        let matrix = TripMatrix::new(zones(&["A", "B"]), vec![vec![1.0, 2.0], vec![3.0, 4.0]])
            .unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.get(1, 0), 3.0);
    }

    #[test]
    fn test_new_rejects_wrong_row_count() {
        let err = TripMatrix::new(zones(&["A", "B"]), vec![vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, BalanceError::ShapeMismatch(_)));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err =
            TripMatrix::new(zones(&["A", "B"]), vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, BalanceError::ShapeMismatch(_)));
    }

    #[test]
    fn test_new_rejects_negative_cell() {
        let err = TripMatrix::new(zones(&["A", "B"]), vec![vec![1.0, -2.0], vec![3.0, 4.0]])
            .unwrap_err();
        assert_eq!(
            err,
            BalanceError::InvalidValue {
                location: "cell A -> B".to_string(),
                value: -2.0,
            }
        );
    }

    #[test]
    fn test_new_rejects_nan_cell() {
        let err = TripMatrix::new(zones(&["A"]), vec![vec![f64::NAN]]).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidValue { .. }));
    }

    #[test]
    fn test_margin_sums() {
        let matrix = TripMatrix::new(zones(&["A", "B"]), vec![vec![10.0, 10.0], vec![20.0, 20.0]])
            .unwrap();
        assert_eq!(matrix.row_sums(), vec![20.0, 40.0]);
        assert_eq!(matrix.column_sums(), vec![30.0, 30.0]);
    }

    #[test]
    fn test_restrictions_rejects_length_mismatch() {
        let err = Restrictions::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, BalanceError::ShapeMismatch(_)));
    }

    #[test]
    fn test_restrictions_rejects_negative_target() {
        let err = Restrictions::new(vec![1.0, -2.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidValue { .. }));
    }
}
