//! Linear run orchestrator: validate paths, import, extract, balance,
//! package, export. Any stage failure aborts the whole run; nothing is
//! retried and no partial output is written.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::core::{
    balance, extract_flat, extract_slices, BalanceError, ExtractionError, Restrictions,
    SliceRanges, TripMatrix,
};
use crate::gateway::{self, GatewayError, ImportedDataset, ResultBundle};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Balance(#[from] BalanceError),
}

/// What a completed run reports back for logging and display.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub zone_count: usize,
    pub total_trips: f64,
    pub output_path: PathBuf,
}

/// Run one dataset end to end. `output` defaults to the source file name
/// prefixed with `results_`, beside the source.
pub fn run(
    input: &Path,
    output: Option<&Path>,
    ranges: &SliceRanges,
) -> Result<RunSummary, PipelineError> {
    gateway::validate_source(input).map_err(GatewayError::from)?;

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => gateway::default_output_path(input),
    };
    gateway::validate_output(&output_path).map_err(GatewayError::from)?;
    // Reject an unexportable extension before doing any work
    gateway::Format::from_path(&output_path)?;

    let imported = gateway::import(input)?;
    let (matrix, restrictions) = extract(imported, ranges)?;
    info!(
        "Extracted {} zones, {} total trips",
        matrix.len(),
        matrix.row_sums().iter().sum::<f64>()
    );

    let balanced = balance(&matrix, &restrictions)?;
    let bundle = package(&balanced);
    gateway::export(&bundle, &output_path)?;

    Ok(RunSummary {
        zone_count: bundle.zones.len(),
        total_trips: bundle.origins.iter().sum(),
        output_path,
    })
}

fn extract(
    imported: ImportedDataset,
    ranges: &SliceRanges,
) -> Result<(TripMatrix, Restrictions), ExtractionError> {
    match imported {
        ImportedDataset::Flat(dataset) => extract_flat(dataset),
        ImportedDataset::Table(table) => extract_slices(&table, ranges),
    }
}

/// Bundle the balanced matrix with the margins it actually achieved.
fn package(balanced: &TripMatrix) -> ResultBundle {
    ResultBundle {
        zones: balanced.zones().to_vec(),
        matrix: balanced.rows().to_vec(),
        origins: balanced.row_sums(),
        destinies: balanced.column_sums(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn zone_ranges() -> SliceRanges {
        SliceRanges {
            zone_start: "A".to_string(),
            zone_end: "B".to_string(),
            origins_column: "origins".to_string(),
            destinies_row: "destinies".to_string(),
        }
    }

    #[test]
    fn test_run_json_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trips.json");
        fs::write(
            &input,
            r#"{
                "zones": ["A", "B"],
                "matrix": [[10, 10], [20, 20]],
                "restrictions": { "origins": [30, 30], "destinies": [20, 40] }
            }"#,
        )
        .unwrap();

        let summary = run(&input, None, &zone_ranges()).unwrap();
        assert_eq!(summary.zone_count, 2);
        assert_eq!(summary.output_path, dir.path().join("results_trips.json"));

        let bundle: ResultBundle =
            serde_json::from_str(&fs::read_to_string(&summary.output_path).unwrap()).unwrap();
        assert_eq!(bundle.matrix, vec![vec![10.0, 20.0], vec![10.0, 20.0]]);
        // Achieved margins, recomputed from the balanced matrix
        assert_eq!(bundle.origins, vec![30.0, 30.0]);
        assert_eq!(bundle.destinies, vec![20.0, 40.0]);
    }

    #[test]
    fn test_run_csv_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trips.csv");
        fs::write(
            &input,
            ",A,B,origins\nA,10,10,30\nB,20,20,30\ndestinies,20,40,60\n",
        )
        .unwrap();
        let output = dir.path().join("balanced.csv");

        let summary = run(&input, Some(&output), &zone_ranges()).unwrap();
        assert_eq!(summary.zone_count, 2);
        assert_eq!(summary.total_trips, 60.0);

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            ",A,B,origins\nA,10,20,30\nB,10,20,30\ndestinies,20,40,60\n"
        );
    }

    #[test]
    fn test_run_rejects_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("absent.json"), None, &zone_ranges()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Gateway(GatewayError::Path(_))
        ));
    }

    #[test]
    fn test_run_rejects_unsupported_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trips.json");
        fs::write(&input, "{}").unwrap();
        let output = dir.path().join("out.xlsx");

        let err = run(&input, Some(&output), &zone_ranges()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Gateway(GatewayError::UnsupportedFormat(_))
        ));
        // Fatal before import: no partial output
        assert!(!output.exists());
    }

    #[test]
    fn test_run_degenerate_row_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trips.json");
        fs::write(
            &input,
            r#"{
                "zones": ["A", "B"],
                "matrix": [[0, 0], [5, 5]],
                "restrictions": { "origins": [10, 10], "destinies": [5, 15] }
            }"#,
        )
        .unwrap();

        let err = run(&input, None, &zone_ranges()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Balance(BalanceError::DegenerateRow { .. })
        ));
        assert!(!dir.path().join("results_trips.json").exists());
    }
}
