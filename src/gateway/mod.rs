//! File import/export for trip datasets. The gateway owns encoding
//! dispatch and path validation; it never prompts and never exits, it
//! only returns typed errors for the entry point to present.

mod csv;
mod format;
mod json;
mod paths;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::{FlatDataset, LabeledTable};

pub use format::Format;
pub use paths::{default_output_path, validate_output, validate_source, PathError, RESULT_PREFIX};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("malformed table in {path}: {detail}")]
    MalformedTable { path: String, detail: String },
}

/// What an import hands to the orchestrator: JSON files carry the flat
/// form, CSV files carry one labeled table for slicing.
#[derive(Debug, Clone)]
pub enum ImportedDataset {
    Flat(FlatDataset),
    Table(LabeledTable),
}

/// Export shape: the balanced matrix with the margins it actually
/// achieved, recomputed from the result rather than copied from the
/// requested targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub zones: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub origins: Vec<f64>,
    pub destinies: Vec<f64>,
}

/// Decode the file at `path`, picking the decoder from its extension.
pub fn import(path: &Path) -> Result<ImportedDataset, GatewayError> {
    let dataset = match Format::from_path(path)? {
        Format::Json => ImportedDataset::Flat(json::read_flat(path)?),
        Format::Csv => ImportedDataset::Table(csv::read_table(path)?),
    };
    info!("Imported dataset from {:?}", path);
    Ok(dataset)
}

/// Encode `bundle` to `path`, picking the encoder from its extension.
pub fn export(bundle: &ResultBundle, path: &Path) -> Result<(), GatewayError> {
    match Format::from_path(path)? {
        Format::Json => json::write_bundle(bundle, path)?,
        Format::Csv => csv::write_bundle(bundle, path)?,
    }
    info!("Exported balanced dataset to {:?}", path);
    Ok(())
}
