//! JSON encoding of the flat dataset form and of the result bundle.

use std::fs;
use std::path::Path;

use crate::core::FlatDataset;

use super::{GatewayError, ResultBundle};

pub fn read_flat(path: &Path) -> Result<FlatDataset, GatewayError> {
    let contents = fs::read_to_string(path)?;
    let dataset = serde_json::from_str(&contents)?;
    Ok(dataset)
}

pub fn write_bundle(bundle: &ResultBundle, path: &Path) -> Result<(), GatewayError> {
    let json = serde_json::to_string_pretty(bundle)?;
    fs::write(path, json)?;
    Ok(())
}
