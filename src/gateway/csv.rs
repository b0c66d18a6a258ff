//! CSV encoding of labeled trip tables.
//!
//! Import reads one labeled table: the first record holds the column
//! labels (corner cell ignored), every following record starts with its
//! row label. Export writes the balanced matrix with the achieved origin
//! margin as a trailing column and the achieved destination margin as a
//! trailing row, which makes the written file sliceable again on import.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::core::LabeledTable;

use super::{GatewayError, ResultBundle};

pub fn read_table(path: &Path) -> Result<LabeledTable, GatewayError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => {
            return Err(GatewayError::MalformedTable {
                path: path.display().to_string(),
                detail: "file is empty".to_string(),
            })
        }
    };
    let column_labels: Vec<String> = header.iter().skip(1).map(|s| s.trim().to_string()).collect();

    let mut row_labels = Vec::new();
    let mut values = Vec::new();
    for record in records {
        let record = record?;
        let mut fields = record.iter();
        let label = match fields.next() {
            Some(label) => label.trim().to_string(),
            None => continue,
        };

        let mut row = Vec::with_capacity(column_labels.len());
        for (j, field) in fields.enumerate() {
            let value = field.trim().parse::<f64>().map_err(|_| {
                GatewayError::MalformedTable {
                    path: path.display().to_string(),
                    detail: format!("cell ({}, {}) is not numeric: {:?}", label, j, field),
                }
            })?;
            row.push(value);
        }
        if row.len() != column_labels.len() {
            return Err(GatewayError::MalformedTable {
                path: path.display().to_string(),
                detail: format!(
                    "row {} has {} values, expected {}",
                    label,
                    row.len(),
                    column_labels.len()
                ),
            });
        }

        row_labels.push(label);
        values.push(row);
    }

    Ok(LabeledTable {
        row_labels,
        column_labels,
        values,
    })
}

pub fn write_bundle(bundle: &ResultBundle, path: &Path) -> Result<(), GatewayError> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    let mut header = vec![String::new()];
    header.extend(bundle.zones.iter().cloned());
    header.push("origins".to_string());
    writer.write_record(&header)?;

    for (i, zone) in bundle.zones.iter().enumerate() {
        let mut record = vec![zone.clone()];
        record.extend(bundle.matrix[i].iter().map(|v| v.to_string()));
        record.push(bundle.origins[i].to_string());
        writer.write_record(&record)?;
    }

    let total: f64 = bundle.origins.iter().sum();
    let mut footer = vec!["destinies".to_string()];
    footer.extend(bundle.destinies.iter().map(|v| v.to_string()));
    footer.push(total.to_string());
    writer.write_record(&footer)?;

    writer.flush()?;
    Ok(())
}
