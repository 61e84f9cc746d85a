// crates/repostats-core/src/ingestion.rs

use std::fs;
use std::path::Path;

use polars::prelude::*;
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::model::{RawRow, REQUIRED_COLUMNS};

/// A freshly loaded CSV: the verbatim rows plus a string-typed frame of the
/// columns the pipeline works on.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub raw_rows: Vec<RawRow>,
    pub frame: DataFrame,
}

impl Dataset {
    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let content = fs::read(path).map_err(|source| PipelineError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read dataset");
    parse_dataset(&content)
}

pub fn parse_dataset(content: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records();

    let header: Vec<String> = records
        .next()
        .ok_or(PipelineError::EmptyDataset)??
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut required_idx = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for name in REQUIRED_COLUMNS {
        let idx = header
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?;
        required_idx.push(idx);
    }

    let mut raw_rows = Vec::new();
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); REQUIRED_COLUMNS.len()];

    for record in records {
        let record = record?;

        let mut row = RawRow::new();
        for (idx, name) in header.iter().enumerate() {
            row.insert(name.clone(), infer_cell(record.get(idx).unwrap_or("")));
        }
        raw_rows.push(row);

        for (values, &idx) in columns.iter_mut().zip(required_idx.iter()) {
            values.push(record.get(idx).unwrap_or("").to_string());
        }
    }

    let frame = DataFrame::new(
        REQUIRED_COLUMNS
            .iter()
            .zip(columns)
            .map(|(name, values)| Series::new((*name).into(), values).into())
            .collect(),
    )?;

    debug!(rows = raw_rows.len(), columns = header.len(), "parsed dataset");

    Ok(Dataset { raw_rows, frame })
}

/// Best-effort typing of a raw cell: empty is null, numbers become numbers,
/// everything else stays text.
pub fn infer_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Value::from(value);
    }
    if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(cell.to_string())
}
