//! Dataset handling: records, source merging, and the master dataset file.
//!
//! The master dataset is a two-column CSV (`text,label`) produced once per
//! merge run and consumed read-only by the trainer. Labels are written as
//! integer strings and parsed back through the total label mapper, which is
//! a no-op on canonical values.

pub mod merge;
pub mod source;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritasError};
use crate::label::Label;

/// A single labeled training record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Text content to classify.
    pub text: String,
    /// Canonical veracity label.
    pub label: Label,
}

impl Record {
    /// Create a new record.
    pub fn new<S: Into<String>>(text: S, label: Label) -> Self {
        Record {
            text: text.into(),
            label,
        }
    }
}

/// A raw master-dataset row, before defensive label re-mapping.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// Text field, verbatim.
    pub text: String,
    /// Label field, verbatim (expected to be `"0"`/`"1"` but not trusted).
    pub label: String,
}

/// Write records to a master dataset CSV with a `text,label` header.
pub fn write_master(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["text", "label"])?;
    for record in records {
        let label = record.label.as_i64().to_string();
        writer.write_record([record.text.as_str(), label.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read the master dataset back as raw rows.
///
/// A missing file is fatal with an actionable message: the merger has to run
/// before the trainer.
pub fn read_master(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(VeritasError::dataset(format!(
            "master dataset not found at '{}'; run `veritas merge` first",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let text = record.get(0).unwrap_or("").to_string();
        let label = record.get(1).unwrap_or("").to_string();
        rows.push(RawRow { text, label });
    }
    Ok(rows)
}
